//! File dependency graph implementation using petgraph.
//!
//! Provides a directed graph structure for modeling `require` relationships
//! between files, with lookup by root-relative path and the cycle record used
//! for diagnostics.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::HashMap;

/// A single `require` relationship between two files.
///
/// `dependent` must be emitted strictly after `dependency`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DependencyPair {
    /// The file that declares the directive
    pub dependent: String,
    /// The file named inside the directive
    pub dependency: String,
}

impl DependencyPair {
    /// Creates a new pair.
    ///
    /// # Example
    ///
    /// ```rust
    /// use filemerge::graph::DependencyPair;
    ///
    /// let pair = DependencyPair::new("b.txt", "a.txt");
    /// assert_eq!(pair.dependent, "b.txt");
    /// assert_eq!(pair.dependency, "a.txt");
    /// ```
    pub fn new(dependent: impl Into<String>, dependency: impl Into<String>) -> Self {
        Self {
            dependent: dependent.into(),
            dependency: dependency.into(),
        }
    }
}

/// A directed graph of file dependencies.
///
/// Nodes are root-relative paths with forward slashes. Edges point from the
/// dependent file to its dependency, so a node's outgoing edge count is the
/// number of dependencies it still waits on. Nodes don't have to exist on
/// disk; naming a path in a directive is enough to create one.
///
/// # Example
///
/// ```rust
/// use filemerge::graph::DependencyGraph;
///
/// let mut graph = DependencyGraph::new();
///
/// // app.txt requires lib.txt and util.txt; lib.txt requires util.txt
/// graph.add_edge("app.txt", "lib.txt");
/// graph.add_edge("app.txt", "util.txt");
/// graph.add_edge("lib.txt", "util.txt");
///
/// assert_eq!(graph.node_count(), 3);
/// assert_eq!(graph.edge_count(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    /// The underlying directed graph
    graph: DiGraph<String, ()>,
    /// Maps file paths to their node indices for O(1) lookup
    node_indices: HashMap<String, NodeIndex>,
}

impl Default for DependencyGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl DependencyGraph {
    /// Creates a new empty dependency graph.
    ///
    /// # Example
    ///
    /// ```rust
    /// use filemerge::graph::DependencyGraph;
    ///
    /// let graph = DependencyGraph::new();
    /// assert_eq!(graph.node_count(), 0);
    /// ```
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            node_indices: HashMap::new(),
        }
    }

    /// Creates a new graph with pre-allocated capacity.
    ///
    /// # Arguments
    ///
    /// * `nodes` - Expected number of nodes
    /// * `edges` - Expected number of edges
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            graph: DiGraph::with_capacity(nodes, edges),
            node_indices: HashMap::with_capacity(nodes),
        }
    }

    /// Builds a graph from a list of dependency pairs.
    ///
    /// Both endpoints of every pair are registered as nodes. Duplicate pairs
    /// produce parallel edges.
    ///
    /// # Example
    ///
    /// ```rust
    /// use filemerge::graph::{DependencyGraph, DependencyPair};
    ///
    /// let pairs = vec![
    ///     DependencyPair::new("b.txt", "a.txt"),
    ///     DependencyPair::new("c.txt", "b.txt"),
    /// ];
    /// let graph = DependencyGraph::from_pairs(&pairs);
    /// assert_eq!(graph.node_count(), 3);
    /// ```
    pub fn from_pairs(pairs: &[DependencyPair]) -> Self {
        let mut graph = Self::with_capacity(pairs.len() * 2, pairs.len());
        for pair in pairs {
            graph.add_edge(&pair.dependent, &pair.dependency);
        }
        graph
    }

    /// Adds a file node to the graph.
    ///
    /// If a node with the same path already exists, returns its existing
    /// index without modification.
    pub fn add_node(&mut self, path: &str) -> NodeIndex {
        if let Some(&idx) = self.node_indices.get(path) {
            return idx;
        }

        let idx = self.graph.add_node(path.to_string());
        self.node_indices.insert(path.to_string(), idx);
        idx
    }

    /// Adds an edge from `dependent` to `dependency`.
    ///
    /// Missing endpoints are registered on the fly. Edges are not
    /// deduplicated.
    ///
    /// # Example
    ///
    /// ```rust
    /// use filemerge::graph::DependencyGraph;
    ///
    /// let mut graph = DependencyGraph::new();
    /// graph.add_edge("b.txt", "a.txt");
    /// graph.add_edge("b.txt", "a.txt");
    ///
    /// assert_eq!(graph.node_count(), 2);
    /// assert_eq!(graph.edge_count(), 2);
    /// ```
    pub fn add_edge(&mut self, dependent: &str, dependency: &str) {
        let from_idx = self.add_node(dependent);
        let to_idx = self.add_node(dependency);
        self.graph.add_edge(from_idx, to_idx, ());
    }

    /// Gets the direct dependencies of a file (outgoing edges).
    ///
    /// Returns distinct paths in lexicographic order; an unknown path yields
    /// an empty list.
    ///
    /// # Example
    ///
    /// ```rust
    /// use filemerge::graph::DependencyGraph;
    ///
    /// let mut graph = DependencyGraph::new();
    /// graph.add_edge("app.txt", "util.txt");
    /// graph.add_edge("app.txt", "lib.txt");
    ///
    /// assert_eq!(graph.get_dependencies("app.txt"), vec!["lib.txt", "util.txt"]);
    /// ```
    pub fn get_dependencies(&self, path: &str) -> Vec<&str> {
        self.neighbors(path, Direction::Outgoing)
    }

    /// Gets the files that directly depend on `path` (incoming edges).
    pub fn get_dependents(&self, path: &str) -> Vec<&str> {
        self.neighbors(path, Direction::Incoming)
    }

    fn neighbors(&self, path: &str, direction: Direction) -> Vec<&str> {
        let Some(&idx) = self.node_indices.get(path) else {
            return Vec::new();
        };

        let mut names: Vec<&str> = self
            .graph
            .edges_directed(idx, direction)
            .map(|edge| match direction {
                Direction::Outgoing => edge.target(),
                Direction::Incoming => edge.source(),
            })
            .map(|other| self.graph[other].as_str())
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    /// Returns the underlying petgraph graph for algorithms that walk it
    /// directly.
    pub fn as_petgraph(&self) -> &DiGraph<String, ()> {
        &self.graph
    }

    /// Returns the number of nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of edges in the graph, duplicates included.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns true if the graph contains a node with this path.
    pub fn contains(&self, path: &str) -> bool {
        self.node_indices.contains_key(path)
    }
}

/// Information about a detected circular dependency.
///
/// Contains the file paths that form the cycle, in edge order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleInfo {
    /// The paths in the cycle (the last one requires the first)
    pub nodes: Vec<String>,
}

impl CycleInfo {
    /// Returns a formatted string representation of the cycle path.
    ///
    /// For example: "a.txt -> b.txt -> a.txt"
    pub fn cycle_path(&self) -> String {
        let Some(first) = self.nodes.first() else {
            return String::new();
        };
        let mut path = self.nodes.join(" -> ");
        path.push_str(" -> ");
        path.push_str(first);
        path
    }
}
