//! Emission order resolution.
//!
//! Turns the `require` pairs collected from every file into a total order in
//! which each file appears after everything it requires. The only failure
//! mode is a dependency cycle, reported with its path.
//!
//! # Example
//!
//! ```rust
//! use filemerge::graph::DependencyPair;
//! use filemerge::resolve::{OrderResolver, TopologicalResolver};
//!
//! let pairs = vec![
//!     DependencyPair::new("A", "B"),
//!     DependencyPair::new("B", "C"),
//! ];
//! let order = TopologicalResolver::new().resolve(&pairs).unwrap();
//! assert_eq!(order, vec!["C", "B", "A"]);
//! ```

mod topological;

pub use topological::TopologicalResolver;

use thiserror::Error;

use crate::graph::{CycleInfo, DependencyGraph, DependencyPair};

/// Raised when the dependency graph contains a cycle.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("found cyclic dependency: {}", .cycle.cycle_path())]
pub struct CyclicDependencyError {
    /// The offending cycle, in edge order
    pub cycle: CycleInfo,
}

impl CyclicDependencyError {
    pub fn new(cycle: CycleInfo) -> Self {
        Self { cycle }
    }
}

/// Result type for resolution.
pub type ResolveResult<T> = Result<T, CyclicDependencyError>;

/// Produces an emission order from dependency information.
pub trait OrderResolver {
    /// Resolve an already built graph, including any standalone nodes.
    fn resolve_graph(&self, graph: &DependencyGraph) -> ResolveResult<Vec<String>>;

    /// Resolve a flat list of (dependent, dependency) pairs.
    fn resolve(&self, pairs: &[DependencyPair]) -> ResolveResult<Vec<String>> {
        self.resolve_graph(&DependencyGraph::from_pairs(pairs))
    }
}
