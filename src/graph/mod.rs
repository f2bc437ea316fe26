//! Graph module for file dependency modeling.
//!
//! This module provides the [`DependencyGraph`] struct for recording which
//! files `require` which, using a directed graph structure.
//!
//! # Example
//!
//! ```rust
//! use filemerge::graph::{DependencyGraph, DependencyPair};
//!
//! let pairs = vec![DependencyPair::new("Folder1/File1-1.txt", "Folder2/File2-1.txt")];
//! let graph = DependencyGraph::from_pairs(&pairs);
//!
//! assert_eq!(graph.node_count(), 2);
//! assert_eq!(graph.edge_count(), 1);
//! ```

mod dependency_graph;

pub use dependency_graph::{CycleInfo, DependencyGraph, DependencyPair};
