//! Merge orchestration.
//!
//! [`FileMerger`] ties the pipeline together: discover candidate files,
//! extract their `require` pairs, resolve the emission order and write the
//! merged output.
//!
//! # Example
//!
//! ```ignore
//! use filemerge::{FileMerger, MergeStrategy};
//!
//! let report = FileMerger::new(MergeStrategy::Streaming).merge("./docs", "merged.txt")?;
//! println!("merged {} files", report.order.len());
//! ```

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::config::{MergeOptions, MergeStrategy};
use crate::content::{ContentError, ContentMerger};
use crate::discovery::{discover_files, DiscoveryError};
use crate::extract::{DependencyExtractor, ExtractionError};
use crate::graph::{DependencyGraph, DependencyPair};
use crate::observer::{MergeObserver, NoopObserver};
use crate::resolve::{CyclicDependencyError, OrderResolver, TopologicalResolver};

/// Errors that abort a merge.
#[derive(Error, Debug)]
pub enum MergeError {
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Cycle(#[from] CyclicDependencyError),

    #[error("Failed to read file {}: {source}", .path.display())]
    ContentRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write output file {}: {source}", .path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<ContentError> for MergeError {
    fn from(err: ContentError) -> Self {
        match err {
            ContentError::Read { path, source } => MergeError::ContentRead { path, source },
            ContentError::Write { path, source } => MergeError::OutputWrite { path, source },
        }
    }
}

/// Result type for merge operations.
pub type MergeResult<T> = Result<T, MergeError>;

/// Everything known about a merge before any content is read.
#[derive(Debug, Clone)]
pub struct MergePlan {
    /// Root directory the paths are relative to
    pub root: PathBuf,
    /// Discovered candidate files, sorted
    pub files: Vec<String>,
    /// Every (dependent, dependency) pair, in discovery then directive order
    pub pairs: Vec<DependencyPair>,
    /// Resolved emission order
    pub order: Vec<String>,
    graph: DependencyGraph,
}

impl MergePlan {
    /// Direct dependencies of `file`, sorted.
    pub fn dependencies_of(&self, file: &str) -> Vec<&str> {
        self.graph.get_dependencies(file)
    }

    /// Files that directly require `file`, sorted.
    pub fn dependents_of(&self, file: &str) -> Vec<&str> {
        self.graph.get_dependents(file)
    }

    /// Nodes in the order that were only referenced, never discovered.
    ///
    /// Merging this plan will fail on the first of these.
    pub fn missing(&self) -> Vec<&str> {
        self.order
            .iter()
            .filter(|node| self.files.binary_search(*node).is_err())
            .map(String::as_str)
            .collect()
    }

    /// Discovered files left out of the order because no directive touches
    /// them and standalone files were not requested.
    pub fn skipped(&self) -> Vec<&str> {
        self.files
            .iter()
            .filter(|file| !self.graph.contains(file.as_str()))
            .map(String::as_str)
            .collect()
    }

    /// Number of edges, duplicates included.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

/// Summary of a completed merge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergeReport {
    /// Where the output was written
    pub output: PathBuf,
    /// Emission order that was written
    pub order: Vec<String>,
    /// Number of discovered candidate files
    pub discovered: usize,
    /// Number of dependency edges
    pub edge_count: usize,
    /// Size of the output in bytes
    pub bytes_written: u64,
}

/// Merges a directory of files into one output in dependency order.
pub struct FileMerger {
    options: MergeOptions,
    extractor: Box<dyn DependencyExtractor>,
    resolver: Box<dyn OrderResolver>,
    content: Box<dyn ContentMerger>,
    observer: Box<dyn MergeObserver>,
}

impl Default for FileMerger {
    fn default() -> Self {
        Self::with_options(MergeOptions::default())
    }
}

impl FileMerger {
    /// Creates a merger using `strategy` and default options otherwise.
    pub fn new(strategy: MergeStrategy) -> Self {
        Self::with_options(MergeOptions::default().with_strategy(strategy))
    }

    /// Creates a merger from explicit options.
    pub fn with_options(options: MergeOptions) -> Self {
        Self {
            extractor: options.strategy.extractor(),
            resolver: Box::new(TopologicalResolver::new()),
            content: options.strategy.content_merger(),
            observer: Box::new(NoopObserver),
            options,
        }
    }

    /// Replaces the progress observer.
    pub fn with_observer(mut self, observer: impl MergeObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    /// Discover, extract and resolve without touching any content.
    pub fn plan(&self, root: impl AsRef<Path>) -> MergeResult<MergePlan> {
        self.build_plan(root.as_ref(), &[])
    }

    /// Merge every candidate file under `root` into `output`.
    pub fn merge(
        &self,
        root: impl AsRef<Path>,
        output: impl AsRef<Path>,
    ) -> MergeResult<MergeReport> {
        let root = root.as_ref();
        let output = output.as_ref();

        let plan = self.build_plan(root, &[output.to_path_buf()])?;
        let bytes_written = self
            .content
            .merge(&plan.order, root, output, self.observer.as_ref())?;

        let report = MergeReport {
            output: output.to_path_buf(),
            discovered: plan.files.len(),
            edge_count: plan.edge_count(),
            order: plan.order,
            bytes_written,
        };
        self.observer.on_complete(&report);
        Ok(report)
    }

    fn build_plan(&self, root: &Path, exclude: &[PathBuf]) -> MergeResult<MergePlan> {
        let files = discover_files(root, &self.options.extension, exclude)?;
        self.observer.on_discovered(root, &files);

        let mut pairs = Vec::new();
        for file in &files {
            let dependencies = self.extractor.extract_dependencies(root, file)?;
            self.observer.on_dependencies(file, &dependencies);
            pairs.extend(
                dependencies
                    .into_iter()
                    .map(|dependency| DependencyPair::new(file.clone(), dependency)),
            );
        }

        let mut graph = DependencyGraph::from_pairs(&pairs);
        if self.options.include_standalone {
            for file in &files {
                graph.add_node(file);
            }
        }

        let order = self.resolver.resolve_graph(&graph)?;
        self.observer.on_resolved(&order);

        Ok(MergePlan {
            root: root.to_path_buf(),
            files,
            pairs,
            order,
            graph,
        })
    }
}
