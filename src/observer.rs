//! Progress reporting for merges.
//!
//! The library never logs on its own. Callers pass a [`MergeObserver`] into
//! [`FileMerger`](crate::merger::FileMerger) and decide where progress goes.

use std::path::Path;

use tracing::{debug, info};

use crate::merger::MergeReport;

/// Receives progress callbacks during a merge. Every method defaults to a
/// no-op.
pub trait MergeObserver {
    /// Candidate files were found under `root`.
    fn on_discovered(&self, _root: &Path, _files: &[String]) {}

    /// `file` declared `dependencies`.
    fn on_dependencies(&self, _file: &str, _dependencies: &[String]) {}

    /// The emission order was resolved.
    fn on_resolved(&self, _order: &[String]) {}

    /// `file` was appended to the output.
    fn on_file_merged(&self, _file: &str, _bytes: usize) {}

    /// The merge finished and the output is written.
    fn on_complete(&self, _report: &MergeReport) {}
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl MergeObserver for NoopObserver {}

/// Forwards events to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl MergeObserver for TracingObserver {
    fn on_discovered(&self, root: &Path, files: &[String]) {
        info!(root = %root.display(), count = files.len(), "discovered candidate files");
    }

    fn on_dependencies(&self, file: &str, dependencies: &[String]) {
        if !dependencies.is_empty() {
            debug!(file, requires = ?dependencies, "extracted dependencies");
        }
    }

    fn on_resolved(&self, order: &[String]) {
        info!(count = order.len(), "resolved emission order");
        debug!(order = ?order, "emission order");
    }

    fn on_file_merged(&self, file: &str, bytes: usize) {
        debug!(file, bytes, "merged file");
    }

    fn on_complete(&self, report: &MergeReport) {
        info!(
            output = %report.output.display(),
            files = report.order.len(),
            edges = report.edge_count,
            bytes = report.bytes_written,
            "merge complete"
        );
    }
}
