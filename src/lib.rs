//! filemerge - merge text files in `require` dependency order
//!
//! This crate scans a directory for text files, reads the
//! `require '<path>'` directives they declare, resolves a deterministic
//! order in which every file follows its dependencies, and concatenates the
//! files into a single output.

pub mod config;
pub mod content;
pub mod discovery;
pub mod export;
pub mod extract;
pub mod graph;
pub mod merger;
pub mod observer;
pub mod resolve;

pub use config::{MergeOptions, MergeStrategy};
pub use merger::{FileMerger, MergeError, MergePlan, MergeReport, MergeResult};
pub use observer::{MergeObserver, NoopObserver, TracingObserver};
