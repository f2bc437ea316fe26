//! Dependency extraction for merge candidates.
//!
//! This module reads a file and returns the references it declares through
//! `require '<ref>'` directives.
//!
//! # Features
//!
//! - Match directives anywhere in a line, in order of position
//! - Ignore malformed candidates silently
//! - Two interchangeable strategies: whole-file and line-streaming
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use filemerge::extract::{DependencyExtractor, InMemoryExtractor};
//!
//! let refs = InMemoryExtractor.extract_dependencies(Path::new("./docs"), "Folder1/File1-1.txt")?;
//! for reference in refs {
//!     println!("requires {reference}");
//! }
//! ```

pub mod directive;

pub use directive::{scan_reader, scan_str, DIRECTIVE_PATTERN};

use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur during dependency extraction.
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("Failed to read file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for extraction operations.
pub type ExtractResult<T> = Result<T, ExtractionError>;

/// Extracts declared dependency references from one file.
pub trait DependencyExtractor {
    /// Read `file` (relative to `root`) and return its references in order.
    fn extract_dependencies(&self, root: &Path, file: &str) -> ExtractResult<Vec<String>>;
}

/// Reads the whole file into memory before scanning.
#[derive(Debug, Clone, Copy, Default)]
pub struct InMemoryExtractor;

impl DependencyExtractor for InMemoryExtractor {
    fn extract_dependencies(&self, root: &Path, file: &str) -> ExtractResult<Vec<String>> {
        let path = root.join(file);
        let content =
            fs::read_to_string(&path).map_err(|source| ExtractionError::Read { path, source })?;
        Ok(scan_str(&content))
    }
}

/// Scans the file line by line without holding it in memory.
#[derive(Debug, Clone, Copy, Default)]
pub struct StreamingExtractor;

impl DependencyExtractor for StreamingExtractor {
    fn extract_dependencies(&self, root: &Path, file: &str) -> ExtractResult<Vec<String>> {
        let path = root.join(file);
        File::open(&path)
            .map(BufReader::new)
            .and_then(scan_reader)
            .map_err(|source| ExtractionError::Read { path, source })
    }
}
