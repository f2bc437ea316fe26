//! Content concatenation in emission order.
//!
//! Each file is trimmed of surrounding whitespace and the results are joined
//! by a single blank line. Both strategies produce byte-identical output.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::observer::MergeObserver;

/// Placed between consecutive files.
pub const SEPARATOR: &str = "\n\n";

/// Errors that can occur while merging content.
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Failed to read file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write output file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for content operations.
pub type ContentResult<T> = Result<T, ContentError>;

/// Writes the files named in `order` into `output`.
pub trait ContentMerger {
    /// Merge and return the number of bytes written.
    fn merge(
        &self,
        order: &[String],
        root: &Path,
        output: &Path,
        observer: &dyn MergeObserver,
    ) -> ContentResult<u64>;
}

fn read_trimmed(root: &Path, file: &str) -> ContentResult<String> {
    let path = root.join(file);
    let content =
        fs::read_to_string(&path).map_err(|source| ContentError::Read { path, source })?;
    Ok(content.trim().to_string())
}

fn write_error(output: &Path, source: std::io::Error) -> ContentError {
    ContentError::Write {
        path: output.to_path_buf(),
        source,
    }
}

/// Reads every file first, then writes the output once.
#[derive(Debug, Clone, Copy, Default)]
pub struct BufferedMerger;

impl ContentMerger for BufferedMerger {
    fn merge(
        &self,
        order: &[String],
        root: &Path,
        output: &Path,
        observer: &dyn MergeObserver,
    ) -> ContentResult<u64> {
        let mut parts = Vec::with_capacity(order.len());
        for file in order {
            let content = read_trimmed(root, file)?;
            observer.on_file_merged(file, content.len());
            parts.push(content);
        }

        let merged = parts.join(SEPARATOR);
        fs::write(output, &merged).map_err(|e| write_error(output, e))?;
        Ok(merged.len() as u64)
    }
}

/// Appends each file to a buffered writer as soon as it is read.
#[derive(Debug, Clone, Copy, Default)]
pub struct StreamingMerger;

impl ContentMerger for StreamingMerger {
    fn merge(
        &self,
        order: &[String],
        root: &Path,
        output: &Path,
        observer: &dyn MergeObserver,
    ) -> ContentResult<u64> {
        let file = File::create(output).map_err(|e| write_error(output, e))?;
        let mut writer = BufWriter::new(file);
        let mut written = 0u64;

        for (i, name) in order.iter().enumerate() {
            let content = read_trimmed(root, name)?;
            if i > 0 {
                writer
                    .write_all(SEPARATOR.as_bytes())
                    .map_err(|e| write_error(output, e))?;
                written += SEPARATOR.len() as u64;
            }
            writer
                .write_all(content.as_bytes())
                .map_err(|e| write_error(output, e))?;
            written += content.len() as u64;
            observer.on_file_merged(name, content.len());
        }

        writer.flush().map_err(|e| write_error(output, e))?;
        Ok(written)
    }
}
