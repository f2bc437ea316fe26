//! Export functionality for merge plans.
//!
//! This module provides exporters for printing a resolved merge plan in
//! various formats: plain text, JSON, and Markdown.

pub mod json;
pub mod markdown;
pub mod text;

use crate::merger::MergePlan;
use std::io::{self, Write};

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// Plain text - one path per line
    #[default]
    Text,
    /// JSON format - machine-readable, full data
    Json,
    /// Markdown format - documentation/reporting
    Markdown,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(ExportFormat::Text),
            "json" => Ok(ExportFormat::Json),
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            _ => Err(format!(
                "Unknown export format: '{}'. Valid formats: text, json, markdown",
                s
            )),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Text => write!(f, "text"),
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Markdown => write!(f, "markdown"),
        }
    }
}

/// One file in emission order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderEntry {
    /// 1-based position in the output
    pub position: usize,
    /// Root-relative path
    pub path: String,
    /// Direct dependencies, sorted
    pub requires: Vec<String>,
    /// Files that directly require this one, sorted
    pub required_by: Vec<String>,
    /// Whether discovery found this file on disk
    pub discovered: bool,
}

/// Data container for export operations.
#[derive(Debug, Clone)]
pub struct ExportData {
    /// Root directory, as given
    pub root: String,
    /// Files in emission order
    pub entries: Vec<OrderEntry>,
    /// Number of discovered candidate files
    pub discovered_count: usize,
    /// Number of dependency edges
    pub edge_count: usize,
    /// Discovered files that are not part of the order
    pub skipped: Vec<String>,
}

impl ExportData {
    /// Create export data from a resolved plan.
    pub fn from_plan(plan: &MergePlan) -> Self {
        let entries = plan
            .order
            .iter()
            .enumerate()
            .map(|(i, path)| OrderEntry {
                position: i + 1,
                path: path.clone(),
                requires: owned_paths(plan.dependencies_of(path)),
                required_by: owned_paths(plan.dependents_of(path)),
                discovered: plan.files.binary_search(path).is_ok(),
            })
            .collect();

        Self {
            root: plan.root.display().to_string(),
            entries,
            discovered_count: plan.files.len(),
            edge_count: plan.edge_count(),
            skipped: owned_paths(plan.skipped()),
        }
    }

    /// Entries that were referenced but never discovered.
    pub fn missing(&self) -> impl Iterator<Item = &OrderEntry> {
        self.entries.iter().filter(|e| !e.discovered)
    }
}

fn owned_paths(paths: Vec<&str>) -> Vec<String> {
    paths.into_iter().map(str::to_string).collect()
}

/// Trait for exporters.
pub trait Exporter {
    /// Export the data to the given writer.
    fn export<W: Write>(&self, data: &ExportData, writer: &mut W) -> io::Result<()>;
}

/// Export data in the specified format.
pub fn export<W: Write>(
    format: ExportFormat,
    data: &ExportData,
    writer: &mut W,
) -> io::Result<()> {
    match format {
        ExportFormat::Text => text::TextExporter.export(data, writer),
        ExportFormat::Json => json::JsonExporter.export(data, writer),
        ExportFormat::Markdown => markdown::MarkdownExporter.export(data, writer),
    }
}

/// Export data to a string.
pub fn export_to_string(format: ExportFormat, data: &ExportData) -> io::Result<String> {
    let mut buffer = Vec::new();
    export(format, data, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

#[cfg(test)]
pub(crate) fn sample_data() -> ExportData {
    ExportData {
        root: "docs".to_string(),
        entries: vec![
            OrderEntry {
                position: 1,
                path: "Folder2/File2-1.txt".to_string(),
                requires: vec![],
                required_by: vec!["Folder1/File1-1.txt".to_string()],
                discovered: true,
            },
            OrderEntry {
                position: 2,
                path: "Folder1/File1-1.txt".to_string(),
                requires: vec!["Folder2/File2-1.txt".to_string()],
                required_by: vec![],
                discovered: true,
            },
            OrderEntry {
                position: 3,
                path: "ghost.txt".to_string(),
                requires: vec![],
                required_by: vec![],
                discovered: false,
            },
        ],
        discovered_count: 3,
        edge_count: 1,
        skipped: vec!["notes.txt".to_string()],
    }
}
