//! Markdown export implementation.
//!
//! Exports a merge plan in Markdown format for documentation and reporting.

use super::{ExportData, Exporter};
use std::io::{self, Write};

/// Markdown exporter implementation.
pub struct MarkdownExporter;

impl Exporter for MarkdownExporter {
    fn export<W: Write>(&self, data: &ExportData, writer: &mut W) -> io::Result<()> {
        // Title
        writeln!(writer, "# Merge Plan")?;
        writeln!(writer)?;
        writeln!(writer, "**Root:** `{}`", data.root)?;
        writeln!(writer)?;

        // Summary section
        writeln!(writer, "## Summary")?;
        writeln!(writer)?;
        writeln!(writer, "| Metric | Count |")?;
        writeln!(writer, "|--------|-------|")?;
        writeln!(writer, "| Files in Order | {} |", data.entries.len())?;
        writeln!(writer, "| Discovered Files | {} |", data.discovered_count)?;
        writeln!(writer, "| Dependency Edges | {} |", data.edge_count)?;
        writeln!(writer, "| Missing Files | {} |", data.missing().count())?;
        writeln!(writer, "| Skipped Files | {} |", data.skipped.len())?;
        writeln!(writer)?;

        // Emission order
        writeln!(writer, "## Emission Order")?;
        writeln!(writer)?;
        writeln!(writer, "| # | File | Requires |")?;
        writeln!(writer, "|---|------|----------|")?;
        for entry in &data.entries {
            let requires = if entry.requires.is_empty() {
                "-".to_string()
            } else {
                entry
                    .requires
                    .iter()
                    .map(|r| format!("`{}`", escape_cell(r)))
                    .collect::<Vec<_>>()
                    .join(", ")
            };
            writeln!(
                writer,
                "| {} | `{}` | {} |",
                entry.position,
                escape_cell(&entry.path),
                requires
            )?;
        }

        // Missing files
        let missing: Vec<_> = data.missing().collect();
        if !missing.is_empty() {
            writeln!(writer)?;
            writeln!(writer, "## Missing Files")?;
            writeln!(writer)?;
            writeln!(
                writer,
                "These files are required but were not found; merging will fail."
            )?;
            writeln!(writer)?;
            for entry in missing {
                writeln!(writer, "- `{}`", entry.path)?;
            }
        }

        // Skipped files
        if !data.skipped.is_empty() {
            writeln!(writer)?;
            writeln!(writer, "## Skipped Files")?;
            writeln!(writer)?;
            writeln!(
                writer,
                "No directive touches these files, so they are left out of the output."
            )?;
            writeln!(writer)?;
            for path in &data.skipped {
                writeln!(writer, "- `{}`", path)?;
            }
        }

        Ok(())
    }
}

/// Escape characters that would break a Markdown table cell.
fn escape_cell(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ")
}
