//! Plain text export implementation.
//!
//! Prints one path per line in emission order, suitable for piping.

use super::{ExportData, Exporter};
use std::io::{self, Write};

/// Text exporter implementation.
pub struct TextExporter;

impl Exporter for TextExporter {
    fn export<W: Write>(&self, data: &ExportData, writer: &mut W) -> io::Result<()> {
        for entry in &data.entries {
            if entry.discovered {
                writeln!(writer, "{}", entry.path)?;
            } else {
                writeln!(writer, "{} (missing)", entry.path)?;
            }
        }
        Ok(())
    }
}
