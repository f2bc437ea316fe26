//! JSON export implementation.
//!
//! Exports a merge plan in JSON format for machine-readable output.

use super::{ExportData, Exporter};
use serde::Serialize;
use std::io::{self, Write};

/// JSON exporter implementation.
pub struct JsonExporter;

/// Serializable order entry for JSON output.
#[derive(Serialize)]
struct JsonEntry<'a> {
    position: usize,
    path: &'a str,
    requires: &'a [String],
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    required_by: &'a [String],
    discovered: bool,
}

/// Summary statistics for JSON output.
#[derive(Serialize)]
struct JsonSummary {
    files: usize,
    discovered: usize,
    edges: usize,
    missing: usize,
    skipped: usize,
}

/// Root JSON export structure.
#[derive(Serialize)]
struct JsonExport<'a> {
    root: &'a str,
    summary: JsonSummary,
    order: Vec<JsonEntry<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    missing: Vec<&'a str>,
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    skipped: &'a [String],
}

impl Exporter for JsonExporter {
    fn export<W: Write>(&self, data: &ExportData, writer: &mut W) -> io::Result<()> {
        let order: Vec<JsonEntry> = data
            .entries
            .iter()
            .map(|e| JsonEntry {
                position: e.position,
                path: &e.path,
                requires: &e.requires,
                required_by: &e.required_by,
                discovered: e.discovered,
            })
            .collect();

        let missing: Vec<&str> = data.missing().map(|e| e.path.as_str()).collect();

        let export = JsonExport {
            root: &data.root,
            summary: JsonSummary {
                files: data.entries.len(),
                discovered: data.discovered_count,
                edges: data.edge_count,
                missing: missing.len(),
                skipped: data.skipped.len(),
            },
            order,
            missing,
            skipped: &data.skipped,
        };

        let json = serde_json::to_string_pretty(&export)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        writeln!(writer, "{}", json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::sample_data;

    fn export_json(data: &ExportData) -> serde_json::Value {
        let mut output = Vec::new();
        JsonExporter.export(data, &mut output).unwrap();
        let json_str = String::from_utf8(output).unwrap();
        serde_json::from_str(&json_str).unwrap()
    }

    #[test]
    fn test_json_export_summary() {
        let parsed = export_json(&sample_data());

        assert_eq!(parsed["root"], "docs");
        assert_eq!(parsed["summary"]["files"], 3);
        assert_eq!(parsed["summary"]["discovered"], 3);
        assert_eq!(parsed["summary"]["edges"], 1);
        assert_eq!(parsed["summary"]["missing"], 1);
        assert_eq!(parsed["summary"]["skipped"], 1);
    }

    #[test]
    fn test_json_export_order() {
        let parsed = export_json(&sample_data());

        let order = parsed["order"].as_array().unwrap();
        assert_eq!(order.len(), 3);
        assert_eq!(order[1]["path"], "Folder1/File1-1.txt");
        assert_eq!(order[1]["position"], 2);
        assert_eq!(order[1]["requires"][0], "Folder2/File2-1.txt");
        assert_eq!(order[0]["required_by"][0], "Folder1/File1-1.txt");
        assert!(order[1].get("required_by").is_none());
        assert_eq!(order[2]["discovered"], false);
        assert_eq!(parsed["missing"][0], "ghost.txt");
        assert_eq!(parsed["skipped"][0], "notes.txt");
    }

    #[test]
    fn test_json_export_omits_empty_lists() {
        let mut data = sample_data();
        data.entries.retain(|e| e.discovered);
        data.skipped.clear();

        let parsed = export_json(&data);
        assert!(parsed.get("missing").is_none());
        assert!(parsed.get("skipped").is_none());
    }
}
