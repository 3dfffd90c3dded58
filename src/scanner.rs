// SPDX-License-Identifier: PMPL-1.0-or-later
//! Directory scanner for running design analysis across a project.
//!
//! Walks directory trees, picks up exported design documents (`*.json`) and
//! analyzes each one. Documents that cannot be read or decoded are kept in
//! the result as skipped entries so callers can fail on them.

use crate::analysis::analyze_document;
use crate::config::Config;
use crate::error::Result;
use crate::report::{DocumentReport, ScanResult, SkippedDocument};
use crate::source::load_document;
use std::path::Path;
use tracing::{info, warn};
use walkdir::WalkDir;

/// File extensions to scan
const SCANNABLE_EXTENSIONS: &[&str] = &["json"];

/// Scan a directory for design documents
pub fn scan_directory(dir: &Path, config: &Config) -> Result<ScanResult> {
    let mut scan = ScanResult::default();

    info!("Scanning directory: {}", dir.display());

    for entry in WalkDir::new(dir)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            // Skip hidden and excluded directories
            let name = e.file_name().to_str().unwrap_or("");
            if e.depth() > 0 && e.file_type().is_dir() {
                return !config.exclude.iter().any(|x| x == name) && !name.starts_with('.');
            }
            true
        })
    {
        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue,
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        if !SCANNABLE_EXTENSIONS.contains(&ext) {
            continue;
        }

        match scan_file(path, config) {
            Ok(report) => scan.documents.push(report),
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                scan.skipped.push(SkippedDocument {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                });
            }
        }
    }

    info!(
        "Analyzed {} design document(s), {} unreadable",
        scan.documents.len(),
        scan.skipped.len()
    );

    Ok(scan)
}

/// Analyze a single design document
pub fn scan_file(path: &Path, config: &Config) -> Result<DocumentReport> {
    let document = load_document(path)?;
    Ok(DocumentReport {
        path: path.to_path_buf(),
        analysis: analyze_document(&document, config),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{generate_report, OutputFormat};
    use tempfile::TempDir;

    #[test]
    fn test_scan_nonexistent_dir() {
        let result = scan_directory(Path::new("/nonexistent/path"), &Config::default());
        // Should succeed with no documents (walkdir handles missing dirs gracefully)
        let scan = result.unwrap();
        assert!(scan.documents.is_empty());
        assert!(scan.skipped.is_empty());
    }

    #[test]
    fn test_scan_skips_excluded_and_invalid() {
        let dir = TempDir::new().unwrap();
        let doc = r#"{"document": {"children": [{"id": "b1", "name": "Button"}]}}"#;
        std::fs::write(dir.path().join("a.json"), doc).unwrap();
        std::fs::write(dir.path().join("broken.json"), "{").unwrap();
        std::fs::write(dir.path().join("notes.txt"), doc).unwrap();
        std::fs::create_dir_all(dir.path().join("node_modules")).unwrap();
        std::fs::write(dir.path().join("node_modules").join("b.json"), doc).unwrap();

        let scan = scan_directory(dir.path(), &Config::default()).unwrap();
        assert_eq!(scan.documents.len(), 1);
        assert!(scan.documents[0].path.ends_with("a.json"));
        assert_eq!(scan.documents[0].analysis.component_count, 1);
        assert_eq!(scan.skipped.len(), 1);
        assert!(scan.skipped[0].path.ends_with("broken.json"));
    }

    #[test]
    fn test_undecodable_document_fails_scan() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("home.json"), "{ truncated").unwrap();

        let scan = scan_directory(dir.path(), &Config::default()).unwrap();
        assert!(scan.documents.is_empty());
        assert_eq!(scan.skipped.len(), 1);
        assert!(scan.skipped[0].reason.starts_with("Decode error"));
        assert!(scan.has_failures());

        let report = generate_report(&scan, OutputFormat::Text);
        assert!(!report.contains("No design documents analyzed."));
        assert!(report.contains("home.json"));
        assert!(report.contains("RESULT: FAIL"));
    }
}
