// SPDX-License-Identifier: PMPL-1.0-or-later
//! Report generation for design analyses.
//!
//! Supports multiple output formats:
//! - Text: reading order, tab order, parse errors and audit results per document
//! - JSON: the full analysis values for programmatic consumption
//! - SARIF: audit failures, parse errors and unreadable documents for IDE/CI
//!   integration

use crate::analysis::Analysis;
use crate::fleet::{PARSE_ERROR_RULE, UNREADABLE_DOCUMENT_RULE};
use crate::services::AuditOutcome;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// Structured JSON
    Json,
    /// SARIF for IDE/CI integration
    Sarif,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Sarif => write!(f, "sarif"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "sarif" => Ok(OutputFormat::Sarif),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

/// The analysis of one design document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentReport {
    pub path: PathBuf,
    pub analysis: Analysis,
}

/// A design document that could not be loaded or decoded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedDocument {
    pub path: PathBuf,
    pub reason: String,
}

/// Analyzed documents plus the ones that could not be read
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    pub documents: Vec<DocumentReport>,
    pub skipped: Vec<SkippedDocument>,
}

impl ScanResult {
    /// Whether any audit rule failed or any document was unreadable
    pub fn has_failures(&self) -> bool {
        !self.skipped.is_empty() || self.documents.iter().any(|d| d.analysis.has_failures())
    }
}

impl From<DocumentReport> for ScanResult {
    fn from(document: DocumentReport) -> Self {
        Self {
            documents: vec![document],
            skipped: Vec::new(),
        }
    }
}

/// Generate a report for a scan
pub fn generate_report(scan: &ScanResult, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => generate_text_report(scan),
        OutputFormat::Json => generate_json_report(scan),
        OutputFormat::Sarif => generate_sarif_report(scan),
    }
}

/// Generate human-readable text report
fn generate_text_report(scan: &ScanResult) -> String {
    let mut output = String::new();

    output.push_str("=== Designbot Semantic Analysis Report ===\n\n");

    if scan.documents.is_empty() && scan.skipped.is_empty() {
        output.push_str("No design documents analyzed.\n");
        return output;
    }

    let mut total_failures = 0;

    for doc in &scan.documents {
        let analysis = &doc.analysis;
        total_failures += analysis.audit.failed.len();

        output.push_str(&format!("--- {} ---\n", doc.path.display()));
        output.push_str(&format!(
            "{} component(s), {} parse error(s)\n\n",
            analysis.component_count,
            analysis.parse_errors.len()
        ));

        output.push_str("Reading order:\n");
        for (idx, line) in analysis.reading_order.iter().enumerate() {
            output.push_str(&format!("  {}. {}\n", idx + 1, line));
        }

        output.push_str("Tab order:\n");
        for (idx, stop) in analysis.tab_order.iter().enumerate() {
            output.push_str(&format!("  {}. {} ({})\n", idx + 1, stop.label, stop.hint));
        }

        if !analysis.parse_errors.is_empty() {
            output.push_str("Parse errors:\n");
            for error in &analysis.parse_errors {
                output.push_str(&format!("  [{}] {}\n", error.node_id, error.message));
            }
        }

        output.push_str(&format!(
            "Audit: {} passed, {} failed\n",
            analysis.audit.passed.len(),
            analysis.audit.failed.len()
        ));
        for line in &analysis.audit.failed {
            output.push_str(&format!("  {}\n", line));
        }

        output.push('\n');
    }

    if !scan.skipped.is_empty() {
        output.push_str(&format!("--- Unreadable documents ({}) ---\n", scan.skipped.len()));
        for skipped in &scan.skipped {
            output.push_str(&format!("  {}: {}\n", skipped.path.display(), skipped.reason));
        }
        output.push('\n');
    }

    if total_failures > 0 || !scan.skipped.is_empty() {
        output.push_str(&format!(
            "RESULT: FAIL ({} audit failure(s), {} unreadable document(s))\n",
            total_failures,
            scan.skipped.len()
        ));
    } else {
        output.push_str("RESULT: PASS\n");
    }

    output
}

/// Generate JSON report
fn generate_json_report(scan: &ScanResult) -> String {
    serde_json::to_string_pretty(scan).unwrap_or_else(|e| {
        format!("{{\"error\": \"Failed to serialize analysis: {}\"}}", e)
    })
}

/// SARIF report structure (simplified)
#[derive(Debug, Serialize)]
struct SarifReport {
    #[serde(rename = "$schema")]
    schema: String,
    version: String,
    runs: Vec<SarifRun>,
}

#[derive(Debug, Serialize)]
struct SarifRun {
    tool: SarifTool,
    results: Vec<SarifResult>,
}

#[derive(Debug, Serialize)]
struct SarifTool {
    driver: SarifDriver,
}

#[derive(Debug, Serialize)]
struct SarifDriver {
    name: String,
    version: String,
}

#[derive(Debug, Serialize)]
struct SarifResult {
    #[serde(rename = "ruleId")]
    rule_id: String,
    level: String,
    message: SarifMessage,
    locations: Vec<SarifLocation>,
}

#[derive(Debug, Serialize)]
struct SarifMessage {
    text: String,
}

#[derive(Debug, Serialize)]
struct SarifLocation {
    #[serde(rename = "physicalLocation")]
    physical_location: SarifPhysicalLocation,
    #[serde(rename = "logicalLocations", skip_serializing_if = "Vec::is_empty")]
    logical_locations: Vec<SarifLogicalLocation>,
}

#[derive(Debug, Serialize)]
struct SarifPhysicalLocation {
    #[serde(rename = "artifactLocation")]
    artifact_location: SarifArtifactLocation,
}

#[derive(Debug, Serialize)]
struct SarifArtifactLocation {
    uri: String,
}

#[derive(Debug, Serialize)]
struct SarifLogicalLocation {
    name: String,
}

fn sarif_location(path: &Path, node_id: Option<&str>) -> SarifLocation {
    SarifLocation {
        physical_location: SarifPhysicalLocation {
            artifact_location: SarifArtifactLocation {
                uri: path.display().to_string(),
            },
        },
        logical_locations: node_id
            .map(|name| SarifLogicalLocation { name: name.to_string() })
            .into_iter()
            .collect(),
    }
}

/// Generate SARIF report
fn generate_sarif_report(scan: &ScanResult) -> String {
    let mut results = Vec::new();

    for doc in &scan.documents {
        for entry in &doc.analysis.audit_entries {
            if let AuditOutcome::Failed { message } = &entry.outcome {
                results.push(SarifResult {
                    rule_id: entry.rule_id.clone(),
                    level: "error".to_string(),
                    message: SarifMessage { text: message.clone() },
                    locations: vec![sarif_location(&doc.path, entry.component_id.as_deref())],
                });
            }
        }

        for error in &doc.analysis.parse_errors {
            results.push(SarifResult {
                rule_id: PARSE_ERROR_RULE.to_string(),
                level: "warning".to_string(),
                message: SarifMessage { text: error.message.clone() },
                locations: vec![sarif_location(&doc.path, Some(&error.node_id))],
            });
        }
    }

    for skipped in &scan.skipped {
        results.push(SarifResult {
            rule_id: UNREADABLE_DOCUMENT_RULE.to_string(),
            level: "error".to_string(),
            message: SarifMessage { text: skipped.reason.clone() },
            locations: vec![sarif_location(&skipped.path, None)],
        });
    }

    let report = SarifReport {
        schema: "https://json.schemastore.org/sarif-2.1.0.json".to_string(),
        version: "2.1.0".to_string(),
        runs: vec![SarifRun {
            tool: SarifTool {
                driver: SarifDriver {
                    name: "designbot".to_string(),
                    version: env!("CARGO_PKG_VERSION").to_string(),
                },
            },
            results,
        }],
    };

    serde_json::to_string_pretty(&report).unwrap_or_else(|e| {
        format!("{{\"error\": \"Failed to serialize SARIF report: {}\"}}", e)
    })
}
