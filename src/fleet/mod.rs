// SPDX-License-Identifier: PMPL-1.0-or-later
//! Fleet integration types for gitbot-fleet shared-context compatibility.
//!
//! Audit failures, parse errors and unreadable documents are re-expressed as
//! fleet findings so the fleet coordinator can consume designbot output
//! alongside the other bots.

use crate::analysis::Analysis;
use crate::builder::ParseError;
use crate::report::{ScanResult, SkippedDocument};
use crate::services::{AuditEntry, AuditOutcome};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Rule id for findings produced from parse errors
pub const PARSE_ERROR_RULE: &str = "PARSE_ERROR";

/// Rule id for design documents that could not be read or decoded
pub const UNREADABLE_DOCUMENT_RULE: &str = "UNREADABLE_DOCUMENT";

/// Severity levels for findings (mirrors gitbot-shared-context::Severity)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Critical issue - blocks release
    Error,
    /// Should be addressed
    Warning,
}

impl Severity {
    /// Whether this severity blocks releases
    pub fn blocks_release(&self) -> bool {
        matches!(self, Severity::Error)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Warning => write!(f, "WARNING"),
        }
    }
}

/// A finding about one design component or raw node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    /// Unique identifier
    pub id: Uuid,
    /// Source bot identifier
    pub source: String,
    /// Rule identifier (e.g., "LABEL_EMPTY")
    pub rule_id: String,
    /// Severity level
    pub severity: Severity,
    /// Detailed message
    pub message: String,
    /// Category (e.g., "accessibility/design")
    pub category: String,
    /// Design document the finding came from
    pub file: Option<PathBuf>,
    /// Component or raw node id
    pub node_id: Option<String>,
    /// When this finding was created
    pub created_at: DateTime<Utc>,
}

impl Finding {
    /// Create a new finding
    pub fn new(rule_id: &str, severity: Severity, message: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            source: "designbot".to_string(),
            rule_id: rule_id.to_string(),
            severity,
            message: message.to_string(),
            category: String::new(),
            file: None,
            node_id: None,
            created_at: Utc::now(),
        }
    }

    /// Set the category
    pub fn with_category(mut self, category: &str) -> Self {
        self.category = category.to_string();
        self
    }

    /// Set file location
    pub fn with_file(mut self, file: PathBuf) -> Self {
        self.file = Some(file);
        self
    }

    /// Set the node the finding is about
    pub fn with_node(mut self, node_id: &str) -> Self {
        self.node_id = Some(node_id.to_string());
        self
    }

    /// Get location string for display
    pub fn location_string(&self) -> String {
        match (&self.file, &self.node_id) {
            (Some(f), Some(n)) => format!("{}#{}", f.display(), n),
            (Some(f), None) => f.display().to_string(),
            (None, Some(n)) => format!("#{}", n),
            _ => "<unknown>".to_string(),
        }
    }

    fn from_audit_entry(entry: &AuditEntry) -> Option<Self> {
        let AuditOutcome::Failed { message } = &entry.outcome else {
            return None;
        };
        let mut finding = Finding::new(&entry.rule_id, Severity::Error, message)
            .with_category("accessibility/design-audit");
        if let Some(id) = &entry.component_id {
            finding = finding.with_node(id);
        }
        Some(finding)
    }

    fn from_parse_error(error: &ParseError) -> Self {
        Finding::new(PARSE_ERROR_RULE, Severity::Warning, &error.message)
            .with_category("accessibility/design-parse")
            .with_node(&error.node_id)
    }

    fn from_skipped(skipped: &SkippedDocument) -> Self {
        Finding::new(UNREADABLE_DOCUMENT_RULE, Severity::Error, &skipped.reason)
            .with_category("accessibility/design-source")
            .with_file(skipped.path.clone())
    }
}

/// A collection of findings with aggregation methods
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FindingSet {
    /// All findings
    pub findings: Vec<Finding>,
}

impl FindingSet {
    /// Create empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Findings for one analyzed document: failed audit entries become
    /// errors, parse errors become warnings.
    pub fn from_analysis(analysis: &Analysis, file: Option<&Path>) -> Self {
        let mut set = Self::new();
        let findings = analysis
            .audit_entries
            .iter()
            .filter_map(Finding::from_audit_entry)
            .chain(analysis.parse_errors.iter().map(Finding::from_parse_error));

        for mut finding in findings {
            if let Some(path) = file {
                finding = finding.with_file(path.to_path_buf());
            }
            set.add(finding);
        }
        set
    }

    /// Findings for a whole scan; every unreadable document is an error
    pub fn from_scan(scan: &ScanResult) -> Self {
        let mut set = Self::new();
        for document in &scan.documents {
            set.extend(Self::from_analysis(&document.analysis, Some(&document.path)).findings);
        }
        set.extend(scan.skipped.iter().map(Finding::from_skipped));
        set
    }

    /// Add a finding
    pub fn add(&mut self, finding: Finding) {
        self.findings.push(finding);
    }

    /// Extend with findings from an iterator
    pub fn extend(&mut self, findings: impl IntoIterator<Item = Finding>) {
        self.findings.extend(findings);
    }

    /// Get findings by severity
    pub fn by_severity(&self, severity: Severity) -> Vec<&Finding> {
        self.findings.iter().filter(|f| f.severity == severity).collect()
    }

    /// Get all errors
    pub fn errors(&self) -> Vec<&Finding> {
        self.by_severity(Severity::Error)
    }

    /// Get all warnings
    pub fn warnings(&self) -> Vec<&Finding> {
        self.by_severity(Severity::Warning)
    }

    /// Check if release should be blocked
    pub fn blocks_release(&self) -> bool {
        self.findings.iter().any(|f| f.severity.blocks_release())
    }

    /// Total count
    pub fn len(&self) -> usize {
        self.findings.len()
    }

    /// Is empty
    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze_nodes;
    use crate::builder::BuilderConfig;
    use serde_json::json;

    #[test]
    fn test_from_analysis() {
        let analysis = analyze_nodes(
            &json!([{ "id": "b1", "name": "Button" }, { "id": "x1", "name": "Image" }]),
            &BuilderConfig::default(),
        )
        .unwrap();

        let set = FindingSet::from_analysis(&analysis, Some(Path::new("home.json")));
        assert_eq!(set.len(), 1);
        assert_eq!(set.warnings().len(), 1);
        assert!(!set.blocks_release());
        assert_eq!(set.findings[0].location_string(), "home.json#x1");
    }

    #[test]
    fn test_audit_failure_blocks_release() {
        let entry = AuditEntry {
            rule_id: "LABEL_EMPTY".to_string(),
            component_id: Some("b1".to_string()),
            label: " ".to_string(),
            outcome: AuditOutcome::Failed {
                message: "blank".to_string(),
            },
        };
        let analysis = Analysis {
            audit_entries: vec![entry],
            ..Analysis::default()
        };

        let set = FindingSet::from_analysis(&analysis, None);
        assert_eq!(set.errors().len(), 1);
        assert!(set.blocks_release());
        assert_eq!(set.findings[0].location_string(), "#b1");
    }

    #[test]
    fn test_unreadable_document_blocks_release() {
        let scan = ScanResult {
            documents: Vec::new(),
            skipped: vec![SkippedDocument {
                path: PathBuf::from("design/home.json"),
                reason: "Decode error: EOF while parsing an object".to_string(),
            }],
        };

        let set = FindingSet::from_scan(&scan);
        assert_eq!(set.errors().len(), 1);
        assert!(set.blocks_release());
        assert_eq!(set.findings[0].rule_id, UNREADABLE_DOCUMENT_RULE);
        assert_eq!(set.findings[0].location_string(), "design/home.json");
    }

    #[test]
    fn test_passed_entries_are_not_findings() {
        let analysis = analyze_nodes(&json!([{ "id": "b1", "name": "Button" }]), &BuilderConfig::default())
            .unwrap();
        assert!(FindingSet::from_analysis(&analysis, None).is_empty());
    }
}
