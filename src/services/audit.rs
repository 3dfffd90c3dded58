// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Rule-based audit of a component tree.
//!
//! Every component is checked against every rule in [`RULES`], in table
//! order. Each check yields exactly one entry, passed or failed, so a clean
//! tree of N components produces `N * RULES.len()` entries.

use crate::component::{Semantic, SemanticView, ROLE_BUTTON};
use crate::services::PreOrder;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Rule id used for components that could not be audited at all
pub const AUDIT_ERROR: &str = "AUDIT_ERROR";

/// A pure check over one component
#[derive(Debug, Clone, Copy)]
pub struct AuditRule {
    pub id: &'static str,
    pub description: &'static str,
    /// Returns the issue message, or `None` when the component passes
    pub check: fn(&SemanticView<'_>) -> Option<String>,
}

/// Audit rules, evaluated in this order
pub const RULES: &[AuditRule] = &[
    AuditRule {
        id: "LABEL_EMPTY",
        description: "Every component has a non-blank label",
        check: check_label_empty,
    },
    AuditRule {
        id: "ROLE_PRESENT",
        description: "Every component exposes a semantic role",
        check: check_role_present,
    },
    AuditRule {
        id: "FOCUSABLE_BUTTON",
        description: "Buttons can receive keyboard focus",
        check: check_focusable_button,
    },
];

fn check_label_empty(view: &SemanticView<'_>) -> Option<String> {
    view.label.trim().is_empty().then(|| {
        format!(
            "Component \"{}\" has an empty or whitespace-only label.",
            view.id
        )
    })
}

fn check_role_present(view: &SemanticView<'_>) -> Option<String> {
    view.role
        .trim()
        .is_empty()
        .then(|| format!("Component \"{}\" has no semantic role.", view.label))
}

fn check_focusable_button(view: &SemanticView<'_>) -> Option<String> {
    (view.role == ROLE_BUTTON && !view.is_focusable())
        .then(|| format!("Button \"{}\" is not keyboard focusable.", view.label))
}

/// Result of one rule against one component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum AuditOutcome {
    Passed,
    Failed { message: String },
}

/// Structured audit record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub rule_id: String,
    /// `None` when the component could not be inspected
    pub component_id: Option<String>,
    pub label: String,
    #[serde(flatten)]
    pub outcome: AuditOutcome,
}

impl AuditEntry {
    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, AuditOutcome::Failed { .. })
    }

    /// `[RULE] "label" passed.` or `[RULE] message`
    pub fn render(&self) -> String {
        match &self.outcome {
            AuditOutcome::Passed => format!("[{}] \"{}\" passed.", self.rule_id, self.label),
            AuditOutcome::Failed { message } => format!("[{}] {}", self.rule_id, message),
        }
    }
}

/// Passed and failed audit lines
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditReport {
    pub passed: Vec<String>,
    pub failed: Vec<String>,
}

impl AuditReport {
    pub fn from_entries(entries: &[AuditEntry]) -> Self {
        let mut report = Self::default();
        for entry in entries {
            if entry.is_failure() {
                report.failed.push(entry.render());
            } else {
                report.passed.push(entry.render());
            }
        }
        report
    }

    pub fn total(&self) -> usize {
        self.passed.len() + self.failed.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Evaluate every rule against every component, in pre-order
pub fn audit_entries<C: Semantic>(roots: &[C]) -> Vec<AuditEntry> {
    let mut entries = Vec::new();

    for node in PreOrder::new(roots) {
        let view = match node.view() {
            Ok(view) => view,
            Err(e) => {
                warn!("Could not audit \"{}\": {}", node.label(), e);
                entries.push(AuditEntry {
                    rule_id: AUDIT_ERROR.to_string(),
                    component_id: None,
                    label: node.label().to_string(),
                    outcome: AuditOutcome::Failed {
                        message: format!("Failed to audit \"{}\": {}", node.label(), e),
                    },
                });
                continue;
            }
        };

        for rule in RULES {
            let outcome = match (rule.check)(&view) {
                Some(message) => {
                    debug!("{} failed for {}", rule.id, view.id);
                    AuditOutcome::Failed { message }
                }
                None => AuditOutcome::Passed,
            };
            entries.push(AuditEntry {
                rule_id: rule.id.to_string(),
                component_id: Some(view.id.to_string()),
                label: view.label.to_string(),
                outcome,
            });
        }
    }

    entries
}

/// Audit a component tree into passed/failed lines
pub fn run_audit<C: Semantic>(roots: &[C]) -> AuditReport {
    AuditReport::from_entries(&audit_entries(roots))
}
