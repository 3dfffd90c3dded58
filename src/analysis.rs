// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! End-to-end pipeline: raw nodes, build, then the three analysis passes.

use crate::builder::{BuildResult, BuilderConfig, ParseError, TreeBuilder};
use crate::component::{AuditObject, Component};
use crate::config::Config;
use crate::error::Result;
use crate::services::{audit, build_tab_order, generate_reading_order, AuditEntry, AuditReport, TabStop};
use crate::source::extract_nodes;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

/// Everything handed to the presentation layer for one document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    /// Snapshot of every root component
    pub components: Vec<AuditObject>,
    pub component_count: usize,
    pub parse_errors: Vec<ParseError>,
    pub reading_order: Vec<String>,
    pub tab_order: Vec<TabStop>,
    pub audit: AuditReport,
    pub audit_entries: Vec<AuditEntry>,
}

impl Analysis {
    /// Run all passes over a finished build
    pub fn from_build(result: &BuildResult) -> Self {
        let roots: &[Component] = &result.roots;
        let audit_entries = audit::audit_entries(roots);

        let analysis = Self {
            components: roots.iter().map(Component::to_audit_object).collect(),
            component_count: result.component_count(),
            parse_errors: result.errors.clone(),
            reading_order: generate_reading_order(roots),
            tab_order: build_tab_order(roots),
            audit: AuditReport::from_entries(&audit_entries),
            audit_entries,
        };

        info!(
            "Analyzed {} component(s): {} tab stop(s), {} audit failure(s)",
            analysis.component_count,
            analysis.tab_order.len(),
            analysis.audit.failed.len()
        );
        analysis
    }

    /// Whether any audit rule failed
    pub fn has_failures(&self) -> bool {
        !self.audit.failed.is_empty()
    }
}

/// Analyze a JSON array of raw nodes. Non-arrays are rejected.
pub fn analyze_nodes(nodes: &Value, config: &BuilderConfig) -> Result<Analysis> {
    let mut builder = TreeBuilder::with_config(*config);
    let result = builder.build(nodes)?;
    Ok(Analysis::from_build(result))
}

/// Analyze a full design document (`document.children` holds the nodes)
pub fn analyze_document(document: &Value, config: &Config) -> Analysis {
    let nodes = extract_nodes(document);
    let mut builder = TreeBuilder::with_config(config.builder);
    Analysis::from_build(builder.build_nodes(&nodes))
}
