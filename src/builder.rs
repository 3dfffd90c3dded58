// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Tree builder: raw design nodes to typed components.
//!
//! Raw nodes come straight out of a design document and are untrusted. Each
//! node is classified by a case-insensitive substring match of its `name`
//! against [`VOCABULARY`], constructed as the matching [`Component`] variant,
//! and its `children` are built the same way. Any node that cannot be turned
//! into a component is recorded as a [`ParseError`] and omitted together with
//! its subtree; siblings and ancestors are unaffected.
//!
//! The only failure that leaves [`TreeBuilder::build`] is an input that is
//! not an array.

use crate::component::{Component, DEFAULT_INPUT_TYPE};
use crate::error::{ComponentError, DesignbotError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

/// Node id recorded when a failing node has no usable id
pub const UNKNOWN_NODE_ID: &str = "unknown";

/// Default bound on nesting depth
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Component variant selected by classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Button,
    InputField,
    NavigationRegion,
}

impl Variant {
    fn construct(self, id: &str, label: &str) -> std::result::Result<Component, ComponentError> {
        match self {
            Variant::Button => Component::button(id, label),
            Variant::InputField => Component::input_field_with_type(id, label, DEFAULT_INPUT_TYPE),
            Variant::NavigationRegion => Component::navigation_region(id, label),
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Variant::Button => write!(f, "Button"),
            Variant::InputField => write!(f, "InputField"),
            Variant::NavigationRegion => write!(f, "NavigationRegion"),
        }
    }
}

/// Classification vocabulary, evaluated in order; the first substring found
/// in the lowercased name wins. A name such as "Input Nav" is an input field
/// because `input` precedes `nav` here, not because of any semantic priority.
pub const VOCABULARY: &[(&str, Variant)] = &[
    ("button", Variant::Button),
    ("input", Variant::InputField),
    ("textbox", Variant::InputField),
    ("nav", Variant::NavigationRegion),
    ("navigation", Variant::NavigationRegion),
];

/// Resolve a node name to a variant
pub fn classify(name: &str) -> Option<Variant> {
    let lower = name.to_lowercase();
    VOCABULARY
        .iter()
        .find(|(needle, _)| lower.contains(needle))
        .map(|(_, variant)| *variant)
}

/// A recoverable failure tied to one input node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseError {
    pub node_id: String,
    pub message: String,
}

impl ParseError {
    pub fn new(node_id: &str, message: impl Into<String>) -> Self {
        Self {
            node_id: node_id.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.node_id, self.message)
    }
}

/// Builder settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuilderConfig {
    /// Deepest nesting level accepted; top-level nodes are level 0
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

/// Roots and parse errors of one build
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildResult {
    pub roots: Vec<Component>,
    pub errors: Vec<ParseError>,
}

impl BuildResult {
    /// Total number of components across all roots
    pub fn component_count(&self) -> usize {
        self.roots.iter().map(Component::subtree_len).sum()
    }
}

/// Holds the result of the most recent build.
///
/// Each call to [`build`](Self::build) computes a fresh [`BuildResult`] and
/// swaps it in only once it is complete.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    config: BuilderConfig,
    result: BuildResult,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: BuilderConfig) -> Self {
        Self {
            config,
            result: BuildResult::default(),
        }
    }

    /// Build from a JSON value that must be an array of raw nodes.
    ///
    /// A non-array input fails with [`DesignbotError::InvalidInput`] and
    /// leaves the previous result in place.
    pub fn build(&mut self, input: &Value) -> Result<&BuildResult> {
        let nodes = input.as_array().ok_or_else(|| {
            DesignbotError::InvalidInput(format!(
                "expected an array of nodes, found {}",
                json_type(input)
            ))
        })?;
        Ok(self.build_nodes(nodes))
    }

    /// Build from an already-validated node sequence
    pub fn build_nodes(&mut self, nodes: &[Value]) -> &BuildResult {
        self.result = build_nodes(nodes, &self.config);
        &self.result
    }

    pub fn roots(&self) -> &[Component] {
        &self.result.roots
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.result.errors
    }

    pub fn result(&self) -> &BuildResult {
        &self.result
    }

    pub fn into_result(self) -> BuildResult {
        self.result
    }
}

/// One-shot build from a JSON array of raw nodes
pub fn build_tree(input: &Value, config: &BuilderConfig) -> Result<BuildResult> {
    let mut builder = TreeBuilder::with_config(*config);
    builder.build(input)?;
    Ok(builder.into_result())
}

fn build_nodes(nodes: &[Value], config: &BuilderConfig) -> BuildResult {
    let mut pass = BuildPass {
        config,
        errors: Vec::new(),
    };
    let roots: Vec<Component> = nodes
        .iter()
        .filter_map(|node| pass.build_node(node, 0))
        .collect();

    info!(
        "Built {} root component(s) from {} node(s), {} parse error(s)",
        roots.len(),
        nodes.len(),
        pass.errors.len()
    );

    BuildResult {
        roots,
        errors: pass.errors,
    }
}

/// Error accumulator for a single build
struct BuildPass<'a> {
    config: &'a BuilderConfig,
    errors: Vec<ParseError>,
}

impl BuildPass<'_> {
    fn build_node(&mut self, node: &Value, depth: usize) -> Option<Component> {
        let Some(fields) = node.as_object() else {
            self.record(
                UNKNOWN_NODE_ID,
                format!("Invalid node: expected an object, found {}", json_type(node)),
            );
            return None;
        };

        let node_id = match fields.get("id") {
            Some(Value::String(id)) => id.as_str(),
            Some(Value::Null) | None => "",
            Some(other) => {
                let shown = match other {
                    Value::Number(n) => n.to_string(),
                    Value::Bool(b) => b.to_string(),
                    _ => UNKNOWN_NODE_ID.to_string(),
                };
                self.record(
                    &shown,
                    format!("Invalid id: expected a string, found {}", json_type(other)),
                );
                return None;
            }
        };
        let error_id = if node_id.is_empty() { UNKNOWN_NODE_ID } else { node_id };

        if depth > self.config.max_depth {
            self.record(
                error_id,
                format!(
                    "Node exceeds maximum nesting depth of {}",
                    self.config.max_depth
                ),
            );
            return None;
        }

        let Some(name) = fields.get("name").and_then(Value::as_str) else {
            self.record(error_id, "Unsupported component type: node has no name");
            return None;
        };

        let Some(variant) = classify(name) else {
            self.record(error_id, format!("Unsupported component type: \"{}\"", name));
            return None;
        };

        let mut component = match variant.construct(node_id, name) {
            Ok(component) => component,
            Err(e) => {
                self.record(error_id, format!("Failed to construct {}: {}", variant, e));
                return None;
            }
        };
        debug!("Classified node {} ({:?}) as {}", node_id, name, variant);

        self.attach_children(&mut component, fields, depth);
        Some(component)
    }

    fn attach_children(
        &mut self,
        component: &mut Component,
        fields: &Map<String, Value>,
        depth: usize,
    ) {
        match fields.get("children") {
            Some(Value::Array(children)) => {
                for child in children {
                    if let Some(built) = self.build_node(child, depth + 1) {
                        component.add_child(built);
                    }
                }
            }
            Some(Value::Null) | None => {}
            Some(other) => {
                debug!(
                    "Ignoring non-array children ({}) on node {}",
                    json_type(other),
                    component.id()
                );
            }
        }
    }

    fn record(&mut self, node_id: &str, message: impl Into<String>) {
        let error = ParseError::new(node_id, message);
        warn!("Parse error at {}", error);
        self.errors.push(error);
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
