// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Semantic component model.
//!
//! A [`Component`] is one interactive or structural element recovered from a
//! design document. The set of variants is closed ([`ComponentKind`]); the
//! role string is derived from the variant and never changes after
//! construction. Components own their children outright, so a component tree
//! is always a tree.
//!
//! Analysis passes do not depend on `Component` directly. They are generic
//! over [`Semantic`], the capability set `{describe, navigate}` plus the
//! read-only view the audit rules need.

use crate::error::ComponentError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Role tag for buttons
pub const ROLE_BUTTON: &str = "button";
/// Role tag for text inputs
pub const ROLE_TEXTBOX: &str = "textbox";
/// Role tag for navigation landmarks
pub const ROLE_NAVIGATION: &str = "navigation";

/// State key: element takes keyboard focus
pub const FOCUSABLE: &str = "focusable";
/// State key: element is disabled
pub const DISABLED: &str = "disabled";
/// State key: input must be filled in
pub const REQUIRED: &str = "required";
/// State key: container is expanded
pub const EXPANDED: &str = "expanded";

/// Default `input_type` for input fields
pub const DEFAULT_INPUT_TYPE: &str = "text";

/// A single state entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StateValue {
    Bool(bool),
    Text(String),
}

impl StateValue {
    /// `false` and the empty string are falsy, everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            StateValue::Bool(b) => *b,
            StateValue::Text(s) => !s.is_empty(),
        }
    }
}

impl From<bool> for StateValue {
    fn from(value: bool) -> Self {
        StateValue::Bool(value)
    }
}

impl From<&str> for StateValue {
    fn from(value: &str) -> Self {
        StateValue::Text(value.to_string())
    }
}

impl From<String> for StateValue {
    fn from(value: String) -> Self {
        StateValue::Text(value)
    }
}

/// String-keyed state bag.
///
/// Recognized keys are [`FOCUSABLE`], [`DISABLED`], [`REQUIRED`] and
/// [`EXPANDED`]. Other keys are carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentState(BTreeMap<String, StateValue>);

impl ComponentState {
    /// Create an empty state bag
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw entry for `key`
    pub fn get(&self, key: &str) -> Option<&StateValue> {
        self.0.get(key)
    }

    /// Insert or overwrite an entry
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<StateValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Whether `key` is present and truthy. Missing keys read as `false`.
    pub fn is_set(&self, key: &str) -> bool {
        self.0.get(key).is_some_and(StateValue::is_truthy)
    }

    /// Whether `key` is present at all, truthy or not
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }
}

/// The closed set of component variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ComponentKind {
    Button,
    InputField { input_type: String },
    NavigationRegion,
}

impl ComponentKind {
    /// Semantic role tag for this variant
    pub fn role(&self) -> &'static str {
        match self {
            ComponentKind::Button => ROLE_BUTTON,
            ComponentKind::InputField { .. } => ROLE_TEXTBOX,
            ComponentKind::NavigationRegion => ROLE_NAVIGATION,
        }
    }

    fn default_state(&self) -> ComponentState {
        let mut state = ComponentState::new();
        match self {
            ComponentKind::Button => {
                state.set(FOCUSABLE, true);
                state.set(DISABLED, false);
            }
            ComponentKind::InputField { .. } => {
                state.set(FOCUSABLE, true);
                state.set(REQUIRED, false);
            }
            ComponentKind::NavigationRegion => {
                state.set(EXPANDED, true);
            }
        }
        state
    }
}

/// A typed, role-bearing node of the semantic tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    id: String,
    label: String,
    kind: ComponentKind,
    state: ComponentState,
    children: Vec<Component>,
}

impl Component {
    /// Create a component of the given kind with its default state.
    ///
    /// Fails when `id` or `label` is empty.
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        kind: ComponentKind,
    ) -> Result<Self, ComponentError> {
        let id = id.into();
        let label = label.into();
        if id.is_empty() {
            return Err(ComponentError::EmptyField { field: "id" });
        }
        if label.is_empty() {
            return Err(ComponentError::EmptyField { field: "label" });
        }
        let state = kind.default_state();
        Ok(Self {
            id,
            label,
            kind,
            state,
            children: Vec::new(),
        })
    }

    /// Button with `focusable=true, disabled=false`
    pub fn button(id: impl Into<String>, label: impl Into<String>) -> Result<Self, ComponentError> {
        Self::new(id, label, ComponentKind::Button)
    }

    /// Text input field with `focusable=true, required=false`
    pub fn input_field(
        id: impl Into<String>,
        label: impl Into<String>,
    ) -> Result<Self, ComponentError> {
        Self::input_field_with_type(id, label, DEFAULT_INPUT_TYPE)
    }

    /// Input field with an explicit input type (e.g. "email", "password")
    pub fn input_field_with_type(
        id: impl Into<String>,
        label: impl Into<String>,
        input_type: impl Into<String>,
    ) -> Result<Self, ComponentError> {
        Self::new(
            id,
            label,
            ComponentKind::InputField {
                input_type: input_type.into(),
            },
        )
    }

    /// Navigation landmark with `expanded=true` and no `focusable` entry
    pub fn navigation_region(
        id: impl Into<String>,
        label: impl Into<String>,
    ) -> Result<Self, ComponentError> {
        Self::new(id, label, ComponentKind::NavigationRegion)
    }

    /// Identifier taken from the source node
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Human-readable label
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Replace the label. The empty string is rejected; whitespace is not.
    pub fn set_label(&mut self, label: impl Into<String>) -> Result<(), ComponentError> {
        let label = label.into();
        if label.is_empty() {
            return Err(ComponentError::EmptyField { field: "label" });
        }
        self.label = label;
        Ok(())
    }

    /// Semantic role tag, fixed by the variant
    pub fn role(&self) -> &'static str {
        self.kind.role()
    }

    /// Variant of this component
    pub fn kind(&self) -> &ComponentKind {
        &self.kind
    }

    /// Input type for input fields, `None` for every other variant
    pub fn input_type(&self) -> Option<&str> {
        match &self.kind {
            ComponentKind::InputField { input_type } => Some(input_type),
            _ => None,
        }
    }

    /// Current state bag
    pub fn state(&self) -> &ComponentState {
        &self.state
    }

    /// Insert or overwrite one state entry
    pub fn set_state(&mut self, key: impl Into<String>, value: impl Into<StateValue>) {
        self.state.set(key, value);
    }

    /// Whether the `focusable` entry is truthy
    pub fn is_focusable(&self) -> bool {
        self.state.is_set(FOCUSABLE)
    }

    /// Append a child after the existing ones
    pub fn add_child(&mut self, child: Component) {
        self.children.push(child);
    }

    /// Children in document order
    pub fn children(&self) -> &[Component] {
        &self.children
    }

    /// Number of components in this subtree, including `self`
    pub fn subtree_len(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }
        count
    }

    /// Screen-reader sentence for this component.
    pub fn describe(&self) -> String {
        match &self.kind {
            ComponentKind::Button => {
                let mut text = format!("{}, button", self.label);
                if self.state.is_set(DISABLED) {
                    text.push_str(", disabled");
                }
                text
            }
            ComponentKind::InputField { input_type } => {
                let mut text = format!("{}, {} input", self.label, input_type);
                if self.state.is_set(REQUIRED) {
                    text.push_str(", required");
                }
                text
            }
            ComponentKind::NavigationRegion => {
                let count = self.children.len();
                let mut text = format!(
                    "{}, navigation region with {} {}",
                    self.label,
                    count,
                    if count == 1 { "item" } else { "items" }
                );
                if !self.state.is_set(EXPANDED) {
                    text.push_str(", collapsed");
                }
                text
            }
        }
    }

    /// Keyboard interaction hint. Never empty.
    pub fn navigate(&self) -> String {
        match &self.kind {
            ComponentKind::Button if self.state.is_set(DISABLED) => {
                "Unavailable: button is disabled".to_string()
            }
            ComponentKind::Button => "Press Enter or Space to activate".to_string(),
            ComponentKind::InputField { .. } => {
                "Type to enter text, then press Tab to move to the next field".to_string()
            }
            ComponentKind::NavigationRegion => "Use Tab to move through navigation links".to_string(),
        }
    }

    /// Self-contained serializable snapshot of this subtree.
    pub fn to_audit_object(&self) -> AuditObject {
        AuditObject {
            id: self.id.clone(),
            label: self.label.clone(),
            role: self.role().to_string(),
            state: self.state.clone(),
            children: self.children.iter().map(Component::to_audit_object).collect(),
        }
    }
}

/// Plain snapshot of a component subtree: `{id, label, role, state, children}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditObject {
    pub id: String,
    pub label: String,
    pub role: String,
    pub state: ComponentState,
    pub children: Vec<AuditObject>,
}

/// Read-only view of one component, as seen by the audit rules.
#[derive(Debug, Clone, Copy)]
pub struct SemanticView<'a> {
    pub id: &'a str,
    pub label: &'a str,
    pub role: &'a str,
    pub state: &'a ComponentState,
}

impl SemanticView<'_> {
    pub fn is_focusable(&self) -> bool {
        self.state.is_set(FOCUSABLE)
    }
}

/// Capability set shared by every node the analysis passes walk.
///
/// [`Component`] never fails any of these; the fallible signatures let the
/// passes degrade per node when some other implementation does.
pub trait Semantic: Sized {
    /// Human-readable label, used for placeholders and tab stops
    fn label(&self) -> &str;

    /// Children in document order
    fn children(&self) -> &[Self];

    /// Screen-reader sentence
    fn describe(&self) -> Result<String, ComponentError>;

    /// Keyboard interaction hint
    fn navigate(&self) -> Result<String, ComponentError>;

    /// Identity, role and state for rule evaluation
    fn view(&self) -> Result<SemanticView<'_>, ComponentError>;
}

impl Semantic for Component {
    fn label(&self) -> &str {
        &self.label
    }

    fn children(&self) -> &[Self] {
        &self.children
    }

    fn describe(&self) -> Result<String, ComponentError> {
        Ok(Component::describe(self))
    }

    fn navigate(&self) -> Result<String, ComponentError> {
        Ok(Component::navigate(self))
    }

    fn view(&self) -> Result<SemanticView<'_>, ComponentError> {
        Ok(SemanticView {
            id: &self.id,
            label: &self.label,
            role: self.role(),
            state: &self.state,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_defaults() {
        let button = Component::button("b1", "Submit").unwrap();
        assert_eq!(button.role(), "button");
        assert!(button.is_focusable());
        assert_eq!(button.state().get(DISABLED), Some(&StateValue::Bool(false)));
        assert_eq!(button.describe(), "Submit, button");
        assert_eq!(button.navigate(), "Press Enter or Space to activate");
    }

    #[test]
    fn test_input_field_defaults() {
        let input = Component::input_field("i1", "Email").unwrap();
        assert_eq!(input.role(), "textbox");
        assert_eq!(input.input_type(), Some("text"));
        assert!(input.is_focusable());
        assert!(!input.state().is_set(REQUIRED));

        let mut password = Component::input_field_with_type("i2", "Password", "password").unwrap();
        password.set_state(REQUIRED, true);
        assert_eq!(password.describe(), "Password, password input, required");
    }

    #[test]
    fn test_navigation_region_defaults() {
        let mut nav = Component::navigation_region("n1", "Main").unwrap();
        assert_eq!(nav.role(), "navigation");
        assert!(!nav.is_focusable());
        assert!(!nav.state().contains(FOCUSABLE));
        assert!(nav.state().is_set(EXPANDED));
        assert_eq!(nav.input_type(), None);

        nav.add_child(Component::button("b1", "Home").unwrap());
        assert_eq!(nav.describe(), "Main, navigation region with 1 item");
        nav.add_child(Component::button("b2", "About").unwrap());
        nav.set_state(EXPANDED, false);
        assert_eq!(nav.describe(), "Main, navigation region with 2 items, collapsed");
    }

    #[test]
    fn test_rejects_empty_id_and_label() {
        assert_eq!(
            Component::button("", "Submit").unwrap_err(),
            ComponentError::EmptyField { field: "id" }
        );
        assert_eq!(
            Component::navigation_region("n1", "").unwrap_err(),
            ComponentError::EmptyField { field: "label" }
        );
    }

    #[test]
    fn test_set_label() {
        let mut button = Component::button("b1", "Submit").unwrap();
        assert!(button.set_label("").is_err());
        assert_eq!(button.label(), "Submit");
        button.set_label("   ").unwrap();
        assert_eq!(button.label(), "   ");
    }

    #[test]
    fn test_disabled_button_hint() {
        let mut button = Component::button("b1", "Submit").unwrap();
        button.set_state(DISABLED, true);
        assert_eq!(button.describe(), "Submit, button, disabled");
        assert!(!button.navigate().is_empty());
    }

    #[test]
    fn test_state_truthiness() {
        let mut state = ComponentState::new();
        state.set("a", "");
        state.set("b", "yes");
        state.set("c", false);
        assert!(!state.is_set("a"));
        assert!(state.is_set("b"));
        assert!(!state.is_set("c"));
        assert!(!state.is_set("missing"));
    }

    #[test]
    fn test_audit_object_recurses() {
        let mut nav = Component::navigation_region("n1", "Main").unwrap();
        nav.add_child(Component::button("b1", "Home").unwrap());
        let snapshot = nav.to_audit_object();
        assert_eq!(snapshot.role, "navigation");
        assert_eq!(snapshot.children.len(), 1);
        assert_eq!(snapshot.children[0].id, "b1");

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["children"][0]["state"]["focusable"], true);
        assert_eq!(json["state"]["expanded"], true);
    }

    #[test]
    fn test_subtree_len() {
        let mut nav = Component::navigation_region("n1", "Main").unwrap();
        let mut inner = Component::navigation_region("n2", "Sub").unwrap();
        inner.add_child(Component::button("b1", "One").unwrap());
        nav.add_child(inner);
        nav.add_child(Component::button("b2", "Two").unwrap());
        assert_eq!(nav.subtree_len(), 4);
    }
}
