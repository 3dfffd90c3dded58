// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Reading order: the sequence a screen reader would announce.

use crate::component::Semantic;
use crate::services::PreOrder;
use tracing::warn;

/// One `describe()` line per component, in pre-order.
///
/// A component whose description fails contributes a placeholder line
/// instead, and its children are still read.
pub fn generate_reading_order<C: Semantic>(roots: &[C]) -> Vec<String> {
    PreOrder::new(roots)
        .map(|node| match node.describe() {
            Ok(line) => line,
            Err(e) => {
                warn!("Could not describe \"{}\": {}", node.label(), e);
                format!("[unreadable component \"{}\": {}]", node.label(), e)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::Component;
    use crate::services::testing::FaultyNode;

    #[test]
    fn test_empty_roots() {
        let roots: Vec<Component> = Vec::new();
        assert!(generate_reading_order(&roots).is_empty());
    }

    #[test]
    fn test_navigation_with_buttons() {
        let mut nav = Component::navigation_region("n1", "Main Menu").unwrap();
        nav.add_child(Component::button("b1", "Home").unwrap());
        nav.add_child(Component::button("b2", "Contact").unwrap());

        let lines = generate_reading_order(&[nav]);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("Main Menu"));
        assert_eq!(lines[1], "Home, button");
        assert_eq!(lines[2], "Contact, button");
    }

    #[test]
    fn test_failed_describe_keeps_children() {
        let mut parent = FaultyNode::new("Broken");
        parent.fail_describe = true;
        let parent = parent.with_child(FaultyNode::new("Child"));

        let lines = generate_reading_order(&[parent]);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("[unreadable component \"Broken\""));
        assert_eq!(lines[1], "Child, test node");
    }
}
