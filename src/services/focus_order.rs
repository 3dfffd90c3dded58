// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Focus order: the keyboard tab sequence.

use crate::component::Semantic;
use crate::services::PreOrder;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// One stop in the tab order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabStop {
    pub label: String,
    pub hint: String,
}

/// Focusable components in pre-order, paired with their keyboard hint.
///
/// Only components whose `focusable` state is truthy are included, but the
/// walk descends into every component, so focusable children of a
/// non-focusable container still appear.
pub fn build_tab_order<C: Semantic>(roots: &[C]) -> Vec<TabStop> {
    let mut stops = Vec::new();

    for node in PreOrder::new(roots) {
        let focusable = match node.view() {
            Ok(view) => view.is_focusable(),
            Err(e) => {
                warn!("Could not inspect \"{}\": {}", node.label(), e);
                stops.push(placeholder(node.label(), &e));
                continue;
            }
        };
        if !focusable {
            continue;
        }

        match node.navigate() {
            Ok(hint) => stops.push(TabStop {
                label: node.label().to_string(),
                hint,
            }),
            Err(e) => {
                warn!("Could not build hint for \"{}\": {}", node.label(), e);
                stops.push(placeholder(node.label(), &e));
            }
        }
    }

    stops
}

fn placeholder(label: &str, error: &dyn std::fmt::Display) -> TabStop {
    TabStop {
        label: label.to_string(),
        hint: format!("[navigation hint unavailable: {}]", error),
    }
}
