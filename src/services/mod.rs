// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Read-only analysis passes over a semantic component tree.
//!
//! Every pass walks the roots in pre-order (parent before children, children
//! in document order) and never mutates the tree. A node that fails inside a
//! pass is replaced by a placeholder entry and its children are still
//! visited.

pub mod audit;
pub mod focus_order;
pub mod reading_order;

pub use audit::{run_audit, AuditEntry, AuditOutcome, AuditReport, AuditRule};
pub use focus_order::{build_tab_order, TabStop};
pub use reading_order::generate_reading_order;

use crate::component::Semantic;

/// Pre-order walk over a forest, driven by an explicit stack so tree depth
/// never turns into call-stack depth.
pub struct PreOrder<'a, C> {
    stack: Vec<&'a C>,
}

impl<'a, C: Semantic> PreOrder<'a, C> {
    pub fn new(roots: &'a [C]) -> Self {
        Self {
            stack: roots.iter().rev().collect(),
        }
    }
}

impl<'a, C: Semantic> Iterator for PreOrder<'a, C> {
    type Item = &'a C;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}
