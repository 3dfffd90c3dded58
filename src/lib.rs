// SPDX-License-Identifier: PMPL-1.0-or-later
//! Designbot - semantic accessibility analysis for design documents
//!
//! Part of the gitbot-fleet ecosystem. Designbot turns the loosely-typed
//! node tree of a design-tool export into a typed semantic component tree,
//! then runs independent read-only passes over it.
//!
//! ## Pipeline
//!
//! - **Builder**: classifies raw nodes by name into buttons, input fields and
//!   navigation regions, recording a parse error for every node it cannot use
//! - **Reading order**: what a screen reader would announce, in order
//! - **Focus order**: the keyboard tab sequence
//! - **Audit**: fixed rule table (`LABEL_EMPTY`, `ROLE_PRESENT`,
//!   `FOCUSABLE_BUTTON`) with one pass/fail entry per rule per component

pub mod analysis;
pub mod builder;
pub mod component;
pub mod config;
pub mod error;
pub mod fleet;
pub mod report;
pub mod scanner;
pub mod services;
pub mod source;

pub use analysis::{analyze_document, analyze_nodes, Analysis};
pub use builder::{build_tree, BuildResult, BuilderConfig, ParseError, TreeBuilder};
pub use component::{Component, ComponentKind, Semantic};
pub use error::{ComponentError, DesignbotError, Result};
