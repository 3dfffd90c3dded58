// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Error types for designbot

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DesignbotError>;

/// Failures that cross a public entry point.
///
/// Per-node and per-component problems never show up here; they are
/// recorded as [`crate::builder::ParseError`] values or placeholder entries
/// by the pass that hit them.
#[derive(Error, Debug)]
pub enum DesignbotError {
    /// A public entry point received something other than a node array
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Expired or invalid credential; produced by remote `DocumentSource`s
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Unknown document key or missing file
    #[error("Document not found: {0}")]
    NotFound(String),

    /// Transport failure; produced by remote `DocumentSource`s
    #[error("Network error: {0}")]
    Network(String),

    /// Non-success response status; produced by remote `DocumentSource`s
    #[error("Unexpected response status {status}: {message}")]
    Protocol { status: u16, message: String },

    /// Document body is not valid JSON
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Errors raised by a single component, either while constructing it or
/// while one of the analysis passes inspects it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComponentError {
    #[error("component {field} must not be empty")]
    EmptyField { field: &'static str },

    #[error("describe failed: {0}")]
    Describe(String),

    #[error("navigate failed: {0}")]
    Navigate(String),

    #[error("inspection failed: {0}")]
    Inspect(String),
}
