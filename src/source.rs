// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Design document retrieval.
//!
//! The analysis core only needs the raw JSON document; where it comes from
//! is behind [`DocumentSource`]. Remote sources map their transport failures
//! onto the `Auth`, `NotFound`, `Network`, `Protocol` and `Decode` error
//! kinds; [`FileSource`] reads exported documents from disk.

use crate::error::{DesignbotError, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Something that can produce a raw design document by key
pub trait DocumentSource {
    /// Fetch the document identified by `key`
    fn fetch(&self, key: &str) -> Result<Value>;
}

/// Reads `<root>/<key>` (or `<root>/<key>.json`) from the filesystem
#[derive(Debug, Clone)]
pub struct FileSource {
    root: PathBuf,
}

impl FileSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, key: &str) -> PathBuf {
        let direct = self.root.join(key);
        if direct.extension().is_some() {
            direct
        } else {
            self.root.join(format!("{}.json", key))
        }
    }
}

impl DocumentSource for FileSource {
    fn fetch(&self, key: &str) -> Result<Value> {
        let path = self.resolve(key);
        debug!("Loading design document {}", path.display());
        load_document(&path)
    }
}

/// Read and decode a JSON document from `path`
pub fn load_document(path: &Path) -> Result<Value> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(DesignbotError::NotFound(path.display().to_string()));
        }
        Err(e) => return Err(e.into()),
    };
    Ok(serde_json::from_str(&content)?)
}

/// Top-level raw nodes of a document: `document.children`.
///
/// A document without that path, or with a non-array there, yields no nodes.
pub fn extract_nodes(document: &Value) -> Vec<Value> {
    document
        .get("document")
        .and_then(|doc| doc.get("children"))
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}
