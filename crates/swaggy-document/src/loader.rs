//! Document loading from files and byte buffers.
//!
//! Bytes are handed to `serde_json` or `serde_yaml`, which produce a generic
//! order-preserving tree; [`Document::from_value`] then projects that tree.

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::info;

use crate::document::Document;
use crate::error::{DocumentParseError, DocumentResult};

/// Serialization format of a specification document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// JSON.
    Json,
    /// YAML.
    Yaml,
}

impl DocumentFormat {
    /// Determines the format from a file extension.
    ///
    /// Returns `None` for unknown or missing extensions.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }

    /// Guesses the format from content: a leading `{` means JSON.
    pub fn sniff(bytes: &[u8]) -> Self {
        match bytes.iter().find(|b| !b.is_ascii_whitespace()) {
            Some(b'{') => Self::Json,
            _ => Self::Yaml,
        }
    }
}

/// Loads [`Document`]s from various sources.
pub struct DocumentLoader;

impl DocumentLoader {
    /// Load a document from a file.
    ///
    /// The format comes from the extension (`.json`, `.yaml`, `.yml`) and is
    /// sniffed from the content otherwise.
    pub fn from_file(path: impl AsRef<Path>) -> DocumentResult<Document> {
        let path = path.as_ref();
        info!(path = %path.display(), "loading specification document");

        let bytes = fs::read(path).map_err(|e| DocumentParseError::io(path, e))?;
        let format = DocumentFormat::from_path(path).unwrap_or_else(|| DocumentFormat::sniff(&bytes));

        Self::from_slice(&bytes, format)
    }

    /// Load a document from bytes in a known format.
    pub fn from_slice(bytes: &[u8], format: DocumentFormat) -> DocumentResult<Document> {
        let tree = Self::parse_tree(bytes, format)?;
        Document::from_value(&tree)
    }

    /// Load a document from bytes, sniffing the format.
    pub fn from_slice_detect(bytes: &[u8]) -> DocumentResult<Document> {
        Self::from_slice(bytes, DocumentFormat::sniff(bytes))
    }

    /// Load a document from a string in a known format.
    pub fn from_str(content: &str, format: DocumentFormat) -> DocumentResult<Document> {
        Self::from_slice(content.as_bytes(), format)
    }

    /// Parse bytes into the generic tree without projecting it.
    pub fn parse_tree(bytes: &[u8], format: DocumentFormat) -> DocumentResult<Value> {
        let tree = match format {
            DocumentFormat::Json => serde_json::from_slice(bytes)?,
            DocumentFormat::Yaml => serde_yaml::from_slice(bytes)?,
        };
        Ok(tree)
    }
}
