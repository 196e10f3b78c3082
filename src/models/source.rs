// file: src/models/source.rs
// description: source descriptors and fetched document model
// reference: provider feed inputs

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Html,
    Json,
    Csv,
    Text,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Html => "html",
            ContentKind::Json => "json",
            ContentKind::Csv => "csv",
            ContentKind::Text => "text",
        }
    }
}

/// Top-level layout of a JSON source. `Prefixes` is the gstatic manifest
/// (`{"prefixes": [{"ipv4Prefix"|"ipv6Prefix": ...}]}`); `Scopes` is the
/// endpoints document (array of objects carrying `ips` and `urls` arrays).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonShape {
    Prefixes,
    Scopes,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceLocation {
    Remote(String),
    Local(PathBuf),
}

impl SourceLocation {
    pub fn describe(&self) -> String {
        match self {
            SourceLocation::Remote(url) => url.clone(),
            SourceLocation::Local(path) => path.display().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub id: String,
    pub location: SourceLocation,
    pub kind: ContentKind,
    #[serde(default)]
    pub json_shape: Option<JsonShape>,
    /// Supplementary sources enrich the result set but do not define it;
    /// their load failures are logged and swallowed instead of aborting.
    #[serde(default)]
    pub optional: bool,
    /// Instructions shown when a local source file is absent.
    #[serde(default)]
    pub missing_hint: Option<String>,
}

impl SourceConfig {
    pub fn remote(id: &str, url: &str, kind: ContentKind) -> Self {
        Self {
            id: id.to_string(),
            location: SourceLocation::Remote(url.to_string()),
            kind,
            json_shape: None,
            optional: false,
            missing_hint: None,
        }
    }

    pub fn local(id: &str, path: impl Into<PathBuf>, kind: ContentKind) -> Self {
        Self {
            id: id.to_string(),
            location: SourceLocation::Local(path.into()),
            kind,
            json_shape: None,
            optional: false,
            missing_hint: None,
        }
    }

    pub fn with_json_shape(mut self, shape: JsonShape) -> Self {
        self.json_shape = Some(shape);
        self
    }

    pub fn supplementary(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn with_missing_hint(mut self, hint: &str) -> Self {
        self.missing_hint = Some(hint.to_string());
        self
    }
}

/// Fetched body of one source. Immutable once loaded; discarded after
/// extraction.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub source: SourceConfig,
    pub body: String,
}

impl RawDocument {
    pub fn new(source: SourceConfig, body: String) -> Self {
        Self { source, body }
    }
}
