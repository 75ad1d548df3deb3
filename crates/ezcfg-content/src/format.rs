//! Format detection and handler trait

use std::collections::BTreeMap;

use crate::error::Result;
use serde_json::Value;

/// Comment lines keyed by the canonical dotted path they annotate
pub type Comments = BTreeMap<String, Vec<String>>;

/// Supported document formats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Format {
    #[default]
    Yaml,
    Json,
    Toml,
}

impl Format {
    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }

    /// Human readable name used in error messages
    pub fn name(&self) -> &'static str {
        match self {
            Self::Yaml => "YAML",
            Self::Json => "JSON",
            Self::Toml => "TOML",
        }
    }

    /// Get the comment style for this format
    pub fn comment_style(&self) -> CommentStyle {
        match self {
            Self::Yaml => CommentStyle::Hash,
            Self::Toml => CommentStyle::Hash,
            Self::Json => CommentStyle::None,
        }
    }

    /// Get the handler implementing this format
    pub fn handler(&self) -> Box<dyn FormatHandler> {
        use crate::handlers::{JsonHandler, TomlHandler, YamlHandler};

        match self {
            Self::Yaml => Box::new(YamlHandler::new()),
            Self::Json => Box::new(JsonHandler::new()),
            Self::Toml => Box::new(TomlHandler::new()),
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Comment syntax styles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentStyle {
    /// Hash: `# comment`
    Hash,
    /// No comment support
    None,
}

impl CommentStyle {
    /// Format a single comment line at the given indentation
    pub fn format_line(&self, indent: &str, line: &str) -> Option<String> {
        match self {
            Self::Hash if line.is_empty() => Some(format!("{indent}#")),
            Self::Hash => Some(format!("{indent}# {line}")),
            Self::None => None,
        }
    }
}

/// Trait for format-specific handlers
pub trait FormatHandler: Send + Sync {
    /// Format identifier
    fn format(&self) -> Format;

    /// Parse source into an ordered value tree rooted at a mapping.
    ///
    /// Empty sources parse to an empty mapping.
    fn parse(&self, source: &str) -> Result<Value>;

    /// Render a value tree back to source, attaching comments where the
    /// format supports them
    fn render(&self, value: &Value, comments: &Comments) -> Result<String>;
}
