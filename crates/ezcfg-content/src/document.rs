//! Unified Document type

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::format::{Comments, Format, FormatHandler};
use crate::path::{format_path, get_at_path, parse_path, remove_at_path, set_at_path};

/// An ordered, path-addressable configuration document.
///
/// The value tree is always rooted at a mapping. A `null` value and a
/// missing entry are the same state: reads report both as absent and
/// writing `null` removes the entry.
pub struct Document {
    format: Format,
    handler: Box<dyn FormatHandler>,
    root: Value,
    comments: Comments,
    modified: bool,
}

impl Document {
    /// Create an empty document of the given format
    pub fn new(format: Format) -> Self {
        Self {
            format,
            handler: format.handler(),
            root: Value::Object(Map::new()),
            comments: Comments::new(),
            modified: false,
        }
    }

    /// Parse with explicit format
    pub fn parse_as(source: &str, format: Format) -> Result<Self> {
        let handler = format.handler();
        let root = handler.parse(source)?;

        Ok(Self {
            format,
            handler,
            root,
            comments: Comments::new(),
            modified: false,
        })
    }

    /// Get the document format
    pub fn format(&self) -> Format {
        self.format
    }

    /// Get the whole value tree
    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Check if the value tree has changed since parsing
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Get the value at the given path.
    ///
    /// Returns `None` for missing entries and for explicit `null`s.
    ///
    /// # Examples
    ///
    /// ```
    /// use ezcfg_content::{Document, Format};
    /// use serde_json::json;
    ///
    /// let doc = Document::parse_as("display:\n  label: x\n", Format::Yaml).unwrap();
    /// assert_eq!(doc.get_path("display.label"), Some(&json!("x")));
    /// assert_eq!(doc.get_path("display.missing"), None);
    /// ```
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        get_at_path(&self.root, &parse_path(path)).filter(|v| !v.is_null())
    }

    /// Check if a non-null value exists at the given path
    pub fn contains_path(&self, path: &str) -> bool {
        self.get_path(path).is_some()
    }

    /// Set a value at the given path, creating intermediate mappings.
    ///
    /// Setting `null` removes the entry.
    ///
    /// # Errors
    ///
    /// Returns `PathSetFailed` for an empty path or an index that does not
    /// address an existing sequence element.
    ///
    /// # Examples
    ///
    /// ```
    /// use ezcfg_content::{Document, Format};
    /// use serde_json::json;
    ///
    /// let mut doc = Document::new(Format::Yaml);
    /// doc.set_path("display.label", "default").unwrap();
    /// assert_eq!(doc.get_path("display.label"), Some(&json!("default")));
    /// assert!(doc.is_modified());
    /// ```
    pub fn set_path(&mut self, path: &str, value: impl Into<Value>) -> Result<()> {
        let segments = parse_path(path);
        if segments.is_empty() {
            return Err(Error::path_set(path, "path is empty"));
        }

        let value = value.into();
        if value.is_null() {
            self.remove_path(path);
            return Ok(());
        }

        if get_at_path(&self.root, &segments) == Some(&value) {
            return Ok(());
        }

        if !set_at_path(&mut self.root, &segments, value) {
            return Err(Error::path_set(
                path,
                "index does not address an existing sequence element",
            ));
        }
        self.modified = true;
        Ok(())
    }

    /// Remove the value at the given path, returning it if it existed
    pub fn remove_path(&mut self, path: &str) -> Option<Value> {
        let removed = remove_at_path(&mut self.root, &parse_path(path));
        if removed.is_some() {
            self.modified = true;
        }
        removed
    }

    /// Attach comment lines to a path; an empty set of lines detaches them.
    ///
    /// Comments are metadata emitted on render and do not mark the document
    /// as modified.
    pub fn set_comment<I, S>(&mut self, path: &str, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let key = format_path(&parse_path(path));
        let lines: Vec<String> = lines.into_iter().map(Into::into).collect();
        if lines.is_empty() {
            self.comments.remove(&key);
        } else {
            self.comments.insert(key, lines);
        }
    }

    /// Get the comment lines attached to a path
    pub fn comment(&self, path: &str) -> Option<&[String]> {
        self.comments
            .get(&format_path(&parse_path(path)))
            .map(Vec::as_slice)
    }

    /// Render to string in the document's format
    pub fn render(&self) -> Result<String> {
        self.handler.render(&self.root, &self.comments)
    }
}

impl Clone for Document {
    fn clone(&self) -> Self {
        Self {
            format: self.format,
            handler: self.format.handler(),
            root: self.root.clone(),
            comments: self.comments.clone(),
            modified: self.modified,
        }
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("format", &self.format)
            .field("root", &self.root)
            .field("comments", &self.comments)
            .field("modified", &self.modified)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_reads_as_absent() {
        let doc = Document::parse_as("volume: ~\n", Format::Yaml).unwrap();
        assert_eq!(doc.get_path("volume"), None);
        assert!(!doc.contains_path("volume"));
    }

    #[test]
    fn test_set_same_value_is_not_a_modification() {
        let mut doc = Document::parse_as("volume: 0.5\n", Format::Yaml).unwrap();
        doc.set_path("volume", 0.5).unwrap();
        assert!(!doc.is_modified());
    }

    #[test]
    fn test_set_null_removes() {
        let mut doc = Document::parse_as("a: 1\nb: 2\n", Format::Yaml).unwrap();
        doc.set_path("a", Value::Null).unwrap();
        assert_eq!(doc.root(), &json!({"b": 2}));
        assert!(doc.is_modified());
    }

    #[test]
    fn test_set_empty_path_fails() {
        let mut doc = Document::new(Format::Yaml);
        assert!(matches!(
            doc.set_path("", 1),
            Err(Error::PathSetFailed { .. })
        ));
    }

    #[test]
    fn test_comments_do_not_modify() {
        let mut doc = Document::new(Format::Yaml);
        doc.set_comment("display..label", ["Shown in the title bar"]);
        assert!(!doc.is_modified());
        assert_eq!(
            doc.comment("display.label"),
            Some(&["Shown in the title bar".to_string()][..])
        );
        doc.set_comment("display.label", Vec::<String>::new());
        assert_eq!(doc.comment("display.label"), None);
    }
}
