//! Document access on storage
//!
//! Opens a configuration file as a [`Document`] and persists it back. The
//! format follows the file extension; unknown extensions are read as YAML.

use ezcfg_content::{Document, Format};
use ezcfg_fs::{NormalizedPath, io};

use crate::Result;

/// Format for a locator, from its extension
pub fn detect_format(path: &NormalizedPath) -> Format {
    path.extension()
        .and_then(Format::from_extension)
        .unwrap_or_default()
}

/// Read and parse the file at `path`.
///
/// An empty file opens as an empty mapping.
///
/// # Errors
///
/// Returns an `Fs` error if the file cannot be read and a `Content` error if
/// it is malformed or its top level is not a mapping.
pub fn open_document(path: &NormalizedPath) -> Result<Document> {
    let format = detect_format(path);
    let source = io::read_text(path)?;
    let document = Document::parse_as(&source, format)?;
    tracing::debug!(path = %path, format = %format, "Opened document");
    Ok(document)
}

/// Render `document` and write it atomically to `path`.
pub fn persist_document(document: &Document, path: &NormalizedPath) -> Result<()> {
    let rendered = document.render()?;
    io::write_text(path, &rendered)?;
    tracing::debug!(path = %path, format = %document.format(), "Persisted document");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_format_defaults_to_yaml() {
        assert_eq!(detect_format(&NormalizedPath::new("a/config.json")), Format::Json);
        assert_eq!(detect_format(&NormalizedPath::new("a/config.TOML")), Format::Toml);
        assert_eq!(detect_format(&NormalizedPath::new("a/config.cfg")), Format::Yaml);
        assert_eq!(detect_format(&NormalizedPath::new("a/config")), Format::Yaml);
    }
}
