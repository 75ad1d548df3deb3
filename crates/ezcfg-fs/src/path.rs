//! Normalized locators for configuration files

use std::path::{Path, PathBuf};

/// A file locator normalized to forward slashes.
///
/// Locators are compared and logged in normalized form and converted to
/// platform-native paths only at I/O boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedPath {
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath, converting backslashes to forward slashes.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            inner: path.as_ref().to_string_lossy().replace('\\', "/"),
        }
    }

    /// Get the normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Join this path with a relative segment.
    pub fn join(&self, segment: &str) -> Self {
        let segment = segment.replace('\\', "/");
        if self.inner.is_empty() {
            return Self { inner: segment };
        }
        let base = self.inner.trim_end_matches('/');
        Self {
            inner: format!("{}/{}", base, segment.trim_start_matches("./")),
        }
    }

    /// Resolve a locator against this base directory.
    ///
    /// Absolute locators are returned unchanged.
    pub fn resolve(&self, locator: impl AsRef<Path>) -> Self {
        let locator = Self::new(locator);
        if locator.is_absolute() {
            locator
        } else {
            self.join(locator.as_str())
        }
    }

    /// Check if this locator is absolute (`/...` or a drive prefix like `C:/`).
    pub fn is_absolute(&self) -> bool {
        let bytes = self.inner.as_bytes();
        self.inner.starts_with('/')
            || (bytes.len() >= 3 && bytes[0].is_ascii_alphabetic() && &bytes[1..3] == b":/")
    }

    /// Get the parent directory.
    pub fn parent(&self) -> Option<Self> {
        let trimmed = self.inner.trim_end_matches('/');
        match trimmed.rfind('/') {
            Some(0) => Some(Self {
                inner: "/".to_string(),
            }),
            Some(idx) => Some(Self {
                inner: trimmed[..idx].to_string(),
            }),
            None => None,
        }
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        self.inner
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .filter(|name| !name.is_empty())
    }

    /// Get the extension if present.
    pub fn extension(&self) -> Option<&str> {
        let name = self.file_name()?;
        match name.rfind('.') {
            Some(0) | None => None,
            Some(idx) => Some(&name[idx + 1..]),
        }
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}
