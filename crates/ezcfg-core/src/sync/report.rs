use crate::error::FieldError;

/// Report from a load, save or copy operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Whether the document (load, save) or the destination (copy) changed
    pub changed: bool,
    /// Paths written to the document, or names of copied fields, in order
    pub touched: Vec<String>,
    /// Per-field failures; the other fields were still processed
    pub errors: Vec<FieldError>,
}

impl SyncReport {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a change at the given path
    pub fn record_change(&mut self, path: impl Into<String>) {
        self.changed = true;
        self.touched.push(path.into());
    }

    /// Record a per-field failure
    pub fn record_error(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    /// Check if every field was processed without error
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}
