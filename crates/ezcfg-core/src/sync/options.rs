use serde::{Deserialize, Serialize};

/// Options for load and save operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncOptions {
    /// Persist the document after a load that backfilled missing entries
    pub auto_persist_on_load: bool,
    /// Attach field comments to the document before it is rendered
    pub write_comments: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            auto_persist_on_load: true,
            write_comments: true,
        }
    }
}
