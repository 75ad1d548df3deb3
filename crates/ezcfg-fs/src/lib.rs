//! Filesystem access for ezcfg
//!
//! Provides normalized locators, locked atomic writes, file bootstrapping
//! and a format-agnostic serde settings store.

pub mod bootstrap;
pub mod error;
pub mod io;
pub mod path;
pub mod settings;

pub use bootstrap::{Bootstrap, ensure_file};
pub use error::{Error, Result};
pub use path::NormalizedPath;
pub use settings::SettingsStore;
