//! Typed-field synchronization with configuration documents
//!
//! A type declares which of its fields are persisted, under which document
//! path and with which serialization strategy. The engine then keeps the
//! fields and a [`Document`] consistent in both directions:
//!
//! - **load**: document → fields, backfilling missing entries with the
//!   fields' current values
//! - **save**: fields → document, writing only the entries that differ
//! - **copy**: field-by-field copy between two instances
//!
//! # Architecture
//!
//! ```text
//!               ConfigSync (locators, bootstrap, persist-on-change)
//!                    |
//!     +--------------+---------------+
//!     |              |               |
//!  schema         types            sync
//!  (discovery,    (TypeTag,        (SyncEngine, hooks,
//!   descriptors)   resolution)      options, reports)
//!     |                              |
//!     +---------- ezcfg-content -----+---- ezcfg-fs
//! ```
//!
//! # Example
//!
//! ```no_run
//! use ezcfg_core::{CfgField, ConfigSync, FieldSet, Persisted, TypeTag};
//!
//! struct Settings {
//!     volume: f64,
//!     label: String,
//! }
//!
//! impl Persisted for Settings {
//!     fn declare(fields: &mut FieldSet<Self>) {
//!         fields
//!             .field("volume", |s| &s.volume, |s| &mut s.volume, CfgField::auto())
//!             .field(
//!                 "label",
//!                 |s| &s.label,
//!                 |s| &mut s.label,
//!                 CfgField::auto().path("display.label").typed(TypeTag::String),
//!             );
//!     }
//! }
//!
//! fn main() -> ezcfg_core::Result<()> {
//!     let mut settings = Settings { volume: 1.0, label: "default".into() };
//!     let sync = ConfigSync::new("plugins/demo");
//!     sync.load(&mut settings)?;
//!     settings.volume = 0.5;
//!     sync.save(&settings)?;
//!     Ok(())
//! }
//! ```

pub mod adapter;
pub mod error;
pub mod logging;
pub mod schema;
pub mod store;
pub mod sync;
pub mod types;

pub use error::{AccessError, Error, FieldError, Result};
pub use ezcfg_content::{Document, Format};
pub use ezcfg_fs::NormalizedPath;
pub use schema::{
    CfgField, DeclaredType, Discovered, FieldDescriptor, FieldSet, FieldType, Persisted,
    TypeSelection, discover,
};
pub use store::{ConfigSync, SyncSettings};
pub use sync::{SyncEngine, SyncHooks, SyncOptions, SyncReport, TracingHooks};
pub use types::TypeTag;
