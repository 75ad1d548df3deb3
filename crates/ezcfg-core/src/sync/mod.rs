//! Synchronization between persisted fields and a document
//!
//! This module provides:
//! - **engine**: load with backfill, save with change detection, copy
//! - **hooks**: the lifecycle and per-field error sink
//! - **options**: host-selectable behavior
//! - **report**: what a single call changed and which fields failed

mod engine;
mod hooks;
mod options;
mod report;

pub use engine::SyncEngine;
pub use hooks::{SyncHooks, TracingHooks};
pub use options::SyncOptions;
pub use report::SyncReport;
