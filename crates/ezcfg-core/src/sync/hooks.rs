//! Lifecycle hooks for synchronization events
//!
//! Every method has a default that logs through `tracing`, so a host only
//! overrides the events it wants to route elsewhere.

use ezcfg_fs::NormalizedPath;

use crate::error::FieldError;

/// Sink for bootstrap events and per-field failures
pub trait SyncHooks {
    /// The directory containing a configuration file was created
    fn on_dir_created(&self, path: &NormalizedPath) {
        tracing::info!(path = %path, "Created configuration directory");
    }

    /// A configuration file was created empty
    fn on_file_created(&self, path: &NormalizedPath) {
        tracing::info!(path = %path, "Created configuration file");
    }

    /// A field getter failed during load or save
    fn on_field_read_error(&self, error: &FieldError) {
        tracing::warn!(field = error.field(), error = %error, "Field read failed");
    }

    /// A field setter failed during load, or its entry could not be written
    /// to the document
    fn on_field_write_error(&self, error: &FieldError) {
        tracing::warn!(field = error.field(), error = %error, "Field write failed");
    }

    /// A field could not be copied between instances
    fn on_field_copy_error(&self, error: &FieldError) {
        tracing::warn!(field = error.field(), error = %error, "Field copy failed");
    }

    /// A registered field has a type with no serialization strategy
    fn on_unsupported_field(&self, error: &FieldError) {
        tracing::warn!(field = error.field(), error = %error, "Skipping unsupported field");
    }
}

/// Hooks that only log
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingHooks;

impl SyncHooks for TracingHooks {}

impl<H: SyncHooks + ?Sized> SyncHooks for &H {
    fn on_dir_created(&self, path: &NormalizedPath) {
        (**self).on_dir_created(path);
    }

    fn on_file_created(&self, path: &NormalizedPath) {
        (**self).on_file_created(path);
    }

    fn on_field_read_error(&self, error: &FieldError) {
        (**self).on_field_read_error(error);
    }

    fn on_field_write_error(&self, error: &FieldError) {
        (**self).on_field_write_error(error);
    }

    fn on_field_copy_error(&self, error: &FieldError) {
        (**self).on_field_copy_error(error);
    }

    fn on_unsupported_field(&self, error: &FieldError) {
        (**self).on_unsupported_field(error);
    }
}
