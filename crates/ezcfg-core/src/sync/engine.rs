//! SyncEngine implementation
//!
//! The engine walks field descriptors in discovery order and reconciles each
//! field with its document entry. It never touches storage; persisting the
//! document when a report says `changed` is the caller's job.

use ezcfg_content::Document;
use serde_json::Value;

use super::hooks::{SyncHooks, TracingHooks};
use super::options::SyncOptions;
use super::report::SyncReport;
use crate::error::FieldError;
use crate::schema::FieldDescriptor;

/// Engine for synchronizing fields with a document
///
/// The engine provides three operations:
/// - **load**: document → fields, backfilling missing entries
/// - **save**: fields → document, writing only differing entries
/// - **copy_fields**: field-by-field copy between two instances
#[derive(Debug, Clone, Default)]
pub struct SyncEngine<H = TracingHooks> {
    options: SyncOptions,
    hooks: H,
}

impl SyncEngine {
    /// Create an engine that reports through [`TracingHooks`]
    pub fn new(options: SyncOptions) -> Self {
        Self::with_hooks(options, TracingHooks)
    }
}

impl<H: SyncHooks> SyncEngine<H> {
    /// Create an engine with custom hooks
    pub fn with_hooks(options: SyncOptions, hooks: H) -> Self {
        Self { options, hooks }
    }

    pub fn options(&self) -> &SyncOptions {
        &self.options
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    /// Assign document values to the fields of `target`.
    ///
    /// Fields whose entry is absent or not decodable keep their value, and
    /// that value is written to the document. `changed` reports whether
    /// anything was backfilled.
    pub fn load<T>(
        &self,
        target: &mut T,
        descriptors: &[FieldDescriptor<T>],
        document: &mut Document,
    ) -> SyncReport {
        let mut report = SyncReport::new();

        for descriptor in descriptors {
            let path = descriptor.path.as_str();

            if let Some(value) = descriptor.decode(document.get_path(path)) {
                if let Err(e) = descriptor.write(target, value) {
                    let error = FieldError::Write {
                        field: descriptor.name,
                        path: path.to_string(),
                        message: e.to_string(),
                    };
                    self.hooks.on_field_write_error(&error);
                    report.record_error(error);
                }
            } else {
                match descriptor.read(target) {
                    // Nothing to backfill
                    Ok(Value::Null) => {}
                    Ok(current) => {
                        tracing::debug!(field = descriptor.name, path, "Backfilling missing entry");
                        self.write_entry(descriptor, current, document, &mut report);
                    }
                    Err(e) => self.read_failed(descriptor, e.to_string(), &mut report),
                }
            }

            self.attach_comment(descriptor, document);
        }

        tracing::debug!(
            fields = descriptors.len(),
            changed = report.changed,
            errors = report.errors.len(),
            "Load finished"
        );
        report
    }

    /// Write the fields of `target` that differ from the document.
    ///
    /// A `null` field value and an absent entry compare equal; a `null` that
    /// differs from a present entry removes it.
    pub fn save<T>(
        &self,
        target: &T,
        descriptors: &[FieldDescriptor<T>],
        document: &mut Document,
    ) -> SyncReport {
        let mut report = SyncReport::new();

        for descriptor in descriptors {
            let path = descriptor.path.as_str();

            match descriptor.read(target) {
                Ok(current) => {
                    let stored = descriptor.decode(document.get_path(path));
                    if values_differ(&current, stored.as_ref()) {
                        tracing::debug!(
                            field = descriptor.name,
                            path,
                            "Field differs from document"
                        );
                        self.write_entry(descriptor, current, document, &mut report);
                    }
                }
                Err(e) => self.read_failed(descriptor, e.to_string(), &mut report),
            }

            self.attach_comment(descriptor, document);
        }

        tracing::debug!(
            fields = descriptors.len(),
            changed = report.changed,
            errors = report.errors.len(),
            "Save finished"
        );
        report
    }

    /// Copy every field from `source` to `destination`.
    ///
    /// A failing field is reported and the rest are still copied. `changed`
    /// reports whether any destination value actually changed.
    pub fn copy_fields<T>(
        &self,
        source: &T,
        destination: &mut T,
        descriptors: &[FieldDescriptor<T>],
    ) -> SyncReport {
        let mut report = SyncReport::new();

        for descriptor in descriptors {
            let copied = descriptor.read(source).and_then(|value| {
                let previous = descriptor.read(destination).ok();
                let differs = previous.as_ref() != Some(&value);
                descriptor.write(destination, value)?;
                Ok(differs)
            });

            match copied {
                Ok(true) => report.record_change(descriptor.name),
                Ok(false) => {}
                Err(e) => {
                    let error = FieldError::Copy {
                        field: descriptor.name,
                        message: e.to_string(),
                    };
                    self.hooks.on_field_copy_error(&error);
                    report.record_error(error);
                }
            }
        }

        tracing::debug!(
            fields = descriptors.len(),
            changed = report.changed,
            errors = report.errors.len(),
            "Copy finished"
        );
        report
    }

    fn write_entry<T>(
        &self,
        descriptor: &FieldDescriptor<T>,
        value: Value,
        document: &mut Document,
        report: &mut SyncReport,
    ) {
        let path = descriptor.path.as_str();
        let unchanged = match (&value, document.get_path(path)) {
            (Value::Null, None) => true,
            (value, Some(stored)) => value == stored,
            _ => false,
        };
        if unchanged {
            return;
        }

        match document.set_path(path, value) {
            Ok(()) => report.record_change(path),
            Err(e) => {
                let error = FieldError::Document {
                    field: descriptor.name,
                    path: path.to_string(),
                    message: e.to_string(),
                };
                self.hooks.on_field_write_error(&error);
                report.record_error(error);
            }
        }
    }

    fn read_failed<T>(
        &self,
        descriptor: &FieldDescriptor<T>,
        message: String,
        report: &mut SyncReport,
    ) {
        let error = FieldError::Read {
            field: descriptor.name,
            path: descriptor.path.clone(),
            message,
        };
        self.hooks.on_field_read_error(&error);
        report.record_error(error);
    }

    fn attach_comment<T>(&self, descriptor: &FieldDescriptor<T>, document: &mut Document) {
        if self.options.write_comments && !descriptor.comment.is_empty() {
            document.set_comment(&descriptor.path, descriptor.comment.iter().cloned());
        }
    }
}

/// Compare a field value with a decoded document value; `null` is absent.
fn values_differ(field: &Value, document: Option<&Value>) -> bool {
    match (field, document) {
        (Value::Null, None) => false,
        (Value::Null, Some(_)) | (_, None) => true,
        (field, Some(document)) => field != document,
    }
}
