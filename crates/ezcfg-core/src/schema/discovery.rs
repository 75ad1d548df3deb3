use std::rc::Rc;

use serde_json::Value;

use super::annotation::CfgField;
use super::declared::{DeclaredType, FieldType};
use super::descriptor::{Accessor, FieldDescriptor};
use crate::error::{AccessError, FieldError};
use crate::types::TypeTag;

/// A type whose fields are synchronized with a document.
///
/// `declare` registers the type's own fields and, through
/// [`FieldSet::inherit`], the fields of embedded parent types. It is called
/// on every synchronization, so it should only register.
pub trait Persisted: Sized + 'static {
    fn declare(fields: &mut FieldSet<Self>);
}

/// A registered field whose path and type tag are not resolved yet
struct Registration<T> {
    name: &'static str,
    owner: &'static str,
    declared_type: DeclaredType,
    options: CfgField,
    accessor: Accessor<T>,
}

impl<T> Registration<T> {
    fn resolve(self) -> Result<FieldDescriptor<T>, FieldError> {
        let Some(type_tag) = TypeTag::resolve(&self.declared_type, &self.options.type_selection)
        else {
            return Err(FieldError::UnsupportedType {
                owner: self.owner,
                field: self.name,
                declared: self.declared_type.to_string(),
            });
        };

        Ok(FieldDescriptor {
            name: self.name,
            owner: self.owner,
            path: self.options.resolve_path(self.name),
            comment: self.options.comment,
            declared_type: self.declared_type,
            type_tag,
            accessor: self.accessor,
        })
    }
}

/// Registration table for the fields of `T`.
///
/// Own fields keep their registration order and always precede inherited
/// ones, whatever order `field` and `inherit` are called in.
pub struct FieldSet<T> {
    own: Vec<Registration<T>>,
    inherited: Vec<Registration<T>>,
}

impl<T: 'static> FieldSet<T> {
    fn new() -> Self {
        Self {
            own: Vec::new(),
            inherited: Vec::new(),
        }
    }

    /// Register a field reached through plain projections.
    pub fn field<F, G, M>(
        &mut self,
        name: &'static str,
        get: G,
        get_mut: M,
        options: CfgField,
    ) -> &mut Self
    where
        F: FieldType + 'static,
        G: Fn(&T) -> &F + 'static,
        M: Fn(&mut T) -> &mut F + 'static,
    {
        let accessor = Accessor {
            get: Box::new(move |target: &T| -> Result<Value, AccessError> {
                Ok(to_document(get(target))?)
            }),
            set: Box::new(move |target: &mut T, value: Value| -> Result<(), AccessError> {
                *get_mut(target) = serde_json::from_value(value)?;
                Ok(())
            }),
            canonical: canonical::<F>(),
        };
        self.push::<F>(name, options, accessor);
        self
    }

    /// Register a field behind fallible accessor functions, for fields that
    /// are computed, validated, or read-only.
    pub fn field_with<F, G, S>(
        &mut self,
        name: &'static str,
        get: G,
        set: S,
        options: CfgField,
    ) -> &mut Self
    where
        F: FieldType + 'static,
        G: Fn(&T) -> Result<F, AccessError> + 'static,
        S: Fn(&mut T, F) -> Result<(), AccessError> + 'static,
    {
        let accessor = Accessor {
            get: Box::new(move |target: &T| -> Result<Value, AccessError> {
                Ok(to_document(&get(target)?)?)
            }),
            set: Box::new(move |target: &mut T, value: Value| -> Result<(), AccessError> {
                set(target, serde_json::from_value(value)?)
            }),
            canonical: canonical::<F>(),
        };
        self.push::<F>(name, options, accessor);
        self
    }

    /// Append every field of the embedded parent type `P`, in `P`'s own
    /// discovery order, after this type's own fields.
    ///
    /// Inherited paths are not checked against own ones. When two fields
    /// share a path, each is synchronized in discovery order and the last
    /// write wins: load backfills the entry from the first field and then
    /// assigns it to the second, and a save with differing values writes the
    /// entry twice and reports `changed` every time.
    pub fn inherit<P, G, M>(&mut self, project: G, project_mut: M) -> &mut Self
    where
        P: Persisted,
        G: Fn(&T) -> &P + 'static,
        M: Fn(&mut T) -> &mut P + 'static,
    {
        let project: Rc<dyn Fn(&T) -> &P> = Rc::new(project);
        let project_mut: Rc<dyn Fn(&mut T) -> &mut P> = Rc::new(project_mut);

        let mut parent = FieldSet::<P>::new();
        P::declare(&mut parent);

        for registration in parent.into_registrations() {
            self.inherited.push(Registration {
                name: registration.name,
                owner: registration.owner,
                declared_type: registration.declared_type,
                options: registration.options,
                accessor: Accessor::project(
                    registration.accessor,
                    Rc::clone(&project),
                    Rc::clone(&project_mut),
                ),
            });
        }
        self
    }

    fn push<F: FieldType>(&mut self, name: &'static str, options: CfgField, accessor: Accessor<T>) {
        self.own.push(Registration {
            name,
            owner: std::any::type_name::<T>(),
            declared_type: F::declared_type(),
            options,
            accessor,
        });
    }

    fn into_registrations(self) -> impl Iterator<Item = Registration<T>> {
        self.own.into_iter().chain(self.inherited)
    }
}

fn canonical<F: FieldType + 'static>() -> Box<dyn Fn(&Value) -> Option<Value>> {
    Box::new(|value: &Value| -> Option<Value> {
        let typed: F = serde_json::from_value(value.clone()).ok()?;
        to_document(&typed).ok()
    })
}

/// Serialize a field value into its document form.
///
/// serde widens `f32` to `f64`, so single-precision floats are rewritten to
/// their shortest `f32` spelling: `0.1f32` is stored as `0.1`.
fn to_document<F: FieldType>(value: &F) -> serde_json::Result<Value> {
    let mut value = serde_json::to_value(value)?;
    if F::declared_type().has_single_precision() {
        narrow_floats(&mut value);
    }
    Ok(value)
}

fn narrow_floats(value: &mut Value) {
    match value {
        Value::Number(number) if number.is_f64() => {
            let narrowed = number.as_f64().and_then(|wide| {
                let single = wide as f32;
                let short: f64 = single.to_string().parse().ok()?;
                (short as f32 == single).then_some(short)
            });
            if let Some(short) = narrowed.and_then(serde_json::Number::from_f64) {
                *number = short;
            }
        }
        Value::Array(items) => items.iter_mut().for_each(narrow_floats),
        Value::Object(map) => map.values_mut().for_each(narrow_floats),
        _ => {}
    }
}

/// Result of discovering the persisted fields of a type
pub struct Discovered<T> {
    /// Resolved fields, most-derived first, then ancestors in hierarchy order
    pub descriptors: Vec<FieldDescriptor<T>>,
    /// Fields whose type could not be resolved, in the same order
    pub unsupported: Vec<FieldError>,
}

impl<T> Discovered<T> {
    /// Document paths in discovery order
    pub fn paths(&self) -> Vec<&str> {
        self.descriptors.iter().map(|d| d.path.as_str()).collect()
    }
}

/// Collect the ordered field descriptors of `T`.
///
/// Fields with an unsupported type are returned in `unsupported` instead of
/// being coerced; the others are unaffected.
pub fn discover<T: Persisted>() -> Discovered<T> {
    let mut fields = FieldSet::<T>::new();
    T::declare(&mut fields);

    let mut discovered = Discovered {
        descriptors: Vec::new(),
        unsupported: Vec::new(),
    };
    for registration in fields.into_registrations() {
        match registration.resolve() {
            Ok(descriptor) => discovered.descriptors.push(descriptor),
            Err(error) => discovered.unsupported.push(error),
        }
    }

    tracing::debug!(
        owner = std::any::type_name::<T>(),
        fields = discovered.descriptors.len(),
        unsupported = discovered.unsupported.len(),
        "Discovered persisted fields"
    );
    discovered
}
