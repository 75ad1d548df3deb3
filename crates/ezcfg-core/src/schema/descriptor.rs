use serde_json::Value;

use super::declared::DeclaredType;
use crate::error::AccessError;
use crate::types::TypeTag;

pub(crate) type Getter<T> = Box<dyn Fn(&T) -> Result<Value, AccessError>>;
pub(crate) type Setter<T> = Box<dyn Fn(&mut T, Value) -> Result<(), AccessError>>;
pub(crate) type Canonical = Box<dyn Fn(&Value) -> Option<Value>>;

/// Type-erased get/set capability for one field of `T`
pub(crate) struct Accessor<T> {
    pub(crate) get: Getter<T>,
    pub(crate) set: Setter<T>,
    /// Round-trips a document value through the field's Rust type, so it
    /// compares equal to what the getter produces for the same value
    pub(crate) canonical: Canonical,
}

impl<T: 'static> Accessor<T> {
    /// Lift an accessor of an embedded `P` to the enclosing `T`
    pub(crate) fn project<P: 'static>(
        inner: Accessor<P>,
        project: std::rc::Rc<dyn Fn(&T) -> &P>,
        project_mut: std::rc::Rc<dyn Fn(&mut T) -> &mut P>,
    ) -> Self {
        let Accessor {
            get,
            set,
            canonical,
        } = inner;
        Self {
            get: Box::new(move |target: &T| get(project(target))),
            set: Box::new(move |target: &mut T, value: Value| set(project_mut(target), value)),
            canonical,
        }
    }
}

/// A persisted field of `T` with its resolved path and type tag
pub struct FieldDescriptor<T> {
    /// The field's own name
    pub name: &'static str,
    /// Name of the type that registered the field
    pub owner: &'static str,
    pub declared_type: DeclaredType,
    pub path: String,
    pub type_tag: TypeTag,
    pub comment: Vec<String>,
    pub(crate) accessor: Accessor<T>,
}

impl<T> FieldDescriptor<T> {
    /// Read the field's current value; `null` stands for "no value"
    pub fn read(&self, target: &T) -> Result<Value, AccessError> {
        (self.accessor.get)(target)
    }

    /// Assign a document value to the field
    pub fn write(&self, target: &mut T, value: Value) -> Result<(), AccessError> {
        (self.accessor.set)(target, value)
    }

    /// Decode the document value at this field's path into the form the
    /// getter would produce, or `None` if it is absent or unusable
    pub fn decode(&self, value: Option<&Value>) -> Option<Value> {
        let decoded = self.type_tag.decode(value)?;
        Some((self.accessor.canonical)(&decoded).unwrap_or(decoded))
    }
}

impl<T> std::fmt::Debug for FieldDescriptor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("owner", &self.owner)
            .field("declared_type", &self.declared_type)
            .field("path", &self.path)
            .field("type_tag", &self.type_tag)
            .field("comment", &self.comment)
            .finish_non_exhaustive()
    }
}
