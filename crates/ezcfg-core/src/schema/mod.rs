//! Declaration surface and field discovery
//!
//! A persisted type implements [`Persisted`] and registers its fields on a
//! [`FieldSet`]. [`discover`] turns the registrations into an ordered list of
//! [`FieldDescriptor`]s, resolving each field's path and [`TypeTag`].
//!
//! [`TypeTag`]: crate::TypeTag

mod annotation;
mod declared;
mod descriptor;
mod discovery;

pub use annotation::{CfgField, TypeSelection};
pub use declared::{DeclaredType, FieldType};
pub use descriptor::FieldDescriptor;
pub use discovery::{Discovered, FieldSet, Persisted, discover};
