use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};

use serde::{Serialize, de::DeserializeOwned};

/// Static description of a field's Rust type, used to infer its
/// [`TypeTag`](crate::TypeTag)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclaredType {
    Bool,
    Integer {
        signed: bool,
        bits: u8,
    },
    Float {
        bits: u8,
    },
    Text,
    Sequence(Box<DeclaredType>),
    /// String-keyed mapping with the given value type
    Mapping(Box<DeclaredType>),
    Enum {
        name: &'static str,
        variants: &'static [&'static str],
    },
    Optional(Box<DeclaredType>),
    /// Any type without a built-in strategy; carries the type name
    Other(&'static str),
}

impl DeclaredType {
    /// Whether the type holds `f32` values, directly or as elements
    pub fn has_single_precision(&self) -> bool {
        match self {
            Self::Float { bits } => *bits == 32,
            Self::Sequence(inner) | Self::Mapping(inner) | Self::Optional(inner) => {
                inner.has_single_precision()
            }
            _ => false,
        }
    }
}

impl std::fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool => f.write_str("bool"),
            Self::Integer { signed, bits } => write!(f, "{}{bits}", if *signed { 'i' } else { 'u' }),
            Self::Float { bits } => write!(f, "f{bits}"),
            Self::Text => f.write_str("String"),
            Self::Sequence(inner) => write!(f, "Vec<{inner}>"),
            Self::Mapping(inner) => write!(f, "Map<String, {inner}>"),
            Self::Enum { name, .. } | Self::Other(name) => f.write_str(name),
            Self::Optional(inner) => write!(f, "Option<{inner}>"),
        }
    }
}

/// A type that can be stored in a persisted field.
///
/// Values travel to and from the document through serde. Enumerations
/// implement this by listing their serialized variant names:
///
/// ```
/// use ezcfg_core::{DeclaredType, FieldType};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// enum Difficulty {
///     Easy,
///     Hard,
/// }
///
/// impl FieldType for Difficulty {
///     fn declared_type() -> DeclaredType {
///         DeclaredType::Enum {
///             name: "Difficulty",
///             variants: &["Easy", "Hard"],
///         }
///     }
/// }
/// ```
pub trait FieldType: Serialize + DeserializeOwned {
    fn declared_type() -> DeclaredType;
}

macro_rules! integer_field_type {
    ($($ty:ty => $signed:expr),* $(,)?) => {
        $(
            impl FieldType for $ty {
                fn declared_type() -> DeclaredType {
                    DeclaredType::Integer {
                        signed: $signed,
                        bits: <$ty>::BITS as u8,
                    }
                }
            }
        )*
    };
}

integer_field_type! {
    i8 => true, i16 => true, i32 => true, i64 => true, isize => true,
    u8 => false, u16 => false, u32 => false, u64 => false, usize => false,
}

impl FieldType for bool {
    fn declared_type() -> DeclaredType {
        DeclaredType::Bool
    }
}

impl FieldType for f32 {
    fn declared_type() -> DeclaredType {
        DeclaredType::Float { bits: 32 }
    }
}

impl FieldType for f64 {
    fn declared_type() -> DeclaredType {
        DeclaredType::Float { bits: 64 }
    }
}

impl FieldType for String {
    fn declared_type() -> DeclaredType {
        DeclaredType::Text
    }
}

impl FieldType for char {
    fn declared_type() -> DeclaredType {
        DeclaredType::Text
    }
}

impl<T: FieldType> FieldType for Option<T> {
    fn declared_type() -> DeclaredType {
        DeclaredType::Optional(Box::new(T::declared_type()))
    }
}

impl<T: FieldType> FieldType for Vec<T> {
    fn declared_type() -> DeclaredType {
        DeclaredType::Sequence(Box::new(T::declared_type()))
    }
}

impl<T: FieldType> FieldType for VecDeque<T> {
    fn declared_type() -> DeclaredType {
        DeclaredType::Sequence(Box::new(T::declared_type()))
    }
}

impl<T: FieldType + Ord> FieldType for BTreeSet<T> {
    fn declared_type() -> DeclaredType {
        DeclaredType::Sequence(Box::new(T::declared_type()))
    }
}

impl<T: FieldType + Eq + std::hash::Hash> FieldType for HashSet<T> {
    fn declared_type() -> DeclaredType {
        DeclaredType::Sequence(Box::new(T::declared_type()))
    }
}

impl<V: FieldType> FieldType for BTreeMap<String, V> {
    fn declared_type() -> DeclaredType {
        DeclaredType::Mapping(Box::new(V::declared_type()))
    }
}

impl<V: FieldType> FieldType for HashMap<String, V> {
    fn declared_type() -> DeclaredType {
        DeclaredType::Mapping(Box::new(V::declared_type()))
    }
}
