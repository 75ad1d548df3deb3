//! Serialization strategies and their resolution from declared types
//!
//! A [`TypeTag`] decides how a document value is read for a field: which
//! shapes are accepted and how scalars are coerced. Tags are either declared
//! explicitly on a field or inferred from its [`DeclaredType`].

use serde_json::{Number, Value};

use crate::schema::{DeclaredType, TypeSelection};

/// Serialization strategy for one field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeTag {
    Boolean,
    /// Integral values within the 32-bit signed range
    Integer,
    /// Integral values within the 64-bit range
    Long,
    Float,
    Double,
    /// Strings; other scalars are stringified
    String,
    List,
    Map,
    /// Strings naming one of the variants; an empty list accepts any string
    Enum(&'static [&'static str]),
}

impl TypeTag {
    /// Infer the narrowest strategy for a declared type.
    ///
    /// Returns `None` when no built-in strategy matches.
    pub fn infer(declared: &DeclaredType) -> Option<Self> {
        match declared {
            DeclaredType::Bool => Some(Self::Boolean),
            DeclaredType::Integer { signed: true, bits } if *bits <= 32 => Some(Self::Integer),
            DeclaredType::Integer { signed: false, bits } if *bits < 32 => Some(Self::Integer),
            DeclaredType::Integer { .. } => Some(Self::Long),
            DeclaredType::Float { bits } if *bits <= 32 => Some(Self::Float),
            DeclaredType::Float { .. } => Some(Self::Double),
            DeclaredType::Text => Some(Self::String),
            DeclaredType::Sequence(_) => Some(Self::List),
            DeclaredType::Mapping(_) => Some(Self::Map),
            DeclaredType::Enum { variants, .. } => Some(Self::Enum(variants)),
            DeclaredType::Optional(inner) => Self::infer(inner),
            DeclaredType::Other(_) => None,
        }
    }

    /// Resolve the tag for a field: an explicit selection is used verbatim,
    /// `Auto` infers from the declared type.
    pub fn resolve(declared: &DeclaredType, selection: &TypeSelection) -> Option<Self> {
        match selection {
            TypeSelection::Explicit(tag) => Some(*tag),
            TypeSelection::Auto => Self::infer(declared),
        }
    }

    /// Decode a document value with no default.
    ///
    /// `None` means the value is absent, `null`, or not convertible to this
    /// tag; callers cannot tell those apart and treat all of them as absent.
    pub fn decode(&self, value: Option<&Value>) -> Option<Value> {
        let value = value.filter(|v| !v.is_null())?;

        match self {
            Self::Boolean => value.as_bool().map(Value::Bool),
            Self::Integer => integral(value).filter(|n| {
                n.as_i64()
                    .is_some_and(|i| i >= i64::from(i32::MIN) && i <= i64::from(i32::MAX))
            }),
            Self::Long => integral(value),
            Self::Float | Self::Double => value.is_number().then(|| value.clone()),
            Self::String => match value {
                Value::String(_) => Some(value.clone()),
                Value::Bool(b) => Some(Value::String(b.to_string())),
                Value::Number(n) => Some(Value::String(n.to_string())),
                _ => None,
            },
            Self::List => value.is_array().then(|| value.clone()),
            Self::Map => value.is_object().then(|| value.clone()),
            Self::Enum(variants) => value
                .as_str()
                .filter(|s| variants.is_empty() || variants.contains(s))
                .map(Value::from),
        }
    }
}

impl std::fmt::Display for TypeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::String => "string",
            Self::List => "list",
            Self::Map => "map",
            Self::Enum(_) => "enum",
        };
        f.write_str(name)
    }
}

/// Integral numbers, including floats without a fractional part.
fn integral(value: &Value) -> Option<Value> {
    let Value::Number(n) = value else {
        return None;
    };
    if n.is_i64() || n.is_u64() {
        return Some(value.clone());
    }
    let f = n.as_f64()?;
    if f.fract() != 0.0 || f < i64::MIN as f64 || f >= i64::MAX as f64 {
        return None;
    }
    Some(Value::Number(Number::from(f as i64)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_absent_and_null() {
        assert_eq!(TypeTag::String.decode(None), None);
        assert_eq!(TypeTag::String.decode(Some(&Value::Null)), None);
    }

    #[test]
    fn test_integer_accepts_integral_float() {
        assert_eq!(TypeTag::Integer.decode(Some(&json!(3.0))), Some(json!(3)));
        assert_eq!(TypeTag::Integer.decode(Some(&json!(3.5))), None);
    }

    #[test]
    fn test_integer_range() {
        assert_eq!(TypeTag::Integer.decode(Some(&json!(3_000_000_000_i64))), None);
        assert_eq!(
            TypeTag::Long.decode(Some(&json!(3_000_000_000_i64))),
            Some(json!(3_000_000_000_i64))
        );
    }

    #[test]
    fn test_string_stringifies_scalars() {
        assert_eq!(TypeTag::String.decode(Some(&json!(true))), Some(json!("true")));
        assert_eq!(TypeTag::String.decode(Some(&json!(5))), Some(json!("5")));
        assert_eq!(TypeTag::String.decode(Some(&json!([1]))), None);
    }

    #[test]
    fn test_enum_variants() {
        let tag = TypeTag::Enum(&["Fast", "Slow"]);
        assert_eq!(tag.decode(Some(&json!("Fast"))), Some(json!("Fast")));
        assert_eq!(tag.decode(Some(&json!("fast"))), None);
        assert_eq!(TypeTag::Enum(&[]).decode(Some(&json!("x"))), Some(json!("x")));
    }
}
