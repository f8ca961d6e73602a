//! Conversions between Rust field types and `Value`

use std::rc::Rc;

use super::{Dictionary, Sequence, Source, Value};
use crate::error::{PermafrostError, Result};
use crate::object::Object;
use crate::registry::PropertyKind;

/// A Rust type that can back a DTO property.
///
/// `#[derive(Dto)]` calls `to_value` in generated getters, `from_value` in
/// generated setters, and reads `KIND` to describe the property.
pub trait FieldValue: Sized {
    /// Declared shape of a property of this type
    const KIND: PropertyKind;

    /// Read the field as a value
    fn to_value(&self) -> Value;

    /// Convert an assigned value back into the field type
    fn from_value(value: Value) -> Result<Self>;
}

macro_rules! scalar_field {
    ($ty:ty, $variant:ident, $name:literal) => {
        impl FieldValue for $ty {
            const KIND: PropertyKind = PropertyKind::Scalar;

            fn to_value(&self) -> Value {
                Value::$variant(*self)
            }

            fn from_value(value: Value) -> Result<Self> {
                match value {
                    Value::$variant(v) => Ok(v),
                    other => Err(PermafrostError::mismatch($name, other.type_name())),
                }
            }
        }
    };
}

scalar_field!(bool, Bool, "bool");
scalar_field!(char, Char, "char");
scalar_field!(i32, I32, "i32");
scalar_field!(i64, I64, "i64");
scalar_field!(u32, U32, "u32");
scalar_field!(u64, U64, "u64");
scalar_field!(f32, F32, "f32");
scalar_field!(f64, F64, "f64");

impl FieldValue for String {
    const KIND: PropertyKind = PropertyKind::Scalar;

    fn to_value(&self) -> Value {
        Value::string(self)
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::String(s) => Ok(s.to_string()),
            other => Err(PermafrostError::mismatch("String", other.type_name())),
        }
    }
}

impl FieldValue for Rc<str> {
    const KIND: PropertyKind = PropertyKind::Scalar;

    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(PermafrostError::mismatch("String", other.type_name())),
        }
    }
}

impl FieldValue for Object {
    const KIND: PropertyKind = PropertyKind::Object;

    fn to_value(&self) -> Value {
        Value::Object(self.clone())
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(o) => Ok(o),
            other => Err(PermafrostError::mismatch("object", other.type_name())),
        }
    }
}

/// Proxies assigned to a sequence field store their source; the wrapper
/// keeps the proxy itself.
impl FieldValue for Sequence {
    const KIND: PropertyKind = PropertyKind::List;

    fn to_value(&self) -> Value {
        Value::Sequence(self.clone())
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Sequence(s) => Ok(s),
            Value::ListProxy(p) => Ok(p.source()),
            Value::CollectionProxy(p) => Ok(p.source()),
            Value::EnumerableProxy(p) => p
                .source_sequence()
                .ok_or_else(|| PermafrostError::mismatch("sequence", "EnumerableProxy")),
            other => Err(PermafrostError::mismatch("sequence", other.type_name())),
        }
    }
}

impl FieldValue for Dictionary {
    const KIND: PropertyKind = PropertyKind::Dictionary;

    fn to_value(&self) -> Value {
        Value::Dictionary(self.clone())
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Dictionary(d) => Ok(d),
            Value::DictionaryProxy(p) => Ok(p.source()),
            other => Err(PermafrostError::mismatch("dictionary", other.type_name())),
        }
    }
}

impl FieldValue for Source {
    const KIND: PropertyKind = PropertyKind::Enumerable;

    fn to_value(&self) -> Value {
        Value::Source(self.clone())
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Source(s) => Ok(s),
            Value::EnumerableProxy(p) => p
                .source_stream()
                .ok_or_else(|| PermafrostError::mismatch("source", "EnumerableProxy")),
            other => Err(PermafrostError::mismatch("source", other.type_name())),
        }
    }
}

/// An untyped field holds whatever it is given.
impl FieldValue for Value {
    const KIND: PropertyKind = PropertyKind::Any;

    fn to_value(&self) -> Value {
        self.clone()
    }

    fn from_value(value: Value) -> Result<Self> {
        Ok(value)
    }
}

/// `None` is the null reference.
impl<T: FieldValue> FieldValue for Option<T> {
    const KIND: PropertyKind = T::KIND;

    fn to_value(&self) -> Value {
        match self {
            Some(v) => v.to_value(),
            None => Value::Null,
        }
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}
