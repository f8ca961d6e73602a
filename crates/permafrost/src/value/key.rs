//! Hashable wrapper for Value to enable use as dictionary keys

use std::hash::{Hash, Hasher};

use super::Value;
use crate::error::{PermafrostError, Result};

/// A dictionary key: a `Value` that implements Hash and Eq.
///
/// Only booleans, chars, integers and text can be used as keys.
/// Construction from any other value fails instead of panicking later.
#[derive(Debug, Clone)]
pub struct MapKey(Value);

impl MapKey {
    /// Create a key, rejecting values that cannot be hashed
    pub fn new(value: impl Into<Value>) -> Result<Self> {
        let value = value.into();
        if Self::is_hashable(&value) {
            Ok(MapKey(value))
        } else {
            Err(PermafrostError::mismatch("hashable key", value.type_name()))
        }
    }

    /// Check if a value can be hashed
    pub fn is_hashable(value: &Value) -> bool {
        matches!(
            value,
            Value::Bool(_)
                | Value::Char(_)
                | Value::I32(_)
                | Value::I64(_)
                | Value::U32(_)
                | Value::U64(_)
                | Value::String(_)
        )
    }

    /// The key as a value
    pub fn value(&self) -> &Value {
        &self.0
    }

    /// Consume the key, returning its value
    pub fn into_value(self) -> Value {
        self.0
    }
}

impl Hash for MapKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Hash the discriminant first
        std::mem::discriminant(&self.0).hash(state);

        match &self.0 {
            Value::Bool(b) => b.hash(state),
            Value::Char(c) => c.hash(state),
            Value::I32(n) => n.hash(state),
            Value::I64(n) => n.hash(state),
            Value::U32(n) => n.hash(state),
            Value::U64(n) => n.hash(state),
            Value::String(s) => s.hash(state),
            // Unreachable: the constructor only admits hashable values
            _ => {}
        }
    }
}

impl PartialEq for MapKey {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for MapKey {}

impl From<&str> for MapKey {
    fn from(s: &str) -> Self {
        MapKey(Value::string(s))
    }
}

impl From<String> for MapKey {
    fn from(s: String) -> Self {
        MapKey(Value::string(s))
    }
}

impl From<i32> for MapKey {
    fn from(n: i32) -> Self {
        MapKey(Value::I32(n))
    }
}

impl From<i64> for MapKey {
    fn from(n: i64) -> Self {
        MapKey(Value::I64(n))
    }
}
