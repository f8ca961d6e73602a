//! Value trait implementations: constructors, predicates, extractors, From traits, PartialEq

use std::rc::Rc;

use super::*;
use crate::dto::Dto;

// ═══════════════════════════════════════════════════════════════════
// Convenience Constructors
// ═══════════════════════════════════════════════════════════════════

impl Value {
    /// Create a string value
    pub fn string(s: impl AsRef<str>) -> Self {
        Value::String(Rc::from(s.as_ref()))
    }

    /// Create an object value around a plain DTO
    pub fn object<T: Dto>(dto: T) -> Self {
        Value::Object(Object::new(dto))
    }

    /// Create a fixed-size array value
    pub fn array(items: Vec<Value>) -> Self {
        Value::Sequence(Sequence::array(items))
    }

    /// Create an ordered list value
    pub fn list(items: Vec<Value>) -> Self {
        Value::Sequence(Sequence::list(items))
    }

    /// Create a set-like collection value
    pub fn collection(items: Vec<Value>) -> Self {
        Value::Sequence(Sequence::collection(items))
    }

    /// Create an untyped dynamic sequence value
    pub fn array_list(items: Vec<Value>) -> Self {
        Value::Sequence(Sequence::array_list(items))
    }

    // ═══════════════════════════════════════════════════════════════════
    // Type Predicates
    // ═══════════════════════════════════════════════════════════════════

    /// Check if value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if value is scalar-like (copied by value, never wrapped).
    ///
    /// `Null` counts as scalar-like: there is nothing to wrap.
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            Value::Null
                | Value::Bool(_)
                | Value::Char(_)
                | Value::I32(_)
                | Value::I64(_)
                | Value::U32(_)
                | Value::U64(_)
                | Value::F32(_)
                | Value::F64(_)
                | Value::String(_)
        )
    }

    /// Check if value carries the wrapped marker (wrapped object or proxy)
    pub fn is_wrapped(&self) -> bool {
        match self {
            Value::Object(o) => o.is_wrapped(),
            Value::ListProxy(_)
            | Value::CollectionProxy(_)
            | Value::EnumerableProxy(_)
            | Value::DictionaryProxy(_) => true,
            _ => false,
        }
    }

    /// Check if value is a reference that still needs wrapping
    pub fn is_wrap_candidate(&self) -> bool {
        !self.is_scalar() && !self.is_wrapped()
    }

    // ═══════════════════════════════════════════════════════════════════
    // Extractors (return Option for safe access)
    // ═══════════════════════════════════════════════════════════════════

    /// Extract boolean value
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Extract as i64 (converts from narrower integer types)
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::I32(n) => Some(*n as i64),
            Value::I64(n) => Some(*n),
            Value::U32(n) => Some(*n as i64),
            Value::U64(n) => (*n).try_into().ok(),
            _ => None,
        }
    }

    /// Extract as f64 (converts from f32)
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::F32(n) => Some(*n as f64),
            Value::F64(n) => Some(*n),
            _ => None,
        }
    }

    /// Extract string slice
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Extract object handle
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Extract raw sequence handle
    pub fn as_sequence(&self) -> Option<&Sequence> {
        match self {
            Value::Sequence(s) => Some(s),
            _ => None,
        }
    }

    /// Extract raw dictionary handle
    pub fn as_dictionary(&self) -> Option<&Dictionary> {
        match self {
            Value::Dictionary(d) => Some(d),
            _ => None,
        }
    }

    /// Extract list proxy
    pub fn as_list(&self) -> Option<&ListProxy> {
        match self {
            Value::ListProxy(p) => Some(p),
            _ => None,
        }
    }

    /// Extract collection proxy
    pub fn as_collection(&self) -> Option<&CollectionProxy> {
        match self {
            Value::CollectionProxy(p) => Some(p),
            _ => None,
        }
    }

    /// Extract enumerable proxy
    pub fn as_enumerable(&self) -> Option<&EnumerableProxy> {
        match self {
            Value::EnumerableProxy(p) => Some(p),
            _ => None,
        }
    }

    /// Extract dictionary proxy
    pub fn as_dictionary_proxy(&self) -> Option<&DictionaryProxy> {
        match self {
            Value::DictionaryProxy(p) => Some(p),
            _ => None,
        }
    }

    /// Human-readable type name, used in diagnostics.
    pub fn type_name(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Bool(_) => "bool".to_string(),
            Value::Char(_) => "char".to_string(),
            Value::I32(_) => "i32".to_string(),
            Value::I64(_) => "i64".to_string(),
            Value::U32(_) => "u32".to_string(),
            Value::U64(_) => "u64".to_string(),
            Value::F32(_) => "f32".to_string(),
            Value::F64(_) => "f64".to_string(),
            Value::String(_) => "String".to_string(),
            Value::Object(o) => o.type_name().to_string(),
            Value::Sequence(s) => s.kind().name().to_string(),
            Value::Dictionary(_) => "Dictionary".to_string(),
            Value::Source(s) => s.type_name().to_string(),
            Value::ListProxy(_) => "ListProxy".to_string(),
            Value::CollectionProxy(_) => "CollectionProxy".to_string(),
            Value::EnumerableProxy(_) => "EnumerableProxy".to_string(),
            Value::DictionaryProxy(_) => "DictionaryProxy".to_string(),
        }
    }
}

/// The null reference
impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

// ═══════════════════════════════════════════════════════════════════
// PartialEq Implementation
// ═══════════════════════════════════════════════════════════════════

/// Scalars compare by value; every reference variant compares by identity.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::I32(a), Value::I32(b)) => a == b,
            (Value::I64(a), Value::I64(b)) => a == b,
            (Value::U32(a), Value::U32(b)) => a == b,
            (Value::U64(a), Value::U64(b)) => a == b,
            (Value::F32(a), Value::F32(b)) => a == b,
            (Value::F64(a), Value::F64(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            (Value::Sequence(a), Value::Sequence(b)) => a.ptr_eq(b),
            (Value::Dictionary(a), Value::Dictionary(b)) => a.ptr_eq(b),
            (Value::Source(a), Value::Source(b)) => a.ptr_eq(b),
            (Value::ListProxy(a), Value::ListProxy(b)) => a.ptr_eq(b),
            (Value::CollectionProxy(a), Value::CollectionProxy(b)) => a.ptr_eq(b),
            (Value::EnumerableProxy(a), Value::EnumerableProxy(b)) => a.ptr_eq(b),
            (Value::DictionaryProxy(a), Value::DictionaryProxy(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// From Implementations
// ═══════════════════════════════════════════════════════════════════

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Char(c)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::I32(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::I64(n)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::U32(n)
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::U64(n)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::F32(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::F64(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl From<Object> for Value {
    fn from(o: Object) -> Self {
        Value::Object(o)
    }
}

impl From<&Object> for Value {
    fn from(o: &Object) -> Self {
        Value::Object(o.clone())
    }
}

impl From<Sequence> for Value {
    fn from(s: Sequence) -> Self {
        Value::Sequence(s)
    }
}

impl From<Dictionary> for Value {
    fn from(d: Dictionary) -> Self {
        Value::Dictionary(d)
    }
}

impl From<Source> for Value {
    fn from(s: Source) -> Self {
        Value::Source(s)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Value::Null)
    }
}
