//! Debug implementations for Value and the raw reference handles

use std::fmt;

use super::*;

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Char(c) => write!(f, "'{}'", c),

            Value::I32(n) => write!(f, "{}", n), // Default integer type
            Value::I64(n) => write!(f, "{}i64", n),
            Value::U32(n) => write!(f, "{}u32", n),
            Value::U64(n) => write!(f, "{}u64", n),

            Value::F32(n) => write!(f, "{}f32", n),
            Value::F64(n) => write!(f, "{}", n), // Default float type

            Value::String(s) => write!(f, "{:?}", s.as_ref()),

            Value::Object(o) => write!(f, "{:?}", o),
            Value::Sequence(s) => write!(f, "{:?}", s),
            Value::Dictionary(d) => write!(f, "{:?}", d),
            Value::Source(s) => write!(f, "{:?}", s),

            Value::ListProxy(p) => write!(f, "{:?}", p),
            Value::CollectionProxy(p) => write!(f, "{:?}", p),
            Value::EnumerableProxy(p) => write!(f, "{:?}", p),
            Value::DictionaryProxy(p) => write!(f, "{:?}", p),
        }
    }
}

/// Write `[a, b, c]`
pub(crate) fn write_items(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
    write!(f, "[")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{:?}", item)?;
    }
    write!(f, "]")
}

/// Write `{k: v, ...}`
pub(crate) fn write_entries(
    f: &mut fmt::Formatter<'_>,
    entries: &[(MapKey, Value)],
) -> fmt::Result {
    write!(f, "{{")?;
    for (i, (k, v)) in entries.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{:?}: {:?}", k.value(), v)?;
    }
    write!(f, "}}")
}

impl fmt::Debug for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind().name())?;
        write_items(f, &self.to_vec())
    }
}

impl fmt::Debug for Dictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_entries(f, &self.entries())
    }
}

impl fmt::Debug for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<source {}>", self.type_name())
    }
}
