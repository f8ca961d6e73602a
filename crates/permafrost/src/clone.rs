//! Deep-clone engine
//!
//! Produces structurally independent copies by dispatching on the shape of
//! each value:
//!
//! | Shape | Copy |
//! |---|---|
//! | scalar, text | by value |
//! | object | default-construct, then copy every readable+writable property |
//! | `Array` | `Array` |
//! | `List`, `Collection` | `Array` (normalized) |
//! | `ArrayList` | `ArrayList` |
//! | dictionary | dictionary, keys and values cloned |
//! | proxy | clone of the proxy's source |
//! | source | `UnsupportedType` |
//!
//! Lists and collections come back as arrays because there is no generic
//! way to build "an empty instance of this exact list type"; the elements,
//! element kind and order are preserved.
//!
//! Cycles are not detected: cloning a cyclic graph recurses without bound.

use std::collections::HashSet;

use tracing::debug;

use crate::dto::Dto;
use crate::error::{PermafrostError, Result};
use crate::object::Object;
use crate::value::{Dictionary, SeqKind, Sequence, Value};

/// Deep-clone configuration and entry point.
///
/// # Example
///
/// ```
/// use permafrost::{DeepCloner, Value};
///
/// let source = Value::list(vec![Value::I32(1), Value::I32(2)]);
/// let copy = DeepCloner::new().clone_value(&source).unwrap();
///
/// assert_ne!(source, copy); // distinct identity
/// assert_eq!(copy.as_sequence().unwrap().to_vec(), vec![Value::I32(1), Value::I32(2)]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DeepCloner {
    ignore: HashSet<String>,
}

impl DeepCloner {
    /// Create a cloner that copies every property
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cloner that skips the named properties on every object
    pub fn ignoring<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ignore: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Skip a property on every object (builder pattern)
    pub fn ignore(mut self, name: impl Into<String>) -> Self {
        self.ignore.insert(name.into());
        self
    }

    /// Check whether a property is skipped
    pub fn is_ignored(&self, name: &str) -> bool {
        self.ignore.contains(name)
    }

    /// Clone any value
    pub fn clone_value(&self, value: &Value) -> Result<Value> {
        match value {
            Value::Object(o) => self.clone_object(o).map(Value::Object),
            Value::Sequence(s) => self.clone_sequence(s).map(Value::Sequence),
            Value::Dictionary(d) => self.clone_dictionary(d).map(Value::Dictionary),
            Value::ListProxy(p) => self.clone_sequence(&p.source()).map(Value::Sequence),
            Value::CollectionProxy(p) => self.clone_sequence(&p.source()).map(Value::Sequence),
            Value::EnumerableProxy(p) => self.clone_value(&p.source()),
            Value::DictionaryProxy(p) => {
                self.clone_dictionary(&p.source()).map(Value::Dictionary)
            }
            Value::Source(s) => Err(PermafrostError::UnsupportedType {
                type_name: s.type_name().to_string(),
            }),
            scalar => Ok(scalar.clone()),
        }
    }

    /// Clone an object into a new plain object.
    ///
    /// Wrapped objects are cloned through to their underlying instance.
    pub fn clone_object(&self, object: &Object) -> Result<Object> {
        let copy = object.with_dto(|dto| self.clone_dto(dto))??;
        Ok(Object::from_boxed(copy))
    }

    /// Clone a DTO instance
    pub fn clone_dto(&self, dto: &dyn Dto) -> Result<Box<dyn Dto>> {
        let info = dto.type_info();
        debug!(type_name = info.name, "deep-cloning instance");

        let mut copy = info.create();
        for property in info.copyable() {
            if self.is_ignored(property.name) {
                continue;
            }
            let value = dto.get(property.name)?;
            copy.set(property.name, self.clone_value(&value)?)?;
        }
        Ok(copy)
    }

    fn clone_sequence(&self, sequence: &Sequence) -> Result<Sequence> {
        let items = sequence
            .to_vec()
            .iter()
            .map(|item| self.clone_value(item))
            .collect::<Result<Vec<_>>>()?;

        let kind = match sequence.kind() {
            SeqKind::ArrayList => SeqKind::ArrayList,
            SeqKind::Array | SeqKind::List | SeqKind::Collection => SeqKind::Array,
        };
        Ok(Sequence::new(kind, items).with_element(sequence.element()))
    }

    fn clone_dictionary(&self, dictionary: &Dictionary) -> Result<Dictionary> {
        let copy = Dictionary::new();
        for (key, value) in dictionary.entries() {
            // Keys are hashable scalars, so a plain clone is already deep
            copy.insert(key, self.clone_value(&value)?);
        }
        Ok(copy)
    }
}

/// Deep-clone a value with default options
pub fn deep_clone(value: &Value) -> Result<Value> {
    DeepCloner::new().clone_value(value)
}

/// Deep-clone an object with default options
pub fn deep_clone_object(object: &Object) -> Result<Object> {
    DeepCloner::new().clone_object(object)
}
