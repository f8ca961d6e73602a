//! Collection proxies
//!
//! A proxy stands in for a collection-shaped property read through a
//! wrapper. It shares the wrapper's frozen cell, so freezing the owning
//! object also closes the collection to structural mutation, and it hands
//! out elements wrapped into the same lineage.
//!
//! When the source holds references, the proxy keeps a parallel list of
//! wrapped elements in lockstep with the source. Scalar sources need no
//! wrapping, and every operation goes straight to the source.

mod collection;
mod dictionary;
mod enumerable;
mod list;
mod shared;

pub use collection::CollectionProxy;
pub use dictionary::DictionaryProxy;
pub use enumerable::EnumerableProxy;
pub use list::ListProxy;

use tracing::debug;

use crate::cell::FrozenCell;
use crate::error::{PermafrostError, Result};
use crate::registry::PropertyKind;
use crate::value::{SeqKind, Value};
use crate::wrapper::Wrapper;

/// The property a proxy was read from, named in frozen-access errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Owner {
    /// The owning property
    pub property: &'static str,

    /// The type that declares the property
    pub type_name: &'static str,
}

impl Owner {
    /// Create an owner description
    pub fn new(property: &'static str, type_name: &'static str) -> Self {
        Self {
            property,
            type_name,
        }
    }

    /// Fail with `FrozenAccess` if `cell` is frozen
    pub(crate) fn ensure_thawed(&self, cell: &FrozenCell) -> Result<()> {
        if cell.is_frozen() {
            debug!(
                member = self.property,
                type_name = self.type_name,
                "rejected collection mutation on frozen instance"
            );
            return Err(PermafrostError::frozen(self.property, self.type_name));
        }
        Ok(())
    }
}

/// Wrap a value into the lineage of `cell`.
///
/// Objects get a wrapper; sequences get the proxy flavor the declared
/// `kind` asks for, falling back to the runtime shape for untyped
/// properties and collection elements. Scalars and values that already
/// carry the marker come back unchanged.
pub(crate) fn wrap_value(
    value: &Value,
    kind: PropertyKind,
    owner: &Owner,
    cell: &FrozenCell,
) -> Value {
    if !value.is_wrap_candidate() {
        return value.clone();
    }

    match value {
        Value::Object(o) => Value::Object(Wrapper::wrap(o, cell.clone())),
        Value::Sequence(s) => match kind {
            PropertyKind::List => Value::ListProxy(ListProxy::new(s.clone(), *owner, cell.clone())),
            PropertyKind::Collection => {
                Value::CollectionProxy(CollectionProxy::new(s.clone(), *owner, cell.clone()))
            }
            PropertyKind::Enumerable => {
                Value::EnumerableProxy(EnumerableProxy::new(s.clone(), *owner, cell.clone()))
            }
            _ => match s.kind() {
                SeqKind::Collection => {
                    Value::CollectionProxy(CollectionProxy::new(s.clone(), *owner, cell.clone()))
                }
                SeqKind::Array | SeqKind::List | SeqKind::ArrayList => {
                    Value::ListProxy(ListProxy::new(s.clone(), *owner, cell.clone()))
                }
            },
        },
        Value::Dictionary(d) => {
            Value::DictionaryProxy(DictionaryProxy::new(d.clone(), *owner, cell.clone()))
        }
        Value::Source(s) => {
            Value::EnumerableProxy(EnumerableProxy::from_source(s.clone(), *owner, cell.clone()))
        }
        other => other.clone(),
    }
}

/// Wrap a collection element: the runtime shape picks the proxy flavor.
pub(crate) fn wrap_element(value: &Value, owner: &Owner, cell: &FrozenCell) -> Value {
    wrap_value(value, PropertyKind::Any, owner, cell)
}

/// Whether `wrapped` is `raw` itself or was produced by wrapping `raw`
pub(crate) fn stands_for(wrapped: &Value, raw: &Value) -> bool {
    if wrapped == raw {
        return true;
    }
    match (wrapped, raw) {
        (Value::Object(o), Value::Object(r)) => o.wrapper().is_some_and(|w| w.target().ptr_eq(r)),
        (Value::ListProxy(p), Value::Sequence(s)) => p.source().ptr_eq(s),
        (Value::CollectionProxy(p), Value::Sequence(s)) => p.source().ptr_eq(s),
        (Value::EnumerableProxy(p), _) => p.source() == *raw,
        (Value::DictionaryProxy(p), Value::Dictionary(d)) => p.source().ptr_eq(d),
        _ => false,
    }
}
