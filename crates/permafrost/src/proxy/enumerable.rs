//! Read-only enumerable proxy

use std::fmt;
use std::rc::Rc;

use crate::cell::FrozenCell;
use crate::value::display::write_items;
use crate::value::{ElementKind, Sequence, Source, Value};

use super::{wrap_element, Owner};

/// Proxy for an enumerable-shaped property.
///
/// The elements are fixed when the proxy is created: reference elements are
/// wrapped once and the same handles are returned on every enumeration.
/// Scalar elements are read live from the origin.
#[derive(Clone)]
pub struct EnumerableProxy(Rc<EnumerableData>);

struct EnumerableData {
    origin: Origin,

    /// Wrapped snapshot, present iff the elements are references
    wrapped: Option<Vec<Value>>,

    owner: Owner,

    cell: FrozenCell,
}

enum Origin {
    Sequence(Sequence),
    Source(Source),
}

impl EnumerableProxy {
    pub(crate) fn new(source: Sequence, owner: Owner, cell: FrozenCell) -> Self {
        let wrapped = match source.element() {
            ElementKind::Scalar => None,
            ElementKind::Reference => Some(source.to_vec()),
        };
        Self::build(Origin::Sequence(source), wrapped, owner, cell)
    }

    pub(crate) fn from_source(source: Source, owner: Owner, cell: FrozenCell) -> Self {
        let values = source.values();
        let wrapped = match ElementKind::infer(&values) {
            ElementKind::Scalar => None,
            ElementKind::Reference => Some(values),
        };
        Self::build(Origin::Source(source), wrapped, owner, cell)
    }

    fn build(origin: Origin, raw: Option<Vec<Value>>, owner: Owner, cell: FrozenCell) -> Self {
        let wrapped = raw.map(|items| {
            items
                .iter()
                .map(|item| wrap_element(item, &owner, &cell))
                .collect()
        });
        EnumerableProxy(Rc::new(EnumerableData {
            origin,
            wrapped,
            owner,
            cell,
        }))
    }

    /// The raw origin: a `Value::Sequence` or a `Value::Source`
    pub fn source(&self) -> Value {
        match &self.0.origin {
            Origin::Sequence(s) => Value::Sequence(s.clone()),
            Origin::Source(s) => Value::Source(s.clone()),
        }
    }

    /// The raw sequence behind this proxy, if it came from one
    pub fn source_sequence(&self) -> Option<Sequence> {
        match &self.0.origin {
            Origin::Sequence(s) => Some(s.clone()),
            Origin::Source(_) => None,
        }
    }

    /// The raw value source behind this proxy, if it came from one
    pub fn source_stream(&self) -> Option<Source> {
        match &self.0.origin {
            Origin::Source(s) => Some(s.clone()),
            Origin::Sequence(_) => None,
        }
    }

    /// The property this proxy was read from
    pub fn owner(&self) -> Owner {
        self.0.owner
    }

    /// Whether the owning lineage is frozen
    pub fn is_frozen(&self) -> bool {
        self.0.cell.is_frozen()
    }

    /// Check whether two handles are the same proxy
    pub fn ptr_eq(&self, other: &EnumerableProxy) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// The (wrapped) elements
    pub fn to_vec(&self) -> Vec<Value> {
        match (&self.0.wrapped, &self.0.origin) {
            (Some(wrapped), _) => wrapped.clone(),
            (None, Origin::Sequence(s)) => s.to_vec(),
            (None, Origin::Source(s)) => s.values(),
        }
    }

    /// Iterate over the (wrapped) elements
    pub fn iter(&self) -> std::vec::IntoIter<Value> {
        self.to_vec().into_iter()
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        match (&self.0.wrapped, &self.0.origin) {
            (Some(wrapped), _) => wrapped.len(),
            (None, Origin::Sequence(s)) => s.len(),
            (None, Origin::Source(s)) => s.values().len(),
        }
    }

    /// Check if there are no elements
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The first element
    pub fn first(&self) -> Option<Value> {
        self.iter().next()
    }
}

impl IntoIterator for &EnumerableProxy {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Debug for EnumerableProxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EnumerableProxy")?;
        write_items(f, &self.to_vec())
    }
}
