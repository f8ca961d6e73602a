//! Set-like collection proxy

use std::fmt;
use std::rc::Rc;

use crate::cell::FrozenCell;
use crate::error::Result;
use crate::value::display::write_items;
use crate::value::{Sequence, Value};

use super::shared::SeqProxy;
use super::Owner;

/// Proxy for a collection-shaped property: add, remove, clear, contains.
#[derive(Clone)]
pub struct CollectionProxy(Rc<SeqProxy>);

impl CollectionProxy {
    pub(crate) fn new(source: Sequence, owner: Owner, cell: FrozenCell) -> Self {
        CollectionProxy(Rc::new(SeqProxy::new(source, owner, cell)))
    }

    /// The raw sequence behind this proxy
    pub fn source(&self) -> Sequence {
        self.0.source().clone()
    }

    /// The property this proxy was read from
    pub fn owner(&self) -> Owner {
        self.0.owner()
    }

    /// Whether the owning lineage is frozen
    pub fn is_frozen(&self) -> bool {
        self.0.is_frozen()
    }

    /// Check whether two handles are the same proxy
    pub fn ptr_eq(&self, other: &CollectionProxy) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the collection is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the (wrapped) elements
    pub fn to_vec(&self) -> Vec<Value> {
        self.0.to_vec()
    }

    /// Iterate over a snapshot of the (wrapped) elements
    pub fn iter(&self) -> std::vec::IntoIter<Value> {
        self.to_vec().into_iter()
    }

    /// Add an element
    pub fn add(&self, value: impl Into<Value>) -> Result<()> {
        self.0.push(value.into())
    }

    /// Remove the first matching element
    pub fn remove(&self, value: &Value) -> Result<bool> {
        self.0.remove(value)
    }

    /// Remove every element
    pub fn clear(&self) -> Result<()> {
        self.0.clear()
    }

    /// Check if a matching element is present
    pub fn contains(&self, value: &Value) -> bool {
        self.0.index_of(value).is_some()
    }
}

impl IntoIterator for &CollectionProxy {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Debug for CollectionProxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CollectionProxy")?;
        write_items(f, &self.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PermafrostError;

    #[test]
    fn test_add_remove_contains() {
        let source = Sequence::collection(vec![Value::string("foo")]);
        let cell = FrozenCell::new(false);
        let coll = CollectionProxy::new(source.clone(), Owner::new("names", "Bag"), cell.clone());

        coll.add("bar").unwrap();
        assert!(coll.contains(&Value::string("bar")));
        assert!(coll.remove(&Value::string("foo")).unwrap());
        assert!(!coll.remove(&Value::string("foo")).unwrap());
        assert_eq!(source.to_vec(), vec![Value::string("bar")]);

        cell.freeze();
        assert_eq!(coll.add("baz"), Err(PermafrostError::frozen("names", "Bag")));
        assert_eq!(coll.clear(), Err(PermafrostError::frozen("names", "Bag")));
        assert_eq!(coll.iter().collect::<Vec<_>>(), vec![Value::string("bar")]);
    }
}
