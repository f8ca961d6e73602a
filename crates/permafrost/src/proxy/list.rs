//! Ordered list proxy

use std::fmt;
use std::rc::Rc;

use crate::cell::FrozenCell;
use crate::error::Result;
use crate::value::display::write_items;
use crate::value::{Sequence, Value};

use super::shared::SeqProxy;
use super::Owner;

/// Proxy for a list-shaped property read through a wrapper.
///
/// Reads hand out elements wrapped into the owner's lineage; positional
/// and structural writes fail with `FrozenAccess` once the lineage is
/// frozen.
///
/// # Example
///
/// ```
/// use permafrost::{freezer, Dto, Sequence, Value};
///
/// #[derive(Dto, Default)]
/// struct Tags {
///     names: Sequence,
/// }
///
/// let tags = freezer::wrap_new(Tags {
///     names: Sequence::list(vec![Value::from("a")]),
/// });
/// let names = tags.get("names").unwrap();
/// let names = names.as_list().unwrap();
///
/// names.push(Value::from("b")).unwrap();
/// tags.freeze().unwrap();
///
/// assert_eq!(names.len(), 2);
/// assert!(names.push(Value::from("c")).is_err());
/// ```
#[derive(Clone)]
pub struct ListProxy(Rc<SeqProxy>);

impl ListProxy {
    pub(crate) fn new(source: Sequence, owner: Owner, cell: FrozenCell) -> Self {
        ListProxy(Rc::new(SeqProxy::new(source, owner, cell)))
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
    pub fn ptr_eq(&self, other: &ListProxy) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the list is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the (wrapped) element at `index`
    pub fn get(&self, index: usize) -> Option<Value> {
        self.0.get(index)
    }

    /// Snapshot of the (wrapped) elements
    pub fn to_vec(&self) -> Vec<Value> {
        self.0.to_vec()
    }

    /// Iterate over a snapshot of the (wrapped) elements
    pub fn iter(&self) -> std::vec::IntoIter<Value> {
        self.to_vec().into_iter()
    }

    /// Replace the element at `index`
    pub fn set(&self, index: usize, value: impl Into<Value>) -> Result<()> {
        self.0.set(index, value.into())
    }

    /// Append an element
    pub fn push(&self, value: impl Into<Value>) -> Result<()> {
        self.0.push(value.into())
    }

    /// Insert an element at `index`
    pub fn insert(&self, index: usize, value: impl Into<Value>) -> Result<()> {
        self.0.insert(index, value.into())
    }

    /// Remove the element at `index`, returning it as it was handed out
    pub fn remove_at(&self, index: usize) -> Result<Value> {
        self.0.remove_at(index)
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
        self.index_of(value).is_some()
    }

    /// Position of the first matching element
    pub fn index_of(&self, value: &Value) -> Option<usize> {
        self.0.index_of(value)
    }
}

impl IntoIterator for &ListProxy {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Debug for ListProxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ListProxy")?;
        write_items(f, &self.to_vec())
    }
}
