//! Shared sequence handle: arrays, lists, collections and untyped sequences

use std::cell::RefCell;
use std::rc::Rc;

use super::Value;
use crate::error::{PermafrostError, Result};

/// The concrete kind of a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeqKind {
    /// Fixed-length array: elements can be replaced, never added or removed
    Array,

    /// Ordered list with positional access
    List,

    /// Set-like collection without a positional contract
    Collection,

    /// Untyped dynamic sequence
    ArrayList,
}

impl SeqKind {
    /// Human-readable name of the kind
    pub fn name(self) -> &'static str {
        match self {
            SeqKind::Array => "Array",
            SeqKind::List => "List",
            SeqKind::Collection => "Collection",
            SeqKind::ArrayList => "ArrayList",
        }
    }
}

/// Whether the elements of a sequence are wrap-candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// Scalar-like elements only; proxies delegate straight to the source
    Scalar,

    /// Elements may be references and are wrapped by proxies
    Reference,
}

impl ElementKind {
    /// Infer the element kind from initial items.
    ///
    /// A non-empty sequence of scalars is `Scalar`; anything else
    /// (including an empty sequence) is `Reference`.
    pub fn infer(items: &[Value]) -> Self {
        if !items.is_empty() && items.iter().all(Value::is_scalar) {
            ElementKind::Scalar
        } else {
            ElementKind::Reference
        }
    }
}

#[derive(Debug)]
struct SeqData {
    kind: SeqKind,
    element: ElementKind,
    items: Vec<Value>,
}

/// A shared, mutable sequence with reference identity.
///
/// Cloning the handle shares the underlying storage; use
/// [`crate::deep_clone`] for an independent copy.
#[derive(Clone)]
pub struct Sequence(Rc<RefCell<SeqData>>);

impl Sequence {
    /// Create a sequence of the given kind, inferring the element kind.
    pub fn new(kind: SeqKind, items: Vec<Value>) -> Self {
        let element = ElementKind::infer(&items);
        Self(Rc::new(RefCell::new(SeqData {
            kind,
            element,
            items,
        })))
    }

    /// Create a fixed-size array
    pub fn array(items: Vec<Value>) -> Self {
        Self::new(SeqKind::Array, items)
    }

    /// Create an ordered list
    pub fn list(items: Vec<Value>) -> Self {
        Self::new(SeqKind::List, items)
    }

    /// Create a set-like collection
    pub fn collection(items: Vec<Value>) -> Self {
        Self::new(SeqKind::Collection, items)
    }

    /// Create an untyped dynamic sequence (always `Reference` elements)
    pub fn array_list(items: Vec<Value>) -> Self {
        Self::new(SeqKind::ArrayList, items).with_element(ElementKind::Reference)
    }

    /// Override the inferred element kind (builder pattern)
    pub fn with_element(self, element: ElementKind) -> Self {
        self.0.borrow_mut().element = element;
        self
    }

    /// The concrete kind of this sequence
    pub fn kind(&self) -> SeqKind {
        self.0.borrow().kind
    }

    /// The element kind of this sequence
    pub fn element(&self) -> ElementKind {
        self.0.borrow().element
    }

    /// Check if the sequence rejects add/insert/remove/clear
    pub fn is_fixed_size(&self) -> bool {
        self.kind() == SeqKind::Array
    }

    /// Check whether two handles share the same storage
    pub fn ptr_eq(&self, other: &Sequence) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.0.borrow().items.len()
    }

    /// Check if the sequence is empty
    pub fn is_empty(&self) -> bool {
        self.0.borrow().items.is_empty()
    }

    /// Get the element at `index`
    pub fn get(&self, index: usize) -> Option<Value> {
        self.0.borrow().items.get(index).cloned()
    }

    /// Snapshot of the elements
    pub fn to_vec(&self) -> Vec<Value> {
        self.0.borrow().items.clone()
    }

    /// Replace the element at `index`
    pub fn set(&self, index: usize, value: Value) -> Result<()> {
        self.check_element(&value)?;
        let mut data = self.0.borrow_mut();
        let len = data.items.len();
        match data.items.get_mut(index) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(PermafrostError::IndexOutOfBounds { index, len }),
        }
    }

    /// Append an element
    pub fn push(&self, value: Value) -> Result<()> {
        self.check_resizable("add")?;
        self.check_element(&value)?;
        self.0.borrow_mut().items.push(value);
        Ok(())
    }

    /// Insert an element at `index`
    pub fn insert(&self, index: usize, value: Value) -> Result<()> {
        self.check_resizable("insert")?;
        self.check_element(&value)?;
        let mut data = self.0.borrow_mut();
        let len = data.items.len();
        if index > len {
            return Err(PermafrostError::IndexOutOfBounds { index, len });
        }
        data.items.insert(index, value);
        Ok(())
    }

    /// Remove and return the element at `index`
    pub fn remove_at(&self, index: usize) -> Result<Value> {
        self.check_resizable("remove")?;
        let mut data = self.0.borrow_mut();
        let len = data.items.len();
        if index >= len {
            return Err(PermafrostError::IndexOutOfBounds { index, len });
        }
        Ok(data.items.remove(index))
    }

    /// Remove the first element equal to `value`
    pub fn remove(&self, value: &Value) -> Result<bool> {
        self.check_resizable("remove")?;
        match self.index_of(value) {
            Some(index) => {
                self.0.borrow_mut().items.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Remove every element
    pub fn clear(&self) -> Result<()> {
        self.check_resizable("clear")?;
        self.0.borrow_mut().items.clear();
        Ok(())
    }

    /// Check if an element equal to `value` is present
    pub fn contains(&self, value: &Value) -> bool {
        self.index_of(value).is_some()
    }

    /// Position of the first element equal to `value`
    pub fn index_of(&self, value: &Value) -> Option<usize> {
        self.0.borrow().items.iter().position(|item| item == value)
    }

    fn check_resizable(&self, operation: &'static str) -> Result<()> {
        if self.is_fixed_size() {
            return Err(PermafrostError::FixedSize { operation });
        }
        Ok(())
    }

    fn check_element(&self, value: &Value) -> Result<()> {
        if self.element() == ElementKind::Scalar && !value.is_scalar() {
            return Err(PermafrostError::mismatch("scalar element", value.type_name()));
        }
        Ok(())
    }
}

/// An empty list
impl Default for Sequence {
    fn default() -> Self {
        Self::list(Vec::new())
    }
}
