//! Shared dictionary handle

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;

use super::{MapKey, Value};

/// A shared, insertion-ordered key/value map with reference identity.
///
/// Uses IndexMap so iteration order is the insertion order, which keeps
/// deep clones and proxies index-aligned with their source.
#[derive(Clone, Default)]
pub struct Dictionary(Rc<RefCell<IndexMap<MapKey, Value>>>);

impl Dictionary {
    /// Create an empty dictionary
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry (builder pattern)
    pub fn with_entry(self, key: impl Into<MapKey>, value: impl Into<Value>) -> Self {
        self.insert(key.into(), value.into());
        self
    }

    /// Check whether two handles share the same storage
    pub fn ptr_eq(&self, other: &Dictionary) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    /// Check if the dictionary is empty
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Get the value for `key`
    pub fn get(&self, key: &MapKey) -> Option<Value> {
        self.0.borrow().get(key).cloned()
    }

    /// Check if `key` is present
    pub fn contains_key(&self, key: &MapKey) -> bool {
        self.0.borrow().contains_key(key)
    }

    /// Insert an entry, returning the previous value
    pub fn insert(&self, key: MapKey, value: Value) -> Option<Value> {
        self.0.borrow_mut().insert(key, value)
    }

    /// Remove an entry, preserving the order of the remaining entries
    pub fn remove(&self, key: &MapKey) -> Option<Value> {
        self.0.borrow_mut().shift_remove(key)
    }

    /// Remove every entry
    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    /// Snapshot of the keys
    pub fn keys(&self) -> Vec<MapKey> {
        self.0.borrow().keys().cloned().collect()
    }

    /// Snapshot of the entries
    pub fn entries(&self) -> Vec<(MapKey, Value)> {
        self.0
            .borrow()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_preserved() {
        let dict = Dictionary::new()
            .with_entry("b", 2)
            .with_entry("a", 1)
            .with_entry("c", 3);
        dict.remove(&MapKey::from("a"));
        let keys: Vec<_> = dict
            .keys()
            .into_iter()
            .map(|k| k.value().as_str().unwrap().to_string())
            .collect();
        assert_eq!(keys, vec!["b", "c"]);
    }

    #[test]
    fn test_handles_share_storage() {
        let a = Dictionary::new();
        let b = a.clone();
        b.insert(MapKey::from("x"), Value::I32(1));
        assert_eq!(a.get(&MapKey::from("x")), Some(Value::I32(1)));
        assert!(a.ptr_eq(&b));
    }
}
