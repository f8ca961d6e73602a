//! Dictionary proxy

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use tracing::trace;

use crate::cell::FrozenCell;
use crate::error::Result;
use crate::value::display::write_entries;
use crate::value::{Dictionary, MapKey, Value};

use super::{stands_for, wrap_element, Owner};

/// Proxy for a dictionary-shaped property.
///
/// Keys are scalars and never wrapped; values are wrapped into the owner's
/// lineage and kept in lockstep with the source.
#[derive(Clone)]
pub struct DictionaryProxy(Rc<DictionaryData>);

struct DictionaryData {
    source: Dictionary,

    /// Every entry of the source, with values wrapped
    wrapped: RefCell<IndexMap<MapKey, Value>>,

    owner: Owner,

    cell: FrozenCell,
}

impl DictionaryProxy {
    pub(crate) fn new(source: Dictionary, owner: Owner, cell: FrozenCell) -> Self {
        let wrapped = source
            .entries()
            .into_iter()
            .map(|(key, value)| {
                let value = wrap_element(&value, &owner, &cell);
                (key, value)
            })
            .collect();
        DictionaryProxy(Rc::new(DictionaryData {
            source,
            wrapped: RefCell::new(wrapped),
            owner,
            cell,
        }))
    }

    /// The raw dictionary behind this proxy
    pub fn source(&self) -> Dictionary {
        self.0.source.clone()
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
    pub fn ptr_eq(&self, other: &DictionaryProxy) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Realign the wrapped entries with the source after it was changed
    /// through another handle, keeping values whose raw entry is unchanged
    fn sync(&self) {
        let entries = self.0.source.entries();
        let mut wrapped = self.0.wrapped.borrow_mut();

        let aligned = wrapped.len() == entries.len()
            && wrapped
                .iter()
                .zip(&entries)
                .all(|((k, w), (key, raw))| k == key && stands_for(w, raw));
        if aligned {
            return;
        }

        trace!(member = self.0.owner.property, "resyncing proxy with its source");
        let mut stale = std::mem::take(&mut *wrapped);
        *wrapped = entries
            .into_iter()
            .map(|(key, raw)| {
                let value = match stale.shift_remove(&key) {
                    Some(w) if stands_for(&w, &raw) => w,
                    _ => wrap_element(&raw, &self.0.owner, &self.0.cell),
                };
                (key, value)
            })
            .collect();
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.sync();
        self.0.wrapped.borrow().len()
    }

    /// Check if the dictionary is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the (wrapped) value for `key`
    pub fn get(&self, key: &MapKey) -> Option<Value> {
        self.sync();
        self.0.wrapped.borrow().get(key).cloned()
    }

    /// Check if `key` is present
    pub fn contains_key(&self, key: &MapKey) -> bool {
        self.sync();
        self.0.wrapped.borrow().contains_key(key)
    }

    /// Keys in insertion order
    pub fn keys(&self) -> Vec<MapKey> {
        self.sync();
        self.0.wrapped.borrow().keys().cloned().collect()
    }

    /// Snapshot of the entries, values wrapped
    pub fn iter(&self) -> std::vec::IntoIter<(MapKey, Value)> {
        self.entries().into_iter()
    }

    fn entries(&self) -> Vec<(MapKey, Value)> {
        self.sync();
        self.0
            .wrapped
            .borrow()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Insert or replace an entry, returning the previous (wrapped) value
    pub fn insert(&self, key: impl Into<MapKey>, value: impl Into<Value>) -> Result<Option<Value>> {
        self.0.owner.ensure_thawed(&self.0.cell)?;
        self.sync();
        let key = key.into();
        let value = value.into();
        let wrapped = wrap_element(&value, &self.0.owner, &self.0.cell);
        self.0.source.insert(key.clone(), value);
        Ok(self.0.wrapped.borrow_mut().insert(key, wrapped))
    }

    /// Remove an entry, returning its (wrapped) value
    pub fn remove(&self, key: &MapKey) -> Result<Option<Value>> {
        self.0.owner.ensure_thawed(&self.0.cell)?;
        self.sync();
        self.0.source.remove(key);
        Ok(self.0.wrapped.borrow_mut().shift_remove(key))
    }

    /// Remove every entry
    pub fn clear(&self) -> Result<()> {
        self.0.owner.ensure_thawed(&self.0.cell)?;
        self.sync();
        self.0.source.clear();
        self.0.wrapped.borrow_mut().clear();
        Ok(())
    }
}

impl fmt::Debug for DictionaryProxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DictionaryProxy")?;
        write_entries(f, &self.entries())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PermafrostError;
    use crate::value::Sequence;

    #[test]
    fn test_values_are_wrapped_keys_are_not() {
        let inner = Sequence::list(vec![Value::I32(1)]);
        let source = Dictionary::new()
            .with_entry("list", Value::Sequence(inner.clone()))
            .with_entry("n", 5);
        let dict = DictionaryProxy::new(source, Owner::new("map", "Bag"), FrozenCell::new(false));

        let list = dict.get(&MapKey::from("list")).unwrap();
        assert!(list.as_list().unwrap().source().ptr_eq(&inner));
        assert_eq!(dict.get(&MapKey::from("list")).unwrap(), list);
        assert_eq!(dict.get(&MapKey::from("n")), Some(Value::I32(5)));
        assert_eq!(dict.keys(), vec![MapKey::from("list"), MapKey::from("n")]);
    }

    #[test]
    fn test_lockstep_and_frozen() {
        let source = Dictionary::new().with_entry("a", 1);
        let cell = FrozenCell::new(false);
        let dict = DictionaryProxy::new(source.clone(), Owner::new("map", "Bag"), cell.clone());

        assert_eq!(dict.insert("b", 2).unwrap(), None);
        assert_eq!(source.get(&MapKey::from("b")), Some(Value::I32(2)));
        assert_eq!(dict.remove(&MapKey::from("a")).unwrap(), Some(Value::I32(1)));
        assert!(!source.contains_key(&MapKey::from("a")));

        cell.freeze();
        assert_eq!(
            dict.insert("c", 3),
            Err(PermafrostError::frozen("map", "Bag"))
        );
        assert_eq!(dict.clear(), Err(PermafrostError::frozen("map", "Bag")));
        assert_eq!(source.len(), 1);
        assert_eq!(dict.iter().count(), 1);
    }

    #[test]
    fn test_follows_changes_made_through_the_source() {
        let kept = Sequence::list(vec![]);
        let source = Dictionary::new().with_entry("kept", Value::Sequence(kept));
        let dict = DictionaryProxy::new(source.clone(), Owner::new("map", "Bag"), FrozenCell::new(false));
        let before = dict.get(&MapKey::from("kept")).unwrap();

        source.insert(MapKey::from("added"), Value::Sequence(Sequence::list(vec![])));
        assert_eq!(dict.len(), 2);
        assert!(dict.get(&MapKey::from("added")).unwrap().is_wrapped());
        assert_eq!(dict.get(&MapKey::from("kept")).unwrap(), before);

        source.remove(&MapKey::from("kept"));
        assert_eq!(dict.remove(&MapKey::from("kept")).unwrap(), None);
        assert_eq!(dict.keys(), vec![MapKey::from("added")]);
    }
}
