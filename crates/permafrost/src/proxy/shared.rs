//! Lockstep bookkeeping shared by the sequence-backed proxies

use std::cell::RefCell;

use tracing::trace;

use crate::cell::FrozenCell;
use crate::error::{PermafrostError, Result};
use crate::value::{ElementKind, Sequence, Value};

use super::{stands_for, wrap_element, Owner};

/// A source sequence plus, for reference elements, the wrapped elements
/// at the same positions.
pub(super) struct SeqProxy {
    source: Sequence,

    /// `Some` iff the source's element kind is `Reference`
    proxies: Option<RefCell<Vec<Value>>>,

    cell: FrozenCell,

    owner: Owner,
}

impl SeqProxy {
    pub(super) fn new(source: Sequence, owner: Owner, cell: FrozenCell) -> Self {
        let proxies = match source.element() {
            ElementKind::Scalar => None,
            ElementKind::Reference => Some(RefCell::new(
                source
                    .to_vec()
                    .iter()
                    .map(|item| wrap_element(item, &owner, &cell))
                    .collect(),
            )),
        };
        Self {
            source,
            proxies,
            cell,
            owner,
        }
    }

    pub(super) fn source(&self) -> &Sequence {
        &self.source
    }

    pub(super) fn owner(&self) -> Owner {
        self.owner
    }

    pub(super) fn is_frozen(&self) -> bool {
        self.cell.is_frozen()
    }

    fn wrap(&self, value: &Value) -> Value {
        wrap_element(value, &self.owner, &self.cell)
    }

    /// Realign the wrapped elements with the source.
    ///
    /// The source is a shared handle and may have been changed through
    /// another proxy or the raw sequence. Wrapped handles whose raw value is
    /// still present are kept; new raw elements are wrapped.
    fn sync(&self) {
        let Some(proxies) = &self.proxies else {
            return;
        };
        let items = self.source.to_vec();
        let mut proxies = proxies.borrow_mut();

        let aligned = proxies.len() == items.len()
            && proxies
                .iter()
                .zip(&items)
                .all(|(wrapped, raw)| stands_for(wrapped, raw));
        if aligned {
            return;
        }

        trace!(
            member = self.owner.property,
            type_name = self.owner.type_name,
            "resyncing proxy with its source"
        );
        let mut stale = std::mem::take(&mut *proxies);
        *proxies = items
            .iter()
            .map(|raw| match stale.iter().position(|w| stands_for(w, raw)) {
                Some(index) => stale.remove(index),
                None => self.wrap(raw),
            })
            .collect();
    }

    // ═══════════════════════════════════════════════════════════════════
    // Reads
    // ═══════════════════════════════════════════════════════════════════

    pub(super) fn len(&self) -> usize {
        self.source.len()
    }

    pub(super) fn get(&self, index: usize) -> Option<Value> {
        self.sync();
        match &self.proxies {
            Some(proxies) => proxies.borrow().get(index).cloned(),
            None => self.source.get(index),
        }
    }

    pub(super) fn to_vec(&self) -> Vec<Value> {
        self.sync();
        match &self.proxies {
            Some(proxies) => proxies.borrow().clone(),
            None => self.source.to_vec(),
        }
    }

    /// Locate by wrapped identity when the probe carries the marker, else
    /// by raw value in the source.
    pub(super) fn index_of(&self, value: &Value) -> Option<usize> {
        self.sync();
        match &self.proxies {
            Some(proxies) if value.is_wrapped() => {
                proxies.borrow().iter().position(|item| item == value)
            }
            _ => self.source.index_of(value),
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Structural Mutation (gated by the frozen cell)
    // ═══════════════════════════════════════════════════════════════════

    pub(super) fn set(&self, index: usize, value: Value) -> Result<()> {
        self.owner.ensure_thawed(&self.cell)?;
        self.sync();
        let wrapped = self.wrap(&value);
        self.source.set(index, value)?;
        if let Some(proxies) = &self.proxies {
            proxies.borrow_mut()[index] = wrapped;
        }
        Ok(())
    }

    pub(super) fn push(&self, value: Value) -> Result<()> {
        self.owner.ensure_thawed(&self.cell)?;
        self.sync();
        let wrapped = self.wrap(&value);
        self.source.push(value)?;
        if let Some(proxies) = &self.proxies {
            proxies.borrow_mut().push(wrapped);
        }
        Ok(())
    }

    pub(super) fn insert(&self, index: usize, value: Value) -> Result<()> {
        self.owner.ensure_thawed(&self.cell)?;
        self.sync();
        let wrapped = self.wrap(&value);
        self.source.insert(index, value)?;
        if let Some(proxies) = &self.proxies {
            proxies.borrow_mut().insert(index, wrapped);
        }
        Ok(())
    }

    pub(super) fn remove_at(&self, index: usize) -> Result<Value> {
        self.owner.ensure_thawed(&self.cell)?;
        self.sync();
        let raw = self.source.remove_at(index)?;
        match &self.proxies {
            Some(proxies) => Ok(proxies.borrow_mut().remove(index)),
            None => Ok(raw),
        }
    }

    pub(super) fn remove(&self, value: &Value) -> Result<bool> {
        self.owner.ensure_thawed(&self.cell)?;
        if self.source.is_fixed_size() {
            return Err(PermafrostError::FixedSize {
                operation: "remove",
            });
        }
        match self.index_of(value) {
            Some(index) => {
                self.remove_at(index)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub(super) fn clear(&self) -> Result<()> {
        self.owner.ensure_thawed(&self.cell)?;
        self.sync();
        self.source.clear()?;
        if let Some(proxies) = &self.proxies {
            proxies.borrow_mut().clear();
        }
        Ok(())
    }
}
