//! The transparent wrapper: intercepts property access on one instance
//!
//! A wrapper holds a plain object, the lineage's frozen cell, and a memo
//! table keyed by property name. Reads pass through to the instance and wrap
//! reference results into the same lineage; writes are rejected while the
//! cell is frozen. The memo makes repeated reads of a reference property
//! return the identical handle.

use std::cell::RefCell;
use std::collections::HashMap;

use tracing::{debug, trace};

use crate::cell::FrozenCell;
use crate::clone::DeepCloner;
use crate::error::{PermafrostError, Result};
use crate::object::Object;
use crate::proxy::{stands_for, wrap_value, Owner};
use crate::registry::PropertyInfo;
use crate::value::Value;

/// Member excluded from deep clones made by a wrapper: the copy's frozen
/// state comes from its new cell, never from the source.
pub const FROZEN_STATE_MEMBER: &str = "is_frozen";

pub(crate) struct Wrapper {
    /// Always a plain object
    target: Object,

    cell: FrozenCell,

    memo: RefCell<HashMap<&'static str, Value>>,
}

impl Wrapper {
    /// Wrap `instance` into the lineage of `cell`.
    ///
    /// Already-wrapped objects are returned unchanged.
    pub(crate) fn wrap(instance: &Object, cell: FrozenCell) -> Object {
        if instance.is_wrapped() {
            return instance.clone();
        }
        debug!(
            type_name = instance.type_name(),
            frozen = cell.is_frozen(),
            "wrapping instance"
        );
        Object::from_wrapper(Wrapper {
            target: instance.clone(),
            cell,
            memo: RefCell::new(HashMap::new()),
        })
    }

    pub(crate) fn target(&self) -> &Object {
        &self.target
    }

    pub(crate) fn cell(&self) -> &FrozenCell {
        &self.cell
    }

    // ═══════════════════════════════════════════════════════════════════
    // State Transitions
    // ═══════════════════════════════════════════════════════════════════

    pub(crate) fn freeze(&self) {
        if !self.cell.is_frozen() {
            debug!(type_name = self.target.type_name(), "freezing lineage");
        }
        self.cell.freeze();
    }

    pub(crate) fn is_frozen(&self) -> bool {
        self.cell.is_frozen()
    }

    /// `this` is the handle owning this wrapper; it is returned as-is when
    /// the lineage is already frozen.
    pub(crate) fn freeze_dry(&self, this: &Object) -> Result<Object> {
        if self.cell.is_frozen() {
            return Ok(this.clone());
        }
        debug!(type_name = self.target.type_name(), "freeze-drying instance");
        self.copy_into(FrozenCell::new(true))
    }

    pub(crate) fn thaw(&self) -> Result<Object> {
        debug!(type_name = self.target.type_name(), "thawing instance");
        self.copy_into(FrozenCell::new(false))
    }

    /// Explicit self-clone: the copy always starts unfrozen.
    pub(crate) fn self_clone(&self) -> Result<Option<Object>> {
        let copy = self.target.with_dto(|dto| dto.self_clone())?;
        Ok(copy.map(|copy| {
            debug!(type_name = self.target.type_name(), "self-cloned wrapped instance");
            Wrapper::wrap(&Object::from_boxed(copy), FrozenCell::new(false))
        }))
    }

    /// Copy the instance, preferring its self-clone capability, and wrap
    /// the copy with `cell`.
    fn copy_into(&self, cell: FrozenCell) -> Result<Object> {
        let copy = match self.target.with_dto(|dto| dto.self_clone())? {
            Some(copy) => copy,
            None => {
                let cloner = DeepCloner::new().ignore(FROZEN_STATE_MEMBER);
                self.target.with_dto(|dto| cloner.clone_dto(dto))??
            }
        };
        Ok(Wrapper::wrap(&Object::from_boxed(copy), cell))
    }

    // ═══════════════════════════════════════════════════════════════════
    // Property Interception
    // ═══════════════════════════════════════════════════════════════════

    pub(crate) fn get(&self, property: &str) -> Result<Value> {
        let (prop, owner) = self.property(property)?;

        if let Some(value) = self.memo.borrow().get(prop.name) {
            trace!(property = prop.name, "memoized read");
            return Ok(value.clone());
        }

        let value = self.target.get(prop.name)?;
        if value.is_scalar() {
            return Ok(value);
        }

        let wrapped = wrap_value(&value, prop.kind, &owner, &self.cell);
        self.memo.borrow_mut().insert(prop.name, wrapped.clone());
        Ok(wrapped)
    }

    pub(crate) fn set(&self, property: &str, value: Value) -> Result<()> {
        let (prop, owner) = self.property(property)?;

        if self.cell.is_frozen() {
            debug!(
                member = prop.name,
                type_name = owner.type_name,
                "rejected write on frozen instance"
            );
            return Err(PermafrostError::frozen(prop.name, owner.type_name));
        }

        // Wrap before touching the instance so a failed write changes nothing.
        // Assigning the raw value behind the memoized handle keeps that handle.
        let wrapped = if value.is_scalar() {
            None
        } else {
            let memo = self.memo.borrow();
            match memo.get(prop.name) {
                Some(current) if stands_for(current, &value) => Some(current.clone()),
                _ => Some(wrap_value(&value, prop.kind, &owner, &self.cell)),
            }
        };

        self.target.set(prop.name, value)?;

        let mut memo = self.memo.borrow_mut();
        match wrapped {
            Some(wrapped) => memo.insert(prop.name, wrapped),
            None => memo.remove(prop.name),
        };
        Ok(())
    }

    fn property(&self, property: &str) -> Result<(PropertyInfo, Owner)> {
        let info = self.target.type_info();
        let prop = info
            .property(property)
            .cloned()
            .ok_or_else(|| PermafrostError::UnknownProperty {
                type_name: info.name.to_string(),
                property: property.to_string(),
            })?;
        let owner = Owner::new(prop.name, info.name);
        Ok((prop, owner))
    }
}
