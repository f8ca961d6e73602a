//! The public facade: wrap, freeze, thaw and freeze-dry
//!
//! These free functions are the intended entry points. Objects that are not
//! wrapped fall back to their native [`Freezable`](crate::Freezable)
//! capability, and fail with `NotWrappable` if they have none.

use tracing::debug;

use crate::cell::FrozenCell;
use crate::clone::deep_clone_object;
use crate::dto::Dto;
use crate::error::Result;
use crate::object::Object;
use crate::value::Value;
use crate::wrapper::Wrapper;

/// Wrap an object into a new, unfrozen lineage.
///
/// Already-wrapped objects are returned unchanged. The wrapper must be the
/// only owner of its instance, so a plain handle that is still shared is
/// copied first (self-clone if the type has one, else a deep clone) and the
/// copy is wrapped; other handles never see the wrapped state.
pub fn wrap(instance: Object) -> Result<Object> {
    if instance.is_wrapped() {
        return Ok(instance);
    }

    let instance = if instance.is_shared() {
        debug!(
            type_name = instance.type_name(),
            "copying shared instance before wrapping"
        );
        match instance.self_clone()? {
            Some(copy) => copy,
            None => deep_clone_object(&instance)?,
        }
    } else {
        instance
    };
    Ok(Wrapper::wrap(&instance, FrozenCell::new(false)))
}

/// Take ownership of a DTO and wrap it into a new, unfrozen lineage
pub fn wrap_new<T: Dto>(dto: T) -> Object {
    Wrapper::wrap(&Object::new(dto), FrozenCell::new(false))
}

/// Check if a value carries the wrapped marker. `Null` is never wrapped.
pub fn is_wrapped(value: &Value) -> bool {
    value.is_wrapped()
}

/// Whether the object's lineage is frozen
pub fn is_frozen(instance: &Object) -> Result<bool> {
    instance.is_frozen()
}

/// Freeze the object's lineage. Idempotent.
pub fn freeze(instance: &Object) -> Result<()> {
    instance.freeze()
}

/// A new, independent, unfrozen copy
pub fn thaw(instance: &Object) -> Result<Object> {
    instance.thaw()
}

/// A frozen copy, or the same handle if it is already frozen.
///
/// Plain objects are wrapped first, so this never fails with
/// `NotWrappable`.
pub fn freeze_dry(instance: &Object) -> Result<Object> {
    instance.freeze_dry()
}
