//! The capability interface DTO types expose
//!
//! A wrapper can only intercept what goes through an interface, so every
//! wrappable type exposes its state as named properties read and written as
//! [`Value`]s. `#[derive(Dto)]` generates both traits for plain structs; hand
//! implementations are fine too.

use std::any::Any;
use std::sync::Arc;

use crate::error::Result;
use crate::registry::TypeInfo;
use crate::value::Value;

/// Property-level access to a data object (object-safe).
pub trait Dto: Any {
    /// The cached description of this type
    fn type_info(&self) -> Arc<TypeInfo>;

    /// Read a property
    fn get(&self, property: &str) -> Result<Value>;

    /// Write a property
    fn set(&mut self, property: &str, value: Value) -> Result<()>;

    /// Self-clone capability.
    ///
    /// Types that return `Some` are copied with it instead of the deep-clone
    /// engine, including any side effects the copy applies.
    fn self_clone(&self) -> Option<Box<dyn Dto>> {
        None
    }

    /// Native freeze support, for types that track frozen state themselves
    fn freezable(&mut self) -> Option<&mut dyn Freezable> {
        None
    }

    /// Upcast for downcasting to the concrete type
    fn as_any(&self) -> &dyn Any;

    /// Upcast for downcasting to the concrete type
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Static side of the capability interface: description and construction.
pub trait DtoType: Dto + Default + Sized {
    /// Describe this type's properties.
    ///
    /// Called once per process; use [`crate::registry::type_info_of`] to get
    /// the cached result.
    fn describe() -> TypeInfo;
}

/// A type that manages its own frozen state.
///
/// The facade falls back to this for instances that are not wrapped.
pub trait Freezable {
    /// Irreversibly freeze this instance
    fn freeze(&mut self);

    /// Whether this instance is frozen
    fn is_frozen(&self) -> bool;

    /// An independent, unfrozen copy
    fn thaw(&self) -> Box<dyn Dto>;
}
