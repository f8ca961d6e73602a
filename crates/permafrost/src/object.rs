//! Shared object handle: a plain DTO instance or a wrapper around one

use std::any::type_name;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use tracing::debug;

use crate::cell::FrozenCell;
use crate::dto::Dto;
use crate::error::{PermafrostError, Result};
use crate::registry::TypeInfo;
use crate::value::{FieldValue, Value};
use crate::wrapper::Wrapper;

/// A DTO instance with reference identity.
///
/// Cloning the handle shares the instance, the way a reference does. Every
/// access goes through the `Dto` capability interface, so a wrapped handle
/// can intercept it: reads wrap nested references lazily, and writes are
/// rejected once the wrapper's frozen cell is set.
///
/// # Example
///
/// ```
/// use permafrost::{freezer, Dto, Value};
///
/// #[derive(Dto, Default)]
/// struct Data {
///     id: i32,
///     name: String,
/// }
///
/// let data = freezer::wrap_new(Data { id: 42, name: "Everything".into() });
/// data.freeze().unwrap();
///
/// assert_eq!(data.get("id").unwrap(), Value::I32(42));
/// assert!(data.set("id", 45).unwrap_err().is_frozen_access());
///
/// let thawed = data.thaw().unwrap();
/// assert!(!thawed.is_frozen().unwrap());
/// assert!(!thawed.ptr_eq(&data));
/// ```
#[derive(Clone)]
pub struct Object(Rc<ObjectRepr>);

enum ObjectRepr {
    Plain(PlainObject),
    Wrapped(Wrapper),
}

struct PlainObject {
    info: Arc<TypeInfo>,
    dto: RefCell<Box<dyn Dto>>,
}

impl Object {
    /// Create a plain (unwrapped) object
    pub fn new<T: Dto>(dto: T) -> Self {
        Self::from_boxed(Box::new(dto))
    }

    /// Create a plain object from a boxed DTO
    pub fn from_boxed(dto: Box<dyn Dto>) -> Self {
        let info = dto.type_info();
        Object(Rc::new(ObjectRepr::Plain(PlainObject {
            info,
            dto: RefCell::new(dto),
        })))
    }

    pub(crate) fn from_wrapper(wrapper: Wrapper) -> Self {
        Object(Rc::new(ObjectRepr::Wrapped(wrapper)))
    }

    pub(crate) fn wrapper(&self) -> Option<&Wrapper> {
        match self.0.as_ref() {
            ObjectRepr::Wrapped(w) => Some(w),
            ObjectRepr::Plain(_) => None,
        }
    }

    /// Check if this handle carries the wrapped marker
    pub fn is_wrapped(&self) -> bool {
        self.wrapper().is_some()
    }

    /// Check whether two handles are the same object
    pub fn ptr_eq(&self, other: &Object) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Other handles to this object are alive
    pub(crate) fn is_shared(&self) -> bool {
        Rc::strong_count(&self.0) > 1
    }

    /// Description of the underlying type
    pub fn type_info(&self) -> Arc<TypeInfo> {
        match self.0.as_ref() {
            ObjectRepr::Plain(p) => Arc::clone(&p.info),
            ObjectRepr::Wrapped(w) => w.target().type_info(),
        }
    }

    /// Name of the underlying type
    pub fn type_name(&self) -> &'static str {
        match self.0.as_ref() {
            ObjectRepr::Plain(p) => p.info.name,
            ObjectRepr::Wrapped(w) => w.target().type_name(),
        }
    }

    /// The frozen cell of a wrapped object's lineage
    pub fn frozen_cell(&self) -> Option<FrozenCell> {
        self.wrapper().map(|w| w.cell().clone())
    }

    // ═══════════════════════════════════════════════════════════════════
    // Property Access
    // ═══════════════════════════════════════════════════════════════════

    /// Read a property.
    ///
    /// Through a wrapper, reference results come back wrapped into the same
    /// lineage, and repeated reads return the identical handle.
    pub fn get(&self, property: &str) -> Result<Value> {
        match self.0.as_ref() {
            ObjectRepr::Plain(_) => self.with_dto(|dto| dto.get(property))?,
            ObjectRepr::Wrapped(w) => w.get(property),
        }
    }

    /// Read a property and convert it to a field type
    pub fn get_as<T: FieldValue>(&self, property: &str) -> Result<T> {
        T::from_value(self.get(property)?)
    }

    /// Write a property.
    ///
    /// Through a frozen wrapper this fails with `FrozenAccess` and changes
    /// nothing.
    pub fn set(&self, property: &str, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        match self.0.as_ref() {
            ObjectRepr::Plain(_) => self.with_dto_mut(|dto| dto.set(property, value))?,
            ObjectRepr::Wrapped(w) => w.set(property, value),
        }
    }

    /// Run `f` against the underlying instance as its concrete type.
    ///
    /// This is a pass-through: the result is not wrapped.
    pub fn with<T: Dto, R>(&self, f: impl FnOnce(&T) -> R) -> Result<R> {
        let got = self.type_name();
        self.with_dto(|dto| {
            dto.as_any()
                .downcast_ref::<T>()
                .map(f)
                .ok_or_else(|| PermafrostError::mismatch(type_name::<T>(), got))
        })?
    }

    /// Run `f` against the underlying instance as its concrete, mutable type.
    ///
    /// Like any method without special handling this passes straight
    /// through to the instance; it does not consult the frozen cell.
    pub fn with_mut<T: Dto, R>(&self, f: impl FnOnce(&mut T) -> R) -> Result<R> {
        let got = self.type_name();
        self.with_dto_mut(|dto| {
            dto.as_any_mut()
                .downcast_mut::<T>()
                .map(f)
                .ok_or_else(|| PermafrostError::mismatch(type_name::<T>(), got))
        })?
    }

    pub(crate) fn with_dto<R>(&self, f: impl FnOnce(&dyn Dto) -> R) -> Result<R> {
        match self.0.as_ref() {
            ObjectRepr::Plain(p) => {
                let dto = p.dto.try_borrow().map_err(|_| self.borrow_conflict())?;
                Ok(f(&**dto))
            }
            ObjectRepr::Wrapped(w) => w.target().with_dto(f),
        }
    }

    pub(crate) fn with_dto_mut<R>(&self, f: impl FnOnce(&mut dyn Dto) -> R) -> Result<R> {
        match self.0.as_ref() {
            ObjectRepr::Plain(p) => {
                let mut dto = p
                    .dto
                    .try_borrow_mut()
                    .map_err(|_| self.borrow_conflict())?;
                Ok(f(&mut **dto))
            }
            ObjectRepr::Wrapped(w) => w.target().with_dto_mut(f),
        }
    }

    fn borrow_conflict(&self) -> PermafrostError {
        PermafrostError::BorrowConflict {
            type_name: self.type_name().to_string(),
        }
    }

    fn not_wrappable(&self) -> PermafrostError {
        PermafrostError::NotWrappable {
            type_name: self.type_name().to_string(),
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // State Transitions
    // ═══════════════════════════════════════════════════════════════════

    /// Freeze the lineage. Idempotent.
    ///
    /// Plain objects must be natively [`crate::Freezable`].
    pub fn freeze(&self) -> Result<()> {
        match self.wrapper() {
            Some(w) => {
                w.freeze();
                Ok(())
            }
            None => self
                .with_dto_mut(|dto| dto.freezable().map(|f| f.freeze()))?
                .ok_or_else(|| self.not_wrappable()),
        }
    }

    /// Whether the lineage is frozen
    pub fn is_frozen(&self) -> Result<bool> {
        match self.wrapper() {
            Some(w) => Ok(w.is_frozen()),
            None => self
                .with_dto_mut(|dto| dto.freezable().map(|f| f.is_frozen()))?
                .ok_or_else(|| self.not_wrappable()),
        }
    }

    /// A new, independent, unfrozen copy, whatever the current state
    pub fn thaw(&self) -> Result<Object> {
        match self.wrapper() {
            Some(w) => w.thaw(),
            None => {
                let copy = self
                    .with_dto_mut(|dto| dto.freezable().map(|f| f.thaw()))?
                    .ok_or_else(|| self.not_wrappable())?;
                debug!(type_name = self.type_name(), "thawed natively freezable instance");
                Ok(Object::from_boxed(copy))
            }
        }
    }

    /// A frozen copy; the same handle if already frozen.
    ///
    /// Plain objects that are not natively freezable are wrapped first and
    /// then copied, so the result is always a frozen wrapper.
    pub fn freeze_dry(&self) -> Result<Object> {
        if let Some(w) = self.wrapper() {
            return w.freeze_dry(self);
        }

        let native = self.with_dto_mut(|dto| dto.freezable().map(|f| f.is_frozen()))?;
        match native {
            Some(true) => Ok(self.clone()),
            Some(false) => {
                let copy = self.thaw()?;
                copy.freeze()?;
                Ok(copy)
            }
            None => Wrapper::wrap(self, FrozenCell::new(false)).freeze_dry(),
        }
    }

    /// Invoke the type's self-clone capability.
    ///
    /// Through a wrapper the copy is wrapped with a new, unfrozen cell.
    /// Returns `None` if the type has no self-clone capability.
    pub fn self_clone(&self) -> Result<Option<Object>> {
        match self.wrapper() {
            Some(w) => w.self_clone(),
            None => Ok(self.with_dto(|dto| dto.self_clone())?.map(Object::from_boxed)),
        }
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let info = self.type_info();
        if let Some(w) = self.wrapper() {
            let state = if w.is_frozen() { "Frozen" } else { "Thawed" };
            return write!(f, "{}({:?})", state, w.target());
        }

        let fields = self.with_dto(|dto| {
            info.properties
                .iter()
                .filter(|p| p.readable)
                .map(|p| (p.name, dto.get(p.name).unwrap_or(Value::Null)))
                .collect::<Vec<_>>()
        });
        match fields {
            Ok(fields) => {
                let mut s = f.debug_struct(info.name);
                for (name, value) in &fields {
                    s.field(name, value);
                }
                s.finish()
            }
            Err(_) => write!(f, "{} {{ <borrowed> }}", info.name),
        }
    }
}
