//! # Permafrost
//!
//! Runtime immutability for plain data objects.
//!
//! Permafrost lets ordinary mutable data-transfer types behave as
//! freezable, thawable values without writing any freeze logic into the
//! types themselves. A type exposes its state as named properties through
//! the [`Dto`] capability interface (usually via `#[derive(Dto)]`); wrapping
//! an instance yields an [`Object`] handle that intercepts every property
//! access:
//!
//! - Reads work in any state and hand out nested objects and collections
//!   wrapped into the same lineage, so freezing the root freezes the graph.
//! - Writes fail with [`PermafrostError::FrozenAccess`] once frozen.
//! - [`Object::thaw`] produces an independent, mutable deep copy, and
//!   [`Object::freeze_dry`] a frozen one.
//!
//! ## Architecture
//!
//! - **Wrapper**: per-instance interceptor holding the lineage's frozen cell
//! - **Proxies**: list, collection, enumerable and dictionary views that
//!   gate structural mutation on the same cell
//! - **Deep clone**: reflection-driven copy over the registry's type info
//! - **Registry**: process-wide cache of per-type property descriptions
//!
//! ## Example
//!
//! ```
//! use permafrost::{freezer, Dto, Sequence, Value};
//!
//! #[derive(Dto, Default)]
//! struct Parent {
//!     name: String,
//!     children: Sequence,
//! }
//!
//! #[derive(Dto, Default)]
//! struct Child {
//!     id: i32,
//! }
//!
//! let parent = freezer::wrap_new(Parent {
//!     name: "root".into(),
//!     children: Sequence::list(vec![Value::object(Child { id: 1 })]),
//! });
//! parent.freeze().unwrap();
//!
//! let children = parent.get("children").unwrap();
//! let child = children.as_list().unwrap().get(0).unwrap();
//! let child = child.as_object().unwrap();
//!
//! assert!(child.is_frozen().unwrap());
//! assert!(child.set("id", 2).is_err());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Lets `#[derive(Dto)]` expand to `::permafrost::...` inside this crate too
extern crate self as permafrost;

pub mod cell;
pub mod clone;
pub mod dto;
pub mod error;
pub mod freezer;
pub mod object;
pub mod proxy;
pub mod registry;
pub mod value;
mod wrapper;

// Re-export main types
pub use cell::FrozenCell;
pub use clone::{deep_clone, deep_clone_object, DeepCloner};
pub use dto::{Dto, DtoType, Freezable};
pub use error::{PermafrostError, Result};
pub use object::Object;
pub use proxy::{CollectionProxy, DictionaryProxy, EnumerableProxy, ListProxy, Owner};
pub use registry::{type_info_of, PropertyInfo, PropertyKind, TypeInfo};
pub use value::{
    Dictionary, ElementKind, FieldValue, MapKey, SeqKind, Sequence, Source, Value, ValueSource,
};
pub use wrapper::FROZEN_STATE_MEMBER;

#[cfg(feature = "derive")]
pub use permafrost_derive::Dto;

/// Permafrost version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
