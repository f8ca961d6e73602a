//! Type metadata and the process-wide type registry
//!
//! Every DTO type describes its properties and how to default-construct
//! itself once. The description is cached per `TypeId` for the lifetime of
//! the process: entries are created lazily on first use and never evicted.
//! The cache is a `DashMap`, so lookups are safe from any thread even though
//! the objects themselves are single-threaded.

use std::any::{type_name, TypeId};
use std::sync::{Arc, OnceLock};

use dashmap::DashMap;
use tracing::trace;

use crate::dto::{Dto, DtoType};

/// Declared shape of a property.
///
/// For collection-shaped properties this selects the proxy flavor a wrapper
/// hands out on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    /// Scalar-like value, never wrapped
    Scalar,

    /// Nested DTO
    Object,

    /// Ordered list: full positional surface
    List,

    /// Set-like collection: add/remove/clear/contains
    Collection,

    /// Read-only enumerable
    Enumerable,

    /// Key/value map
    Dictionary,

    /// Untyped: the runtime shape decides
    Any,
}

impl PropertyKind {
    /// Check if the declared shape is a collection
    pub fn is_collection(self) -> bool {
        matches!(
            self,
            PropertyKind::List
                | PropertyKind::Collection
                | PropertyKind::Enumerable
                | PropertyKind::Dictionary
        )
    }
}

/// A single property of a DTO type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyInfo {
    /// The property's name
    pub name: &'static str,

    /// The declared shape
    pub kind: PropertyKind,

    /// Whether the property has a getter
    pub readable: bool,

    /// Whether the property has a setter
    pub writable: bool,
}

impl PropertyInfo {
    /// Create a readable, writable property
    pub const fn new(name: &'static str, kind: PropertyKind) -> Self {
        Self {
            name,
            kind,
            readable: true,
            writable: true,
        }
    }

    /// Mark the property as having no setter (builder pattern)
    pub const fn read_only(mut self) -> Self {
        self.writable = false;
        self
    }

    /// Override the declared shape (builder pattern)
    pub const fn with_kind(mut self, kind: PropertyKind) -> Self {
        self.kind = kind;
        self
    }
}

/// Member list and default-construction strategy for a DTO type.
#[derive(Clone)]
pub struct TypeInfo {
    /// The type's name (e.g., "Data", "Complex")
    pub name: &'static str,

    /// Rust type identity
    pub type_id: TypeId,

    /// Properties in declaration order
    pub properties: Vec<PropertyInfo>,

    create: fn() -> Box<dyn Dto>,
}

impl TypeInfo {
    /// Describe `T`, default-constructing through its `Default` impl
    pub fn new<T: DtoType>(name: &'static str) -> Self {
        Self {
            name,
            type_id: TypeId::of::<T>(),
            properties: Vec::new(),
            create: create_default::<T>,
        }
    }

    /// Add a property (builder pattern)
    pub fn with_property(mut self, property: PropertyInfo) -> Self {
        self.properties.push(property);
        self
    }

    /// Get a property by name
    pub fn property(&self, name: &str) -> Option<&PropertyInfo> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Properties the deep-clone engine copies
    pub fn copyable(&self) -> impl Iterator<Item = &PropertyInfo> {
        self.properties.iter().filter(|p| p.readable && p.writable)
    }

    /// Construct a default instance of the described type
    pub fn create(&self) -> Box<dyn Dto> {
        (self.create)()
    }
}

impl std::fmt::Debug for TypeInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeInfo")
            .field("name", &self.name)
            .field("properties", &self.properties)
            .finish()
    }
}

fn create_default<T: DtoType>() -> Box<dyn Dto> {
    Box::new(T::default())
}

static REGISTRY: OnceLock<DashMap<TypeId, Arc<TypeInfo>>> = OnceLock::new();

fn registry() -> &'static DashMap<TypeId, Arc<TypeInfo>> {
    REGISTRY.get_or_init(DashMap::new)
}

/// Get the cached description of `T`, describing it on first use.
pub fn type_info_of<T: DtoType>() -> Arc<TypeInfo> {
    let id = TypeId::of::<T>();
    if let Some(info) = registry().get(&id) {
        return Arc::clone(info.value());
    }

    // Describe outside the map lock; a racing thread may describe too,
    // and the first insert wins.
    let described = Arc::new(T::describe());
    trace!(type_name = type_name::<T>(), "registered DTO type");
    Arc::clone(registry().entry(id).or_insert(described).value())
}

/// Check whether `T` has been described already
pub fn is_registered<T: DtoType>() -> bool {
    registry().contains_key(&TypeId::of::<T>())
}
