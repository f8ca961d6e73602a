//! Value representation for DTO properties

mod dictionary;
pub(crate) mod display;
mod field;
mod impls;
mod key;
mod sequence;
mod source;

pub use dictionary::Dictionary;
pub use field::FieldValue;
pub use key::MapKey;
pub use sequence::{ElementKind, SeqKind, Sequence};
pub use source::{Source, ValueSource};

use std::rc::Rc;

use crate::object::Object;
use crate::proxy::{CollectionProxy, DictionaryProxy, EnumerableProxy, ListProxy};

/// A property value as seen through the `Dto` capability interface.
///
/// Values are organized into three tiers:
/// - Tier 1: Scalar-like values, copied by value and never wrapped
/// - Tier 2: Raw reference values (shared handles with identity)
/// - Tier 3: Proxied collections, which carry the wrapped marker
///
/// Text is scalar-like even though it is reference counted: it is immutable
/// and is never wrapped or deep-cloned element by element.
#[derive(Clone)]
pub enum Value {
    // ═══════════════════════════════════════════════════════════════════
    // Tier 1: Scalar-like
    // ═══════════════════════════════════════════════════════════════════
    /// Absent reference
    Null,

    /// Boolean: `true` or `false`
    Bool(bool),

    /// Unicode scalar value
    Char(char),

    /// 32-bit signed integer
    I32(i32),
    /// 64-bit signed integer
    I64(i64),
    /// 32-bit unsigned integer
    U32(u32),
    /// 64-bit unsigned integer
    U64(u64),

    /// 32-bit floating point
    F32(f32),
    /// 64-bit floating point
    F64(f64),

    /// Immutable text
    String(Rc<str>),

    // ═══════════════════════════════════════════════════════════════════
    // Tier 2: Raw References
    // ═══════════════════════════════════════════════════════════════════
    /// A DTO instance (plain or wrapped)
    Object(Object),

    /// Array, list, collection or untyped dynamic sequence
    Sequence(Sequence),

    /// Key/value map
    Dictionary(Dictionary),

    /// Host-provided enumerable outside the collection taxonomy
    Source(Source),

    // ═══════════════════════════════════════════════════════════════════
    // Tier 3: Proxied Collections
    // ═══════════════════════════════════════════════════════════════════
    /// Ordered list proxy
    ListProxy(ListProxy),

    /// Set-like collection proxy
    CollectionProxy(CollectionProxy),

    /// Read-only enumerable proxy
    EnumerableProxy(EnumerableProxy),

    /// Dictionary proxy
    DictionaryProxy(DictionaryProxy),
}
