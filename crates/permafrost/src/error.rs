//! Error types for freeze, thaw, wrap and clone operations

use thiserror::Error;

/// Main error type for Permafrost operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PermafrostError {
    /// A mutation was attempted while the governing frozen cell is set
    #[error("Cannot modify '{member}' on frozen instance of '{type_name}'")]
    FrozenAccess {
        /// Property or collection that was being modified
        member: String,
        /// Declaring (owning) type
        type_name: String,
    },

    /// The instance is neither wrapped nor natively freezable
    #[error("Instance of '{type_name}' is not wrapped and does not support freezing")]
    NotWrappable {
        /// Type of the rejected instance
        type_name: String,
    },

    /// The deep-clone engine met a shape outside its taxonomy
    #[error("Type '{type_name}' not supported for cloning")]
    UnsupportedType {
        /// Type that could not be cloned
        type_name: String,
    },

    /// No property with this name is declared on the type
    #[error("Type '{type_name}' has no property '{property}'")]
    UnknownProperty {
        /// Type that was accessed
        type_name: String,
        /// Requested property name
        property: String,
    },

    /// The property has no setter
    #[error("Property '{property}' on '{type_name}' is read-only")]
    ReadOnlyProperty {
        /// Type that was accessed
        type_name: String,
        /// Read-only property name
        property: String,
    },

    /// Type mismatch error
    #[error("Type error: expected {expected}, got {got}")]
    TypeMismatch {
        /// Expected type
        expected: String,
        /// Actual type received
        got: String,
    },

    /// Structural change on a fixed-length sequence
    #[error("Cannot {operation} on a fixed-size array")]
    FixedSize {
        /// Rejected operation
        operation: &'static str,
    },

    /// Positional access past the end of a sequence
    #[error("Index {index} out of bounds for length {len}")]
    IndexOutOfBounds {
        /// Requested index
        index: usize,
        /// Length at the time of the call
        len: usize,
    },

    /// The underlying instance is already borrowed (re-entrant access)
    #[error("Instance of '{type_name}' is already borrowed")]
    BorrowConflict {
        /// Type of the borrowed instance
        type_name: String,
    },
}

impl PermafrostError {
    /// Build a frozen-access violation for `member` on `type_name`.
    pub fn frozen(member: impl Into<String>, type_name: impl Into<String>) -> Self {
        PermafrostError::FrozenAccess {
            member: member.into(),
            type_name: type_name.into(),
        }
    }

    /// Build a type mismatch error.
    pub fn mismatch(expected: impl Into<String>, got: impl Into<String>) -> Self {
        PermafrostError::TypeMismatch {
            expected: expected.into(),
            got: got.into(),
        }
    }

    /// Check if this is a frozen-access violation
    pub fn is_frozen_access(&self) -> bool {
        matches!(self, PermafrostError::FrozenAccess { .. })
    }
}

/// Result type alias for Permafrost operations
pub type Result<T> = std::result::Result<T, PermafrostError>;
