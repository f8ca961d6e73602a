//! The frozen-state cell shared by one lineage of wrappers and proxies

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Shared frozen flag.
///
/// Every wrapper and proxy created from one wrap or clone event holds a
/// handle to the same cell, so `freeze()` through any of them is visible
/// through all of them. Once set, a cell never becomes unfrozen again:
/// thawing always produces a copy attached to a new cell.
#[derive(Clone, Default)]
pub struct FrozenCell(Rc<Cell<bool>>);

impl FrozenCell {
    /// Create a new cell in the given state
    pub fn new(frozen: bool) -> Self {
        Self(Rc::new(Cell::new(frozen)))
    }

    /// Set the cell frozen. Idempotent.
    pub fn freeze(&self) {
        self.0.set(true);
    }

    /// Whether the lineage is frozen
    pub fn is_frozen(&self) -> bool {
        self.0.get()
    }

    /// Check whether two handles refer to the same cell
    pub fn ptr_eq(&self, other: &FrozenCell) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for FrozenCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FrozenCell({})", self.is_frozen())
    }
}
