//! Host-provided enumerables outside the collection taxonomy

use std::rc::Rc;

use super::Value;

/// A lazily produced sequence of values that is not a collection.
///
/// Sources can be read through an `EnumerableProxy` but cannot be
/// deep-cloned: there is no way to build "another one of these".
pub trait ValueSource {
    /// Name used in diagnostics
    fn type_name(&self) -> &str;

    /// Produce the current values
    fn values(&self) -> Vec<Value>;
}

/// Shared handle to a [`ValueSource`].
#[derive(Clone)]
pub struct Source(Rc<dyn ValueSource>);

impl Source {
    /// Wrap a value source
    pub fn new(source: impl ValueSource + 'static) -> Self {
        Source(Rc::new(source))
    }

    /// Name used in diagnostics
    pub fn type_name(&self) -> &str {
        self.0.type_name()
    }

    /// Produce the current values
    pub fn values(&self) -> Vec<Value> {
        self.0.values()
    }

    /// Check whether two handles share the same source
    pub fn ptr_eq(&self, other: &Source) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<F> ValueSource for F
where
    F: Fn() -> Vec<Value>,
{
    fn type_name(&self) -> &str {
        "closure"
    }

    fn values(&self) -> Vec<Value> {
        self()
    }
}
