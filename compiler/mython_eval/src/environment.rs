//! Name-binding environment.
//!
//! An environment is a flat map from identifier to value: Mython has no
//! lexical scope nesting, so there is no parent chain. Every method or
//! function call builds a fresh environment holding only `self` (when
//! applicable) and the formal parameters; the global scope is a single
//! environment threaded by the driver. An instance's field table is an
//! environment as well.

use crate::value::Value;
use mython_ir::Name;
use rustc_hash::FxHashMap;

/// A flat identifier → value map for one scope.
#[derive(Debug, Default)]
pub struct Environment {
    bindings: FxHashMap<Name, Value>,
}

impl Environment {
    /// Create a new empty environment.
    pub fn new() -> Self {
        Environment {
            bindings: FxHashMap::default(),
        }
    }

    /// Look up a binding. Lookup is exact; there is no fallback scope.
    #[inline]
    pub fn get(&self, name: Name) -> Option<Value> {
        self.bindings.get(&name).cloned()
    }

    /// Insert or overwrite a binding. Shadowing is by replacement.
    #[inline]
    pub fn set(&mut self, name: Name, value: Value) {
        self.bindings.insert(name, value);
    }

    /// Check whether a binding exists.
    #[inline]
    pub fn contains(&self, name: Name) -> bool {
        self.bindings.contains_key(&name)
    }

    /// Number of bindings in this scope.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Check if the scope holds no bindings.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
