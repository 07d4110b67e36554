//! Class metadata and method lookup.

use crate::value::Heap;
use mython_ir::{Name, StmtRange};

/// A method of a class: name, formal parameters (not counting the
/// implicit `self`), and the body as a statement range in the module
/// arena. Methods are not first-class values.
#[derive(Clone, Debug)]
pub struct Method {
    pub name: Name,
    pub params: Vec<Name>,
    pub body: StmtRange,
}

/// Class metadata: name, ordered method list, optional parent.
///
/// Classes live for the whole program once registered, so instances can
/// hold plain `Heap<Class>` handles; the parent link points from child
/// to parent only and can never form a cycle.
#[derive(Debug)]
pub struct Class {
    name: Name,
    methods: Vec<Method>,
    parent: Option<Heap<Class>>,
}

impl Class {
    pub fn new(name: Name, methods: Vec<Method>, parent: Option<Heap<Class>>) -> Self {
        Class {
            name,
            methods,
            parent,
        }
    }

    #[inline]
    pub fn name(&self) -> Name {
        self.name
    }

    pub fn parent(&self) -> Option<&Heap<Class>> {
        self.parent.as_ref()
    }

    /// Look up a method by name: own methods first, in declaration
    /// order, then the parent chain.
    ///
    /// Method lists are small in practice, so a linear scan beats a
    /// hashed table and preserves source declaration precedence.
    pub fn get_method(&self, name: Name) -> Option<&Method> {
        self.methods
            .iter()
            .find(|method| method.name == name)
            .or_else(|| {
                self.parent
                    .as_ref()
                    .and_then(|parent| parent.get_method(name))
            })
    }

    /// Check that a method exists *and* takes exactly `argc` arguments
    /// (not counting the implicit `self`).
    pub fn has_method(&self, name: Name, argc: usize) -> bool {
        self.get_method(name)
            .is_some_and(|method| method.params.len() == argc)
    }
}
