//! Registry of classes and top-level functions.
//!
//! Class and function definitions are recorded here as the program
//! executes. Call expressions resolve through the registry rather than
//! through the local environment: a method body runs in a fresh
//! environment that holds only `self` and the parameters, yet
//! `Point(...)` inside it must still find the class.

use crate::class::Class;
use crate::value::Heap;
use mython_ir::{Name, StmtRange};
use rustc_hash::FxHashMap;

/// A top-level function. Unlike methods it has no `self`; like methods
/// it is not a first-class value and lives only in the registry.
#[derive(Clone, Debug)]
pub struct Function {
    pub name: Name,
    pub params: Vec<Name>,
    pub body: StmtRange,
}

/// What a call expression's name resolved to.
pub enum Callable {
    Class(Heap<Class>),
    Function(Heap<Function>),
}

/// Classes and functions known to the running program.
#[derive(Default)]
pub struct Registry {
    classes: FxHashMap<Name, Heap<Class>>,
    functions: FxHashMap<Name, Heap<Function>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a class, replacing any previous definition of the name.
    pub fn define_class(&mut self, class: Heap<Class>) {
        self.classes.insert(class.name(), class);
    }

    /// Look up a class by name.
    pub fn class(&self, name: Name) -> Option<Heap<Class>> {
        self.classes.get(&name).cloned()
    }

    /// Register a top-level function, replacing any previous definition.
    pub fn define_function(&mut self, function: Function) {
        self.functions.insert(function.name, Heap::new(function));
    }

    /// Look up a function by name.
    pub fn function(&self, name: Name) -> Option<Heap<Function>> {
        self.functions.get(&name).cloned()
    }

    /// Resolve a call target: classes take precedence over functions
    /// (a later `def` cannot silently shadow a class of the same name).
    pub fn callable(&self, name: Name) -> Option<Callable> {
        if let Some(class) = self.class(name) {
            return Some(Callable::Class(class));
        }
        self.function(name).map(Callable::Function)
    }
}
