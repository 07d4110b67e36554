//! String interner for identifiers and string literals.
//!
//! Provides O(1) interning and lookup. Interned text is leaked to obtain
//! `'static` references; the interner lives for the whole process, which
//! is exactly the lifetime of a one-shot interpreter run.

use super::Name;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

struct Inner {
    /// Map from string content to index.
    map: FxHashMap<&'static str, u32>,
    /// Storage for string contents, indexed by `Name::raw()`.
    strings: Vec<&'static str>,
}

/// String interner.
///
/// Interning uses interior mutability so the interner can be borrowed
/// shared by the lexer, parser, and evaluator at the same time.
pub struct StringInterner {
    inner: RwLock<Inner>,
}

impl StringInterner {
    /// Create a new interner with the empty string pre-interned as
    /// [`Name::EMPTY`].
    pub fn new() -> Self {
        let mut inner = Inner {
            map: FxHashMap::default(),
            strings: Vec::with_capacity(64),
        };
        inner.map.insert("", 0);
        inner.strings.push("");
        StringInterner {
            inner: RwLock::new(inner),
        }
    }

    /// Intern a string, returning its [`Name`].
    pub fn intern(&self, s: &str) -> Name {
        // Fast path: already interned.
        {
            let guard = self.inner.read();
            if let Some(&idx) = guard.map.get(s) {
                return Name::from_raw(idx);
            }
        }

        let mut guard = self.inner.write();
        // Double-check after acquiring the write lock.
        if let Some(&idx) = guard.map.get(s) {
            return Name::from_raw(idx);
        }

        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        let idx = u32::try_from(guard.strings.len())
            .unwrap_or_else(|_| panic!("interner exceeded capacity: {} strings", guard.strings.len()));
        guard.strings.push(leaked);
        guard.map.insert(leaked, idx);
        Name::from_raw(idx)
    }

    /// Intern an owned string, avoiding a copy when it is not yet interned.
    pub fn intern_owned(&self, s: String) -> Name {
        {
            let guard = self.inner.read();
            if let Some(&idx) = guard.map.get(s.as_str()) {
                return Name::from_raw(idx);
            }
        }

        let mut guard = self.inner.write();
        if let Some(&idx) = guard.map.get(s.as_str()) {
            return Name::from_raw(idx);
        }

        let leaked: &'static str = Box::leak(s.into_boxed_str());
        let idx = u32::try_from(guard.strings.len())
            .unwrap_or_else(|_| panic!("interner exceeded capacity: {} strings", guard.strings.len()));
        guard.strings.push(leaked);
        guard.map.insert(leaked, idx);
        Name::from_raw(idx)
    }

    /// Look up the text for a [`Name`].
    ///
    /// # Panics
    /// Panics if `name` was not produced by this interner.
    pub fn lookup(&self, name: Name) -> &'static str {
        self.inner.read().strings[name.raw() as usize]
    }

    /// Number of interned strings (including the pre-interned empty string).
    pub fn len(&self) -> usize {
        self.inner.read().strings.len()
    }

    /// Check if only the empty string is interned.
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}
