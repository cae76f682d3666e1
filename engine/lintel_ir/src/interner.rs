//! String interner for token values.
//!
//! Every token value in a stream is interned exactly once; tokens carry
//! [`Name`] handles instead of owned strings, so cloning a token is a
//! handful of word copies and value comparison is an integer compare.
//!
//! Interned strings are leaked: a stream lives for the duration of one
//! translation unit's analysis, and the set of distinct token spellings
//! is small compared to the token count.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::Name;

struct Inner {
    /// Map from string content to index in `strings`.
    map: FxHashMap<&'static str, u32>,
    /// Storage for interned contents, indexed by `Name::raw()`.
    strings: Vec<&'static str>,
}

/// Error when interning a string fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternError {
    /// Interner exceeded capacity (over 4 billion distinct strings).
    Overflow { count: usize },
}

impl std::fmt::Display for InternError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InternError::Overflow { count } => write!(
                f,
                "interner exceeded capacity: {} strings, max is {}",
                count,
                u32::MAX
            ),
        }
    }
}

impl std::error::Error for InternError {}

/// String interner with interior mutability.
///
/// `intern` takes `&self` so that read-mostly passes can resolve and
/// intern through a shared stream reference. The lock is a
/// `parking_lot::RwLock`; resolution takes the read path.
pub struct StringInterner {
    inner: RwLock<Inner>,
}

impl StringInterner {
    /// Create a new interner with the empty string pre-interned at index 0.
    pub fn new() -> Self {
        let mut map = FxHashMap::default();
        let empty: &'static str = "";
        map.insert(empty, 0);
        StringInterner {
            inner: RwLock::new(Inner {
                map,
                strings: vec![empty],
            }),
        }
    }

    /// Intern a string, returning its `Name`.
    ///
    /// Repeated calls with equal contents return equal names.
    pub fn intern(&self, text: &str) -> Name {
        self.try_intern(text)
            .unwrap_or_else(|e| panic!("{e}"))
    }

    /// Fallible interning; fails only on index-space exhaustion.
    pub fn try_intern(&self, text: &str) -> Result<Name, InternError> {
        if text.is_empty() {
            return Ok(Name::EMPTY);
        }
        if let Some(&idx) = self.inner.read().map.get(text) {
            return Ok(Name::from_raw(idx));
        }
        let mut inner = self.inner.write();
        // Double-check under the write lock.
        if let Some(&idx) = inner.map.get(text) {
            return Ok(Name::from_raw(idx));
        }
        let idx = u32::try_from(inner.strings.len()).map_err(|_| InternError::Overflow {
            count: inner.strings.len(),
        })?;
        let leaked: &'static str = Box::leak(text.to_owned().into_boxed_str());
        inner.map.insert(leaked, idx);
        inner.strings.push(leaked);
        Ok(Name::from_raw(idx))
    }

    /// Resolve a `Name` back to its contents.
    ///
    /// # Panics
    /// Panics if `name` did not come from this interner.
    pub fn resolve(&self, name: Name) -> &'static str {
        self.inner.read().strings[name.raw() as usize]
    }

    /// Number of distinct interned strings (including the empty string).
    pub fn len(&self) -> usize {
        self.inner.read().strings.len()
    }

    /// Check if only the empty string is interned.
    pub fn is_empty(&self) -> bool {
        self.len() == 1
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        StringInterner::new()
    }
}
