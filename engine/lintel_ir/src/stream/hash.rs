//! Structural fingerprint of a token sequence.
//!
//! Produces a location-free hash of the whole sequence for cheap
//! equivalence probes between streams. Two sequences with identical
//! lexical content hash identically regardless of which files they came
//! from or how they were built; a single changed value changes the hash
//! with ordinary hash-collision probability. This is an equivalence
//! probe, not a cryptographic digest.

use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

use crate::token::TokenFlags;
use crate::TokenStream;

impl TokenStream<'_> {
    /// Hash every token's value, classification flags and sequence
    /// position into one fingerprint.
    ///
    /// Locations and file paths are deliberately excluded; interner
    /// handles are resolved to content so independently constructed
    /// streams agree.
    pub fn calculate_hash(&self) -> u64 {
        let mut hasher = FxHasher::default();
        for (position, tok) in self.iter().enumerate() {
            position.hash(&mut hasher);
            self.text(tok).hash(&mut hasher);
            (self.flags(tok).bits() & TokenFlags::HASH_MASK).hash(&mut hasher);
        }
        hasher.finish()
    }
}
