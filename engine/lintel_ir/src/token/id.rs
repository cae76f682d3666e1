//! Typed index into the token arena.

use std::fmt;

/// Typed index addressing a token slot in a [`TokenStream`](crate::TokenStream).
///
/// Uses `u32::MAX` as a sentinel for "no token", which keeps sequence and
/// AST link fields at four bytes each instead of eight for `Option`.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct TokenId(u32);

impl TokenId {
    /// Sentinel value indicating no token.
    pub const NONE: TokenId = TokenId(u32::MAX);

    /// Create a `TokenId` from a raw index.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        TokenId(raw)
    }

    /// Get the raw `u32` index.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Check if this is a valid index (not the `NONE` sentinel).
    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 != u32::MAX
    }

    /// Slot index for arena access.
    #[inline]
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }

    /// Convert to `Option`, mapping the sentinel to `None`.
    #[inline]
    pub const fn get(self) -> Option<TokenId> {
        if self.is_valid() {
            Some(self)
        } else {
            None
        }
    }
}

impl fmt::Debug for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "TokenId({})", self.0)
        } else {
            write!(f, "TokenId(NONE)")
        }
    }
}

// Compile-time assertion: TokenId is exactly 4 bytes.
const _: () = assert!(size_of::<TokenId>() == 4);
