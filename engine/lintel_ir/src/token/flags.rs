//! Per-token classification flags packed into a single word.

/// Per-token classification flags.
///
/// The type-qualifier bits (`SIGNED`, `UNSIGNED`, `LONG`, `LONG_LONG`)
/// are set and cleared by the canonicalization passes; `KEYWORD` is set
/// at token creation from the active language's keyword table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct TokenFlags(u16);

impl TokenFlags {
    /// Token is a keyword of the active language/standard.
    pub const KEYWORD: u16 = 1 << 0;
    /// Explicit `signed` qualifier.
    pub const SIGNED: u16 = 1 << 1;
    /// `unsigned` qualifier.
    pub const UNSIGNED: u16 = 1 << 2;
    /// At least one `long` width modifier.
    pub const LONG: u16 = 1 << 3;
    /// Two `long` width modifiers (`long long`).
    pub const LONG_LONG: u16 = 1 << 4;
    /// Token came from a macro expansion in the preprocessed input.
    pub const EXPANDED_MACRO: u16 = 1 << 5;
    /// Token is one part of a value that was split across adjacent tokens.
    pub const SPLIT: u16 = 1 << 6;
    /// Arena tombstone. Never set on a reachable token.
    pub(crate) const DEAD: u16 = 1 << 7;

    /// The numeric-type qualifier bits.
    pub const TYPE_MASK: u16 = Self::SIGNED | Self::UNSIGNED | Self::LONG | Self::LONG_LONG;

    /// Bits that participate in the structural hash.
    pub const HASH_MASK: u16 = Self::TYPE_MASK | Self::KEYWORD;

    /// Empty flags (no bits set).
    pub const EMPTY: Self = TokenFlags(0);

    /// Create flags from raw bits.
    #[inline]
    pub const fn from_bits(bits: u16) -> Self {
        TokenFlags(bits)
    }

    /// Get the raw bits.
    #[inline]
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Check if a specific flag is set.
    #[inline]
    pub const fn contains(self, flag: u16) -> bool {
        self.0 & flag != 0
    }

    /// Set a flag.
    #[inline]
    pub fn set(&mut self, flag: u16) {
        self.0 |= flag;
    }

    /// Clear a flag.
    #[inline]
    pub fn clear(&mut self, flag: u16) {
        self.0 &= !flag;
    }

    /// Check if this token is a keyword.
    #[inline]
    pub const fn is_keyword(self) -> bool {
        self.contains(Self::KEYWORD)
    }

    /// Check for an explicit `signed` qualifier.
    #[inline]
    pub const fn is_signed(self) -> bool {
        self.contains(Self::SIGNED)
    }

    /// Check for an `unsigned` qualifier.
    #[inline]
    pub const fn is_unsigned(self) -> bool {
        self.contains(Self::UNSIGNED)
    }

    /// Check for a `long` width modifier.
    #[inline]
    pub const fn is_long(self) -> bool {
        self.contains(Self::LONG)
    }

    /// Check for a `long long` width modifier.
    #[inline]
    pub const fn is_long_long(self) -> bool {
        self.contains(Self::LONG_LONG)
    }

    /// Check if the token came from a macro expansion.
    #[inline]
    pub const fn is_expanded_macro(self) -> bool {
        self.contains(Self::EXPANDED_MACRO)
    }

    /// Check if the token is part of a split value.
    #[inline]
    pub const fn is_split(self) -> bool {
        self.contains(Self::SPLIT)
    }
}

// Compile-time assertion: TokenFlags is exactly 2 bytes.
const _: () = assert!(size_of::<TokenFlags>() == 2);
