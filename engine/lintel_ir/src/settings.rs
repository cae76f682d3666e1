//! Read-only analysis configuration consumed by the token stream.
//!
//! The settings subsystem proper (file loading, CLI mapping, library
//! configs) lives outside this engine; the stream only ever borrows a
//! [`Settings`] and reads the platform model and language standards.

/// Pointer-width model of the analyzed target.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlatformBits {
    /// No platform configured; platform-type canonicalization is skipped.
    #[default]
    Unknown,
    /// 32-bit target.
    Bits32,
    /// 64-bit target.
    Bits64,
}

/// Platform model for the analyzed target.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Platform {
    pub bits: PlatformBits,
}

impl Platform {
    /// 32-bit platform model.
    pub const fn bits32() -> Self {
        Platform {
            bits: PlatformBits::Bits32,
        }
    }

    /// 64-bit platform model.
    pub const fn bits64() -> Self {
        Platform {
            bits: PlatformBits::Bits64,
        }
    }
}

/// C language standard, ordered oldest to newest.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum CStandard {
    C89,
    C99,
    C11,
    C17,
    C23,
}

impl Default for CStandard {
    /// Defaults to the newest supported standard.
    fn default() -> Self {
        CStandard::C23
    }
}

/// C++ language standard, ordered oldest to newest.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum CppStandard {
    Cpp03,
    Cpp11,
    Cpp14,
    Cpp17,
    Cpp20,
    Cpp23,
    Cpp26,
}

impl Default for CppStandard {
    /// Defaults to the newest supported standard.
    fn default() -> Self {
        CppStandard::Cpp26
    }
}

/// Configured language standards for both dialects.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Standards {
    pub c: CStandard,
    pub cpp: CppStandard,
}

/// The read-only configuration slice this engine consumes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Settings {
    pub platform: Platform,
    pub standards: Standards,
}

/// Language tag of a token stream.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Language {
    /// Not yet determined; resolved from the source file extension at
    /// tokenization time.
    #[default]
    Unknown,
    C,
    Cpp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standards_are_ordered() {
        assert!(CStandard::C89 < CStandard::C99);
        assert!(CStandard::C11 <= CStandard::C23);
        assert!(CppStandard::Cpp03 < CppStandard::Cpp11);
        assert!(CppStandard::Cpp20 > CppStandard::Cpp17);
    }

    #[test]
    fn default_platform_is_unconfigured() {
        assert_eq!(Platform::default().bits, PlatformBits::Unknown);
        assert_eq!(Platform::bits64().bits, PlatformBits::Bits64);
    }
}
