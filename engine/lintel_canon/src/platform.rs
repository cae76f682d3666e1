//! Platform-dependent type alias canonicalization.
//!
//! Rewrites tokens naming pointer-width-dependent aliases into the
//! canonical single-token form for the configured target:
//!
//! - 32-bit: `size_t` → `long` with `UNSIGNED|LONG`
//! - 64-bit: `size_t` → `long` with `UNSIGNED|LONG|LONG_LONG`
//!
//! The original spelling is kept on the token for diagnostics. With an
//! unconfigured platform the pass is a no-op. Postcondition: no alias
//! token remains in the sequence.

use tracing::trace;

use lintel_ir::{PlatformBits, TokenFlags, TokenStream};

/// Pointer-width aliases and their signedness.
const ALIASES: &[(&str, bool)] = &[
    ("size_t", true),
    ("uintptr_t", true),
    ("ssize_t", false),
    ("ptrdiff_t", false),
    ("intptr_t", false),
];

/// Rewrite platform-dependent type aliases in place.
pub fn simplify_platform_types(stream: &mut TokenStream<'_>) {
    let bits = stream.settings().platform.bits;
    if bits == PlatformBits::Unknown {
        return;
    }
    let mut cur = stream.front();
    while let Some(tok) = cur {
        let found = ALIASES
            .iter()
            .find(|(alias, _)| *alias == stream.text(tok))
            .copied();
        if let Some((alias, unsigned)) = found {
            trace!(alias, "platform type canonicalized");
            stream.set_orig_name(tok, alias);
            stream.set_text(tok, "long");
            let flags = stream.flags_mut(tok);
            // The canonical spelling is a keyword even though the alias
            // was not; keep the flag in step with the value.
            flags.set(TokenFlags::KEYWORD);
            if unsigned {
                flags.set(TokenFlags::UNSIGNED);
            } else {
                flags.set(TokenFlags::SIGNED);
            }
            flags.set(TokenFlags::LONG);
            if bits == PlatformBits::Bits64 {
                flags.set(TokenFlags::LONG_LONG);
            }
        }
        cur = stream.next(tok);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lintel_ir::{Language, Platform, Settings};
    use pretty_assertions::assert_eq;

    fn stream_with(bits: Platform) -> Settings {
        Settings {
            platform: bits,
            ..Settings::default()
        }
    }

    fn push_all<'cfg>(s: &mut TokenStream<'cfg>, code: &str) {
        for (i, word) in code.split_whitespace().enumerate() {
            s.add_token(word, 1, i as u32 + 1, 0, false);
        }
    }

    #[test]
    fn size_t_becomes_unsigned_long_long_on_64bit() {
        let settings = stream_with(Platform::bits64());
        let mut s = TokenStream::new(&settings, Language::Cpp);
        push_all(&mut s, "size_t n ;");
        simplify_platform_types(&mut s);

        let tok = s.front().unwrap();
        assert_eq!(s.text(tok), "long");
        assert_eq!(s.orig_name(tok), Some("size_t"));
        let flags = s.flags(tok);
        assert!(flags.is_unsigned());
        assert!(flags.is_long());
        assert!(flags.is_long_long());
    }

    #[test]
    fn size_t_becomes_unsigned_long_on_32bit() {
        let settings = stream_with(Platform::bits32());
        let mut s = TokenStream::new(&settings, Language::Cpp);
        push_all(&mut s, "size_t n ;");
        simplify_platform_types(&mut s);

        let tok = s.front().unwrap();
        assert_eq!(s.text(tok), "long");
        let flags = s.flags(tok);
        assert!(flags.is_unsigned());
        assert!(flags.is_long());
        assert!(!flags.is_long_long());
    }

    #[test]
    fn signed_aliases_keep_signedness() {
        let settings = stream_with(Platform::bits64());
        let mut s = TokenStream::new(&settings, Language::Cpp);
        push_all(&mut s, "ptrdiff_t d ; intptr_t p ;");
        simplify_platform_types(&mut s);

        let d = s.front().unwrap();
        assert_eq!(s.text(d), "long");
        assert!(s.flags(d).is_signed());
        assert!(!s.flags(d).is_unsigned());
    }

    #[test]
    fn unknown_platform_is_a_noop() {
        let settings = Settings::default();
        let mut s = TokenStream::new(&settings, Language::Cpp);
        push_all(&mut s, "size_t n ;");
        simplify_platform_types(&mut s);
        assert_eq!(s.text(s.front().unwrap()), "size_t");
    }

    #[test]
    fn identifiers_are_untouched() {
        let settings = stream_with(Platform::bits64());
        let mut s = TokenStream::new(&settings, Language::Cpp);
        push_all(&mut s, "my_size_t n ;");
        simplify_platform_types(&mut s);
        assert_eq!(s.text(s.front().unwrap()), "my_size_t");
    }
}
