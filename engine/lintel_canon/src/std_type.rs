//! Standard type-specifier run collapsing.
//!
//! Collapses each contiguous run of standard type-specifier keywords
//! (`unsigned long long int`, `signed short`, `long double`, ...) into a
//! single token carrying composite flags, at the first token's location.
//! The retained value is the base-type keyword (`double` > `float` >
//! `char` > `short` > `long` > `int`); width and signedness live in the
//! flags, so `long long` is value `long` with `LONG|LONG_LONG` set.
//!
//! The pass is idempotent: a lone token that already carries type flags
//! is a previously collapsed result and is left alone.

use tracing::trace;

use lintel_ir::{TokenFlags, TokenId, TokenStream};

/// Keywords that may form a specifier run.
fn is_specifier(text: &str) -> bool {
    matches!(
        text,
        "signed" | "unsigned" | "long" | "short" | "int" | "char" | "float" | "double"
    )
}

/// Collapse standard type-specifier runs in place.
pub fn simplify_std_type(stream: &mut TokenStream<'_>) {
    let mut cur = stream.front();
    while let Some(tok) = cur {
        if !is_specifier(stream.text(tok)) {
            cur = stream.next(tok);
            continue;
        }
        // Collect the maximal specifier run starting here.
        let mut run: Vec<TokenId> = vec![tok];
        let mut after = stream.next(tok);
        while let Some(t) = after {
            if !is_specifier(stream.text(t)) {
                break;
            }
            run.push(t);
            after = stream.next(t);
        }

        collapse_run(stream, &run);
        cur = after;
    }
}

/// Merge one run into its first token.
fn collapse_run(stream: &mut TokenStream<'_>, run: &[TokenId]) {
    let first = run[0];
    if run.len() == 1 && stream.flags(first).bits() & TokenFlags::TYPE_MASK != 0 {
        // Already collapsed by an earlier pass.
        return;
    }

    let mut signed = false;
    let mut unsigned = false;
    let mut longs = 0u32;
    let mut base: Option<&str> = None;
    for &t in run {
        match stream.text(t) {
            "signed" => signed = true,
            "unsigned" => unsigned = true,
            "long" => longs += 1,
            text => base = Some(pick_base(base, text)),
        }
        // Fold in flags from tokens that were themselves collapsed before.
        let flags = stream.flags(t);
        signed |= flags.is_signed();
        unsigned |= flags.is_unsigned();
        if flags.is_long_long() {
            longs = longs.max(2);
        } else if flags.is_long() {
            longs = longs.max(1);
        }
    }
    let base = base.unwrap_or(if longs > 0 { "long" } else { "int" });

    if run.len() > 1 {
        let spelling: Vec<&str> = run.iter().map(|&t| stream.text(t)).collect();
        let spelling = spelling.join(" ");
        trace!(%spelling, base, "std type run collapsed");
        stream.set_orig_name(first, &spelling);
    }
    stream.set_text(first, base);
    let flags = stream.flags_mut(first);
    // Retained value is always a type keyword.
    flags.set(TokenFlags::KEYWORD);
    if signed {
        flags.set(TokenFlags::SIGNED);
    }
    if unsigned {
        flags.set(TokenFlags::UNSIGNED);
    }
    if longs >= 1 {
        flags.set(TokenFlags::LONG);
    }
    if longs >= 2 {
        flags.set(TokenFlags::LONG_LONG);
    }
    for &t in &run[1..] {
        stream.erase(t);
    }
}

/// Base-type priority: `double` > `float` > `char` > `short` > everything.
fn pick_base<'t>(current: Option<&'t str>, candidate: &'t str) -> &'t str {
    fn rank(text: &str) -> u32 {
        match text {
            "double" => 4,
            "float" => 3,
            "char" => 2,
            "short" => 1,
            _ => 0,
        }
    }
    match current {
        Some(cur) if rank(cur) >= rank(candidate) => cur,
        _ => candidate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lintel_ir::{Language, Settings};
    use pretty_assertions::assert_eq;

    fn push_all<'cfg>(s: &mut TokenStream<'cfg>, code: &str) {
        for (i, word) in code.split_whitespace().enumerate() {
            s.add_token(word, 1, i as u32 + 1, 0, false);
        }
    }

    fn texts(s: &TokenStream<'_>) -> Vec<String> {
        s.iter().map(|t| s.text(t).to_owned()).collect()
    }

    #[test]
    fn collapses_unsigned_long_long_int() {
        let settings = Settings::default();
        let mut s = TokenStream::new(&settings, Language::Cpp);
        push_all(&mut s, "unsigned long long int x ;");
        simplify_std_type(&mut s);

        assert_eq!(texts(&s), ["long", "x", ";"]);
        let tok = s.front().unwrap();
        let flags = s.flags(tok);
        assert!(flags.is_unsigned());
        assert!(flags.is_long());
        assert!(flags.is_long_long());
        assert!(!flags.is_signed());
        assert_eq!(s.get(tok).column(), 1, "kept node stays at the run start");
        assert_eq!(s.orig_name(tok), Some("unsigned long long int"));
    }

    #[test]
    fn collapse_is_idempotent() {
        let settings = Settings::default();
        let mut s = TokenStream::new(&settings, Language::Cpp);
        push_all(&mut s, "unsigned long long int x ;");
        simplify_std_type(&mut s);
        let hash = s.calculate_hash();
        simplify_std_type(&mut s);
        assert_eq!(s.calculate_hash(), hash, "second pass is a no-op");
        let flags = s.flags(s.front().unwrap());
        assert!(flags.is_long_long(), "width flags survive the second pass");
    }

    #[test]
    fn signedness_defaults_base_to_int() {
        let settings = Settings::default();
        let mut s = TokenStream::new(&settings, Language::Cpp);
        push_all(&mut s, "unsigned x ; signed char c ;");
        simplify_std_type(&mut s);
        assert_eq!(texts(&s), ["int", "x", ";", "char", "c", ";"]);
        let ids: Vec<TokenId> = s.iter().collect();
        assert!(s.flags(ids[0]).is_unsigned());
        assert!(s.flags(ids[3]).is_signed());
    }

    #[test]
    fn long_double_keeps_double_base() {
        let settings = Settings::default();
        let mut s = TokenStream::new(&settings, Language::Cpp);
        push_all(&mut s, "long double d ;");
        simplify_std_type(&mut s);
        assert_eq!(texts(&s), ["double", "d", ";"]);
        assert!(s.flags(s.front().unwrap()).is_long());
    }

    #[test]
    fn short_int_keeps_short_base() {
        let settings = Settings::default();
        let mut s = TokenStream::new(&settings, Language::Cpp);
        push_all(&mut s, "short int x ;");
        simplify_std_type(&mut s);
        assert_eq!(texts(&s), ["short", "x", ";"]);
    }

    #[test]
    fn lone_long_gains_width_flag_only_once() {
        let settings = Settings::default();
        let mut s = TokenStream::new(&settings, Language::Cpp);
        push_all(&mut s, "long x ;");
        simplify_std_type(&mut s);
        let tok = s.front().unwrap();
        assert_eq!(s.text(tok), "long");
        assert!(s.flags(tok).is_long());
        assert!(!s.flags(tok).is_long_long());
        simplify_std_type(&mut s);
        assert!(!s.flags(s.front().unwrap()).is_long_long(), "idempotent on lone long");
    }

    #[test]
    fn plain_int_is_untouched() {
        let settings = Settings::default();
        let mut s = TokenStream::new(&settings, Language::Cpp);
        push_all(&mut s, "int x ;");
        let before = s.calculate_hash();
        simplify_std_type(&mut s);
        assert_eq!(s.calculate_hash(), before);
    }

    #[test]
    fn separate_declarations_do_not_merge() {
        let settings = Settings::default();
        let mut s = TokenStream::new(&settings, Language::Cpp);
        push_all(&mut s, "int a ; long b ;");
        simplify_std_type(&mut s);
        assert_eq!(texts(&s), ["int", "a", ";", "long", "b", ";"]);
    }
}
