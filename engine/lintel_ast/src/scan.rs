//! Shape scanners that run before (or without) the AST.
//!
//! These classifiers answer structural questions with bounded lookahead
//! and depth counting only, because they are needed while the AST may not
//! exist yet. Absence is a normal outcome: every function returns `None`
//! for "does not match", never an error.

use lintel_ir::{TokenId, TokenStream};

/// Find the matching close bracket by link, falling back to a forward
/// depth scan when the stream carries no links.
fn matching_close(
    stream: &TokenStream<'_>,
    open: TokenId,
    open_text: &str,
    close_text: &str,
) -> Option<TokenId> {
    stream
        .link(open)
        .or_else(|| scan_balanced(stream, open, open_text, close_text))
}

/// Decide whether `tok` opens a function declarator head.
///
/// `tok` is a `(` (or its matching `)`) preceded by the declarator name;
/// the head matches when the token immediately after the close paren is
/// literally `ends_with`. Returns the close paren on success.
pub fn is_function_head(
    stream: &TokenStream<'_>,
    tok: TokenId,
    ends_with: &str,
) -> Option<TokenId> {
    let open = match stream.text(tok) {
        "(" => tok,
        ")" => stream.link(tok)?,
        _ => return None,
    };
    // A declarator head is introduced by the function name.
    let name = stream.prev(open)?;
    if !stream.is_name(name) || stream.flags(name).is_keyword() {
        return None;
    }
    let close = matching_close(stream, open, "(", ")")?;
    let after = stream.next(close)?;
    if stream.text(after) == ends_with {
        Some(close)
    } else {
        None
    }
}

/// Decide whether a `[` token opens a lambda capture list.
///
/// Matches when the bracketed region uses only capture syntax
/// (identifiers, `this`, `&`, `=`, `*`, `,`, `...`) and the close bracket
/// is followed by a lambda continuation. Returns the closing `]`.
pub fn is_lambda_capture_list(stream: &TokenStream<'_>, tok: TokenId) -> Option<TokenId> {
    if !stream.is_cpp() || stream.text(tok) != "[" {
        return None;
    }
    // `a[...]`, `(...)[...]` and `][` are subscripts, not captures.
    if let Some(prev) = stream.prev(tok) {
        if stream.is_name(prev) && !stream.flags(prev).is_keyword() {
            return None;
        }
        if stream.is_literal(prev) || matches!(stream.text(prev), ")" | "]") {
            return None;
        }
    }
    let close = matching_close(stream, tok, "[", "]")?;

    let mut cur = stream.next(tok)?;
    while cur != close {
        let text = stream.text(cur);
        let capture_atom = text == "this"
            || (stream.is_name(cur) && !stream.flags(cur).is_keyword())
            || matches!(text, "&" | "=" | "*" | "," | "...");
        if !capture_atom {
            return None;
        }
        cur = stream.next(cur)?;
    }

    let after = stream.next(close)?;
    if matches!(
        stream.text(after),
        "(" | "{" | "->" | "mutable" | "noexcept" | "constexpr"
    ) {
        Some(close)
    } else {
        None
    }
}

/// Find the token that ends a lambda body, without using the AST.
///
/// `tok` is the `[` introducing the lambda. Scans by depth counting over
/// the capture list, the optional parameter parens and the specifier run,
/// then returns the `}` closing the body; `None` when no balanced end
/// exists before the sequence ends.
pub fn find_lambda_end_token_without_ast(
    stream: &TokenStream<'_>,
    tok: TokenId,
) -> Option<TokenId> {
    if stream.text(tok) != "[" {
        return None;
    }
    let capture_close = scan_balanced(stream, tok, "[", "]")?;
    let mut cur = stream.next(capture_close)?;

    if stream.text(cur) == "(" {
        let params_close = scan_balanced(stream, cur, "(", ")")?;
        cur = stream.next(params_close)?;
    }

    // Specifiers and a possible trailing return type before the body.
    while stream.text(cur) != "{" {
        let text = stream.text(cur);
        let in_head = matches!(
            text,
            "mutable" | "constexpr" | "noexcept" | "->" | "::" | "*" | "&" | "const" | "<" | ">"
        ) || stream.is_name(cur);
        if !in_head {
            return None;
        }
        cur = stream.next(cur)?;
    }
    scan_balanced(stream, cur, "{", "}")
}

/// Forward depth scan from an open bracket to its balanced close,
/// ignoring links entirely.
fn scan_balanced(
    stream: &TokenStream<'_>,
    open: TokenId,
    open_text: &str,
    close_text: &str,
) -> Option<TokenId> {
    let mut depth = 0u32;
    let mut cur = Some(open);
    while let Some(t) = cur {
        let text = stream.text(t);
        if text == open_text {
            depth += 1;
        } else if text == close_text {
            depth -= 1;
            if depth == 0 {
                return Some(t);
            }
        }
        cur = stream.next(t);
    }
    None
}
