//! AST structural validation.
//!
//! Downstream passes navigate `ast_parent`/`ast_op1`/`ast_op2` freely; a
//! corrupt tree turns every one of them into a liar. Validation walks the
//! whole sequence and verifies:
//!
//! - every AST link addresses a live member of this sequence
//! - every parent/child pair is reciprocal in both directions
//! - no token is its own ancestor
//!
//! Any violation is fatal for the translation unit and surfaces as an
//! [`InternalError`]; with `print` the error carries an indented dump of
//! the offending subtree.

use rustc_hash::FxHashSet;

use lintel_ir::{InternalError, TokenId, TokenStream};

use crate::builder::location_of;

/// Walk every AST root and verify the tree layer.
pub fn validate_ast(stream: &TokenStream<'_>, print: bool) -> Result<(), InternalError> {
    let members: FxHashSet<TokenId> = stream.iter().collect();

    for tok in stream.iter() {
        // Links must stay inside the sequence.
        for link in [
            stream.get(tok).ast_parent(),
            stream.get(tok).ast_op1(),
            stream.get(tok).ast_op2(),
        ] {
            if link.is_valid() && !members.contains(&link) {
                return Err(error(stream, tok, "AST link leaves the token sequence", print));
            }
        }

        // Operand back-references must reciprocate.
        for child in [stream.ast_op1(tok), stream.ast_op2(tok)].into_iter().flatten() {
            if stream.ast_parent(child) != Some(tok) {
                return Err(error(
                    stream,
                    child,
                    "AST operand does not reference its parent",
                    print,
                ));
            }
        }
        if let Some(parent) = stream.ast_parent(tok) {
            if stream.ast_op1(parent) != Some(tok) && stream.ast_op2(parent) != Some(tok) {
                return Err(error(
                    stream,
                    tok,
                    "AST parent does not list this token as an operand",
                    print,
                ));
            }
        }

        // No token may be its own ancestor.
        let mut steps = 0usize;
        let mut cur = stream.ast_parent(tok);
        while let Some(ancestor) = cur {
            if ancestor == tok || steps > members.len() {
                return Err(error(stream, tok, "cycle in AST parent chain", print));
            }
            steps += 1;
            cur = stream.ast_parent(ancestor);
        }
    }
    Ok(())
}

/// Assemble the fatal error, attaching a subtree dump when requested.
fn error(
    stream: &TokenStream<'_>,
    tok: TokenId,
    message: &str,
    print: bool,
) -> InternalError {
    let err = InternalError::new(location_of(stream, tok), message);
    if print {
        err.with_details(dump_subtree(stream, ast_top(stream, tok)))
    } else {
        err
    }
}

/// Climb to the topmost reachable ancestor, guarding against cycles.
fn ast_top(stream: &TokenStream<'_>, tok: TokenId) -> TokenId {
    let mut seen: FxHashSet<TokenId> = FxHashSet::default();
    let mut cur = tok;
    while let Some(parent) = stream.ast_parent(cur) {
        if !seen.insert(cur) {
            break;
        }
        cur = parent;
    }
    cur
}

/// Indented, cycle-safe rendering of a subtree for failure dumps.
fn dump_subtree(stream: &TokenStream<'_>, root: TokenId) -> String {
    fn walk(
        stream: &TokenStream<'_>,
        tok: TokenId,
        indent: usize,
        seen: &mut FxHashSet<TokenId>,
        out: &mut String,
    ) {
        out.push_str(&" ".repeat(indent));
        out.push_str(stream.text(tok));
        if !seen.insert(tok) {
            out.push_str(" <cycle>\n");
            return;
        }
        out.push('\n');
        for child in [stream.ast_op1(tok), stream.ast_op2(tok)].into_iter().flatten() {
            walk(stream, child, indent + 2, seen, out);
        }
    }

    let mut out = String::new();
    let mut seen = FxHashSet::default();
    walk(stream, root, 0, &mut seen, &mut out);
    out
}
