//! Stream construction from preprocessed text.
//!
//! The scanner ([`RawToken`]) classifies atoms; the driver here owns the
//! stateful part: line/column bookkeeping, the `#file`/`#line`/`#endfile`
//! directive stacks, macro-expansion marking, and bracket linking. On any
//! failure the partially built stream is deallocated before returning.

use logos::Logos as _;
use smallvec::SmallVec;

use lintel_ir::{Language, TokenFlags, TokenId, TokenStream};

use crate::lex_error::{LexError, LexErrorKind};
use crate::path::simplify_path;
use crate::raw_token::RawToken;

/// Directive whose operand is still expected.
#[derive(PartialEq, Eq, Clone, Copy)]
enum Pending {
    None,
    /// `#file` seen; a quoted path must follow.
    File,
    /// `#line` seen; a line number may follow.
    Line,
}

/// Resolve an `Unknown` language tag from the source file name.
pub(crate) fn guess_language(file0: &str) -> Language {
    if file0.ends_with(".c") {
        Language::C
    } else {
        Language::Cpp
    }
}

/// Build a fresh stream from preprocessed code.
///
/// The input contract (guaranteed by the preprocessing stage): no
/// comments, no multi-line string literals, ASCII text. Must only be
/// called on an empty stream; on failure the stream is deallocated and
/// the unit should be abandoned.
pub fn tokenize(stream: &mut TokenStream<'_>, code: &str, file0: &str) -> Result<(), LexError> {
    debug_assert!(stream.is_empty(), "tokenize() on a non-empty stream");
    if stream.lang() == Language::Unknown {
        stream.set_lang(guess_language(file0));
    }
    stream.append_file_if_new(file0);

    let mut lexer = RawToken::lexer(code);
    // Current position in the file being read.
    let mut line: u32 = 1;
    let mut line_start: usize = 0;
    let mut file_index: u32 = 0;
    // (file index, line) to restore at each `#endfile`.
    let mut file_stack: SmallVec<[(u32, u32); 8]> = SmallVec::new();
    let mut link_stack: SmallVec<[TokenId; 8]> = SmallVec::new();
    let mut expanded = false;
    let mut pending = Pending::None;

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let Ok(raw) = result else {
            return fail(stream, line, LexErrorKind::InvalidToken);
        };
        match raw {
            RawToken::Newline => {
                if pending == Pending::File {
                    return fail(stream, line, LexErrorKind::MalformedFileDirective);
                }
                pending = Pending::None;
                line += 1;
                line_start = span.end;
                expanded = false;
                continue;
            }
            RawToken::MacroMark => {
                expanded = true;
                continue;
            }
            RawToken::FileDirective => {
                pending = Pending::File;
                continue;
            }
            RawToken::LineDirective => {
                pending = Pending::Line;
                continue;
            }
            RawToken::EndfileDirective => {
                let Some((prev_file, prev_line)) = file_stack.pop() else {
                    return fail(stream, line, LexErrorKind::UnbalancedFileDirective);
                };
                file_index = prev_file;
                line = prev_line;
                continue;
            }
            RawToken::String
            | RawToken::Number
            | RawToken::DotNumber
            | RawToken::CharLit
            | RawToken::Ident
            | RawToken::Punct => {}
        }

        // A value-producing token: first satisfy a pending directive.
        match pending {
            Pending::File => {
                if raw != RawToken::String {
                    return fail(stream, line, LexErrorKind::MalformedFileDirective);
                }
                pending = Pending::None;
                let quoted = lexer.slice();
                let path = simplify_path(&quoted[1..quoted.len() - 1]);
                file_stack.push((file_index, line + 1));
                file_index = stream.append_file_if_new(&path);
                // The newline ending the directive line starts line 1 of
                // the included file.
                line = 0;
                continue;
            }
            Pending::Line => {
                pending = Pending::None;
                if raw == RawToken::Number {
                    if let Ok(n) = lexer.slice().parse::<u32>() {
                        // The directive names the line of the next row;
                        // the newline ending this row does the increment.
                        line = n.saturating_sub(1);
                    }
                    continue;
                }
            }
            Pending::None => {}
        }

        let column = (span.start - line_start + 1) as u32;
        if raw == RawToken::DotNumber {
            let text = format!("0{}", lexer.slice());
            push(stream, &text, line, column, file_index, expanded, &mut link_stack);
        } else {
            push(stream, lexer.slice(), line, column, file_index, expanded, &mut link_stack);
        }
    }
    if pending == Pending::File {
        return fail(stream, line, LexErrorKind::MalformedFileDirective);
    }
    Ok(())
}

/// Deallocate the partial stream and report the failure.
fn fail(stream: &mut TokenStream<'_>, line: u32, kind: LexErrorKind) -> Result<(), LexError> {
    stream.deallocate_tokens();
    Err(LexError::new(line, kind))
}

/// Append one token, then apply the stream-construction bookkeeping that
/// `add_token` itself does not own: macro-expansion flagging and bracket
/// linking.
fn push(
    stream: &mut TokenStream<'_>,
    text: &str,
    line: u32,
    column: u32,
    file_index: u32,
    expanded: bool,
    link_stack: &mut SmallVec<[TokenId; 8]>,
) {
    stream.add_token(text, line, column, file_index, false);
    let Some(id) = stream.back() else { return };
    if expanded {
        stream.flags_mut(id).set(TokenFlags::EXPANDED_MACRO);
    }
    match text {
        "(" | "[" | "{" => link_stack.push(id),
        ")" | "]" | "}" => {
            if let Some(open) = link_stack.pop() {
                stream.set_links(open, id);
            }
        }
        _ => {}
    }
}
