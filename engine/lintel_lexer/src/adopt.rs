//! Adoption of an externally lexed token list.
//!
//! Some front ends hand this engine a list that was already tokenized
//! elsewhere (a standalone preprocessor, an AST-dump importer) together
//! with its own file table. Adoption transfers ownership: the external
//! representation is consumed, its file table becomes the stream's
//! registry, and every atom is re-interned as an internal token with
//! flags and bracket links reconstructed.

use smallvec::SmallVec;

use lintel_ir::{Language, TokenFlags, TokenId, TokenStream};

use crate::tokenize::guess_language;

/// One externally produced token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTok {
    pub text: String,
    pub line: u32,
    pub column: u32,
    /// Index into the owning [`RawTokenList::files`] table.
    pub file_index: u32,
    /// True if the token came out of a macro expansion.
    pub macro_expanded: bool,
}

/// An externally lexed token list with its file table.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RawTokenList {
    pub tokens: Vec<RawTok>,
    /// Distinct file paths; `RawTok::file_index` points in here.
    pub files: Vec<String>,
}

/// Adopt `list` into `stream`, consuming it.
///
/// Must only be called on an empty stream. The file table is transplanted
/// in order so the external file indices stay valid.
pub fn adopt(stream: &mut TokenStream<'_>, list: RawTokenList) {
    debug_assert!(stream.is_empty(), "adopt() on a non-empty stream");
    for file in &list.files {
        stream.append_file_if_new(file);
    }
    if stream.lang() == Language::Unknown {
        let file0 = list.files.first().map_or("", String::as_str);
        stream.set_lang(guess_language(file0));
    }
    let mut link_stack: SmallVec<[TokenId; 8]> = SmallVec::new();
    for tok in list.tokens {
        stream.add_token(&tok.text, tok.line, tok.column, tok.file_index, false);
        let Some(id) = stream.back() else { continue };
        if tok.macro_expanded {
            stream.flags_mut(id).set(TokenFlags::EXPANDED_MACRO);
        }
        match stream.text(id) {
            "(" | "[" | "{" => link_stack.push(id),
            ")" | "]" | "}" => {
                if let Some(open) = link_stack.pop() {
                    stream.set_links(open, id);
                }
            }
            _ => {}
        }
    }
}
