//! The token stream: a doubly-linked sequence of tokens over an arena.
//!
//! One stream holds every token of one translation unit (and its included
//! files). Analysis passes mutate the sequence in place through the
//! primitives here; the stream keeps the front/back bounds, the file
//! registry and the AST back-references consistent across arbitrary
//! insertion, splicing and deletion.
//!
//! # Bounds descriptor
//!
//! The front/back pair lives in a separately allocated, reference-counted
//! [`TokensFrontBack`] record rather than inline fields. A stream can be
//! relocated between owners while outstanding handles to the record keep
//! observing the current bounds. This is lifetime continuity, not a
//! concurrency mechanism: one stream is mutated by one pipeline at a time.

mod hash;

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use smallvec::SmallVec;

use crate::settings::{Language, Settings};
use crate::token::{Token, TokenArena, TokenFlags, TokenId};
use crate::{keywords, numbers, StringInterner};

/// Shared front/back bounds of a token sequence.
///
/// Stored behind `Arc` so that relocating the owning stream never
/// invalidates an already-issued handle to the bounds.
#[derive(Debug)]
pub struct TokensFrontBack {
    front: AtomicU32,
    back: AtomicU32,
}

impl TokensFrontBack {
    fn new() -> Self {
        TokensFrontBack {
            front: AtomicU32::new(TokenId::NONE.raw()),
            back: AtomicU32::new(TokenId::NONE.raw()),
        }
    }

    /// First token of the sequence, `NONE` when empty.
    #[inline]
    pub fn front(&self) -> TokenId {
        TokenId::from_raw(self.front.load(Ordering::Relaxed))
    }

    /// Last token of the sequence, `NONE` when empty.
    #[inline]
    pub fn back(&self) -> TokenId {
        TokenId::from_raw(self.back.load(Ordering::Relaxed))
    }

    #[inline]
    fn set_front(&self, id: TokenId) {
        self.front.store(id.raw(), Ordering::Relaxed);
    }

    #[inline]
    fn set_back(&self, id: TokenId) {
        self.back.store(id.raw(), Ordering::Relaxed);
    }

    #[inline]
    fn clear(&self) {
        self.set_front(TokenId::NONE);
        self.set_back(TokenId::NONE);
    }
}

/// The token sequence of one translation unit.
///
/// Holds the token arena, the shared bounds descriptor, the file
/// registry and the value interner. Settings are borrowed read-only for
/// the stream's whole lifetime.
pub struct TokenStream<'cfg> {
    arena: TokenArena,
    bounds: Arc<TokensFrontBack>,
    /// Registered file paths; index 0 is the source file.
    files: Vec<String>,
    /// Pre-translation paths when the current names diverge; empty if not.
    orig_files: Vec<String>,
    interner: StringInterner,
    settings: &'cfg Settings,
    lang: Language,
}

impl<'cfg> TokenStream<'cfg> {
    /// Create an empty stream.
    pub fn new(settings: &'cfg Settings, lang: Language) -> Self {
        TokenStream {
            arena: TokenArena::new(),
            bounds: Arc::new(TokensFrontBack::new()),
            files: Vec::new(),
            orig_files: Vec::new(),
            interner: StringInterner::new(),
            settings,
            lang,
        }
    }

    /// The configured settings slice.
    #[inline]
    pub fn settings(&self) -> &Settings {
        self.settings
    }

    /// Language tag of the stream.
    #[inline]
    pub fn lang(&self) -> Language {
        self.lang
    }

    /// Set the language tag (resolved by the lexer when `Unknown`).
    #[inline]
    pub fn set_lang(&mut self, lang: Language) {
        self.lang = lang;
    }

    /// Check if the code is C.
    #[inline]
    pub fn is_c(&self) -> bool {
        self.lang == Language::C
    }

    /// Check if the code is C++.
    #[inline]
    pub fn is_cpp(&self) -> bool {
        self.lang == Language::Cpp
    }

    // ------------------------------------------------------------------
    // Bounds and traversal
    // ------------------------------------------------------------------

    /// First token of the sequence.
    #[inline]
    pub fn front(&self) -> Option<TokenId> {
        self.bounds.front().get()
    }

    /// Last token of the sequence.
    #[inline]
    pub fn back(&self) -> Option<TokenId> {
        self.bounds.back().get()
    }

    /// Handle to the shared bounds descriptor.
    #[inline]
    pub fn bounds(&self) -> Arc<TokensFrontBack> {
        Arc::clone(&self.bounds)
    }

    /// Number of live tokens.
    #[inline]
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Check if the sequence is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.arena.len() == 0
    }

    /// Borrow a token node.
    #[inline]
    pub fn get(&self, tok: TokenId) -> &Token {
        self.arena.get(tok)
    }

    /// Next token in sequence order.
    #[inline]
    pub fn next(&self, tok: TokenId) -> Option<TokenId> {
        self.arena.get(tok).next.get()
    }

    /// Previous token in sequence order.
    #[inline]
    pub fn prev(&self, tok: TokenId) -> Option<TokenId> {
        self.arena.get(tok).prev.get()
    }

    /// Iterate token ids in sequence order.
    pub fn iter(&self) -> Tokens<'_, 'cfg> {
        Tokens {
            stream: self,
            cur: self.bounds.front(),
        }
    }

    /// Sequence-membership check for debugging.
    ///
    /// `None` is vacuously valid; otherwise true only if `tok` is
    /// reachable by walking forward from the front. O(n).
    pub fn validate_token(&self, tok: Option<TokenId>) -> bool {
        let Some(target) = tok else {
            return true;
        };
        if !self.arena.is_live(target) {
            return false;
        }
        let mut cur = self.bounds.front();
        while cur.is_valid() {
            if cur == target {
                return true;
            }
            cur = self.arena.get(cur).next;
        }
        false
    }

    // ------------------------------------------------------------------
    // Values, flags and links
    // ------------------------------------------------------------------

    /// Textual value of a token.
    ///
    /// The returned string lives as long as the interner's storage, so
    /// passes may hold it across later stream mutation.
    #[inline]
    pub fn text(&self, tok: TokenId) -> &'static str {
        self.interner.resolve(self.arena.get(tok).name)
    }

    /// Rewrite a token's value.
    pub fn set_text(&mut self, tok: TokenId, text: &str) {
        let name = self.interner.intern(text);
        self.arena.get_mut(tok).name = name;
    }

    /// Original spelling before normalization, if recorded.
    pub fn orig_name(&self, tok: TokenId) -> Option<&'static str> {
        let name = self.arena.get(tok).orig_name;
        if name.is_empty() {
            None
        } else {
            Some(self.interner.resolve(name))
        }
    }

    /// Record the original spelling of a rewritten token.
    pub fn set_orig_name(&mut self, tok: TokenId, text: &str) {
        let name = self.interner.intern(text);
        self.arena.get_mut(tok).orig_name = name;
    }

    /// Classification flags of a token.
    #[inline]
    pub fn flags(&self, tok: TokenId) -> TokenFlags {
        self.arena.get(tok).flags
    }

    /// Mutable classification flags of a token.
    #[inline]
    pub fn flags_mut(&mut self, tok: TokenId) -> &mut TokenFlags {
        &mut self.arena.get_mut(tok).flags
    }

    /// Matching bracket of a `( ) [ ] { }` token, if linked.
    #[inline]
    pub fn link(&self, tok: TokenId) -> Option<TokenId> {
        self.arena.get(tok).link.get()
    }

    /// Create a mutual bracket link between `open` and `close`.
    pub fn set_links(&mut self, open: TokenId, close: TokenId) {
        self.arena.get_mut(open).link = close;
        self.arena.get_mut(close).link = open;
    }

    /// Check if the token's value starts like an identifier.
    pub fn is_name(&self, tok: TokenId) -> bool {
        matches!(
            self.text(tok).as_bytes().first(),
            Some(b) if b.is_ascii_alphabetic() || *b == b'_' || *b == b'$'
        )
    }

    /// Check if the token is a numeric literal.
    pub fn is_number(&self, tok: TokenId) -> bool {
        matches!(self.text(tok).as_bytes().first(), Some(b) if b.is_ascii_digit())
    }

    /// Check if the token is a numeric, string or character literal.
    pub fn is_literal(&self, tok: TokenId) -> bool {
        matches!(
            self.text(tok).as_bytes().first(),
            Some(b) if b.is_ascii_digit() || *b == b'"' || *b == b'\''
        )
    }

    /// Membership test against the keyword set of the active language
    /// tag and configured standard. An `Unknown` tag has no keywords.
    pub fn is_keyword(&self, text: &str) -> bool {
        match self.lang {
            Language::C => keywords::is_c_keyword(self.settings.standards.c, text),
            Language::Cpp => keywords::is_cpp_keyword(self.settings.standards.cpp, text),
            Language::Unknown => false,
        }
    }

    // ------------------------------------------------------------------
    // AST layer
    // ------------------------------------------------------------------

    /// AST parent of a token.
    #[inline]
    pub fn ast_parent(&self, tok: TokenId) -> Option<TokenId> {
        self.arena.get(tok).ast_parent.get()
    }

    /// First AST operand of a token.
    #[inline]
    pub fn ast_op1(&self, tok: TokenId) -> Option<TokenId> {
        self.arena.get(tok).ast_op1.get()
    }

    /// Second AST operand of a token.
    #[inline]
    pub fn ast_op2(&self, tok: TokenId) -> Option<TokenId> {
        self.arena.get(tok).ast_op2.get()
    }

    /// Attach `operand` as the first operand of `op`, maintaining the
    /// child's parent back-reference.
    pub fn ast_set_operand1(&mut self, op: TokenId, operand: TokenId) {
        self.arena.get_mut(op).ast_op1 = operand;
        self.arena.get_mut(operand).ast_parent = op;
    }

    /// Attach `operand` as the second operand of `op`, maintaining the
    /// child's parent back-reference.
    pub fn ast_set_operand2(&mut self, op: TokenId, operand: TokenId) {
        self.arena.get_mut(op).ast_op2 = operand;
        self.arena.get_mut(operand).ast_parent = op;
    }

    /// Detach a token from the AST layer entirely.
    pub fn ast_reset(&mut self, tok: TokenId) {
        let t = self.arena.get_mut(tok);
        t.ast_parent = TokenId::NONE;
        t.ast_op1 = TokenId::NONE;
        t.ast_op2 = TokenId::NONE;
    }

    // ------------------------------------------------------------------
    // Appending and splicing
    // ------------------------------------------------------------------

    /// Append a token at the tail.
    ///
    /// Empty text is a no-op. Hex/octal/binary literals are rewritten to
    /// decimal and `_Bool` to `bool`, recording the original spelling.
    /// With `split`, a value containing `##` is emitted as its parts with
    /// `##` tokens between them, each part flagged as split.
    pub fn add_token(&mut self, text: &str, line: u32, column: u32, file_index: u32, split: bool) {
        if text.is_empty() {
            return;
        }
        if split && text.contains("##") && text != "##" {
            let mut first = true;
            for part in text.split("##") {
                if !first {
                    let id = self.push_back("##", line, column, file_index);
                    self.arena.get_mut(id).flags.set(TokenFlags::SPLIT);
                }
                if !part.is_empty() {
                    let id = self.push_back(part, line, column, file_index);
                    self.arena.get_mut(id).flags.set(TokenFlags::SPLIT);
                }
                first = false;
            }
            return;
        }
        self.push_back(text, line, column, file_index);
    }

    /// Append a token using another token purely as a location template.
    ///
    /// The template's value is not copied.
    pub fn add_token_at(&mut self, text: &str, loc: TokenId) {
        let (line, column, file_index) = {
            let t = self.arena.get(loc);
            (t.line, t.column, t.file_index)
        };
        self.add_token(text, line, column, file_index, false);
    }

    /// Append a clone of `src` (value, original name and type flags) at
    /// an explicit location.
    pub fn add_token_copy(&mut self, src: TokenId, line: u32, column: u32, file_index: u32) {
        let (name, orig_name, flags) = {
            let t = self.arena.get(src);
            (t.name, t.orig_name, t.flags)
        };
        let mut token = Token::new(name, line, column, file_index);
        token.orig_name = orig_name;
        token.flags = TokenFlags::from_bits(flags.bits() & Self::CLONE_MASK);
        let id = self.arena.alloc(token);
        self.link_back(id);
    }

    /// Append a clone of `src` at the location of `loc`.
    pub fn add_token_copy_at(&mut self, src: TokenId, loc: TokenId) {
        let (line, column, file_index) = {
            let t = self.arena.get(loc);
            (t.line, t.column, t.file_index)
        };
        self.add_token_copy(src, line, column, file_index);
    }

    /// Append a clone of `src` at `src`'s own location.
    pub fn add_token_clone(&mut self, src: TokenId) {
        self.add_token_copy_at(src, src);
    }

    /// Insert a new token with the given value immediately after `dest`,
    /// copying `dest`'s location. Returns the new token.
    pub fn insert_after(&mut self, dest: TokenId, text: &str) -> TokenId {
        let (line, column, file_index) = {
            let t = self.arena.get(dest);
            (t.line, t.column, t.file_index)
        };
        let id = self.fresh_token(text, line, column, file_index);
        self.splice_after(dest, id);
        id
    }

    /// Clone `n` tokens starting at `src` and splice the clones
    /// immediately after `dest`, preserving order. Mutual bracket links
    /// are re-created for balanced brackets inside the cloned run.
    pub fn insert_tokens(&mut self, dest: TokenId, src: TokenId, n: u32) {
        let mut link_stack: SmallVec<[TokenId; 8]> = SmallVec::new();
        let mut dest = dest;
        let mut src = src;
        for _ in 0..n {
            let (name, orig_name, flags, line, column, file_index, src_next) = {
                let t = self.arena.get(src);
                (t.name, t.orig_name, t.flags, t.line, t.column, t.file_index, t.next)
            };
            let mut token = Token::new(name, line, column, file_index);
            token.orig_name = orig_name;
            token.flags = TokenFlags::from_bits(flags.bits() & Self::CLONE_MASK);
            let id = self.arena.alloc(token);
            self.splice_after(dest, id);
            self.maintain_links(&mut link_stack, id);
            dest = id;
            if !src_next.is_valid() {
                break;
            }
            src = src_next;
        }
    }

    /// Clone the inclusive range `first..=last` and splice the clones
    /// after `dest`; returns the last clone.
    ///
    /// With `one_line` every clone lands on `dest`'s line; otherwise the
    /// clones keep their line offsets relative to `first`, rebased onto
    /// `dest`'s line. Clones take `dest`'s file index.
    ///
    /// # Panics
    /// Panics if `last` is not reachable forward from `first`.
    pub fn copy_tokens(
        &mut self,
        dest: TokenId,
        first: TokenId,
        last: TokenId,
        one_line: bool,
    ) -> TokenId {
        let (dest_line, dest_file) = {
            let t = self.arena.get(dest);
            (t.line, t.file_index)
        };
        let first_line = self.arena.get(first).line;
        let mut link_stack: SmallVec<[TokenId; 8]> = SmallVec::new();
        let mut insert_at = dest;
        let mut cur = first;
        loop {
            let (name, orig_name, flags, line, column, cur_next) = {
                let t = self.arena.get(cur);
                (t.name, t.orig_name, t.flags, t.line, t.column, t.next)
            };
            let line = if one_line {
                dest_line
            } else {
                dest_line + (line - first_line)
            };
            let mut token = Token::new(name, line, column, dest_file);
            token.orig_name = orig_name;
            token.flags = TokenFlags::from_bits(flags.bits() & Self::CLONE_MASK);
            let id = self.arena.alloc(token);
            self.splice_after(insert_at, id);
            self.maintain_links(&mut link_stack, id);
            insert_at = id;
            if cur == last {
                return insert_at;
            }
            assert!(
                cur_next.is_valid(),
                "copy_tokens: `last` is not reachable from `first`"
            );
            cur = cur_next;
        }
    }

    // ------------------------------------------------------------------
    // Removal
    // ------------------------------------------------------------------

    /// Unlink and free a single token; returns its successor.
    pub fn erase(&mut self, tok: TokenId) -> Option<TokenId> {
        let (prev, next, link) = {
            let t = self.arena.get(tok);
            (t.prev, t.next, t.link)
        };
        if link.is_valid() && self.arena.get(link).link == tok {
            self.arena.get_mut(link).link = TokenId::NONE;
        }
        if prev.is_valid() {
            self.arena.get_mut(prev).next = next;
        } else {
            self.bounds.set_front(next);
        }
        if next.is_valid() {
            self.arena.get_mut(next).prev = prev;
        } else {
            self.bounds.set_back(prev);
        }
        self.arena.release(tok);
        next.get()
    }

    /// Free the whole chain reachable forward from `tok`.
    ///
    /// Every outstanding id for a freed token becomes invalid; this is an
    /// explicit lifetime boundary, not reference counting.
    pub fn delete_tokens(&mut self, tok: TokenId) {
        if !self.arena.is_live(tok) {
            return;
        }
        let prev = self.arena.get(tok).prev;
        let mut cur = tok;
        while cur.is_valid() {
            let next = self.arena.get(cur).next;
            self.arena.release(cur);
            cur = next;
        }
        if prev.is_valid() {
            self.arena.get_mut(prev).next = TokenId::NONE;
            self.bounds.set_back(prev);
        } else {
            self.bounds.clear();
        }
    }

    /// Free every token and forget the file registry.
    pub fn deallocate_tokens(&mut self) {
        self.arena.clear();
        self.bounds.clear();
        self.files.clear();
        self.orig_files.clear();
    }

    // ------------------------------------------------------------------
    // File registry
    // ------------------------------------------------------------------

    /// Register a file path, returning the existing index when the path
    /// is already known. Deterministic and order-preserving.
    pub fn append_file_if_new(&mut self, path: &str) -> u32 {
        if let Some(idx) = self.files.iter().position(|f| f == path) {
            return idx as u32;
        }
        self.files.push(path.to_owned());
        (self.files.len() - 1) as u32
    }

    /// Registered file paths in registration order.
    #[inline]
    pub fn get_files(&self) -> &[String] {
        &self.files
    }

    /// The source file path (first registered file), if any.
    pub fn source_file_path(&self) -> Option<&str> {
        self.files.first().map(String::as_str)
    }

    /// Display path for a token's file.
    pub fn file(&self, tok: TokenId) -> &str {
        &self.files[self.arena.get(tok).file_index as usize]
    }

    /// `"path:line"` for a token, the sole location format diagnostic
    /// producers consume.
    pub fn file_line(&self, tok: TokenId) -> String {
        format!("{}:{}", self.file(tok), self.arena.get(tok).line)
    }

    /// Pre-translation path for a token's file, falling back to the
    /// current path when no shadow entry exists.
    pub fn orig_file(&self, tok: TokenId) -> &str {
        let idx = self.arena.get(tok).file_index as usize;
        match self.orig_files.get(idx) {
            Some(path) => path,
            None => &self.files[idx],
        }
    }

    /// Snapshot the current registry into the shadow list.
    ///
    /// Called when the stream originated from a translated input (an AST
    /// dump) before the registry is rewritten to user-facing paths, so
    /// that [`orig_file`](Self::orig_file) can recover original names.
    pub fn clang_set_orig_files(&mut self) {
        self.orig_files = self.files.clone();
    }

    /// Replace the display path at `index`, keeping the shadow intact.
    pub fn set_file_path(&mut self, index: u32, path: &str) {
        self.files[index as usize] = path.to_owned();
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// Flag bits preserved when cloning a token into a new slot.
    const CLONE_MASK: u16 = TokenFlags::TYPE_MASK
        | TokenFlags::KEYWORD
        | TokenFlags::EXPANDED_MACRO
        | TokenFlags::SPLIT;

    /// Allocate an unlinked token with normalized value and keyword flag.
    fn fresh_token(&mut self, text: &str, line: u32, column: u32, file_index: u32) -> TokenId {
        let (value, original) = normalize_value(text);
        let name = self.interner.intern(value.as_ref());
        let mut token = Token::new(name, line, column, file_index);
        if original {
            token.orig_name = self.interner.intern(text);
        }
        if self.is_keyword(value.as_ref()) {
            token.flags.set(TokenFlags::KEYWORD);
        }
        self.arena.alloc(token)
    }

    /// Append a normalized token at the tail; returns its id.
    fn push_back(&mut self, text: &str, line: u32, column: u32, file_index: u32) -> TokenId {
        let id = self.fresh_token(text, line, column, file_index);
        self.link_back(id);
        id
    }

    /// Link an unlinked token at the tail.
    fn link_back(&mut self, id: TokenId) {
        let back = self.bounds.back();
        if back.is_valid() {
            self.arena.get_mut(back).next = id;
            self.arena.get_mut(id).prev = back;
        } else {
            self.bounds.set_front(id);
        }
        self.bounds.set_back(id);
    }

    /// Link an unlinked token immediately after `dest`.
    fn splice_after(&mut self, dest: TokenId, id: TokenId) {
        let dest_next = self.arena.get(dest).next;
        self.arena.get_mut(id).prev = dest;
        self.arena.get_mut(id).next = dest_next;
        self.arena.get_mut(dest).next = id;
        if dest_next.is_valid() {
            self.arena.get_mut(dest_next).prev = id;
        } else {
            self.bounds.set_back(id);
        }
    }

    /// Bracket-link bookkeeping for freshly cloned tokens.
    fn maintain_links(&mut self, stack: &mut SmallVec<[TokenId; 8]>, id: TokenId) {
        match self.text(id) {
            "(" | "[" | "{" => stack.push(id),
            ")" | "]" | "}" => {
                if let Some(open) = stack.pop() {
                    self.set_links(open, id);
                }
            }
            _ => {}
        }
    }
}

/// Normalize a value before interning: radix rewriting and `_Bool`.
/// Returns the value plus whether the original spelling should be kept.
fn normalize_value(text: &str) -> (std::borrow::Cow<'_, str>, bool) {
    if text == "_Bool" {
        return (std::borrow::Cow::Borrowed("bool"), true);
    }
    match numbers::to_decimal(text) {
        Some(decimal) => (std::borrow::Cow::Owned(decimal), true),
        None => (std::borrow::Cow::Borrowed(text), false),
    }
}

/// Forward iterator over token ids.
pub struct Tokens<'a, 'cfg> {
    stream: &'a TokenStream<'cfg>,
    cur: TokenId,
}

impl Iterator for Tokens<'_, '_> {
    type Item = TokenId;

    fn next(&mut self) -> Option<TokenId> {
        let id = self.cur.get()?;
        self.cur = self.stream.get(id).next;
        Some(id)
    }
}
