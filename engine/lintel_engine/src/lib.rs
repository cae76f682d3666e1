//! Per-translation-unit driver for the Lintel analysis engine.
//!
//! One translation unit flows through one fixed pipeline:
//!
//! ```text
//! tokenize → simplify_platform_types → simplify_std_type
//!          → build_ast → validate_ast → calculate_hash
//! ```
//!
//! The two error tiers meet here and stop here: a [`LexError`] means the
//! unit's input could not be tokenized, an [`InternalError`] means the
//! tokenized IR broke one of its own invariants. Both abandon only the
//! current unit; a multi-unit run calls [`process_unit`] per unit and
//! keeps going. Units share no mutable state, so callers are free to
//! process them on independent threads, one stream each.

use thiserror::Error;
use tracing::debug;

pub use lintel_ast::{
    build_ast, find_lambda_end_token_without_ast, is_function_head, is_lambda_capture_list,
    validate_ast, AST_MAX_DEPTH,
};
pub use lintel_canon::{simplify_platform_types, simplify_std_type};
pub use lintel_ir::{
    CStandard, CppStandard, InternalError, Language, Name, Platform, PlatformBits, Settings,
    Standards, Token, TokenFlags, TokenId, TokenStream, Tokens, TokensFrontBack,
};
pub use lintel_lexer::{adopt, tokenize, LexError, LexErrorKind, RawTok, RawTokenList};

/// Why a translation unit was abandoned.
#[derive(Debug, Error)]
pub enum UnitError {
    /// The preprocessed input could not be tokenized.
    #[error("tokenization failed: {0}")]
    Tokenize(#[from] LexError),
    /// The tokenized IR violated a structural invariant.
    #[error(transparent)]
    Internal(#[from] InternalError),
}

/// A fully prepared translation unit: canonicalized token stream with a
/// validated AST and its structural fingerprint.
pub struct TranslationUnit<'cfg> {
    pub stream: TokenStream<'cfg>,
    /// Fingerprint of the canonicalized stream, for cheap unit-to-unit
    /// equivalence probes.
    pub hash: u64,
}

impl std::fmt::Debug for TranslationUnit<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslationUnit")
            .field("hash", &self.hash)
            .finish_non_exhaustive()
    }
}

/// Run the whole pipeline for one unit.
///
/// `path` is the unit's source file path; it resolves an `Unknown`
/// language tag and becomes index 0 of the file registry.
pub fn process_unit<'cfg>(
    settings: &'cfg Settings,
    lang: Language,
    path: &str,
    code: &str,
) -> Result<TranslationUnit<'cfg>, UnitError> {
    let mut stream = TokenStream::new(settings, lang);
    tokenize(&mut stream, code, path)?;
    debug!(path, tokens = stream.len(), "tokenized");

    simplify_platform_types(&mut stream);
    simplify_std_type(&mut stream);

    build_ast(&mut stream)?;
    validate_ast(&stream, false)?;

    let hash = stream.calculate_hash();
    debug!(path, hash, "unit prepared");
    Ok(TranslationUnit { stream, hash })
}
