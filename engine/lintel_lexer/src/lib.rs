//! Token stream construction for the Lintel analysis engine.
//!
//! Two entry points build a [`lintel_ir::TokenStream`] for the first and
//! only time in its life:
//!
//! - [`tokenize`] consumes fully preprocessed source text (no comments,
//!   no multi-line literals, ASCII) through a logos raw scanner plus a
//!   stateful driver that understands the preprocessor's `#file`,
//!   `#endfile` and `#line` markers.
//! - [`adopt`] takes ownership of an already-lexed external token list
//!   ([`RawTokenList`]) and converts it node by node.
//!
//! Failure is the recoverable tier of the error model: [`LexError`]
//! means "abandon this translation unit", nothing more.

mod adopt;
mod lex_error;
mod path;
mod raw_token;
mod tokenize;

pub use adopt::{adopt, RawTok, RawTokenList};
pub use lex_error::{LexError, LexErrorKind};
pub use path::simplify_path;
pub use tokenize::tokenize;

#[cfg(test)]
mod tests;
