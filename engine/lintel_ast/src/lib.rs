//! AST construction, validation and shape scanning for the Lintel
//! analysis engine.
//!
//! The expression tree is not a separate structure: it is threaded
//! through the token nodes themselves (`ast_parent`/`ast_op1`/`ast_op2`),
//! so it must be kept honest across in-place sequence mutation. This
//! crate owns the three operations around that layer:
//!
//! - [`build_ast`] compiles expressions over statement boundaries already
//!   present in the stream, using conventional C/C++ precedence keyed by
//!   the stream's language tag
//! - [`validate_ast`] verifies reciprocity, membership and acyclicity,
//!   reporting violations on the fatal [`lintel_ir::InternalError`]
//!   channel
//! - the scanners ([`is_function_head`], [`is_lambda_capture_list`],
//!   [`find_lambda_end_token_without_ast`]) classify shapes with bounded
//!   lookahead before any AST exists

mod builder;
mod scan;
mod stack;
mod validate;

pub use builder::{build_ast, AST_MAX_DEPTH};
pub use scan::{find_lambda_end_token_without_ast, is_function_head, is_lambda_capture_list};
pub use validate::validate_ast;

#[cfg(test)]
mod tests;
