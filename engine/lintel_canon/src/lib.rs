//! Type canonicalization passes for the Lintel analysis engine.
//!
//! Both passes take exclusive whole-sequence access, run once, and leave
//! a postcondition every later pass may rely on:
//!
//! - [`simplify_platform_types`]: no platform-dependent alias tokens
//!   remain; aliases become the canonical flagged spelling for the
//!   configured pointer width.
//! - [`simplify_std_type`]: no unmerged standard type-specifier runs
//!   remain; each run is one token with composite signedness/width flags.
//!
//! Pipeline position:
//!
//! ```text
//! tokenize → **canonicalize types** → build AST → hash/validate
//! ```

mod platform;
mod std_type;

pub use platform::simplify_platform_types;
pub use std_type::simplify_std_type;
