//! Lintel IR - the tokenized intermediate representation.
//!
//! This crate contains the substrate every analysis pass operates on:
//! - `Token` nodes carrying value, location, sequence links and AST links
//! - `TokenStream`, the arena-backed linked sequence with its shared
//!   front/back bounds descriptor and file registry
//! - Classification flags and the keyword tables
//! - The structural hash used for cheap stream equivalence probes
//! - The fatal `InternalError` channel for structural-invariant failures
//!
//! # Design Philosophy
//!
//! - **Intern values**: token text → `Name(u32)`, equality is integer
//!   comparison, rewriting is re-interning
//! - **Flatten links**: no owned pointers between tokens; sequence, AST
//!   and bracket links are `TokenId(u32)` indices into one arena, so bulk
//!   teardown is a single clear and a freed node can never dangle into
//!   another allocation
//! - **Mutation through primitives**: passes splice, copy and erase via
//!   the stream's methods, which keep bounds, links and AST
//!   back-references consistent

mod error;
mod interner;
pub mod keywords;
mod name;
pub mod numbers;
pub mod settings;
mod stream;
mod token;

pub use error::InternalError;
pub use interner::{InternError, StringInterner};
pub use name::Name;
pub use settings::{
    CStandard, CppStandard, Language, Platform, PlatformBits, Settings, Standards,
};
pub use stream::{TokenStream, Tokens, TokensFrontBack};
pub use token::{Token, TokenFlags, TokenId};
