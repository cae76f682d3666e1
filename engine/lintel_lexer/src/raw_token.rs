//! Raw token classes for the preprocessed-stream scanner.
//!
//! The input contract (enforced upstream by the preprocessor) keeps this
//! grammar small: no comments, no multi-line literals, ASCII text.
//! Punctuation is a single maximal-munch class; the driver only ever
//! needs the matched slice, because the IR stores tokens by value.

use logos::Logos;

/// One raw lexical atom of preprocessed C/C++ text.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r]+")]
pub(crate) enum RawToken {
    #[token("\n")]
    Newline,

    /// Macro-expansion marker bytes emitted by the preprocessor; tokens
    /// up to the end of the line came from a macro body.
    #[regex(r"\x01+")]
    MacroMark,

    /// `#file "path"`: following tokens come from an included file.
    #[token("#file")]
    FileDirective,

    /// `#endfile`: closes the innermost `#file`.
    #[token("#endfile")]
    EndfileDirective,

    /// `#line N`: rewrites the current line counter.
    #[token("#line")]
    LineDirective,

    /// String literal, single line, backslash escapes.
    #[regex(r#""([^"\\\n]|\\.)*""#)]
    String,

    /// Character literal, backslash escapes.
    #[regex(r"'([^'\\\n]|\\.)*'")]
    CharLit,

    /// Preprocessing number starting with a digit: integers of any radix,
    /// floats with exponents (`4.2e+10`), suffixed literals.
    #[regex(r"[0-9]([0-9a-zA-Z_.]|[eEpP][+-])*")]
    Number,

    /// Preprocessing number starting with `.` (`.125`); the driver
    /// prepends the implied zero.
    #[regex(r"\.[0-9]([0-9a-zA-Z_.]|[eEpP][+-])*")]
    DotNumber,

    /// Identifier or keyword.
    #[regex(r"[A-Za-z_$][A-Za-z0-9_$]*")]
    Ident,

    /// Operators and punctuation, longest match first.
    #[regex(r"<<=|>>=|\.\.\.|->\*|\.\*|<<|>>|<=|>=|==|!=|&&|\|\||\+\+|--|\+=|-=|\*=|/=|%=|&=|\|=|\^=|->|::|##|[-+*/%&|^~!=<>?:;,.()\[\]{}#]")]
    Punct,
}
