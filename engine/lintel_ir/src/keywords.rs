//! Keyword tables for the supported language dialects.
//!
//! Each lookup returns the oldest standard in which the identifier is a
//! keyword; callers compare that against the configured standard. This
//! keeps one table per dialect instead of one set per standard revision.

use crate::settings::{CStandard, CppStandard};

/// The oldest C standard in which `text` is a keyword, if any.
pub fn c_keyword_since(text: &str) -> Option<CStandard> {
    match text {
        "auto" | "break" | "case" | "char" | "const" | "continue" | "default" | "do"
        | "double" | "else" | "enum" | "extern" | "float" | "for" | "goto" | "if" | "int"
        | "long" | "register" | "return" | "short" | "signed" | "sizeof" | "static"
        | "struct" | "switch" | "typedef" | "union" | "unsigned" | "void" | "volatile"
        | "while" => Some(CStandard::C89),
        "inline" | "restrict" | "_Bool" | "_Complex" | "_Imaginary" => Some(CStandard::C99),
        "_Alignas" | "_Alignof" | "_Atomic" | "_Generic" | "_Noreturn" | "_Static_assert"
        | "_Thread_local" => Some(CStandard::C11),
        "alignas" | "alignof" | "bool" | "constexpr" | "false" | "nullptr" | "static_assert"
        | "thread_local" | "true" | "typeof" | "typeof_unqual" | "_BitInt" | "_Decimal32"
        | "_Decimal64" | "_Decimal128" => Some(CStandard::C23),
        _ => None,
    }
}

/// The oldest C++ standard in which `text` is a keyword, if any.
pub fn cpp_keyword_since(text: &str) -> Option<CppStandard> {
    match text {
        "asm" | "auto" | "bool" | "break" | "case" | "catch" | "char" | "class" | "const"
        | "const_cast" | "continue" | "default" | "delete" | "do" | "double"
        | "dynamic_cast" | "else" | "enum" | "explicit" | "export" | "extern" | "false"
        | "float" | "for" | "friend" | "goto" | "if" | "inline" | "int" | "long"
        | "mutable" | "namespace" | "new" | "operator" | "private" | "protected"
        | "public" | "register" | "reinterpret_cast" | "return" | "short" | "signed"
        | "sizeof" | "static" | "static_cast" | "struct" | "switch" | "template" | "this"
        | "throw" | "true" | "try" | "typedef" | "typeid" | "typename" | "union"
        | "unsigned" | "using" | "virtual" | "void" | "volatile" | "wchar_t" | "while" => {
            Some(CppStandard::Cpp03)
        }
        "alignas" | "alignof" | "char16_t" | "char32_t" | "constexpr" | "decltype"
        | "noexcept" | "nullptr" | "static_assert" | "thread_local" => Some(CppStandard::Cpp11),
        "char8_t" | "concept" | "consteval" | "constinit" | "co_await" | "co_return"
        | "co_yield" | "requires" => Some(CppStandard::Cpp20),
        _ => None,
    }
}

/// Membership test against the C keyword set for `standard`.
#[inline]
pub fn is_c_keyword(standard: CStandard, text: &str) -> bool {
    c_keyword_since(text).is_some_and(|since| since <= standard)
}

/// Membership test against the C++ keyword set for `standard`.
#[inline]
pub fn is_cpp_keyword(standard: CppStandard, text: &str) -> bool {
    cpp_keyword_since(text).is_some_and(|since| since <= standard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn c_keywords_are_gated_by_standard() {
        assert!(is_c_keyword(CStandard::C89, "while"));
        assert!(!is_c_keyword(CStandard::C89, "restrict"));
        assert!(is_c_keyword(CStandard::C99, "restrict"));
        assert!(!is_c_keyword(CStandard::C17, "nullptr"));
        assert!(is_c_keyword(CStandard::C23, "nullptr"));
    }

    #[test]
    fn cpp_keywords_are_gated_by_standard() {
        assert!(is_cpp_keyword(CppStandard::Cpp03, "namespace"));
        assert!(!is_cpp_keyword(CppStandard::Cpp03, "constexpr"));
        assert!(is_cpp_keyword(CppStandard::Cpp11, "constexpr"));
        assert!(!is_cpp_keyword(CppStandard::Cpp17, "co_await"));
        assert!(is_cpp_keyword(CppStandard::Cpp20, "co_await"));
    }

    #[test]
    fn identifiers_are_not_keywords() {
        assert!(!is_c_keyword(CStandard::C23, "size_t"));
        assert!(!is_cpp_keyword(CppStandard::Cpp26, "main"));
    }
}
