use pretty_assertions::assert_eq;

use lintel_ir::{Language, Settings, TokenId, TokenStream};
use lintel_lexer::tokenize;

use crate::{
    build_ast, find_lambda_end_token_without_ast, is_function_head, is_lambda_capture_list,
    validate_ast,
};

fn build<'cfg>(settings: &'cfg Settings, code: &str) -> TokenStream<'cfg> {
    let mut s = TokenStream::new(settings, Language::Unknown);
    tokenize(&mut s, code, "test.cpp").unwrap();
    s
}

/// First token with the given value.
fn find(s: &TokenStream<'_>, text: &str) -> TokenId {
    s.iter()
        .find(|&t| s.text(t) == text)
        .unwrap_or_else(|| panic!("no token {text:?}"))
}

/// Nth token with the given value (0-based).
fn find_nth(s: &TokenStream<'_>, text: &str, n: usize) -> TokenId {
    s.iter()
        .filter(|&t| s.text(t) == text)
        .nth(n)
        .unwrap_or_else(|| panic!("no {n}th token {text:?}"))
}

fn op1_text(s: &TokenStream<'_>, t: TokenId) -> &'static str {
    s.ast_op1(t).map_or("", |o| s.text(o))
}

fn op2_text(s: &TokenStream<'_>, t: TokenId) -> &'static str {
    s.ast_op2(t).map_or("", |o| s.text(o))
}

#[test]
fn assignment_with_addition() {
    let settings = Settings::default();
    let mut s = build(&settings, "int x = 1 + 2;\n");
    build_ast(&mut s).unwrap();

    let eq = find(&s, "=");
    let plus = find(&s, "+");
    assert_eq!(s.ast_parent(eq), None, "= is the root");
    assert_eq!(op1_text(&s, eq), "x");
    assert_eq!(op2_text(&s, eq), "+");
    assert_eq!(op1_text(&s, plus), "1");
    assert_eq!(op2_text(&s, plus), "2");
    assert_eq!(s.ast_parent(plus), Some(eq));
    validate_ast(&s, true).unwrap();
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    let settings = Settings::default();
    let mut s = build(&settings, "x = a + b * c;\n");
    build_ast(&mut s).unwrap();

    let plus = find(&s, "+");
    let star = find(&s, "*");
    assert_eq!(op1_text(&s, plus), "a");
    assert_eq!(op2_text(&s, plus), "*");
    assert_eq!(op1_text(&s, star), "b");
    assert_eq!(op2_text(&s, star), "c");
    validate_ast(&s, false).unwrap();
}

#[test]
fn unary_binds_tighter_than_binary() {
    let settings = Settings::default();
    let mut s = build(&settings, "x = - a + b;\n");
    build_ast(&mut s).unwrap();

    let minus = find(&s, "-");
    let plus = find(&s, "+");
    assert_eq!(op1_text(&s, minus), "a");
    assert_eq!(s.ast_op2(minus), None);
    assert_eq!(op1_text(&s, plus), "-");
    assert_eq!(op2_text(&s, plus), "b");
}

#[test]
fn assignment_is_right_associative() {
    let settings = Settings::default();
    let mut s = build(&settings, "a = b = c;\n");
    build_ast(&mut s).unwrap();

    let first = find_nth(&s, "=", 0);
    let second = find_nth(&s, "=", 1);
    assert_eq!(s.ast_parent(first), None);
    assert_eq!(op1_text(&s, first), "a");
    assert_eq!(s.ast_op2(first), Some(second));
    assert_eq!(op1_text(&s, second), "b");
    assert_eq!(op2_text(&s, second), "c");
}

#[test]
fn function_call_hangs_off_the_paren() {
    let settings = Settings::default();
    let mut s = build(&settings, "f(a, b);\n");
    build_ast(&mut s).unwrap();

    let paren = find(&s, "(");
    let comma = find(&s, ",");
    assert_eq!(s.ast_parent(paren), None);
    assert_eq!(op1_text(&s, paren), "f");
    assert_eq!(s.ast_op2(paren), Some(comma));
    assert_eq!(op1_text(&s, comma), "a");
    assert_eq!(op2_text(&s, comma), "b");
}

#[test]
fn conditional_operator_shape() {
    let settings = Settings::default();
    let mut s = build(&settings, "x = a ? b : c;\n");
    build_ast(&mut s).unwrap();

    let question = find(&s, "?");
    let colon = find(&s, ":");
    assert_eq!(op1_text(&s, question), "a");
    assert_eq!(s.ast_op2(question), Some(colon));
    assert_eq!(op1_text(&s, colon), "b");
    assert_eq!(op2_text(&s, colon), "c");
}

#[test]
fn control_header_condition_gets_an_ast() {
    let settings = Settings::default();
    let mut s = build(&settings, "while (x > 0) { x--; }\n");
    build_ast(&mut s).unwrap();

    let gt = find(&s, ">");
    assert_eq!(op1_text(&s, gt), "x");
    assert_eq!(op2_text(&s, gt), "0");
    let decr = find(&s, "--");
    assert_eq!(op1_text(&s, decr), "x");
    validate_ast(&s, false).unwrap();
}

#[test]
fn return_owns_its_expression() {
    let settings = Settings::default();
    let mut s = build(&settings, "return a + b;\n");
    build_ast(&mut s).unwrap();

    let ret = find(&s, "return");
    let plus = find(&s, "+");
    assert_eq!(s.ast_op1(ret), Some(plus));
    assert_eq!(s.ast_parent(plus), Some(ret));
}

#[test]
fn scope_resolution_is_cpp_only() {
    let settings = Settings::default();
    let mut s = build(&settings, "x = a :: b;\n");
    build_ast(&mut s).unwrap();
    let scope = find(&s, "::");
    assert_eq!(op1_text(&s, scope), "a");
    assert_eq!(op2_text(&s, scope), "b");
}

#[test]
fn parentheses_are_transparent() {
    let settings = Settings::default();
    let mut s = build(&settings, "x = (1 + 2) * 3;\n");
    build_ast(&mut s).unwrap();

    let star = find(&s, "*");
    assert_eq!(op1_text(&s, star), "+");
    assert_eq!(op2_text(&s, star), "3");
    let paren = find(&s, "(");
    assert!(!s.get(paren).has_ast(), "grouping parens carry no AST");
}

#[test]
fn for_header_clauses_each_get_asts() {
    let settings = Settings::default();
    let mut s = build(&settings, "for (i = 0; i < n; ++i) { }\n");
    build_ast(&mut s).unwrap();

    let eq = find(&s, "=");
    assert_eq!(op1_text(&s, eq), "i");
    assert_eq!(op2_text(&s, eq), "0");
    let lt = find(&s, "<");
    assert_eq!(op1_text(&s, lt), "i");
    assert_eq!(op2_text(&s, lt), "n");
    let incr = find(&s, "++");
    assert_eq!(op1_text(&s, incr), "i");
    validate_ast(&s, false).unwrap();
}

#[test]
fn deep_nesting_hits_the_fatal_depth_cap() {
    let settings = Settings::default();
    let mut code = String::from("x = ");
    for _ in 0..600 {
        code.push('(');
    }
    code.push('1');
    for _ in 0..600 {
        code.push(')');
    }
    code.push_str(";\n");
    let mut s = build(&settings, &code);
    let err = build_ast(&mut s).unwrap_err();
    assert!(err.message.contains("depth"));
}

#[test]
fn validate_accepts_freshly_built_ast() {
    let settings = Settings::default();
    let mut s = build(&settings, "a = f(b) + c * 2; return a ? 1 : 0;\n");
    build_ast(&mut s).unwrap();
    validate_ast(&s, true).unwrap();
}

#[test]
fn validate_rejects_stolen_operand() {
    let settings = Settings::default();
    let mut s = build(&settings, "x = 1 + 2;\n");
    build_ast(&mut s).unwrap();

    // Re-point the operand's parent elsewhere: `=` still lists `x` as an
    // operand, but `x` now claims `+` as its parent.
    let x = find(&s, "x");
    let plus = find(&s, "+");
    s.ast_set_operand1(plus, x);
    let err = validate_ast(&s, false).unwrap_err();
    assert!(err.message.contains("parent"));
}

#[test]
fn validate_rejects_cycles() {
    let settings = Settings::default();
    let mut s = build(&settings, "a b;\n");
    let a = find(&s, "a");
    let b = find(&s, "b");
    s.ast_set_operand1(a, b);
    s.ast_set_operand1(b, a);
    let err = validate_ast(&s, true).unwrap_err();
    assert!(err.message.contains("cycle"));
    assert!(err.details.is_some(), "print requests a dump");
}

#[test]
fn function_head_matches_literal_trailer() {
    let settings = Settings::default();
    let s = build(&settings, "void f() const;\n");
    let open = find(&s, "(");
    let close = find(&s, ")");
    assert_eq!(is_function_head(&s, open, "const"), Some(close));
    assert_eq!(is_function_head(&s, open, "override"), None);
    // The close paren works as the starting point too.
    assert_eq!(is_function_head(&s, close, "const"), Some(close));
}

#[test]
fn function_head_requires_a_declarator_name() {
    let settings = Settings::default();
    let s = build(&settings, "x = (a) const;\n");
    let open = find(&s, "(");
    assert_eq!(is_function_head(&s, open, "const"), None);
}

#[test]
fn lambda_capture_list_is_recognized() {
    let settings = Settings::default();
    let s = build(&settings, "auto f = [&, this](int a) { return a; };\n");
    let open = find(&s, "[");
    let close = find(&s, "]");
    assert_eq!(is_lambda_capture_list(&s, open), Some(close));
}

#[test]
fn array_subscript_is_not_a_capture_list() {
    let settings = Settings::default();
    let s = build(&settings, "x = a[0];\n");
    let open = find(&s, "[");
    assert_eq!(is_lambda_capture_list(&s, open), None);
}

#[test]
fn capture_list_rejects_non_capture_contents() {
    let settings = Settings::default();
    let s = build(&settings, "x = [1 + 2](a) { };\n");
    let open = find(&s, "[");
    assert_eq!(is_lambda_capture_list(&s, open), None);
}

#[test]
fn lambda_end_is_found_by_depth_counting() {
    let settings = Settings::default();
    let s = build(&settings, "g([x](int y) mutable -> int { return y; });\n");
    let open = find(&s, "[");
    let end = find_lambda_end_token_without_ast(&s, open).unwrap();
    assert_eq!(s.text(end), "}");
    let last_brace = s.iter().filter(|&t| s.text(t) == "}").last();
    assert_eq!(Some(end), last_brace);
}

#[test]
fn unterminated_lambda_has_no_end() {
    let settings = Settings::default();
    let s = build(&settings, "g([x](int y) { return y;\n");
    let open = find(&s, "[");
    assert_eq!(find_lambda_end_token_without_ast(&s, open), None);
}
