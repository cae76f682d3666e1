use pretty_assertions::assert_eq;

use lintel_ir::{Language, Settings, TokenStream};

use crate::{adopt, tokenize, LexErrorKind, RawTok, RawTokenList};

fn texts(s: &TokenStream<'_>) -> Vec<String> {
    s.iter().map(|t| s.text(t).to_owned()).collect()
}

#[test]
fn tokenizes_a_simple_statement() {
    let settings = Settings::default();
    let mut s = TokenStream::new(&settings, Language::Unknown);
    tokenize(&mut s, "int x = 1 + 2;\n", "a.cpp").unwrap();
    assert_eq!(s.len(), 7);
    assert_eq!(texts(&s), ["int", "x", "=", "1", "+", "2", ";"]);
    assert_eq!(s.lang(), Language::Cpp);

    let int_tok = s.front().unwrap();
    assert!(s.flags(int_tok).is_keyword());
    assert_eq!(s.get(int_tok).line(), 1);
    assert_eq!(s.get(int_tok).column(), 1);
    let x = s.next(int_tok).unwrap();
    assert_eq!(s.get(x).column(), 5);
    assert!(!s.flags(x).is_keyword());
}

#[test]
fn language_tag_follows_file_extension() {
    let settings = Settings::default();
    let mut s = TokenStream::new(&settings, Language::Unknown);
    tokenize(&mut s, "restrict\n", "a.c").unwrap();
    assert_eq!(s.lang(), Language::C);
    assert!(s.flags(s.front().unwrap()).is_keyword());

    let mut s = TokenStream::new(&settings, Language::Unknown);
    tokenize(&mut s, "class\n", "a.c").unwrap();
    assert!(!s.flags(s.front().unwrap()).is_keyword(), "class is not a C keyword");
}

#[test]
fn multi_char_operators_stay_whole() {
    let settings = Settings::default();
    let mut s = TokenStream::new(&settings, Language::Cpp);
    tokenize(&mut s, "a <<= b && c->d;\n", "a.cpp").unwrap();
    assert_eq!(texts(&s), ["a", "<<=", "b", "&&", "c", "->", "d", ";"]);
}

#[test]
fn numeric_literals_are_normalized() {
    let settings = Settings::default();
    let mut s = TokenStream::new(&settings, Language::Cpp);
    tokenize(&mut s, "x = 0x1F + .125 + 4.2e+10;\n", "a.cpp").unwrap();
    assert_eq!(texts(&s), ["x", "=", "31", "+", "0.125", "+", "4.2e+10", ";"]);
}

#[test]
fn line_numbers_track_newlines() {
    let settings = Settings::default();
    let mut s = TokenStream::new(&settings, Language::Cpp);
    tokenize(&mut s, "a\nb\n\nc\n", "a.cpp").unwrap();
    let lines: Vec<u32> = s.iter().map(|t| s.get(t).line()).collect();
    assert_eq!(lines, [1, 2, 4]);
}

#[test]
fn file_directives_manage_the_registry() {
    let settings = Settings::default();
    let mut s = TokenStream::new(&settings, Language::Cpp);
    let code = "a;\n#file \"inc.h\"\nb;\n#endfile\nc;\n";
    tokenize(&mut s, code, "a.cpp").unwrap();
    assert_eq!(s.get_files(), ["a.cpp", "inc.h"]);
    assert_eq!(texts(&s), ["a", ";", "b", ";", "c", ";"]);

    let ids: Vec<_> = s.iter().collect();
    assert_eq!(s.file(ids[0]), "a.cpp");
    assert_eq!(s.file(ids[2]), "inc.h");
    assert_eq!(s.get(ids[2]).line(), 1, "include content restarts at line 1");
    assert_eq!(s.file(ids[4]), "a.cpp");
    assert_eq!(s.file_line(ids[2]), "inc.h:1");
}

#[test]
fn repeated_file_directives_reuse_indices() {
    let settings = Settings::default();
    let mut s = TokenStream::new(&settings, Language::Cpp);
    let code = "#file \"inc.h\"\na;\n#endfile\n#file \"./inc.h\"\nb;\n#endfile\n";
    tokenize(&mut s, code, "a.cpp").unwrap();
    assert_eq!(s.get_files(), ["a.cpp", "inc.h"], "path simplification dedups");
}

#[test]
fn line_directive_rewrites_the_counter() {
    let settings = Settings::default();
    let mut s = TokenStream::new(&settings, Language::Cpp);
    tokenize(&mut s, "#line 100\nx;\n", "a.cpp").unwrap();
    let x = s.front().unwrap();
    assert_eq!(s.get(x).line(), 100);
}

#[test]
fn macro_marker_flags_expanded_tokens() {
    let settings = Settings::default();
    let mut s = TokenStream::new(&settings, Language::Cpp);
    tokenize(&mut s, "a;\n\u{1}m + 1\nb;\n", "a.cpp").unwrap();
    let flags: Vec<bool> = s
        .iter()
        .map(|t| s.flags(t).is_expanded_macro())
        .collect();
    assert_eq!(texts(&s), ["a", ";", "m", "+", "1", "b", ";"]);
    assert_eq!(flags, [false, false, true, true, true, false, false]);
}

#[test]
fn brackets_get_mutual_links() {
    let settings = Settings::default();
    let mut s = TokenStream::new(&settings, Language::Cpp);
    tokenize(&mut s, "f(a[0]) { }\n", "a.cpp").unwrap();
    let ids: Vec<_> = s.iter().collect();
    // f ( a [ 0 ] ) { }
    assert_eq!(s.link(ids[1]), Some(ids[6]));
    assert_eq!(s.link(ids[6]), Some(ids[1]));
    assert_eq!(s.link(ids[3]), Some(ids[5]));
    assert_eq!(s.link(ids[7]), Some(ids[8]));
}

#[test]
fn unbalanced_endfile_fails_and_deallocates() {
    let settings = Settings::default();
    let mut s = TokenStream::new(&settings, Language::Cpp);
    let err = tokenize(&mut s, "a;\n#endfile\n", "a.cpp").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::UnbalancedFileDirective);
    assert!(s.is_empty(), "failed tokenization leaves no tokens behind");
    assert!(s.get_files().is_empty());
}

#[test]
fn unlexable_input_fails() {
    let settings = Settings::default();
    let mut s = TokenStream::new(&settings, Language::Cpp);
    let err = tokenize(&mut s, "int a @ b;\n", "a.cpp").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::InvalidToken);
    assert_eq!(err.line, 1);
    assert!(s.is_empty());
}

#[test]
fn adopt_transfers_files_and_tokens() {
    let settings = Settings::default();
    let mut s = TokenStream::new(&settings, Language::Unknown);
    let raw = |text: &str, line: u32, column: u32, file_index: u32| RawTok {
        text: text.to_owned(),
        line,
        column,
        file_index,
        macro_expanded: false,
    };
    let mut list = RawTokenList {
        tokens: vec![
            raw("x", 1, 1, 0),
            raw("=", 1, 3, 0),
            raw("SIZE", 2, 1, 1),
            raw(";", 2, 5, 1),
        ],
        files: vec!["main.c".to_owned(), "def.h".to_owned()],
    };
    list.tokens[2].macro_expanded = true;
    adopt(&mut s, list);

    assert_eq!(s.lang(), Language::C);
    assert_eq!(s.get_files(), ["main.c", "def.h"]);
    assert_eq!(texts(&s), ["x", "=", "SIZE", ";"]);
    let ids: Vec<_> = s.iter().collect();
    assert_eq!(s.file_line(ids[2]), "def.h:2");
    assert!(s.flags(ids[2]).is_expanded_macro());
    assert!(!s.flags(ids[0]).is_expanded_macro());
}
