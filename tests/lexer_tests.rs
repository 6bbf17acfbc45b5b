//! Tests for the rule-table scanner

use botscript::{Error, Scanner, ScriptOptions, TokenKind};

fn kinds(source: &str) -> Vec<TokenKind> {
    Scanner::new(source)
        .scan_tokens()
        .unwrap()
        .into_iter()
        .map(|t| t.kind)
        .collect()
}

fn s(value: &str) -> TokenKind {
    TokenKind::String(value.to_string())
}

fn ident(value: &str) -> TokenKind {
    TokenKind::Identifier(value.to_string())
}

// ====================
// Token Shapes
// ====================

#[test]
fn test_say_yields_two_tokens() {
    assert_eq!(kinds(r#"say "hi""#), vec![TokenKind::Say, s("hi")]);
}

#[test]
fn test_comment_only_yields_nothing() {
    assert!(kinds("# nothing to see here").is_empty());
    assert!(kinds("").is_empty());
}

#[test]
fn test_full_block() {
    let source = r#"
bot "RetailSupport" {
  intent "greet" {
    say "你好，请问需要什么帮助？"   # greeting
    ask "name?" as user_name
    set copy = user_name
    end
  }
  default { }
}
"#;
    assert_eq!(
        kinds(source),
        vec![
            TokenKind::Bot,
            s("RetailSupport"),
            TokenKind::LeftBrace,
            TokenKind::Intent,
            s("greet"),
            TokenKind::LeftBrace,
            TokenKind::Say,
            s("你好，请问需要什么帮助？"),
            TokenKind::Ask,
            s("name?"),
            TokenKind::As,
            ident("user_name"),
            TokenKind::Set,
            ident("copy"),
            TokenKind::Equal,
            ident("user_name"),
            TokenKind::End,
            TokenKind::RightBrace,
            TokenKind::Default,
            TokenKind::LeftBrace,
            TokenKind::RightBrace,
            TokenKind::RightBrace,
        ]
    );
}

#[test]
fn test_hash_inside_string_is_not_a_comment() {
    assert_eq!(kinds(r#"say "order #42""#), vec![TokenKind::Say, s("order #42")]);
}

#[test]
fn test_string_has_no_escapes() {
    assert_eq!(kinds(r#"say "a\n""#), vec![TokenKind::Say, s(r"a\n")]);
}

#[test]
fn test_keywords_are_case_sensitive() {
    assert_eq!(kinds("Say SAY"), vec![ident("Say"), ident("SAY")]);
}

// ====================
// Keyword Boundaries
// ====================

#[test]
fn test_identifiers_starting_with_keywords() {
    assert_eq!(
        kinds("botname ending asked settle"),
        vec![ident("botname"), ident("ending"), ident("asked"), ident("settle")]
    );
}

#[test]
fn test_keyword_followed_by_delimiter() {
    assert_eq!(
        kinds(r#"default{say"x"}"#),
        vec![
            TokenKind::Default,
            TokenKind::LeftBrace,
            TokenKind::Say,
            s("x"),
            TokenKind::RightBrace
        ]
    );
}

#[test]
fn test_prefix_mode_splits_identifiers() {
    let tokens = Scanner::with_options("ending", &ScriptOptions::prefix_keywords())
        .scan_tokens()
        .unwrap();
    let kinds: Vec<_> = tokens.into_iter().map(|t| t.kind).collect();
    assert_eq!(kinds, vec![TokenKind::End, ident("ing")]);
}

// ====================
// Failures
// ====================

#[test]
fn test_unmatched_character_is_an_error() {
    let err = Scanner::new("bot \"b\" {\n  say \"x\" ;\n}")
        .scan_tokens()
        .unwrap_err();
    assert_eq!(err.position(), Some((2, 11)));
    assert!(matches!(err, Error::LexError { found: ';', .. }));
}

#[test]
fn test_digit_cannot_start_an_identifier() {
    let err = Scanner::new("set x = 1").scan_tokens().unwrap_err();
    assert!(matches!(err, Error::LexError { found: '1', .. }));
}
