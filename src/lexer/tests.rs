//! Unit tests for the lexer module.
//!
//! - Parentheses and symbols, including operator spellings
//! - Integer literals, including negative ones
//! - String literals, which keep their escapes raw
//! - Comments and whitespace
//! - Error cases

use super::{lexer::tokenize, tokens::TokenKind};

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source.to_string(), Some("test.sp".to_string()))
        .unwrap()
        .iter()
        .map(|token| token.kind)
        .collect()
}

#[test]
fn test_tokenize_list() {
    assert_eq!(
        kinds("(+ 1 2)"),
        vec![
            TokenKind::OpenParen,
            TokenKind::Symbol,
            TokenKind::Number,
            TokenKind::Number,
            TokenKind::CloseParen,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_operator_symbols() {
    let source = "+ - * / > < == != >= <= var set begin".to_string();
    let tokens = tokenize(source, Some("test.sp".to_string())).unwrap();

    let values: Vec<&str> = tokens[..tokens.len() - 1]
        .iter()
        .map(|token| token.value.as_str())
        .collect();
    assert_eq!(
        values,
        vec!["+", "-", "*", "/", ">", "<", "==", "!=", ">=", "<=", "var", "set", "begin"]
    );
    assert!(tokens[..tokens.len() - 1]
        .iter()
        .all(|token| token.kind == TokenKind::Symbol));
}

#[test]
fn test_tokenize_numbers() {
    let source = "42 0 -7 2147483647".to_string();
    let tokens = tokenize(source, Some("test.sp".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Number);
    assert_eq!(tokens[0].value, "42");
    assert_eq!(tokens[1].value, "0");
    assert_eq!(tokens[2].kind, TokenKind::Number);
    assert_eq!(tokens[2].value, "-7");
    assert_eq!(tokens[3].value, "2147483647");
    assert_eq!(tokens[4].kind, TokenKind::EOF);
}

#[test]
fn test_minus_alone_is_symbol() {
    let tokens = tokenize("(- 5 3)".to_string(), None).unwrap();
    assert_eq!(tokens[1].kind, TokenKind::Symbol);
    assert_eq!(tokens[1].value, "-");
}

#[test]
fn test_tokenize_strings_keep_escapes_raw() {
    let source = r#""hello" "a\nb" "say \"hi\"""#.to_string();
    let tokens = tokenize(source, Some("test.sp".to_string())).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, "hello");
    assert_eq!(tokens[1].value, "a\\nb");
    assert_eq!(tokens[2].value, "say \\\"hi\\\"");
    assert_eq!(tokens[3].kind, TokenKind::EOF);
}

#[test]
fn test_comments_and_whitespace_skipped() {
    let source = "// a comment\n(begin\n\t42) // trailing";
    assert_eq!(
        kinds(source),
        vec![
            TokenKind::OpenParen,
            TokenKind::Symbol,
            TokenKind::Number,
            TokenKind::CloseParen,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_token_positions() {
    let tokens = tokenize("(var x 10)".to_string(), None).unwrap();
    assert_eq!(tokens[2].value, "x");
    assert_eq!(tokens[2].span.start.0, 5);
    assert_eq!(tokens[2].span.end.0, 6);
}

#[test]
fn test_unterminated_string_is_unrecognised() {
    let error = tokenize("(printf \"oops)".to_string(), None).unwrap_err();
    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.get_position().unwrap().0, 8);
}

#[test]
fn test_empty_source() {
    assert_eq!(kinds(""), vec![TokenKind::EOF]);
}
