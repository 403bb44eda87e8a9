// Scanner behaviour through the public API

use rstest::rstest;
use tinyview::parser::{scan, LexError, TokenKind};

fn kinds(source: &str) -> Vec<TokenKind> {
    scan(source)
        .expect("scan failed")
        .iter()
        .map(|t| t.kind)
        .collect()
}

#[rstest]
#[case("", vec![TokenKind::EndFile])]
#[case("  \n\t \r\n", vec![TokenKind::EndFile])]
#[case("{ only a comment }", vec![TokenKind::EndFile])]
#[case("if then", vec![TokenKind::If, TokenKind::Then, TokenKind::EndFile])]
#[case("a:=b", vec![TokenKind::Id, TokenKind::Assign, TokenKind::Id, TokenKind::EndFile])]
#[case("x1", vec![TokenKind::Id, TokenKind::Number, TokenKind::EndFile])]
#[case("12{c}34", vec![TokenKind::Number, TokenKind::Number, TokenKind::EndFile])]
#[case(
    "(a+b)*c/d-1<e=f;",
    vec![
        TokenKind::OpenBracket,
        TokenKind::Id,
        TokenKind::Plus,
        TokenKind::Id,
        TokenKind::ClosedBracket,
        TokenKind::Mult,
        TokenKind::Id,
        TokenKind::Div,
        TokenKind::Id,
        TokenKind::Minus,
        TokenKind::Number,
        TokenKind::LessThan,
        TokenKind::Id,
        TokenKind::Equal,
        TokenKind::Id,
        TokenKind::Semicolon,
        TokenKind::EndFile,
    ]
)]
#[case(
    "repeat until else end read write",
    vec![
        TokenKind::Repeat,
        TokenKind::Until,
        TokenKind::Else,
        TokenKind::End,
        TokenKind::Read,
        TokenKind::Write,
        TokenKind::EndFile,
    ]
)]
fn test_token_kinds(#[case] source: &str, #[case] expected: Vec<TokenKind>) {
    assert_eq!(kinds(source), expected);
}

#[rstest]
#[case("x:")]
#[case("x : = 1")]
#[case("{ unterminated")]
#[case("read x; { never closed\nwrite x")]
#[case("x := 1 # 2")]
#[case("write \"text\"")]
fn test_lexical_errors(#[case] source: &str) {
    assert!(scan(source).is_err(), "expected a lexical error for {:?}", source);
}

#[test]
fn test_bare_colon_location() {
    let err = scan("x:").unwrap_err();
    assert!(matches!(err, LexError::BareColon { .. }));
    assert_eq!(err.location().offset, 1);
}

#[test]
fn test_unterminated_comment_message() {
    let err = scan("read x\n  { oops").unwrap_err();
    assert!(matches!(err, LexError::UnterminatedComment { .. }));
    assert_eq!(err.location().line, 2);
    assert_eq!(err.location().column, 3);
    assert!(err.to_string().starts_with("Scanner Error: Unclosed comment"));
}

#[test]
fn test_lexemes_are_preserved() {
    let tokens = scan("fact := 120").unwrap();
    let lexemes: Vec<_> = tokens.iter().map(|t| t.lexeme.as_str()).collect();
    assert_eq!(lexemes, vec!["fact", ":=", "120", "EOF"]);
}
