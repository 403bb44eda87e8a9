// End-to-end tests: source text to syntax tree

use std::fs;
use std::path::Path;

use tinyview::parser::{
    format_tree_dump, parse, parse_source, scan, FrontendError, NodeKind, ParseError, TokenKind,
};

const FACTORIAL: &str = r#"{ Sample program in TINY language }
read x;
if 0 < x then
  fact := 1;
  repeat
    fact := fact * x;
    x := x - 1
  until x = 0;
  write fact
end
"#;

fn demo(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos").join(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("cannot read {}: {}", path.display(), e))
}

#[test]
fn test_factorial_tree_dump() {
    let root = parse_source(FACTORIAL).expect("Parsing failed");
    insta::assert_snapshot!(format_tree_dump(&root).trim_end(), @r"
read (x)
  | if
  |   | op (<)
  |   |   | const (0)
  |   |   | id (x)
  |   | assign (fact)
  |   |   | const (1)
  |   |   | repeat
  |   |   |   | assign (fact)
  |   |   |   |   | op (*)
  |   |   |   |   |   | id (fact)
  |   |   |   |   |   | id (x)
  |   |   |   |   | assign (x)
  |   |   |   |   |   | op (-)
  |   |   |   |   |   |   | id (x)
  |   |   |   |   |   |   | const (1)
  |   |   |   | op (=)
  |   |   |   |   | id (x)
  |   |   |   |   | const (0)
  |   |   |   | write
  |   |   |   |   | id (fact)
");
}

#[test]
fn test_factorial_demo_matches_sample() {
    assert_eq!(demo("factorial.tiny"), FACTORIAL);
}

#[test]
fn test_all_demos_parse() {
    for name in ["factorial.tiny", "branches.tiny", "countdown.tiny"] {
        let source = demo(name);
        let root = parse_source(&source).unwrap_or_else(|e| panic!("{}: {}", name, e));
        assert!(root.kind.is_statement(), "{} root is not a statement", name);
    }
}

#[test]
fn test_dump_is_stable() {
    let source = demo("branches.tiny");
    let first = format_tree_dump(&parse_source(&source).unwrap());
    let second = format_tree_dump(&parse_source(&source).unwrap());
    assert_eq!(first, second);
}

#[test]
fn test_left_associative_subtraction() {
    let root = parse_source("x := 1 - 2 - 3").unwrap();
    assert_eq!(
        format_tree_dump(&root),
        "assign (x)\n  | op (-)\n  |   | op (-)\n  |   |   | const (1)\n  |   |   | const (2)\n  |   | const (3)\n"
    );
}

#[test]
fn test_read_then_write_chain() {
    let root = parse_source("read x; write x").unwrap();
    assert_eq!(root.kind, NodeKind::Read);
    assert_eq!(root.children.len(), 1);
    assert_eq!(root.children[0].kind, NodeKind::Write);
}

#[test]
fn test_if_without_successor_has_two_children() {
    let root = parse_source("if 0 < x then write x end").unwrap();
    assert_eq!(root.kind, NodeKind::If);
    let kinds: Vec<_> = root.children.iter().map(|c| c.kind).collect();
    assert_eq!(kinds, vec![NodeKind::BinaryOp, NodeKind::Write]);
}

#[test]
fn test_trailing_statement_without_separator() {
    let err = parse_source("read x write x").unwrap_err();
    match err {
        FrontendError::Parse(ParseError::Expected {
            expected, found, ..
        }) => {
            assert_eq!(expected, TokenKind::EndFile);
            assert_eq!(found, TokenKind::Write);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_scan_then_parse_separately() {
    let tokens = scan("write (1 + 2) * 3").unwrap();
    let root = parse(&tokens).unwrap();
    assert_eq!(root.label(), "write");
    assert_eq!(root.children[0].label(), "op (*)");
}

#[test]
fn test_error_display() {
    let err = parse_source("repeat read x until").unwrap_err();
    assert!(err.to_string().starts_with("Syntax Error: invalid factor: ENDFILE"));
}
