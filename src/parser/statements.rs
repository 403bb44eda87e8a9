//! Statement parsing implementation
//!
//! # Grammar
//!
//! ```text
//! stmt-sequence ::= statement { ';' statement }
//! statement     ::= if-stmt | repeat-stmt | assign-stmt | read-stmt | write-stmt
//! if-stmt       ::= 'if' exp 'then' stmt-sequence [ 'else' stmt-sequence ] 'end'
//! repeat-stmt   ::= 'repeat' stmt-sequence 'until' exp
//! assign-stmt   ::= ID ':=' exp
//! read-stmt     ::= 'read' ID
//! write-stmt    ::= 'write' exp
//! ```
//!
//! A sequence is threaded rather than collected: each statement after the
//! first is pushed as the trailing child of its predecessor, and the head of
//! the chain is returned.

use crate::parser::ast::{NodeKind, SyntaxNode};
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

impl Parser<'_> {
    /// Parse `statement { ';' statement }` and return the head of the chain
    pub(crate) fn parse_stmt_sequence(&mut self) -> Result<SyntaxNode, ParseError> {
        let mut head = self.parse_statement()?;
        let mut rest = Vec::new();

        while self.check(TokenKind::Semicolon) {
            self.advance();
            rest.push(self.parse_statement()?);
        }

        // Fold from the tail so each statement owns its successor
        let tail = rest.into_iter().rev().reduce(|successor, mut statement| {
            statement.children.push(successor);
            statement
        });
        if let Some(successor) = tail {
            head.children.push(successor);
        }

        Ok(head)
    }

    /// Dispatch on the current token kind
    pub(crate) fn parse_statement(&mut self) -> Result<SyntaxNode, ParseError> {
        match self.peek_kind() {
            TokenKind::If => self.parse_if_statement(),
            TokenKind::Repeat => self.parse_repeat_statement(),
            TokenKind::Id => self.parse_assign_statement(),
            TokenKind::Read => self.parse_read_statement(),
            TokenKind::Write => self.parse_write_statement(),
            found => Err(ParseError::UnexpectedToken {
                found,
                location: self.current_location(),
            }),
        }
    }

    fn parse_if_statement(&mut self) -> Result<SyntaxNode, ParseError> {
        self.expect(TokenKind::If)?;
        let condition = self.parse_exp()?;

        self.expect(TokenKind::Then)?;
        let then_branch = self.parse_stmt_sequence()?;

        let mut node = SyntaxNode::new(NodeKind::If)
            .with_child(condition)
            .with_child(then_branch);

        if self.check(TokenKind::Else) {
            self.advance();
            node.children.push(self.parse_stmt_sequence()?);
        }

        self.expect(TokenKind::End)?;
        Ok(node)
    }

    fn parse_repeat_statement(&mut self) -> Result<SyntaxNode, ParseError> {
        self.expect(TokenKind::Repeat)?;
        let body = self.parse_stmt_sequence()?;

        self.expect(TokenKind::Until)?;
        let condition = self.parse_exp()?;

        Ok(SyntaxNode::new(NodeKind::Repeat)
            .with_child(body)
            .with_child(condition))
    }

    fn parse_assign_statement(&mut self) -> Result<SyntaxNode, ParseError> {
        let target = self.expect_identifier()?;
        self.expect(TokenKind::Assign)?;
        let value = self.parse_exp()?;

        Ok(SyntaxNode::with_text(NodeKind::Assign, target).with_child(value))
    }

    fn parse_read_statement(&mut self) -> Result<SyntaxNode, ParseError> {
        self.expect(TokenKind::Read)?;
        let target = self.expect_identifier()?;

        Ok(SyntaxNode::with_text(NodeKind::Read, target))
    }

    fn parse_write_statement(&mut self) -> Result<SyntaxNode, ParseError> {
        self.expect(TokenKind::Write)?;
        let value = self.parse_exp()?;

        Ok(SyntaxNode::new(NodeKind::Write).with_child(value))
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::{format_tree_dump, NodeKind, SyntaxNode};
    use crate::parser::lexer::{scan, TokenKind};
    use crate::parser::parse::{parse, ParseError};

    fn parse_str(source: &str) -> Result<SyntaxNode, ParseError> {
        parse(&scan(source).unwrap())
    }

    #[test]
    fn test_sequence_is_threaded() {
        let root = parse_str("read x; write x").unwrap();

        assert_eq!(root.kind, NodeKind::Read);
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.children[0].kind, NodeKind::Write);
        assert_eq!(root.children[0].children.len(), 1);
        assert_eq!(root.children[0].children[0].kind, NodeKind::Identifier);
    }

    #[test]
    fn test_three_statement_chain() {
        let root = parse_str("read a; read b; read c").unwrap();
        let b = &root.children[0];
        let c = &b.children[0];

        assert_eq!(root.text.as_deref(), Some("a"));
        assert_eq!(b.text.as_deref(), Some("b"));
        assert_eq!(c.text.as_deref(), Some("c"));
        assert!(c.children.is_empty());
    }

    #[test]
    fn test_if_without_else() {
        let root = parse_str("if 0 < x then write x end").unwrap();

        assert_eq!(root.kind, NodeKind::If);
        assert_eq!(root.children.len(), 2);
        assert_eq!(root.children[0].kind, NodeKind::BinaryOp);
        assert_eq!(root.children[0].text.as_deref(), Some("<"));
        assert_eq!(root.children[1].kind, NodeKind::Write);
    }

    #[test]
    fn test_if_with_else_and_successor() {
        let root = parse_str("if x = 1 then read y else read z end; write y").unwrap();

        assert_eq!(root.children.len(), 4);
        assert_eq!(root.children[2].text.as_deref(), Some("z"));
        assert_eq!(root.children[3].kind, NodeKind::Write);
    }

    #[test]
    fn test_repeat_structure() {
        let root = parse_str("repeat x := x - 1 until x = 0; write x").unwrap();

        assert_eq!(root.kind, NodeKind::Repeat);
        assert_eq!(root.children.len(), 3);
        assert_eq!(root.children[0].kind, NodeKind::Assign);
        assert_eq!(root.children[1].text.as_deref(), Some("="));
        assert_eq!(root.children[2].kind, NodeKind::Write);
    }

    #[test]
    fn test_nested_sequence_stays_inside_branch() {
        let root = parse_str("if x < 1 then read a; read b end").unwrap();
        let then_head = &root.children[1];

        assert_eq!(root.children.len(), 2);
        assert_eq!(then_head.text.as_deref(), Some("a"));
        assert_eq!(then_head.children[0].text.as_deref(), Some("b"));
    }

    #[test]
    fn test_missing_then() {
        let err = parse_str("if x write x end").unwrap_err();
        assert!(matches!(
            err,
            ParseError::Expected {
                expected: TokenKind::Then,
                found: TokenKind::Write,
                ..
            }
        ));
    }

    #[test]
    fn test_read_requires_identifier() {
        let err = parse_str("read 5").unwrap_err();
        assert!(matches!(
            err,
            ParseError::Expected {
                expected: TokenKind::Id,
                found: TokenKind::Number,
                ..
            }
        ));
    }

    #[test]
    fn test_statement_dispatch_error() {
        let err = parse_str("read x; ; write x").unwrap_err();
        assert!(matches!(
            err,
            ParseError::UnexpectedToken {
                found: TokenKind::Semicolon,
                ..
            }
        ));
    }

    #[test]
    fn test_dump_of_chain() {
        let root = parse_str("read x; write x").unwrap();
        assert_eq!(
            format_tree_dump(&root),
            "read (x)\n  | write\n  |   | id (x)\n"
        );
    }
}
