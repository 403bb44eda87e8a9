//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including the error type, cursor helpers, and the `program` entry rule.
//!
//! # Parser Architecture
//!
//! The Parser is a recursive descent LL(1) parser with a single cursor and no
//! backtracking:
//! - This module: Parser struct, cursor helpers, `program`
//! - `statements`: stmt-sequence and the five statement forms
//! - `expressions`: comparison, additive and multiplicative levels, factors
//!
//! Parser methods are split across these files using `impl Parser` blocks,
//! each extending the Parser with one slice of the grammar.

use crate::parser::ast::{SourceLocation, SyntaxNode};
use crate::parser::lexer::{Token, TokenKind, ENDFILE_LEXEME};
use thiserror::Error;

/// Syntax errors. The first one aborts the parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A terminal the grammar requires is missing
    #[error("Syntax Error: expected {expected} but found {found} at {location}")]
    Expected {
        expected: TokenKind,
        found: TokenKind,
        location: SourceLocation,
    },

    /// Statement dispatch saw a token that cannot start a statement
    #[error("Syntax Error: unexpected token in statement: {found} at {location}")]
    UnexpectedToken {
        found: TokenKind,
        location: SourceLocation,
    },

    /// A factor was required but the token cannot start one
    #[error("Syntax Error: invalid factor: {found} at {location}")]
    InvalidFactor {
        found: TokenKind,
        location: SourceLocation,
    },
}

impl ParseError {
    pub fn location(&self) -> SourceLocation {
        match self {
            ParseError::Expected { location, .. }
            | ParseError::UnexpectedToken { location, .. }
            | ParseError::InvalidFactor { location, .. } => *location,
        }
    }
}

/// Recursive descent parser for TINY
pub struct Parser<'a> {
    pub(crate) tokens: &'a [Token],
    pub(crate) position: usize,
    end_of_input: Token,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        let end_location = tokens
            .last()
            .map(|t| t.location)
            .unwrap_or(SourceLocation::new(0, 1, 1));
        Self {
            tokens,
            position: 0,
            end_of_input: Token::new(TokenKind::EndFile, ENDFILE_LEXEME, end_location),
        }
    }

    /// program → stmt-sequence ENDFILE
    ///
    /// Anything left over after the sequence is rejected.
    pub fn parse_program(&mut self) -> Result<SyntaxNode, ParseError> {
        let root = self.parse_stmt_sequence()?;
        self.expect(TokenKind::EndFile)?;
        Ok(root)
    }

    // ===== Helper methods =====

    /// Current token; past the end of the slice this is ENDFILE.
    pub(crate) fn peek(&self) -> &Token {
        self.tokens.get(self.position).unwrap_or(&self.end_of_input)
    }

    pub(crate) fn peek_kind(&self) -> TokenKind {
        self.peek().kind
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == kind
    }

    pub(crate) fn advance(&mut self) {
        if self.position < self.tokens.len() {
            self.position += 1;
        }
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        self.peek().location
    }

    /// Consume a token of `kind` or fail naming what was found instead.
    pub(crate) fn expect(&mut self, kind: TokenKind) -> Result<(), ParseError> {
        if self.check(kind) {
            self.advance();
            Ok(())
        } else {
            Err(ParseError::Expected {
                expected: kind,
                found: self.peek_kind(),
                location: self.current_location(),
            })
        }
    }

    /// Consume an ID token and return its lexeme.
    pub(crate) fn expect_identifier(&mut self) -> Result<String, ParseError> {
        let name = self.peek().lexeme.clone();
        self.expect(TokenKind::Id)?;
        Ok(name)
    }
}

/// Parse a token sequence (as produced by [`scan`](crate::parser::lexer::scan))
/// into a syntax tree rooted at the first statement.
pub fn parse(tokens: &[Token]) -> Result<SyntaxNode, ParseError> {
    Parser::new(tokens).parse_program()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ast::NodeKind;
    use crate::parser::lexer::scan;

    fn parse_str(source: &str) -> Result<SyntaxNode, ParseError> {
        let tokens = scan(source).unwrap();
        parse(&tokens)
    }

    #[test]
    fn test_parse_simple_program() {
        let root = parse_str("read x").unwrap();
        assert_eq!(root.kind, NodeKind::Read);
        assert_eq!(root.text.as_deref(), Some("x"));
        assert!(root.children.is_empty());
    }

    #[test]
    fn test_trailing_tokens_rejected() {
        let err = parse_str("read x end").unwrap_err();
        match err {
            ParseError::Expected {
                expected, found, ..
            } => {
                assert_eq!(expected, TokenKind::EndFile);
                assert_eq!(found, TokenKind::End);
            }
            other => panic!("Expected trailing-token error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_endfile_sentinel_is_tolerated() {
        let mut tokens = scan("write 1").unwrap();
        tokens.pop();
        let root = parse(&tokens).unwrap();
        assert_eq!(root.kind, NodeKind::Write);
    }

    #[test]
    fn test_empty_program_is_an_error() {
        let err = parse_str("").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnexpectedToken {
                found: TokenKind::EndFile,
                location: SourceLocation::new(0, 1, 1),
            }
        );
    }

    #[test]
    fn test_empty_token_slice_reports_first_line() {
        let err = parse(&[]).unwrap_err();
        assert_eq!(err.location(), SourceLocation::new(0, 1, 1));
        assert!(err.to_string().ends_with("at position 0 (line 1, column 1)"));
    }

    #[test]
    fn test_error_message_names_expected_and_found() {
        let err = parse_str("x = 1").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Syntax Error: expected ASSIGN but found EQUAL at position 2 (line 1, column 3)"
        );
    }
}
