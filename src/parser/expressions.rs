//! Expression parsing implementation
//!
//! # Grammar
//!
//! ```text
//! exp        ::= simple-exp [ ('<' | '=') simple-exp ]
//! simple-exp ::= term { ('+' | '-') term }
//! term       ::= factor { ('*' | '/') factor }
//! factor     ::= '(' exp ')' | NUMBER | ID
//! ```
//!
//! Every binary level is left-associative: the accumulated left operand is
//! wrapped by each new operator. Comparison is not chainable; a second `<`
//! or `=` is left for the caller.

use crate::parser::ast::SyntaxNode;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

impl Parser<'_> {
    /// exp: at most one comparison
    pub(crate) fn parse_exp(&mut self) -> Result<SyntaxNode, ParseError> {
        let left = self.parse_simple_exp()?;

        if matches!(self.peek_kind(), TokenKind::LessThan | TokenKind::Equal) {
            let op = self.take_operator();
            let right = self.parse_simple_exp()?;
            return Ok(SyntaxNode::binary(op, left, right));
        }

        Ok(left)
    }

    /// simple-exp: additive level
    fn parse_simple_exp(&mut self) -> Result<SyntaxNode, ParseError> {
        let mut left = self.parse_term()?;

        while matches!(self.peek_kind(), TokenKind::Plus | TokenKind::Minus) {
            let op = self.take_operator();
            let right = self.parse_term()?;
            left = SyntaxNode::binary(op, left, right);
        }

        Ok(left)
    }

    /// term: multiplicative level
    fn parse_term(&mut self) -> Result<SyntaxNode, ParseError> {
        let mut left = self.parse_factor()?;

        while matches!(self.peek_kind(), TokenKind::Mult | TokenKind::Div) {
            let op = self.take_operator();
            let right = self.parse_factor()?;
            left = SyntaxNode::binary(op, left, right);
        }

        Ok(left)
    }

    fn parse_factor(&mut self) -> Result<SyntaxNode, ParseError> {
        match self.peek_kind() {
            TokenKind::OpenBracket => {
                self.advance();
                let inner = self.parse_exp()?;
                self.expect(TokenKind::ClosedBracket)?;
                Ok(inner)
            }
            TokenKind::Number => {
                let digits = self.peek().lexeme.clone();
                self.advance();
                Ok(SyntaxNode::number(digits))
            }
            TokenKind::Id => {
                let name = self.peek().lexeme.clone();
                self.advance();
                Ok(SyntaxNode::identifier(name))
            }
            found => Err(ParseError::InvalidFactor {
                found,
                location: self.current_location(),
            }),
        }
    }

    /// Consume the current operator token and return its symbol
    fn take_operator(&mut self) -> String {
        let op = self.peek().lexeme.clone();
        self.advance();
        op
    }
}
