//! TINY source code front end
//!
//! This module transforms TINY source text into a syntax tree:
//! - [`lexer`]: Scanning (source text → tokens)
//! - [`parse`]: Parsing (tokens → syntax tree), with the grammar split into
//!   `statements` and `expressions`
//! - [`ast`]: Syntax tree definitions and the textual tree dump
//!
//! # Language
//!
//! - Statements: `if ... then ... [else ...] end`, `repeat ... until ...`,
//!   `x := exp`, `read x`, `write exp`, separated by `;`
//! - Expressions: `+ - * /` with the usual precedence, parentheses, and a
//!   single `<` or `=` comparison
//! - Comments: `{ ... }`, may span lines
//!
//! # Parser Implementation
//!
//! Hand-written scanner and LL(1) recursive descent parser. No error
//! recovery: the first lexical or syntax fault is returned as the result.

pub mod ast;
mod expressions;
pub mod lexer;
pub mod parse;
mod statements;

use thiserror::Error;

pub use ast::{format_tree_dump, NodeKind, SyntaxNode};
pub use lexer::{format_token_dump, scan, LexError, Token, TokenKind};
pub use parse::{parse, ParseError};

/// Either phase of the front end failing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrontendError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl FrontendError {
    pub fn location(&self) -> ast::SourceLocation {
        match self {
            FrontendError::Lex(err) => err.location(),
            FrontendError::Parse(err) => err.location(),
        }
    }
}

/// Scan and parse `source` in one step.
pub fn parse_source(source: &str) -> Result<SyntaxNode, FrontendError> {
    let tokens = scan(source)?;
    Ok(parse(&tokens)?)
}
