//! Scanner (tokenizer) for TINY source code
//!
//! Converts raw source text into a flat [`Token`] sequence consumed by the
//! parser. The scan is a single left-to-right pass with one character of
//! lookahead; the first lexical fault aborts the whole scan and no partial
//! token list is returned.

use super::ast::SourceLocation;
use std::fmt;
use thiserror::Error;

/// Lexeme carried by the end-of-file sentinel
pub const ENDFILE_LEXEME: &str = "EOF";

/// All token kinds the scanner knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Keywords
    If,
    Then,
    Else,
    End,
    Repeat,
    Until,
    Read,
    Write,

    // Punctuation
    Semicolon,
    Assign,
    OpenBracket,
    ClosedBracket,

    // Operators
    LessThan,
    Equal,
    Plus,
    Minus,
    Mult,
    Div,

    // Literals
    Id,
    Number,

    // Sentinels
    EndFile,
    Error,
}

impl TokenKind {
    /// Reserved word lookup (case-sensitive)
    pub fn keyword(word: &str) -> Option<TokenKind> {
        match word {
            "if" => Some(TokenKind::If),
            "then" => Some(TokenKind::Then),
            "else" => Some(TokenKind::Else),
            "end" => Some(TokenKind::End),
            "repeat" => Some(TokenKind::Repeat),
            "until" => Some(TokenKind::Until),
            "read" => Some(TokenKind::Read),
            "write" => Some(TokenKind::Write),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TokenKind::If => "IF",
            TokenKind::Then => "THEN",
            TokenKind::Else => "ELSE",
            TokenKind::End => "END",
            TokenKind::Repeat => "REPEAT",
            TokenKind::Until => "UNTIL",
            TokenKind::Read => "READ",
            TokenKind::Write => "WRITE",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Assign => "ASSIGN",
            TokenKind::OpenBracket => "OPENBRACKET",
            TokenKind::ClosedBracket => "CLOSEDBRACKET",
            TokenKind::LessThan => "LESSTHAN",
            TokenKind::Equal => "EQUAL",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Mult => "MULT",
            TokenKind::Div => "DIV",
            TokenKind::Id => "ID",
            TokenKind::Number => "NUMBER",
            TokenKind::EndFile => "ENDFILE",
            TokenKind::Error => "ERROR",
        }
    }

    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::If
                | TokenKind::Then
                | TokenKind::Else
                | TokenKind::End
                | TokenKind::Repeat
                | TokenKind::Until
                | TokenKind::Read
                | TokenKind::Write
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A scanned token: its kind, the exact source text, and where it starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            location,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} \"{}\"", self.kind, self.lexeme)
    }
}

/// Lexical errors. Any of these aborts the scan.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("Scanner Error: Unclosed comment starting at {location}.")]
    UnterminatedComment { location: SourceLocation },

    #[error("Scanner Error: Expected ':=' but found ':' at {location}.")]
    BareColon { location: SourceLocation },

    #[error("Scanner Error: Unexpected character '{ch}' at {location}.")]
    UnexpectedCharacter { ch: char, location: SourceLocation },
}

impl LexError {
    pub fn location(&self) -> SourceLocation {
        match self {
            LexError::UnterminatedComment { location }
            | LexError::BareColon { location }
            | LexError::UnexpectedCharacter { location, .. } => *location,
        }
    }
}

/// Scanner for TINY source code
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize the entire input, ending with an ENDFILE token.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace_and_comments()?;

            if self.is_at_end() {
                tokens.push(Token::new(
                    TokenKind::EndFile,
                    ENDFILE_LEXEME,
                    self.current_location(),
                ));
                break;
            }

            self.next_tokens(&mut tokens)?;
        }

        Ok(tokens)
    }

    /// Scan the token(s) starting at the current character.
    ///
    /// Usually one token; an identifier run directly followed by digits
    /// yields an ID and a NUMBER.
    fn next_tokens(&mut self, tokens: &mut Vec<Token>) -> Result<(), LexError> {
        let loc = self.current_location();
        let Some(ch) = self.advance() else {
            return Ok(());
        };

        let single = |kind: TokenKind| Token::new(kind, ch.to_string(), loc);

        let token = match ch {
            c if c.is_ascii_alphabetic() => {
                let word = self.identifier_or_keyword(c, loc);
                tokens.push(word);
                // x1 scans as ID "x" then NUMBER "1"
                if self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    let digit_loc = self.current_location();
                    let Some(first) = self.advance() else {
                        return Ok(());
                    };
                    tokens.push(self.number_literal(first, digit_loc));
                }
                return Ok(());
            }
            c if c.is_ascii_digit() => self.number_literal(c, loc),
            ':' => {
                if self.peek() == Some('=') {
                    self.advance();
                    Token::new(TokenKind::Assign, ":=", loc)
                } else {
                    return Err(LexError::BareColon { location: loc });
                }
            }
            ';' => single(TokenKind::Semicolon),
            '<' => single(TokenKind::LessThan),
            '=' => single(TokenKind::Equal),
            '+' => single(TokenKind::Plus),
            '-' => single(TokenKind::Minus),
            '*' => single(TokenKind::Mult),
            '/' => single(TokenKind::Div),
            '(' => single(TokenKind::OpenBracket),
            ')' => single(TokenKind::ClosedBracket),
            _ => {
                return Err(LexError::UnexpectedCharacter { ch, location: loc });
            }
        };

        tokens.push(token);
        Ok(())
    }

    /// Maximal digit run
    fn number_literal(&mut self, first_digit: char, loc: SourceLocation) -> Token {
        let mut digits = String::new();
        digits.push(first_digit);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                digits.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        Token::new(TokenKind::Number, digits, loc)
    }

    /// Maximal alphabetic run, checked against the reserved words
    fn identifier_or_keyword(&mut self, first_char: char, loc: SourceLocation) -> Token {
        let mut word = String::new();
        word.push(first_char);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphabetic() {
                word.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        let kind = TokenKind::keyword(&word).unwrap_or(TokenKind::Id);
        Token::new(kind, word, loc)
    }

    /// Skip whitespace and `{ ... }` comments
    fn skip_whitespace_and_comments(&mut self) -> Result<(), LexError> {
        loop {
            match self.peek() {
                Some(' ') | Some('\t') | Some('\r') | Some('\n') => {
                    self.advance();
                }
                Some('{') => self.skip_comment()?,
                _ => break,
            }
        }
        Ok(())
    }

    fn skip_comment(&mut self) -> Result<(), LexError> {
        let start_loc = self.current_location();
        self.advance(); // skip '{'

        while let Some(ch) = self.advance() {
            if ch == '}' {
                return Ok(());
            }
        }

        Err(LexError::UnterminatedComment {
            location: start_loc,
        })
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.position, self.line, self.column)
    }
}

/// Scan `source` into tokens terminated by ENDFILE.
pub fn scan(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).tokenize()
}

/// Diagnostic listing of a token sequence, one `Lexeme/Type` line per token.
pub fn format_token_dump(tokens: &[Token]) -> String {
    const RULE: &str = "-------------------------------";
    let mut out = String::new();
    out.push_str("Tokens produced by the scanner:\n");
    out.push_str(RULE);
    out.push('\n');
    for token in tokens {
        out.push_str(&format!(
            "Lexeme: \"{}\", Type: {}\n",
            token.lexeme, token.kind
        ));
    }
    out.push_str(RULE);
    out.push('\n');
    out.push_str(&format!("Total tokens: {}\n", tokens.len()));
    out
}
