//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types, helper methods, and the main parse entry point.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, cursor helpers, and coordination
//! - `declarations`: function definitions, typed declarations and `let`
//! - `statements`: statement dispatch and control flow (`if`, `while`, `return`)
//! - `expressions`: the precedence ladder, calls and primary values
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared parser state.
//!
//! The cursor only moves forward. Reading past the last token yields an
//! end-of-input token, so every helper can inspect `peek()` unconditionally.

use crate::parser::ast::*;
use crate::parser::lexer::{LexError, Lexer, Token, TokenKind};
use thiserror::Error;
use tracing::debug;

/// Parser error type
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("no tokens to be parsed")]
    EmptyTokenStream,

    #[error("unexpected token {token}")]
    UnexpectedToken { token: Token },

    #[error("parenthesis not closed")]
    UnclosedParenthesis { location: SourceLocation },

    #[error("expected {expected}, got {found}")]
    Expected { expected: String, found: Token },

    #[error(transparent)]
    Lex(#[from] LexError),
}

impl ParseError {
    /// Where the error was detected, when known.
    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            ParseError::EmptyTokenStream => None,
            ParseError::UnexpectedToken { token } => Some(&token.location),
            ParseError::UnclosedParenthesis { location } => Some(location),
            ParseError::Expected { found, .. } => Some(&found.location),
            ParseError::Lex(err) => err.location(),
        }
    }
}

/// Parse a token stream into a program.
pub fn parse(tokens: Vec<Token>) -> Result<Program, ParseError> {
    Parser::new(tokens)?.parse_program()
}

/// Lex and parse `source` in one go.
pub fn parse_source(source: &str, source_name: &str) -> Result<Program, ParseError> {
    Parser::from_source(source, source_name)?.parse_program()
}

/// Recursive descent parser for eud
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
    end: Token,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Result<Self, ParseError> {
        let end = match tokens.last() {
            Some(last) => Token::eof(last.location.clone()),
            None => return Err(ParseError::EmptyTokenStream),
        };

        Ok(Self {
            tokens,
            position: 0,
            end,
        })
    }

    pub fn from_source(source: &str, source_name: &str) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new(source, source_name);
        let tokens = lexer.tokenize()?;
        Self::new(tokens)
    }

    /// The token stream being parsed.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Parse the entire program (top-level statements)
    ///
    /// Like a block, the program ends at the first `}` or at end of input.
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let statements = self.parse_statements()?;

        debug!(
            statements = statements.len(),
            consumed = self.position,
            "parsed program"
        );

        Ok(Program { statements })
    }

    // ===== Helper methods =====

    pub(crate) fn peek(&self) -> &Token {
        self.peek_ahead(0)
    }

    pub(crate) fn peek_ahead(&self, n: usize) -> &Token {
        self.tokens.get(self.position + n).unwrap_or(&self.end)
    }

    pub(crate) fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if self.position < self.tokens.len() {
            self.position += 1;
        }
        token
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    pub(crate) fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    pub(crate) fn error_expected(&self, expected: &str) -> ParseError {
        ParseError::Expected {
            expected: expected.to_string(),
            found: self.peek().clone(),
        }
    }

    pub(crate) fn expect_token(
        &mut self,
        kind: TokenKind,
        expected: &str,
    ) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error_expected(expected))
        }
    }

    pub(crate) fn expect_lparen(&mut self) -> Result<Token, ParseError> {
        self.expect_token(TokenKind::LParen, "'('")
    }

    pub(crate) fn expect_rparen(&mut self) -> Result<Token, ParseError> {
        self.expect_token(TokenKind::RParen, "')'")
    }

    pub(crate) fn expect_lbrace(&mut self) -> Result<Token, ParseError> {
        self.expect_token(TokenKind::LBrace, "'{'")
    }

    pub(crate) fn expect_rbrace(&mut self) -> Result<Token, ParseError> {
        self.expect_token(TokenKind::RBrace, "'}'")
    }

    pub(crate) fn expect_colon(&mut self) -> Result<Token, ParseError> {
        self.expect_token(TokenKind::Colon, "':'")
    }

    pub(crate) fn expect_identifier(&mut self) -> Result<Token, ParseError> {
        self.expect_token(TokenKind::Identifier, "identifier")
    }

    /// Parse a parenthesised, comma-separated list whose `(` has already been
    /// consumed, up to and including the closing `)`.
    pub(crate) fn parse_comma_list<T>(
        &mut self,
        mut item: impl FnMut(&mut Self) -> Result<T, ParseError>,
    ) -> Result<Vec<T>, ParseError> {
        let mut items = Vec::new();

        while !self.is_at_end() && !self.check(TokenKind::RParen) {
            items.push(item(self)?);

            if self.check(TokenKind::RParen) {
                break;
            }
            if !self.match_token(TokenKind::Comma) {
                return Err(self.error_expected("','"));
            }
        }

        self.expect_rparen()?;
        Ok(items)
    }
}
