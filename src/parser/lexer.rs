//! Lexer (tokenizer) for eud source code
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the parser.
//! The stream always ends with a single [`TokenKind::Eof`] token placed at the
//! location just past the last character.

use super::ast::SourceLocation;
use rustc_hash::FxHashSet;
use serde::Serialize;
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// Every reserved word of the language.
pub const KEYWORDS: &[&str] = &[
    "if", "else", "for", "while", "break", "func", "return", "let", "u8", "u16", "u32", "u64",
    "i8", "i16", "i32", "i64", "char", "usize", "uptr",
];

/// The keywords accepted in type position.
pub const TYPE_KEYWORDS: &[&str] = &[
    "u8", "u16", "u32", "u64", "i8", "i16", "i32", "i64", "char", "usize", "uptr",
];

/// All token kinds produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    #[serde(rename = "EOF")]
    Eof,
    #[serde(rename = "IDENTIFIER")]
    Identifier,
    #[serde(rename = "KEYWORD")]
    Keyword,
    #[serde(rename = "INT")]
    Int,

    // Punctuation
    #[serde(rename = "LPAREN")]
    LParen, // (
    #[serde(rename = "RPAREN")]
    RParen, // )
    #[serde(rename = "LBRACKET")]
    LBracket, // [
    #[serde(rename = "RBRACKET")]
    RBracket, // ]
    #[serde(rename = "LBRACE")]
    LBrace, // {
    #[serde(rename = "RBRACE")]
    RBrace, // }
    #[serde(rename = "COLON")]
    Colon, // :
    #[serde(rename = "COMMA")]
    Comma, // ,

    // Arithmetic
    #[serde(rename = "ADD_OP")]
    Add, // +
    #[serde(rename = "SUB_OP")]
    Sub, // -
    #[serde(rename = "MUL_OP")]
    Mul, // *
    #[serde(rename = "DIV_OP")]
    Div, // /
    #[serde(rename = "MOD_OP")]
    Mod, // %
    #[serde(rename = "EXP_OP")]
    Exp, // **

    #[serde(rename = "ASGN_OP")]
    Assign, // =

    // Comparison
    #[serde(rename = "CMP_LT_OP")]
    Lt, // <
    #[serde(rename = "CMP_LTE_OP")]
    Lte, // <=
    #[serde(rename = "CMP_GT_OP")]
    Gt, // >
    #[serde(rename = "CMP_GTE_OP")]
    Gte, // >=
    #[serde(rename = "CMP_EQ_OP")]
    Eq, // ==
    #[serde(rename = "CMP_NE_OP")]
    Ne, // !=

    #[serde(rename = "LOG_NOT")]
    Not, // !
}

impl TokenKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::Eof => "EOF",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Keyword => "KEYWORD",
            TokenKind::Int => "INT",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::LBracket => "LBRACKET",
            TokenKind::RBracket => "RBRACKET",
            TokenKind::LBrace => "LBRACE",
            TokenKind::RBrace => "RBRACE",
            TokenKind::Colon => "COLON",
            TokenKind::Comma => "COMMA",
            TokenKind::Add => "ADD_OP",
            TokenKind::Sub => "SUB_OP",
            TokenKind::Mul => "MUL_OP",
            TokenKind::Div => "DIV_OP",
            TokenKind::Mod => "MOD_OP",
            TokenKind::Exp => "EXP_OP",
            TokenKind::Assign => "ASGN_OP",
            TokenKind::Lt => "CMP_LT_OP",
            TokenKind::Lte => "CMP_LTE_OP",
            TokenKind::Gt => "CMP_GT_OP",
            TokenKind::Gte => "CMP_GTE_OP",
            TokenKind::Eq => "CMP_EQ_OP",
            TokenKind::Ne => "CMP_NE_OP",
            TokenKind::Not => "LOG_NOT",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A lexeme together with its kind and the location of its first character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "Token")]
pub struct Token {
    #[serde(rename = "tokenType")]
    pub kind: TokenKind,
    #[serde(rename = "value")]
    pub text: String,
    #[serde(rename = "fp")]
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            kind,
            text: text.into(),
            location,
        }
    }

    /// End-of-input marker at `location`.
    pub fn eof(location: SourceLocation) -> Self {
        Self::new(TokenKind::Eof, "\0", location)
    }

    pub fn is_keyword(&self, word: &str) -> bool {
        self.kind == TokenKind::Keyword && self.text == word
    }

    pub fn is_type_keyword(&self) -> bool {
        self.kind == TokenKind::Keyword && TYPE_KEYWORDS.contains(&self.text.as_str())
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Eof => write!(f, "[EOF]"),
            kind => write!(f, "[{}:'{}']", kind, self.text),
        }
    }
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("no text to be tokenized")]
    EmptySource,

    #[error("unexpected character '{}'", .ch.escape_default())]
    UnexpectedCharacter { ch: char, location: SourceLocation },
}

impl LexError {
    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            LexError::EmptySource => None,
            LexError::UnexpectedCharacter { location, .. } => Some(location),
        }
    }
}

/// Lex `source` in one go.
pub fn tokenize(source: &str, source_name: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source, source_name).tokenize()
}

/// Lexer for eud source code
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    location: SourceLocation,
    keywords: FxHashSet<&'static str>,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str, source_name: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            location: SourceLocation::start(source_name),
            keywords: KEYWORDS.iter().copied().collect(),
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        if self.input.is_empty() {
            return Err(LexError::EmptySource);
        }

        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace();

            let Some(ch) = self.peek() else {
                tokens.push(Token::eof(self.current_location()));
                break;
            };

            tokens.push(self.next_token(ch)?);
        }

        debug!(
            source = %self.location.source_name,
            tokens = tokens.len(),
            "tokenized source"
        );

        Ok(tokens)
    }

    /// Lex the token starting at `ch`, the character under the cursor.
    fn next_token(&mut self, ch: char) -> Result<Token, LexError> {
        let loc = self.current_location();
        self.advance();

        let single = |kind| Ok(Token::new(kind, ch, loc.clone()));

        match ch {
            // Identifiers and keywords
            'a'..='z' | 'A'..='Z' | '_' => Ok(self.identifier_or_keyword(ch, loc)),

            // Numeric literals; a zero never starts a longer literal
            '1'..='9' => Ok(self.number_literal(ch, loc)),
            '0' => single(TokenKind::Int),

            // Operators with a two-character form
            '*' => Ok(self.one_or_two(ch, loc, '*', TokenKind::Mul, TokenKind::Exp)),
            '=' => Ok(self.one_or_two(ch, loc, '=', TokenKind::Assign, TokenKind::Eq)),
            '<' => Ok(self.one_or_two(ch, loc, '=', TokenKind::Lt, TokenKind::Lte)),
            '>' => Ok(self.one_or_two(ch, loc, '=', TokenKind::Gt, TokenKind::Gte)),
            '!' => Ok(self.one_or_two(ch, loc, '=', TokenKind::Not, TokenKind::Ne)),

            '+' => single(TokenKind::Add),
            '-' => single(TokenKind::Sub),
            '/' => single(TokenKind::Div),
            '%' => single(TokenKind::Mod),
            '(' => single(TokenKind::LParen),
            ')' => single(TokenKind::RParen),
            '[' => single(TokenKind::LBracket),
            ']' => single(TokenKind::RBracket),
            '{' => single(TokenKind::LBrace),
            '}' => single(TokenKind::RBrace),
            ':' => single(TokenKind::Colon),
            ',' => single(TokenKind::Comma),

            _ => Err(LexError::UnexpectedCharacter { ch, location: loc }),
        }
    }

    /// `first` alone is `single`; `first` followed by `second` is `double`.
    fn one_or_two(
        &mut self,
        first: char,
        loc: SourceLocation,
        second: char,
        single: TokenKind,
        double: TokenKind,
    ) -> Token {
        if self.peek() == Some(second) {
            self.advance();
            Token::new(double, format!("{first}{second}"), loc)
        } else {
            Token::new(single, first, loc)
        }
    }

    /// Parse numeric literal (decimal integers only)
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

        Token::new(TokenKind::Int, digits, loc)
    }

    /// Parse identifier or keyword
    fn identifier_or_keyword(&mut self, first_char: char, loc: SourceLocation) -> Token {
        let mut ident = String::new();
        ident.push(first_char);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        let kind = if self.keywords.contains(ident.as_str()) {
            TokenKind::Keyword
        } else {
            TokenKind::Identifier
        };

        Token::new(kind, ident, loc)
    }

    fn skip_whitespace(&mut self) {
        while let Some(' ' | '\t' | '\n') = self.peek() {
            self.advance();
        }
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;
        self.location.advance(ch);
        Some(ch)
    }

    fn current_location(&self) -> SourceLocation {
        self.location.clone()
    }
}
