//! Declaration parsing implementation
//!
//! This module handles parsing of declarations:
//!
//! - Function definitions: `func name(a: i32, b: i32): i32 { ... }`
//! - Variables: `let x: u8` and `let x: u8 = expr`
//! - Typed declarations (function parameters) and type keywords
//!
//! # Grammar
//!
//! ```text
//! func_def   ::= "func" identifier "(" typed_decl_list ")" ":" type block
//! let_stmt   ::= "let" identifier ":" type ( "=" expr )?
//! typed_decl ::= identifier ":" type
//! type       ::= "u8" | "u16" | "u32" | "u64" | "i8" | "i16" | "i32" | "i64"
//!              | "char" | "usize" | "uptr"
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse function definition
    pub(crate) fn parse_function_definition(&mut self) -> Result<Stmt, ParseError> {
        let location = self.advance().location; // 'func'

        let target = self.expect_identifier()?;
        self.expect_lparen()?;
        let params = self.parse_comma_list(Self::parse_typed_declaration)?;
        self.expect_colon()?;
        let return_type = self.parse_type()?;
        let body = self.parse_block()?;

        Ok(Stmt::FuncDef {
            target,
            return_type,
            params,
            body,
            location,
        })
    }

    /// Parse `let name: type` with an optional `= value`
    pub(crate) fn parse_let_statement(&mut self) -> Result<Stmt, ParseError> {
        let location = self.advance().location; // 'let'

        let target = self.expect_identifier()?;
        self.expect_colon()?;
        let value_type = self.parse_type()?;

        if !self.match_token(TokenKind::Assign) {
            return Ok(Stmt::VarDecl {
                target,
                value_type,
                location,
            });
        }

        let value = self.parse_expression()?;

        Ok(Stmt::VarInit {
            target,
            value_type,
            value,
            location,
        })
    }

    /// Parse `name: type`
    pub(crate) fn parse_typed_declaration(&mut self) -> Result<TypedDecl, ParseError> {
        let target = self.expect_identifier()?;
        self.expect_colon()?;
        let value_type = self.parse_type()?;

        Ok(TypedDecl { target, value_type })
    }

    /// Parse a type keyword
    pub(crate) fn parse_type(&mut self) -> Result<TypeNode, ParseError> {
        if !self.peek().is_type_keyword() {
            return Err(self.error_expected("type keyword"));
        }

        Ok(TypeNode {
            token: self.advance(),
        })
    }
}
