//! Expression parsing implementation
//!
//! # Supported Expressions
//!
//! - Literals: decimal integers
//! - Variable references
//! - Assignment to a bare identifier: `x = expr`
//! - Binary operators: arithmetic (`+ - * / % **`) and comparison
//!   (`< <= > >= == !=`)
//! - Function calls: `f(a, b)`
//! - Parenthesised expressions
//!
//! # Precedence
//!
//! Every binary operator has its own level. From lowest to highest:
//!
//! ```text
//! assignment  !=  ==  >=  <=  >  <  +  -  *  /  %  **  call/value
//! ```
//!
//! Each level parses the next-higher level as its left operand and, when its
//! operator follows, recurses into itself for the right operand. Every binary
//! operator is therefore right-associative: `10 - 3 - 2` is `10 - (3 - 2)`.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

/// Binary precedence levels, lowest first.
const BINARY_LEVELS: &[(TokenKind, BinOp)] = &[
    (TokenKind::Ne, BinOp::Ne),
    (TokenKind::Eq, BinOp::Eq),
    (TokenKind::Gte, BinOp::Gte),
    (TokenKind::Lte, BinOp::Lte),
    (TokenKind::Gt, BinOp::Gt),
    (TokenKind::Lt, BinOp::Lt),
    (TokenKind::Add, BinOp::Add),
    (TokenKind::Sub, BinOp::Sub),
    (TokenKind::Mul, BinOp::Mul),
    (TokenKind::Div, BinOp::Div),
    (TokenKind::Mod, BinOp::Mod),
    (TokenKind::Exp, BinOp::Exp),
];

impl Parser {
    /// Parse expression (top-level entry point)
    pub fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.parse_assignment()
    }

    /// Parse `identifier = expr`, or fall through to the binary levels
    ///
    /// Decided on one token of lookahead, so nothing is consumed unless the
    /// assignment form matches. Only a bare identifier can be assigned to.
    fn parse_assignment(&mut self) -> Result<Expr, ParseError> {
        if self.check(TokenKind::Identifier) && self.peek_ahead(1).kind == TokenKind::Assign {
            let target = self.advance();
            self.advance(); // consume '='
            let value = Box::new(self.parse_expression()?);
            return Ok(Expr::Assign { target, value });
        }

        self.parse_binary(0)
    }

    /// Parse the binary level `level` of [`BINARY_LEVELS`]
    fn parse_binary(&mut self, level: usize) -> Result<Expr, ParseError> {
        let Some(&(kind, op)) = BINARY_LEVELS.get(level) else {
            return self.parse_call();
        };

        let left = self.parse_binary(level + 1)?;

        if !self.match_token(kind) {
            return Ok(left);
        }

        let right = self.parse_binary(level)?;

        Ok(Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    /// Parse a value optionally followed by a call argument list
    fn parse_call(&mut self) -> Result<Expr, ParseError> {
        let target = self.parse_primary()?;

        if !self.match_token(TokenKind::LParen) {
            return Ok(target);
        }

        let args = self.parse_comma_list(Self::parse_expression)?;

        Ok(Expr::FuncCall {
            target: Box::new(target),
            args,
        })
    }

    /// Parse primary (literals, variables, parenthesized expressions)
    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let token = self.advance();

        match token.kind {
            TokenKind::Int => Ok(Expr::Int { token }),
            TokenKind::Identifier => Ok(Expr::Var { token }),
            TokenKind::LParen => {
                let expr = self.parse_expression()?;
                if !self.match_token(TokenKind::RParen) {
                    return Err(ParseError::UnclosedParenthesis {
                        location: token.location,
                    });
                }
                Ok(expr)
            }
            _ => Err(ParseError::UnexpectedToken { token }),
        }
    }
}
