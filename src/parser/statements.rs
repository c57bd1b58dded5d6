//! Statement parsing implementation
//!
//! This module handles statement dispatch and the control-flow statements:
//!
//! - Control flow: `if`, `if`/`else`, `while`
//! - Jump statements: `return`
//! - Blocks: `{ ... }`
//! - Expression statements: assignments, calls, bare expressions
//!
//! Function definitions and `let` live in `declarations`.
//!
//! # Grammar
//!
//! ```text
//! statements ::= statement*            (up to '}' or end of input)
//! statement  ::= func_def | return_stmt | let_stmt | while_stmt | if_stmt | expr
//! return_stmt ::= "return" expr
//! while_stmt ::= "while" "(" expr ")" block
//! if_stmt    ::= "if" "(" expr ")" block ( "else" block )?
//! block      ::= "{" statements "}"
//! ```
//!
//! Statements have no terminator; one ends where its last expression ends.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};
use tracing::trace;

impl Parser {
    /// Parse statements until a closing brace or end of input
    pub(crate) fn parse_statements(&mut self) -> Result<Vec<Stmt>, ParseError> {
        let mut statements = Vec::new();

        while !self.is_at_end() && !self.check(TokenKind::RBrace) {
            statements.push(self.parse_statement()?);
        }

        Ok(statements)
    }

    /// Parse a statement
    pub(crate) fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        let token = self.peek();
        trace!(token = %token, location = %token.location, "statement");

        if token.kind == TokenKind::Keyword {
            match token.text.as_str() {
                "func" => return self.parse_function_definition(),
                "return" => return self.parse_return_statement(),
                "let" => return self.parse_let_statement(),
                "while" => return self.parse_while_statement(),
                "if" => return self.parse_if_statement(),
                _ => {}
            }
        }

        Ok(Stmt::Expr(self.parse_expression()?))
    }

    /// Parse `{ statements }`
    pub(crate) fn parse_block(&mut self) -> Result<Vec<Stmt>, ParseError> {
        self.expect_lbrace()?;
        let statements = self.parse_statements()?;
        self.expect_rbrace()?;
        Ok(statements)
    }

    /// Parse `( expr )`
    fn parse_condition(&mut self) -> Result<Expr, ParseError> {
        self.expect_lparen()?;
        let condition = self.parse_expression()?;
        self.expect_rparen()?;
        Ok(condition)
    }

    /// Parse return statement
    fn parse_return_statement(&mut self) -> Result<Stmt, ParseError> {
        let location = self.advance().location;
        let value = self.parse_expression()?;

        Ok(Stmt::Return { value, location })
    }

    /// Parse while statement
    fn parse_while_statement(&mut self) -> Result<Stmt, ParseError> {
        let location = self.advance().location;
        let condition = self.parse_condition()?;
        let body = self.parse_block()?;

        Ok(Stmt::While {
            condition,
            body,
            location,
        })
    }

    /// Parse if statement, with an optional else block
    fn parse_if_statement(&mut self) -> Result<Stmt, ParseError> {
        let location = self.advance().location;
        let condition = self.parse_condition()?;
        let body = self.parse_block()?;

        if !self.peek().is_keyword("else") {
            return Ok(Stmt::If {
                condition,
                body,
                location,
            });
        }

        self.advance(); // consume 'else'
        let falsy = self.parse_block()?;

        Ok(Stmt::IfElse {
            condition,
            truthy: body,
            falsy,
            location,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::parse::{parse_source, ParseError};

    fn statements(source: &str) -> Vec<Stmt> {
        parse_source(source, "test.eud").unwrap().statements
    }

    #[test]
    fn test_if_without_else() {
        let stmts = statements("if (x < 10) { x = x + 1 }");

        assert_eq!(stmts.len(), 1);
        assert_eq!(
            stmts[0].to_string(),
            "If(LessThan(Var(x), Int(10)), [Assign(x, Add(Var(x), Int(1)))])"
        );
    }

    #[test]
    fn test_if_else() {
        let stmts = statements("if (a == b) { return 1 } else { return 2 }");

        match &stmts[0] {
            Stmt::IfElse {
                condition,
                truthy,
                falsy,
                location,
            } => {
                assert_eq!(condition.to_string(), "Equal(Var(a), Var(b))");
                assert_eq!(truthy.len(), 1);
                assert_eq!(falsy.len(), 1);
                assert_eq!((location.row, location.col), (1, 1));
            }
            other => panic!("Expected if-else, got {other}"),
        }
    }

    #[test]
    fn test_while_with_empty_body() {
        let stmts = statements("while (1) { }");
        assert_eq!(stmts[0].to_string(), "While(Int(1), [])");
    }

    #[test]
    fn test_nested_blocks() {
        let stmts = statements("while (i) { if (j) { k } else { } i = 0 }");
        assert_eq!(
            stmts[0].to_string(),
            "While(Var(i), [IfElse(Var(j), [Var(k)], []), Assign(i, Int(0))])"
        );
    }

    #[test]
    fn test_statements_need_no_separator() {
        let stmts = statements("x = 1 y = 2\nf(x, y)");

        assert_eq!(stmts.len(), 3);
        assert_eq!(stmts[2].to_string(), "FuncCall(Var(f), [Var(x), Var(y)])");
        assert_eq!(stmts[2].location().row, 2);
    }

    #[test]
    fn test_while_requires_parenthesis() {
        let err = parse_source("while x { }", "test.eud").unwrap_err();

        match err {
            ParseError::Expected { expected, found } => {
                assert_eq!(expected, "'('");
                assert_eq!(found.text, "x");
            }
            other => panic!("Expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_unterminated_block() {
        let err = parse_source("if (x) { y", "test.eud").unwrap_err();

        assert_eq!(err.to_string(), "expected '}', got [EOF]");
        assert_eq!(err.location().unwrap().col, 11);
    }

    #[test]
    fn test_else_requires_block() {
        let err = parse_source("if (x) { } else if (y) { }", "test.eud").unwrap_err();
        assert!(matches!(err, ParseError::Expected { ref expected, .. } if expected == "'{'"));
    }

    #[test]
    fn test_bare_return_is_rejected() {
        let err = parse_source("func f(): i32 { return }", "test.eud").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { ref token } if token.text == "}"));
    }
}
