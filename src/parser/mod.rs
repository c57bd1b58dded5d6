//! eud source code parser
//!
//! This module transforms eud source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parsing (tokens → AST)
//! - [`ast`]: AST node definitions
//!
//! # Language
//!
//! - Types: fixed-width integer keywords (`u8` … `i64`), `char`, `usize`, `uptr`
//! - Statements: `func` definitions, `let` declarations, `return`, `if`/`else`,
//!   `while`, expression statements
//! - Expressions: arithmetic, comparison, assignment to identifiers, calls
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with one recursion step per precedence
//! level. No external parser generator dependencies. The first lexical or
//! syntax error aborts parsing; there is no recovery.

pub mod ast;
mod declarations;
mod expressions;
pub mod lexer;
pub mod parse;
mod statements;

pub use ast::{BinOp, Expr, Program, SourceLocation, Stmt, TypeNode, TypedDecl};
pub use lexer::{tokenize, LexError, Lexer, Token, TokenKind};
pub use parse::{parse, parse_source, ParseError, Parser};
