//! # Introduction
//!
//! eudc is the front end of the eud compiler: it reads the source text of a
//! single file and produces an abstract syntax tree for the later stages
//! (type checking and code generation, which live elsewhere).
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Tokens → Parser → AST → JSON / tree dump
//! ```
//!
//! 1. [`parser::lexer`]: turns source text into [`parser::Token`]s, each
//!    tagged with the [`parser::SourceLocation`] of its first character.
//! 2. [`parser::parse`]: recursive descent over the tokens, producing a
//!    [`parser::Program`] of [`parser::Stmt`]s.
//! 3. [`dump`]: renders a program as the JSON document consumed by the
//!    downstream stages, or as a compact tree for humans.
//!
//! The first lexical or syntax error ends the run. Errors are returned as
//! values; only the `eudc` binary prints them and sets the exit status.
//!
//! ```
//! let program = eudc::parser::parse_source("let x: i32 = 1 + 2", "demo.eud").unwrap();
//! assert_eq!(program.statements[0].to_string(), "VarInit(x, Type(i32), Add(Int(1), Int(2)))");
//! ```

pub mod dump;
pub mod parser;
