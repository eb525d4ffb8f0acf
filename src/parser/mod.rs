//! Tailscript source code parser
//!
//! This module transforms source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parsing (tokens → AST)
//! - [`ast`]: AST node definitions
//!
//! # Surface syntax
//!
//! - Declarations: `interface A { ... }`, `def foof(xi, &yo) { ... }`
//! - Statements: `var` / `local` declarations, assignments, bare calls,
//!   `if`/`else`, `while`, `return`
//! - Expressions: literals, `@` (empty object), dotted paths, calls,
//!   `lambda<suffix>(...) { ... }`, arithmetic/comparison/logical operators,
//!   and the `int`/`str`/`bool` conversions
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with precedence climbing for binary
//! operators. No external parser generator dependencies.

pub mod ast;
pub mod declarations;
pub mod expressions;
pub mod lexer;
pub mod parse;
pub mod statements;

pub use ast::Program;
pub use parse::{ParseError, Parser};

/// Parse a complete program from source text.
///
/// This is the narrow boundary the interpreter consumes: the evaluator never
/// sees source text, only the resulting [`Program`].
pub fn parse(source: &str) -> Result<Program, ParseError> {
    Parser::new(source)?.parse_program()
}
