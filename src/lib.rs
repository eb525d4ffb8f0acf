//! # Introduction
//!
//! Tailscript parses and executes a small dynamically-checked scripting
//! language whose types live in the last character of each identifier: a name
//! ending in `i` is an integer, `s` a text string, `b` a boolean, `o` an
//! object, `f` a function, and a single uppercase letter names a structural
//! interface.
//!
//! ## Execution pipeline
//!
//! ```text
//! Source → Lexer → Parser → AST → Interpreter → Host output
//! ```
//!
//! 1. [`parser`] — tokenises the source and builds an AST.
//! 2. [`runtime`] — the data model: tagged [`runtime::value::Value`] variants
//!    held in [`runtime::slot::Slot`] storage cells, chained
//!    [`runtime::scope::Scope`] frames, and [`runtime::function::FunctionValue`]
//!    callables with overload keys and closure frames.
//! 3. [`interpreter`] — walks the AST, resolving names through the scope
//!    chain, dispatching overloads by erased argument signature, and checking
//!    every write against its suffix type.
//!
//! ## Supported language
//!
//! Values: integers, text, booleans, `nil`, objects (`@`), functions.
//! Declarations: `var` (visible one scope out), `local` (block-scoped),
//! `def` functions, `interface` contracts, `lambda` closures.
//! Control flow: `if/else`, `while`, `return`.
//! Built-ins: `print`, `inputi`, `inputs`, and the `int`/`str`/`bool`
//! conversions.

pub mod interpreter;
pub mod parser;
pub mod runtime;
