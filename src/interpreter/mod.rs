//! The evaluation engine
//!
//! This module executes a parsed [`crate::parser::Program`]:
//! - [`engine`]: registries, the invocation protocol and return checking
//! - [`statements`]: statement execution and control flow
//! - [`expressions`]: expression evaluation, call dispatch and operators
//! - [`builtins`]: `print`, `inputi`, `inputs`
//! - [`type_system`]: suffix type checks and interface conformance
//! - [`errors`]: the three fatal error kinds (NAME / TYPE / FAULT)
//! - [`host`]: the I/O boundary
//!
//! # Implementation
//!
//! Evaluator methods are split across multiple files using `impl Interpreter`
//! blocks, keeping each concern in its own module while sharing the
//! interpreter state.

pub mod builtins;
pub mod engine;
pub mod errors;
pub mod expressions;
pub mod host;
pub mod statements;
pub mod type_system;

pub use engine::Interpreter;
pub use errors::{ErrorKind, RuntimeError};
pub use host::{Host, MockHost, StdHost};
