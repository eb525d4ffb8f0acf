//! Runtime data model
//!
//! The pieces the evaluator operates on:
//! - [`value`]: the tagged [`value::Value`] union and suffix type codes
//! - [`slot`]: storage cells (owned cells and aliases)
//! - [`scope`]: the scope chain, declaration placement rules and dotted-path
//!   resolution
//! - [`function`]: function values, overload keys and receiver stamping
//!
//! Object members and scope frames share one representation
//! ([`value::MemberMap`]) so that path resolution can walk from a variable
//! into object members without a case split.

pub mod function;
pub mod scope;
pub mod slot;
pub mod value;

pub use function::{FunctionRef, FunctionValue};
pub use scope::{Handle, Scope, ScopeRef};
pub use slot::Slot;
pub use value::{MemberMap, TypeCode, Value};
