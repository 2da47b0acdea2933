//! # Domain Models
//!
//! Pure data types for scope declarations and the params they are resolved against.
//! Keep it lean: no I/O and no resolution logic, just data and simple helpers.
//! The engine lives in `scopie-kernel`.

pub mod param;
pub mod scope;

pub use param::{Param, Params};
pub use scope::{ActionSet, ScopeDefinition, ScopeOptions, ScopeType, TypeTag};
