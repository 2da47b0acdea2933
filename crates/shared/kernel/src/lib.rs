//! Scope resolution engine.
//! Decides which declared scopes apply to a set of params and folds them onto a target in
//! declaration order. Keep it synchronous and free of I/O, except for manifest loading.
//!
//! ## Declaring and applying
//! ```rust
//! use scopie_kernel::prelude::*;
//!
//! #[derive(Debug, Clone, Default)]
//! struct Query(Vec<String>);
//!
//! impl ScopeTarget for Query {
//!     fn operations(ops: &mut OperationTable<Self>) {
//!         ops.chain("page", |q, v| {
//!             let mut next = q.clone();
//!             next.0.push(format!("page {v}"));
//!             next
//!         });
//!     }
//! }
//!
//! let mut registry = ScopeRegistry::new();
//! registry.declare(["page"], ScopeOptions::builder().type_tag(ScopeType::Integer).build());
//! let operations = OperationTable::<Query>::of_target();
//!
//! let params = Params::new().with("page", "2");
//! let query = Sequencer::new(&registry, &operations)
//!     .apply_scopes(Query::default(), &params, Some("index"))
//!     .unwrap();
//! assert_eq!(query.0, ["page 2"]);
//! ```
//!
//! ## Manifests
//! ```rust,ignore
//! let registry = scopie_kernel::config::load_manifest("scopes.toml")?.into_registry();
//! ```
pub mod catalog;
pub mod coerce;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod filter;
pub mod registry;
pub mod sequencer;
pub mod value;

pub use catalog::{Base, Catalog, Scopie, ScopieExt};
pub use error::{Result, ScopeError, ScopeErrorExt};
pub use scopie_domain as domain;

pub mod prelude {
    pub use crate::catalog::{Base, Catalog, Scopie, ScopieExt};
    pub use crate::dispatch::{OperationTable, OverrideTable, ScopeOutcome, ScopeTarget};
    pub use crate::error::{ScopeError, ScopeErrorExt};
    pub use crate::registry::ScopeRegistry;
    pub use crate::sequencer::{CurrentScopes, Sequencer};
    pub use crate::value::ScopeValue;
    pub use scopie_domain::{Param, Params, ScopeDefinition, ScopeOptions, ScopeType};
}
