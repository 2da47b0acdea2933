//! Facade crate for scopie.
//! Re-exports the domain types and the engine, and adds the free-function entry points a
//! request handler calls. Keep this crate thin: it composes the kernel, it does not
//! implement resolution logic.
//!
//! ## Usage
//! ```rust
//! use scopie::prelude::*;
//!
//! #[derive(Debug, Clone, Default)]
//! struct Query(Vec<String>);
//!
//! impl ScopeTarget for Query {
//!     fn operations(ops: &mut OperationTable<Self>) {
//!         ops.chain("featured", |q, v| {
//!             let mut next = q.clone();
//!             next.0.push(format!("featured = {v}"));
//!             next
//!         });
//!     }
//! }
//!
//! struct Catalogue;
//!
//! impl Scopie for Catalogue {
//!     type Target = Query;
//!
//!     fn declare(scopes: &mut ScopeRegistry) {
//!         scopes.declare(["featured"], ScopeOptions::builder().type_tag(ScopeType::Boolean).build());
//!     }
//! }
//!
//! let params = Params::new().with("featured", "1");
//! let query = scopie::apply_scopes(Query::default(), &params, Some("index"), &Catalogue).unwrap();
//! assert_eq!(query.0, ["featured = true"]);
//! ```

use std::sync::Arc;

pub use scopie_domain as domain;
pub use scopie_kernel as kernel;
pub use scopie_kernel::config::{ScopeManifest, load_manifest};
pub use scopie_kernel::{Base, Catalog, Result, ScopeError, ScopeErrorExt, Scopie, ScopieExt};

use scopie_domain::{Params, ScopeOptions};
use scopie_kernel::dispatch::ScopeTarget;
use scopie_kernel::registry::ScopeRegistry;
use scopie_kernel::sequencer::CurrentScopes;

pub mod prelude {
    pub use crate::{apply_scopes, current_scopes};
    pub use scopie_kernel::prelude::*;
}

/// Applies the scopes `owner` declares to `target`.
///
/// # Errors
/// Fails on the first scope that cannot be coerced or has no operation. Scopes
/// applied before the failing one are not rolled back.
pub fn apply_scopes<O: Scopie>(
    target: O::Target,
    params: &Params,
    action: Option<&str>,
    owner: &O,
) -> Result<O::Target> {
    Catalog::global().apply_scopes(owner, target, params, action)
}

/// The scopes [`apply_scopes`] would apply, with their coerced values, in order.
///
/// # Errors
/// Propagates coercion errors of applicable scopes.
pub fn current_scopes<O: Scopie>(
    params: &Params,
    action: Option<&str>,
    _owner: &O,
) -> Result<CurrentScopes> {
    Catalog::global().current_scopes::<O>(params, action)
}

/// [`apply_scopes`] with the default owner of `T`, which declares nothing up front.
///
/// # Errors
/// See [`apply_scopes`].
pub fn apply_scopes_with_base<T: ScopeTarget>(
    target: T,
    params: &Params,
    action: Option<&str>,
) -> Result<T> {
    apply_scopes(target, params, action, &Base::<T>::new())
}

/// # Errors
/// See [`current_scopes`].
pub fn current_scopes_with_base<T: ScopeTarget>(
    params: &Params,
    action: Option<&str>,
) -> Result<CurrentScopes> {
    current_scopes(params, action, &Base::<T>::new())
}

/// Declares scopes on `O` at runtime.
pub fn declare<O, I, S>(names: I, options: ScopeOptions)
where
    O: Scopie,
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Catalog::global().declare::<O, I, S>(names, options);
}

#[must_use]
pub fn definitions_for<O: Scopie>() -> Arc<ScopeRegistry> {
    Catalog::global().definitions_for::<O>()
}

/// Clears every declaration of `O`. Intended for test setup.
pub fn reset<O: Scopie>() {
    Catalog::global().reset::<O>();
}
