//! Dispatch tables resolving a scope name to the function that applies it.
//!
//! Both tables are filled once, at configuration time. Nothing is looked up by
//! reflection: a scope either has an entry or it does not.

use crate::error::Result;
use fxhash::FxHashMap;
use scopie_domain::{Param, Params};
use std::fmt;
use std::sync::Arc;

/// What applying one scope produced.
///
/// `Replace` hands the next scope a new target. `Signal` reports a side effect
/// (success or failure) and keeps the previous target in play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeOutcome<T> {
    Replace(T),
    Signal(bool),
}

impl<T> ScopeOutcome<T> {
    /// Resolves the outcome against the target it was computed from.
    pub fn resolve(self, previous: T) -> T {
        match self {
            Self::Replace(next) => next,
            Self::Signal(_) => previous,
        }
    }

    #[must_use]
    pub const fn is_signal(&self) -> bool {
        matches!(self, Self::Signal(_))
    }
}

/// An operation exposed by a target: `(target, value) -> outcome`.
pub type TargetOp<T> = Arc<dyn Fn(&T, &Param) -> Result<ScopeOutcome<T>> + Send + Sync>;

/// An owner override: `(owner, target, value, params) -> outcome`.
pub type OverrideOp<O, T> =
    Arc<dyn Fn(&O, &T, &Param, &Params) -> Result<ScopeOutcome<T>> + Send + Sync>;

/// A type scopes can be applied to.
///
/// # Example
/// ```rust
/// use scopie_kernel::dispatch::{OperationTable, ScopeTarget};
///
/// #[derive(Debug, Clone, Default)]
/// struct Query(Vec<String>);
///
/// impl ScopeTarget for Query {
///     fn operations(ops: &mut OperationTable<Self>) {
///         ops.chain("featured", |q, value| {
///             let mut next = q.clone();
///             next.0.push(format!("featured = {value}"));
///             next
///         });
///     }
/// }
/// ```
pub trait ScopeTarget: Sized + 'static {
    /// Registers the named operations of this target.
    fn operations(ops: &mut OperationTable<Self>);
}

/// Scope name → target operation.
pub struct OperationTable<T> {
    ops: FxHashMap<String, TargetOp<T>>,
}

impl<T> OperationTable<T> {
    #[must_use]
    pub fn new() -> Self {
        Self { ops: FxHashMap::default() }
    }

    /// Registers an operation returning a full [`ScopeOutcome`].
    pub fn register<F>(&mut self, name: impl Into<String>, op: F) -> &mut Self
    where
        F: Fn(&T, &Param) -> Result<ScopeOutcome<T>> + Send + Sync + 'static,
    {
        self.ops.insert(name.into(), Arc::new(op));
        self
    }

    /// Registers an infallible operation that always produces the next target.
    pub fn chain<F>(&mut self, name: impl Into<String>, op: F) -> &mut Self
    where
        F: Fn(&T, &Param) -> T + Send + Sync + 'static,
    {
        self.register(name, move |target, value| Ok(ScopeOutcome::Replace(op(target, value))))
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TargetOp<T>> {
        self.ops.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.ops.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.ops.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ops.len()
    }
}

impl<T: ScopeTarget> OperationTable<T> {
    /// Builds the table declared by the target type.
    #[must_use]
    pub fn of_target() -> Self {
        let mut table = Self::new();
        T::operations(&mut table);
        table
    }
}

impl<T> Default for OperationTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for OperationTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.ops.keys()).finish()
    }
}

/// Scope name → owner override.
pub struct OverrideTable<O, T> {
    ops: FxHashMap<String, OverrideOp<O, T>>,
}

impl<O, T> OverrideTable<O, T> {
    #[must_use]
    pub fn new() -> Self {
        Self { ops: FxHashMap::default() }
    }

    /// Registers an override for the scope `name`.
    pub fn register<F>(&mut self, name: impl Into<String>, op: F) -> &mut Self
    where
        F: Fn(&O, &T, &Param, &Params) -> Result<ScopeOutcome<T>> + Send + Sync + 'static,
    {
        self.ops.insert(name.into(), Arc::new(op));
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&OverrideOp<O, T>> {
        self.ops.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.ops.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ops.len()
    }
}

impl<O, T> Default for OverrideTable<O, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O, T> fmt::Debug for OverrideTable<O, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.ops.keys()).finish()
    }
}
