//! Folds the applicable scopes of a registry onto a target, in declaration order.

use crate::dispatch::{OperationTable, OverrideTable};
use crate::error::{Result, ScopeError, ScopeErrorExt};
use crate::filter::is_applicable;
use crate::registry::ScopeRegistry;
use crate::value::ScopeValue;
use scopie_domain::{Param, Params};
use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::{debug, trace};

/// Applicable scopes and their coerced values, in declaration order.
///
/// Serializes as a map that keeps that order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurrentScopes(Vec<(String, Param)>);

impl CurrentScopes {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Param> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Param)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl IntoIterator for CurrentScopes {
    type Item = (String, Param);
    type IntoIter = std::vec::IntoIter<(String, Param)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<K: Into<String>, V: Into<Param>> FromIterator<(K, V)> for CurrentScopes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl Serialize for CurrentScopes {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Resolves which scopes of `registry` apply to `params` under `action`.
///
/// Inapplicable scopes are omitted. Side-effect free.
///
/// # Errors
/// Propagates coercion errors of applicable scopes.
pub fn current_scopes(
    registry: &ScopeRegistry,
    params: &Params,
    action: Option<&str>,
) -> Result<CurrentScopes> {
    let mut scopes = Vec::new();
    for definition in registry {
        let value = ScopeValue::resolve(params, definition);
        if !is_applicable(&value, action) {
            trace!(scope = definition.name(), action, "Scope skipped");
            continue;
        }
        let coerced = value
            .coerced()
            .map_err(|e| e.for_scope(definition.name()))
            .context(format!("coercing scope '{}'", definition.name()))?;
        scopes.push((definition.name().to_owned(), coerced));
    }
    Ok(CurrentScopes(scopes))
}

/// Applies a registry to targets of type `T`, with overrides from an owner of type `O`.
///
/// A failure aborts the fold. Earlier steps are not rolled back; the caller only
/// ever sees the error.
#[derive(Debug)]
pub struct Sequencer<'a, O, T> {
    registry: &'a ScopeRegistry,
    operations: &'a OperationTable<T>,
    owner: Option<(&'a O, &'a OverrideTable<O, T>)>,
}

impl<'a, T> Sequencer<'a, (), T> {
    /// A sequencer dispatching straight to the target's operations.
    #[must_use]
    pub const fn new(registry: &'a ScopeRegistry, operations: &'a OperationTable<T>) -> Self {
        Self { registry, operations, owner: None }
    }

    /// Lets `owner` intercept the scopes it has overrides for.
    #[must_use]
    pub const fn with_owner<O>(
        self,
        owner: &'a O,
        overrides: &'a OverrideTable<O, T>,
    ) -> Sequencer<'a, O, T> {
        Sequencer { registry: self.registry, operations: self.operations, owner: Some((owner, overrides)) }
    }
}

impl<O, T> Sequencer<'_, O, T> {
    /// See [`current_scopes`].
    ///
    /// # Errors
    /// Propagates coercion errors of applicable scopes.
    pub fn current_scopes(&self, params: &Params, action: Option<&str>) -> Result<CurrentScopes> {
        current_scopes(self.registry, params, action)
    }

    /// Folds every applicable scope onto `target` and returns the final target.
    ///
    /// # Errors
    /// Returns the first coercion or [`ScopeError::MissingOperation`] error met.
    pub fn apply_scopes(&self, target: T, params: &Params, action: Option<&str>) -> Result<T> {
        self.current_scopes(params, action)?
            .into_iter()
            .try_fold(target, |target, (name, value)| self.apply_one(&name, target, &value, params))
    }

    /// Applies a single scope: the owner override if one is registered, else the
    /// target operation of the same name.
    ///
    /// # Errors
    /// Returns [`ScopeError::MissingOperation`] if neither exists, and propagates
    /// errors raised by the operation itself.
    pub fn apply_one(&self, name: &str, target: T, value: &Param, params: &Params) -> Result<T> {
        let override_op = self.owner.and_then(|(owner, table)| Some((owner, table.get(name)?)));

        let outcome = if let Some((owner, op)) = override_op {
            debug!(scope = name, "Applying scope through owner override");
            op(owner, &target, value, params)?
        } else if let Some(op) = self.operations.get(name) {
            debug!(scope = name, "Applying scope through target operation");
            op(&target, value)?
        } else {
            return Err(ScopeError::MissingOperation { scope: name.to_owned().into(), context: None });
        };

        if outcome.is_signal() {
            trace!(scope = name, "Scope signalled, keeping previous target");
        }
        Ok(outcome.resolve(target))
    }
}
