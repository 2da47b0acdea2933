use crate::dispatch::{OperationTable, OverrideTable, ScopeTarget};
use crate::error::Result;
use crate::registry::ScopeRegistry;
use crate::sequencer::{CurrentScopes, Sequencer};
use fxhash::FxHashMap;
use parking_lot::RwLock;
use scopie_domain::{Params, ScopeOptions};
use std::any::{Any, TypeId};
use std::fmt;
use std::marker::PhantomData;
use std::sync::{Arc, LazyLock};
use tracing::debug;

static GLOBAL: LazyLock<Catalog> = LazyLock::new(Catalog::new);

/// A type that owns a set of scope declarations.
///
/// `declare` runs once per type, the first time the catalog needs its registry.
/// `overrides` lets the owner intercept scopes instead of the target's operation
/// of the same name.
///
/// # Example
/// ```rust
/// use scopie_kernel::prelude::*;
///
/// #[derive(Debug, Clone, Default, PartialEq)]
/// struct Query(Vec<String>);
///
/// impl ScopeTarget for Query {
///     fn operations(ops: &mut OperationTable<Self>) {
///         ops.chain("by_degree", |q, v| {
///             let mut next = q.clone();
///             next.0.push(format!("order by degree {v}"));
///             next
///         });
///     }
/// }
///
/// struct GraduatesScopie;
///
/// impl Scopie for GraduatesScopie {
///     type Target = Query;
///
///     fn declare(scopes: &mut ScopeRegistry) {
///         scopes.declare(["by_degree"], ScopeOptions::builder().default_value("asc").build());
///     }
/// }
///
/// let query = GraduatesScopie.apply_scopes(Query::default(), &Params::new(), None).unwrap();
/// assert_eq!(query.0, ["order by degree asc"]);
/// ```
pub trait Scopie: Sized + Send + Sync + 'static {
    type Target: ScopeTarget;

    fn declare(scopes: &mut ScopeRegistry);

    fn overrides(_table: &mut OverrideTable<Self, Self::Target>) {}
}

/// The owner with nothing declared up front.
///
/// Applying it returns the target untouched unless scopes are added at runtime
/// with [`ScopieExt::has_scope`].
pub struct Base<T>(PhantomData<fn() -> T>);

impl<T> Base<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for Base<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Base<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Base<{}>", std::any::type_name::<T>())
    }
}

impl<T: ScopeTarget> Scopie for Base<T> {
    type Target = T;

    fn declare(_scopes: &mut ScopeRegistry) {}
}

#[derive(Clone)]
struct OwnerSlot {
    registry: Arc<ScopeRegistry>,
    overrides: Arc<dyn Any + Send + Sync>,
}

impl OwnerSlot {
    fn seed<O: Scopie>() -> Self {
        let mut registry = ScopeRegistry::new();
        O::declare(&mut registry);
        debug!(owner = std::any::type_name::<O>(), scopes = registry.len(), "Scopes declared");
        Self { registry: Arc::new(registry), overrides: Arc::new(build_overrides::<O>()) }
    }
}

fn build_overrides<O: Scopie>() -> OverrideTable<O, O::Target> {
    let mut table = OverrideTable::new();
    O::overrides(&mut table);
    table
}

/// Registries, override tables and operation tables, one per Rust type.
///
/// Tables are built lazily on first use and shared as `Arc` snapshots, so
/// resolution never holds a lock while scopes run. Declaring is copy-on-write:
/// a resolution already in flight keeps the snapshot it started with.
pub struct Catalog {
    owners: RwLock<FxHashMap<TypeId, OwnerSlot>>,
    targets: RwLock<FxHashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
}

impl Catalog {
    #[must_use]
    pub fn new() -> Self {
        Self { owners: RwLock::default(), targets: RwLock::default() }
    }

    /// The process-wide catalog used by [`ScopieExt`].
    #[must_use]
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    fn slot<O: Scopie>(&self) -> OwnerSlot {
        let id = TypeId::of::<O>();
        if let Some(slot) = self.owners.read().get(&id) {
            return slot.clone();
        }
        self.owners.write().entry(id).or_insert_with(OwnerSlot::seed::<O>).clone()
    }

    /// Current declarations of `O`, in declaration order.
    #[must_use]
    pub fn definitions_for<O: Scopie>(&self) -> Arc<ScopeRegistry> {
        self.slot::<O>().registry
    }

    /// Adds declarations to `O`, on top of what it already has.
    pub fn declare<O, I, S>(&self, names: I, options: ScopeOptions)
    where
        O: Scopie,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut owners = self.owners.write();
        let slot = owners.entry(TypeId::of::<O>()).or_insert_with(OwnerSlot::seed::<O>);
        Arc::make_mut(&mut slot.registry).declare(names, options);
    }

    /// Drops every declaration of `O`. It stays empty until declared again.
    pub fn reset<O: Scopie>(&self) {
        let mut owners = self.owners.write();
        let slot = owners.entry(TypeId::of::<O>()).or_insert_with(OwnerSlot::seed::<O>);
        slot.registry = Arc::new(ScopeRegistry::new());
        debug!(owner = std::any::type_name::<O>(), "Scopes reset");
    }

    #[must_use]
    pub fn overrides_for<O: Scopie>(&self) -> Arc<OverrideTable<O, O::Target>> {
        self.slot::<O>()
            .overrides
            .downcast::<OverrideTable<O, O::Target>>()
            .unwrap_or_else(|_| Arc::new(build_overrides::<O>()))
    }

    #[must_use]
    pub fn operations_for<T: ScopeTarget>(&self) -> Arc<OperationTable<T>> {
        let id = TypeId::of::<T>();
        let cached = self.targets.read().get(&id).cloned();
        let table = match cached {
            Some(table) => table,
            None => self
                .targets
                .write()
                .entry(id)
                .or_insert_with(|| Arc::new(OperationTable::<T>::of_target()))
                .clone(),
        };
        table.downcast::<OperationTable<T>>().unwrap_or_else(|_| Arc::new(OperationTable::of_target()))
    }

    /// Resolves the current scopes of `O` for `params` under `action`.
    ///
    /// # Errors
    /// Propagates coercion errors of applicable scopes.
    pub fn current_scopes<O: Scopie>(
        &self,
        params: &Params,
        action: Option<&str>,
    ) -> Result<CurrentScopes> {
        crate::sequencer::current_scopes(&self.definitions_for::<O>(), params, action)
    }

    /// Applies the scopes of `owner` to `target`.
    ///
    /// # Errors
    /// Propagates coercion errors and [`crate::ScopeError::MissingOperation`].
    pub fn apply_scopes<O: Scopie>(
        &self,
        owner: &O,
        target: O::Target,
        params: &Params,
        action: Option<&str>,
    ) -> Result<O::Target> {
        let registry = self.definitions_for::<O>();
        let overrides = self.overrides_for::<O>();
        let operations = self.operations_for::<O::Target>();
        Sequencer::new(&registry, &operations)
            .with_owner(owner, &overrides)
            .apply_scopes(target, params, action)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Catalog")
            .field("owners", &self.owners.read().len())
            .field("targets", &self.targets.read().len())
            .finish()
    }
}

/// Scope entry points on owner instances, backed by [`Catalog::global`].
pub trait ScopieExt: Scopie {
    /// Applies this owner's scopes to `target`.
    ///
    /// # Errors
    /// Propagates coercion errors and [`crate::ScopeError::MissingOperation`].
    fn apply_scopes(
        &self,
        target: Self::Target,
        params: &Params,
        action: Option<&str>,
    ) -> Result<Self::Target> {
        Catalog::global().apply_scopes(self, target, params, action)
    }

    /// The scopes that would be applied, with their coerced values.
    ///
    /// # Errors
    /// Propagates coercion errors of applicable scopes.
    fn current_scopes(&self, params: &Params, action: Option<&str>) -> Result<CurrentScopes> {
        Catalog::global().current_scopes::<Self>(params, action)
    }

    /// Declares more scopes on this owner type at runtime.
    fn has_scope<I, S>(names: I, options: ScopeOptions)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Catalog::global().declare::<Self, I, S>(names, options);
    }

    #[must_use]
    fn scopes_configuration() -> Arc<ScopeRegistry> {
        Catalog::global().definitions_for::<Self>()
    }

    fn reset_scopes() {
        Catalog::global().reset::<Self>();
    }
}

impl<O: Scopie> ScopieExt for O {}
