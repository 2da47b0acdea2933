use crate::coerce::coerce;
use crate::error::Result;
use scopie_domain::{Param, Params, ScopeDefinition};

static NULL: Param = Param::Null;

/// The value a single scope resolves to for one params mapping.
///
/// Built per resolution call and discarded afterwards. Coercion is deferred to
/// [`ScopeValue::coerced`], so an invalid `type` never fires for a scope that is
/// filtered out first.
#[derive(Debug, Clone, Copy)]
pub struct ScopeValue<'a> {
    params: Option<&'a Params>,
    definition: &'a ScopeDefinition,
}

impl<'a> ScopeValue<'a> {
    /// Resolves `definition` against `params`.
    ///
    /// With a namespace (`in`), lookup happens in the nested map under that key.
    /// A missing or non-map namespace entry behaves as an empty mapping.
    #[must_use]
    pub fn resolve(params: &'a Params, definition: &'a ScopeDefinition) -> Self {
        let params = match definition.namespace() {
            Some(namespace) => params.nested(namespace),
            None => Some(params),
        };
        Self { params, definition }
    }

    #[must_use]
    pub const fn definition(&self) -> &'a ScopeDefinition {
        self.definition
    }

    /// `true` if the key is in the effective mapping.
    #[must_use]
    pub fn is_passed(&self) -> bool {
        self.params.is_some_and(|p| p.contains_key(self.definition.key()))
    }

    /// `true` if the key was passed or a default was declared, whatever its value.
    #[must_use]
    pub fn is_given(&self) -> bool {
        self.is_passed() || self.definition.has_default()
    }

    /// The looked-up value, else the declared default, else `Null`.
    #[must_use]
    pub fn raw(&self) -> &'a Param {
        self.params
            .and_then(|p| p.get(self.definition.key()))
            .or_else(|| self.definition.default_value())
            .unwrap_or(&NULL)
    }

    #[must_use]
    pub fn is_present(&self) -> bool {
        self.raw().is_present()
    }

    /// The raw value passed through the declared coercion.
    ///
    /// # Errors
    /// Propagates coercion errors: unknown `type` tags and unparseable values.
    pub fn coerced(&self) -> Result<Param> {
        coerce(self.raw(), self.definition.type_tag())
    }
}
