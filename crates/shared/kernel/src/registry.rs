use scopie_domain::{ScopeDefinition, ScopeOptions};
use tracing::trace;

/// Ordered scope declarations of one owner.
///
/// Declaration order is application order. Re-declaring a name replaces its
/// definition but keeps the position it was first declared at.
///
/// # Example
/// ```rust
/// use scopie_kernel::registry::ScopeRegistry;
/// use scopie_kernel::domain::{ScopeOptions, ScopeType};
///
/// let mut registry = ScopeRegistry::new();
/// registry.declare(["featured"], ScopeOptions::builder().type_tag(ScopeType::Boolean).build());
/// registry.declare(["by_degree"], ScopeOptions::builder().default_value("asc").build());
///
/// let names: Vec<_> = registry.iter().map(|d| d.name()).collect();
/// assert_eq!(names, ["featured", "by_degree"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScopeRegistry {
    definitions: Vec<ScopeDefinition>,
}

impl ScopeRegistry {
    #[must_use]
    pub const fn new() -> Self {
        Self { definitions: Vec::new() }
    }

    /// Declares every name in `names` with the same options.
    pub fn declare<I, S>(&mut self, names: I, options: ScopeOptions)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self.insert(ScopeDefinition::new(name, options.clone()));
        }
    }

    /// Stores a single definition, overwriting an existing one in place.
    pub fn insert(&mut self, definition: ScopeDefinition) {
        if let Some(slot) = self.definitions.iter_mut().find(|d| d.name() == definition.name()) {
            trace!(scope = definition.name(), "Scope re-declared");
            *slot = definition;
        } else {
            trace!(scope = definition.name(), "Scope declared");
            self.definitions.push(definition);
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ScopeDefinition> {
        self.definitions.iter().find(|d| d.name() == name)
    }

    #[must_use]
    pub fn definitions(&self) -> &[ScopeDefinition] {
        &self.definitions
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScopeDefinition> {
        self.definitions.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Drops every declaration. Meant for test isolation.
    pub fn reset(&mut self) {
        self.definitions.clear();
    }
}

impl<'a> IntoIterator for &'a ScopeRegistry {
    type Item = &'a ScopeDefinition;
    type IntoIter = std::slice::Iter<'a, ScopeDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<ScopeDefinition> for ScopeRegistry {
    fn from_iter<I: IntoIterator<Item = ScopeDefinition>>(iter: I) -> Self {
        let mut registry = Self::new();
        iter.into_iter().for_each(|d| registry.insert(d));
        registry
    }
}
