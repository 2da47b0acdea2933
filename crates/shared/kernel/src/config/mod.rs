use crate::error::{Result, ScopeErrorExt};
use crate::registry::ScopeRegistry;
use config::{Config, Environment, File};
use scopie_domain::{ActionSet, Param, ScopeOptions, TypeTag};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

pub use config::FileFormat;

/// Scope declarations read from a file, in file order.
///
/// ```toml
/// [[scopes]]
/// names = ["featured"]
/// type = "boolean"
///
/// [[scopes]]
/// names = ["by_degree"]
/// default = "asc"
/// only = ["index"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScopeManifest {
    pub scopes: Vec<ScopeEntry>,
}

/// One `declare` call: a list of names sharing the same options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScopeEntry {
    pub names: Vec<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_tag: Option<TypeTag>,
    #[serde(skip_serializing_if = "ActionSet::is_empty")]
    pub only: ActionSet,
    #[serde(skip_serializing_if = "ActionSet::is_empty")]
    pub except: ActionSet,
    #[serde(
        rename = "default",
        deserialize_with = "scopie_domain::scope::declared",
        skip_serializing_if = "Option::is_none"
    )]
    pub default_value: Option<Param>,
    #[serde(rename = "as", skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(rename = "in", skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    pub allow_blank: bool,
}

impl ScopeEntry {
    #[must_use]
    pub fn options(&self) -> ScopeOptions {
        ScopeOptions {
            type_tag: self.type_tag.clone(),
            only: self.only.clone(),
            except: self.except.clone(),
            default_value: self.default_value.clone(),
            alias: self.alias.clone(),
            namespace: self.namespace.clone(),
            allow_blank: self.allow_blank,
        }
    }
}

impl ScopeManifest {
    /// Declares every entry on a fresh registry.
    #[must_use]
    pub fn into_registry(self) -> ScopeRegistry {
        let mut registry = ScopeRegistry::new();
        self.declare_on(&mut registry);
        registry
    }

    /// Declares every entry on `registry`, on top of what it already holds.
    pub fn declare_on(self, registry: &mut ScopeRegistry) {
        for entry in self.scopes {
            let options = entry.options();
            registry.declare(entry.names, options);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scopes.iter().map(|entry| entry.names.len()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Loads a scope manifest from `path`, layering environment overrides on top.
///
/// The format follows the file extension (`toml`, `json`, `yaml`). Variables
/// prefixed with `SCOPIE__` override file values, with `__` separating nested
/// keys.
///
/// # Errors
/// Returns [`crate::ScopeError::Config`] if the file is missing or does not
/// describe a manifest.
///
/// # Example
/// ```rust,no_run
/// use scopie_kernel::config::load_manifest;
///
/// let registry = load_manifest("scopes.toml").unwrap().into_registry();
/// ```
pub fn load_manifest(path: impl AsRef<Path>) -> Result<ScopeManifest> {
    let path = path.as_ref();
    info!("Loading scope manifest from {}", path.display());

    let manifest = Config::builder()
        .add_source(File::from(path).required(true))
        .add_source(Environment::with_prefix("SCOPIE").prefix_separator("__").separator("__"))
        .build()
        .context("Failed to build manifest")?
        .try_deserialize::<ScopeManifest>()
        .context("Failed to deserialize manifest")?;

    info!(scopes = manifest.len(), "Scope manifest loaded");
    Ok(manifest)
}

/// Parses a manifest held in memory. No environment overrides apply.
///
/// # Errors
/// Returns [`crate::ScopeError::Config`] if `content` does not describe a manifest.
pub fn load_manifest_str(content: &str, format: FileFormat) -> Result<ScopeManifest> {
    Config::builder()
        .add_source(File::from_str(content, format))
        .build()
        .context("Failed to parse manifest")?
        .try_deserialize::<ScopeManifest>()
        .context("Failed to deserialize manifest")
}
