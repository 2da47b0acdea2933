//! Scope declarations: the options a scope is declared with and the normalized definition
//! stored in a registry.

use crate::param::Param;
use serde::de::{self, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Cow;
use std::fmt;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};
use typed_builder::TypedBuilder;

/// Coercion types understood by the engine.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr, EnumIter, Serialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ScopeType {
    Boolean,
    Integer,
    Float,
    Date,
}

/// The `type` option exactly as declared.
///
/// Kept verbatim so an unknown tag is only reported when a scope actually reaches
/// coercion, never at declaration time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeTag(Cow<'static, str>);

impl TypeTag {
    pub fn new(tag: impl Into<Cow<'static, str>>) -> Self {
        Self(tag.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The known coercion type behind this tag, if any.
    #[must_use]
    pub fn scope_type(&self) -> Option<ScopeType> {
        self.0.parse().ok()
    }
}

impl From<&'static str> for TypeTag {
    fn from(tag: &'static str) -> Self {
        Self(Cow::Borrowed(tag))
    }
}

impl From<String> for TypeTag {
    fn from(tag: String) -> Self {
        Self(Cow::Owned(tag))
    }
}

impl From<ScopeType> for TypeTag {
    fn from(kind: ScopeType) -> Self {
        Self(Cow::Owned(kind.to_string()))
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordered set of action names used by `only` / `except`.
///
/// Blank entries are dropped and duplicates collapse onto their first position.
/// An empty set means "no restriction".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct ActionSet(Vec<String>);

impl ActionSet {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    pub fn insert(&mut self, action: impl AsRef<str>) -> bool {
        let action = action.as_ref().trim();
        if action.is_empty() || self.contains(action) {
            return false;
        }
        self.0.push(action.to_owned());
        true
    }

    #[must_use]
    pub fn contains(&self, action: &str) -> bool {
        self.0.iter().any(|a| a == action)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for ActionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for action in iter {
            set.insert(action);
        }
        set
    }
}

impl From<&str> for ActionSet {
    fn from(action: &str) -> Self {
        std::iter::once(action).collect()
    }
}

impl From<String> for ActionSet {
    fn from(action: String) -> Self {
        std::iter::once(action).collect()
    }
}

impl<S: AsRef<str>, const N: usize> From<[S; N]> for ActionSet {
    fn from(actions: [S; N]) -> Self {
        actions.into_iter().collect()
    }
}

impl<S: AsRef<str>> From<Vec<S>> for ActionSet {
    fn from(actions: Vec<S>) -> Self {
        actions.into_iter().collect()
    }
}

impl<'de> Deserialize<'de> for ActionSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ActionSetVisitor;

        impl<'de> Visitor<'de> for ActionSetVisitor {
            type Value = ActionSet;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an action name or a list of action names")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<ActionSet, E> {
                Ok(ActionSet::from(value))
            }

            fn visit_unit<E: de::Error>(self) -> Result<ActionSet, E> {
                Ok(ActionSet::new())
            }

            fn visit_none<E: de::Error>(self) -> Result<ActionSet, E> {
                Ok(ActionSet::new())
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<ActionSet, A::Error> {
                let mut set = ActionSet::new();
                while let Some(action) = seq.next_element::<String>()? {
                    set.insert(action);
                }
                Ok(set)
            }
        }

        deserializer.deserialize_any(ActionSetVisitor)
    }
}

/// Options a scope is declared with.
///
/// Field names follow the declaration keys: `type`, `only`, `except`, `default`,
/// `as`, `in`, `allow_blank`.
///
/// # Example
/// ```rust
/// use scopie_domain::scope::{ScopeOptions, ScopeType};
///
/// let options = ScopeOptions::builder()
///     .type_tag(ScopeType::Integer)
///     .only(["index"])
///     .default_value(1)
///     .build();
/// assert!(options.default_value.is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TypedBuilder)]
#[serde(default, deny_unknown_fields)]
#[builder(field_defaults(default, setter(into)))]
pub struct ScopeOptions {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    #[builder(setter(strip_option))]
    pub type_tag: Option<TypeTag>,
    #[serde(skip_serializing_if = "ActionSet::is_empty")]
    pub only: ActionSet,
    #[serde(skip_serializing_if = "ActionSet::is_empty")]
    pub except: ActionSet,
    /// `Some(Param::Null)` is a declared null default, distinct from no default.
    #[serde(rename = "default", deserialize_with = "declared", skip_serializing_if = "Option::is_none")]
    #[builder(setter(strip_option))]
    pub default_value: Option<Param>,
    #[serde(rename = "as", skip_serializing_if = "Option::is_none")]
    #[builder(setter(strip_option))]
    pub alias: Option<String>,
    #[serde(rename = "in", skip_serializing_if = "Option::is_none")]
    #[builder(setter(strip_option))]
    pub namespace: Option<String>,
    pub allow_blank: bool,
}

/// Any value present under the key counts as declared, `null` included.
///
/// Use with `#[serde(default, deserialize_with = "...")]` on an `Option<Param>`.
///
/// # Errors
/// Fails when the value is not a valid [`Param`].
pub fn declared<'de, D>(deserializer: D) -> Result<Option<Param>, D::Error>
where
    D: Deserializer<'de>,
{
    Param::deserialize(deserializer).map(Some)
}

/// A named scope with its normalized options.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScopeDefinition {
    name: String,
    #[serde(flatten)]
    options: ScopeOptions,
}

impl ScopeDefinition {
    pub fn new(name: impl Into<String>, options: ScopeOptions) -> Self {
        Self { name: name.into(), options }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lookup key in the input mapping: the `as` alias, or the scope name.
    #[must_use]
    pub fn key(&self) -> &str {
        self.options.alias.as_deref().unwrap_or(&self.name)
    }

    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        self.options.namespace.as_deref()
    }

    #[must_use]
    pub const fn type_tag(&self) -> Option<&TypeTag> {
        self.options.type_tag.as_ref()
    }

    #[must_use]
    pub const fn default_value(&self) -> Option<&Param> {
        self.options.default_value.as_ref()
    }

    #[must_use]
    pub const fn has_default(&self) -> bool {
        self.options.default_value.is_some()
    }

    #[must_use]
    pub const fn only(&self) -> &ActionSet {
        &self.options.only
    }

    #[must_use]
    pub const fn except(&self) -> &ActionSet {
        &self.options.except
    }

    #[must_use]
    pub const fn allows_blank(&self) -> bool {
        self.options.allow_blank
    }

    #[must_use]
    pub const fn options(&self) -> &ScopeOptions {
        &self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_set_drops_blanks_and_duplicates() {
        let set = ActionSet::from(["index", "", "  ", "show", "index"]);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["index", "show"]);
    }

    #[test]
    fn key_defaults_to_name() {
        let plain = ScopeDefinition::new("q", ScopeOptions::default());
        assert_eq!(plain.key(), "q");

        let aliased = ScopeDefinition::new("q", ScopeOptions::builder().alias("query").build());
        assert_eq!(aliased.key(), "query");
        assert_eq!(aliased.name(), "q");
    }

    #[test]
    fn type_tag_resolves_known_types_only() {
        assert_eq!(TypeTag::from("integer").scope_type(), Some(ScopeType::Integer));
        assert_eq!(TypeTag::from(ScopeType::Date).as_str(), "date");
        assert_eq!(TypeTag::from("unknown").scope_type(), None);
    }
}
