//! Decides whether a resolved scope fires for the current action.

use crate::value::ScopeValue;
use scopie_domain::ScopeDefinition;

/// Action-level check: `except` always wins, a non-empty `only` must contain the action.
///
/// Without an action there is nothing to restrict on.
#[must_use]
pub fn action_allowed(definition: &ScopeDefinition, action: Option<&str>) -> bool {
    let Some(action) = action else {
        return true;
    };
    if definition.except().contains(action) {
        return false;
    }
    definition.only().is_empty() || definition.only().contains(action)
}

/// Full applicability check, short-circuiting in this order:
/// action lists, then "given", then presence or `allow_blank`.
#[must_use]
pub fn is_applicable(value: &ScopeValue<'_>, action: Option<&str>) -> bool {
    let definition = value.definition();
    action_allowed(definition, action)
        && value.is_given()
        && (value.is_present() || definition.allows_blank())
}
