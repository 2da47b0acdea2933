use scopie::domain::Param;
use scopie::kernel::dispatch::{OperationTable, ScopeTarget};
use scopie::kernel::registry::ScopeRegistry;
use serde::Serialize;

/// A query description that records what each scope did to it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub(crate) struct QueryPlan {
    pub(crate) from: String,
    pub(crate) filters: Vec<Filter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) order: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) offset: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct Filter {
    pub(crate) scope: String,
    pub(crate) value: Param,
}

impl QueryPlan {
    pub(crate) fn new(from: impl Into<String>) -> Self {
        Self { from: from.into(), ..Self::default() }
    }

    fn filtered(&self, scope: &str, value: &Param) -> Self {
        let mut next = self.clone();
        next.filters.push(Filter { scope: scope.to_owned(), value: value.clone() });
        next
    }

    /// Operations for every scope in `registry`: the built-in ones, and a
    /// recorded filter for any other name.
    pub(crate) fn operations_for(registry: &ScopeRegistry) -> OperationTable<Self> {
        let mut table = OperationTable::of_target();
        for definition in registry {
            if !table.contains(definition.name()) {
                let scope = definition.name().to_owned();
                table.chain(definition.name(), move |plan: &Self, value| plan.filtered(&scope, value));
            }
        }
        table
    }
}

const DEFAULT_PER_PAGE: i64 = 25;
const MAX_PER_PAGE: i64 = 1000;

fn as_int(value: &Param) -> Option<i64> {
    match value {
        Param::Int(i) => Some(*i),
        Param::Str(s) => s.trim().parse().ok(),
        _ => None,
    }
}

impl ScopeTarget for QueryPlan {
    fn operations(ops: &mut OperationTable<Self>) {
        ops.chain("order", |plan, value| Self { order: Some(value.to_string()), ..plan.clone() })
            .chain("per_page", |plan, value| Self {
                limit: as_int(value).map(|n| n.clamp(1, MAX_PER_PAGE)),
                ..plan.clone()
            })
            .chain("page", |plan, value| {
                let page = as_int(value).unwrap_or(1).max(1);
                let limit = plan.limit.unwrap_or(DEFAULT_PER_PAGE);
                let offset = (page - 1).saturating_mul(limit);
                Self { offset: Some(offset), limit: Some(limit), ..plan.clone() }
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scopie::domain::{Params, ScopeOptions, ScopeType};
    use scopie::kernel::sequencer::Sequencer;

    #[test]
    fn unknown_scopes_become_filters() {
        let mut registry = ScopeRegistry::new();
        registry.declare(["per_page"], ScopeOptions::builder().type_tag(ScopeType::Integer).build());
        registry.declare(["page"], ScopeOptions::builder().type_tag(ScopeType::Integer).build());
        registry.declare(["featured"], ScopeOptions::builder().type_tag(ScopeType::Boolean).build());

        let operations = QueryPlan::operations_for(&registry);
        let params = Params::new().with("page", "3").with("per_page", 10).with("featured", "true");
        let plan = Sequencer::new(&registry, &operations)
            .apply_scopes(QueryPlan::new("graduates"), &params, None)
            .unwrap();

        assert_eq!(plan.limit, Some(10));
        assert_eq!(plan.offset, Some(20));
        assert_eq!(plan.filters, [Filter { scope: "featured".into(), value: Param::Bool(true) }]);
    }

    #[test]
    fn paging_saturates_instead_of_overflowing() {
        let mut registry = ScopeRegistry::new();
        registry.declare(["per_page", "page"], ScopeOptions::builder().type_tag(ScopeType::Integer).build());

        let operations = QueryPlan::operations_for(&registry);
        let sequencer = Sequencer::new(&registry, &operations);

        let params = Params::new().with("page", "9223372036854775807");
        let plan = sequencer.apply_scopes(QueryPlan::new("graduates"), &params, None).unwrap();
        assert_eq!(plan.limit, Some(DEFAULT_PER_PAGE));
        assert_eq!(plan.offset, Some(i64::MAX));

        let params = Params::new().with("per_page", "100000").with("page", "2");
        let plan = sequencer.apply_scopes(QueryPlan::new("graduates"), &params, None).unwrap();
        assert_eq!(plan.limit, Some(MAX_PER_PAGE));
        assert_eq!(plan.offset, Some(MAX_PER_PAGE));

        let params = Params::new().with("per_page", "-5").with("page", "-3");
        let plan = sequencer.apply_scopes(QueryPlan::new("graduates"), &params, None).unwrap();
        assert_eq!(plan.limit, Some(1));
        assert_eq!(plan.offset, Some(0));
    }
}
