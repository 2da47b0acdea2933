use crate::cli::ScopeArgs;
use crate::plan::QueryPlan;
use scopie::kernel::sequencer::Sequencer;

pub(crate) fn run(args: &ScopeArgs, from: &str) -> anyhow::Result<()> {
    let registry = super::registry(args)?;
    let params = super::params(args)?;
    let operations = QueryPlan::operations_for(&registry);

    let plan = Sequencer::new(&registry, &operations).apply_scopes(
        QueryPlan::new(from),
        &params,
        args.action.as_deref(),
    )?;
    tracing::info!(filters = plan.filters.len(), "Scopes applied");
    super::print_json(&plan)
}
