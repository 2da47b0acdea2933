use crate::cli::ScopeArgs;
use scopie::kernel::sequencer::current_scopes;

pub(crate) fn run(args: &ScopeArgs) -> anyhow::Result<()> {
    let registry = super::registry(args)?;
    let params = super::params(args)?;

    let scopes = current_scopes(&registry, &params, args.action.as_deref())?;
    tracing::info!(applicable = scopes.len(), "Current scopes resolved");
    super::print_json(&scopes)
}
