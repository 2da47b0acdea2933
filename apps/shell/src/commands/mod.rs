pub(crate) mod apply;
pub(crate) mod current;

use crate::cli::ScopeArgs;
use anyhow::Context;
use scopie::domain::Params;
use scopie::kernel::registry::ScopeRegistry;
use std::io::{IsTerminal, Read, Write};

/// Loads the manifest named by `args` into a registry.
fn registry(args: &ScopeArgs) -> anyhow::Result<ScopeRegistry> {
    let registry = scopie::load_manifest(&args.manifest)
        .with_context(|| format!("Failed to load manifest {}", args.manifest.display()))?
        .into_registry();
    tracing::debug!(scopes = registry.len(), "Registry ready");
    Ok(registry)
}

/// Params from `--params`, else from stdin. An empty input is an empty mapping.
fn params(args: &ScopeArgs) -> anyhow::Result<Params> {
    let raw = match args.params.as_deref() {
        Some(inline) if inline != "-" => inline.to_owned(),
        _ => {
            let mut stdin = std::io::stdin();
            if args.params.is_none() && stdin.is_terminal() {
                return Ok(Params::new());
            }
            let mut buffer = String::new();
            stdin.read_to_string(&mut buffer).context("Failed to read params from stdin")?;
            buffer
        },
    };

    if raw.trim().is_empty() {
        return Ok(Params::new());
    }
    serde_json::from_str(&raw).context("Params must be a JSON object")
}

fn print_json(value: &impl serde::Serialize) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
