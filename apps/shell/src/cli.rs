use clap::{Args, Parser, Subcommand};
use scopie_logger::{LevelFilter, LogFormat};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "scopie", about = "Resolve declared scopes against request params", version)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Commands,

    #[command(flatten)]
    pub(crate) logging: LogArgs,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// Print the scopes that apply, with their coerced values, as a JSON object
    Current(ScopeArgs),

    /// Apply the scopes to an empty query plan and print the plan as JSON
    Apply {
        #[command(flatten)]
        scope: ScopeArgs,

        /// Name of the source the plan reads from
        #[arg(long, default_value = "records")]
        from: String,
    },
}

#[derive(Debug, Args)]
pub(crate) struct ScopeArgs {
    /// Scope manifest (toml, json or yaml)
    #[arg(long, short)]
    pub(crate) manifest: PathBuf,

    /// Params as a JSON object. `-` or no value reads them from stdin
    #[arg(long, short)]
    pub(crate) params: Option<String>,

    /// Action the params were received for
    #[arg(long, short)]
    pub(crate) action: Option<String>,
}

#[derive(Debug, Args)]
pub(crate) struct LogArgs {
    /// Minimum level written to the logs
    #[arg(long, global = true, default_value = "warn")]
    pub(crate) log_level: LevelFilter,

    /// Also write rolling log files into this directory
    #[arg(long, global = true)]
    pub(crate) log_dir: Option<PathBuf>,

    /// Render log events as JSON
    #[arg(long, global = true)]
    pub(crate) json_logs: bool,
}

impl LogArgs {
    pub(crate) const fn format(&self) -> LogFormat {
        if self.json_logs { LogFormat::Json } else { LogFormat::Compact }
    }
}
