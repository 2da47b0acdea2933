//! The `scopie` command: resolves a scope manifest against request params.

mod cli;
mod commands;
mod plan;

use clap::Parser;
use cli::{Cli, Commands, LogArgs};
use scopie_logger::Logger;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _logger = init_logger(&cli.logging)?;

    match &cli.command {
        Commands::Current(args) => commands::current::run(args),
        Commands::Apply { scope, from } => commands::apply::run(scope, from),
    }
}

fn init_logger(args: &LogArgs) -> anyhow::Result<Logger> {
    let builder = Logger::builder()
        .name(env!("CARGO_BIN_NAME"))
        .console(true)
        .level(args.log_level)
        .format(args.format());
    let builder = match &args.log_dir {
        Some(dir) => builder.path(dir),
        None => builder,
    };
    Ok(builder.init()?)
}
