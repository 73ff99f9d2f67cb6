use clap::Parser;

mod cli;
mod commands;

use cli::{CliArgs, Commands};

pub type CliResult<T> = Result<T, bdpp_core::BdppError>;

fn main() -> CliResult<()> {
    env_logger::init();

    let args = CliArgs::parse();

    match args.command {
        Commands::Hide(cmd) => cmd.run(),
        Commands::Extract(cmd) => cmd.run(),
        Commands::Inspect(cmd) => cmd.run(),
    }
}
