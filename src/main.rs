mod cli;
mod config;
mod runner;
mod handlers;
mod script;
mod utils;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use handlers::{action, list, path};

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let code = match cli.command {
        Commands::Do { list: true, .. } => {
            list::handle_list()?;
            0
        }
        Commands::Do { actions, dry_run, mut arg, args, .. } => {
            arg.extend(args);
            action::handle_do(actions, arg, cli.verbose, dry_run)?
        }
        Commands::Build { args } => action::handle_do(vec!["build".into()], args, cli.verbose, false)?,
        Commands::Test { args } => action::handle_do(vec!["test".into()], args, cli.verbose, false)?,
        Commands::Run { args } => action::handle_do(vec!["run".into()], args, cli.verbose, false)?,
        Commands::Path => {
            path::handle_path()?;
            0
        }
    };

    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
