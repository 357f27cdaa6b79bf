use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "jpm", version, about = "jpm: portable project actions for Java")]
pub struct Cli {
    /// Print each processed command before running it
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run one or more actions defined in app.toml
    Do {
        /// Actions to run, in order. The first failing one stops the chain
        actions: Vec<String>,

        /// List the available actions
        #[arg(short, long)]
        list: bool,

        /// Print the processed commands without executing them
        #[arg(short = 'n', long = "dry-run")]
        dry_run: bool,

        /// Extra argument passed to the actions (repeatable)
        #[arg(short = 'a', long = "arg", allow_hyphen_values = true)]
        arg: Vec<String>,

        #[arg(last = true)]
        args: Vec<String>,
    },

    /// Shortcut for 'do build'
    Build {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Shortcut for 'do test'
    Test {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Shortcut for 'do run'
    Run {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Print the project classpath
    Path,
}
