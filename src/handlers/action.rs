use anyhow::{Result, bail};
use std::env;
use std::io;
use crate::config::load_config;
use crate::runner::ActionRunner;
use crate::runner::classpath::DepsDirResolver;
use crate::script::platform::Platform;

pub fn handle_do(actions: Vec<String>, extra_args: Vec<String>, verbose: bool, dry_run: bool) -> Result<i32> {
    if actions.is_empty() {
        bail!("Action name is required. Use --list to see available actions.");
    }

    let current_dir = env::current_dir()?;
    let config = load_config(&current_dir)?;

    let runner = ActionRunner {
        resolver: DepsDirResolver::new(config.deps_dir()),
        config: &config,
        platform: Platform::current(),
        verbose,
        dry_run,
    };

    // Root actions print directly to our stdout
    let stdout = io::stdout();
    let mut out = stdout.lock();
    runner.run_actions(&actions, &extra_args, &mut out)
}
