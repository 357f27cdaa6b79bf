pub mod classpath;

use anyhow::{Result, anyhow};
use colored::*;
use log::{info, warn};
use std::io::Write;
use crate::config::{AppConfig, APP_INFO_FILE};
use crate::script::planner::DEPS_MARKER;
use crate::script::platform::Platform;
use crate::script::{execute_script, preview_command};
use crate::utils::append_args;
use self::classpath::ClasspathResolver;

/// Runs actions one after the other. The first non-zero exit code stops the
/// chain and is returned as is.
pub fn run_chain<F>(names: &[String], mut run_one: F) -> Result<i32>
where
    F: FnMut(&str) -> Result<i32>,
{
    for name in names {
        let code = run_one(name)?;
        if code != 0 {
            warn!("{} Action '{}' exited with code {}", "❌".red(), name, code);
            return Ok(code);
        }
    }
    Ok(0)
}

pub struct ActionRunner<'a, R: ClasspathResolver> {
    pub config: &'a AppConfig,
    pub resolver: R,
    pub platform: Platform,
    pub verbose: bool,
    pub dry_run: bool,
}

impl<R: ClasspathResolver> ActionRunner<'_, R> {
    /// Runs a chain of actions, each with the same extra arguments.
    ///
    /// Every name is checked before anything runs.
    pub fn run_actions(&self, names: &[String], extra_args: &[String], out: &mut dyn Write) -> Result<i32> {
        for name in names {
            self.template(name)?;
        }
        run_chain(names, |name| self.run_action(name, extra_args, &mut *out))
    }

    pub fn run_action(&self, name: &str, extra_args: &[String], out: &mut dyn Write) -> Result<i32> {
        let command = append_args(self.template(name)?, extra_args);

        // Only resolve when the classpath is actually used
        let classpath = if command.contains(DEPS_MARKER) {
            self.resolver.resolve()?
        } else {
            Vec::new()
        };

        if self.dry_run {
            let preview = preview_command(&command, &classpath, &self.platform);
            writeln!(out, "{} [DRY-RUN] {}", "::".yellow(), preview)?;
            return Ok(0);
        }

        info!("{} Running action: {}", "⚡".yellow(), name.bold());
        execute_script(&command, &classpath, &self.platform, &self.config.env, self.verbose, out)
    }

    fn template(&self, name: &str) -> Result<&str> {
        self.config.action(name).ok_or_else(|| {
            anyhow!(
                "Action '{}' not found in {}. Use --list to see available actions.",
                name,
                APP_INFO_FILE
            )
        })
    }
}
