pub mod args_files;
pub mod ast;
pub mod executor;
pub mod parser;
pub mod planner;
pub mod platform;
pub mod template;

use anyhow::Result;
use args_files::ArgsFiles;
use log::debug;
use planner::suggest_substitutions;
use platform::Platform;
use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;
use template::{Substitutions, command_length};

#[cfg(test)]
mod tests;

/// Produces the final command line for a template.
///
/// The raw template is rendered once without args files to measure it. Only
/// then is it planned, and the final render writes args files into
/// `args_files` when the measured length is over the platform limit.
pub fn process_command(
    template: &str,
    classpath: &[PathBuf],
    platform: &Platform,
    args_files: &mut ArgsFiles,
) -> Result<String> {
    let subs = Substitutions::new(platform, classpath);

    let measured = command_length(&subs.inline(template));
    let use_args_files = measured > platform.command_length_limit();
    debug!(
        "Command length {} (limit {}), args files: {}",
        measured,
        platform.command_length_limit(),
        use_args_files
    );

    let planned = suggest_substitutions(template, platform);

    if use_args_files {
        subs.render(&planned, |content| args_files.create(content))
    } else {
        Ok(subs.inline(&planned))
    }
}

/// What a run would execute, without creating any file.
pub fn preview_command(template: &str, classpath: &[PathBuf], platform: &Platform) -> String {
    let planned = suggest_substitutions(template, platform);
    Substitutions::new(platform, classpath).inline(&planned)
}

/// Processes a template and runs it, streaming its output to `out`.
///
/// Args files created for the run are removed before returning, on success
/// and on error alike.
pub fn execute_script(
    template: &str,
    classpath: &[PathBuf],
    platform: &Platform,
    env_vars: &HashMap<String, String>,
    verbose: bool,
    out: &mut dyn Write,
) -> Result<i32> {
    let mut args_files = ArgsFiles::new();
    let command = process_command(template, classpath, platform, &mut args_files)?;

    if !args_files.is_empty() {
        debug!("Passing {} args file(s) to the command", args_files.len());
    }
    if verbose {
        writeln!(out, "> {}", command)?;
    }

    executor::run_in_shell(&command, platform, env_vars, out)
}
