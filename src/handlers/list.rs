use anyhow::Result;
use colored::*;
use std::env;
use std::io::Write;
use crate::config::{load_config, AppConfig, APP_INFO_FILE};

pub fn handle_list() -> Result<()> {
    let current_dir = env::current_dir()?;
    let config = load_config(&current_dir)?;
    print_actions(&config, &mut std::io::stdout())
}

pub fn print_actions(config: &AppConfig, out: &mut dyn Write) -> Result<()> {
    if let Some(name) = &config.project.name {
        let deps = format!("({} dependencies)", config.dependencies.len());
        writeln!(out, "{} {} {}", "📦".green(), name.bold(), deps.dimmed())?;
        writeln!(out)?;
    }

    if config.actions.is_empty() {
        writeln!(out, "No actions defined in {}", APP_INFO_FILE)?;
        return Ok(());
    }

    writeln!(out, "{}", "Available actions:".bold().underline())?;

    let max_len = config.actions.keys().map(|n| n.len()).max().unwrap_or(0);

    // BTreeMap keeps names sorted
    for (name, template) in &config.actions {
        let padding = " ".repeat(max_len - name.len() + 2);
        writeln!(out, "  {}{}{}", name.cyan(), padding, template.dimmed())?;
    }

    Ok(())
}
