use anyhow::Result;
use std::env;
use crate::config::load_config;
use crate::runner::classpath::{ClasspathResolver, DepsDirResolver};
use crate::script::platform::Platform;
use crate::script::template::join_classpath;

pub fn handle_path() -> Result<()> {
    let current_dir = env::current_dir()?;
    let config = load_config(&current_dir)?;

    let classpath = DepsDirResolver::new(config.deps_dir()).resolve()?;
    if !classpath.is_empty() {
        println!("{}", join_classpath(&classpath, &Platform::current()));
    }

    Ok(())
}
