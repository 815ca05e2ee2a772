//! `init` subcommand

use anyhow::{Result, bail};
use console::style;
use pyex_core::config::PyexConfig;
use pyex_core::config::constants::defaults;
use std::path::Path;

pub fn handle_init_command(force: bool) -> Result<()> {
    let path = Path::new(defaults::CONFIG_FILE);
    if path.exists() && !force {
        bail!(
            "{} already exists; pass --force to overwrite",
            path.display()
        );
    }

    PyexConfig::create_sample_config(path)?;
    println!(
        "{} {}",
        style("Wrote").green().bold(),
        style(path.display()).cyan()
    );
    Ok(())
}
