use std::fs;

use anyhow::{Context, Result};

use crate::cli::InitArgs;
use crate::config::{self, CliOverrides};

/// Execute the init command.
///
/// Creates the data directory and writes a commented `config.yaml`. An
/// existing config file is kept unless `--force` is given. Snapshots are
/// never touched.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the files cannot be
/// written.
pub fn execute(args: &InitArgs, overrides: &CliOverrides, json: bool) -> Result<()> {
    let config = config::load(overrides).context("Failed to load configuration")?;
    let data_dir = &config.data_dir;
    fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create {}", data_dir.display()))?;

    let config_path = config.config_path();
    let write_config = args.force || !config_path.exists();
    if write_config {
        fs::write(&config_path, config::default_config_yaml())
            .with_context(|| format!("Failed to write {}", config_path.display()))?;
    }
    tracing::debug!(path = %config_path.display(), written = write_config, "init");

    if json {
        let output = serde_json::json!({
            "data_dir": data_dir,
            "config": config_path,
            "config_written": write_config,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("Initialized contact tracker in {}", data_dir.display());
        if !write_config {
            println!("Kept existing {}", config_path.display());
        }
    }
    Ok(())
}
