use anyhow::{Context, Result, ensure};
use std::path::PathBuf;

use crate::configs::{expand_path, load_config, validate_config};

/// Validates the boot config at `config_path`.
///
/// Checks TOML syntax and the structure of every section, then the
/// cross-field rules: known framework identifiers, a well-formed plugin
/// list and `autoload_once_paths` contained in `load_paths`.
pub fn validate_config_cli(config_path: PathBuf) -> Result<()> {
    let config_path = expand_path(config_path).context("Failed to expand config path")?;

    ensure!(
        config_path.exists(),
        "Config file not found: {}",
        config_path.display()
    );

    ensure!(
        config_path.is_file(),
        "Path must be a file, not a directory: {}",
        config_path.display()
    );

    let config = load_config(config_path).context("Failed to load config")?;

    validate_config(&config)?;

    println!("✓ Config file is valid");

    Ok(())
}
