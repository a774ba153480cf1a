use anyhow::{Context, Result, anyhow};
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use crate::error::{BootError, BootResult};

pub const RAILHEAD_CONFIG_NAME: &str = "boot.toml";
const RAILHEAD_APP_NAME: &str = "railhead";

/// Expands a path with tilde (~) and environment variable substitution
///
/// This function handles shell-style path expansion:
/// - `~` → user's home directory
/// - `~/path` → path relative to home directory
/// - `$VAR/path` → expands environment variable VAR
/// - `${VAR}/path` → expands environment variable VAR (brace syntax)
///
/// # Examples
///
/// ```no_run
/// use std::path::PathBuf;
/// use railhead::configs::expand_path;
///
/// # fn main() -> anyhow::Result<()> {
/// let expanded = expand_path(PathBuf::from("~/apps/shop"))?;
/// // Returns: /Users/username/apps/shop
/// # Ok(())
/// # }
/// ```
pub fn expand_path(path: PathBuf) -> Result<PathBuf> {
    let path_str = path
        .to_str()
        .context("Path contains invalid UTF-8 characters")?;

    let expanded = shellexpand::full(path_str).context("Failed to expand path")?;

    Ok(PathBuf::from(expanded.as_ref()))
}

/// Returns the default config directory based on platform conventions
///
/// Respects XDG Base Directory Specification:
/// - Checks `$XDG_CONFIG_HOME` environment variable
/// - Falls back to `~/.config/railhead` if it is unset, empty or relative
pub fn get_default_config_dir() -> Result<PathBuf> {
    if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME")
        && !xdg_config.is_empty()
    {
        let path = PathBuf::from(&xdg_config);
        // XDG spec: path must be absolute
        if path.is_absolute() {
            return Ok(path.join(RAILHEAD_APP_NAME));
        }
    }

    dirs::home_dir()
        .map(|dir| dir.join(".config").join(RAILHEAD_APP_NAME))
        .context("Failed to determine home directory")
}

/// Finds the boot config using the following search order:
///
/// 1. CLI argument path (if provided) - returns error if specified but doesn't exist
/// 2. Application root: `<root>/boot.toml`
/// 3. XDG config directory: `~/.config/railhead/boot.toml`
///
/// Returns `Ok(None)` when nothing is found through auto-discovery; the
/// built-in defaults apply then.
pub fn find_config_file(cli_path: Option<PathBuf>, root: &Path) -> Result<Option<PathBuf>> {
    if let Some(path) = cli_path {
        if path.exists() {
            return Ok(Some(path));
        } else {
            return Err(anyhow!("Specified config file does not exist: {:?}", path));
        }
    }

    let local_config_path = root.join(RAILHEAD_CONFIG_NAME);
    if local_config_path.exists() {
        return Ok(Some(local_config_path));
    }

    let xdg_config_path = get_default_config_dir()?.join(RAILHEAD_CONFIG_NAME);
    if xdg_config_path.exists() {
        return Ok(Some(xdg_config_path));
    }

    Ok(None)
}

/// Sorted paths of the entries directly inside `dir`.
///
/// A directory that does not exist has no entries; any other read failure is
/// an error.
pub fn sorted_entries(dir: &Path) -> BootResult<Vec<PathBuf>> {
    let read_error = |source| BootError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(error) => return Err(read_error(error)),
    };

    let mut paths = entries
        .map(|entry| entry.map(|entry| entry.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(read_error)?;
    paths.sort();
    Ok(paths)
}
