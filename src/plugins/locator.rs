use std::{
    collections::HashSet,
    fs, io,
    path::{Path, PathBuf},
};

use indexmap::IndexMap;
use thiserror::Error;

use crate::{
    configs::{PluginRef, validate_selection},
    error::{BootError, ConfigError, to_sentence},
    plugins::Plugin,
};

#[derive(Error, Debug)]
pub enum LocateError {
    #[error(transparent)]
    Selection(#[from] ConfigError),

    /// Some listed plugins were not found. `located` holds the ones that were,
    /// in load order.
    #[error("Could not locate the following plugins: {}", to_sentence(.missing))]
    Missing {
        located: Vec<Plugin>,
        missing: Vec<String>,
    },

    #[error("Failed to read plugins directory at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl From<LocateError> for BootError {
    fn from(error: LocateError) -> Self {
        match error {
            LocateError::Selection(error) => BootError::Config(error),
            LocateError::Missing { missing, .. } => BootError::MissingPlugins { missing },
            LocateError::Io { path, source } => BootError::Io { path, source },
        }
    }
}

/// Finds plugins under a list of search paths.
///
/// Search paths are scanned in order; entries of each directory in sorted
/// order, descending into directories that are not plugins themselves. When
/// two directories share a name the first one found wins.
#[derive(Debug, Clone)]
pub struct PluginLocator {
    search_paths: Vec<PathBuf>,
}

impl PluginLocator {
    pub fn new(search_paths: Vec<PathBuf>) -> Self {
        Self { search_paths }
    }

    /// Every discoverable plugin, keyed by name, in discovery order.
    pub fn discover(&self) -> Result<IndexMap<String, Plugin>, LocateError> {
        let mut found = IndexMap::new();

        for search_path in &self.search_paths {
            // Missing search paths are allowed
            if !search_path.is_dir() {
                tracing::debug!("Skipping missing plugin path {}", search_path.display());
                continue;
            }
            discover_under(search_path, &mut found)?;
        }

        Ok(found)
    }

    /// Resolves `selection` against the discovered plugins.
    ///
    /// Without a selection every plugin loads in discovery order. Otherwise
    /// named entries load in listed order and the `all` wildcard expands, at
    /// its position, to every discovered plugin named nowhere in the list.
    pub fn locate(&self, selection: Option<&[PluginRef]>) -> Result<Vec<Plugin>, LocateError> {
        let discovered = self.discover()?;

        let Some(selection) = selection else {
            return Ok(discovered.into_values().collect());
        };

        validate_selection(selection)?;

        let explicit: HashSet<&str> = selection.iter().filter_map(PluginRef::name).collect();
        let mut located = Vec::new();
        let mut missing = Vec::new();

        for entry in selection {
            match entry {
                PluginRef::Named(name) => match discovered.get(name) {
                    Some(plugin) => located.push(plugin.clone()),
                    None => missing.push(name.clone()),
                },
                PluginRef::All => located.extend(
                    discovered
                        .values()
                        .filter(|plugin| !explicit.contains(plugin.name.as_str()))
                        .cloned(),
                ),
            }
        }

        if missing.is_empty() {
            Ok(located)
        } else {
            Err(LocateError::Missing { located, missing })
        }
    }
}

fn discover_under(dir: &Path, found: &mut IndexMap<String, Plugin>) -> Result<(), LocateError> {
    let read_error = |source| LocateError::Io {
        path: dir.to_path_buf(),
        source,
    };

    // Sorted for deterministic ordering across platforms
    let mut entries: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(read_error)?
        .map(|entry| entry.map(|entry| entry.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(read_error)?;
    entries.sort();

    for path in entries {
        if !path.is_dir() {
            continue;
        }

        match Plugin::from_directory(&path) {
            Some(plugin) => {
                if let Some(first) = found.get(&plugin.name) {
                    tracing::debug!(
                        "Ignoring plugin '{}' at {}, already found at {}",
                        plugin.name,
                        plugin.directory.display(),
                        first.directory.display()
                    );
                } else {
                    found.insert(plugin.name.clone(), plugin);
                }
            }
            None => discover_under(&path, found)?,
        }
    }

    Ok(())
}
