use anyhow::{Context, Result};

use crate::{
    configs::Configuration,
    plugins::{LocateError, PluginLocator},
};

/// Prints the plugins that would load for `config`, in load order, followed
/// by any listed plugin that could not be found.
pub fn list_plugins(config: &Configuration) -> Result<()> {
    let search_paths = config.plugin_search_paths();
    for path in &search_paths {
        println!("Plugin path: {}", path.display());
    }
    println!();

    let locator = PluginLocator::new(search_paths);
    let (plugins, missing) = match locator.locate(config.plugins.as_deref()) {
        Ok(plugins) => (plugins, Vec::new()),
        Err(LocateError::Missing { located, missing }) => (located, missing),
        Err(error) => return Err(error).context("Failed to locate plugins"),
    };

    if plugins.is_empty() {
        println!("No plugins found.");
    } else {
        println!("Plugins (load order):");
        for plugin in &plugins {
            let kind = if plugin.is_engine() { " [engine]" } else { "" };
            println!("  {}{} {}", plugin.name, kind, plugin.directory.display());
        }
    }

    if !missing.is_empty() {
        println!();
        println!("Missing plugins:");
        for name in &missing {
            println!("  {} ✗ not found", name);
        }
    }

    Ok(())
}
