//! Process-wide state mutated by the boot pipeline.
//!
//! Lives for the whole process. Steps only ever add to it; [`reset`] clears it
//! and exists for test isolation.

mod generators;
mod i18n;
mod search_path;

use std::{
    path::{Path, PathBuf},
    sync::{LazyLock, Mutex, PoisonError},
};

use indexmap::{IndexMap, IndexSet};
use toml::Table;

pub use generators::{GeneratorsRegistry, Shell};
pub use i18n::Localization;
pub use search_path::SearchPath;

use crate::configs::Framework;

#[derive(Debug, Clone, Default)]
pub struct Registry {
    /// Directories consulted by the code loader.
    pub load_path: SearchPath,
    pub autoload_paths: SearchPath,
    pub autoload_once_paths: SearchPath,
    /// Defined classes mapped to their superclass.
    pub classes: IndexMap<String, Option<String>>,
    pub loaded_files: IndexSet<PathBuf>,
    pub required_frameworks: IndexSet<Framework>,
    pub generators: GeneratorsRegistry,
    pub i18n: Localization,
}

static REGISTRY: LazyLock<Mutex<Registry>> = LazyLock::new(|| Mutex::new(Registry::default()));

/// Runs `f` with exclusive access to the registry.
pub fn with<R>(f: impl FnOnce(&mut Registry) -> R) -> R {
    let mut registry = REGISTRY.lock().unwrap_or_else(PoisonError::into_inner);
    f(&mut registry)
}

/// Clears every registry to its initial state.
pub fn reset() {
    with(|registry| *registry = Registry::default());
}

pub fn snapshot() -> Registry {
    with(|registry| registry.clone())
}

pub fn load_path() -> Vec<PathBuf> {
    with(|registry| registry.load_path.to_vec())
}

pub fn load_path_contains(path: &Path) -> bool {
    with(|registry| registry.load_path.contains(path))
}

pub fn autoload_paths() -> Vec<PathBuf> {
    with(|registry| registry.autoload_paths.to_vec())
}

pub fn is_class_defined(name: &str) -> bool {
    with(|registry| registry.classes.contains_key(name))
}

pub fn defined_classes() -> Vec<String> {
    with(|registry| registry.classes.keys().cloned().collect())
}

pub fn required_frameworks() -> Vec<Framework> {
    with(|registry| registry.required_frameworks.iter().copied().collect())
}

pub fn generator_options() -> Table {
    with(|registry| registry.generators.options.clone())
}

pub fn generator_aliases() -> Table {
    with(|registry| registry.generators.aliases.clone())
}

pub fn generator_shell() -> Shell {
    with(|registry| registry.generators.shell)
}

pub fn i18n_load_path() -> Vec<PathBuf> {
    with(|registry| registry.i18n.load_path())
}

pub fn default_locale() -> String {
    with(|registry| registry.i18n.default_locale.clone())
}
