use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::{
    configs::{
        Framework, GeneratorsConfig, I18nConfig, PluginRef, plugin_selection::validate_selection,
    },
    error::BootResult,
    plugins::Plugin,
};

pub const DEFAULT_ENVIRONMENT: &str = "development";
pub const DEFAULT_SESSION_STORE: &str = "ActionDispatch::Session::CookieStore";

const CORE_FRAMEWORK_DIRS: [&str; 3] = ["railties", "railties/lib", "activesupport/lib"];
const DEFAULT_LOAD_DIRS: [&str; 7] = [
    "app",
    "app/models",
    "app/controllers",
    "app/helpers",
    "app/services",
    "lib",
    "vendor",
];
const DEFAULT_EAGER_LOAD_DIRS: [&str; 3] = ["app/models", "app/controllers", "app/helpers"];
const DEFAULT_PLUGIN_DIR: &str = "vendor/plugins";
const VENDORED_FRAMEWORK_DIR: &str = "vendor/rails";
const ENVIRONMENTS_DIR: &str = "config/environments";
const SUPPORT_LOCALE_DIR: &str = "activesupport/lib/active_support/locale";
const VIEW_LOCALE_DIR: &str = "actionpack/lib/action_view/locale";
const RECORD_LOCALE_DIRS: [&str; 2] = [
    "activemodel/lib/active_model/locale",
    "activerecord/lib/active_record/locale",
];

pub type Callback = Box<dyn FnMut() + Send>;

/// Callbacks fired by the `after_initialize` step, in registration order.
#[derive(Default)]
pub struct Callbacks(Vec<Callback>);

impl Callbacks {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Callback> {
        self.0.iter_mut()
    }
}

impl fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callbacks({})", self.0.len())
    }
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Configuration {
    pub root_path: PathBuf,
    pub environment: String,
    pub frameworks: IndexSet<String>,
    pub framework_root_path: Option<PathBuf>,
    pub load_paths: Vec<PathBuf>,
    pub eager_load_paths: Vec<PathBuf>,
    pub autoload_once_paths: Vec<PathBuf>,
    pub cache_classes: bool,
    pub plugin_paths: Vec<PathBuf>,
    pub plugins: Option<Vec<PluginRef>>,
    pub environment_path: Option<PathBuf>,
    pub session_store: String,
    pub generators: GeneratorsConfig,
    pub i18n: I18nConfig,

    #[serde(skip)]
    pub after_initialize_callbacks: Callbacks,

    #[serde(skip)]
    pub loaded_plugins: Vec<Plugin>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            root_path: PathBuf::from("."),
            environment: DEFAULT_ENVIRONMENT.to_string(),
            frameworks: [
                Framework::ActiveRecord,
                Framework::ActionController,
                Framework::ActionView,
                Framework::ActionMailer,
                Framework::ActiveResource,
            ]
            .iter()
            .map(|framework| framework.as_str().to_string())
            .collect(),
            framework_root_path: None,
            load_paths: DEFAULT_LOAD_DIRS.iter().map(PathBuf::from).collect(),
            eager_load_paths: DEFAULT_EAGER_LOAD_DIRS.iter().map(PathBuf::from).collect(),
            autoload_once_paths: Vec::new(),
            cache_classes: false,
            plugin_paths: vec![PathBuf::from(DEFAULT_PLUGIN_DIR)],
            plugins: None,
            environment_path: None,
            session_store: DEFAULT_SESSION_STORE.to_string(),
            generators: GeneratorsConfig::default(),
            i18n: I18nConfig::default(),
            after_initialize_callbacks: Callbacks::default(),
            loaded_plugins: Vec::new(),
        }
    }
}

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves `path` against the application root unless it is absolute.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root_path.join(path)
        }
    }

    pub fn has_framework(&self, framework: Framework) -> bool {
        self.frameworks.contains(framework.as_str())
    }

    pub fn set_frameworks<I>(&mut self, frameworks: I) -> &mut Self
    where
        I: IntoIterator<Item = Framework>,
    {
        self.frameworks = frameworks
            .into_iter()
            .map(|framework| framework.as_str().to_string())
            .collect();
        self
    }

    pub fn add_framework(&mut self, identifier: impl Into<String>) -> &mut Self {
        self.frameworks.insert(identifier.into());
        self
    }

    pub fn remove_framework(&mut self, framework: Framework) -> &mut Self {
        self.frameworks.shift_remove(framework.as_str());
        self
    }

    pub fn framework_root_path(&self) -> PathBuf {
        match &self.framework_root_path {
            Some(path) => self.resolve(path),
            None => self.root_path.join(VENDORED_FRAMEWORK_DIR),
        }
    }

    /// Library directories of the core and of every active framework.
    ///
    /// Derived from `frameworks` and the framework root on each call.
    pub fn framework_paths(&self) -> Vec<PathBuf> {
        let mut dirs: Vec<String> = CORE_FRAMEWORK_DIRS.iter().map(|d| d.to_string()).collect();

        if self.has_framework(Framework::ActionController)
            || self.has_framework(Framework::ActionView)
        {
            dirs.push(Framework::ActionController.library_dir());
        }

        for framework in Framework::STANDALONE_LIBRARIES {
            if self.has_framework(framework) {
                dirs.push(framework.library_dir());
            }
        }

        let root = self.framework_root_path();
        dirs.iter().map(|dir| root.join(dir)).collect()
    }

    /// Directories holding the locale files the active frameworks ship with,
    /// in the order their translations are layered.
    pub fn framework_locale_dirs(&self) -> Vec<PathBuf> {
        let mut dirs = vec![SUPPORT_LOCALE_DIR];
        if self.has_framework(Framework::ActionView) {
            dirs.push(VIEW_LOCALE_DIR);
        }
        if self.has_framework(Framework::ActiveRecord) {
            dirs.extend(RECORD_LOCALE_DIRS);
        }

        let root = self.framework_root_path();
        dirs.iter().map(|dir| root.join(dir)).collect()
    }

    /// Selects which plugins load and in which order. `None` loads every
    /// discovered plugin.
    pub fn only_load_plugins<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<PluginRef>,
    {
        self.plugins = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn plugin_search_paths(&self) -> Vec<PathBuf> {
        self.plugin_paths
            .iter()
            .map(|path| self.resolve(path))
            .collect()
    }

    pub fn loaded_plugin_names(&self) -> Vec<String> {
        self.loaded_plugins
            .iter()
            .map(|plugin| plugin.name.clone())
            .collect()
    }

    /// Registers a callback for the `after_initialize` step. Passing `None`
    /// registers nothing.
    pub fn after_initialize(&mut self, callback: Option<Callback>) -> &mut Self {
        if let Some(callback) = callback {
            self.after_initialize_callbacks.0.push(callback);
        }
        self
    }

    /// Runs `setup` once against the generator settings.
    pub fn generators<F>(&mut self, setup: F) -> &mut Self
    where
        F: FnOnce(&mut GeneratorsConfig),
    {
        setup(&mut self.generators);
        self
    }

    /// Environment file evaluated by `load_environment`.
    ///
    /// An explicit path wins, and an explicitly empty one disables the step.
    /// Otherwise `config/environments/<environment>.lua` is used when it
    /// exists.
    pub fn environment_path(&self) -> Option<PathBuf> {
        match &self.environment_path {
            Some(path) if path.as_os_str().is_empty() => None,
            Some(path) => Some(self.resolve(path)),
            None => {
                let derived = self
                    .root_path
                    .join(ENVIRONMENTS_DIR)
                    .join(format!("{}.lua", self.environment));
                derived.is_file().then_some(derived)
            }
        }
    }

    /// The first `autoload_once_paths` entry that does not resolve to one of
    /// the `load_paths`.
    pub fn autoload_once_path_outside_load_paths(&self) -> Option<&PathBuf> {
        let load_paths: Vec<PathBuf> = self
            .load_paths
            .iter()
            .map(|path| self.resolve(path))
            .collect();
        self.autoload_once_paths
            .iter()
            .find(|once| !load_paths.contains(&self.resolve(once)))
    }

    pub fn i18n_load_path(&self) -> BootResult<Vec<PathBuf>> {
        self.i18n.load_path(&self.root_path)
    }
}

pub fn load_config(config_path: PathBuf) -> Result<Configuration> {
    let contents = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read {:?}", config_path))?;

    let config: Configuration =
        toml::from_str(&contents).with_context(|| format!("Failed to parse {:?}", config_path))?;

    Ok(config)
}

pub fn validate_config(config: &Configuration) -> Result<()> {
    for identifier in &config.frameworks {
        identifier
            .parse::<Framework>()
            .map_err(|unknown| anyhow::anyhow!("Unknown framework '{}'", unknown))?;
    }

    if let Some(selection) = &config.plugins {
        validate_selection(selection).context("Invalid plugin list")?;
    }

    if let Some(once_path) = config.autoload_once_path_outside_load_paths() {
        anyhow::bail!(
            "autoload_once_paths entry {:?} is not one of the load_paths",
            once_path
        );
    }

    anyhow::ensure!(
        !config.environment.is_empty(),
        "environment name must not be empty"
    );

    anyhow::ensure!(
        !config.generators.options.values().any(|v| !v.is_table()),
        "generators.options must map each namespace to a table"
    );

    Ok(())
}
