mod config;
mod framework;
mod generators;
mod i18n;
pub mod merge;
pub mod paths;
pub mod plugin_selection;

pub use config::{
    Callback, Callbacks, Configuration, DEFAULT_ENVIRONMENT, DEFAULT_SESSION_STORE, load_config,
    validate_config,
};
pub use framework::Framework;
pub use generators::{DEFAULT_NAMESPACE, GeneratorsConfig};
pub use i18n::{I18nConfig, LOCALES_DIR, locale_files_in};
pub use merge::deep_merge;
pub use paths::{expand_path, find_config_file, get_default_config_dir, sorted_entries};
pub use plugin_selection::{PluginRef, WILDCARD, selection, validate_selection};
