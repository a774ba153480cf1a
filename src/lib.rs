pub mod app;
pub mod cli;
pub mod configs;
pub mod error;
pub mod initializer;
pub mod logging;
pub mod lua;
pub mod plugins;
pub mod registry;

pub use configs::Configuration;
pub use error::{BootError, BootResult, ConfigError, LoadError};

pub use initializer::{Boot, BootState, Host, Initializer, Middleware, StandaloneHost};

pub use configs::{find_config_file, load_config, validate_config};
pub use lua::create_lua_vm;
pub use plugins::{Plugin, PluginLocator};
