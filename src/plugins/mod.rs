mod locator;
mod plugin;

pub use locator::{LocateError, PluginLocator};
pub use plugin::Plugin;
