mod args;
pub mod completions;
pub mod init;
pub mod plugins;
pub mod validate;

pub use args::{Args, Commands};
pub use plugins::list_plugins;
