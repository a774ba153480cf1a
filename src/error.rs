use std::{io, path::PathBuf};

use thiserror::Error;

use crate::configs::Framework;

/// Errors raised by the boot pipeline.
///
/// Each variant is a distinct failure category so callers can tell an
/// unrecognized framework apart from a recognized one that failed to load,
/// or a misconfigured root from a missing plugin.
#[derive(Error, Debug)]
pub enum BootError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Unknown framework '{0}'")]
    UnknownFramework(String),

    #[error(transparent)]
    FrameworkLoad(#[from] LoadError),

    #[error("Could not locate the following plugins: {}", to_sentence(.missing))]
    MissingPlugins { missing: Vec<String> },

    #[error("uninitialized constant {name} (referenced from {})", .file.display())]
    MissingConstant { name: String, file: PathBuf },

    #[error("Failed to evaluate {}: {source}", .path.display())]
    Script {
        path: PathBuf,
        #[source]
        source: mlua::Error,
    },

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("No initializer step named '{0}'")]
    UnknownStep(String),

    #[error("An initializer step named '{0}' is already registered")]
    DuplicateStep(String),

    #[error("Script runtime error: {0}")]
    Runtime(#[source] mlua::Error),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Application root {} is not a directory", .0.display())]
    RootPathMissing(PathBuf),

    #[error("autoload_once_paths must be a subset of load_paths: {}", .0.display())]
    AutoloadOnceOutsideLoadPaths(PathBuf),

    #[error("The plugin list may contain 'all' only once")]
    RepeatedWildcard,

    #[error("Plugin '{0}' is listed more than once")]
    DuplicatePlugin(String),
}

/// A recognized framework whose library failed to load.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Failed to load framework '{}': {reason}", .framework.as_str())]
pub struct LoadError {
    pub framework: Framework,
    pub reason: String,
}

impl LoadError {
    pub fn new(framework: Framework, reason: impl Into<String>) -> Self {
        Self {
            framework,
            reason: reason.into(),
        }
    }
}

pub type BootResult<T> = Result<T, BootError>;

/// Joins names the way a sentence lists them: `a`, `a and b`, `a, b, and c`.
pub fn to_sentence(words: &[String]) -> String {
    match words {
        [] => String::new(),
        [only] => only.clone(),
        [first, second] => format!("{} and {}", first, second),
        [init @ .., last] => format!("{}, and {}", init.join(", "), last),
    }
}
