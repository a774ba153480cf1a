use std::{collections::HashSet, fmt};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Token standing for every discovered plugin not named elsewhere in the list.
pub const WILDCARD: &str = "all";

/// One entry of the plugin selection list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum PluginRef {
    Named(String),
    All,
}

impl PluginRef {
    pub fn name(&self) -> Option<&str> {
        match self {
            PluginRef::Named(name) => Some(name),
            PluginRef::All => None,
        }
    }
}

impl From<String> for PluginRef {
    fn from(value: String) -> Self {
        if value == WILDCARD {
            PluginRef::All
        } else {
            PluginRef::Named(value)
        }
    }
}

impl From<&str> for PluginRef {
    fn from(value: &str) -> Self {
        PluginRef::from(value.to_string())
    }
}

impl From<PluginRef> for String {
    fn from(value: PluginRef) -> Self {
        match value {
            PluginRef::Named(name) => name,
            PluginRef::All => WILDCARD.to_string(),
        }
    }
}

impl fmt::Display for PluginRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PluginRef::Named(name) => f.write_str(name),
            PluginRef::All => f.write_str(WILDCARD),
        }
    }
}

/// Builds a selection list from anything string-like.
pub fn selection<I, S>(names: I) -> Vec<PluginRef>
where
    I: IntoIterator<Item = S>,
    S: Into<PluginRef>,
{
    names.into_iter().map(Into::into).collect()
}

/// Rejects lists the locator cannot order unambiguously: more than one
/// wildcard, or the same name listed twice.
pub fn validate_selection(selection: &[PluginRef]) -> Result<(), ConfigError> {
    let wildcards = selection
        .iter()
        .filter(|entry| matches!(entry, PluginRef::All))
        .count();
    if wildcards > 1 {
        return Err(ConfigError::RepeatedWildcard);
    }

    let mut seen = HashSet::new();
    for name in selection.iter().filter_map(PluginRef::name) {
        if !seen.insert(name) {
            return Err(ConfigError::DuplicatePlugin(name.to_string()));
        }
    }

    Ok(())
}
