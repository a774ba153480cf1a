use serde::{Deserialize, Serialize};
use toml::{Table, Value};

use crate::configs::merge::merge_namespace;

/// Namespace that holds the application-wide generator choices (`orm`,
/// `test_framework`, ...).
pub const DEFAULT_NAMESPACE: &str = "rails";

const ALIASES_KEY: &str = "aliases";

/// Generator settings collected at configuration time and published to the
/// generators registry by `initialize_generators`.
///
/// Both maps are keyed by generator namespace. Configuring the same namespace
/// twice merges the settings key by key.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorsConfig {
    pub options: Table,
    pub aliases: Table,
    pub colorize_logging: bool,
}

impl Default for GeneratorsConfig {
    fn default() -> Self {
        Self {
            options: Table::new(),
            aliases: Table::new(),
            colorize_logging: true,
        }
    }
}

impl GeneratorsConfig {
    /// Sets an application-wide choice, e.g. `set("orm", "datamapper")`.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> &mut Self {
        let mut setting = Table::new();
        setting.insert(key.to_string(), value.into());
        merge_namespace(&mut self.options, DEFAULT_NAMESPACE, &setting);
        self
    }

    /// Sets an application-wide choice and configures the chosen generator
    /// in the same call: `set_with("orm", "datamapper", {migration = false})`
    /// stores `rails.orm = "datamapper"` and `datamapper.migration = false`.
    pub fn set_with(&mut self, key: &str, value: &str, settings: Table) -> &mut Self {
        self.set(key, value);
        self.configure(value, settings)
    }

    /// Configures a generator namespace. An `aliases` sub-table is routed to
    /// [`GeneratorsConfig::aliases`]; every other key lands in the options.
    pub fn configure(&mut self, namespace: &str, mut settings: Table) -> &mut Self {
        if let Some(aliases) = settings.remove(ALIASES_KEY) {
            match aliases {
                Value::Table(aliases) => merge_namespace(&mut self.aliases, namespace, &aliases),
                other => {
                    tracing::warn!(
                        "Ignoring non-table aliases for generator namespace '{}': {}",
                        namespace,
                        other
                    );
                }
            }
        }

        if !settings.is_empty() {
            merge_namespace(&mut self.options, namespace, &settings);
        }
        self
    }

    pub fn namespace_options(&self, namespace: &str) -> Option<&Table> {
        self.options.get(namespace).and_then(Value::as_table)
    }

    pub fn namespace_aliases(&self, namespace: &str) -> Option<&Table> {
        self.aliases.get(namespace).and_then(Value::as_table)
    }
}
