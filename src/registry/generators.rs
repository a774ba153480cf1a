use serde::Serialize;
use toml::Table;

use crate::configs::deep_merge;

/// Output mode of the shell generators write through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Shell {
    #[default]
    Color,
    Basic,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeneratorsRegistry {
    pub options: Table,
    pub aliases: Table,
    pub shell: Shell,
}

impl GeneratorsRegistry {
    pub fn set_options(&mut self, options: &Table) {
        deep_merge(&mut self.options, options);
    }

    pub fn set_aliases(&mut self, aliases: &Table) {
        deep_merge(&mut self.aliases, aliases);
    }

    pub fn no_color(&mut self) {
        self.shell = Shell::Basic;
    }
}
