use std::path::PathBuf;

use indexmap::IndexSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Localization {
    load_path: IndexSet<PathBuf>,
    pub default_locale: String,
}

impl Default for Localization {
    fn default() -> Self {
        Self {
            load_path: IndexSet::new(),
            default_locale: "en".to_string(),
        }
    }
}

impl Localization {
    /// Appends locale files not yet registered, keeping their order.
    pub fn set_load_path<I>(&mut self, paths: I)
    where
        I: IntoIterator<Item = PathBuf>,
    {
        self.load_path.extend(paths);
    }

    pub fn set_default_locale(&mut self, locale: &str) {
        self.default_locale = locale.to_string();
    }

    pub fn load_path(&self) -> Vec<PathBuf> {
        self.load_path.iter().cloned().collect()
    }
}
