use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{configs::sorted_entries, error::BootResult};

pub const LOCALES_DIR: &str = "config/locales";
pub const LOCALE_EXTENSIONS: [&str; 3] = ["yml", "rb", "lua"];

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct I18nConfig {
    /// Paths pushed explicitly by the application, in push order.
    #[serde(rename = "load_path")]
    pub appended: Vec<PathBuf>,
    pub default_locale: String,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            appended: Vec::new(),
            default_locale: "en".to_string(),
        }
    }
}

impl I18nConfig {
    pub fn push(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.appended.push(path.into());
        self
    }

    /// Locale files found under `<root>/config/locales`, followed by the
    /// appended paths. Computed on every call.
    pub fn load_path(&self, root: &Path) -> BootResult<Vec<PathBuf>> {
        let mut paths = locale_files_in(&root.join(LOCALES_DIR))?;
        paths.extend(self.appended.iter().cloned());
        Ok(paths)
    }
}

/// Sorted locale files directly inside `dir`. A missing directory yields
/// nothing.
pub fn locale_files_in(dir: &Path) -> BootResult<Vec<PathBuf>> {
    let files = sorted_entries(dir)?
        .into_iter()
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| LOCALE_EXTENSIONS.contains(&ext))
        })
        .collect();
    Ok(files)
}
