use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::{
    configs::{LOCALES_DIR, locale_files_in},
    error::BootResult,
};

/// A self-contained code unit discovered under a plugin search path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Plugin {
    pub name: String,
    pub directory: PathBuf,
}

impl Plugin {
    pub const LIB_DIR: &str = "lib";
    pub const APP_DIR: &str = "app";
    pub const INIT_FILE: &str = "init.lua";
    const ENGINE_LOAD_DIRS: [&str; 3] = ["app/models", "app/controllers", "app/helpers"];

    /// Builds a plugin from `directory` when it looks like one: a directory
    /// with a `lib/` or `app/` directory or an `init.lua` file.
    pub fn from_directory(directory: &Path) -> Option<Self> {
        if !directory.is_dir() {
            return None;
        }

        let is_plugin = directory.join(Self::LIB_DIR).is_dir()
            || directory.join(Self::APP_DIR).is_dir()
            || directory.join(Self::INIT_FILE).is_file();
        if !is_plugin {
            return None;
        }

        let name = directory.file_name()?.to_str()?.to_string();
        Some(Self {
            name,
            directory: directory.to_path_buf(),
        })
    }

    /// Engines ship an `app/` directory of their own.
    pub fn is_engine(&self) -> bool {
        self.directory.join(Self::APP_DIR).is_dir()
    }

    pub fn lib_directory(&self) -> PathBuf {
        self.directory.join(Self::LIB_DIR)
    }

    pub fn init_file(&self) -> Option<PathBuf> {
        let init = self.directory.join(Self::INIT_FILE);
        init.is_file().then_some(init)
    }

    /// Existing directories this plugin contributes to the search path.
    pub fn load_paths(&self) -> Vec<PathBuf> {
        let mut paths = Vec::new();

        let lib = self.lib_directory();
        if lib.is_dir() {
            paths.push(lib);
        }

        if self.is_engine() {
            paths.extend(
                Self::ENGINE_LOAD_DIRS
                    .iter()
                    .map(|dir| self.directory.join(dir))
                    .filter(|dir| dir.is_dir()),
            );
        }

        paths
    }

    pub fn locale_files(&self) -> BootResult<Vec<PathBuf>> {
        locale_files_in(&self.directory.join(LOCALES_DIR))
    }
}
