use std::{
    fs,
    path::{Path, PathBuf},
};

use indexmap::IndexSet;
use mlua::Lua;

use crate::{
    error::{BootError, BootResult},
    lua::evaluate_file,
    registry,
};

const SOURCE_EXTENSION: &str = "lua";

/// Evaluates every `.lua` file under `dirs` that has not been loaded yet.
///
/// Files are visited in sorted order per directory. A file that defines a
/// class whose superclass is not loaded yet is deferred and retried after the
/// rest, so subclasses may sort before their parents. Loading fails with the
/// first outstanding [`BootError::MissingConstant`] once a whole pass makes no
/// progress.
///
/// Returns the number of files evaluated.
pub fn eager_load(lua: &Lua, dirs: &[PathBuf]) -> BootResult<usize> {
    let mut pending = IndexSet::new();
    for dir in dirs {
        collect_sources(dir, &mut pending)?;
    }
    pending.retain(|file| !registry::with(|registry| registry.loaded_files.contains(file)));

    let mut loaded = 0;
    while !pending.is_empty() {
        let before = pending.len();
        let mut deferred = IndexSet::new();
        let mut first_missing = None;

        for file in pending {
            match evaluate_file(lua, &file) {
                Ok(()) => {
                    tracing::debug!("Eager loaded {}", file.display());
                    registry::with(|registry| registry.loaded_files.insert(file));
                    loaded += 1;
                }
                Err(error @ BootError::MissingConstant { .. }) => {
                    tracing::debug!("Deferring {}: {}", file.display(), error);
                    deferred.insert(file);
                    first_missing.get_or_insert(error);
                }
                Err(error) => return Err(error),
            }
        }

        if deferred.len() == before
            && let Some(error) = first_missing
        {
            return Err(error);
        }
        pending = deferred;
    }

    Ok(loaded)
}

fn collect_sources(dir: &Path, sources: &mut IndexSet<PathBuf>) -> BootResult<()> {
    if !dir.is_dir() {
        return Ok(());
    }

    let read_error = |source| BootError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut entries: Vec<_> = fs::read_dir(dir)
        .map_err(read_error)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(read_error)?;
    entries.sort_by_key(|entry| entry.path());

    for entry in entries {
        let path = entry.path();
        if path.is_dir() {
            collect_sources(&path, sources)?;
        } else if path
            .extension()
            .is_some_and(|extension| extension == SOURCE_EXTENSION)
        {
            sources.insert(path);
        }
    }
    Ok(())
}
