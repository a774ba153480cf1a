use anyhow::{Context, Result};
use mlua::{Lua, Table};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{error::BootError, lua::stdlib::UndefinedSuperclass};

pub fn vec_string_to_lua_table(lua: &Lua, items: &[String], function_key: &str) -> Result<Table> {
    let table = lua.create_table().with_context(|| {
        format!(
            "Failed to create Lua table for lua function: {}",
            function_key
        )
    })?;

    for (i, item) in items.iter().enumerate() {
        table.set(i + 1, item.as_str()).with_context(|| {
            format!(
                "Failed to set table entry for lua function {} at index {}",
                function_key, i
            )
        })?;
    }

    Ok(table)
}

pub(crate) fn paths_to_lua_table(lua: &Lua, paths: &[PathBuf]) -> Result<Table> {
    let items: Vec<String> = paths
        .iter()
        .map(|path| path.to_string_lossy().into_owned())
        .collect();
    vec_string_to_lua_table(lua, &items, "load_path")
}

/// Evaluates the Lua file at `path`.
///
/// A failure caused by `boot.define_class` naming an undefined superclass is
/// reported as [`BootError::MissingConstant`]; anything else as
/// [`BootError::Script`]. A `define_class` failure the script caught itself
/// does not count.
pub fn evaluate_file(lua: &Lua, path: &Path) -> Result<(), BootError> {
    let contents = fs::read_to_string(path).map_err(|source| BootError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let outcome = lua
        .load(contents.as_str())
        .set_name(path.to_string_lossy().into_owned())
        .exec();

    let Err(source) = outcome else {
        return Ok(());
    };

    match undefined_superclass(&source) {
        Some(name) => Err(BootError::MissingConstant {
            name,
            file: path.to_path_buf(),
        }),
        None => Err(BootError::Script {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn undefined_superclass(error: &mlua::Error) -> Option<String> {
    match error {
        mlua::Error::CallbackError { cause, .. } | mlua::Error::WithContext { cause, .. } => {
            undefined_superclass(cause)
        }
        mlua::Error::ExternalError(source) => source
            .downcast_ref::<UndefinedSuperclass>()
            .map(|undefined| undefined.0.clone()),
        _ => None,
    }
}
