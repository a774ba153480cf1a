use mlua::{Error as LuaError, Lua, Result as LuaResult, Table as LuaTable};
use std::path::PathBuf;
use thiserror::Error;

use crate::{
    configs::Configuration,
    lua::{bridge::paths_to_lua_table, vec_string_to_lua_table},
    plugins::Plugin,
    registry,
};

pub const BOOT_TABLE: &str = "boot";

/// Raised by `boot.define_class` when the superclass is not defined yet.
#[derive(Error, Debug)]
#[error("uninitialized constant {0}")]
pub struct UndefinedSuperclass(pub String);

pub fn register_boot_stdlib(lua: &Lua) -> LuaResult<()> {
    let boot_table = lua.create_table()?;

    // define_class(name, superclass?): the superclass must already be defined.
    let define_class_fn =
        lua.create_function(|_, (name, superclass): (String, Option<String>)| {
            if let Some(parent) = &superclass
                && !registry::is_class_defined(parent)
            {
                return Err(LuaError::external(UndefinedSuperclass(parent.clone())));
            }

            registry::with(|registry| registry.classes.insert(name, superclass));
            Ok(())
        })?;
    boot_table.set("define_class", define_class_fn)?;

    let is_defined_fn = lua.create_function(|_, name: String| Ok(registry::is_class_defined(&name)))?;
    boot_table.set("is_defined", is_defined_fn)?;

    let add_load_path_fn = lua.create_function(|_, path: String| {
        Ok(registry::with(|registry| {
            registry.load_path.append(PathBuf::from(path))
        }))
    })?;
    boot_table.set("add_load_path", add_load_path_fn)?;

    let load_path_fn = lua.create_function(|lua_ctx, ()| {
        paths_to_lua_table(lua_ctx, &registry::load_path()).map_err(LuaError::external)
    })?;
    boot_table.set("load_path", load_path_fn)?;

    lua.globals().set(BOOT_TABLE, boot_table)?;
    Ok(())
}

/// Publishes the read-only view of the configuration scripts see as
/// `boot.root`, `boot.env` and `boot.frameworks`.
pub fn expose_configuration(lua: &Lua, config: &Configuration) -> LuaResult<()> {
    let boot_table: LuaTable = lua.globals().get(BOOT_TABLE)?;

    boot_table.set("root", config.root_path.to_string_lossy().into_owned())?;
    boot_table.set("env", config.environment.as_str())?;

    let frameworks: Vec<String> = config.frameworks.iter().cloned().collect();
    let frameworks_table =
        vec_string_to_lua_table(lua, &frameworks, "frameworks").map_err(LuaError::external)?;
    boot_table.set("frameworks", frameworks_table)?;

    Ok(())
}

/// Sets `boot.plugin` to the plugin whose `init.lua` is about to run, or
/// clears it.
pub fn expose_plugin(lua: &Lua, plugin: Option<&Plugin>) -> LuaResult<()> {
    let boot_table: LuaTable = lua.globals().get(BOOT_TABLE)?;

    match plugin {
        Some(plugin) => {
            let plugin_table = lua.create_table()?;
            plugin_table.set("name", plugin.name.as_str())?;
            plugin_table.set(
                "directory",
                plugin.directory.to_string_lossy().into_owned(),
            )?;
            boot_table.set("plugin", plugin_table)?;
        }
        None => boot_table.set("plugin", mlua::Value::Nil)?,
    }

    Ok(())
}
