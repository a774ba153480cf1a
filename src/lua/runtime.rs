use mlua::{Lua, LuaOptions, StdLib, Table};

use crate::lua::stdlib::register_boot_stdlib;

/// Creates the script runtime environment, initializer, plugin and class
/// files are evaluated in.
///
/// Scripts get the safe standard library minus `os.exit` and `os.execute`,
/// plus the `boot` table bridging to the process-wide registry.
pub fn create_lua_vm() -> mlua::Result<Lua> {
    let lua = Lua::new_with(StdLib::ALL_SAFE, LuaOptions::default())?;

    let os_table: Table = lua.globals().get("os")?;

    os_table.raw_remove("exit")?;

    os_table.raw_remove("execute")?;

    register_boot_stdlib(&lua)?;

    lua.globals().set("os", os_table)?;

    Ok(lua)
}
