mod bridge;
mod runtime;
mod stdlib;

pub use bridge::{evaluate_file, vec_string_to_lua_table};
pub use runtime::create_lua_vm;
pub use stdlib::{BOOT_TABLE, expose_configuration, expose_plugin};
