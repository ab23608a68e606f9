use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, bail, Context, Result};
use directories::ProjectDirs;
use mlua::{Lua, LuaSerdeExt, Table, Value};
use tracing::{debug, warn};

use crate::{Config, UserOptions};

// Lua global the `setup{...}` helper stores its argument in.
const SETUP_SLOT: &str = "__orgtm_setup";

/// XDG: ~/.config/orgtm/config.lua  (also accept config.yaml / config.yml)
pub fn default_config_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("dev", "example", "orgtm")?;
    let base = proj.config_dir();
    let lua = base.join("config.lua");
    if lua.exists() {
        return Some(lua);
    }
    ["config.yaml", "config.yml"]
        .iter()
        .map(|name| base.join(name))
        .find(|p| p.exists())
        .or(Some(lua))
}

/// Try to load the user config; fall back to defaults on any error.
pub fn load_config_from_user() -> Config {
    let Some(path) = default_config_path().filter(|p| p.exists()) else {
        return Config::default();
    };
    match load_config_from_file(&path) {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to load config, using defaults");
            Config::default()
        }
    }
}

pub fn load_config_from_file(path: &Path) -> Result<Config> {
    let user = load_user_options(path)?;
    Config::new(user).with_context(|| format!("validating {:?}", path))
}

pub fn load_user_options(path: &Path) -> Result<UserOptions> {
    let src = fs::read_to_string(path).with_context(|| format!("reading {:?}", path))?;
    let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("lua");
    debug!(path = %path.display(), format = ext, "loading user options");
    match ext {
        "lua" => user_options_from_lua(&src),
        "yaml" | "yml" => serde_yaml::from_str(&src).with_context(|| format!("parsing {:?}", path)),
        "json" => serde_json::from_str(&src).with_context(|| format!("parsing {:?}", path)),
        other => bail!("unsupported config format '{other}' (use .lua, .yaml or .json)"),
    }
}

/// Evaluate a Lua config. The script may `return { ... }` or call `setup { ... }`.
pub fn user_options_from_lua(src: &str) -> Result<UserOptions> {
    // IMPORTANT: never bubble mlua::Error with `?` directly; map to string.
    let lua = Lua::new();
    let setup = lua
        .create_function(|lua, opts: Option<Table>| lua.globals().set(SETUP_SLOT, opts))
        .map_err(|e| anyhow!(e.to_string()))?;
    lua.globals()
        .set("setup", setup)
        .map_err(|e| anyhow!(e.to_string()))?;

    let returned = lua
        .load(src)
        .eval::<Value>()
        .map_err(|e| anyhow!(e.to_string()))?;

    let tbl = match returned {
        Value::Table(t) => Value::Table(t),
        _ => lua
            .globals()
            .get::<Value>(SETUP_SLOT)
            .map_err(|e| anyhow!(e.to_string()))?,
    };

    match tbl {
        Value::Table(_) => lua.from_value(tbl).map_err(|e| anyhow!(e.to_string())),
        // nothing configured
        _ => Ok(UserOptions::default()),
    }
}
