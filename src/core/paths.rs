use crate::error::{Error, Result};
use std::env;
use std::path::PathBuf;

/// Environment variable overriding the config directory.
pub const CONFIG_DIR_ENV: &str = "SHX_CONFIG_DIR";

/// Base shx config directory (~/.config/shx/ on unix, %APPDATA%\shx on Windows)
pub fn shx() -> Result<PathBuf> {
    if let Some(dir) = env::var_os(CONFIG_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }

    #[cfg(windows)]
    {
        let appdata = env::var("APPDATA").map_err(|_| {
            Error::internal_unexpected("APPDATA environment variable not set on Windows")
        })?;
        Ok(PathBuf::from(appdata).join("shx"))
    }

    #[cfg(not(windows))]
    {
        let home = env::var("HOME").map_err(|_| {
            Error::internal_unexpected("HOME environment variable not set on Unix-like system")
        })?;
        Ok(PathBuf::from(home).join(".config").join("shx"))
    }
}

/// Global shx.json config file path
pub fn shx_json() -> Result<PathBuf> {
    Ok(shx()?.join("shx.json"))
}
