use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::paths;

/// Root configuration structure for shx.json
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ShxConfig {
    #[serde(default)]
    pub defaults: Defaults,
}

/// All configurable defaults that can be overridden via shx.json
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Defaults {
    #[serde(default)]
    pub dialog: DialogConfig,

    #[serde(default)]
    pub session: SessionConfig,
}

/// Which native dialog helper `popup` drives
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DialogConfig {
    #[serde(default = "default_dialog_backend")]
    pub backend: String,
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            backend: default_dialog_backend(),
        }
    }
}

/// How `reload` decides whether it may restart, and what it starts
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionConfig {
    /// Shell program to start. Falls back to $SHELL (or %COMSPEC%) when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shell: Option<String>,

    #[serde(default = "default_shell_args")]
    pub args: Vec<String>,

    /// `NAME` or `NAME=value` environment entries that mark an embedded host.
    #[serde(default = "default_embedded_markers")]
    pub embedded_markers: Vec<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            shell: None,
            args: default_shell_args(),
            embedded_markers: default_embedded_markers(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_dialog_backend() -> String {
    "auto".to_string()
}

fn default_shell_args() -> Vec<String> {
    if cfg!(windows) {
        Vec::new()
    } else {
        vec!["-l".to_string()]
    }
}

fn default_embedded_markers() -> Vec<String> {
    vec![
        "INSIDE_EMACS".to_string(),
        "VSCODE_PID".to_string(),
        "TERM_PROGRAM=vscode".to_string(),
    ]
}

// =============================================================================
// Loading functions
// =============================================================================

/// Load defaults, merging file config with built-in defaults.
/// If shx.json is missing or invalid, silently returns built-in defaults.
pub fn load_defaults() -> Defaults {
    load_config().defaults
}

/// Load the full shx.json config, falling back to defaults on any error.
pub fn load_config() -> ShxConfig {
    paths::shx_json()
        .and_then(|path| load_config_from(&path))
        .unwrap_or_default()
}

/// Load config from a specific file.
pub fn load_config_from(path: &Path) -> crate::Result<ShxConfig> {
    if !path.exists() {
        return Err(crate::Error::other(format!(
            "{} not found",
            path.display()
        )));
    }

    let content = fs::read_to_string(path).map_err(|e| {
        crate::Error::internal_io(e.to_string(), Some(format!("read {}", path.display())))
    })?;

    serde_json::from_str(&content)
        .map_err(|e| crate::Error::config_invalid_json(path.display().to_string(), e))
}

/// Save config to shx.json file (creates if missing).
pub fn save_config(config: &ShxConfig) -> crate::Result<()> {
    save_config_to(&paths::shx_json()?, config)
}

pub fn save_config_to(path: &Path, config: &ShxConfig) -> crate::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            crate::Error::internal_io(e.to_string(), Some(format!("create {}", parent.display())))
        })?;
    }

    let content = serde_json::to_string_pretty(config).map_err(|e| {
        crate::Error::internal_json(e.to_string(), Some("serialize shx.json".to_string()))
    })?;

    fs::write(path, content).map_err(|e| {
        crate::Error::internal_io(e.to_string(), Some(format!("write {}", path.display())))
    })?;

    Ok(())
}

/// Check if shx.json file exists
pub fn config_exists() -> bool {
    paths::shx_json().map(|p| p.exists()).unwrap_or(false)
}

/// Delete shx.json file (reset to defaults)
pub fn reset_config() -> crate::Result<bool> {
    let path = paths::shx_json()?;

    if path.exists() {
        fs::remove_file(&path).map_err(|e| {
            crate::Error::internal_io(e.to_string(), Some(format!("delete {}", path.display())))
        })?;
        Ok(true)
    } else {
        Ok(false)
    }
}

/// Get the path to shx.json (for display purposes)
pub fn config_path() -> crate::Result<String> {
    Ok(paths::shx_json()?.display().to_string())
}

/// Get built-in defaults (ignoring any file config)
pub fn builtin_defaults() -> Defaults {
    Defaults::default()
}
