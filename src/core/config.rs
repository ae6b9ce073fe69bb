//! JSON pointer edits against `shx.json`.
//!
//! Edits go through `serde_json::Value` and back into [`ShxConfig`], so a
//! pointer that produces an invalid shape is rejected before anything is saved.

use serde_json::{Map, Value};

use crate::defaults::ShxConfig;
use crate::error::{Error, Result};

/// Set `value` at `pointer` and return the re-typed config.
pub fn set_config_value(config: &ShxConfig, pointer: &str, value: Value) -> Result<ShxConfig> {
    let mut json = to_value(config)?;
    set_json_pointer(&mut json, pointer, value)?;
    from_value(json)
}

/// Remove the value at `pointer`; serde defaults fill it back in.
pub fn remove_config_value(config: &ShxConfig, pointer: &str) -> Result<ShxConfig> {
    let mut json = to_value(config)?;
    remove_json_pointer(&mut json, pointer)?;
    from_value(json)
}

/// Parse a CLI value: JSON literal first, bare string otherwise.
pub fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn to_value(config: &ShxConfig) -> Result<Value> {
    serde_json::to_value(config)
        .map_err(|e| Error::internal_json(e.to_string(), Some("serialize config".to_string())))
}

fn from_value(json: Value) -> Result<ShxConfig> {
    serde_json::from_value(json)
        .map_err(|e| Error::validation_invalid_json(e, Some("deserialize config".to_string())))
}

pub(crate) fn set_json_pointer(root: &mut Value, pointer: &str, new_value: Value) -> Result<()> {
    let (parent_ptr, token) = split_pointer(pointer)?;

    let mut current = root;
    for segment in parent_ptr.split('/').skip(1).map(unescape_token) {
        if current.is_null() {
            *current = Value::Object(Map::new());
        }
        current = match current {
            Value::Object(map) => map
                .entry(segment)
                .or_insert_with(|| Value::Object(Map::new())),
            other => {
                return Err(Error::config_invalid_value(
                    pointer,
                    Some(value_type_name(other).to_string()),
                    "Expected object at pointer",
                ))
            }
        };
    }

    if current.is_null() {
        *current = Value::Object(Map::new());
    }

    match current {
        Value::Object(map) => {
            map.insert(token, new_value);
            Ok(())
        }
        Value::Array(arr) => {
            let index = parse_index(&token, arr.len())?;
            arr[index] = new_value;
            Ok(())
        }
        other => Err(Error::config_invalid_value(
            pointer,
            Some(value_type_name(other).to_string()),
            "Cannot set child on non-container",
        )),
    }
}

pub(crate) fn remove_json_pointer(root: &mut Value, pointer: &str) -> Result<()> {
    let (parent_ptr, token) = split_pointer(pointer)?;

    let Some(parent) = root.pointer_mut(&parent_ptr) else {
        return Err(Error::validation_invalid_argument(
            "pointer",
            format!("JSON pointer parent path not found: {}", parent_ptr),
            None,
        ));
    };

    match parent {
        Value::Object(map) => {
            map.remove(&token);
            Ok(())
        }
        Value::Array(arr) => {
            let index = parse_index(&token, arr.len())?;
            arr.remove(index);
            Ok(())
        }
        other => Err(Error::config_invalid_value(
            pointer,
            Some(value_type_name(other).to_string()),
            "Cannot remove child on non-container",
        )),
    }
}

/// Split `/a/b/c` into (`/a/b`, `c`). The root pointer is not editable.
fn split_pointer(pointer: &str) -> Result<(String, String)> {
    if !pointer.starts_with('/') || pointer == "/" {
        return Err(Error::validation_invalid_argument(
            "pointer",
            format!("JSON pointer must start with '/' and name a key: {}", pointer),
            Some(pointer.to_string()),
        ));
    }

    let (parent, token) = pointer.rsplit_once('/').unwrap_or(("", pointer));
    Ok((parent.to_string(), unescape_token(token)))
}

fn parse_index(token: &str, len: usize) -> Result<usize> {
    match token.parse::<usize>() {
        Ok(index) if index < len => Ok(index),
        Ok(index) => Err(Error::config_invalid_value(
            "arrayIndex",
            Some(index.to_string()),
            "Array index out of bounds",
        )),
        Err(_) => Err(Error::validation_invalid_argument(
            "arrayIndex",
            "Invalid array index token",
            Some(token.to_string()),
        )),
    }
}

fn unescape_token(token: &str) -> String {
    token.replace("~1", "/").replace("~0", "~")
}

fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
