//! Generic utility primitives with zero domain knowledge.
//!
//! - `command` - Command output inspection
//! - `shell` - String quoting for helper scripts

pub mod command;
pub mod shell;
