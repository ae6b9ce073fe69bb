//! The four helpers and the config layer they read.
//!
//! - `confirm` - yes/no prompt with a tri-state answer
//! - `popup` - modal popup facade over a [`popup::DialogService`]
//! - `dialog` - native dialog helper programs
//! - `timestamp` - local ISO-8601 timestamps
//! - `session` - restart the interactive shell

pub mod confirm;
pub mod dialog;
pub mod popup;
pub mod session;
pub mod timestamp;

pub mod config;
pub mod defaults;
pub mod error;
pub mod paths;

pub use error::{Error, ErrorCode, Result};
