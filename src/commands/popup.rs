use clap::Args;
use serde::Serialize;

use shx::defaults::DialogConfig;
use shx::dialog::NativeDialog;
use shx::popup::{self, PopupResult};

use crate::commands::{CmdResult, GlobalArgs};

#[derive(Args)]
pub struct PopupArgs {
    /// Message to display
    pub message: String,

    /// Window title
    pub title: String,

    /// Offer a Cancel button next to OK
    #[arg(short, long)]
    pub cancel: bool,

    /// Dialog helper to use (auto|zenity|kdialog|osascript|powershell), overriding shx.json
    #[arg(long)]
    pub backend: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PopupOutput {
    pub command: String,
    /// `ok`, `cancel`, or `other` for an unrecognized host code
    pub result: String,
    /// Raw code reported by the dialog helper
    pub code: i32,
    pub backend: String,
}

pub fn run(args: PopupArgs, _global: &GlobalArgs) -> CmdResult<PopupOutput> {
    let dialog = match args.backend {
        Some(backend) => NativeDialog::detect(&DialogConfig { backend })?,
        None => NativeDialog::from_defaults()?,
    };

    crate::tty::status("Waiting for the popup to be dismissed...");
    let result = popup::show_popup(&dialog, &args.message, &args.title, args.cancel)?;

    Ok((
        PopupOutput {
            command: "popup".to_string(),
            result: result.as_str().to_string(),
            code: result.code(),
            backend: dialog.backend().as_str().to_string(),
        },
        exit_code(result),
    ))
}

pub fn exit_code(result: PopupResult) -> i32 {
    match result {
        PopupResult::Ok => 0,
        PopupResult::Cancel => 1,
        PopupResult::Other(_) => 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancel_is_a_falsy_exit() {
        assert_eq!(exit_code(PopupResult::Ok), 0);
        assert_eq!(exit_code(PopupResult::Cancel), 1);
        assert_eq!(exit_code(PopupResult::Other(-1)), 3);
    }
}
