//! Native dialog backends for [`DialogService`].
//!
//! Each backend drives a helper program that ships with the desktop:
//! `osascript` on macOS, PowerShell's WinForms `MessageBox` on Windows,
//! `zenity` or `kdialog` elsewhere. Every backend reports the same raw codes
//! (1 = OK, 2 = Cancel) so [`PopupResult::from_code`](crate::popup::PopupResult::from_code)
//! can map them uniformly.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::defaults::{self, DialogConfig};
use crate::error::{Error, Result};
use crate::popup::{ButtonLayout, DialogService, CODE_CANCEL, CODE_OK};
use crate::utils::command;
use crate::utils::shell::{quote_applescript, quote_powershell};

const CAPABILITY: &str = "native dialog service";

/// osascript reports "User canceled. (-128)" when Cancel is pressed.
const APPLESCRIPT_USER_CANCELED: &str = "-128";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogBackend {
    Zenity,
    Kdialog,
    Osascript,
    Powershell,
}

impl DialogBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            DialogBackend::Zenity => "zenity",
            DialogBackend::Kdialog => "kdialog",
            DialogBackend::Osascript => "osascript",
            DialogBackend::Powershell => "powershell",
        }
    }

    /// Parse a configured backend name. `auto` yields `None`.
    pub fn from_name(name: &str) -> Result<Option<Self>> {
        match name.trim().to_ascii_lowercase().as_str() {
            "auto" | "" => Ok(None),
            "zenity" => Ok(Some(DialogBackend::Zenity)),
            "kdialog" => Ok(Some(DialogBackend::Kdialog)),
            "osascript" => Ok(Some(DialogBackend::Osascript)),
            "powershell" | "pwsh" => Ok(Some(DialogBackend::Powershell)),
            other => Err(Error::config_invalid_value(
                "defaults.dialog.backend",
                Some(other.to_string()),
                "Expected one of: auto, zenity, kdialog, osascript, powershell",
            )),
        }
    }

    /// Backends tried by `auto`, in order, for the compile target.
    pub fn platform_candidates() -> &'static [DialogBackend] {
        if cfg!(target_os = "macos") {
            &[DialogBackend::Osascript]
        } else if cfg!(windows) {
            &[DialogBackend::Powershell]
        } else {
            &[DialogBackend::Zenity, DialogBackend::Kdialog]
        }
    }

    fn program_names(&self) -> &'static [&'static str] {
        match self {
            DialogBackend::Zenity => &["zenity"],
            DialogBackend::Kdialog => &["kdialog"],
            DialogBackend::Osascript => &["osascript"],
            DialogBackend::Powershell => &["powershell", "pwsh"],
        }
    }

    /// X11/Wayland helpers fail late (and look like Cancel) without a display.
    fn needs_display(&self) -> bool {
        matches!(self, DialogBackend::Zenity | DialogBackend::Kdialog)
    }

    pub fn args(&self, message: &str, title: &str, layout: ButtonLayout) -> Vec<String> {
        match self {
            DialogBackend::Zenity => {
                let mut args = match layout {
                    ButtonLayout::Ok => vec!["--info".to_string()],
                    ButtonLayout::OkCancel => vec![
                        "--question".to_string(),
                        "--ok-label=OK".to_string(),
                        "--cancel-label=Cancel".to_string(),
                    ],
                };
                args.push(format!("--title={}", title));
                args.push(format!("--text={}", message));
                args.push("--no-markup".to_string());
                args
            }
            DialogBackend::Kdialog => {
                let mut args = vec!["--title".to_string(), title.to_string()];
                match layout {
                    ButtonLayout::Ok => {
                        args.push("--msgbox".to_string());
                        args.push(message.to_string());
                    }
                    ButtonLayout::OkCancel => {
                        args.push("--warningcontinuecancel".to_string());
                        args.push(message.to_string());
                        args.push("--continue-label".to_string());
                        args.push("OK".to_string());
                    }
                }
                args
            }
            DialogBackend::Osascript => {
                let buttons = match layout {
                    ButtonLayout::Ok => {
                        "buttons {\"OK\"} default button \"OK\"".to_string()
                    }
                    ButtonLayout::OkCancel => {
                        "buttons {\"Cancel\", \"OK\"} default button \"OK\" cancel button \"Cancel\""
                            .to_string()
                    }
                };
                let script = format!(
                    "display dialog {} with title {} {}",
                    quote_applescript(message),
                    quote_applescript(title),
                    buttons
                );
                vec!["-e".to_string(), script]
            }
            DialogBackend::Powershell => {
                let buttons = match layout {
                    ButtonLayout::Ok => "OK",
                    ButtonLayout::OkCancel => "OKCancel",
                };
                let script = format!(
                    "Add-Type -AssemblyName System.Windows.Forms; \
                     [int][System.Windows.Forms.MessageBox]::Show({}, {}, '{}')",
                    quote_powershell(message),
                    quote_powershell(title),
                    buttons
                );
                vec![
                    "-NoProfile".to_string(),
                    "-NonInteractive".to_string(),
                    "-Command".to_string(),
                    script,
                ]
            }
        }
    }

    /// Translate how the helper exited into a raw dialog code.
    ///
    /// `None` means the helper failed rather than reporting a button.
    pub fn raw_code(
        &self,
        layout: ButtonLayout,
        exit_code: Option<i32>,
        stdout: &str,
        stderr: &str,
    ) -> Option<i32> {
        let exit_code = exit_code?;
        match self {
            // zenity: 0 OK, 1 Cancel or window closed, 5 timeout, -1 error.
            DialogBackend::Zenity => match (layout, exit_code) {
                (_, 0) => Some(CODE_OK),
                // Closing a single-button dialog is acknowledgement.
                (ButtonLayout::Ok, 1) => Some(CODE_OK),
                (ButtonLayout::OkCancel, 1 | 5) => Some(CODE_CANCEL),
                _ => None,
            },
            // kdialog: 0 OK or Continue, 2 Cancel, 1 error.
            DialogBackend::Kdialog => match (layout, exit_code) {
                (_, 0) => Some(CODE_OK),
                (ButtonLayout::OkCancel, 2) => Some(CODE_CANCEL),
                _ => None,
            },
            DialogBackend::Osascript => match exit_code {
                0 => Some(CODE_OK),
                1 if layout.has_cancel() && stderr.contains(APPLESCRIPT_USER_CANCELED) => {
                    Some(CODE_CANCEL)
                }
                _ => None,
            },
            DialogBackend::Powershell => match exit_code {
                0 => stdout.split_whitespace().next()?.parse().ok(),
                _ => None,
            },
        }
    }
}

/// The production [`DialogService`]: one located helper program.
#[derive(Debug, Clone)]
pub struct NativeDialog {
    backend: DialogBackend,
    program: PathBuf,
}

impl NativeDialog {
    pub fn new(backend: DialogBackend, program: impl Into<PathBuf>) -> Self {
        Self {
            backend,
            program: program.into(),
        }
    }

    pub fn backend(&self) -> DialogBackend {
        self.backend
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Locate a backend using the configured preference from shx.json.
    pub fn from_defaults() -> Result<Self> {
        Self::detect(&defaults::load_defaults().dialog)
    }

    /// Locate a backend on `PATH`.
    pub fn detect(config: &DialogConfig) -> Result<Self> {
        Self::detect_with(config, |name| which::which(name).ok(), display_available())
    }

    /// Detection with an injected program lookup and display check.
    pub fn detect_with<F>(config: &DialogConfig, lookup: F, has_display: bool) -> Result<Self>
    where
        F: Fn(&str) -> Option<PathBuf>,
    {
        let candidates: Vec<DialogBackend> = match DialogBackend::from_name(&config.backend)? {
            Some(backend) => vec![backend],
            None => DialogBackend::platform_candidates().to_vec(),
        };

        let mut tried = Vec::new();
        for backend in candidates {
            if backend.needs_display() && !has_display {
                tried.push(format!("{} (no display)", backend.as_str()));
                continue;
            }

            for name in backend.program_names() {
                if let Some(program) = lookup(name) {
                    log_status!("popup", "Using {} at {}", backend.as_str(), program.display());
                    return Ok(Self::new(backend, program));
                }
                tried.push((*name).to_string());
            }
        }

        Err(Error::capability_unavailable(CAPABILITY, tried))
    }
}

impl DialogService for NativeDialog {
    fn show(&self, message: &str, title: &str, layout: ButtonLayout) -> Result<i32> {
        let program = self.program.display().to_string();

        let output = Command::new(&self.program)
            .args(self.backend.args(message, title, layout))
            .output()
            .map_err(|e| Error::dialog_failed(&program, None, e.to_string()))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        self.backend
            .raw_code(layout, output.status.code(), &stdout, &stderr)
            .ok_or_else(|| {
                Error::dialog_failed(&program, output.status.code(), command::error_text(&output))
            })
    }
}

#[cfg(all(unix, not(target_os = "macos")))]
fn display_available() -> bool {
    ["DISPLAY", "WAYLAND_DISPLAY"]
        .iter()
        .any(|var| std::env::var_os(var).is_some_and(|v| !v.is_empty()))
}

#[cfg(not(all(unix, not(target_os = "macos"))))]
fn display_available() -> bool {
    true
}
