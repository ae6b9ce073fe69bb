use std::cell::Cell;
use std::io::Cursor;

use shx::confirm::{self, DEFAULT_PROMPT};
use shx::defaults;
use shx::dialog::NativeDialog;
use shx::popup::{self, ButtonLayout, DialogService, PopupResult};
use shx::session::{self, RestartOutcome, SessionContext, SessionLauncher, ShellCommand};
use shx::timestamp;
use shx::{config, paths, ErrorCode, Result};

fn ask(prompt: Option<&str>, reply: &str) -> (Option<bool>, String) {
    let mut input = Cursor::new(reply.as_bytes().to_vec());
    let mut shown = Vec::new();
    let answer = confirm::confirm(prompt, &mut input, &mut shown).unwrap();
    (answer, String::from_utf8(shown).unwrap())
}

#[test]
fn confirm_scenarios() {
    assert_eq!(ask(None, "Y\n"), (Some(true), DEFAULT_PROMPT.to_string()));
    assert_eq!(ask(Some("Eat?"), "nope\n"), (None, "Eat?".to_string()));
    assert_eq!(ask(Some("Eat?"), "\n").0, None);
    assert_eq!(ask(Some("Eat?"), " No \n").0, Some(false));
}

/// Acknowledges with the lone button, or presses the configured one.
struct ClickingDialog {
    cancel: bool,
    offered_cancel: Cell<Option<bool>>,
}

impl DialogService for ClickingDialog {
    fn show(&self, _message: &str, _title: &str, layout: ButtonLayout) -> Result<i32> {
        self.offered_cancel.set(Some(layout.has_cancel()));
        Ok(if self.cancel && layout.has_cancel() {
            popup::CODE_CANCEL
        } else {
            popup::CODE_OK
        })
    }
}

#[test]
fn popup_scenarios() {
    let dialog = ClickingDialog {
        cancel: true,
        offered_cancel: Cell::new(None),
    };

    let result = popup::show_popup(&dialog, "Saved", "Info", false).unwrap();
    assert_eq!(result, PopupResult::Ok);
    assert_eq!(dialog.offered_cancel.get(), Some(false));

    let result = popup::show_popup(&dialog, "Discard changes?", "Editor", true).unwrap();
    assert_eq!(result, PopupResult::Cancel);
    assert_eq!(dialog.offered_cancel.get(), Some(true));
}

#[test]
fn timestamp_scenarios() {
    let at = chrono::NaiveDate::from_ymd_opt(2024, 3, 5)
        .and_then(|d| d.and_hms_opt(14, 30, 22))
        .unwrap();

    assert_eq!(timestamp::format_naive(&at, false), "20240305T143022");
    assert_eq!(timestamp::format_naive(&at, true), "2024-03-05T14:30:22");

    let first = timestamp::format_timestamp(false);
    let second = timestamp::format_timestamp(false);
    assert_eq!(first.len(), 15);
    assert!(second >= first);
}

struct NotInteractive;

impl SessionContext for NotInteractive {
    fn is_top_level_interactive(&self) -> bool {
        false
    }
}

#[derive(Default)]
struct CountingLauncher {
    calls: Cell<usize>,
}

impl SessionLauncher for CountingLauncher {
    fn relaunch(&self, _shell: &ShellCommand) -> Result<()> {
        self.calls.set(self.calls.get() + 1);
        Ok(())
    }
}

#[test]
fn restart_outside_interactive_session_is_silent() {
    let launcher = CountingLauncher::default();
    let shell = ShellCommand::resolve(&defaults::builtin_defaults().session);

    let outcome = session::restart_session(&NotInteractive, &launcher, &shell).unwrap();

    assert_eq!(outcome, RestartOutcome::Skipped);
    assert_eq!(launcher.calls.get(), 0);
}

#[test]
fn config_round_trip_through_config_dir() {
    let dir = tempfile::TempDir::new().unwrap();
    std::env::set_var(paths::CONFIG_DIR_ENV, dir.path());

    assert!(!defaults::config_exists());
    assert_eq!(defaults::load_defaults(), defaults::builtin_defaults());

    let updated = config::set_config_value(
        &defaults::load_config(),
        "/defaults/dialog/backend",
        config::parse_value("kdialog"),
    )
    .unwrap();
    defaults::save_config(&updated).unwrap();

    assert!(defaults::config_exists());
    assert_eq!(defaults::load_defaults().dialog.backend, "kdialog");

    // The popup command's dialog lookup reads the same file.
    let unknown = config::set_config_value(
        &updated,
        "/defaults/dialog/backend",
        config::parse_value("gtk"),
    )
    .unwrap();
    defaults::save_config(&unknown).unwrap();
    let err = NativeDialog::from_defaults().unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigInvalidValue);
    assert!(defaults::reset_config().unwrap());
    assert!(!defaults::reset_config().unwrap());

    std::env::remove_var(paths::CONFIG_DIR_ENV);
}
