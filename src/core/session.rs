//! Replace the interactive shell session with a fresh one.
//!
//! Restarting only happens from a top-level interactive terminal. Anywhere
//! else (a pipe, a script, an editor's embedded terminal) the call is a
//! silent no-op.
//!
//! The launcher replaces the current process. When that process was started
//! from a shell, the new shell runs nested under the caller; running
//! `exec shx reload` makes it a true replacement.

use std::env;
use std::ffi::OsString;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process::Command;

use serde::Serialize;

use crate::defaults::SessionConfig;
use crate::error::{Error, Result};

/// Reports whether this process is a top-level interactive session.
pub trait SessionContext {
    fn is_top_level_interactive(&self) -> bool;
}

/// Starts a new session in place of the current process.
pub trait SessionLauncher {
    /// On success the production launcher does not return.
    fn relaunch(&self, shell: &ShellCommand) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShellCommand {
    pub program: String,
    pub args: Vec<String>,
    /// The calling process is itself a shell, which keeps running underneath.
    pub nested: bool,
}

impl ShellCommand {
    /// Configured shell, else the calling shell, else `$SHELL` (`%COMSPEC%`
    /// on Windows), else the platform default.
    pub fn resolve(config: &SessionConfig) -> Self {
        Self::resolve_with(config, |name| env::var(name).ok(), parent_shell())
    }

    /// `parent` is the executable of the calling shell, when there is one.
    pub fn resolve_with<F>(config: &SessionConfig, var: F, parent: Option<PathBuf>) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let (env_name, fallback) = if cfg!(windows) {
            ("COMSPEC", "cmd.exe")
        } else {
            ("SHELL", "/bin/sh")
        };

        let nested = parent.is_some();
        let program = config
            .shell
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(|s| expand(s, &var))
            .or_else(|| parent.map(|p| p.display().to_string()))
            .or_else(|| var(env_name).filter(|s| !s.trim().is_empty()))
            .unwrap_or_else(|| fallback.to_string());

        Self {
            program,
            args: config.args.clone(),
            nested,
        }
    }
}

const KNOWN_SHELLS: &[&str] = &[
    "sh", "bash", "zsh", "fish", "dash", "ksh", "mksh", "yash", "tcsh", "csh", "nu", "elvish",
    "xonsh", "pwsh", "powershell",
];

/// True when the executable's file name is a known interactive shell.
pub fn is_known_shell(program: &Path) -> bool {
    program
        .file_stem()
        .and_then(|stem| stem.to_str())
        .is_some_and(|name| KNOWN_SHELLS.contains(&name))
}

/// The executable of the parent process, when the parent is a shell.
pub fn parent_shell() -> Option<PathBuf> {
    parent_executable().filter(|exe| is_known_shell(exe))
}

#[cfg(target_os = "linux")]
fn parent_executable() -> Option<PathBuf> {
    // SAFETY: getppid has no preconditions and cannot fail.
    let ppid = unsafe { libc::getppid() };
    std::fs::read_link(format!("/proc/{}/exe", ppid)).ok()
}

#[cfg(not(target_os = "linux"))]
fn parent_executable() -> Option<PathBuf> {
    None
}

fn expand<F>(value: &str, var: &F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    shellexpand::full_with_context_no_errors(
        value,
        || var("HOME"),
        |name| var(name),
    )
    .into_owned()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RestartOutcome {
    /// Not a top-level interactive session; nothing was launched.
    Skipped,
    /// The launcher returned after starting the new session.
    Launched,
}

pub fn restart_session<C, L>(
    context: &C,
    launcher: &L,
    shell: &ShellCommand,
) -> Result<RestartOutcome>
where
    C: SessionContext + ?Sized,
    L: SessionLauncher + ?Sized,
{
    if !context.is_top_level_interactive() {
        log_status!("reload", "Not a top-level interactive session; skipping restart");
        return Ok(RestartOutcome::Skipped);
    }

    log_status!("reload", "Starting {} {}", shell.program, shell.args.join(" "));
    if shell.nested {
        log_status!(
            "reload",
            "The calling shell stays underneath; use `exec shx reload` to replace it"
        );
    }
    launcher.relaunch(shell)?;
    Ok(RestartOutcome::Launched)
}

/// Host detection from the process's own terminal and environment.
#[derive(Debug, Clone)]
pub struct TerminalSession {
    embedded_markers: Vec<String>,
}

impl TerminalSession {
    pub fn new(embedded_markers: Vec<String>) -> Self {
        Self { embedded_markers }
    }

    /// True when any marker matches the environment.
    ///
    /// `NAME` matches when the variable is set; `NAME=value` matches on an
    /// exact value.
    pub fn is_embedded<F>(&self, var: F) -> bool
    where
        F: Fn(&str) -> Option<OsString>,
    {
        self.embedded_markers
            .iter()
            .any(|marker| match marker.split_once('=') {
                Some((name, expected)) => var(name).is_some_and(|value| value == expected),
                None => var(marker.as_str()).is_some(),
            })
    }
}

impl SessionContext for TerminalSession {
    fn is_top_level_interactive(&self) -> bool {
        io::stdin().is_terminal()
            && io::stdout().is_terminal()
            && in_foreground_process_group()
            && !self.is_embedded(|name| env::var_os(name))
    }
}

/// A background job must not take over the terminal.
#[cfg(unix)]
fn in_foreground_process_group() -> bool {
    // SAFETY: both calls only read process state for fd 0.
    let (foreground, own) = unsafe { (libc::tcgetpgrp(libc::STDIN_FILENO), libc::getpgrp()) };
    foreground != -1 && foreground == own
}

#[cfg(not(unix))]
fn in_foreground_process_group() -> bool {
    true
}

/// Replaces the current process with the shell.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessLauncher;

impl SessionLauncher for ProcessLauncher {
    #[cfg(unix)]
    fn relaunch(&self, shell: &ShellCommand) -> Result<()> {
        use std::os::unix::process::CommandExt;

        let err = Command::new(&shell.program).args(&shell.args).exec();

        // exec() only returns on error
        Err(Error::session_launch_failed(&shell.program, err.to_string()))
    }

    #[cfg(not(unix))]
    fn relaunch(&self, shell: &ShellCommand) -> Result<()> {
        Command::new(&shell.program)
            .args(&shell.args)
            .spawn()
            .map_err(|e| Error::session_launch_failed(&shell.program, e.to_string()))?;

        std::process::exit(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    struct FixedContext(bool);

    impl SessionContext for FixedContext {
        fn is_top_level_interactive(&self) -> bool {
            self.0
        }
    }

    #[derive(Default)]
    struct RecordingLauncher {
        launched: RefCell<Vec<ShellCommand>>,
        fail: bool,
    }

    impl SessionLauncher for RecordingLauncher {
        fn relaunch(&self, shell: &ShellCommand) -> Result<()> {
            self.launched.borrow_mut().push(shell.clone());
            if self.fail {
                return Err(Error::session_launch_failed(&shell.program, "not found"));
            }
            Ok(())
        }
    }

    fn zsh() -> ShellCommand {
        ShellCommand {
            program: "/bin/zsh".to_string(),
            args: vec!["-l".to_string()],
            nested: false,
        }
    }

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn non_interactive_context_never_launches() {
        let launcher = RecordingLauncher::default();

        let outcome = restart_session(&FixedContext(false), &launcher, &zsh()).unwrap();

        assert_eq!(outcome, RestartOutcome::Skipped);
        assert!(launcher.launched.borrow().is_empty());
    }

    #[test]
    fn interactive_context_launches_once() {
        let launcher = RecordingLauncher::default();

        let outcome = restart_session(&FixedContext(true), &launcher, &zsh()).unwrap();

        assert_eq!(outcome, RestartOutcome::Launched);
        assert_eq!(*launcher.launched.borrow(), vec![zsh()]);
    }

    #[test]
    fn launch_failure_propagates() {
        let launcher = RecordingLauncher {
            fail: true,
            ..Default::default()
        };

        let err = restart_session(&FixedContext(true), &launcher, &zsh()).unwrap_err();
        assert_eq!(err.code, crate::ErrorCode::SessionLaunchFailed);
    }

    fn os_env_of(
        pairs: &'static [(&'static str, &'static str)],
    ) -> impl Fn(&str) -> Option<OsString> {
        move |name: &str| {
            pairs
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| OsString::from(*v))
        }
    }

    #[test]
    fn embedded_markers_match_name_or_exact_value() {
        let session = TerminalSession::new(vec![
            "INSIDE_EMACS".to_string(),
            "TERM_PROGRAM=vscode".to_string(),
        ]);
        assert!(session.is_embedded(os_env_of(&[("INSIDE_EMACS", "29.1,comint")])));
        assert!(session.is_embedded(os_env_of(&[("TERM_PROGRAM", "vscode")])));
        assert!(!session.is_embedded(os_env_of(&[("TERM_PROGRAM", "iTerm.app")])));
        assert!(!session.is_embedded(os_env_of(&[])));
    }

    #[test]
    fn configured_shell_wins_and_expands_home() {
        let config = SessionConfig {
            shell: Some("~/bin/fish".to_string()),
            args: vec!["-i".to_string()],
            embedded_markers: Vec::new(),
        };

        let shell = ShellCommand::resolve_with(
            &config,
            env_of(&[("HOME", "/home/ada"), ("SHELL", "/bin/bash")]),
            Some(PathBuf::from("/usr/bin/zsh")),
        );

        assert_eq!(shell.program, "/home/ada/bin/fish");
        assert_eq!(shell.args, vec!["-i".to_string()]);
    }

    #[test]
    fn configured_shell_expands_variables() {
        let config = SessionConfig {
            shell: Some("$TOOLS/zsh".to_string()),
            ..SessionConfig::default()
        };

        let shell = ShellCommand::resolve_with(&config, env_of(&[("TOOLS", "/opt/tools")]), None);
        assert_eq!(shell.program, "/opt/tools/zsh");
    }

    #[cfg(unix)]
    #[test]
    fn falls_back_to_login_shell_then_sh() {
        let config = SessionConfig::default();

        let from_env =
            ShellCommand::resolve_with(&config, env_of(&[("SHELL", "/usr/bin/zsh")]), None);
        assert_eq!(from_env.program, "/usr/bin/zsh");
        assert_eq!(from_env.args, vec!["-l".to_string()]);
        assert!(!from_env.nested);

        let bare = ShellCommand::resolve_with(&config, env_of(&[]), None);
        assert_eq!(bare.program, "/bin/sh");
    }

    #[test]
    fn calling_shell_wins_over_login_shell() {
        let shell = ShellCommand::resolve_with(
            &SessionConfig::default(),
            env_of(&[("SHELL", "/bin/zsh")]),
            Some(PathBuf::from("/usr/bin/bash")),
        );

        assert_eq!(shell.program, "/usr/bin/bash");
        assert!(shell.nested);
    }

    #[test]
    fn shell_names_are_recognized_by_file_name() {
        assert!(is_known_shell(Path::new("/usr/bin/bash")));
        assert!(is_known_shell(Path::new("/opt/homebrew/bin/fish")));
        assert!(is_known_shell(Path::new("/opt/microsoft/powershell/7/pwsh.exe")));
        assert!(!is_known_shell(Path::new("/usr/lib/gnome-terminal-server")));
        assert!(!is_known_shell(Path::new("/usr/bin/zsh (deleted)")));
    }

    #[cfg(unix)]
    #[test]
    fn process_launcher_reports_missing_program() {
        let shell = ShellCommand {
            program: "/nonexistent/shx-shell".to_string(),
            args: Vec::new(),
            nested: false,
        };
        let err = ProcessLauncher.relaunch(&shell).unwrap_err();
        assert_eq!(err.code, crate::ErrorCode::SessionLaunchFailed);
    }
}
