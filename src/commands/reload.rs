use clap::Args;
use serde::Serialize;

use shx::defaults;
use shx::session::{self, ProcessLauncher, RestartOutcome, ShellCommand, TerminalSession};

use crate::commands::{CmdResult, GlobalArgs};

#[derive(Args)]
pub struct ReloadArgs {}

#[derive(Debug, Serialize)]
pub struct ReloadOutput {
    pub command: String,
    pub restarted: bool,
    pub outcome: RestartOutcome,
    pub shell: ShellCommand,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

pub fn run(_args: ReloadArgs, _global: &GlobalArgs) -> CmdResult<ReloadOutput> {
    let config = defaults::load_defaults().session;
    let shell = ShellCommand::resolve(&config);
    let context = TerminalSession::new(config.embedded_markers);

    // Only returns when skipped: a successful relaunch replaces this process.
    let outcome = session::restart_session(&context, &ProcessLauncher, &shell)?;

    let reason = match outcome {
        RestartOutcome::Skipped => {
            Some("Not running as a top-level interactive session".to_string())
        }
        RestartOutcome::Launched => None,
    };

    Ok((
        ReloadOutput {
            command: "reload".to_string(),
            restarted: outcome == RestartOutcome::Launched,
            outcome,
            shell,
            reason,
        },
        0,
    ))
}
