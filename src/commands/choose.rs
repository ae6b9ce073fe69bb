use clap::Args;
use serde::Serialize;

use shx::confirm;

use crate::commands::{CmdResult, GlobalArgs};

/// Exit code when the reply matched neither yes nor no.
pub const EXIT_UNRECOGNIZED: i32 = 3;

#[derive(Args)]
pub struct ChooseArgs {
    /// Question to ask (defaults to "Are you sure? [y/n] ")
    pub prompt: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChooseOutput {
    pub command: String,
    /// `null` when the reply was not recognized
    pub answer: Option<bool>,
}

pub fn run(args: ChooseArgs, _global: &GlobalArgs) -> CmdResult<ChooseOutput> {
    if !crate::tty::is_stdin_tty() {
        shx::log_status!("choose", "Reading the answer from non-terminal stdin");
    }

    let answer = confirm::confirm_stdio(args.prompt.as_deref())?;

    Ok((
        ChooseOutput {
            command: "choose".to_string(),
            answer,
        },
        exit_code(answer),
    ))
}

pub fn exit_code(answer: Option<bool>) -> i32 {
    match answer {
        Some(true) => 0,
        Some(false) => 1,
        None => EXIT_UNRECOGNIZED,
    }
}
