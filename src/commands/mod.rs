pub type CmdResult<T> = shx::Result<(T, i32)>;

pub(crate) struct GlobalArgs {}

pub mod choose;
pub mod config;
pub mod date;
pub mod popup;
pub mod reload;

/// One helper as exposed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandEntry {
    /// Subcommand name, the short alias users type
    pub name: &'static str,
    /// Long-form alias naming the operation
    pub alias: &'static str,
    pub summary: &'static str,
}

/// The helper table. Mirrors the `visible_alias` attributes on `Commands`.
pub const REGISTRY: &[CommandEntry] = &[
    CommandEntry {
        name: "choose",
        alias: "confirm",
        summary: "Ask a yes/no question (exit 0 yes, 1 no, 3 unrecognized)",
    },
    CommandEntry {
        name: "popup",
        alias: "show-popup",
        summary: "Show a blocking modal popup (exit 0 OK, 1 Cancel)",
    },
    CommandEntry {
        name: "date",
        alias: "timestamp",
        summary: "Print the local time as 20240305T143022 (or --extended)",
    },
    CommandEntry {
        name: "reload",
        alias: "restart",
        summary: "Replace this interactive shell session with a fresh one",
    },
];

pub fn registry() -> &'static [CommandEntry] {
    REGISTRY
}

pub fn render_list() -> String {
    let width = registry().iter().map(|e| e.name.len()).max().unwrap_or(0);
    let alias_width = registry().iter().map(|e| e.alias.len()).max().unwrap_or(0);

    let mut out = String::new();
    for entry in registry() {
        out.push_str(&format!(
            "{:<width$}  {:<alias_width$}  {}\n",
            entry.name,
            entry.alias,
            entry.summary,
            width = width,
            alias_width = alias_width,
        ));
    }
    out
}

pub(crate) fn run_raw(
    command: crate::Commands,
    _global: &GlobalArgs,
) -> shx::Result<(String, i32)> {
    match command {
        crate::Commands::Date(args) => date::run_raw(args),
        crate::Commands::List => Ok((render_list(), 0)),
        _ => Err(shx::Error::validation_invalid_argument(
            "output_mode",
            "Command does not support raw output",
            None,
        )),
    }
}

/// Dispatch a command to its handler and map result to JSON.
macro_rules! dispatch {
    ($args:expr, $global:expr, $module:ident) => {
        crate::output::map_cmd_result_to_json($module::run($args, $global))
    };
}

pub(crate) fn run_json(
    command: crate::Commands,
    global: &GlobalArgs,
) -> (shx::Result<serde_json::Value>, i32) {
    match command {
        crate::Commands::Choose(args) => dispatch!(args, global, choose),
        crate::Commands::Popup(args) => dispatch!(args, global, popup),
        crate::Commands::Reload(args) => dispatch!(args, global, reload),
        crate::Commands::Config(args) => dispatch!(args, global, config),

        // Raw output mode commands
        crate::Commands::Date(_) | crate::Commands::List => {
            let err = shx::Error::validation_invalid_argument(
                "output_mode",
                "Command uses raw output mode",
                None,
            );
            crate::output::map_cmd_result_to_json::<serde_json::Value>(Err(err))
        }
    }
}
