use clap::{Parser, Subcommand};

use commands::GlobalArgs;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResponseMode {
    Json,
    Raw,
}

mod commands;
mod output;
mod tty;

use commands::{choose, config, date, popup, reload};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "shx")]
#[command(version = VERSION)]
#[command(about = "Interactive shell helpers: prompts, popups, timestamps and reloads")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask a yes/no question (exit 0 yes, 1 no, 3 unrecognized)
    #[command(visible_alias = "confirm")]
    Choose(choose::ChooseArgs),
    /// Show a blocking modal popup (exit 0 OK, 1 Cancel)
    #[command(visible_alias = "show-popup")]
    Popup(popup::PopupArgs),
    /// Print the current local timestamp
    #[command(visible_alias = "timestamp")]
    Date(date::DateArgs),
    /// Replace this interactive shell session with a fresh one
    #[command(visible_alias = "restart")]
    Reload(reload::ReloadArgs),
    /// Manage shx configuration
    Config(config::ConfigArgs),
    /// List helpers and their aliases
    List,
}

fn response_mode(command: &Commands) -> ResponseMode {
    match command {
        Commands::Date(_) | Commands::List => ResponseMode::Raw,
        _ => ResponseMode::Json,
    }
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    let global = GlobalArgs {};

    if response_mode(&cli.command) == ResponseMode::Raw {
        return match commands::run_raw(cli.command, &global) {
            Ok((content, exit_code)) => {
                print!("{}", content);
                std::process::ExitCode::from(exit_code_to_u8(exit_code))
            }
            Err(err) => {
                let exit_code = output::exit_code_for_error(err.code);
                let _ = output::print_result::<serde_json::Value>(Err(err));
                std::process::ExitCode::from(exit_code_to_u8(exit_code))
            }
        };
    }

    let (json_result, exit_code) = commands::run_json(cli.command, &global);
    let _ = output::print_json_result(json_result);

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
