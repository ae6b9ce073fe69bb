use clap::Args;

use shx::timestamp;

#[derive(Args)]
pub struct DateArgs {
    /// Use the separated layout (2024-03-05T14:30:22) instead of 20240305T143022
    #[arg(short, long)]
    pub extended: bool,
}

/// Bare timestamp line, so `$(shx date)` needs no JSON parsing.
pub fn run_raw(args: DateArgs) -> shx::Result<(String, i32)> {
    Ok((format!("{}\n", timestamp::format_timestamp(args.extended)), 0))
}
