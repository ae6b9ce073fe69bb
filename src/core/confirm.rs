//! Yes/no prompt.
//!
//! The answer is tri-state: `Some(true)`, `Some(false)`, or `None` when the
//! reply matched neither token set. `None` is a normal outcome, not an error,
//! and the prompt is never repeated.

use std::io::{self, BufRead, Write};

use crate::error::{Error, Result};

/// Prompt shown when the caller does not supply one.
pub const DEFAULT_PROMPT: &str = "Are you sure? [y/n] ";

const AFFIRMATIVE: &[&str] = &["y", "yes"];
const NEGATIVE: &[&str] = &["n", "no"];

/// Map a reply to an answer. Trimmed, case-insensitive.
pub fn parse_answer(reply: &str) -> Option<bool> {
    let reply = reply.trim();
    if AFFIRMATIVE.iter().any(|t| reply.eq_ignore_ascii_case(t)) {
        Some(true)
    } else if NEGATIVE.iter().any(|t| reply.eq_ignore_ascii_case(t)) {
        Some(false)
    } else {
        None
    }
}

/// Write the prompt to `output`, read one line from `input`, and map it.
///
/// End of input reads as an empty reply and yields `None`.
pub fn confirm<R, W>(prompt: Option<&str>, input: &mut R, output: &mut W) -> Result<Option<bool>>
where
    R: BufRead,
    W: Write,
{
    let prompt = prompt.unwrap_or(DEFAULT_PROMPT);

    output
        .write_all(prompt.as_bytes())
        .and_then(|_| output.flush())
        .map_err(|e| Error::internal_io(e.to_string(), Some("write prompt".to_string())))?;

    // A reply that is not UTF-8 is unrecognized, not an I/O error.
    let mut line = Vec::new();
    input
        .read_until(b'\n', &mut line)
        .map_err(|e| Error::internal_io(e.to_string(), Some("read answer".to_string())))?;

    Ok(parse_answer(&String::from_utf8_lossy(&line)))
}

/// [`confirm`] over the process's stdin, prompting on stderr.
pub fn confirm_stdio(prompt: Option<&str>) -> Result<Option<bool>> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stderr();
    confirm(prompt, &mut input, &mut output)
}
