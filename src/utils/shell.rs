/// Escape a value for use inside PowerShell single quotes.
/// Replaces `'` with `''`.
pub fn escape_powershell_single_quoted(value: &str) -> String {
    value.replace('\'', "''")
}

/// Quote a value as a PowerShell single-quoted string literal.
pub fn quote_powershell(value: &str) -> String {
    format!("'{}'", escape_powershell_single_quoted(value))
}

/// Quote a value as an AppleScript string literal.
/// Backslashes and double quotes are escaped; newlines become `\n`.
pub fn quote_applescript(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}
