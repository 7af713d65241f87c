//! Keep log lines single-line when they embed file names or parser messages.

use std::fmt::Write;

/// Longest preview of a single value written into a log line.
const MAX_PREVIEW: usize = 200;

/// Escape control characters (`\n`, `\r`, `\t`, others as `\xNN`) and
/// backslashes, and cut values longer than [`MAX_PREVIEW`] characters with `…`.
pub fn escape_log(s: &str) -> String {
    let mut out = String::with_capacity(s.len().min(MAX_PREVIEW) + 8);
    let mut chars = s.chars();
    for ch in chars.by_ref().take(MAX_PREVIEW) {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\x{:02X}", c as u32);
            }
            c => out.push(c),
        }
    }
    if chars.next().is_some() {
        out.push('…');
    }
    out
}
