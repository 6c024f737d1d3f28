//! Line-oriented text files

use crate::{CollectError, Result};
use std::path::Path;

/// Read a text file as lines
///
/// A leading BOM and trailing `\r` are stripped, invalid UTF-8 is replaced,
/// and blank lines at the end of the file are dropped.
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let bytes = std::fs::read(path).map_err(|e| CollectError::io(path, e))?;
    let text = String::from_utf8_lossy(&bytes);
    let text = text.strip_prefix('\u{FEFF}').unwrap_or(&text);

    let mut lines: Vec<String> = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .collect();

    while lines.last().is_some_and(|line| line.trim().is_empty()) {
        lines.pop();
    }

    Ok(lines)
}

/// Replace literal `\n` escape sequences with line breaks
pub fn unescape_newlines(s: &str) -> String {
    s.replace("\\n", "\n")
}
