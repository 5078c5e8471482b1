//! Stateless line predicates used by every locating operation.
//!
//! Matching is deliberately textual: prefixes and substrings over the raw
//! line, terminator included. There is no tokenizer behind any of these.

/// Marker that starts a comment line in a Makefile.
pub const COMMENT_MARKER: &str = "#";

/// Assignment operators recognised after a variable name, longest first.
const ASSIGNMENT_OPERATORS: [&str; 6] = ["::=", ":=", "?=", "+=", "!=", "="];

pub fn starts_with(line: &str, pattern: &str) -> bool {
    line.starts_with(pattern)
}

pub fn contains(line: &str, pattern: &str) -> bool {
    line.contains(pattern)
}

/// A blank line is one that holds nothing but its terminator.
pub fn is_blank(line: &str) -> bool {
    line == "\n" || line == "\r\n"
}

pub fn is_comment(line: &str) -> bool {
    line.starts_with(COMMENT_MARKER)
}

/// The terminator carried by `line`, or `""` for an unterminated last line.
pub fn terminator(line: &str) -> &str {
    if line.ends_with("\r\n") {
        "\r\n"
    } else if line.ends_with('\n') {
        "\n"
    } else {
        ""
    }
}

/// Return `text` with a `\n` appended unless it already ends with one.
pub fn terminated(text: &str) -> String {
    if text.ends_with('\n') {
        text.to_string()
    } else {
        format!("{text}\n")
    }
}

/// `text` ending in `ending` instead of whatever terminator it carried.
pub fn with_ending(text: &str, ending: &str) -> String {
    let body = text.strip_suffix(terminator(text)).unwrap_or(text);
    format!("{body}{ending}")
}

/// Byte index of the `=` that ends the assignment operator when `line`
/// assigns the variable `name`, e.g. `CC = gcc`, `CC=gcc` or `CC := gcc`.
///
/// Returns `None` when the line assigns some other variable (`CCFLAGS = x`
/// for `name == "CC"`) or is not an assignment at all.
pub fn assignment_operator(line: &str, name: &str) -> Option<usize> {
    if name.is_empty() {
        return None;
    }
    let rest = line.strip_prefix(name)?;
    let after_ws = rest.trim_start_matches([' ', '\t']);
    let op = ASSIGNMENT_OPERATORS
        .iter()
        .find(|op| after_ws.starts_with(**op))?;

    let op_start = line.len() - after_ws.len();
    Some(op_start + op.len() - 1)
}
