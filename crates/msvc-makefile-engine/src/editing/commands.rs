use std::ops::Range;

use xi_rope::delta::Builder;
use xi_rope::{Delta, Rope, RopeInfo};

use crate::editing::lines::{LineRef, coalesce};
use crate::editing::{Document, EditError, pattern, section};

/// Commands that can be applied to the document
///
/// Line indices are zero-based and always refer to the document as it is at
/// the moment the command is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cmd {
    /// Delete lines `begin..=end`.
    RemoveRange { begin: usize, end: usize },
    /// Delete the first block whose header starts with `pattern`, keeping the
    /// blank line that terminates it.
    RemoveBlock { pattern: String },
    /// Delete every line starting with `pattern`.
    RemoveLinesStartingWith { pattern: String },
    /// Insert `lines` before line `at`; `at == line_count` appends.
    InsertLines { at: usize, lines: Vec<String> },
    /// Insert `line` right after the leading run of comment lines.
    Prepend { line: String },
    /// Rewrite the value of the last assignment to `name`.
    ReplaceAssignment { name: String, value: String },
    /// Replace every occurrence of `old` with `new` on every line.
    ReplaceSubstring { old: String, new: String },
    /// Replace every whole line containing `fragment` with `line`.
    ReplaceLine { fragment: String, line: String },
    /// Turn the first `pattern + delim` on each line into
    /// `pattern + suffix + delim`.
    AppendSuffix {
        pattern: String,
        delim: String,
        suffix: String,
    },
    /// Swap the first block whose header starts with `pattern` for `lines`,
    /// keeping the terminating blank line.
    ReplaceBlock { pattern: String, lines: Vec<String> },
}

/// Compile a command into a delta over the current buffer
pub(crate) fn compile_command(doc: &Document, cmd: &Cmd) -> Result<Delta<RopeInfo>, EditError> {
    let lines = doc.line_refs();
    let mut builder = Builder::new(doc.byte_len());

    match cmd {
        Cmd::RemoveRange { begin, end } => {
            if begin > end || *end >= lines.len() {
                return Err(EditError::InvalidRange {
                    begin: *begin,
                    end: *end,
                    len: lines.len(),
                });
            }
            builder.delete(lines[*begin].span.start..lines[*end].span.end);
        }
        Cmd::RemoveBlock { pattern } => {
            if let Some(block) = section::locate_block(&lines, pattern)? {
                builder.delete(block_bytes(&lines, &block));
            }
        }
        Cmd::RemoveLinesStartingWith { pattern } => {
            if !pattern.is_empty() {
                let spans = lines
                    .iter()
                    .filter(|line| pattern::starts_with(&line.text, pattern))
                    .map(|line| line.span.clone());
                for span in coalesce(spans) {
                    builder.delete(span);
                }
            }
        }
        Cmd::InsertLines { at, lines: new_lines } => {
            if *at > lines.len() {
                return Err(EditError::InvalidRange {
                    begin: *at,
                    end: *at,
                    len: lines.len(),
                });
            }
            insert_before(&mut builder, &lines, *at, new_lines);
        }
        Cmd::Prepend { line } => {
            let at = lines
                .iter()
                .take_while(|line| pattern::is_comment(&line.text))
                .count();
            insert_before(&mut builder, &lines, at, std::slice::from_ref(line));
        }
        Cmd::ReplaceAssignment { name, value } => {
            let target = lines.iter().enumerate().rev().find_map(|(index, line)| {
                pattern::assignment_operator(&line.text, name).map(|eq| (index, eq))
            });
            if let Some((index, eq)) = target {
                let line = &lines[index];
                let rewritten = format!(
                    "{} {value}{}",
                    &line.text[..=eq],
                    ending_at(&lines, index)
                );
                if rewritten != line.text {
                    builder.replace(line.span.clone(), Rope::from(rewritten));
                }
            }
        }
        Cmd::ReplaceSubstring { old, new } => {
            if !old.is_empty() {
                rewrite_lines(&mut builder, &lines, |_, text| {
                    pattern::contains(text, old).then(|| text.replace(old.as_str(), new))
                });
            }
        }
        Cmd::ReplaceLine { fragment, line } => {
            if !fragment.is_empty() {
                rewrite_lines(&mut builder, &lines, |index, text| {
                    pattern::contains(text, fragment)
                        .then(|| pattern::with_ending(line, ending_at(&lines, index)))
                });
            }
        }
        Cmd::AppendSuffix {
            pattern,
            delim,
            suffix,
        } => {
            let old = format!("{pattern}{delim}");
            let new = format!("{pattern}{suffix}{delim}");
            if !old.is_empty() {
                rewrite_lines(&mut builder, &lines, |_, text| {
                    text.find(&old).map(|begin| {
                        format!("{}{new}{}", &text[..begin], &text[begin + old.len()..])
                    })
                });
            }
        }
        Cmd::ReplaceBlock {
            pattern,
            lines: new_lines,
        } => {
            if let Some(block) = section::locate_block(&lines, pattern)? {
                let replacement = join_lines(new_lines, ending_at(&lines, block.start));
                let current: String = lines[block.clone()]
                    .iter()
                    .map(|line| line.text.as_str())
                    .collect();
                if replacement != current {
                    builder.replace(block_bytes(&lines, &block), Rope::from(replacement));
                }
            }
        }
    }

    Ok(builder.build())
}

/// Byte span from the header through the last member, excluding the blank line.
fn block_bytes(lines: &[LineRef], block: &Range<usize>) -> Range<usize> {
    lines[block.start].span.start..lines[block.end].span.start
}

/// Line ending for text written at line `at`: that line's own terminator,
/// else that of the closest terminated line before it, else `\n`.
fn ending_at(lines: &[LineRef], at: usize) -> &str {
    lines
        .iter()
        .take(at + 1)
        .rev()
        .map(|line| pattern::terminator(&line.text))
        .find(|ending| !ending.is_empty())
        .unwrap_or("\n")
}

fn join_lines(lines: &[String], ending: &str) -> String {
    lines
        .iter()
        .map(|line| pattern::with_ending(line, ending))
        .collect()
}

fn insert_before(builder: &mut Builder<RopeInfo>, lines: &[LineRef], at: usize, new_lines: &[String]) {
    if new_lines.is_empty() {
        return;
    }

    let ending = ending_at(lines, at);
    let mut text = join_lines(new_lines, ending);
    let offset = match lines.get(at) {
        Some(line) => line.span.start,
        None => {
            // Appending after an unterminated last line would glue the two together
            if let Some(last) = lines.last()
                && pattern::terminator(&last.text).is_empty()
            {
                text.insert_str(0, ending);
            }
            lines.last().map_or(0, |line| line.span.end)
        }
    };

    builder.replace(offset..offset, Rope::from(text));
}

/// Replace each line for which `rewrite` returns different text.
fn rewrite_lines<F>(builder: &mut Builder<RopeInfo>, lines: &[LineRef], mut rewrite: F)
where
    F: FnMut(usize, &str) -> Option<String>,
{
    for (index, line) in lines.iter().enumerate() {
        if let Some(new_text) = rewrite(index, &line.text)
            && new_text != line.text
        {
            builder.replace(line.span.clone(), Rope::from(new_text));
        }
    }
}
