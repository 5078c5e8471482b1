use xi_rope::delta::DeltaElement;
use xi_rope::{Delta, Rope, RopeInfo};

use crate::editing::lines::{LineRef, lines_with_spans};
use crate::editing::{Cmd, EditError, Patch, Section, pattern, section};

/// A Makefile held in memory as an ordered sequence of terminated lines.
///
/// The document owns a single `xi_rope::Rope`. Line structure is derived from
/// the buffer on demand and never cached, so every lookup or command sees the
/// state left by the previous one.
///
/// ```rust
/// # use msvc_makefile_engine::editing::{Document, Cmd};
/// let mut doc = Document::from("all: a.o\n\tcc -c -o $@ $<\n\n");
/// doc.apply(Cmd::ReplaceSubstring {
///     old: ".o".to_string(),
///     new: ".obj".to_string(),
/// })
/// .unwrap();
/// assert_eq!(doc.line(0).as_deref(), Some("all: a.obj\n"));
/// ```
#[derive(Debug, Clone)]
pub struct Document {
    /// Whole document, terminators included
    pub(crate) buffer: Rope,
    /// Incremented by every command that changed the buffer
    pub(crate) version: u64,
}

impl Document {
    /// Create a new document from raw bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, std::str::Utf8Error> {
        let text = std::str::from_utf8(bytes)?;
        Ok(Self::from(text))
    }

    /// Get the document's content as raw bytes (exact round-trip)
    pub fn to_bytes(&self) -> Vec<u8> {
        self.buffer.to_string().into_bytes()
    }

    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Number of lines, counting an unterminated last line.
    pub fn line_count(&self) -> usize {
        self.buffer.lines_raw(..).count()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn line(&self, index: usize) -> Option<String> {
        self.buffer
            .lines_raw(..)
            .nth(index)
            .map(|line| line.into_owned())
    }

    pub fn lines(&self) -> Vec<String> {
        self.buffer
            .lines_raw(..)
            .map(|line| line.into_owned())
            .collect()
    }

    pub(crate) fn line_refs(&self) -> Vec<LineRef> {
        lines_with_spans(&self.buffer).collect()
    }

    pub(crate) fn byte_len(&self) -> usize {
        self.buffer.len()
    }

    /// Index of the first line starting with `pattern`.
    pub fn find_line_index(&self, pattern: &str) -> Option<usize> {
        self.buffer
            .lines_raw(..)
            .position(|line| pattern::starts_with(&line, pattern))
    }

    /// The section opened by the first line starting with `pattern`.
    pub fn section(&self, pattern: &str) -> Result<Section, EditError> {
        section::locate(&self.line_refs(), pattern)
    }

    /// Apply a command to the document.
    ///
    /// The command is compiled against the current buffer into one delta. If
    /// compilation fails the buffer is left exactly as it was. A command
    /// whose pattern matched nothing yields a no-op patch and does not bump
    /// the version.
    pub fn apply(&mut self, cmd: Cmd) -> Result<Patch, EditError> {
        let delta = self.compile_command(&cmd)?;
        let lines_before = self.line_count();

        if delta.is_identity() {
            log::trace!("no-op: {cmd:?}");
            return Ok(Patch {
                changed: Vec::new(),
                deleted: 0,
                lines_before,
                lines_after: lines_before,
                version: self.version,
            });
        }

        let (changed, deleted) = summarize_delta(&delta);
        self.buffer = delta.apply(&self.buffer);
        self.version += 1;

        Ok(Patch {
            changed,
            deleted,
            lines_before,
            lines_after: self.line_count(),
            version: self.version,
        })
    }

    /// Numbered listing of every line, for diagnostics.
    pub fn dump(&self) -> String {
        self.dump_lines(0, usize::MAX)
    }

    /// Numbered listing of lines `begin..=end`, clamped to the document.
    pub fn dump_range(&self, begin: usize, end: usize) -> String {
        self.dump_lines(begin, end)
    }

    fn dump_lines(&self, begin: usize, end: usize) -> String {
        let mut out = String::new();
        for (index, line) in self.buffer.lines_raw(..).enumerate() {
            if index < begin {
                continue;
            }
            if index > end {
                break;
            }
            out.push_str(&format!("{index:>5} {}", pattern::terminated(&line)));
        }
        out
    }

    pub(crate) fn compile_command(&self, cmd: &Cmd) -> Result<Delta<RopeInfo>, EditError> {
        crate::editing::commands::compile_command(self, cmd)
    }
}

impl From<&str> for Document {
    fn from(text: &str) -> Self {
        Self {
            buffer: Rope::from(text),
            version: 0,
        }
    }
}

/// Inserted ranges in the new buffer and total bytes deleted from the old one.
fn summarize_delta(delta: &Delta<RopeInfo>) -> (Vec<std::ops::Range<usize>>, usize) {
    let mut changed = Vec::new();
    let mut deleted = 0;
    let mut old_pos = 0;
    let mut new_pos = 0;

    for op in &delta.els {
        match op {
            DeltaElement::Copy(from, to) => {
                deleted += from.saturating_sub(old_pos);
                new_pos += to - from;
                old_pos = *to;
            }
            DeltaElement::Insert(inserted) => {
                let end = new_pos + inserted.len();
                changed.push(new_pos..end);
                new_pos = end;
            }
        }
    }
    deleted += delta.base_len.saturating_sub(old_pos);

    (changed, deleted)
}
