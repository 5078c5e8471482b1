/// Result of applying a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch {
    /// Byte ranges of inserted text in the new buffer
    pub changed: Vec<std::ops::Range<usize>>,
    /// Bytes removed from the old buffer
    pub deleted: usize,
    pub lines_before: usize,
    pub lines_after: usize,
    pub version: u64,
}

impl Patch {
    /// True when the command matched nothing and the buffer is untouched.
    pub fn is_noop(&self) -> bool {
        self.changed.is_empty() && self.deleted == 0
    }
}
