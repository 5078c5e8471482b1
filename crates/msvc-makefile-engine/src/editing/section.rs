use std::ops::Range;

use crate::editing::{EditError, lines::LineRef, pattern};

/// A run of lines opened by a header matching some start pattern and closed
/// by the first blank line after it.
///
/// `start` is the header's index and `end` the index of the terminating blank
/// line, so `start < end` always holds. `lines` are the members strictly
/// between the two. A section is a view: it is recomputed against the live
/// document on every query and never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub lines: Vec<String>,
    pub start: usize,
    pub end: usize,
}

impl Section {
    /// Header plus members, excluding the terminating blank line.
    pub fn block_range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Find the first block whose header starts with `pattern`.
///
/// `Ok(None)` means no header matched; an empty pattern never matches. A header with no blank line anywhere
/// after it is a `MalformedBoundary` error.
pub(crate) fn locate_block(
    lines: &[LineRef],
    pattern: &str,
) -> Result<Option<Range<usize>>, EditError> {
    if pattern.is_empty() {
        return Ok(None);
    }
    let Some(start) = lines
        .iter()
        .position(|line| pattern::starts_with(&line.text, pattern))
    else {
        return Ok(None);
    };

    let end = lines[start + 1..]
        .iter()
        .position(|line| pattern::is_blank(&line.text))
        .map(|offset| start + 1 + offset)
        .ok_or_else(|| EditError::MalformedBoundary {
            pattern: pattern.to_string(),
            start,
        })?;

    Ok(Some(start..end))
}

/// Extract the section opened by `pattern`.
pub(crate) fn locate(lines: &[LineRef], pattern: &str) -> Result<Section, EditError> {
    let block = locate_block(lines, pattern)?.ok_or_else(|| EditError::PatternNotFound {
        pattern: pattern.to_string(),
    })?;

    Ok(Section {
        lines: lines[block.start + 1..block.end]
            .iter()
            .map(|line| line.text.clone())
            .collect(),
        start: block.start,
        end: block.end,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::lines::lines_with_spans;
    use pretty_assertions::assert_eq;
    use xi_rope::Rope;

    fn refs(text: &str) -> Vec<LineRef> {
        lines_with_spans(&Rope::from(text)).collect()
    }

    #[test]
    fn section_members_sit_between_header_and_blank() {
        let lines = refs("x = 1\nconfig.mk:\n\techo a\n\techo b\n\nall: x\n");
        let section = locate(&lines, "config.mk:").unwrap();

        assert_eq!(section.start, 1);
        assert_eq!(section.end, 4);
        assert_eq!(section.lines, vec!["\techo a\n", "\techo b\n"]);
        assert_eq!(section.block_range(), 1..4);
    }

    #[test]
    fn header_immediately_followed_by_blank_has_no_members() {
        let lines = refs("clean:\n\nall:\n");
        let section = locate(&lines, "clean:").unwrap();

        assert_eq!((section.start, section.end), (0, 1));
        assert!(section.lines.is_empty());
    }

    #[test]
    fn first_matching_header_wins() {
        let lines = refs("t:\n\ta\n\nt:\n\tb\n\n");
        let section = locate(&lines, "t:").unwrap();
        assert_eq!(section.lines, vec!["\ta\n"]);
    }

    #[test]
    fn empty_pattern_is_not_found() {
        let lines = refs("all:\n\n");
        assert_eq!(locate_block(&lines, "").unwrap(), None);
        assert!(matches!(
            locate(&lines, ""),
            Err(EditError::PatternNotFound { .. })
        ));
    }

    #[test]
    fn missing_header_is_reported() {
        let lines = refs("all:\n\n");
        let err = locate(&lines, "install:").unwrap_err();
        assert!(matches!(err, EditError::PatternNotFound { .. }));
    }

    #[test]
    fn header_without_terminator_is_a_boundary_error() {
        let lines = refs("all: a.o\n\tcc a.o\n");
        let err = locate(&lines, "all:").unwrap_err();
        assert_eq!(
            err,
            EditError::MalformedBoundary {
                pattern: "all:".to_string(),
                start: 0,
            }
        );
    }

    #[test]
    fn header_on_last_line_is_a_boundary_error() {
        let lines = refs("\nall:");
        assert!(matches!(
            locate_block(&lines, "all:"),
            Err(EditError::MalformedBoundary { start: 1, .. })
        ));
    }

    #[test]
    fn locate_block_without_match_is_none() {
        let lines = refs("a\n\n");
        assert_eq!(locate_block(&lines, "b").unwrap(), None);
        assert_eq!(locate_block(&[], "b").unwrap(), None);
    }
}
