/*!
 * # Editing Core Module
 *
 * Line-oriented mutation engine over a Makefile held in memory.
 *
 * ## Architecture Overview
 *
 * ### 1. Single Source of Truth: xi-rope Buffer
 * - The whole document lives in one **`xi_rope::Rope`** buffer
 * - Lines are read back with their terminators (`lines_raw`), so writing the
 *   buffer out reproduces the input byte for byte when nothing matched
 *
 * ### 2. Command-Based Editing
 * - Every mutation is a **`Cmd`** compiled against the *current* buffer into
 *   a single `Delta`, then applied atomically
 * - Commands never hold line indices across applications; each compilation
 *   re-scans the buffer, so a sequence of commands cannot drift
 * - A command that fails to compile leaves the buffer untouched
 *
 * ### 3. Sections
 * - A **`Section`** is a header line plus the lines up to the next blank
 *   line, located by prefix match and recomputed on every query
 *
 * ## Module Structure
 *
 * - **`document`**: `Document` with the rope buffer, lookups and `apply`
 * - **`commands`**: `Cmd` enum and delta compilation for each primitive
 * - **`section`**: header/blank-line block location
 * - **`pattern`**: prefix, substring, blank, comment and assignment predicates
 * - **`lines`**: line iteration with byte spans
 * - **`patch`**: edit result metadata
 *
 * ## Usage Pattern
 *
 * ```rust
 * use msvc_makefile_engine::editing::*;
 *
 * let mut doc = Document::from("CC = gcc\nall: a.o\n");
 * doc.apply(Cmd::ReplaceAssignment {
 *     name: "CC".to_string(),
 *     value: "cl".to_string(),
 * })
 * .unwrap();
 * assert_eq!(doc.text(), "CC = cl\nall: a.o\n");
 * ```
 */

pub mod commands;
pub mod document;
pub mod lines;
pub mod patch;
pub mod pattern;
pub mod section;

pub use commands::Cmd;
pub use document::Document;
pub use patch::Patch;
pub use section::Section;

/// Failures raised while locating or mutating lines.
///
/// Absent patterns are *not* errors for the mutating commands; they compile
/// to an empty edit instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("no line starts with '{pattern}'")]
    PatternNotFound { pattern: String },

    #[error("block starting with '{pattern}' at line index {start} has no terminating blank line")]
    MalformedBoundary { pattern: String, start: usize },

    #[error("invalid line range {begin}..={end} for a document of {len} lines")]
    InvalidRange { begin: usize, end: usize, len: usize },
}
