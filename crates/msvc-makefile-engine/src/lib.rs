pub mod editing;
pub mod io;
pub mod translate;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use editing::{Cmd, Document, EditError, Patch, Section};
pub use io::*;
pub use translate::{FlagSet, Linkage, Script, ScriptError, ScriptReport, Step, msvc_script};
