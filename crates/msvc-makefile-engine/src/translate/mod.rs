//! Unix to MSVC Makefile translation built on the editing commands.

pub mod flags;
pub mod script;

pub use flags::{FlagSet, Linkage};
pub use script::{Script, ScriptError, ScriptReport, Step, msvc_script};
