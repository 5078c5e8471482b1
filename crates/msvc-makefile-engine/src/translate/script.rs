use crate::editing::{Cmd, Document, EditError};
use crate::translate::flags::FlagSet;

/// Libraries linked by every MSVC build.
pub const MSVC_LIBS: &str = "ws2_32.lib pcre2-posix.lib pcre2-8.lib zlib.lib pthreadVC2.lib wingetopt.lib libbz2.lib liblzma.lib";

/// Only the programs that build under MSVC.
pub const MISC_PROGRAMS: &str = "MISC_PROGRAMS = misc/ace2sam";

/// `config.mk` is generated by sed rather than by the configure script.
pub const CONFIG_MK_RECIPE: [&str; 2] = [
    "config.mk:",
    "\t@sed -e '/^prefix/,/^LIBS/d;s/@Hsource@//;s/@Hinstall@/#/;s#@HTSDIR@#../htslib#g;s/@HTSLIB_CPPFLAGS@/-I$$(HTSDIR)/g;s/@CURSES_LIB@//g' config.mk.in > $@",
];

/// One named edit in a translation script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub name: String,
    pub cmd: Cmd,
}

#[derive(Debug, thiserror::Error)]
#[error("step '{step}' failed: {source}")]
pub struct ScriptError {
    pub step: String,
    #[source]
    pub source: EditError,
}

/// Outcome of a successful run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptReport {
    /// Steps that changed the document
    pub applied: Vec<String>,
    /// Steps whose pattern matched nothing
    pub unchanged: Vec<String>,
}

/// An ordered list of edits.
///
/// Order is significant: later steps see the document exactly as earlier ones
/// left it, and several steps only work because of what ran before them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Script {
    steps: Vec<Step>,
}

impl Script {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step, builder style.
    pub fn step(mut self, name: impl Into<String>, cmd: Cmd) -> Self {
        self.push(name, cmd);
        self
    }

    pub fn push(&mut self, name: impl Into<String>, cmd: Cmd) {
        self.steps.push(Step {
            name: name.into(),
            cmd,
        });
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.steps.iter().position(|step| step.name == name)
    }

    /// Apply every step in order, stopping at the first failure.
    pub fn run(&self, doc: &mut Document) -> Result<ScriptReport, ScriptError> {
        let mut report = ScriptReport::default();

        for (index, step) in self.steps.iter().enumerate() {
            let patch = doc.apply(step.cmd.clone()).map_err(|source| ScriptError {
                step: step.name.clone(),
                source,
            })?;

            if patch.is_noop() {
                log::debug!("step {index} '{}': no match", step.name);
                report.unchanged.push(step.name.clone());
            } else {
                log::debug!(
                    "step {index} '{}': {} -> {} lines",
                    step.name,
                    patch.lines_before,
                    patch.lines_after
                );
                report.applied.push(step.name.clone());
            }
        }

        Ok(report)
    }
}

fn assign(name: &str, value: &str) -> Cmd {
    Cmd::ReplaceAssignment {
        name: name.to_string(),
        value: value.to_string(),
    }
}

fn substitute(old: &str, new: &str) -> Cmd {
    Cmd::ReplaceSubstring {
        old: old.to_string(),
        new: new.to_string(),
    }
}

/// The Unix to MSVC translation for the samtools Makefile.
pub fn msvc_script(flags: &FlagSet) -> Script {
    Script::new()
        .step("compiler", assign("CC", "cl"))
        .step("cflags", assign("CFLAGS", &flags.cflags))
        .step("ldflags", assign("LDFLAGS", &flags.ldflags))
        .step("libs", assign("LIBS", MSVC_LIBS))
        .step("lz4-dir", assign("LZ4DIR", "lz4"))
        .step("lz4-ldflags", assign("LZ4_LDFLAGS", "/libpath:$(LZ4DIR)"))
        .step(
            "drop-misc-programs",
            Cmd::RemoveBlock {
                pattern: "MISC_PROGRAMS =".to_string(),
            },
        )
        .step(
            "misc-programs",
            Cmd::Prepend {
                line: MISC_PROGRAMS.to_string(),
            },
        )
        .step("all-libs", assign("ALL_LIBS", "$(LIBS)"))
        .step(
            "msvc-sam-object",
            substitute("bam_reheader.o ", "bam_reheader.o sam_msvc.o "),
        )
        .step(
            "config-mk",
            Cmd::ReplaceBlock {
                pattern: "config.mk:".to_string(),
                lines: CONFIG_MK_RECIPE.iter().map(|line| line.to_string()).collect(),
            },
        )
        .step(
            "drop-curses-probe",
            Cmd::RemoveLinesStartingWith {
                pattern: "\techo '#define HAVE_CURSES".to_string(),
            },
        )
        .step("compile-rule", substitute("-c -o $@ $<", "/c /Fo$@ $<"))
        .step(
            "archive-lobjs",
            substitute("$(AR) -csru $@ $(LOBJS)", "lib $(LOBJS) /out:$@"),
        )
        .step(
            "link-executable",
            substitute("$(CC) $(ALL_LDFLAGS) -o $@", "link $(ALL_LDFLAGS) /out:$@.exe"),
        )
        .step("drop-lpthread", substitute("-lpthread", ""))
        .step(
            "archive-libst",
            substitute("$(AR) -rcs $@ $(LIBST_OBJS)", "lib $(LIBST_OBJS) /out:$@"),
        )
        .step(
            "link-all-ldflags",
            substitute("$(CC) $(ALL_LDFLAGS)", "link $(ALL_LDFLAGS)"),
        )
        .step("link-ldflags", substitute("$(CC) $(LDFLAGS)", "link $(LDFLAGS)"))
        .step("output-flag", substitute("-o $@", "/out:$@"))
        // Extension rewrites go last: earlier steps still match on literal `.o`
        .step("object-extension", substitute(".o", ".obj"))
        .step("archive-extension", substitute(".a", ".lib"))
}
