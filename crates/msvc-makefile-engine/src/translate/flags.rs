//! MSVC compiler and linker flag strings.

/// Make variable that points at the third-party dependency tree by default.
pub const DEFAULT_THIRD_PARTY_VAR: &str = "TPS";

const CFLAGS_TEMPLATE: &str = r"/MD /O2 /TC /I$(TPS)\zlib\include /I$(TPS)\pthreads4w\include /I$(TPS)\wingetopt\include /I$(TPS)\pcre2\include /DWINGETOPT_SHARED_LIB";

const LDFLAGS_TEMPLATE: &str = r"/libpath:$(TPS)\pcre2\lib /libpath:$(TPS)\pthreads4w\lib /libpath:$(TPS)\wingetopt\lib /libpath:$(TPS)\zlib\lib /libpath:$(TPS)\bzip2\lib /libpath:$(TPS)\xz\lib";

/// How the translated build links its third-party libraries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Linkage {
    #[default]
    Dynamic,
    Static,
}

impl Linkage {
    pub fn from_static_flag(static_link: bool) -> Self {
        if static_link {
            Linkage::Static
        } else {
            Linkage::Dynamic
        }
    }

    pub fn is_static(self) -> bool {
        self == Linkage::Static
    }
}

/// Compiler and linker flags for one translation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagSet {
    pub cflags: String,
    pub ldflags: String,
}

impl FlagSet {
    pub fn new(linkage: Linkage, third_party_var: &str) -> Self {
        Self {
            cflags: compiler_flags(linkage, third_party_var),
            ldflags: linker_flags(linkage, third_party_var),
        }
    }
}

impl Default for FlagSet {
    fn default() -> Self {
        Self::new(Linkage::Dynamic, DEFAULT_THIRD_PARTY_VAR)
    }
}

pub fn compiler_flags(linkage: Linkage, third_party_var: &str) -> String {
    let mut flags = with_third_party_var(CFLAGS_TEMPLATE, third_party_var);
    if linkage.is_static() {
        flags = flags
            .replace("/MD", "/MT")
            .replace(r"\include", r"\static\include")
            .replace(
                "WINGETOPT_SHARED_LIB",
                "PTW32_STATIC_LIB /DLZMA_API_STATIC  /DPCRE2_STATIC",
            );
    }
    flags
}

pub fn linker_flags(linkage: Linkage, third_party_var: &str) -> String {
    let flags = with_third_party_var(LDFLAGS_TEMPLATE, third_party_var);
    if linkage.is_static() {
        flags.replace(r"\lib", r"\static\lib")
    } else {
        flags
    }
}

fn with_third_party_var(template: &str, var: &str) -> String {
    if var == DEFAULT_THIRD_PARTY_VAR {
        template.to_string()
    } else {
        template.replace("$(TPS)", &format!("$({var})"))
    }
}
