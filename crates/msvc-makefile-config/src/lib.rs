use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// Where the translator reads and writes, and how the output is flavoured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Unix Makefile to translate
    pub input: PathBuf,
    /// Output file for the dynamically linked variant
    pub output: PathBuf,
    /// Appended to `output` for the statically linked variant
    pub static_suffix: String,
    /// Make variable naming the third-party dependency root in the flags
    pub third_party_var: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from("Makefile"),
            output: PathBuf::from("Makefile.msvc"),
            static_suffix: ".static".to_string(),
            third_party_var: "TPS".to_string(),
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the loaded paths
        config.input = Self::expand_path(&config.input).unwrap_or(config.input);
        config.output = Self::expand_path(&config.output).unwrap_or(config.output);

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/msvc-makefile");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Output path for the requested link variant.
    pub fn output_path(&self, static_link: bool) -> PathBuf {
        if static_link {
            let mut name = self.output.clone().into_os_string();
            name.push(&self.static_suffix);
            PathBuf::from(name)
        } else {
            self.output.clone()
        }
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}
