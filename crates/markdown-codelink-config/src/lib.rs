use serde::Deserialize;
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

    #[error("Invalid config file at {config_path}: {reason}")]
    ConfigInvalid { config_path: PathBuf, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Folder of markdown documents to check.
    pub docs_path: PathBuf,
    /// Info-string keyword that marks a code-link block.
    #[serde(default = "default_keyword")]
    pub keyword: String,
    /// Extension of the project file discovered next to each document.
    #[serde(default = "default_project_extension")]
    pub project_extension: String,
}

fn default_keyword() -> String {
    "csharp".to_string()
}

fn default_project_extension() -> String {
    "csproj".to_string()
}

impl Config {
    pub fn new(docs_path: impl Into<PathBuf>) -> Self {
        Self {
            docs_path: docs_path.into(),
            keyword: default_keyword(),
            project_extension: default_project_extension(),
        }
    }

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

        // Expand shell variables and tilde in the loaded docs path
        config.docs_path = Self::expand_path(&config.docs_path).unwrap_or(config.docs_path);
        config.normalize(config_path)?;

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/markdown-codelink");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }

    /// Trims the keyword, drops a leading dot from the extension, and
    /// rejects values that can never match.
    fn normalize(&mut self, config_path: &Path) -> Result<(), ConfigError> {
        let invalid = |reason: &str| ConfigError::ConfigInvalid {
            config_path: config_path.to_path_buf(),
            reason: reason.to_string(),
        };

        self.keyword = self.keyword.trim().to_string();
        if self.keyword.is_empty() || self.keyword.contains(char::is_whitespace) {
            return Err(invalid("keyword must be a single word"));
        }

        self.project_extension = self.project_extension.trim().trim_start_matches('.').to_string();
        if self.project_extension.is_empty() {
            return Err(invalid("project_extension must not be empty"));
        }

        Ok(())
    }
}
