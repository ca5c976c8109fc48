use mailcraft_compiler_html::CompileOptions;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_CONFIG_NAME: &str = "mailcraft.config.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

/// Mailcraft configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory containing template .json files
    #[serde(default = "default_src_dir")]
    pub src_dir: String,

    /// Directory compiled .html files are written to
    #[serde(default = "default_out_dir")]
    pub out_dir: String,

    #[serde(default)]
    pub compiler_options: CompilerOptions,
}

fn default_src_dir() -> String {
    "templates".to_string()
}

fn default_out_dir() -> String {
    "dist".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompilerOptions {
    /// Pretty print HTML
    pub pretty: bool,

    /// Indentation string
    pub indent: String,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        let defaults = CompileOptions::default();
        Self {
            pretty: defaults.pretty,
            indent: defaults.indent,
        }
    }
}

impl CompilerOptions {
    pub fn to_compile_options(&self) -> CompileOptions {
        CompileOptions {
            pretty: self.pretty,
            indent: self.indent.clone(),
            ..CompileOptions::default()
        }
    }
}

impl Config {
    /// Load config from a directory, falling back to defaults when absent
    pub fn load(cwd: &str) -> Result<Self, ConfigError> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let path = config_path.display().to_string();
        let content = std::fs::read_to_string(&config_path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse { path, source })
    }

    /// Get absolute path to source directory
    pub fn get_src_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.src_dir)
    }

    /// Get absolute path to output directory
    pub fn get_out_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.out_dir)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            src_dir: default_src_dir(),
            out_dir: default_out_dir(),
            compiler_options: CompilerOptions::default(),
        }
    }
}
