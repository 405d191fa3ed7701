//! Configuration management

use crate::error::{OrgendaError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that points at the config file
pub const CONFIG_ENV: &str = "ORGENDA_CONFIG";

/// Keys accepted by `config get` / `config set`
pub const CONFIG_KEYS: [&str; 5] = [
    "default_file",
    "capture.default_file",
    "capture.format",
    "capture.prepend",
    "capture.heading",
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Files and directories searched for documents
    pub org_files: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_file: Option<String>,
    pub capture: CaptureConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    pub prepend: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub olp: Vec<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn optional(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

impl Config {
    /// Load config from a TOML file. A missing file yields the default config.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Config::default()),
            Err(e) => {
                return Err(OrgendaError::Document {
                    path: path.to_path_buf(),
                    source: e,
                })
            }
        };

        toml::from_str(&contents).map_err(|e| {
            OrgendaError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    /// Save config, creating parent directories as needed
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Target for `todo add`: explicit file, then `default_file`, then the
    /// first discovered document.
    pub fn add_target(
        &self,
        explicit: Option<&str>,
        documents: &[PathBuf],
    ) -> Result<Option<PathBuf>> {
        let target = explicit
            .filter(|f| !f.is_empty())
            .or_else(|| non_empty(&self.default_file))
            .map(expand_path)
            .transpose()?;
        Ok(target.or_else(|| documents.first().cloned()))
    }

    /// Target for `capture` before date tokens are rendered: explicit file,
    /// `capture.default_file`, `default_file`, then the first discovered document.
    pub fn capture_target(&self, explicit: Option<&str>, documents: &[PathBuf]) -> Option<String> {
        explicit
            .filter(|f| !f.is_empty())
            .or_else(|| non_empty(&self.capture.default_file))
            .or_else(|| non_empty(&self.default_file))
            .map(str::to_string)
            .or_else(|| {
                documents
                    .first()
                    .map(|doc| doc.to_string_lossy().into_owned())
            })
    }

    /// Get a single value by dotted key
    pub fn get(&self, key: &str) -> Result<String> {
        let value = match key {
            "default_file" => self.default_file.clone().unwrap_or_default(),
            "capture.default_file" => self.capture.default_file.clone().unwrap_or_default(),
            "capture.format" => self.capture.format.clone().unwrap_or_default(),
            "capture.prepend" => self.capture.prepend.to_string(),
            "capture.heading" => self.capture.heading.clone().unwrap_or_default(),
            _ => return Err(OrgendaError::UnknownConfigKey(key.to_string())),
        };
        Ok(value)
    }

    /// Set a single value by dotted key. An empty value clears optional keys.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "default_file" => self.default_file = optional(value),
            "capture.default_file" => self.capture.default_file = optional(value),
            "capture.format" => self.capture.format = optional(value),
            "capture.prepend" => {
                self.capture.prepend = value.trim().parse().map_err(|_| {
                    OrgendaError::Config(format!(
                        "Invalid value for capture.prepend: '{}'. Use true or false",
                        value
                    ))
                })?;
            }
            "capture.heading" => self.capture.heading = optional(value),
            _ => return Err(OrgendaError::UnknownConfigKey(key.to_string())),
        }
        Ok(())
    }
}

/// Expand `~` and `$VAR` / `${VAR}` references in a configured path.
pub fn expand_path(path: &str) -> Result<PathBuf> {
    let expanded = shellexpand::full(path)
        .map_err(|e| OrgendaError::Config(format!("Cannot expand path '{}': {}", path, e)))?;
    Ok(PathBuf::from(expanded.as_ref()))
}

/// First candidate config location, given a lookup for environment variables.
///
/// Order: explicit flag, `ORGENDA_CONFIG`, `$XDG_CONFIG_HOME/orgenda/config.toml`,
/// `$HOME/.config/orgenda/config.toml`.
pub fn config_path_from<F>(explicit: Option<&Path>, env: F) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    let env = |key: &str| env(key).filter(|v| !v.is_empty());

    explicit
        .map(Path::to_path_buf)
        .or_else(|| env(CONFIG_ENV).map(PathBuf::from))
        .or_else(|| {
            env("XDG_CONFIG_HOME").map(|dir| PathBuf::from(dir).join("orgenda").join("config.toml"))
        })
        .or_else(|| {
            env("HOME").map(|home| {
                PathBuf::from(home)
                    .join(".config")
                    .join("orgenda")
                    .join("config.toml")
            })
        })
}

/// Resolve the config file location from the process environment
pub fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    config_path_from(explicit, |key| std::env::var(key).ok()).ok_or_else(|| {
        OrgendaError::Config(format!(
            "Cannot locate config file: set {} or HOME, or pass --config",
            CONFIG_ENV
        ))
    })
}
