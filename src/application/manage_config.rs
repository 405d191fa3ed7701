//! Config management use case

use crate::error::Result;
use crate::infrastructure::config::expand_path;
use crate::infrastructure::{Config, FileSystemRepository};
use log::info;
use std::path::{Path, PathBuf};

/// Outcome of an `add-path` / `remove-path` request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathChange {
    Added(String),
    AlreadyPresent(String),
    Removed(String),
    NotPresent(String),
}

/// Service for reading and updating the config file
pub struct ConfigService {
    repository: FileSystemRepository,
}

/// Absolute form of a user-supplied path; `~` and variables are expanded first.
fn absolute(raw: &str) -> Result<String> {
    let path = expand_path(raw)?;
    let path: PathBuf = if path.is_absolute() {
        path
    } else {
        std::env::current_dir()?.join(path)
    };
    Ok(normalize(&path).to_string_lossy().into_owned())
}

/// Lexically drop `.` components and fold `..`
fn normalize(path: &Path) -> PathBuf {
    use std::path::Component;

    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

impl ConfigService {
    pub fn new(repository: FileSystemRepository) -> Self {
        ConfigService { repository }
    }

    pub fn config_path(&self) -> &Path {
        &self.repository.config_path
    }

    pub fn get(&self, key: &str) -> Result<String> {
        self.repository.load_config()?.get(key)
    }

    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut config = self.repository.load_config()?;
        config.set(key, value)?;
        self.repository.save_config(&config)?;
        info!(
            "event=config_set module=application status=ok key={}",
            key
        );
        Ok(())
    }

    pub fn list(&self) -> Result<Config> {
        self.repository.load_config()
    }

    pub fn add_path(&self, raw: &str) -> Result<PathChange> {
        let path = absolute(raw)?;
        let mut config = self.repository.load_config()?;
        if config.org_files.contains(&path) {
            return Ok(PathChange::AlreadyPresent(path));
        }

        config.org_files.push(path.clone());
        self.repository.save_config(&config)?;
        info!(
            "event=config_add_path module=application status=ok path={}",
            path
        );
        Ok(PathChange::Added(path))
    }

    pub fn remove_path(&self, raw: &str) -> Result<PathChange> {
        let path = absolute(raw)?;
        let mut config = self.repository.load_config()?;
        let before = config.org_files.len();
        config.org_files.retain(|p| p != &path);
        if config.org_files.len() == before {
            return Ok(PathChange::NotPresent(path));
        }

        self.repository.save_config(&config)?;
        info!(
            "event=config_remove_path module=application status=ok path={}",
            path
        );
        Ok(PathChange::Removed(path))
    }
}
