#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Sandbox with its own config file and org directory
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("org")).unwrap();
        Workspace { dir }
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join("config.toml")
    }

    pub fn org_dir(&self) -> PathBuf {
        self.dir.path().join("org")
    }

    /// Write `name` under the org directory and return its path.
    pub fn write_org(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.org_dir().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    pub fn read_org(&self, name: &str) -> String {
        fs::read_to_string(self.org_dir().join(name)).unwrap()
    }

    /// Config listing the org directory, plus any extra TOML lines.
    pub fn write_config(&self, extra: &str) {
        let contents = format!(
            "org_files = [{}]\n{}",
            toml_string(&self.org_dir()),
            extra
        );
        fs::write(self.config_path(), contents).unwrap();
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = orgenda_cmd();
        cmd.env("ORGENDA_CONFIG", self.config_path());
        cmd
    }
}

/// Quoted TOML string for a path
pub fn toml_string(path: &Path) -> String {
    format!("{:?}", path.to_string_lossy())
}

pub fn orgenda_cmd() -> Command {
    let mut cmd = Command::cargo_bin("orgenda").unwrap();
    cmd.env_remove("ORGENDA_CONFIG");
    cmd.env_remove("ORGENDA_LOG");
    cmd.env_remove("XDG_CONFIG_HOME");
    cmd
}
