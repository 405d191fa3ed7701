//! File system repository

use crate::domain::{Document, Entry};
use crate::error::{OrgendaError, Result};
use crate::infrastructure::config::{expand_path, Config};
use log::{debug, warn};
use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use walkdir::WalkDir;

const ORG_EXTENSION: &str = "org";

/// Abstract document storage
pub trait DocumentRepository {
    /// Expand configured files and directories into concrete document paths
    fn resolve_documents(&self, paths: &[String]) -> Vec<PathBuf>;

    /// Read a whole document
    fn read_document(&self, path: &Path) -> Result<Document>;

    /// Replace a whole document in one write
    fn write_document(&self, document: &Document) -> Result<()>;
}

/// File system implementation of DocumentRepository
#[derive(Debug, Clone)]
pub struct FileSystemRepository {
    pub config_path: PathBuf,
}

fn is_org_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == ORG_EXTENSION)
}

impl FileSystemRepository {
    /// Create a new repository backed by the given config file
    pub fn new(config_path: PathBuf) -> Self {
        FileSystemRepository { config_path }
    }

    pub fn load_config(&self) -> Result<Config> {
        Config::load(&self.config_path)
    }

    pub fn save_config(&self, config: &Config) -> Result<()> {
        config.save(&self.config_path)
    }

    /// Read a document, treating a missing file as empty
    pub fn read_document_or_empty(&self, path: &Path) -> Result<Document> {
        if !path.exists() {
            debug!(
                "event=document_read module=repository status=missing path={}",
                path.display()
            );
            return Ok(Document::empty(path));
        }
        self.read_document(path)
    }

    /// Parse every configured document. Unreadable documents are skipped.
    pub fn load_entries(&self, config: &Config) -> Vec<Entry> {
        let mut entries = Vec::new();
        for path in self.resolve_documents(&config.org_files) {
            match self.read_document(&path) {
                Ok(document) => entries.extend(document.entries()),
                Err(e) => warn!(
                    "event=document_read module=repository status=skipped path={} error={}",
                    path.display(),
                    e
                ),
            }
        }
        entries
    }

    fn collect_directory(dir: &Path, out: &mut Vec<PathBuf>) {
        let walker = WalkDir::new(dir).sort_by_file_name().into_iter();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(
                        "event=document_scan module=repository status=error dir={} error={}",
                        dir.display(),
                        e
                    );
                    continue;
                }
            };
            if entry.file_type().is_file() && is_org_file(entry.path()) {
                out.push(entry.into_path());
            }
        }
    }
}

impl DocumentRepository for FileSystemRepository {
    fn resolve_documents(&self, paths: &[String]) -> Vec<PathBuf> {
        let mut found = Vec::new();

        for raw in paths {
            let path = match expand_path(raw) {
                Ok(path) => path,
                Err(e) => {
                    warn!(
                        "event=document_scan module=repository status=skipped path={} error={}",
                        raw, e
                    );
                    continue;
                }
            };
            if path.is_dir() {
                Self::collect_directory(&path, &mut found);
            } else if path.is_file() {
                if is_org_file(&path) {
                    found.push(path);
                } else {
                    debug!(
                        "event=document_scan module=repository status=ignored path={}",
                        path.display()
                    );
                }
            } else {
                warn!(
                    "event=document_scan module=repository status=missing path={}",
                    path.display()
                );
            }
        }

        let mut seen = HashSet::new();
        found.retain(|path| seen.insert(path.clone()));
        found
    }

    fn read_document(&self, path: &Path) -> Result<Document> {
        let text = fs::read_to_string(path).map_err(|e| OrgendaError::Document {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(Document::from_text(path, &text))
    }

    /// Atomic replace: write a temp file beside the target, then persist it
    /// over the target. The temp file is removed if any step fails.
    fn write_document(&self, document: &Document) -> Result<()> {
        let path = document.path();
        if path.as_os_str().is_empty() {
            return Err(OrgendaError::EmptyDocumentPath);
        }

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        if !dir.exists() {
            fs::create_dir_all(dir)?;
        }

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(document.to_text().as_bytes())?;
        tmp.persist(path).map_err(|e| OrgendaError::Document {
            path: path.to_path_buf(),
            source: e.error,
        })?;

        debug!(
            "event=document_write module=repository status=ok path={} lines={}",
            path.display(),
            document.lines.len()
        );
        Ok(())
    }
}
