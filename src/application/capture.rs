//! Capture use case: template-rendered text inserted at a target

use crate::domain::template::render_path;
use crate::domain::{CaptureTarget, CaptureTemplate, Mutation};
use crate::error::{OrgendaError, Result};
use crate::infrastructure::config::expand_path;
use crate::infrastructure::{DocumentRepository, FileSystemRepository};
use chrono::NaiveDateTime;
use log::{debug, info};
use std::path::PathBuf;

/// Overrides for the configured capture settings
#[derive(Debug, Clone, Default)]
pub struct CaptureOptions {
    pub file: Option<String>,
    pub heading: Option<String>,
    pub olp: Vec<String>,
    /// Forces prepend on; otherwise the configured value applies
    pub prepend: bool,
}

pub struct CaptureService {
    repository: FileSystemRepository,
}

impl CaptureService {
    pub fn new(repository: FileSystemRepository) -> Self {
        Self { repository }
    }

    /// Capture `content` and return the document it went into.
    pub fn execute(
        &self,
        content: &str,
        options: &CaptureOptions,
        now: NaiveDateTime,
    ) -> Result<PathBuf> {
        let config = self.repository.load_config()?;
        let documents = self.repository.resolve_documents(&config.org_files);
        let raw_target = config
            .capture_target(options.file.as_deref(), &documents)
            .ok_or(OrgendaError::NoTargetFile)?;
        let path = expand_path(&render_path(&raw_target, now))?;

        // Command-line placement replaces the configured one as a whole
        let target = if options.heading.is_some() || !options.olp.is_empty() {
            CaptureTarget::from_parts(options.heading.clone(), options.olp.clone())
        } else {
            CaptureTarget::from_parts(config.capture.heading.clone(), config.capture.olp.clone())
        };
        let prepend = options.prepend || config.capture.prepend;

        let template = CaptureTemplate::from_config(config.capture.format.as_deref());
        let text = template.render(content, now);
        debug!(
            "event=capture_render module=application status=ok target={:?} prepend={} bytes={}",
            target,
            prepend,
            text.len()
        );

        let document = self.repository.read_document_or_empty(&path)?;
        let updated = Mutation::InsertEntry {
            target,
            prepend,
            text,
        }
        .apply(&document)?;
        self.repository.write_document(&updated)?;

        info!(
            "event=capture module=application status=ok path={}",
            path.display()
        );
        Ok(path)
    }
}
