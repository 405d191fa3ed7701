//! Mark a task as done

use crate::domain::{Entry, Mutation, SourceLocation};
use crate::error::Result;
use crate::infrastructure::{DocumentRepository, FileSystemRepository};
use log::info;

pub struct CompleteTodoService {
    repository: FileSystemRepository,
}

impl CompleteTodoService {
    pub fn new(repository: FileSystemRepository) -> Self {
        Self { repository }
    }

    /// Set the task at `location` to DONE and return the rewritten entry.
    pub fn execute(&self, location: &SourceLocation) -> Result<Entry> {
        let document = self.repository.read_document(&location.document)?;
        let updated = Mutation::Complete {
            index: location.index(),
        }
        .apply(&document)?;
        self.repository.write_document(&updated)?;

        info!(
            "event=complete_todo module=application status=ok location={}",
            location
        );
        updated.headline_at(location.index())
    }
}
