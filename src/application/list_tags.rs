//! List tags use case

use crate::domain::query::unique_tags;
use crate::error::Result;
use crate::infrastructure::FileSystemRepository;
use log::debug;

/// Service for listing all tags used across documents.
pub struct ListTagsService {
    repository: FileSystemRepository,
}

impl ListTagsService {
    pub fn new(repository: FileSystemRepository) -> Self {
        Self { repository }
    }

    pub fn execute(&self) -> Result<Vec<String>> {
        let config = self.repository.load_config()?;
        let entries = self.repository.load_entries(&config);
        let tags = unique_tags(&entries);

        debug!(
            "event=list_tags module=application status=ok entries={} tags={}",
            entries.len(),
            tags.len()
        );
        Ok(tags)
    }
}
