//! List todos use case

use crate::domain::query::{sort_entries, SortKey, TodoFilter};
use crate::domain::Entry;
use crate::error::Result;
use crate::infrastructure::FileSystemRepository;
use log::debug;

/// Options for listing tasks
#[derive(Debug, Clone, Default)]
pub struct ListTodosOptions {
    pub filter: TodoFilter,
    pub sort: SortKey,
    pub descending: bool,
}

/// Service for listing tasks across all configured documents
pub struct ListTodosService {
    repository: FileSystemRepository,
}

impl ListTodosService {
    pub fn new(repository: FileSystemRepository) -> Self {
        Self { repository }
    }

    pub fn execute(&self, options: &ListTodosOptions) -> Result<Vec<Entry>> {
        let config = self.repository.load_config()?;
        let entries = self.repository.load_entries(&config);
        let total = entries.len();

        let mut todos = options.filter.apply(entries);
        sort_entries(&mut todos, options.sort, options.descending);

        debug!(
            "event=list_todos module=application status=ok scanned={} matched={}",
            total,
            todos.len()
        );
        Ok(todos)
    }
}
