//! Add todo use case

use crate::application::input::check_title;
use crate::domain::mutator::{render_headline, render_planning_line};
use crate::domain::{CaptureTarget, Entry, Mutation, PlanningKeyword, Priority, TodoState};
use crate::error::{OrgendaError, Result};
use crate::infrastructure::{DocumentRepository, FileSystemRepository};
use chrono::NaiveDate;
use log::info;
use std::path::PathBuf;

/// A task to be added
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTodo {
    pub title: String,
    pub priority: Option<Priority>,
    pub tags: Vec<String>,
    pub scheduled: Option<NaiveDate>,
    pub deadline: Option<NaiveDate>,
}

impl NewTodo {
    pub fn new(title: impl Into<String>) -> Self {
        NewTodo {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Headline plus planning lines, newline-terminated.
    pub fn to_entry_text(&self) -> String {
        let mut entry = Entry::new(1, self.title.trim()).with_status(TodoState::Todo);
        entry.priority = self.priority;
        entry.tags = self.tags.clone();

        let mut text = render_headline(1, &entry);
        text.push('\n');
        for (keyword, date) in [
            (PlanningKeyword::Scheduled, self.scheduled),
            (PlanningKeyword::Deadline, self.deadline),
        ] {
            if let Some(date) = date {
                text.push_str(&render_planning_line(keyword, date));
                text.push('\n');
            }
        }
        text
    }
}

/// Where the task goes
#[derive(Debug, Clone, Default)]
pub struct AddTodoOptions {
    pub file: Option<String>,
    pub target: CaptureTarget,
    pub prepend: bool,
}

/// Service for adding tasks
pub struct AddTodoService {
    repository: FileSystemRepository,
}

impl AddTodoService {
    pub fn new(repository: FileSystemRepository) -> Self {
        Self { repository }
    }

    /// Add the task and return the document it was written to.
    pub fn execute(&self, todo: &NewTodo, options: &AddTodoOptions) -> Result<PathBuf> {
        check_title(&todo.title)?;

        let config = self.repository.load_config()?;
        let documents = self.repository.resolve_documents(&config.org_files);
        let path = config
            .add_target(options.file.as_deref(), &documents)?
            .ok_or(OrgendaError::NoTargetFile)?;

        let document = self.repository.read_document_or_empty(&path)?;
        let updated = Mutation::InsertEntry {
            target: options.target.clone(),
            prepend: options.prepend,
            text: todo.to_entry_text(),
        }
        .apply(&document)?;
        self.repository.write_document(&updated)?;

        info!(
            "event=add_todo module=application status=ok path={}",
            path.display()
        );
        Ok(path)
    }
}
