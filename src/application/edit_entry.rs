//! Edit an existing entry in place

use crate::application::input::{check_title, FieldUpdate};
use crate::domain::{Entry, Mutation, PlanningKeyword, Priority, SourceLocation, TodoState};
use crate::error::{OrgendaError, Result};
use crate::infrastructure::{DocumentRepository, FileSystemRepository};
use chrono::NaiveDate;
use log::info;

/// Requested changes; `None` leaves a field alone
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryEdit {
    pub status: Option<FieldUpdate<TodoState>>,
    pub priority: Option<FieldUpdate<Priority>>,
    pub title: Option<String>,
    pub tags: Option<Vec<String>>,
    pub scheduled: Option<NaiveDate>,
    pub deadline: Option<NaiveDate>,
}

impl EntryEdit {
    pub fn is_empty(&self) -> bool {
        !self.touches_headline() && self.scheduled.is_none() && self.deadline.is_none()
    }

    fn touches_headline(&self) -> bool {
        self.status.is_some() || self.priority.is_some() || self.title.is_some() || self.tags.is_some()
    }

    /// Apply the headline fields to a tokenized headline
    fn apply_to(&self, entry: &mut Entry) {
        if let Some(status) = self.status {
            entry.status = match status {
                FieldUpdate::Set(state) => Some(state),
                FieldUpdate::Clear => None,
            };
        }
        if let Some(priority) = self.priority {
            entry.priority = match priority {
                FieldUpdate::Set(p) => Some(p),
                FieldUpdate::Clear => None,
            };
        }
        if let Some(title) = &self.title {
            entry.title = title.trim().to_string();
        }
        if let Some(tags) = &self.tags {
            entry.tags = tags.clone();
        }
    }

    /// Edits to run in order against the headline at `index`
    fn mutations(&self, index: usize, mut current: Entry) -> Vec<Mutation> {
        let mut mutations = Vec::new();
        if self.touches_headline() {
            self.apply_to(&mut current);
            mutations.push(Mutation::RewriteHeadline {
                index,
                entry: current,
            });
        }
        for (keyword, date) in [
            (PlanningKeyword::Scheduled, self.scheduled),
            (PlanningKeyword::Deadline, self.deadline),
        ] {
            if let Some(date) = date {
                mutations.push(Mutation::UpdateTimestamp {
                    index,
                    keyword,
                    date,
                });
            }
        }
        mutations
    }
}

pub struct EditEntryService {
    repository: FileSystemRepository,
}

impl EditEntryService {
    pub fn new(repository: FileSystemRepository) -> Self {
        Self { repository }
    }

    /// Apply all changes in memory, write once, and return the updated entry.
    pub fn execute(&self, location: &SourceLocation, edit: &EntryEdit) -> Result<Entry> {
        if edit.is_empty() {
            return Err(OrgendaError::InvalidArgument(
                "Nothing to change: pass at least one field to edit".to_string(),
            ));
        }
        if let Some(title) = &edit.title {
            check_title(title)?;
        }

        let document = self.repository.read_document(&location.document)?;
        let index = location.index();
        let current = document.headline_at(index)?;

        let updated = Mutation::apply_all(&edit.mutations(index, current), &document)?;
        self.repository.write_document(&updated)?;

        info!(
            "event=edit_entry module=application status=ok location={}",
            location
        );
        updated
            .entry_at_line(location.line)
            .ok_or_else(|| OrgendaError::NotAHeadline {
                document: updated.display_name(),
                line: location.line,
            })
    }
}
