//! Output formatting utilities

use crate::application::agenda::{Agenda, AgendaReason};
use crate::domain::Entry;
use crate::infrastructure::Config;
use serde::Serialize;

/// Entry as exposed in JSON output, with a `FILE:LINE` id usable by `todo done`
#[derive(Debug, Serialize)]
pub struct EntryView<'a> {
    pub id: String,
    #[serde(flatten)]
    pub entry: &'a Entry,
}

impl<'a> EntryView<'a> {
    pub fn new(entry: &'a Entry) -> Self {
        EntryView {
            id: location_of(entry),
            entry,
        }
    }

    pub fn list(entries: &'a [Entry]) -> Vec<Self> {
        entries.iter().map(EntryView::new).collect()
    }
}

fn location_of(entry: &Entry) -> String {
    entry
        .location
        .as_ref()
        .map_or_else(String::new, |loc| loc.to_string())
}

fn tag_suffix(entry: &Entry) -> String {
    if entry.tags.is_empty() {
        String::new()
    } else {
        format!(" :{}:", entry.tags.join(":"))
    }
}

/// `[TODO] [#A] Title (file:line) :tags:`
pub fn format_todo_line(entry: &Entry) -> String {
    let status = entry.status.map_or("", |s| s.keyword());
    let priority = entry
        .priority
        .map_or_else(String::new, |p| format!("[#{}] ", p));
    format!(
        "[{}] {}{} ({}){}",
        status,
        priority,
        entry.title,
        location_of(entry),
        tag_suffix(entry)
    )
}

/// Format tasks for display, one per line
pub fn format_todo_list(entries: &[Entry]) -> String {
    if entries.is_empty() {
        return "No tasks found".to_string();
    }

    let mut output = String::new();
    for entry in entries {
        output.push_str(&format_todo_line(entry));
        output.push('\n');
    }
    output
}

/// Header plus one line per item: `Sched: 2026-01-05: [TODO] Title (file:line)`
pub fn format_agenda(agenda: &Agenda) -> String {
    let mut output = format!("Agenda for {} to {}:\n", agenda.start, agenda.end);
    if agenda.items.is_empty() {
        output.push_str("No entries scheduled\n");
        return output;
    }

    for item in &agenda.items {
        let label = match item.reason {
            AgendaReason::Scheduled => "Sched:",
            AgendaReason::Deadline => "Dead: ",
        };
        output.push_str(&format!(
            "{} {}: {}\n",
            label,
            item.date.format("%Y-%m-%d"),
            format_todo_line(&item.entry)
        ));
    }
    output
}

/// Format a list of tags for display.
pub fn format_tag_list(tags: &[String]) -> String {
    if tags.is_empty() {
        return "No tags found".to_string();
    }

    let mut output = String::new();
    for tag in tags {
        output.push_str(tag);
        output.push('\n');
    }
    output
}

/// `key = value` lines for every setting
pub fn format_config(config: &Config) -> String {
    let mut output = String::new();
    if config.org_files.is_empty() {
        output.push_str("org_files = (none)\n");
    } else {
        output.push_str("org_files =\n");
        for path in &config.org_files {
            output.push_str(&format!("  {}\n", path));
        }
    }

    let optional = |value: &Option<String>| value.clone().unwrap_or_default();
    output.push_str(&format!("default_file = {}\n", optional(&config.default_file)));
    output.push_str(&format!(
        "capture.default_file = {}\n",
        optional(&config.capture.default_file)
    ));
    output.push_str(&format!(
        "capture.format = {}\n",
        optional(&config.capture.format).escape_default()
    ));
    output.push_str(&format!("capture.prepend = {}\n", config.capture.prepend));
    output.push_str(&format!(
        "capture.heading = {}\n",
        optional(&config.capture.heading)
    ));
    if !config.capture.olp.is_empty() {
        output.push_str(&format!("capture.olp = {}\n", config.capture.olp.join(" / ")));
    }
    output
}
