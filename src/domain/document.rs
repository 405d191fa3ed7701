//! Whole-document model and the single-pass entry parser

use crate::domain::entry::{Entry, PlanningKeyword, SourceLocation};
use crate::domain::tokenizer::{is_planning_line, tokenize_headline, tokenize_timestamp};
use crate::error::{OrgendaError, Result};
use std::path::{Path, PathBuf};

/// A document held as an ordered sequence of lines.
///
/// The final newline is remembered as a flag rather than stored as an empty
/// last line, so an untouched document serializes back byte-for-byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub id: PathBuf,
    pub lines: Vec<String>,
    pub trailing_newline: bool,
}

impl Document {
    pub fn new(id: PathBuf, lines: Vec<String>, trailing_newline: bool) -> Self {
        Document {
            id,
            lines,
            trailing_newline,
        }
    }

    /// Split text into lines.
    pub fn from_text(id: impl Into<PathBuf>, text: &str) -> Self {
        let trailing_newline = text.ends_with('\n');
        let body = text.strip_suffix('\n').unwrap_or(text);
        let lines = if text.is_empty() {
            Vec::new()
        } else {
            body.split('\n').map(str::to_string).collect()
        };

        Document {
            id: id.into(),
            lines,
            trailing_newline,
        }
    }

    /// An empty document, as used when capturing into a file that does not exist yet.
    pub fn empty(id: impl Into<PathBuf>) -> Self {
        Document {
            id: id.into(),
            lines: Vec::new(),
            trailing_newline: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.id
    }

    pub fn to_text(&self) -> String {
        let mut text = self.lines.join("\n");
        if self.trailing_newline && !self.lines.is_empty() {
            text.push('\n');
        }
        text
    }

    /// Replace the line sequence, keeping identity and newline policy.
    pub fn with_lines(&self, lines: Vec<String>) -> Self {
        Document {
            id: self.id.clone(),
            lines,
            trailing_newline: self.trailing_newline,
        }
    }

    /// Parse this document into entries.
    pub fn entries(&self) -> Vec<Entry> {
        parse(&self.lines, &self.id)
    }

    /// Display name used in error messages
    pub fn display_name(&self) -> String {
        self.id.display().to_string()
    }

    /// Tokenize the headline at a 0-based index.
    pub fn headline_at(&self, index: usize) -> Result<Entry> {
        let line = self
            .lines
            .get(index)
            .ok_or_else(|| OrgendaError::LineOutOfRange {
                document: self.display_name(),
                line: index + 1,
                len: self.lines.len(),
            })?;
        tokenize_headline(line).ok_or_else(|| OrgendaError::NotAHeadline {
            document: self.display_name(),
            line: index + 1,
        })
    }

    /// Fully parsed entry whose headline sits on the given 1-based line
    pub fn entry_at_line(&self, line: usize) -> Option<Entry> {
        self.entries()
            .into_iter()
            .find(|entry| entry.line_number() == line)
    }
}

/// Parse a line sequence into a flat, ordered list of entries.
///
/// Content before the first headline is not represented.
pub fn parse<S: AsRef<str>>(lines: &[S], document_id: &Path) -> Vec<Entry> {
    let mut entries: Vec<Entry> = Vec::new();
    let mut body: Vec<&str> = Vec::new();

    for (index, line) in lines.iter().enumerate() {
        let line = line.as_ref();

        if let Some(mut entry) = tokenize_headline(line) {
            flush_body(&mut entries, &mut body);
            entry.location = Some(SourceLocation::new(document_id.to_path_buf(), index + 1));
            entries.push(entry);
            continue;
        }

        let Some(current) = entries.last_mut() else {
            continue;
        };

        // Last occurrence of a keyword wins
        for keyword in PlanningKeyword::ALL {
            if let Some(date) = tokenize_timestamp(line, keyword) {
                current.set_planning(keyword, Some(date));
            }
        }

        if !is_planning_line(line) {
            body.push(line);
        }
    }

    flush_body(&mut entries, &mut body);
    entries
}

fn flush_body(entries: &mut [Entry], body: &mut Vec<&str>) {
    if let Some(current) = entries.last_mut() {
        current.body = body.join("\n");
    }
    body.clear();
}
