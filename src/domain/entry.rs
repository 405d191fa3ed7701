//! Outline entry model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Status keyword carried by a headline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TodoState {
    #[serde(rename = "TODO")]
    Todo,
    #[serde(rename = "WAITING")]
    Waiting,
    #[serde(rename = "DONE")]
    Done,
}

impl TodoState {
    pub const ALL: [TodoState; 3] = [TodoState::Todo, TodoState::Waiting, TodoState::Done];

    /// Keyword as written in the outline
    pub fn keyword(&self) -> &'static str {
        match self {
            TodoState::Todo => "TODO",
            TodoState::Waiting => "WAITING",
            TodoState::Done => "DONE",
        }
    }

    /// Exact, case-sensitive keyword match.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|state| state.keyword() == keyword)
    }

    /// Sort rank: open before blocked before completed.
    /// Entries without a status rank after all of these.
    pub fn rank(&self) -> u8 {
        match self {
            TodoState::Todo => 0,
            TodoState::Waiting => 1,
            TodoState::Done => 2,
        }
    }
}

impl fmt::Display for TodoState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for TodoState {
    type Err = String;

    /// Lenient parse for user input (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_keyword(&s.trim().to_uppercase()).ok_or_else(|| {
            format!(
                "Invalid status: {}. Valid statuses are: TODO, WAITING, DONE",
                s
            )
        })
    }
}

/// Single-letter priority, e.g. `[#A]`. Lexical order is rank order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Priority(pub char);

impl Priority {
    pub fn new(letter: char) -> Option<Self> {
        letter.is_ascii_uppercase().then_some(Priority(letter))
    }

    pub fn letter(&self) -> char {
        self.0
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_alphabetic() => Ok(Priority(c.to_ascii_uppercase())),
            _ => Err(format!("Invalid priority: {}. Use a single letter (A, B, C)", s)),
        }
    }
}

/// Keyword of a planning line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlanningKeyword {
    Scheduled,
    Deadline,
}

impl PlanningKeyword {
    pub const ALL: [PlanningKeyword; 2] = [PlanningKeyword::Scheduled, PlanningKeyword::Deadline];

    pub fn as_str(&self) -> &'static str {
        match self {
            PlanningKeyword::Scheduled => "SCHEDULED",
            PlanningKeyword::Deadline => "DEADLINE",
        }
    }

    /// `SCHEDULED:` / `DEADLINE:` as it appears on a planning line
    pub fn marker(&self) -> String {
        format!("{}:", self.as_str())
    }
}

impl fmt::Display for PlanningKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position of a headline at parse time.
///
/// Only valid until the backing document is rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    pub document: PathBuf,
    /// 1-based line number
    pub line: usize,
}

impl SourceLocation {
    pub fn new(document: PathBuf, line: usize) -> Self {
        SourceLocation { document, line }
    }

    /// 0-based index into the document's lines
    pub fn index(&self) -> usize {
        self.line.saturating_sub(1)
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.document.display(), self.line)
    }
}

/// One headline and its associated data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub level: usize,
    pub status: Option<TodoState>,
    pub priority: Option<Priority>,
    pub title: String,
    pub tags: Vec<String>,
    pub scheduled: Option<NaiveDate>,
    pub deadline: Option<NaiveDate>,
    pub location: Option<SourceLocation>,
    pub body: String,
}

impl Entry {
    pub fn new(level: usize, title: impl Into<String>) -> Self {
        Entry {
            level,
            status: None,
            priority: None,
            title: title.into(),
            tags: Vec::new(),
            scheduled: None,
            deadline: None,
            location: None,
            body: String::new(),
        }
    }

    pub fn with_status(mut self, status: TodoState) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn planning(&self, keyword: PlanningKeyword) -> Option<NaiveDate> {
        match keyword {
            PlanningKeyword::Scheduled => self.scheduled,
            PlanningKeyword::Deadline => self.deadline,
        }
    }

    pub fn set_planning(&mut self, keyword: PlanningKeyword, date: Option<NaiveDate>) {
        match keyword {
            PlanningKeyword::Scheduled => self.scheduled = date,
            PlanningKeyword::Deadline => self.deadline = date,
        }
    }

    /// The date used for ranking: deadline wins over scheduled.
    pub fn ranking_date(&self) -> Option<NaiveDate> {
        self.deadline.or(self.scheduled)
    }

    /// 1-based line number, or 0 for entries that were never parsed
    pub fn line_number(&self) -> usize {
        self.location.as_ref().map_or(0, |loc| loc.line)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}
