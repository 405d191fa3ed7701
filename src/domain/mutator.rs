//! Structure-preserving edits.
//!
//! Every operation takes the current line sequence and returns a complete new
//! one; nothing is written until the caller has the finished result. Only the
//! minimal span of lines is touched.

use crate::domain::document::Document;
use crate::domain::entry::{Entry, PlanningKeyword, TodoState};
use crate::domain::navigator::{immediate_body_end, resolve_path, subtree_end};
use crate::domain::tokenizer::{headline_level, tokenize_headline};
use crate::error::{OrgendaError, Result};
use chrono::NaiveDate;
use thiserror::Error;

/// Failure of a line-level edit. Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("line {line} is out of range ({len} lines)")]
    LineOutOfRange { line: usize, len: usize },

    #[error("line {line} is not a headline")]
    NotAHeadline { line: usize },

    #[error("line {line} is not a task")]
    NotATask { line: usize },

    #[error("target not found: {0}")]
    TargetNotFound(String),
}

/// Where captured text goes
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CaptureTarget {
    /// Start or end of the whole document
    #[default]
    Document,
    /// First heading anywhere in the document with this title
    Heading(String),
    /// Nested chain of titles (outline path)
    Path(Vec<String>),
}

impl CaptureTarget {
    /// Outline path wins over a single heading; empty values mean no target.
    pub fn from_parts(heading: Option<String>, olp: Vec<String>) -> Self {
        if !olp.is_empty() {
            CaptureTarget::Path(olp)
        } else {
            match heading {
                Some(h) if !h.is_empty() => CaptureTarget::Heading(h),
                _ => CaptureTarget::Document,
            }
        }
    }

    fn describe(&self) -> String {
        match self {
            CaptureTarget::Document => "<document>".to_string(),
            CaptureTarget::Heading(title) => title.clone(),
            CaptureTarget::Path(titles) => titles.join(" / "),
        }
    }
}

/// Computed insertion point for a capture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertionPlan {
    pub index: usize,
    /// Level the inserted top headline should end up at, if re-leveling applies
    pub level: Option<usize>,
}

/// `<2025-12-31 Wed>`
pub fn render_timestamp(date: NaiveDate) -> String {
    format!("<{}>", date.format("%Y-%m-%d %a"))
}

/// `SCHEDULED: <2025-12-31 Wed>`
pub fn render_planning_line(keyword: PlanningKeyword, date: NaiveDate) -> String {
    format!("{}: {}", keyword.as_str(), render_timestamp(date))
}

/// Compose a headline in canonical field order:
/// `*** STATUS [#P] Title :tag1:tag2:`
pub fn render_headline(level: usize, entry: &Entry) -> String {
    let mut line = "*".repeat(level.max(1));

    if let Some(status) = entry.status {
        line.push(' ');
        line.push_str(status.keyword());
    }
    if let Some(priority) = entry.priority {
        line.push_str(&format!(" [#{}]", priority));
    }

    line.push(' ');
    line.push_str(&entry.title);

    let tags: Vec<&str> = entry
        .tags
        .iter()
        .map(String::as_str)
        .filter(|t| !t.is_empty())
        .collect();
    if !tags.is_empty() {
        line.push_str(&format!(" :{}:", tags.join(":")));
    }

    line
}

fn check_index(lines: &[String], index: usize) -> std::result::Result<(), EditError> {
    if index >= lines.len() {
        return Err(EditError::LineOutOfRange {
            line: index + 1,
            len: lines.len(),
        });
    }
    Ok(())
}

/// `"\r"` for a line read from a CRLF document, else empty
fn carriage_return(line: &str) -> &'static str {
    if line.ends_with('\r') {
        "\r"
    } else {
        ""
    }
}

/// Rebuild the headline at `index` from `entry`, keeping the existing level
/// and line ending.
pub fn rewrite_headline(
    lines: &[String],
    index: usize,
    entry: &Entry,
) -> std::result::Result<Vec<String>, EditError> {
    check_index(lines, index)?;
    let level = headline_level(&lines[index]).ok_or(EditError::NotAHeadline { line: index + 1 })?;

    let mut out = lines.to_vec();
    out[index] = render_headline(level, entry) + carriage_return(&lines[index]);
    Ok(out)
}

/// Set the status of the headline at `index` to DONE.
pub fn complete(lines: &[String], index: usize) -> std::result::Result<Vec<String>, EditError> {
    check_index(lines, index)?;
    let mut entry =
        tokenize_headline(&lines[index]).ok_or(EditError::NotAHeadline { line: index + 1 })?;
    if entry.status.is_none() {
        return Err(EditError::NotATask { line: index + 1 });
    }

    entry.status = Some(TodoState::Done);
    rewrite_headline(lines, index, &entry)
}

/// Shift every headline in `block` so the first line lands at `target_level`.
///
/// Blocks whose first line is not a headline are returned unchanged.
fn relevel_block(block: Vec<String>, target_level: usize) -> Vec<String> {
    let Some(first_level) = block.first().and_then(|line| headline_level(line)) else {
        return block;
    };
    let shift = target_level as isize - first_level as isize;
    if shift == 0 {
        return block;
    }

    block
        .into_iter()
        .map(|line| match headline_level(&line) {
            Some(level) => {
                let new_level = (level as isize + shift).max(1) as usize;
                format!("{}{}", "*".repeat(new_level), &line[level..])
            }
            None => line,
        })
        .collect()
}

/// Splice `entry_text` in before `insertion_index`.
///
/// One trailing newline of `entry_text` is dropped; anything else is kept
/// verbatim. With a `target_level`, headlines in the block are re-leveled
/// relative to the first line (minimum level 1).
pub fn insert_entry(
    lines: &[String],
    insertion_index: usize,
    entry_text: &str,
    target_level: Option<usize>,
) -> std::result::Result<Vec<String>, EditError> {
    if insertion_index > lines.len() {
        return Err(EditError::LineOutOfRange {
            line: insertion_index + 1,
            len: lines.len(),
        });
    }

    let text = entry_text.strip_suffix('\n').unwrap_or(entry_text);
    let mut block: Vec<String> = text.split('\n').map(str::to_string).collect();
    if let Some(level) = target_level {
        block = relevel_block(block, level);
    }

    let mut out = Vec::with_capacity(lines.len() + block.len());
    out.extend_from_slice(&lines[..insertion_index]);
    out.extend(block);
    out.extend_from_slice(&lines[insertion_index..]);
    Ok(out)
}

/// Decide where captured text goes.
///
/// - No target: start (prepend) or end of the document, no re-leveling.
/// - Heading or path: entry becomes a child (level + 1). Prepend puts it
///   right after the heading line; otherwise headline text goes after the
///   whole subtree and plain text after the heading's own body.
pub fn plan_capture(
    lines: &[String],
    target: &CaptureTarget,
    prepend: bool,
    entry_text: &str,
) -> std::result::Result<InsertionPlan, EditError> {
    let heading = match target {
        CaptureTarget::Document => {
            let index = if prepend { 0 } else { lines.len() };
            return Ok(InsertionPlan { index, level: None });
        }
        CaptureTarget::Heading(title) => resolve_path(lines, std::slice::from_ref(title)),
        CaptureTarget::Path(titles) => resolve_path(lines, titles),
    }
    .ok_or_else(|| EditError::TargetNotFound(target.describe()))?;

    let is_headline_text = entry_text
        .split('\n')
        .next()
        .is_some_and(|line| headline_level(line).is_some());

    let index = if prepend {
        heading.index + 1
    } else if is_headline_text {
        subtree_end(lines, heading.index, heading.level)
    } else {
        immediate_body_end(lines, heading.index)
    };

    Ok(InsertionPlan {
        index,
        level: Some(heading.level + 1),
    })
}

/// Plan and insert in one step.
pub fn capture(
    lines: &[String],
    target: &CaptureTarget,
    prepend: bool,
    entry_text: &str,
) -> std::result::Result<Vec<String>, EditError> {
    let plan = plan_capture(lines, target, prepend, entry_text)?;
    insert_entry(lines, plan.index, entry_text, plan.level)
}

/// Replace or insert the `keyword` timestamp belonging to the headline at `index`.
///
/// Scans the entry's immediate span. The first line with `KEYWORD:` followed
/// by a `<...>` pair has its bracket content replaced; duplicates further down
/// are left alone. Otherwise a new planning line goes right after the headline.
pub fn update_timestamp(
    lines: &[String],
    index: usize,
    keyword: PlanningKeyword,
    date: NaiveDate,
) -> std::result::Result<Vec<String>, EditError> {
    check_index(lines, index)?;
    if headline_level(&lines[index]).is_none() {
        return Err(EditError::NotAHeadline { line: index + 1 });
    }

    let marker = keyword.marker();
    let mut out = lines.to_vec();

    for line in out.iter_mut().skip(index + 1) {
        if headline_level(line).is_some() {
            break;
        }
        let Some(key_pos) = line.find(&marker) else {
            continue;
        };
        let Some(open) = line[key_pos..].find('<').map(|p| key_pos + p) else {
            continue;
        };
        let Some(close) = line[open..].find('>').map(|p| open + p) else {
            continue;
        };

        line.replace_range(open + 1..close, &date.format("%Y-%m-%d %a").to_string());
        return Ok(out);
    }

    out.insert(
        index + 1,
        render_planning_line(keyword, date) + carriage_return(&lines[index]),
    );
    Ok(out)
}

/// One document edit, with its inputs statically typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    RewriteHeadline {
        index: usize,
        entry: Entry,
    },
    InsertEntry {
        target: CaptureTarget,
        prepend: bool,
        text: String,
    },
    UpdateTimestamp {
        index: usize,
        keyword: PlanningKeyword,
        date: NaiveDate,
    },
    Complete {
        index: usize,
    },
}

impl Mutation {
    /// Apply to a document, producing the complete new document.
    pub fn apply(&self, document: &Document) -> Result<Document> {
        let lines = &document.lines;
        let edited = match self {
            Mutation::RewriteHeadline { index, entry } => rewrite_headline(lines, *index, entry),
            Mutation::InsertEntry {
                target,
                prepend,
                text,
            } => capture(lines, target, *prepend, text),
            Mutation::UpdateTimestamp {
                index,
                keyword,
                date,
            } => update_timestamp(lines, *index, *keyword, *date),
            Mutation::Complete { index } => complete(lines, *index),
        }
        .map_err(|err| OrgendaError::from_edit(err, document.path()))?;

        let mut result = document.with_lines(edited);
        if matches!(self, Mutation::InsertEntry { .. }) {
            result.trailing_newline = true;
        }
        Ok(result)
    }

    /// Apply several edits in order; fails without partial results.
    pub fn apply_all(mutations: &[Mutation], document: &Document) -> Result<Document> {
        mutations
            .iter()
            .try_fold(document.clone(), |doc, mutation| mutation.apply(&doc))
    }
}
