//! Single-line tokenizer for headlines and planning lines

use crate::domain::entry::{Entry, PlanningKeyword, Priority, TodoState};
use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

/// Status and priority are left-anchored, the tag run is right-anchored,
/// and the title is whatever remains.
fn headline_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        let statuses: Vec<&str> = TodoState::ALL.iter().map(|s| s.keyword()).collect();
        Regex::new(&format!(
            r"^(\*+)\s+(?:({})\s+)?(?:\[#([A-Z])\]\s*)?(.*?)(?:\s+:(\S+):)?\s*$",
            statuses.join("|")
        ))
        .unwrap()
    })
}

fn timestamp_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"<[^>]*?(\d{4}-\d{2}-\d{2})[^>]*>").unwrap())
}

/// Level of a headline line without a full tokenize, or `None` for body text.
///
/// Agrees with [`tokenize_headline`] on which lines are headlines.
pub fn headline_level(line: &str) -> Option<usize> {
    let level = line.chars().take_while(|c| *c == '*').count();
    if level == 0 {
        return None;
    }
    // '*' is one byte, so `level` is also a byte offset
    match line[level..].chars().next() {
        Some(c) if c.is_whitespace() => Some(level),
        _ => None,
    }
}

/// Tokenize a line as a headline.
///
/// Returns `None` for anything that is not a headline; that is the normal
/// result for body text, not an error.
pub fn tokenize_headline(line: &str) -> Option<Entry> {
    let caps = headline_regex().captures(line)?;

    let level = caps[1].len();
    let status = caps
        .get(2)
        .and_then(|m| TodoState::from_keyword(m.as_str()));
    let priority = caps
        .get(3)
        .and_then(|m| m.as_str().chars().next())
        .and_then(Priority::new);
    let title = caps.get(4).map_or("", |m| m.as_str()).trim().to_string();
    let tags = caps
        .get(5)
        .map(|m| {
            m.as_str()
                .split(':')
                .filter(|segment| !segment.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    Some(Entry {
        level,
        status,
        priority,
        title,
        tags,
        scheduled: None,
        deadline: None,
        location: None,
        body: String::new(),
    })
}

/// Extract the date following `KEYWORD:` on a planning line.
///
/// Only text after the keyword marker is considered; the first `YYYY-MM-DD`
/// inside an angle-bracketed token is parsed. Missing or malformed dates
/// yield `None`.
pub fn tokenize_timestamp(line: &str, keyword: PlanningKeyword) -> Option<NaiveDate> {
    let marker = keyword.marker();
    let start = line.find(&marker)? + marker.len();
    let caps = timestamp_regex().captures(&line[start..])?;
    NaiveDate::parse_from_str(&caps[1], "%Y-%m-%d").ok()
}

/// Whether the line carries any planning keyword marker.
pub fn is_planning_line(line: &str) -> bool {
    PlanningKeyword::ALL
        .iter()
        .any(|keyword| line.contains(&keyword.marker()))
}
