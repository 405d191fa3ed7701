//! Parsing of user-supplied field values shared by the CLI and the tool server

use crate::domain::{Priority, TodoState};
use crate::error::{OrgendaError, Result};
use chrono::NaiveDate;

/// Value for a field that may also be cleared with `none`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldUpdate<T> {
    Set(T),
    Clear,
}

fn is_none_keyword(raw: &str) -> bool {
    raw.trim().eq_ignore_ascii_case("none")
}

/// `YYYY-MM-DD`, optionally wrapped in `<...>` and followed by other text
/// (such as a weekday).
pub fn parse_date_arg(raw: &str) -> Result<NaiveDate> {
    let trimmed = raw.trim();
    let inner = trimmed.strip_prefix('<').unwrap_or(trimmed).trim_start();

    inner
        .get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
        .ok_or_else(|| OrgendaError::InvalidDate(raw.to_string()))
}

pub fn parse_priority_arg(raw: &str) -> Result<Priority> {
    raw.parse().map_err(OrgendaError::InvalidArgument)
}

pub fn parse_status_arg(raw: &str) -> Result<TodoState> {
    raw.parse().map_err(OrgendaError::InvalidArgument)
}

/// Comma-separated list; items are trimmed and empty items dropped.
pub fn parse_tags_arg(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn parse_status_update(raw: &str) -> Result<FieldUpdate<TodoState>> {
    if is_none_keyword(raw) {
        Ok(FieldUpdate::Clear)
    } else {
        parse_status_arg(raw).map(FieldUpdate::Set)
    }
}

pub fn parse_priority_update(raw: &str) -> Result<FieldUpdate<Priority>> {
    if is_none_keyword(raw) {
        Ok(FieldUpdate::Clear)
    } else {
        parse_priority_arg(raw).map(FieldUpdate::Set)
    }
}

/// A headline title must be non-empty and fit on one line.
pub fn check_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(OrgendaError::InvalidArgument(
            "Title must not be empty".to_string(),
        ));
    }
    if title.chars().any(char::is_control) {
        return Err(OrgendaError::InvalidArgument(format!(
            "Title must not contain line breaks or control characters: {:?}",
            title
        )));
    }
    Ok(())
}
