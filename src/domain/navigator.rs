//! Structural navigation over a flat line sequence.
//!
//! No tree is built: every query re-tokenizes lines on demand and returns
//! line indices, which are the addressing scheme used for edits.

use crate::domain::tokenizer::{headline_level, tokenize_headline};

/// A resolved heading: its line index and level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadingMatch {
    pub index: usize,
    pub level: usize,
}

/// Index of the first line after `index` that is a headline with level
/// `<= level`, or `lines.len()` if the subtree runs to the end.
pub fn subtree_end<S: AsRef<str>>(lines: &[S], index: usize, level: usize) -> usize {
    (index + 1..lines.len())
        .find(|&i| headline_level(lines[i].as_ref()).is_some_and(|l| l <= level))
        .unwrap_or(lines.len())
}

/// Index of the first headline of any level after `index`, or `lines.len()`.
pub fn immediate_body_end<S: AsRef<str>>(lines: &[S], index: usize) -> usize {
    (index + 1..lines.len())
        .find(|&i| headline_level(lines[i].as_ref()).is_some())
        .unwrap_or(lines.len())
}

/// Resolve a path of titles by iterative narrowing.
///
/// Each title is looked up only within the subtree of the previous match;
/// the first exact (case-sensitive) title match in scope wins. Any failed
/// step fails the whole resolution, as does an empty path.
pub fn resolve_path<S, T>(lines: &[S], titles: &[T]) -> Option<HeadingMatch>
where
    S: AsRef<str>,
    T: AsRef<str>,
{
    let mut scope_start = 0;
    let mut scope_end = lines.len();
    let mut found: Option<HeadingMatch> = None;

    for title in titles {
        let target = title.as_ref();
        let hit = (scope_start..scope_end).find_map(|i| {
            tokenize_headline(lines[i].as_ref())
                .filter(|entry| entry.title == target)
                .map(|entry| HeadingMatch {
                    index: i,
                    level: entry.level,
                })
        })?;

        scope_start = hit.index + 1;
        scope_end = subtree_end(lines, hit.index, hit.level);
        found = Some(hit);
    }

    found
}
