//! Range filtering, multi-key sorting and tag collection over parsed entries

use crate::domain::entry::{Entry, TodoState};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::str::FromStr;

/// Anything that can be reduced to a calendar day.
///
/// Time-of-day and offset are dropped; the wall-clock date is kept.
pub trait CalendarDay {
    fn calendar_day(&self) -> NaiveDate;
}

impl CalendarDay for NaiveDate {
    fn calendar_day(&self) -> NaiveDate {
        *self
    }
}

impl CalendarDay for NaiveDateTime {
    fn calendar_day(&self) -> NaiveDate {
        self.date()
    }
}

impl<Tz: TimeZone> CalendarDay for DateTime<Tz> {
    fn calendar_day(&self) -> NaiveDate {
        self.date_naive()
    }
}

/// Inclusive day-granularity range test: `start <= date <= end`.
pub fn in_range<D, S, E>(date: &D, start: &S, end: &E) -> bool
where
    D: CalendarDay,
    S: CalendarDay,
    E: CalendarDay,
{
    let day = date.calendar_day();
    start.calendar_day() <= day && day <= end.calendar_day()
}

/// Keep entries whose scheduled date, or failing that deadline, is in range.
pub fn filter_by_range(entries: Vec<Entry>, start: NaiveDate, end: NaiveDate) -> Vec<Entry> {
    entries
        .into_iter()
        .filter(|entry| {
            entry.scheduled.is_some_and(|d| in_range(&d, &start, &end))
                || entry.deadline.is_some_and(|d| in_range(&d, &start, &end))
        })
        .collect()
}

/// Sort key for entry listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Input order
    #[default]
    None,
    Priority,
    Date,
    Status,
}

impl FromStr for SortKey {
    type Err = std::convert::Infallible;

    /// Unrecognized keys fall back to input order.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "priority" => SortKey::Priority,
            "date" => SortKey::Date,
            "status" => SortKey::Status,
            _ => SortKey::None,
        })
    }
}

// Absent values rank after present ones in every key.
fn compare_present_first<T: Ord>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn compare_key(a: &Entry, b: &Entry, key: SortKey) -> Ordering {
    match key {
        SortKey::None => Ordering::Equal,
        SortKey::Priority => compare_present_first(a.priority, b.priority),
        SortKey::Date => compare_present_first(a.ranking_date(), b.ranking_date()),
        SortKey::Status => compare_present_first(
            a.status.map(|s| s.rank()),
            b.status.map(|s| s.rank()),
        ),
    }
}

/// Stable sort by `key`.
///
/// `descending` reverses the key ordering only; entries with equal keys keep
/// their input order either way. Undated entries under the date key are
/// ordered among themselves by line number.
pub fn sort_entries(entries: &mut [Entry], key: SortKey, descending: bool) {
    if key == SortKey::None {
        return;
    }

    entries.sort_by(|a, b| {
        let ord = compare_key(a, b, key);
        let ord = if descending { ord.reverse() } else { ord };
        ord.then_with(|| {
            if key == SortKey::Date && a.ranking_date().is_none() && b.ranking_date().is_none() {
                a.line_number().cmp(&b.line_number())
            } else {
                Ordering::Equal
            }
        })
    });
}

/// Sorted, de-duplicated union of all tags.
pub fn unique_tags(entries: &[Entry]) -> Vec<String> {
    entries
        .iter()
        .flat_map(|entry| entry.tags.iter())
        .filter(|tag| !tag.is_empty())
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Status/tag filter for task listings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoFilter {
    pub state: Option<TodoState>,
    pub tag: Option<String>,
}

impl TodoFilter {
    pub fn matches(&self, entry: &Entry) -> bool {
        let state_ok = match self.state {
            Some(state) => entry.status == Some(state),
            None => entry.status.is_some(),
        };
        let tag_ok = self.tag.as_deref().map_or(true, |tag| entry.has_tag(tag));
        state_ok && tag_ok
    }

    pub fn apply(&self, entries: Vec<Entry>) -> Vec<Entry> {
        entries.into_iter().filter(|e| self.matches(e)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entry::{Priority, SourceLocation};
    use chrono::{FixedOffset, NaiveTime};
    use std::path::PathBuf;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at_line(title: &str, line: usize) -> Entry {
        let mut entry = Entry::new(1, title);
        entry.location = Some(SourceLocation::new(PathBuf::from("t.org"), line));
        entry
    }

    fn titles(entries: &[Entry]) -> Vec<&str> {
        entries.iter().map(|e| e.title.as_str()).collect()
    }

    #[test]
    fn test_in_range_is_inclusive() {
        let (s, e) = (date(2026, 1, 1), date(2026, 1, 7));
        assert!(in_range(&s, &s, &e));
        assert!(in_range(&e, &s, &e));
        assert!(in_range(&date(2026, 1, 4), &s, &e));
        assert!(!in_range(&date(2026, 1, 8), &s, &e));
        assert!(!in_range(&date(2025, 12, 31), &s, &e));
    }

    #[test]
    fn test_in_range_ignores_time_of_day() {
        let late = date(2026, 1, 7).and_time(NaiveTime::from_hms_opt(23, 59, 0).unwrap());
        let early = date(2026, 1, 1).and_time(NaiveTime::from_hms_opt(18, 0, 0).unwrap());
        assert!(in_range(&late, &early, &date(2026, 1, 7)));
    }

    #[test]
    fn test_in_range_ignores_offset() {
        let tz = FixedOffset::east_opt(9 * 3600).unwrap();
        let dt = tz.with_ymd_and_hms(2026, 1, 8, 1, 0, 0).unwrap();
        assert!(!in_range(&dt, &date(2026, 1, 1), &date(2026, 1, 7)));
        assert!(in_range(&dt, &date(2026, 1, 8), &date(2026, 1, 8)));
    }

    #[test]
    fn test_filter_by_range() {
        let mut a = Entry::new(1, "a");
        a.scheduled = Some(date(2026, 1, 1));
        let mut b = Entry::new(1, "b");
        b.deadline = Some(date(2026, 1, 5));
        let mut c = Entry::new(1, "c");
        c.scheduled = Some(date(2026, 1, 10));
        let d = Entry::new(1, "d");

        let kept = filter_by_range(vec![a, b, c, d], date(2026, 1, 1), date(2026, 1, 7));
        assert_eq!(titles(&kept), vec!["a", "b"]);
    }

    #[test]
    fn test_filter_by_range_falls_back_to_deadline() {
        let mut e = Entry::new(1, "e");
        e.scheduled = Some(date(2025, 6, 1));
        e.deadline = Some(date(2026, 1, 3));
        let kept = filter_by_range(vec![e], date(2026, 1, 1), date(2026, 1, 7));
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn test_sort_by_priority() {
        let mut entries = vec![
            Entry::new(1, "none"),
            Entry::new(1, "c").with_priority(Priority('C')),
            Entry::new(1, "a").with_priority(Priority('A')),
        ];
        sort_entries(&mut entries, SortKey::Priority, false);
        assert_eq!(titles(&entries), vec!["a", "c", "none"]);
    }

    #[test]
    fn test_sort_by_date_deadline_wins() {
        let mut x = at_line("x", 1);
        x.scheduled = Some(date(2026, 1, 1));
        x.deadline = Some(date(2026, 3, 1));
        let mut y = at_line("y", 2);
        y.scheduled = Some(date(2026, 2, 1));
        let mut entries = vec![x, y];

        sort_entries(&mut entries, SortKey::Date, false);
        assert_eq!(titles(&entries), vec!["y", "x"]);
    }

    #[test]
    fn test_sort_by_date_undated_last_by_line() {
        let mut dated = at_line("dated", 9);
        dated.deadline = Some(date(2026, 1, 1));
        let mut entries = vec![at_line("late", 7), dated, at_line("early", 3)];

        sort_entries(&mut entries, SortKey::Date, false);
        assert_eq!(titles(&entries), vec!["dated", "early", "late"]);
    }

    #[test]
    fn test_sort_by_status_rank() {
        let mut entries = vec![
            Entry::new(1, "plain"),
            Entry::new(1, "done").with_status(TodoState::Done),
            Entry::new(1, "waiting").with_status(TodoState::Waiting),
            Entry::new(1, "todo").with_status(TodoState::Todo),
        ];
        sort_entries(&mut entries, SortKey::Status, false);
        assert_eq!(titles(&entries), vec!["todo", "waiting", "done", "plain"]);
    }

    #[test]
    fn test_sort_is_stable_and_idempotent() {
        let mut entries = vec![
            Entry::new(1, "b1").with_priority(Priority('B')),
            Entry::new(1, "a1").with_priority(Priority('A')),
            Entry::new(1, "b2").with_priority(Priority('B')),
            Entry::new(1, "a2").with_priority(Priority('A')),
        ];
        sort_entries(&mut entries, SortKey::Priority, false);
        assert_eq!(titles(&entries), vec!["a1", "a2", "b1", "b2"]);

        let again = entries.clone();
        sort_entries(&mut entries, SortKey::Priority, false);
        assert_eq!(entries, again);
    }

    #[test]
    fn test_descending_keeps_ties_in_input_order() {
        let mut entries = vec![
            Entry::new(1, "b1").with_priority(Priority('B')),
            Entry::new(1, "a1").with_priority(Priority('A')),
            Entry::new(1, "b2").with_priority(Priority('B')),
            Entry::new(1, "a2").with_priority(Priority('A')),
        ];
        sort_entries(&mut entries, SortKey::Priority, true);
        assert_eq!(titles(&entries), vec!["b1", "b2", "a1", "a2"]);
    }

    #[test]
    fn test_descending_status_keeps_ties_in_input_order() {
        let mut entries = vec![
            Entry::new(1, "todo1").with_status(TodoState::Todo),
            Entry::new(1, "done1").with_status(TodoState::Done),
            Entry::new(1, "todo2").with_status(TodoState::Todo),
            Entry::new(1, "done2").with_status(TodoState::Done),
        ];
        sort_entries(&mut entries, SortKey::Status, true);
        assert_eq!(titles(&entries), vec!["done1", "done2", "todo1", "todo2"]);
    }

    #[test]
    fn test_descending_date_keeps_ties_in_input_order() {
        let mut first = at_line("first", 8);
        first.scheduled = Some(date(2026, 1, 5));
        let mut earlier = at_line("earlier", 2);
        earlier.deadline = Some(date(2026, 1, 1));
        let mut second = at_line("second", 4);
        second.deadline = Some(date(2026, 1, 5));
        let mut entries = vec![
            first,
            at_line("undated late", 6),
            earlier,
            second,
            at_line("undated early", 1),
        ];

        sort_entries(&mut entries, SortKey::Date, true);
        assert_eq!(
            titles(&entries),
            vec!["undated early", "undated late", "first", "second", "earlier"]
        );
    }

    #[test]
    fn test_unknown_sort_key_preserves_order() {
        assert_eq!("bogus".parse::<SortKey>().unwrap(), SortKey::None);
        assert_eq!("Priority".parse::<SortKey>().unwrap(), SortKey::Priority);

        let mut entries = vec![
            Entry::new(1, "z").with_priority(Priority('C')),
            Entry::new(1, "y").with_priority(Priority('A')),
        ];
        sort_entries(&mut entries, SortKey::None, true);
        assert_eq!(titles(&entries), vec!["z", "y"]);
    }

    #[test]
    fn test_unique_tags() {
        let entries = vec![
            Entry::new(1, "a").with_tags(["work", "urgent"]),
            Entry::new(1, "b").with_tags(["home", "", "work"]),
            Entry::new(1, "c"),
        ];
        assert_eq!(unique_tags(&entries), vec!["home", "urgent", "work"]);
    }

    #[test]
    fn test_todo_filter() {
        let todo = Entry::new(1, "t").with_status(TodoState::Todo).with_tags(["work"]);
        let done = Entry::new(1, "d").with_status(TodoState::Done);
        let plain = Entry::new(1, "p").with_tags(["work"]);

        let all = TodoFilter::default();
        assert!(all.matches(&todo));
        assert!(all.matches(&done));
        assert!(!all.matches(&plain));

        let only_done = TodoFilter {
            state: Some(TodoState::Done),
            tag: None,
        };
        assert_eq!(titles(&only_done.apply(vec![todo.clone(), done.clone()])), vec!["d"]);

        let work = TodoFilter {
            state: None,
            tag: Some("work".to_string()),
        };
        assert!(work.matches(&todo));
        assert!(!work.matches(&done));

        let partial = TodoFilter {
            state: None,
            tag: Some("wor".to_string()),
        };
        assert!(!partial.matches(&todo));
    }
}
