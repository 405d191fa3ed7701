//! Agenda use case: dated entries within a day, week or month

use crate::domain::query::{filter_by_range, in_range, sort_entries, SortKey};
use crate::domain::{AgendaRange, Entry};
use crate::error::Result;
use crate::infrastructure::FileSystemRepository;
use chrono::NaiveDate;
use log::debug;
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct AgendaOptions {
    pub date: NaiveDate,
    pub range: AgendaRange,
    pub tag: Option<String>,
    pub sort: SortKey,
    pub descending: bool,
}

impl AgendaOptions {
    /// Day view around `date`, sorted by date
    pub fn new(date: NaiveDate) -> Self {
        AgendaOptions {
            date,
            range: AgendaRange::Day,
            tag: None,
            sort: SortKey::Date,
            descending: false,
        }
    }
}

/// Which planning date placed an entry in the agenda
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AgendaReason {
    Scheduled,
    Deadline,
}

#[derive(Debug, Clone, Serialize)]
pub struct AgendaItem {
    pub reason: AgendaReason,
    pub date: NaiveDate,
    pub entry: Entry,
}

#[derive(Debug, Clone, Serialize)]
pub struct Agenda {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub items: Vec<AgendaItem>,
}

impl Agenda {
    /// Scheduled wins when both dates fall in range.
    fn item_for(entry: Entry, start: NaiveDate, end: NaiveDate) -> Option<AgendaItem> {
        let (reason, date) = match (entry.scheduled, entry.deadline) {
            (Some(d), _) if in_range(&d, &start, &end) => (AgendaReason::Scheduled, d),
            (_, Some(d)) if in_range(&d, &start, &end) => (AgendaReason::Deadline, d),
            _ => return None,
        };
        Some(AgendaItem {
            reason,
            date,
            entry,
        })
    }

    /// Stable sort by the date shown on each row; ties keep document order.
    fn sort_by_item_date(items: &mut [AgendaItem], descending: bool) {
        items.sort_by(|a, b| {
            let ord = a.date.cmp(&b.date);
            if descending {
                ord.reverse()
            } else {
                ord
            }
        });
    }
}

pub struct AgendaService {
    repository: FileSystemRepository,
}

impl AgendaService {
    pub fn new(repository: FileSystemRepository) -> Self {
        Self { repository }
    }

    pub fn execute(&self, options: &AgendaOptions) -> Result<Agenda> {
        let config = self.repository.load_config()?;
        let (start, end) = options.range.span(options.date);

        let mut entries = filter_by_range(self.repository.load_entries(&config), start, end);
        if let Some(tag) = options.tag.as_deref() {
            entries.retain(|entry| entry.has_tag(tag));
        }
        // Rows are dated by the planning line that matched, not the entry's ranking date
        if options.sort != SortKey::Date {
            sort_entries(&mut entries, options.sort, options.descending);
        }

        let mut items: Vec<AgendaItem> = entries
            .into_iter()
            .filter_map(|entry| Agenda::item_for(entry, start, end))
            .collect();
        if options.sort == SortKey::Date {
            Agenda::sort_by_item_date(&mut items, options.descending);
        }

        debug!(
            "event=agenda module=application status=ok range={} start={} end={} items={}",
            options.range,
            start,
            end,
            items.len()
        );
        Ok(Agenda { start, end, items })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_item_reason() {
        let (start, end) = (date(2026, 1, 1), date(2026, 1, 7));

        let mut both = Entry::new(1, "both");
        both.scheduled = Some(date(2026, 1, 2));
        both.deadline = Some(date(2026, 1, 3));
        let item = Agenda::item_for(both, start, end).unwrap();
        assert_eq!(item.reason, AgendaReason::Scheduled);
        assert_eq!(item.date, date(2026, 1, 2));

        let mut late_schedule = Entry::new(1, "deadline only in range");
        late_schedule.scheduled = Some(date(2026, 2, 1));
        late_schedule.deadline = Some(date(2026, 1, 5));
        let item = Agenda::item_for(late_schedule, start, end).unwrap();
        assert_eq!(item.reason, AgendaReason::Deadline);

        assert!(Agenda::item_for(Entry::new(1, "undated"), start, end).is_none());
    }

    #[test]
    fn test_rows_sorted_by_shown_date() {
        let (start, end) = (date(2026, 1, 4), date(2026, 1, 10));

        let mut later = Entry::new(1, "Later");
        later.scheduled = Some(date(2026, 1, 8));
        let mut early = Entry::new(1, "Early");
        early.scheduled = Some(date(2026, 1, 6));
        early.deadline = Some(date(2026, 2, 20));
        let mut same_day = Entry::new(1, "Same day");
        same_day.deadline = Some(date(2026, 1, 8));

        let mut items: Vec<AgendaItem> = [later, early, same_day]
            .into_iter()
            .filter_map(|entry| Agenda::item_for(entry, start, end))
            .collect();

        Agenda::sort_by_item_date(&mut items, false);
        let titles: Vec<&str> = items.iter().map(|i| i.entry.title.as_str()).collect();
        assert_eq!(titles, ["Early", "Later", "Same day"]);

        Agenda::sort_by_item_date(&mut items, true);
        let titles: Vec<&str> = items.iter().map(|i| i.entry.title.as_str()).collect();
        assert_eq!(titles, ["Later", "Same day", "Early"]);
    }
}
