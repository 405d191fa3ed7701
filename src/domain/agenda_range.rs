//! Agenda date spans

use chrono::{Datelike, Duration, NaiveDate};
use std::fmt;
use std::str::FromStr;

/// Span of days an agenda covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AgendaRange {
    #[default]
    Day,
    /// Sunday through Saturday
    Week,
    /// First through last day of the calendar month
    Month,
}

impl AgendaRange {
    /// Inclusive `(start, end)` of the span containing `date`.
    pub fn span(&self, date: NaiveDate) -> (NaiveDate, NaiveDate) {
        match self {
            AgendaRange::Day => (date, date),
            AgendaRange::Week => {
                let start = date - Duration::days(date.weekday().num_days_from_sunday() as i64);
                (start, start + Duration::days(6))
            }
            AgendaRange::Month => {
                let start = date.with_day(1).unwrap_or(date);
                let next_month = if date.month() == 12 {
                    NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
                } else {
                    NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
                };
                let end = next_month.map_or(date, |first| first - Duration::days(1));
                (start, end)
            }
        }
    }
}

impl FromStr for AgendaRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" => Ok(AgendaRange::Day),
            "week" => Ok(AgendaRange::Week),
            "month" => Ok(AgendaRange::Month),
            _ => Err(format!(
                "Invalid range: {}. Valid ranges are: day, week, month",
                s
            )),
        }
    }
}

impl fmt::Display for AgendaRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AgendaRange::Day => "day",
            AgendaRange::Week => "week",
            AgendaRange::Month => "month",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_day_span() {
        let d = date(2026, 1, 7);
        assert_eq!(AgendaRange::Day.span(d), (d, d));
    }

    #[test]
    fn test_week_starts_on_sunday() {
        // 2026-01-07 is a Wednesday
        assert_eq!(
            AgendaRange::Week.span(date(2026, 1, 7)),
            (date(2026, 1, 4), date(2026, 1, 10))
        );
        // Sunday is its own week start
        assert_eq!(
            AgendaRange::Week.span(date(2026, 1, 4)),
            (date(2026, 1, 4), date(2026, 1, 10))
        );
    }

    #[test]
    fn test_week_crosses_year() {
        assert_eq!(
            AgendaRange::Week.span(date(2026, 1, 1)),
            (date(2025, 12, 28), date(2026, 1, 3))
        );
    }

    #[test]
    fn test_month_span() {
        assert_eq!(
            AgendaRange::Month.span(date(2026, 2, 14)),
            (date(2026, 2, 1), date(2026, 2, 28))
        );
        assert_eq!(
            AgendaRange::Month.span(date(2024, 2, 14)),
            (date(2024, 2, 1), date(2024, 2, 29))
        );
        assert_eq!(
            AgendaRange::Month.span(date(2025, 12, 31)),
            (date(2025, 12, 1), date(2025, 12, 31))
        );
    }

    #[test]
    fn test_parse() {
        assert_eq!("Week".parse::<AgendaRange>().unwrap(), AgendaRange::Week);
        assert!("year".parse::<AgendaRange>().is_err());
        assert_eq!(AgendaRange::Month.to_string(), "month");
    }
}
