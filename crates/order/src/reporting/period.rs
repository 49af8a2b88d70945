use chrono::{Datelike, Days, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use std::fmt;
use thiserror::Error;

/// Half-open `[start, end)` window of local timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateRange {
    fn days(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: start.and_time(NaiveTime::MIN),
            end: end.and_time(NaiveTime::MIN),
        }
    }

    pub fn contains(&self, at: NaiveDateTime) -> bool {
        self.start <= at && at < self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Period {
    Today,
    Week,
    Month,
    Year,
    /// Both dates inclusive.
    Custom { start: NaiveDate, end: NaiveDate },
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("start date {start} is after end date {end}")]
pub struct ReversedRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Period {
    /// `custom` with both dates selects that inclusive range; anything
    /// else goes through [`Period::parse_lenient`], so `custom` missing a
    /// date still means today.
    pub fn resolve(
        name: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Self, ReversedRange> {
        match (start, end) {
            (Some(start), Some(end)) if name.trim().eq_ignore_ascii_case("custom") => {
                if start > end {
                    return Err(ReversedRange { start, end });
                }
                Ok(Period::Custom { start, end })
            }
            _ => Ok(Self::parse_lenient(name)),
        }
    }

    /// Never fails: unknown names resolve to [`Period::Today`].
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "week" => Period::Week,
            "month" => Period::Month,
            "year" => Period::Year,
            _ => Period::Today,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Period::Today => "today",
            Period::Week => "week",
            Period::Month => "month",
            Period::Year => "year",
            Period::Custom { .. } => "custom",
        }
    }

    pub fn range(self, now: NaiveDateTime) -> DateRange {
        let today = now.date();
        let tomorrow = today + TimeDelta::days(1);

        match self {
            Period::Today => DateRange::days(today, tomorrow),
            Period::Week => DateRange::days(start_of_week(today), tomorrow),
            Period::Month => {
                let first = start_of_month(today);
                DateRange::days(first, first + Months::new(1))
            }
            Period::Year => {
                let first = start_of_year(today);
                DateRange::days(first, first + Months::new(12))
            }
            Period::Custom { start, end } => {
                DateRange::days(start, end.succ_opt().unwrap_or(NaiveDate::MAX))
            }
        }
    }

    /// The window just before [`Period::range`], built from calendar
    /// boundaries rather than by subtracting a duration.
    pub fn previous_range(self, now: NaiveDateTime) -> DateRange {
        let today = now.date();

        match self {
            Period::Today => DateRange::days(today - TimeDelta::days(1), today),
            Period::Week => {
                let start = start_of_week(today);
                DateRange::days(start - TimeDelta::days(7), start)
            }
            Period::Month => {
                let first = start_of_month(today);
                DateRange::days(first - Months::new(1), first)
            }
            Period::Year => {
                let first = start_of_year(today);
                DateRange::days(first - Months::new(12), first)
            }
            Period::Custom { start, end } => {
                let len = Days::new((end - start).num_days().unsigned_abs() + 1);
                DateRange::days(start.checked_sub_days(len).unwrap_or(NaiveDate::MIN), start)
            }
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// weeks start on Sunday
fn start_of_week(day: NaiveDate) -> NaiveDate {
    day - TimeDelta::days(i64::from(day.weekday().num_days_from_sunday()))
}

fn start_of_month(day: NaiveDate) -> NaiveDate {
    day - TimeDelta::days(i64::from(day.day0()))
}

fn start_of_year(day: NaiveDate) -> NaiveDate {
    day - TimeDelta::days(i64::from(day.ordinal0()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 30, 0)
            .unwrap()
    }

    fn midnight(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    // 2025-03-12 is a Wednesday
    const NOW: (i32, u32, u32, u32) = (2025, 3, 12, 15);

    fn now() -> NaiveDateTime {
        at(NOW.0, NOW.1, NOW.2, NOW.3)
    }

    #[test]
    fn unknown_or_mixed_case_names() {
        assert_eq!(Period::parse_lenient("WEEK"), Period::Week);
        assert_eq!(Period::parse_lenient("Month"), Period::Month);
        assert_eq!(Period::parse_lenient("decade"), Period::Today);
        assert_eq!(Period::parse_lenient(""), Period::Today);
    }

    #[test]
    fn today_is_one_calendar_day() {
        let range = Period::Today.range(now());
        assert_eq!(range.start, midnight(2025, 3, 12));
        assert_eq!(range.end, midnight(2025, 3, 13));

        let prev = Period::Today.previous_range(now());
        assert_eq!(prev.start, midnight(2025, 3, 11));
        assert_eq!(prev.end, midnight(2025, 3, 12));
    }

    #[test]
    fn week_starts_on_sunday_and_ends_tomorrow() {
        let range = Period::Week.range(now());
        assert_eq!(range.start, midnight(2025, 3, 9));
        assert_eq!(range.end, midnight(2025, 3, 13));

        let prev = Period::Week.previous_range(now());
        assert_eq!(prev.start, midnight(2025, 3, 2));
        assert_eq!(prev.end, midnight(2025, 3, 9));
    }

    #[test]
    fn sunday_is_its_own_week_start() {
        let sunday = at(2025, 3, 9, 8);
        assert_eq!(Period::Week.range(sunday).start, midnight(2025, 3, 9));
    }

    #[test]
    fn month_follows_the_calendar() {
        let range = Period::Month.range(now());
        assert_eq!(range.start, midnight(2025, 3, 1));
        assert_eq!(range.end, midnight(2025, 4, 1));

        let prev = Period::Month.previous_range(now());
        assert_eq!(prev.start, midnight(2025, 2, 1));
        assert_eq!(prev.end, midnight(2025, 3, 1));
    }

    #[test]
    fn month_boundaries_across_the_new_year() {
        let january = at(2025, 1, 31, 23);
        let prev = Period::Month.previous_range(january);
        assert_eq!(prev.start, midnight(2024, 12, 1));
        assert_eq!(prev.end, midnight(2025, 1, 1));

        let december = at(2024, 12, 5, 9);
        assert_eq!(Period::Month.range(december).end, midnight(2025, 1, 1));
    }

    #[test]
    fn year_windows() {
        let range = Period::Year.range(now());
        assert_eq!(range.start, midnight(2025, 1, 1));
        assert_eq!(range.end, midnight(2026, 1, 1));

        let prev = Period::Year.previous_range(now());
        assert_eq!(prev.start, midnight(2024, 1, 1));
        assert_eq!(prev.end, midnight(2025, 1, 1));
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn custom_range_includes_both_end_dates() {
        let period =
            Period::resolve("Custom", Some(date(2025, 3, 1)), Some(date(2025, 3, 10))).unwrap();
        assert_eq!(period.as_str(), "custom");

        let range = period.range(now());
        assert!(range.contains(midnight(2025, 3, 1)));
        assert!(range.contains(at(2025, 3, 10, 23)));
        assert!(!range.contains(midnight(2025, 3, 11)));

        let prev = period.previous_range(now());
        assert_eq!(prev.start, midnight(2025, 2, 19));
        assert_eq!(prev.end, midnight(2025, 3, 1));
    }

    #[test]
    fn single_day_custom_range() {
        let day = date(2025, 3, 5);
        let period = Period::resolve("custom", Some(day), Some(day)).unwrap();
        assert_eq!(period.range(now()).end, midnight(2025, 3, 6));
        assert_eq!(period.previous_range(now()).start, midnight(2025, 3, 4));
    }

    #[test]
    fn custom_needs_both_dates_in_order() {
        assert_eq!(
            Period::resolve("custom", Some(date(2025, 3, 1)), None),
            Ok(Period::Today)
        );
        assert_eq!(
            Period::resolve("month", Some(date(2025, 3, 1)), Some(date(2025, 3, 2))),
            Ok(Period::Month)
        );
        assert_eq!(
            Period::resolve("custom", Some(date(2025, 3, 2)), Some(date(2025, 3, 1))),
            Err(ReversedRange {
                start: date(2025, 3, 2),
                end: date(2025, 3, 1),
            })
        );
    }

    #[test]
    fn ranges_are_half_open() {
        let range = Period::Today.range(now());
        assert!(range.contains(midnight(2025, 3, 12)));
        assert!(!range.contains(midnight(2025, 3, 13)));
    }
}
