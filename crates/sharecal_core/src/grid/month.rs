//! Month grid builder.
//!
//! # Responsibility
//! - Turn a `(year, month)` pair and an events-by-date lookup into a flat,
//!   week-aligned sequence of day cells.
//!
//! # Invariants
//! - Output length is a multiple of 7 and never truncates the month.
//! - The first cell is always a Sunday; every cell carries a real date.
//! - Per-date event order is the caller's order; nothing is sorted.
//! - The builder is pure: no clock reads, no I/O, no hidden state.

use crate::model::event::Event;
use chrono::{Datelike, Days, NaiveDate};
use std::collections::HashMap;

/// Events indexed by canonical `YYYY-MM-DD` key.
pub type EventsByDate = HashMap<String, Vec<Event>>;

/// Column headers for a Sunday-first week.
pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A normalized calendar month: any year, zero-based month in `0..=11`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthRef {
    year: i32,
    month0: u32,
}

impl MonthRef {
    /// Normalizes an arbitrary `(year, month)` pair.
    ///
    /// `month` may be outside `0..=11`: `-1` is December of the previous
    /// year, `12` is January of the next. Months beyond chrono's range are
    /// clamped to the first or last month whose neighbours chrono can still
    /// represent.
    pub fn new(year: i32, month: i32) -> Self {
        Self::from_index(i64::from(year) * 12 + i64::from(month))
    }

    /// Month containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self::from_index(i64::from(date.year()) * 12 + i64::from(date.month0()))
    }

    fn from_index(index: i64) -> Self {
        let (min, max) = month_index_bounds();
        Self::unclamped(index.clamp(min, max))
    }

    fn unclamped(index: i64) -> Self {
        Self {
            year: index.div_euclid(12) as i32,
            month0: index.rem_euclid(12) as u32,
        }
    }

    fn index(self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month0)
    }

    pub fn year(self) -> i32 {
        self.year
    }

    /// Zero-based month (January = 0).
    pub fn month0(self) -> u32 {
        self.month0
    }

    /// Month shifted by `delta` months.
    pub fn offset(self, delta: i32) -> Self {
        Self::from_index(self.index() + i64::from(delta))
    }

    /// Neighbouring month for grid padding. Never clamped, so at the range
    /// edges it still names the real previous or next month.
    fn adjacent(self, delta: i64) -> Self {
        Self::unclamped(self.index() + delta)
    }

    /// Day `day` of this month, when it exists.
    pub fn date(self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month0 + 1, day)
    }

    pub fn first_day(self) -> NaiveDate {
        // Months are clamped into chrono's range, so day 1 always exists.
        self.date(1).unwrap_or(NaiveDate::MIN)
    }

    pub fn days_in_month(self) -> u32 {
        match self.month0 {
            1 if is_leap_year(self.year) => 29,
            1 => 28,
            3 | 5 | 8 | 10 => 30,
            _ => 31,
        }
    }

    /// Weekday of day 1, `0 = Sunday .. 6 = Saturday`.
    pub fn first_weekday(self) -> u32 {
        self.first_day().weekday().num_days_from_sunday()
    }

    pub fn name(self) -> &'static str {
        MONTH_NAMES[self.month0 as usize]
    }

    /// Header text such as `July 2024`.
    pub fn title(self) -> String {
        format!("{} {}", self.name(), self.year)
    }
}

/// One rendered grid position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    pub day_number: u32,
    pub date: NaiveDate,
    /// `false` for leading/trailing padding from adjacent months.
    pub is_current_month: bool,
    pub events: Vec<Event>,
}

impl DayCell {
    /// Returns whether this cell shows `today`.
    ///
    /// The caller normalizes its clock to a date first (see
    /// `grid::local_today`); the grid itself never reads the clock.
    pub fn is_today(&self, today: NaiveDate) -> bool {
        self.date == today
    }

    pub fn key(&self) -> String {
        date_key(self.date)
    }
}

// Every normalized month keeps both neighbours inside chrono's range:
// February of its first year up to November of its last.
fn month_index_bounds() -> (i64, i64) {
    let min = i64::from(NaiveDate::MIN.year()) * 12 + 1;
    let max = i64::from(NaiveDate::MAX.year()) * 12 + 10;
    (min, max)
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Canonical `YYYY-MM-DD` key for `date`.
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Indexes `events` by date key, keeping their relative order per date.
pub fn group_events_by_date(events: &[Event]) -> EventsByDate {
    let mut by_date = EventsByDate::new();
    for event in events {
        by_date
            .entry(date_key(event.date))
            .or_default()
            .push(event.clone());
    }
    by_date
}

/// Number of days in `(year, month)`, with month normalization.
pub fn days_in_month(year: i32, month: i32) -> u32 {
    MonthRef::new(year, month).days_in_month()
}

/// Weekday index (`0 = Sunday`) of the first day of `(year, month)`.
pub fn first_weekday(year: i32, month: i32) -> u32 {
    MonthRef::new(year, month).first_weekday()
}

/// Builds the week-aligned grid for `(year, month)`.
///
/// `month` is zero-based and normalized (see [`MonthRef::new`]). Dates
/// missing from `events_by_date` simply get no events.
pub fn build_month_grid(year: i32, month: i32, events_by_date: &EventsByDate) -> Vec<DayCell> {
    build_grid_for(MonthRef::new(year, month), events_by_date)
}

/// Same as [`build_month_grid`] for an already normalized month.
pub fn build_grid_for(month: MonthRef, events_by_date: &EventsByDate) -> Vec<DayCell> {
    let days_in_month = month.days_in_month();
    let first_weekday = month.first_weekday();
    let previous = month.adjacent(-1);
    let next = month.adjacent(1);
    let days_in_prev_month = previous.days_in_month();

    let mut cells = Vec::with_capacity(42);

    for day in (days_in_prev_month - first_weekday + 1)..=days_in_prev_month {
        push_cell(&mut cells, previous, day, false, events_by_date);
    }
    for day in 1..=days_in_month {
        push_cell(&mut cells, month, day, true, events_by_date);
    }
    let remainder = (7 - cells.len() % 7) % 7;
    for day in 1..=remainder as u32 {
        push_cell(&mut cells, next, day, false, events_by_date);
    }

    cells
}

/// Splits a grid into rows of seven cells.
pub fn weeks(cells: &[DayCell]) -> impl Iterator<Item = &[DayCell]> {
    cells.chunks(7)
}

/// First cell date of the grid for `month`, i.e. the Sunday on or before
/// its first day.
pub fn grid_start(month: MonthRef) -> NaiveDate {
    let first = month.first_day();
    first
        .checked_sub_days(Days::new(u64::from(month.first_weekday())))
        .unwrap_or(first)
}

fn push_cell(
    cells: &mut Vec<DayCell>,
    month: MonthRef,
    day: u32,
    is_current_month: bool,
    events_by_date: &EventsByDate,
) {
    let Some(date) = month.date(day) else {
        return;
    };
    let events = events_by_date
        .get(&date_key(date))
        .cloned()
        .unwrap_or_default();
    cells.push(DayCell {
        day_number: day,
        date,
        is_current_month,
        events,
    });
}

#[cfg(test)]
mod tests {
    use super::{date_key, days_in_month, first_weekday, grid_start, MonthRef};
    use chrono::NaiveDate;

    #[test]
    fn month_ref_normalizes_out_of_range_months() {
        assert_eq!(MonthRef::new(2024, -1), MonthRef::new(2023, 11));
        assert_eq!(MonthRef::new(2024, 12), MonthRef::new(2025, 0));
        assert_eq!(MonthRef::new(2024, -13), MonthRef::new(2022, 11));
        assert_eq!(MonthRef::new(2024, 25), MonthRef::new(2026, 1));
    }

    #[test]
    fn month_ref_survives_extreme_inputs() {
        let low = MonthRef::new(i32::MIN, i32::MIN);
        let high = MonthRef::new(i32::MAX, i32::MAX);
        assert!(low.days_in_month() >= 28);
        assert!(high.days_in_month() >= 28);
        assert!(low.offset(-1).date(1).is_some());
        assert!(high.offset(1).date(1).is_some());
        assert!(low.month0() < 12 && high.month0() < 12);
        assert_eq!(low.offset(-1), low);
        assert_eq!(high.offset(1), high);
        assert_eq!(high.offset(-1).offset(1), high);
    }

    #[test]
    fn month_ref_normalizes_near_the_year_limit() {
        assert_eq!(MonthRef::new(262_000, 12), MonthRef::new(262_001, 0));
        assert_eq!(MonthRef::new(-262_000, -1), MonthRef::new(-262_001, 11));
        assert_eq!(MonthRef::new(262_000, 11).offset(1).year(), 262_001);
    }

    #[test]
    fn days_in_month_follows_gregorian_rules() {
        assert_eq!(days_in_month(2024, 1), 29);
        assert_eq!(days_in_month(2023, 1), 28);
        assert_eq!(days_in_month(1900, 1), 28);
        assert_eq!(days_in_month(2000, 1), 29);
        assert_eq!(days_in_month(2024, 3), 30);
        assert_eq!(days_in_month(2024, 11), 31);
    }

    #[test]
    fn first_weekday_uses_sunday_zero() {
        // 2024-07-01 is a Monday, 2023-10-01 a Sunday.
        assert_eq!(first_weekday(2024, 6), 1);
        assert_eq!(first_weekday(2023, 9), 0);
    }

    #[test]
    fn title_and_key() {
        assert_eq!(MonthRef::new(2024, 6).title(), "July 2024");
        let date = NaiveDate::from_ymd_opt(2024, 7, 3).unwrap();
        assert_eq!(date_key(date), "2024-07-03");
    }

    #[test]
    fn grid_start_is_previous_sunday() {
        assert_eq!(
            grid_start(MonthRef::new(2024, 6)),
            NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
        );
    }
}
