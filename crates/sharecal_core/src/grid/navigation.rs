//! Displayed-month cursor.
//!
//! # Responsibility
//! - Hold the `(year, month)` pair the calendar page is showing.
//! - Replace it wholesale on navigation; never mutate it field by field.

use crate::grid::month::{build_grid_for, DayCell, EventsByDate, MonthRef};
use chrono::{Local, NaiveDate};

/// Caller-held navigation state for a month view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthCursor {
    current: MonthRef,
}

impl MonthCursor {
    pub fn new(year: i32, month: i32) -> Self {
        Self {
            current: MonthRef::new(year, month),
        }
    }

    /// Cursor positioned on the month containing `today`.
    pub fn starting_at(today: NaiveDate) -> Self {
        Self {
            current: MonthRef::of(today),
        }
    }

    pub fn current(&self) -> MonthRef {
        self.current
    }

    /// Moves by `delta` months (`-1` previous, `+1` next) and returns the new
    /// month.
    pub fn advance_month(&mut self, delta: i32) -> MonthRef {
        self.current = self.current.offset(delta);
        self.current
    }

    pub fn reset_to_today(&mut self, today: NaiveDate) -> MonthRef {
        self.current = MonthRef::of(today);
        self.current
    }

    /// Resets using the local clock.
    pub fn reset_to_local_today(&mut self) -> MonthRef {
        self.reset_to_today(local_today())
    }

    pub fn grid(&self, events_by_date: &EventsByDate) -> Vec<DayCell> {
        build_grid_for(self.current, events_by_date)
    }
}

/// Today's date in the local timezone, with time of day dropped.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}
