//! Calendar grid generation and month navigation.
//!
//! # Responsibility
//! - Compute week-aligned month grids and place events on day cells.
//! - Keep "today" out of the pure builder; callers compare at render time.

pub mod month;
pub mod navigation;

pub use month::{
    build_grid_for, build_month_grid, date_key, days_in_month, first_weekday,
    grid_start, group_events_by_date, weeks, DayCell, EventsByDate, MonthRef, WEEKDAY_LABELS,
};
pub use navigation::{local_today, MonthCursor};
