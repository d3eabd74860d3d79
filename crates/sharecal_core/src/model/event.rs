//! Event domain model.
//!
//! # Responsibility
//! - Define the canonical event record placed onto calendar grids.
//! - Validate record-level invariants before repository writes.
//!
//! # Invariants
//! - `id` is stable and never reused for another event.
//! - `date` is fixed once assigned; updates may not move an event.
//! - `start_time` and `end_time` are either both set or both absent
//!   (absent means all-day), and `end_time >= start_time`.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier of an event.
pub type EventId = String;

/// Repeat cadence offered by the event form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recurrence {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

/// Reminder lead time before an event starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReminderOffset {
    #[serde(rename = "5min")]
    FiveMinutes,
    #[serde(rename = "15min")]
    FifteenMinutes,
    #[serde(rename = "30min")]
    ThirtyMinutes,
    #[serde(rename = "1hour")]
    OneHour,
    #[serde(rename = "1day")]
    OneDay,
}

impl ReminderOffset {
    /// Lead time in minutes.
    pub fn minutes(self) -> u32 {
        match self {
            Self::FiveMinutes => 5,
            Self::FifteenMinutes => 15,
            Self::ThirtyMinutes => 30,
            Self::OneHour => 60,
            Self::OneDay => 24 * 60,
        }
    }
}

/// Validation errors for the event record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventValidationError {
    EmptyId,
    EmptyTitle,
    EmptyCalendarId,
    /// Exactly one of `start_time`/`end_time` is set.
    PartialTimeRange,
    /// `end_time` is earlier than `start_time`.
    EndBeforeStart { start: NaiveTime, end: NaiveTime },
}

impl Display for EventValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "event id must not be empty"),
            Self::EmptyTitle => write!(f, "event title must not be empty"),
            Self::EmptyCalendarId => write!(f, "event must belong to a calendar"),
            Self::PartialTimeRange => {
                write!(f, "start_time and end_time must be set together")
            }
            Self::EndBeforeStart { start, end } => write!(
                f,
                "end_time {} is earlier than start_time {}",
                end.format("%H:%M"),
                start.format("%H:%M")
            ),
        }
    }
}

impl Error for EventValidationError {}

/// Canonical calendar event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    /// Day the event occurs on, serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    #[serde(default, with = "hhmm")]
    pub start_time: Option<NaiveTime>,
    #[serde(default, with = "hhmm")]
    pub end_time: Option<NaiveTime>,
    pub calendar_id: String,
    /// Display hint only; the presentation layer maps it to a style.
    #[serde(default)]
    pub color_tag: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub recurrence: Option<Recurrence>,
    #[serde(default)]
    pub reminder: Option<ReminderOffset>,
}

impl Event {
    /// Creates an all-day event with a generated id.
    pub fn all_day(title: impl Into<String>, date: NaiveDate, calendar_id: impl Into<String>) -> Self {
        Self::with_id(new_event_id(), title, date, calendar_id)
    }

    /// Creates an all-day event with a caller-provided id.
    ///
    /// Used by seed data and import paths where identity already exists.
    pub fn with_id(
        id: impl Into<EventId>,
        title: impl Into<String>,
        date: NaiveDate,
        calendar_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            date,
            start_time: None,
            end_time: None,
            calendar_id: calendar_id.into(),
            color_tag: None,
            description: None,
            location: None,
            recurrence: None,
            reminder: None,
        }
    }

    /// Sets a time-of-day window, turning the event into a timed one.
    pub fn at(mut self, start: NaiveTime, end: NaiveTime) -> Self {
        self.start_time = Some(start);
        self.end_time = Some(end);
        self
    }

    pub fn with_color(mut self, color_tag: impl Into<String>) -> Self {
        self.color_tag = Some(color_tag.into());
        self
    }

    /// Returns whether this event spans the whole day.
    pub fn is_all_day(&self) -> bool {
        self.start_time.is_none() && self.end_time.is_none()
    }

    /// Checks record-level invariants.
    ///
    /// # Errors
    /// - Empty id, title or calendar reference.
    /// - Half-specified or reversed time window.
    pub fn validate(&self) -> Result<(), EventValidationError> {
        if self.id.trim().is_empty() {
            return Err(EventValidationError::EmptyId);
        }
        if self.title.trim().is_empty() {
            return Err(EventValidationError::EmptyTitle);
        }
        if self.calendar_id.trim().is_empty() {
            return Err(EventValidationError::EmptyCalendarId);
        }
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) if end < start => {
                Err(EventValidationError::EndBeforeStart { start, end })
            }
            (Some(_), None) | (None, Some(_)) => Err(EventValidationError::PartialTimeRange),
            _ => Ok(()),
        }
    }
}

/// Generates a fresh event id.
pub fn new_event_id() -> EventId {
    format!("ev_{}", Uuid::new_v4().simple())
}

/// Serde adapter for optional `HH:MM` times of day.
///
/// Deserialization also accepts `HH:MM:SS`.
pub(crate) mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S>(value: &Option<NaiveTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(time) => serializer.serialize_str(&time.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(text) => parse(text).map(Some).ok_or_else(|| {
                serde::de::Error::custom(format!("invalid time of day `{text}`"))
            }),
        }
    }

    pub fn parse(text: &str) -> Option<NaiveTime> {
        NaiveTime::parse_from_str(text, FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(text, "%H:%M:%S"))
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::{Event, EventValidationError, ReminderOffset};
    use chrono::{NaiveDate, NaiveTime};

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 30).unwrap()
    }

    fn hm(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    #[test]
    fn all_day_event_has_no_times() {
        let event = Event::all_day("Project Deadline", day(), "2");
        assert!(event.is_all_day());
        assert!(event.id.starts_with("ev_"));
        assert_eq!(event.validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_reversed_window() {
        let event = Event::with_id("ev1", "Standup", day(), "2").at(hm(11, 0), hm(10, 0));
        assert!(matches!(
            event.validate(),
            Err(EventValidationError::EndBeforeStart { .. })
        ));
    }

    #[test]
    fn validate_rejects_half_window() {
        let mut event = Event::with_id("ev1", "Standup", day(), "2");
        event.start_time = Some(hm(9, 0));
        assert_eq!(event.validate(), Err(EventValidationError::PartialTimeRange));
    }

    #[test]
    fn reminder_minutes() {
        assert_eq!(ReminderOffset::OneDay.minutes(), 1440);
        assert_eq!(ReminderOffset::FiveMinutes.minutes(), 5);
    }
}
