//! Form drafts and field-level validation.
//!
//! # Responsibility
//! - Validate user input before it is handed to the data layer.
//! - Report every failing field at once, in form order.
//!
//! # Invariants
//! - A draft that fails validation is never converted into a record.
//! - Messages are user-facing and stable.

use crate::model::event::{new_event_id, Event, Recurrence, ReminderOffset};
use crate::model::group::{new_group_id, Group};
use chrono::{NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const EVENT_TITLE_MAX_CHARS: usize = 100;
pub const EVENT_DESCRIPTION_MAX_CHARS: usize = 1000;
pub const EVENT_LOCATION_MAX_CHARS: usize = 200;
pub const GROUP_NAME_MAX_CHARS: usize = 50;
pub const GROUP_DESCRIPTION_MAX_CHARS: usize = 500;
pub const BIO_MAX_CHARS: usize = 300;

static URL_SCHEME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(https?://[^\s/$.?#][^\s]*|mailto:[^\s]+|tel:[^\s]+)$").expect("valid url regex")
});
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// One failing form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Ordered collection of field errors for one submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormErrors {
    errors: Vec<FieldError>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// First message reported for `field`.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|err| err.field == field)
            .map(|err| err.message.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// `Ok(())` when nothing was reported.
    pub fn into_result(self) -> Result<(), FormErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl Display for FormErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for err in &self.errors {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", err.field, err.message)?;
            first = false;
        }
        Ok(())
    }
}

impl Error for FormErrors {}

/// Input of the "new event" form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub date: NaiveDate,
    #[serde(default, with = "crate::model::event::hhmm")]
    pub start_time: Option<NaiveTime>,
    #[serde(default, with = "crate::model::event::hhmm")]
    pub end_time: Option<NaiveTime>,
    #[serde(default)]
    pub location: String,
    pub calendar_id: String,
    #[serde(default)]
    pub is_all_day: bool,
    #[serde(default)]
    pub recurrence: Option<Recurrence>,
    #[serde(default)]
    pub reminder: Option<ReminderOffset>,
    #[serde(default)]
    pub color_tag: Option<String>,
}

impl EventDraft {
    /// Draft pre-filled the way the form opens: 09:00-10:00 on `date`,
    /// 15 minute reminder.
    pub fn new(title: impl Into<String>, date: NaiveDate, calendar_id: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            date,
            start_time: NaiveTime::from_hms_opt(9, 0, 0),
            end_time: NaiveTime::from_hms_opt(10, 0, 0),
            location: String::new(),
            calendar_id: calendar_id.into(),
            is_all_day: false,
            recurrence: None,
            reminder: Some(ReminderOffset::FifteenMinutes),
            color_tag: None,
        }
    }

    /// Validates the draft against `today`.
    ///
    /// # Errors
    /// Returns every failing field: missing title or calendar, over-long
    /// text, a date before `today`, or an end time before the start time.
    pub fn validate(&self, today: NaiveDate) -> Result<(), FormErrors> {
        let mut errors = FormErrors::new();

        push_event_text_errors(&mut errors, &self.title, &self.description, &self.location);
        if self.calendar_id.trim().is_empty() {
            errors.push("calendar_id", "Calendar is required");
        }
        if self.date < today {
            errors.push("date", "Date cannot be in the past");
        }
        if let Some((start, end)) = self.effective_times() {
            if end < start {
                errors.push("end_time", "End time must be after start time");
            }
        }

        errors.into_result()
    }

    /// Converts a validated draft into an event with a fresh id.
    ///
    /// All-day drafts drop their times. A timed draft missing its start gets
    /// `00:00`; one missing its end ends when it starts.
    pub fn into_event(self) -> Event {
        let times = self.effective_times();
        Event {
            id: new_event_id(),
            title: self.title.trim().to_string(),
            date: self.date,
            start_time: times.map(|(start, _)| start),
            end_time: times.map(|(_, end)| end),
            calendar_id: self.calendar_id.trim().to_string(),
            color_tag: self.color_tag,
            description: non_blank(self.description),
            location: non_blank(self.location),
            recurrence: self.recurrence,
            reminder: self.reminder,
        }
    }

    fn effective_times(&self) -> Option<(NaiveTime, NaiveTime)> {
        if self.is_all_day {
            return None;
        }
        let start = self.start_time.unwrap_or(NaiveTime::MIN);
        Some((start, self.end_time.unwrap_or(start)))
    }
}

/// Applies the event form's text rules to an already stored event, so an
/// edit cannot keep what the create form would reject.
///
/// # Errors
/// Returns the failing fields: a blank title or over-long title,
/// description or location.
pub fn validate_event_text(event: &Event) -> Result<(), FormErrors> {
    let mut errors = FormErrors::new();
    push_event_text_errors(
        &mut errors,
        &event.title,
        event.description.as_deref().unwrap_or_default(),
        event.location.as_deref().unwrap_or_default(),
    );
    errors.into_result()
}

fn push_event_text_errors(errors: &mut FormErrors, title: &str, description: &str, location: &str) {
    let title = title.trim();
    if title.is_empty() {
        errors.push("title", "Title is required");
    } else if title.chars().count() > EVENT_TITLE_MAX_CHARS {
        errors.push(
            "title",
            format!("Title must be at most {EVENT_TITLE_MAX_CHARS} characters"),
        );
    }
    if description.chars().count() > EVENT_DESCRIPTION_MAX_CHARS {
        errors.push(
            "description",
            format!("Description must be at most {EVENT_DESCRIPTION_MAX_CHARS} characters"),
        );
    }
    if location.trim().chars().count() > EVENT_LOCATION_MAX_CHARS {
        errors.push(
            "location",
            format!("Location must be at most {EVENT_LOCATION_MAX_CHARS} characters"),
        );
    }
}

/// Input of the "create group" form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub color_tag: Option<String>,
}

impl GroupDraft {
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::new();

        let name = self.name.trim();
        if name.is_empty() {
            errors.push("name", "Group name is required");
        } else if name.chars().count() > GROUP_NAME_MAX_CHARS {
            errors.push(
                "name",
                format!("Group name must be at most {GROUP_NAME_MAX_CHARS} characters"),
            );
        }
        if self.description.chars().count() > GROUP_DESCRIPTION_MAX_CHARS {
            errors.push(
                "description",
                format!("Description must be at most {GROUP_DESCRIPTION_MAX_CHARS} characters"),
            );
        }
        if let Some(avatar) = self.avatar.as_deref().map(str::trim) {
            if looks_like_link(avatar) && !is_url(avatar) {
                errors.push("avatar", "Avatar must be an emoji or a valid image URL");
            }
        }

        errors.into_result()
    }

    /// Converts a validated draft into a one-member group.
    pub fn into_group(self) -> Group {
        let mut group = Group::new(new_group_id(), self.name.trim());
        group.description = non_blank(self.description);
        group.avatar = self.avatar.and_then(non_blank);
        group.color_tag = self.color_tag;
        group.last_active = Some("just now".to_string());
        group
    }
}

/// Editable part of the user profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub bio: Option<String>,
}

impl ProfileUpdate {
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::new();

        if self.name.trim().is_empty() {
            errors.push("name", "Name is required");
        }
        let email = self.email.trim();
        if email.is_empty() {
            errors.push("email", "Email is required");
        } else if !is_valid_email(email) {
            errors.push("email", "Email address is invalid");
        }
        if self
            .bio
            .as_deref()
            .is_some_and(|bio| bio.chars().count() > BIO_MAX_CHARS)
        {
            errors.push("bio", format!("Bio must be at most {BIO_MAX_CHARS} characters"));
        }

        errors.into_result()
    }
}

/// Returns whether `value` is an absolute URL (`http(s)`, `mailto`, `tel`)
/// or a relative path starting with `/` or `./`.
pub fn is_url(value: &str) -> bool {
    let value = value.trim();
    if value.is_empty() {
        return false;
    }
    if value.starts_with('/') || value.starts_with("./") {
        return true;
    }
    URL_SCHEME_RE.is_match(value)
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value.trim())
}

fn looks_like_link(value: &str) -> bool {
    value.contains("://") || value.contains('/') || value.contains('.')
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
