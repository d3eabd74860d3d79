//! Calendar and event use-case service.
//!
//! # Responsibility
//! - Create, update and delete events on behalf of the event form.
//! - Produce month grids and dashboard lists from repository snapshots.
//!
//! # Invariants
//! - Drafts are validated against the caller's `today` before creation.
//! - Events may only reference existing calendars.
//! - Grid output keeps repository order for events sharing a date.

use crate::grid::{build_grid_for, grid_start, group_events_by_date, DayCell, MonthRef};
use crate::model::calendar::Calendar;
use crate::model::event::Event;
use crate::model::form::{validate_event_text, EventDraft};
use crate::repo::calendar_repo::CalendarRepository;
use crate::repo::event_repo::{EventListQuery, EventRepository};
use crate::repo::seed::Repositories;
use crate::service::{ServiceError, ServiceResult};
use chrono::{Days, NaiveDate};
use log::info;
use std::sync::Arc;

// Six weeks covers every month grid.
const GRID_SPAN_DAYS: u64 = 41;

pub struct CalendarService {
    events: Arc<dyn EventRepository>,
    calendars: Arc<dyn CalendarRepository>,
}

impl CalendarService {
    pub fn new(events: Arc<dyn EventRepository>, calendars: Arc<dyn CalendarRepository>) -> Self {
        Self { events, calendars }
    }

    pub fn from_repositories(repos: &Repositories) -> Self {
        Self::new(Arc::clone(&repos.events), Arc::clone(&repos.calendars))
    }

    pub fn list_calendars(&self) -> ServiceResult<Vec<Calendar>> {
        Ok(self.calendars.list_calendars()?)
    }

    pub fn list_events(&self) -> ServiceResult<Vec<Event>> {
        Ok(self.events.list_events(&EventListQuery::default())?)
    }

    pub fn get_event(&self, id: &str) -> ServiceResult<Event> {
        self.events
            .get_event(id)?
            .ok_or_else(|| ServiceError::not_found("event", id))
    }

    /// Events on `date`, in repository order.
    pub fn events_on(&self, date: NaiveDate) -> ServiceResult<Vec<Event>> {
        Ok(self.events.list_events(&EventListQuery::on(date))?)
    }

    /// Validates `draft` and stores it as a new event.
    ///
    /// # Errors
    /// - `ServiceError::Form` for invalid input or an unknown calendar.
    pub fn create_event(&self, draft: EventDraft, today: NaiveDate) -> ServiceResult<Event> {
        draft.validate(today)?;
        self.ensure_calendar(&draft.calendar_id)?;

        let event = draft.into_event();
        self.events.create_event(&event)?;
        info!(
            "event=event_create module=service status=ok event_id={} calendar_id={}",
            event.id, event.calendar_id
        );
        Ok(event)
    }

    /// Replaces an existing event; its date cannot change.
    ///
    /// # Errors
    /// - `ServiceError::Form` when the text breaks the event form's limits
    ///   or the calendar is unknown.
    pub fn update_event(&self, event: &Event) -> ServiceResult<Event> {
        validate_event_text(event)?;
        self.ensure_calendar(&event.calendar_id)?;
        self.events.update_event(event)?;
        info!(
            "event=event_update module=service status=ok event_id={}",
            event.id
        );
        self.get_event(&event.id)
    }

    pub fn delete_event(&self, id: &str) -> ServiceResult<()> {
        self.events.delete_event(id)?;
        info!("event=event_delete module=service status=ok event_id={id}");
        Ok(())
    }

    /// Month grid for `(year, month)` with events attached.
    ///
    /// `month` is zero-based and normalized like `grid::build_month_grid`.
    pub fn month_grid(&self, year: i32, month: i32) -> ServiceResult<Vec<DayCell>> {
        let month = MonthRef::new(year, month);
        let start = grid_start(month);
        let query = EventListQuery {
            from: Some(start),
            to: start.checked_add_days(Days::new(GRID_SPAN_DAYS)),
            ..EventListQuery::default()
        };
        let events = self.events.list_events(&query)?;
        Ok(build_grid_for(month, &group_events_by_date(&events)))
    }

    /// Up to `limit` events on or after `today`, earliest first; all-day
    /// events lead their day.
    pub fn upcoming_events(&self, today: NaiveDate, limit: usize) -> ServiceResult<Vec<Event>> {
        let query = EventListQuery {
            from: Some(today),
            ..EventListQuery::default()
        };
        Ok(upcoming(self.events.list_events(&query)?, today, limit))
    }

    fn ensure_calendar(&self, calendar_id: &str) -> ServiceResult<()> {
        if self.calendars.get_calendar(calendar_id)?.is_none() {
            return Err(ServiceError::field("calendar_id", "Calendar does not exist"));
        }
        Ok(())
    }
}

/// Sorts and trims an event snapshot for "upcoming" lists.
pub fn upcoming(mut events: Vec<Event>, today: NaiveDate, limit: usize) -> Vec<Event> {
    events.retain(|event| event.date >= today);
    // Stable sort: same-slot events keep repository order.
    events.sort_by_key(|event| (event.date, event.start_time));
    events.truncate(limit);
    events
}
