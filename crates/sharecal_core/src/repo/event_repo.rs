//! Event repository contract and in-memory implementation.
//!
//! # Invariants
//! - Write paths call `Event::validate()` before mutating storage.
//! - `update_event` refuses to move an event to another date.
//! - Listing preserves creation order; callers sort when they need to.

use crate::model::event::{Event, EventId};
use crate::repo::memory::MemoryTable;
use crate::repo::{RepoError, RepoResult};
use chrono::NaiveDate;

/// Query options for listing events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventListQuery {
    pub calendar_id: Option<String>,
    /// Inclusive lower date bound.
    pub from: Option<NaiveDate>,
    /// Inclusive upper date bound.
    pub to: Option<NaiveDate>,
}

impl EventListQuery {
    /// Events of one calendar day.
    pub fn on(date: NaiveDate) -> Self {
        Self {
            from: Some(date),
            to: Some(date),
            ..Self::default()
        }
    }

    fn accepts(&self, event: &Event) -> bool {
        self.calendar_id
            .as_deref()
            .map_or(true, |calendar_id| event.calendar_id == calendar_id)
            && self.from.map_or(true, |from| event.date >= from)
            && self.to.map_or(true, |to| event.date <= to)
    }
}

/// Repository interface for event CRUD operations.
pub trait EventRepository: Send + Sync {
    fn create_event(&self, event: &Event) -> RepoResult<EventId>;
    fn update_event(&self, event: &Event) -> RepoResult<()>;
    fn get_event(&self, id: &str) -> RepoResult<Option<Event>>;
    fn list_events(&self, query: &EventListQuery) -> RepoResult<Vec<Event>>;
    fn delete_event(&self, id: &str) -> RepoResult<()>;
}

/// Event repository backed by process memory.
#[derive(Debug)]
pub struct InMemoryEventRepository {
    table: MemoryTable<Event>,
}

impl InMemoryEventRepository {
    pub fn new() -> Self {
        Self::seeded(Vec::new())
    }

    /// Repository pre-filled with `events`, in the given order.
    pub fn seeded(events: Vec<Event>) -> Self {
        Self {
            table: MemoryTable::new(events),
        }
    }
}

impl Default for InMemoryEventRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl EventRepository for InMemoryEventRepository {
    fn create_event(&self, event: &Event) -> RepoResult<EventId> {
        event.validate()?;
        self.table.insert(event.clone())?;
        Ok(event.id.clone())
    }

    fn update_event(&self, event: &Event) -> RepoResult<()> {
        event.validate()?;

        let existing = self
            .table
            .get(&event.id)?
            .ok_or_else(|| RepoError::not_found("event", event.id.as_str()))?;
        if existing.date != event.date {
            return Err(RepoError::ImmutableField {
                entity: "event",
                id: event.id.clone(),
                field: "date",
            });
        }

        self.table.replace(event.clone())?;
        Ok(())
    }

    fn get_event(&self, id: &str) -> RepoResult<Option<Event>> {
        self.table.get(id)
    }

    fn list_events(&self, query: &EventListQuery) -> RepoResult<Vec<Event>> {
        self.table.list_where(|event| query.accepts(event))
    }

    fn delete_event(&self, id: &str) -> RepoResult<()> {
        match self.table.remove(id)? {
            Some(_) => Ok(()),
            None => Err(RepoError::not_found("event", id)),
        }
    }
}
