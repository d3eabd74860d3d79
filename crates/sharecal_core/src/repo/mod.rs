//! Repository layer abstractions and in-memory implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts (`list/get/create/
//!   update`, plus `delete` where the product deletes).
//! - Keep storage details behind traits so a persistent backend can replace
//!   the in-memory one without touching services.
//!
//! # Invariants
//! - Event writes call `Event::validate()` before mutating storage.
//! - Reads return owned snapshots; callers never hold storage borrows.
//! - Every store instance owns its data; there is no process-wide state.

pub mod calendar_repo;
pub mod event_repo;
pub mod group_repo;
pub mod inbox_repo;
pub mod memory;
pub mod seed;
pub mod user_repo;

use crate::model::event::EventValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for persistence and query operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    Validation(EventValidationError),
    NotFound {
        entity: &'static str,
        id: String,
    },
    DuplicateId {
        entity: &'static str,
        id: String,
    },
    /// An update tried to change a field that is fixed after creation.
    ImmutableField {
        entity: &'static str,
        id: String,
        field: &'static str,
    },
    LockPoisoned(&'static str),
}

impl RepoError {
    pub(crate) fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::DuplicateId { entity, id } => write!(f, "{entity} already exists: {id}"),
            Self::ImmutableField { entity, id, field } => {
                write!(f, "{entity} {id}: `{field}` cannot be changed")
            }
            Self::LockPoisoned(entity) => write!(f, "{entity} store lock poisoned"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<EventValidationError> for RepoError {
    fn from(value: EventValidationError) -> Self {
        Self::Validation(value)
    }
}
