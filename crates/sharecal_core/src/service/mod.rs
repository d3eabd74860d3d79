//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Run form validation before anything reaches a repository.
//! - Keep UI layers decoupled from storage details.

pub mod calendar_service;
pub mod group_service;
pub mod inbox_service;
pub mod profile_service;

use crate::model::form::FormErrors;
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error shared by every use-case service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Field-level input errors; nothing was written.
    Form(FormErrors),
    NotFound { entity: &'static str, id: String },
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl ServiceError {
    pub(crate) fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Single-field form error.
    pub(crate) fn field(field: &'static str, message: impl Into<String>) -> Self {
        let mut errors = FormErrors::new();
        errors.push(field, message);
        Self::Form(errors)
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Form(errors) => write!(f, "invalid input: {errors}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Form(errors) => Some(errors),
            Self::Repo(err) => Some(err),
            Self::NotFound { .. } => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { entity, id } => Self::NotFound { entity, id },
            other => Self::Repo(other),
        }
    }
}

impl From<FormErrors> for ServiceError {
    fn from(value: FormErrors) -> Self {
        Self::Form(value)
    }
}
