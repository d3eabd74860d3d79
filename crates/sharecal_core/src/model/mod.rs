//! Domain model for the shared-calendar core.
//!
//! # Responsibility
//! - Define canonical data structures used by grid, repository and service
//!   layers.
//! - Own record-level validation (`Event::validate`) and form-level
//!   validation (`form`).
//!
//! # Invariants
//! - Every record is identified by a stable, non-empty string id.
//! - Dates are day-granular `NaiveDate`s; times of day are optional.

pub mod calendar;
pub mod event;
pub mod form;
pub mod group;
pub mod inbox;
pub mod user;
