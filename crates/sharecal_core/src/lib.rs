//! Core domain logic for the shared calendar.
//! Calendar grids, forms, services and the async data layer live here; UI
//! shells only render what this crate returns.

pub mod api;
pub mod config;
pub mod grid;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use api::dashboard::{load_dashboard, DashboardState, Loadable};
pub use api::simulated::SimulatedApi;
pub use api::{ApiConfig, ApiError, ApiResult, CancellationToken, Endpoint};
pub use config::{CoreConfig, ThemePreference};
pub use grid::{build_month_grid, local_today, DayCell, EventsByDate, MonthCursor, MonthRef};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::event::{Event, EventId, EventValidationError};
pub use model::form::{EventDraft, FieldError, FormErrors, GroupDraft, ProfileUpdate};
pub use repo::seed::{Repositories, SeedData};
pub use repo::{RepoError, RepoResult};
pub use service::calendar_service::CalendarService;
pub use service::group_service::GroupService;
pub use service::inbox_service::{MessageService, NotificationService};
pub use service::profile_service::ProfileService;
pub use service::{ServiceError, ServiceResult};

/// Minimal health-check API for shells.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
