//! Simulated async data layer.
//!
//! # Responsibility
//! - Expose the services behind async calls with artificial latency.
//! - Turn every failure into one [`ApiError`] with a user-facing message.
//!
//! # Invariants
//! - A call observed as cancelled never writes and never returns data.
//! - Forced endpoint failures happen before any repository access.

pub mod cancel;
pub mod dashboard;
pub mod simulated;

use crate::config::CoreConfig;
use crate::model::form::FormErrors;
use crate::service::ServiceError;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

pub use cancel::CancellationToken;

pub type ApiResult<T> = Result<T, ApiError>;

/// Named data-layer operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    GetEvents,
    GetCalendars,
    GetGroups,
    CreateEvent,
    GetUser,
    GetUserSettings,
    UpdateUserProfile,
    UpdateNotificationSettings,
    UpdatePrivacySettings,
    GetGroupInvitations,
    RespondToGroupInvitation,
}

impl Endpoint {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GetEvents => "get_events",
            Self::GetCalendars => "get_calendars",
            Self::GetGroups => "get_groups",
            Self::CreateEvent => "create_event",
            Self::GetUser => "get_user",
            Self::GetUserSettings => "get_user_settings",
            Self::UpdateUserProfile => "update_user_profile",
            Self::UpdateNotificationSettings => "update_notification_settings",
            Self::UpdatePrivacySettings => "update_privacy_settings",
            Self::GetGroupInvitations => "get_group_invitations",
            Self::RespondToGroupInvitation => "respond_to_group_invitation",
        }
    }

    /// Verb phrase used in failure toasts ("Failed to load events.").
    fn action(self) -> &'static str {
        match self {
            Self::GetEvents => "load events",
            Self::GetCalendars => "load calendars",
            Self::GetGroups => "load groups",
            Self::CreateEvent => "create event",
            Self::GetUser => "load profile",
            Self::GetUserSettings => "load settings",
            Self::UpdateUserProfile => "update profile",
            Self::UpdateNotificationSettings => "update notification settings",
            Self::UpdatePrivacySettings => "update privacy settings",
            Self::GetGroupInvitations => "load invitations",
            Self::RespondToGroupInvitation => "respond to invitation",
        }
    }

    /// Delay per second of base latency, in milliseconds.
    fn latency_weight_ms(self) -> u32 {
        match self {
            Self::GetEvents | Self::GetGroups | Self::RespondToGroupInvitation => 1000,
            Self::CreateEvent | Self::UpdateUserProfile => 1500,
            Self::GetUser => 800,
            Self::GetUserSettings => 900,
            Self::UpdateNotificationSettings => 1200,
            Self::UpdatePrivacySettings => 1100,
            Self::GetCalendars => 600,
            Self::GetGroupInvitations => 700,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base latency; each endpoint scales it by its own weight.
    pub latency: Duration,
    failing: HashSet<Endpoint>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::with_latency(Duration::from_secs(1))
    }
}

impl ApiConfig {
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency,
            failing: HashSet::new(),
        }
    }

    /// No artificial delay.
    pub fn instant() -> Self {
        Self::with_latency(Duration::ZERO)
    }

    /// Forces `endpoints` to fail with [`ApiError::Unavailable`].
    pub fn failing(mut self, endpoints: impl IntoIterator<Item = Endpoint>) -> Self {
        self.failing.extend(endpoints);
        self
    }

    pub fn is_failing(&self, endpoint: Endpoint) -> bool {
        self.failing.contains(&endpoint)
    }

    pub fn delay_for(&self, endpoint: Endpoint) -> Duration {
        self.latency
            .checked_mul(endpoint.latency_weight_ms())
            .map(|scaled| scaled / 1000)
            .unwrap_or(self.latency)
    }
}

impl From<&CoreConfig> for ApiConfig {
    fn from(config: &CoreConfig) -> Self {
        Self::with_latency(config.api_latency)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The caller's token was cancelled; results were discarded.
    Cancelled,
    Unavailable(Endpoint),
    Service(ServiceError),
}

impl ApiError {
    /// Single-line message suitable for a transient toast.
    pub fn toast_message(&self) -> String {
        match self {
            Self::Cancelled => "Request cancelled.".to_string(),
            Self::Unavailable(endpoint) => {
                format!("Failed to {}. Please try again.", endpoint.action())
            }
            Self::Service(ServiceError::Form(errors)) => first_form_message(errors),
            Self::Service(ServiceError::NotFound { entity, .. }) => {
                let mut chars = entity.chars();
                match chars.next() {
                    Some(first) => format!("{}{} not found.", first.to_uppercase(), chars.as_str()),
                    None => "Not found.".to_string(),
                }
            }
            Self::Service(ServiceError::Repo(_)) => {
                "Something went wrong. Please try again.".to_string()
            }
        }
    }
}

fn first_form_message(errors: &FormErrors) -> String {
    errors
        .iter()
        .next()
        .map(|error| error.message.clone())
        .unwrap_or_else(|| "Please check the form and try again.".to_string())
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cancelled => write!(f, "request cancelled"),
            Self::Unavailable(endpoint) => write!(f, "endpoint unavailable: {}", endpoint.as_str()),
            Self::Service(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ApiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Service(err) => Some(err),
            Self::Cancelled | Self::Unavailable(_) => None,
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(value: ServiceError) -> Self {
        Self::Service(value)
    }
}
