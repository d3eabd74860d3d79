//! Dashboard loader.
//!
//! # Responsibility
//! - Fetch events, groups and invitations concurrently.
//! - Reconcile each result into its own [`Loadable`] slot so one failing
//!   source never blanks the others.
//!
//! # Invariants
//! - Each failure yields exactly one toast message.
//! - Nothing is returned once the view's token is cancelled.

use crate::api::simulated::SimulatedApi;
use crate::api::{ApiError, ApiResult, CancellationToken};
use crate::model::event::Event;
use crate::model::group::{Group, GroupInvitation, InvitationResponse};
use crate::service::calendar_service::upcoming;
use chrono::NaiveDate;
use log::info;

/// Number of events shown in the dashboard's upcoming list.
pub const UPCOMING_LIMIT: usize = 3;

/// Load state of one dashboard section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Loadable<T> {
    Loading,
    Loaded(T),
    /// Holds the user-facing failure message.
    Failed(String),
}

impl<T> Loadable<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            Self::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn map<U, F>(self, f: F) -> Loadable<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Loading => Loadable::Loading,
            Self::Loaded(value) => Loadable::Loaded(f(value)),
            Self::Failed(message) => Loadable::Failed(message),
        }
    }
}

impl<T> Default for Loadable<T> {
    fn default() -> Self {
        Self::Loading
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DashboardState {
    pub events: Loadable<Vec<Event>>,
    /// First [`UPCOMING_LIMIT`] events on or after today.
    pub upcoming: Loadable<Vec<Event>>,
    pub groups: Loadable<Vec<Group>>,
    pub invitations: Loadable<Vec<GroupInvitation>>,
    /// One message per failed section, in section order.
    pub toasts: Vec<String>,
}

impl DashboardState {
    pub fn is_loading(&self) -> bool {
        self.events.is_loading() || self.groups.is_loading() || self.invitations.is_loading()
    }
}

/// Loads every dashboard section in parallel.
///
/// Returns `None` when `token` was cancelled before the results could be
/// applied.
pub async fn load_dashboard(
    api: &SimulatedApi,
    token: &CancellationToken,
    today: NaiveDate,
) -> Option<DashboardState> {
    let (events, groups, invitations) = tokio::join!(
        api.get_events(token),
        api.get_groups(token),
        api.get_group_invitations(token),
    );

    if token.is_cancelled() {
        info!("event=dashboard_load module=api status=cancelled");
        return None;
    }

    let mut toasts = Vec::new();
    let events = reconcile(events, &mut toasts);
    let groups = reconcile(groups, &mut toasts);
    let invitations = reconcile(invitations, &mut toasts);
    let upcoming = events
        .clone()
        .map(|events| upcoming(events, today, UPCOMING_LIMIT));

    info!(
        "event=dashboard_load module=api status=ok failed_sections={}",
        toasts.len()
    );
    Some(DashboardState {
        events,
        upcoming,
        groups,
        invitations,
        toasts,
    })
}

fn reconcile<T>(result: ApiResult<T>, toasts: &mut Vec<String>) -> Loadable<T> {
    match result {
        Ok(value) => Loadable::Loaded(value),
        Err(err) => {
            let message = err.toast_message();
            toasts.push(message.clone());
            Loadable::Failed(message)
        }
    }
}

/// Toast text for the outcome of an invitation response.
pub fn invitation_toast(response: InvitationResponse, outcome: &ApiResult<bool>) -> String {
    let (verb, done) = match response {
        InvitationResponse::Accept => ("accepting", "accepted"),
        InvitationResponse::Decline => ("declining", "declined"),
    };
    match outcome {
        Ok(true) => format!("Invitation {done} successfully."),
        Ok(false) => format!(
            "Failed to {} invitation. It might have been withdrawn.",
            response.as_str()
        ),
        Err(ApiError::Cancelled) => ApiError::Cancelled.toast_message(),
        Err(err) => format!("Error {verb} invitation: {}", err.toast_message()),
    }
}
