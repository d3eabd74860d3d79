//! In-process stand-in for the remote data layer.

use crate::api::{ApiConfig, ApiError, ApiResult, CancellationToken, Endpoint};
use crate::model::calendar::Calendar;
use crate::model::event::Event;
use crate::model::form::{EventDraft, ProfileUpdate};
use crate::model::group::{Group, GroupInvitation, InvitationResponse};
use crate::model::user::{NotificationSettings, PrivacySettings, User, UserSettings};
use crate::repo::seed::Repositories;
use crate::service::calendar_service::CalendarService;
use crate::service::group_service::GroupService;
use crate::service::profile_service::ProfileService;
use crate::service::ServiceResult;
use chrono::NaiveDate;
use log::{debug, info, warn};

/// Async facade over the services with simulated latency and failures.
pub struct SimulatedApi {
    config: ApiConfig,
    calendar: CalendarService,
    groups: GroupService,
    profile: ProfileService,
}

impl SimulatedApi {
    pub fn new(repos: &Repositories, config: ApiConfig) -> Self {
        Self {
            config,
            calendar: CalendarService::from_repositories(repos),
            groups: GroupService::from_repositories(repos),
            profile: ProfileService::from_repositories(repos),
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub async fn get_events(&self, token: &CancellationToken) -> ApiResult<Vec<Event>> {
        self.call(Endpoint::GetEvents, token, || self.calendar.list_events())
            .await
    }

    pub async fn get_calendars(&self, token: &CancellationToken) -> ApiResult<Vec<Calendar>> {
        self.call(Endpoint::GetCalendars, token, || {
            self.calendar.list_calendars()
        })
        .await
    }

    pub async fn get_groups(&self, token: &CancellationToken) -> ApiResult<Vec<Group>> {
        self.call(Endpoint::GetGroups, token, || self.groups.list_groups())
            .await
    }

    /// Validates `draft` against `today` and stores it.
    pub async fn create_event(
        &self,
        draft: EventDraft,
        today: NaiveDate,
        token: &CancellationToken,
    ) -> ApiResult<Event> {
        self.call(Endpoint::CreateEvent, token, || {
            self.calendar.create_event(draft, today)
        })
        .await
    }

    pub async fn get_user(&self, token: &CancellationToken) -> ApiResult<User> {
        self.call(Endpoint::GetUser, token, || self.profile.get_user())
            .await
    }

    pub async fn get_user_settings(&self, token: &CancellationToken) -> ApiResult<UserSettings> {
        self.call(Endpoint::GetUserSettings, token, || {
            self.profile.get_settings()
        })
        .await
    }

    pub async fn update_user_profile(
        &self,
        update: ProfileUpdate,
        token: &CancellationToken,
    ) -> ApiResult<User> {
        self.call(Endpoint::UpdateUserProfile, token, || {
            self.profile.update_profile(update)
        })
        .await
    }

    pub async fn update_notification_settings(
        &self,
        settings: NotificationSettings,
        token: &CancellationToken,
    ) -> ApiResult<UserSettings> {
        self.call(Endpoint::UpdateNotificationSettings, token, || {
            self.profile.update_notification_settings(settings)
        })
        .await
    }

    pub async fn update_privacy_settings(
        &self,
        settings: PrivacySettings,
        token: &CancellationToken,
    ) -> ApiResult<UserSettings> {
        self.call(Endpoint::UpdatePrivacySettings, token, || {
            self.profile.update_privacy_settings(settings)
        })
        .await
    }

    pub async fn get_group_invitations(
        &self,
        token: &CancellationToken,
    ) -> ApiResult<Vec<GroupInvitation>> {
        self.call(Endpoint::GetGroupInvitations, token, || {
            self.groups.list_invitations()
        })
        .await
    }

    /// `Ok(false)` when the invitation no longer exists.
    pub async fn respond_to_group_invitation(
        &self,
        invitation_id: &str,
        response: InvitationResponse,
        token: &CancellationToken,
    ) -> ApiResult<bool> {
        self.call(Endpoint::RespondToGroupInvitation, token, || {
            self.groups.respond_to_invitation(invitation_id, response)
        })
        .await
    }

    async fn call<T, F>(&self, endpoint: Endpoint, token: &CancellationToken, op: F) -> ApiResult<T>
    where
        F: FnOnce() -> ServiceResult<T>,
    {
        ensure_live(endpoint, token)?;
        debug!(
            "event=api_call module=api status=start endpoint={}",
            endpoint.as_str()
        );

        let delay = self.config.delay_for(endpoint);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        ensure_live(endpoint, token)?;

        if self.config.is_failing(endpoint) {
            warn!(
                "event=api_call module=api status=unavailable endpoint={}",
                endpoint.as_str()
            );
            return Err(ApiError::Unavailable(endpoint));
        }

        match op() {
            Ok(value) => {
                info!(
                    "event=api_call module=api status=ok endpoint={}",
                    endpoint.as_str()
                );
                Ok(value)
            }
            Err(err) => {
                warn!(
                    "event=api_call module=api status=error endpoint={}",
                    endpoint.as_str()
                );
                Err(err.into())
            }
        }
    }
}

fn ensure_live(endpoint: Endpoint, token: &CancellationToken) -> ApiResult<()> {
    if token.is_cancelled() {
        debug!(
            "event=api_call module=api status=cancelled endpoint={}",
            endpoint.as_str()
        );
        return Err(ApiError::Cancelled);
    }
    Ok(())
}
