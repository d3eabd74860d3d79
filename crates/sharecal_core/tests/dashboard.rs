use chrono::NaiveDate;
use sharecal_core::model::group::InvitationResponse;
use sharecal_core::{
    load_dashboard, ApiConfig, ApiError, CalendarService, CancellationToken, Endpoint, EventDraft,
    Loadable, Repositories, SimulatedApi,
};
use std::time::Duration;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 7, 30).unwrap()
}

#[tokio::test]
async fn dashboard_loads_every_section() {
    let api = SimulatedApi::new(&Repositories::demo(), ApiConfig::instant());
    let token = CancellationToken::new();

    let state = load_dashboard(&api, &token, today()).await.unwrap();
    assert!(!state.is_loading());
    assert!(state.toasts.is_empty());
    assert_eq!(state.events.loaded().unwrap().len(), 3);
    assert_eq!(state.groups.loaded().unwrap().len(), 3);
    assert_eq!(state.invitations.loaded().unwrap().len(), 2);

    let upcoming: Vec<&str> = state
        .upcoming
        .loaded()
        .unwrap()
        .iter()
        .map(|event| event.id.as_str())
        .collect();
    assert_eq!(upcoming, ["ev1", "ev2", "ev3"]);
}

#[tokio::test]
async fn one_failing_section_does_not_blank_the_others() {
    let config = ApiConfig::instant().failing([Endpoint::GetGroups]);
    let api = SimulatedApi::new(&Repositories::demo(), config);

    let state = load_dashboard(&api, &CancellationToken::new(), today())
        .await
        .unwrap();
    assert_eq!(
        state.groups,
        Loadable::Failed("Failed to load groups. Please try again.".to_string())
    );
    assert_eq!(state.toasts, ["Failed to load groups. Please try again."]);
    assert!(state.events.loaded().is_some());
    assert!(state.invitations.loaded().is_some());
}

#[tokio::test]
async fn failed_events_also_fail_upcoming() {
    let config = ApiConfig::instant().failing([Endpoint::GetEvents, Endpoint::GetGroupInvitations]);
    let api = SimulatedApi::new(&Repositories::demo(), config);

    let state = load_dashboard(&api, &CancellationToken::new(), today())
        .await
        .unwrap();
    assert!(matches!(state.upcoming, Loadable::Failed(_)));
    assert_eq!(state.toasts.len(), 2);
}

#[tokio::test]
async fn cancelled_token_discards_results() {
    let api = SimulatedApi::new(&Repositories::demo(), ApiConfig::instant());
    let token = CancellationToken::new();
    token.cancel();

    assert!(load_dashboard(&api, &token, today()).await.is_none());
}

#[tokio::test]
async fn cancelling_mid_flight_discards_results() {
    let api = SimulatedApi::new(
        &Repositories::demo(),
        ApiConfig::with_latency(Duration::from_millis(200)),
    );
    let token = CancellationToken::new();
    let view = token.clone();

    let (state, ()) = tokio::join!(load_dashboard(&api, &token, today()), async move {
        tokio::time::sleep(Duration::from_millis(10)).await;
        view.cancel();
    });
    assert!(state.is_none());
}

#[tokio::test]
async fn cancelled_create_never_writes() {
    let repos = Repositories::demo();
    let api = SimulatedApi::new(&repos, ApiConfig::with_latency(Duration::from_millis(100)));
    let token = CancellationToken::new();
    let view = token.clone();

    let draft = EventDraft::new("Retro", today(), "2");
    let (result, ()) = tokio::join!(api.create_event(draft, today(), &token), async move {
        tokio::time::sleep(Duration::from_millis(10)).await;
        view.cancel();
    });

    assert_eq!(result.unwrap_err(), ApiError::Cancelled);
    let service = CalendarService::from_repositories(&repos);
    assert_eq!(service.list_events().unwrap().len(), 3);
}

#[tokio::test]
async fn create_event_through_the_api_is_visible_to_services() {
    let repos = Repositories::demo();
    let api = SimulatedApi::new(&repos, ApiConfig::instant());
    let token = CancellationToken::new();

    let event = api
        .create_event(EventDraft::new("Retro", today(), "2"), today(), &token)
        .await
        .unwrap();
    let service = CalendarService::from_repositories(&repos);
    assert_eq!(service.get_event(&event.id).unwrap(), event);

    let err = api
        .create_event(EventDraft::new("", today(), "2"), today(), &token)
        .await
        .unwrap_err();
    assert_eq!(err.toast_message(), "Title is required");
}

#[tokio::test]
async fn invitation_response_through_the_api() {
    let api = SimulatedApi::new(&Repositories::demo(), ApiConfig::instant());
    let token = CancellationToken::new();

    assert!(api
        .respond_to_group_invitation("inv1", InvitationResponse::Accept, &token)
        .await
        .unwrap());
    assert!(!api
        .respond_to_group_invitation("inv1", InvitationResponse::Accept, &token)
        .await
        .unwrap());
    assert_eq!(api.get_group_invitations(&token).await.unwrap().len(), 1);
    assert_eq!(api.get_groups(&token).await.unwrap().len(), 4);
}

#[tokio::test]
async fn settings_round_trip_through_the_api() {
    let api = SimulatedApi::new(&Repositories::demo(), ApiConfig::instant());
    let token = CancellationToken::new();

    let mut settings = api.get_user_settings(&token).await.unwrap();
    settings.notifications.email_notifications = false;
    let updated = api
        .update_notification_settings(settings.notifications.clone(), &token)
        .await
        .unwrap();
    assert!(!updated.notifications.email_notifications);

    assert_eq!(api.get_user(&token).await.unwrap().name, "Alex Taylor");
    assert_eq!(api.get_calendars(&token).await.unwrap().len(), 3);
}
