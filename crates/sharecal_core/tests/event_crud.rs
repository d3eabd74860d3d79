use chrono::{NaiveDate, NaiveTime};
use sharecal_core::repo::event_repo::{EventListQuery, EventRepository, InMemoryEventRepository};
use sharecal_core::{
    CalendarService, Event, EventDraft, EventValidationError, RepoError, Repositories,
    ServiceError,
};

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

#[test]
fn create_get_list_delete() {
    let repo = InMemoryEventRepository::new();
    let event = Event::with_id("ev1", "Team Meeting", ymd(2024, 7, 30), "2").at(hm(10, 0), hm(11, 0));

    assert_eq!(repo.create_event(&event).unwrap(), "ev1");
    assert_eq!(repo.get_event("ev1").unwrap(), Some(event.clone()));
    assert_eq!(repo.list_events(&EventListQuery::default()).unwrap(), vec![event]);

    repo.delete_event("ev1").unwrap();
    assert_eq!(repo.get_event("ev1").unwrap(), None);
    assert_eq!(
        repo.delete_event("ev1").unwrap_err(),
        RepoError::NotFound {
            entity: "event",
            id: "ev1".to_string()
        }
    );
}

#[test]
fn duplicate_ids_are_rejected() {
    let repo = InMemoryEventRepository::new();
    let event = Event::with_id("ev1", "A", ymd(2024, 7, 30), "1");
    repo.create_event(&event).unwrap();

    let err = repo.create_event(&event).unwrap_err();
    assert!(matches!(err, RepoError::DuplicateId { entity: "event", .. }));
}

#[test]
fn invalid_events_never_reach_storage() {
    let repo = InMemoryEventRepository::new();
    let untitled = Event::with_id("ev1", "  ", ymd(2024, 7, 30), "1");

    assert_eq!(
        repo.create_event(&untitled).unwrap_err(),
        RepoError::Validation(EventValidationError::EmptyTitle)
    );
    assert!(repo.list_events(&EventListQuery::default()).unwrap().is_empty());
}

#[test]
fn update_keeps_date_fixed() {
    let repo = InMemoryEventRepository::new();
    let mut event = Event::with_id("ev1", "Team Meeting", ymd(2024, 7, 30), "2");
    repo.create_event(&event).unwrap();

    event.title = "Team Sync".to_string();
    repo.update_event(&event).unwrap();
    assert_eq!(repo.get_event("ev1").unwrap().unwrap().title, "Team Sync");

    event.date = ymd(2024, 7, 31);
    assert!(matches!(
        repo.update_event(&event).unwrap_err(),
        RepoError::ImmutableField { field: "date", .. }
    ));

    let missing = Event::with_id("nope", "Ghost", ymd(2024, 7, 30), "2");
    assert!(matches!(
        repo.update_event(&missing).unwrap_err(),
        RepoError::NotFound { .. }
    ));
}

#[test]
fn list_filters_by_range_and_calendar_in_creation_order() {
    let repo = InMemoryEventRepository::seeded(vec![
        Event::with_id("a", "A", ymd(2024, 7, 31), "2"),
        Event::with_id("b", "B", ymd(2024, 7, 30), "1"),
        Event::with_id("c", "C", ymd(2024, 7, 30), "2"),
        Event::with_id("d", "D", ymd(2024, 8, 2), "2"),
    ]);

    let ids = |query: EventListQuery| -> Vec<String> {
        repo.list_events(&query)
            .unwrap()
            .into_iter()
            .map(|event| event.id)
            .collect()
    };

    assert_eq!(ids(EventListQuery::on(ymd(2024, 7, 30))), ["b", "c"]);
    assert_eq!(
        ids(EventListQuery {
            calendar_id: Some("2".to_string()),
            from: Some(ymd(2024, 7, 30)),
            to: Some(ymd(2024, 7, 31)),
        }),
        ["a", "c"]
    );
}

#[test]
fn service_creates_event_from_valid_draft() {
    let repos = Repositories::demo();
    let service = CalendarService::from_repositories(&repos);
    let today = ymd(2024, 7, 29);

    let mut draft = EventDraft::new("  Lunch with Sam ", ymd(2024, 8, 2), "1");
    draft.location = "Cafe".to_string();
    let event = service.create_event(draft, today).unwrap();

    assert!(event.id.starts_with("ev_"));
    assert_eq!(event.title, "Lunch with Sam");
    assert_eq!(event.start_time, Some(hm(9, 0)));
    assert_eq!(event.end_time, Some(hm(10, 0)));
    assert_eq!(event.location.as_deref(), Some("Cafe"));
    assert_eq!(event.description, None);
    assert_eq!(service.get_event(&event.id).unwrap(), event);
}

#[test]
fn all_day_draft_drops_times() {
    let service = CalendarService::from_repositories(&Repositories::demo());
    let mut draft = EventDraft::new("Holiday", ymd(2024, 8, 5), "3");
    draft.is_all_day = true;

    let event = service.create_event(draft, ymd(2024, 7, 29)).unwrap();
    assert!(event.is_all_day());
}

#[test]
fn service_rejects_invalid_drafts_with_field_messages() {
    let service = CalendarService::from_repositories(&Repositories::demo());
    let today = ymd(2024, 7, 29);

    let mut draft = EventDraft::new("", ymd(2024, 7, 1), "1");
    draft.start_time = Some(hm(15, 0));
    draft.end_time = Some(hm(14, 0));

    let ServiceError::Form(errors) = service.create_event(draft, today).unwrap_err() else {
        panic!("expected form errors");
    };
    assert_eq!(errors.get("title"), Some("Title is required"));
    assert_eq!(errors.get("date"), Some("Date cannot be in the past"));
    assert_eq!(errors.get("end_time"), Some("End time must be after start time"));

    let unknown = EventDraft::new("Standup", today, "99");
    let ServiceError::Form(errors) = service.create_event(unknown, today).unwrap_err() else {
        panic!("expected form errors");
    };
    assert_eq!(errors.get("calendar_id"), Some("Calendar does not exist"));
}

#[test]
fn service_update_and_delete() {
    let service = CalendarService::from_repositories(&Repositories::demo());

    let mut event = service.get_event("ev1").unwrap();
    event.title = "Team Meeting (moved room)".to_string();
    let updated = service.update_event(&event).unwrap();
    assert_eq!(updated.title, "Team Meeting (moved room)");

    service.delete_event("ev1").unwrap();
    assert!(matches!(
        service.get_event("ev1").unwrap_err(),
        ServiceError::NotFound { entity: "event", .. }
    ));
    assert!(matches!(
        service.delete_event("ev1").unwrap_err(),
        ServiceError::NotFound { .. }
    ));
}

#[test]
fn service_update_applies_form_text_limits() {
    let service = CalendarService::from_repositories(&Repositories::demo());
    let original = service.get_event("ev1").unwrap();

    let mut event = original.clone();
    event.title = "x".repeat(5000);
    event.description = Some("d".repeat(1001));
    let ServiceError::Form(errors) = service.update_event(&event).unwrap_err() else {
        panic!("expected form errors");
    };
    assert_eq!(errors.get("title"), Some("Title must be at most 100 characters"));
    assert_eq!(
        errors.get("description"),
        Some("Description must be at most 1000 characters")
    );
    assert_eq!(service.get_event("ev1").unwrap(), original);

    event.title = "x".repeat(100);
    event.description = None;
    assert_eq!(service.update_event(&event).unwrap().title.len(), 100);
}

#[test]
fn month_grid_uses_repository_events() {
    let service = CalendarService::from_repositories(&Repositories::demo());
    let cells = service.month_grid(2024, 6).unwrap();

    let titles = |date: NaiveDate| -> Vec<String> {
        cells
            .iter()
            .find(|cell| cell.date == date)
            .unwrap()
            .events
            .iter()
            .map(|event| event.title.clone())
            .collect()
    };
    assert_eq!(titles(ymd(2024, 7, 30)), ["Team Meeting"]);
    assert_eq!(titles(ymd(2024, 7, 31)), ["Project Deadline"]);
    // Trailing August days still show their events.
    assert_eq!(titles(ymd(2024, 8, 1)), ["Doctor Appointment"]);
}

#[test]
fn upcoming_sorts_by_date_then_time() {
    let service = CalendarService::from_repositories(&Repositories::demo());
    let ids: Vec<String> = service
        .upcoming_events(ymd(2024, 7, 31), 10)
        .unwrap()
        .into_iter()
        .map(|event| event.id)
        .collect();
    assert_eq!(ids, ["ev2", "ev3"]);

    let limited = service.upcoming_events(ymd(2024, 7, 1), 2).unwrap();
    assert_eq!(limited.len(), 2);
    assert_eq!(limited[0].id, "ev1");
}

#[test]
fn events_serialize_with_hhmm_times() {
    let event = Event::with_id("ev1", "Team Meeting", ymd(2024, 7, 30), "2").at(hm(10, 0), hm(11, 0));
    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(json["date"], "2024-07-30");
    assert_eq!(json["start_time"], "10:00");
    assert_eq!(json["end_time"], "11:00");

    let all_day = serde_json::to_value(Event::with_id("ev2", "Deadline", ymd(2024, 7, 31), "2")).unwrap();
    assert!(all_day["start_time"].is_null());
}
