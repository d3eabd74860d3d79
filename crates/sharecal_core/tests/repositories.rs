use chrono::NaiveDate;
use sharecal_core::model::calendar::Calendar;
use sharecal_core::model::group::{Group, GroupInvitation};
use sharecal_core::{RepoError, Repositories, SeedData};

#[test]
fn empty_seed_has_only_the_user() {
    let repos = Repositories::in_memory(SeedData::empty());
    assert_eq!(repos.users.get_user().unwrap().name, "Alex Taylor");
    assert!(repos.calendars.list_calendars().unwrap().is_empty());
    assert!(repos.groups.list_groups().unwrap().is_empty());
    assert!(repos.notifications.list_notifications().unwrap().is_empty());
    assert!(repos.messages.list_conversations().unwrap().is_empty());
}

#[test]
fn calendars_create_and_update() {
    let repos = Repositories::in_memory(SeedData::empty());
    repos
        .calendars
        .create_calendar(&Calendar::new("c1", "Personal", "blue").primary())
        .unwrap();

    let mut calendar = repos.calendars.get_calendar("c1").unwrap().unwrap();
    assert!(calendar.is_primary);
    calendar.name = "Home".to_string();
    repos.calendars.update_calendar(&calendar).unwrap();
    assert_eq!(repos.calendars.list_calendars().unwrap(), vec![calendar]);

    let missing = Calendar::new("c2", "Work", "green");
    assert!(matches!(
        repos.calendars.update_calendar(&missing).unwrap_err(),
        RepoError::NotFound {
            entity: "calendar",
            ..
        }
    ));
}

#[test]
fn groups_update_in_place() {
    let repos = Repositories::demo();
    let mut group = repos.groups.get_group("g3").unwrap().unwrap();
    group.members += 1;
    repos.groups.update_group(&group).unwrap();

    let names: Vec<String> = repos
        .groups
        .list_groups()
        .unwrap()
        .into_iter()
        .map(|group| group.name)
        .collect();
    assert_eq!(names, ["Development Team", "Family", "Hiking Club"]);
    assert_eq!(repos.groups.get_group("g3").unwrap().unwrap().members, 13);

    let err = repos.groups.create_group(&Group::new("g1", "Copy")).unwrap_err();
    assert_eq!(err.to_string(), "group already exists: g1");
}

#[test]
fn invitations_create_get_take() {
    let repos = Repositories::in_memory(SeedData::empty());
    let invitation = GroupInvitation {
        id: "inv9".to_string(),
        group_id: "g9".to_string(),
        group_name: "Chess".to_string(),
        inviter_name: "Sam".to_string(),
        invited_at: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
    };
    repos.invitations.create_invitation(&invitation).unwrap();
    assert_eq!(
        repos.invitations.get_invitation("inv9").unwrap(),
        Some(invitation.clone())
    );

    assert_eq!(repos.invitations.take_invitation("inv9").unwrap(), Some(invitation));
    assert_eq!(repos.invitations.take_invitation("inv9").unwrap(), None);
}

#[test]
fn user_update_requires_same_id() {
    let repos = Repositories::demo();
    let mut user = repos.users.get_user().unwrap();
    user.id = "2".to_string();
    assert!(matches!(
        repos.users.update_user(&user).unwrap_err(),
        RepoError::NotFound { entity: "user", .. }
    ));
}
