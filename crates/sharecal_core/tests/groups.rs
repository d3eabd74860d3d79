use sharecal_core::model::group::InvitationResponse;
use sharecal_core::{GroupDraft, GroupService, Repositories, ServiceError};

fn names(groups: &[sharecal_core::model::group::Group]) -> Vec<&str> {
    groups.iter().map(|group| group.name.as_str()).collect()
}

#[test]
fn search_matches_name_and_description_ignoring_case() {
    let service = GroupService::from_repositories(&Repositories::demo());

    assert_eq!(names(&service.search_groups("HIKING").unwrap()), ["Hiking Club"]);
    assert_eq!(
        names(&service.search_groups("gatherings").unwrap()),
        ["Family"]
    );
    assert_eq!(service.search_groups("   ").unwrap().len(), 3);
    assert!(service.search_groups("chess").unwrap().is_empty());
}

#[test]
fn create_group_validates_and_stores() {
    let service = GroupService::from_repositories(&Repositories::demo());

    let draft = GroupDraft {
        name: " Book Lovers ".to_string(),
        description: "Monthly reads".to_string(),
        avatar: Some("📚".to_string()),
        color_tag: None,
    };
    let group = service.create_group(draft).unwrap();
    assert!(group.id.starts_with("grp_"));
    assert_eq!(group.name, "Book Lovers");
    assert_eq!(group.members, 1);
    assert_eq!(service.list_groups().unwrap().len(), 4);

    let ServiceError::Form(errors) = service.create_group(GroupDraft::default()).unwrap_err()
    else {
        panic!("expected form errors");
    };
    assert_eq!(errors.get("name"), Some("Group name is required"));
    assert_eq!(service.list_groups().unwrap().len(), 4);
}

#[test]
fn group_avatar_must_be_emoji_or_url() {
    let service = GroupService::from_repositories(&Repositories::demo());
    let draft = GroupDraft {
        name: "Runners".to_string(),
        avatar: Some("not a url.".to_string()),
        ..GroupDraft::default()
    };

    let ServiceError::Form(errors) = service.create_group(draft).unwrap_err() else {
        panic!("expected form errors");
    };
    assert_eq!(
        errors.get("avatar"),
        Some("Avatar must be an emoji or a valid image URL")
    );
}

#[test]
fn accepting_an_invitation_consumes_it_and_adds_the_group() {
    let service = GroupService::from_repositories(&Repositories::demo());

    assert!(service
        .respond_to_invitation("inv1", InvitationResponse::Accept)
        .unwrap());

    let pending: Vec<String> = service
        .list_invitations()
        .unwrap()
        .into_iter()
        .map(|invitation| invitation.id)
        .collect();
    assert_eq!(pending, ["inv2"]);

    let groups = service.list_groups().unwrap();
    let book_club = groups.iter().find(|group| group.id == "g4").unwrap();
    assert_eq!(book_club.name, "Book Club");
    assert_eq!(book_club.members, 2);
}

#[test]
fn declining_removes_without_joining() {
    let service = GroupService::from_repositories(&Repositories::demo());

    assert!(service
        .respond_to_invitation("inv2", InvitationResponse::Decline)
        .unwrap());
    assert_eq!(service.list_invitations().unwrap().len(), 1);
    assert_eq!(service.list_groups().unwrap().len(), 3);
}

#[test]
fn responding_twice_returns_false() {
    let service = GroupService::from_repositories(&Repositories::demo());

    assert!(service
        .respond_to_invitation("inv1", InvitationResponse::Decline)
        .unwrap());
    assert!(!service
        .respond_to_invitation("inv1", InvitationResponse::Accept)
        .unwrap());
    assert!(!service
        .respond_to_invitation("missing", InvitationResponse::Accept)
        .unwrap());
}

#[test]
fn each_bundle_owns_its_data() {
    let first = GroupService::from_repositories(&Repositories::demo());
    let second = GroupService::from_repositories(&Repositories::demo());

    first
        .respond_to_invitation("inv1", InvitationResponse::Decline)
        .unwrap();
    assert_eq!(first.list_invitations().unwrap().len(), 1);
    assert_eq!(second.list_invitations().unwrap().len(), 2);
}
