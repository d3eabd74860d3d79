//! Seed data and repository bundles.
//!
//! # Responsibility
//! - Provide the demo data set the product ships with.
//! - Build a fresh set of in-memory repositories per caller (per test, per
//!   CLI run) instead of sharing module-level state.

use crate::model::calendar::Calendar;
use crate::model::event::Event;
use crate::model::group::{Group, GroupInvitation};
use crate::model::inbox::{Conversation, Message, Notification, NotificationKind, Participant};
use crate::model::user::{User, UserSettings};
use crate::repo::calendar_repo::{CalendarRepository, InMemoryCalendarRepository};
use crate::repo::event_repo::{EventRepository, InMemoryEventRepository};
use crate::repo::group_repo::{
    GroupRepository, InMemoryGroupRepository, InMemoryInvitationRepository, InvitationRepository,
};
use crate::repo::inbox_repo::{
    InMemoryMessageRepository, InMemoryNotificationRepository, MessageRepository,
    NotificationRepository,
};
use crate::repo::user_repo::{
    InMemorySettingsRepository, InMemoryUserRepository, SettingsRepository, UserRepository,
};
use chrono::{NaiveDate, NaiveTime};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Full data set used to seed one repository bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedData {
    pub user: User,
    pub settings: UserSettings,
    pub calendars: Vec<Calendar>,
    pub events: Vec<Event>,
    pub groups: Vec<Group>,
    pub invitations: Vec<GroupInvitation>,
    pub notifications: Vec<Notification>,
    pub conversations: Vec<Conversation>,
    pub messages: Vec<Message>,
}

/// Repositories shared by services and the async data layer.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub settings: Arc<dyn SettingsRepository>,
    pub calendars: Arc<dyn CalendarRepository>,
    pub events: Arc<dyn EventRepository>,
    pub groups: Arc<dyn GroupRepository>,
    pub invitations: Arc<dyn InvitationRepository>,
    pub notifications: Arc<dyn NotificationRepository>,
    pub messages: Arc<dyn MessageRepository>,
}

impl Repositories {
    /// Fresh in-memory repositories holding a copy of `seed`.
    pub fn in_memory(seed: SeedData) -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::new(seed.user)),
            settings: Arc::new(InMemorySettingsRepository::new(seed.settings)),
            calendars: Arc::new(InMemoryCalendarRepository::seeded(seed.calendars)),
            events: Arc::new(InMemoryEventRepository::seeded(seed.events)),
            groups: Arc::new(InMemoryGroupRepository::seeded(seed.groups)),
            invitations: Arc::new(InMemoryInvitationRepository::seeded(seed.invitations)),
            notifications: Arc::new(InMemoryNotificationRepository::seeded(seed.notifications)),
            messages: Arc::new(InMemoryMessageRepository::seeded(
                seed.conversations,
                seed.messages,
            )),
        }
    }

    pub fn demo() -> Self {
        Self::in_memory(SeedData::demo())
    }
}

impl SeedData {
    /// Signed-in user only; every collection empty.
    pub fn empty() -> Self {
        Self {
            user: demo_user(),
            settings: UserSettings::default(),
            calendars: Vec::new(),
            events: Vec::new(),
            groups: Vec::new(),
            invitations: Vec::new(),
            notifications: Vec::new(),
            conversations: Vec::new(),
            messages: Vec::new(),
        }
    }

    /// Demo data set (late July 2024).
    pub fn demo() -> Self {
        Self {
            user: demo_user(),
            settings: UserSettings::default(),
            calendars: vec![
                Calendar::new("1", "Personal", "blue").primary(),
                Calendar::new("2", "Work", "green"),
                Calendar::new("3", "Family", "purple"),
            ],
            events: vec![
                Event::with_id("ev1", "Team Meeting", ymd(2024, 7, 30), "2")
                    .at(hm(10, 0), hm(11, 0))
                    .with_color("green"),
                Event::with_id("ev2", "Project Deadline", ymd(2024, 7, 31), "2").with_color("red"),
                Event::with_id("ev3", "Doctor Appointment", ymd(2024, 8, 1), "1")
                    .at(hm(14, 0), hm(14, 30))
                    .with_color("blue"),
            ],
            groups: vec![
                group(
                    "g1",
                    "Development Team",
                    "Working on the new product features",
                    "👨‍💻",
                    6,
                    "#5865f2",
                    "2 hours ago",
                ),
                group(
                    "g2",
                    "Family",
                    "Family events and gatherings",
                    "/images/group-family.jpg",
                    4,
                    "#3ba55c",
                    "1 day ago",
                ),
                group(
                    "g3",
                    "Hiking Club",
                    "Planning weekend hikes and outdoor activities",
                    "🏔️",
                    12,
                    "#eb459e",
                    "3 days ago",
                ),
            ],
            invitations: vec![
                GroupInvitation {
                    id: "inv1".to_string(),
                    group_id: "g4".to_string(),
                    group_name: "Book Club".to_string(),
                    inviter_name: "Charlie Brown".to_string(),
                    invited_at: ymd(2024, 7, 29),
                },
                GroupInvitation {
                    id: "inv2".to_string(),
                    group_id: "g5".to_string(),
                    group_name: "Weekend Warriors".to_string(),
                    inviter_name: "Lucy van Pelt".to_string(),
                    invited_at: ymd(2024, 7, 28),
                },
            ],
            notifications: demo_notifications(),
            conversations: demo_conversations(),
            messages: demo_messages(),
        }
    }
}

fn demo_user() -> User {
    User {
        id: "1".to_string(),
        name: "Alex Taylor".to_string(),
        email: "alex.taylor@example.com".to_string(),
        profile_image: None,
        created_at: Some(ymd(2023, 1, 15)),
        bio: Some("Frontend developer working on shared calendars.".to_string()),
    }
}

fn group(
    id: &str,
    name: &str,
    description: &str,
    avatar: &str,
    members: u32,
    color_tag: &str,
    last_active: &str,
) -> Group {
    Group {
        id: id.to_string(),
        name: name.to_string(),
        description: Some(description.to_string()),
        avatar: Some(avatar.to_string()),
        members,
        color_tag: Some(color_tag.to_string()),
        last_active: Some(last_active.to_string()),
    }
}

#[allow(clippy::too_many_arguments)]
fn notification(
    id: &str,
    kind: NotificationKind,
    title: &str,
    message: &str,
    time_label: &str,
    read: bool,
    actionable: bool,
    metadata: &[(&str, &str)],
) -> Notification {
    Notification {
        id: id.to_string(),
        kind,
        title: title.to_string(),
        message: message.to_string(),
        time_label: time_label.to_string(),
        read,
        actionable,
        metadata: metadata
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect::<BTreeMap<_, _>>(),
    }
}

fn demo_notifications() -> Vec<Notification> {
    vec![
        notification(
            "1",
            NotificationKind::EventInvite,
            "Team Monthly Meeting",
            "Sarah Johnson invited you to a team meeting",
            "2 hours ago",
            false,
            true,
            &[("event_id", "123"), ("organizer", "Sarah Johnson")],
        ),
        notification(
            "2",
            NotificationKind::Reminder,
            "Doctor Appointment",
            "Reminder: You have an appointment in 2 days",
            "5 hours ago",
            true,
            false,
            &[("event_id", "124")],
        ),
        notification(
            "3",
            NotificationKind::GroupActivity,
            "Project Deadline Update",
            "Mike Thompson updated the project deadline",
            "Yesterday",
            false,
            true,
            &[("group_id", "456"), ("event_id", "125")],
        ),
        notification(
            "4",
            NotificationKind::EventUpdate,
            "Meeting Rescheduled",
            "The weekly standup has been moved to 2:00 PM",
            "2 days ago",
            true,
            false,
            &[("event_id", "126")],
        ),
        notification(
            "5",
            NotificationKind::EventReminder,
            "Birthday Party",
            "Alex's birthday party is tomorrow at 7 PM",
            "2 days ago",
            true,
            true,
            &[("event_id", "127"), ("location", "Bowling Alley")],
        ),
    ]
}

fn participant(id: &str, name: &str, avatar: &str) -> Participant {
    Participant {
        id: id.to_string(),
        name: name.to_string(),
        avatar: avatar.to_string(),
    }
}

fn conversation(
    id: &str,
    participant: Participant,
    last_message: &str,
    time_label: &str,
    unread: u32,
) -> Conversation {
    Conversation {
        id: id.to_string(),
        participant,
        last_message: last_message.to_string(),
        time_label: time_label.to_string(),
        unread,
    }
}

fn demo_conversations() -> Vec<Conversation> {
    vec![
        conversation(
            "1",
            participant("101", "Sarah Johnson", "SJ"),
            "Are we still meeting tomorrow?",
            "5:42 PM",
            2,
        ),
        conversation(
            "2",
            participant("102", "Mike Thompson", "MT"),
            "I sent you the calendar invite",
            "2:15 PM",
            0,
        ),
        conversation(
            "3",
            participant("103", "Alex Wong", "AW"),
            "Thanks for the update!",
            "Yesterday",
            0,
        ),
        conversation(
            "4",
            participant("104", "Emily Chen", "EC"),
            "Let me check my schedule",
            "Yesterday",
            0,
        ),
    ]
}

fn demo_messages() -> Vec<Message> {
    let sarah = participant("101", "Sarah Johnson", "SJ");
    let me = self_participant();
    let lines = [
        ("1", &sarah, "Hey there! Just wanted to check if we're still on for tomorrow's meeting?", "5:30 PM"),
        ("2", &me, "Hi Sarah! Yes, we're still on for tomorrow at 10 AM.", "5:35 PM"),
        ("3", &sarah, "Great! Do you have the agenda prepared?", "5:38 PM"),
        ("4", &me, "I'm still working on it. I'll share it with you later tonight.", "5:40 PM"),
        ("5", &sarah, "Are we still meeting tomorrow?", "5:42 PM"),
    ];
    lines
        .into_iter()
        .map(|(id, sender, content, time_label)| Message {
            id: id.to_string(),
            conversation_id: "1".to_string(),
            sender: sender.clone(),
            content: content.to_string(),
            time_label: time_label.to_string(),
            is_mine: sender.id == "me",
        })
        .collect()
}

/// Participant record used for messages the current user sends.
pub fn self_participant() -> Participant {
    participant("me", "Me", "ME")
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}
