//! Notification and messaging inbox models.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    EventInvite,
    Reminder,
    GroupActivity,
    EventUpdate,
    EventReminder,
}

/// Tab filter of the notifications page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationFilter {
    #[default]
    All,
    Unread,
    Invites,
    Reminders,
    Updates,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    /// Relative label such as "2 hours ago".
    pub time_label: String,
    pub read: bool,
    pub actionable: bool,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl Notification {
    pub fn matches(&self, filter: NotificationFilter) -> bool {
        match filter {
            NotificationFilter::All => true,
            NotificationFilter::Unread => !self.read,
            NotificationFilter::Invites => self.kind == NotificationKind::EventInvite,
            NotificationFilter::Reminders => matches!(
                self.kind,
                NotificationKind::Reminder | NotificationKind::EventReminder
            ),
            NotificationFilter::Updates => matches!(
                self.kind,
                NotificationKind::EventUpdate | NotificationKind::GroupActivity
            ),
        }
    }
}

/// Other side of a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    pub name: String,
    /// Initials shown in place of a picture.
    pub avatar: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub participant: Participant,
    pub last_message: String,
    pub time_label: String,
    pub unread: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub conversation_id: String,
    pub sender: Participant,
    pub content: String,
    pub time_label: String,
    pub is_mine: bool,
}

pub fn new_message_id() -> String {
    format!("msg_{}", Uuid::new_v4().simple())
}
