//! User profile and settings models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub profile_image: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDate>,
    #[serde(default)]
    pub bio: Option<String>,
}

/// Audience allowed to see or act on something.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Friends,
    Everyone,
    Nobody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSettings {
    pub email_notifications: bool,
    pub push_notifications: bool,
    pub event_reminders: bool,
    /// Default reminder lead time in minutes.
    pub reminder_minutes: u32,
    pub event_updates: bool,
    pub group_activity: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            email_notifications: true,
            push_notifications: true,
            event_reminders: true,
            reminder_minutes: 30,
            event_updates: true,
            group_activity: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivacySettings {
    pub calendar_visibility: Visibility,
    pub profile_visibility: Visibility,
    pub allow_invites: Visibility,
    pub show_email: bool,
}

impl Default for PrivacySettings {
    fn default() -> Self {
        Self {
            calendar_visibility: Visibility::Friends,
            profile_visibility: Visibility::Everyone,
            allow_invites: Visibility::Everyone,
            show_email: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSettings {
    pub notifications: NotificationSettings,
    pub privacy: PrivacySettings,
}
