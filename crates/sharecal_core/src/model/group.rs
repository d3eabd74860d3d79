//! Group and group-invitation models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A shared-calendar group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Emoji or image URL/path.
    #[serde(default)]
    pub avatar: Option<String>,
    pub members: u32,
    #[serde(default)]
    pub color_tag: Option<String>,
    /// Human-readable activity label such as "2 hours ago".
    #[serde(default)]
    pub last_active: Option<String>,
}

impl Group {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            avatar: None,
            members: 1,
            color_tag: None,
            last_active: None,
        }
    }

    /// Case-insensitive match over name and description.
    ///
    /// `needle` must already be lowercase.
    pub(crate) fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self
                .description
                .as_deref()
                .is_some_and(|text| text.to_lowercase().contains(needle))
    }
}

/// Pending invitation for the current user to join a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupInvitation {
    pub id: String,
    pub group_id: String,
    pub group_name: String,
    pub inviter_name: String,
    pub invited_at: NaiveDate,
}

/// User decision on a pending invitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvitationResponse {
    Accept,
    Decline,
}

impl InvitationResponse {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Accept => "accept",
            Self::Decline => "decline",
        }
    }
}

pub fn new_group_id() -> String {
    format!("grp_{}", Uuid::new_v4().simple())
}
