//! Calendar grouping label.

use serde::{Deserialize, Serialize};

/// A named, colored bucket that owns events.
///
/// Carries no behavior; events reference it through `Event::calendar_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calendar {
    pub id: String,
    pub name: String,
    pub color_tag: String,
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub is_primary: bool,
}

impl Calendar {
    pub fn new(id: impl Into<String>, name: impl Into<String>, color_tag: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color_tag: color_tag.into(),
            owner_id: None,
            is_primary: false,
        }
    }

    pub fn primary(mut self) -> Self {
        self.is_primary = true;
        self
    }
}
