//! Profile and settings use-case service.

use crate::model::form::{FormErrors, ProfileUpdate};
use crate::model::user::{NotificationSettings, PrivacySettings, User, UserSettings};
use crate::repo::seed::Repositories;
use crate::repo::user_repo::{SettingsRepository, UserRepository};
use crate::service::ServiceResult;
use log::info;
use std::sync::Arc;

/// Reminder lead times offered by the settings page, in minutes.
pub const REMINDER_CHOICES: [u32; 5] = [5, 15, 30, 60, 24 * 60];

pub struct ProfileService {
    users: Arc<dyn UserRepository>,
    settings: Arc<dyn SettingsRepository>,
}

impl ProfileService {
    pub fn new(users: Arc<dyn UserRepository>, settings: Arc<dyn SettingsRepository>) -> Self {
        Self { users, settings }
    }

    pub fn from_repositories(repos: &Repositories) -> Self {
        Self::new(Arc::clone(&repos.users), Arc::clone(&repos.settings))
    }

    pub fn get_user(&self) -> ServiceResult<User> {
        Ok(self.users.get_user()?)
    }

    /// Validates and applies a profile edit; returns the updated user.
    pub fn update_profile(&self, update: ProfileUpdate) -> ServiceResult<User> {
        update.validate()?;

        let mut user = self.users.get_user()?;
        user.name = update.name.trim().to_string();
        user.email = update.email.trim().to_string();
        user.bio = update
            .bio
            .map(|bio| bio.trim().to_string())
            .filter(|bio| !bio.is_empty());
        self.users.update_user(&user)?;
        info!("event=profile_update module=service status=ok user_id={}", user.id);
        Ok(user)
    }

    pub fn get_settings(&self) -> ServiceResult<UserSettings> {
        Ok(self.settings.get_settings()?)
    }

    pub fn update_notification_settings(
        &self,
        settings: NotificationSettings,
    ) -> ServiceResult<UserSettings> {
        if !REMINDER_CHOICES.contains(&settings.reminder_minutes) {
            let mut errors = FormErrors::new();
            errors.push("reminder_minutes", "Choose one of the offered reminder times");
            return Err(errors.into());
        }
        let updated = self.settings.update_notifications(&settings)?;
        info!("event=settings_update module=service status=ok section=notifications");
        Ok(updated)
    }

    pub fn update_privacy_settings(&self, settings: PrivacySettings) -> ServiceResult<UserSettings> {
        let updated = self.settings.update_privacy(&settings)?;
        info!("event=settings_update module=service status=ok section=privacy");
        Ok(updated)
    }
}
