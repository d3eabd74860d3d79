//! Current-user profile and settings repositories.
//!
//! Both hold exactly one record: the signed-in user and their settings.

use crate::model::user::{NotificationSettings, PrivacySettings, User, UserSettings};
use crate::repo::{RepoError, RepoResult};
use std::sync::RwLock;

pub trait UserRepository: Send + Sync {
    fn get_user(&self) -> RepoResult<User>;
    fn update_user(&self, user: &User) -> RepoResult<()>;
}

pub trait SettingsRepository: Send + Sync {
    fn get_settings(&self) -> RepoResult<UserSettings>;
    /// Replaces the notification block and returns the full settings.
    fn update_notifications(&self, settings: &NotificationSettings) -> RepoResult<UserSettings>;
    /// Replaces the privacy block and returns the full settings.
    fn update_privacy(&self, settings: &PrivacySettings) -> RepoResult<UserSettings>;
}

#[derive(Debug)]
pub struct InMemoryUserRepository {
    user: RwLock<User>,
}

impl InMemoryUserRepository {
    pub fn new(user: User) -> Self {
        Self {
            user: RwLock::new(user),
        }
    }
}

impl UserRepository for InMemoryUserRepository {
    fn get_user(&self) -> RepoResult<User> {
        self.user
            .read()
            .map(|user| user.clone())
            .map_err(|_| RepoError::LockPoisoned("user"))
    }

    fn update_user(&self, user: &User) -> RepoResult<()> {
        let mut current = self
            .user
            .write()
            .map_err(|_| RepoError::LockPoisoned("user"))?;
        if current.id != user.id {
            return Err(RepoError::not_found("user", user.id.as_str()));
        }
        *current = user.clone();
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct InMemorySettingsRepository {
    settings: RwLock<UserSettings>,
}

impl InMemorySettingsRepository {
    pub fn new(settings: UserSettings) -> Self {
        Self {
            settings: RwLock::new(settings),
        }
    }

    fn modify(&self, change: impl FnOnce(&mut UserSettings)) -> RepoResult<UserSettings> {
        let mut settings = self
            .settings
            .write()
            .map_err(|_| RepoError::LockPoisoned("settings"))?;
        change(&mut settings);
        Ok(settings.clone())
    }
}

impl SettingsRepository for InMemorySettingsRepository {
    fn get_settings(&self) -> RepoResult<UserSettings> {
        self.settings
            .read()
            .map(|settings| settings.clone())
            .map_err(|_| RepoError::LockPoisoned("settings"))
    }

    fn update_notifications(&self, settings: &NotificationSettings) -> RepoResult<UserSettings> {
        self.modify(|current| current.notifications = settings.clone())
    }

    fn update_privacy(&self, settings: &PrivacySettings) -> RepoResult<UserSettings> {
        self.modify(|current| current.privacy = settings.clone())
    }
}
