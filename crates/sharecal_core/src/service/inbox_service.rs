//! Notification and messaging inbox services.
//!
//! # Invariants
//! - Filters never mutate state; only explicit actions do.
//! - Sending a message refreshes the conversation preview.

use crate::model::inbox::{new_message_id, Conversation, Message, Notification, NotificationFilter};
use crate::repo::inbox_repo::{MessageRepository, NotificationRepository};
use crate::repo::seed::{self_participant, Repositories};
use crate::service::{ServiceError, ServiceResult};
use chrono::{Local, NaiveTime};
use log::info;
use std::sync::Arc;

pub struct NotificationService {
    repo: Arc<dyn NotificationRepository>,
}

impl NotificationService {
    pub fn new(repo: Arc<dyn NotificationRepository>) -> Self {
        Self { repo }
    }

    pub fn from_repositories(repos: &Repositories) -> Self {
        Self::new(Arc::clone(&repos.notifications))
    }

    pub fn list(&self, filter: NotificationFilter) -> ServiceResult<Vec<Notification>> {
        Ok(self
            .repo
            .list_notifications()?
            .into_iter()
            .filter(|notification| notification.matches(filter))
            .collect())
    }

    pub fn unread_count(&self) -> ServiceResult<usize> {
        Ok(self.list(NotificationFilter::Unread)?.len())
    }

    pub fn mark_read(&self, id: &str) -> ServiceResult<()> {
        let mut notification = self
            .repo
            .get_notification(id)?
            .ok_or_else(|| ServiceError::not_found("notification", id))?;
        if notification.read {
            return Ok(());
        }
        notification.read = true;
        Ok(self.repo.update_notification(&notification)?)
    }

    /// Returns how many notifications changed.
    pub fn mark_all_read(&self) -> ServiceResult<usize> {
        Ok(self.repo.mark_all_read()?)
    }

    /// Returns `false` when there was nothing to delete.
    pub fn delete(&self, id: &str) -> ServiceResult<bool> {
        Ok(self.repo.delete_notification(id)?)
    }
}

pub struct MessageService {
    repo: Arc<dyn MessageRepository>,
}

impl MessageService {
    pub fn new(repo: Arc<dyn MessageRepository>) -> Self {
        Self { repo }
    }

    pub fn from_repositories(repos: &Repositories) -> Self {
        Self::new(Arc::clone(&repos.messages))
    }

    /// Case-insensitive match on participant name or last message.
    pub fn search_conversations(&self, query: &str) -> ServiceResult<Vec<Conversation>> {
        let needle = query.trim().to_lowercase();
        Ok(self
            .repo
            .list_conversations()?
            .into_iter()
            .filter(|conversation| {
                conversation.participant.name.to_lowercase().contains(&needle)
                    || conversation.last_message.to_lowercase().contains(&needle)
            })
            .collect())
    }

    pub fn messages_in(&self, conversation_id: &str) -> ServiceResult<Vec<Message>> {
        self.conversation(conversation_id)?;
        Ok(self.repo.list_messages(conversation_id)?)
    }

    /// Returns the conversation's messages and clears its unread counter.
    pub fn open_conversation(&self, conversation_id: &str) -> ServiceResult<Vec<Message>> {
        let mut conversation = self.conversation(conversation_id)?;
        if conversation.unread > 0 {
            conversation.unread = 0;
            self.repo.update_conversation(&conversation)?;
        }
        Ok(self.repo.list_messages(conversation_id)?)
    }

    /// Sends `content` stamped with the local wall-clock time.
    pub fn send_message(&self, conversation_id: &str, content: &str) -> ServiceResult<Message> {
        self.send_message_at(conversation_id, content, Local::now().time())
    }

    pub fn send_message_at(
        &self,
        conversation_id: &str,
        content: &str,
        sent_at: NaiveTime,
    ) -> ServiceResult<Message> {
        let content = content.trim();
        if content.is_empty() {
            return Err(ServiceError::field("content", "Message cannot be empty"));
        }
        let mut conversation = self.conversation(conversation_id)?;

        let time_label = sent_at.format("%-I:%M %p").to_string();
        let message = Message {
            id: new_message_id(),
            conversation_id: conversation.id.clone(),
            sender: self_participant(),
            content: content.to_string(),
            time_label: time_label.clone(),
            is_mine: true,
        };
        self.repo.create_message(&message)?;

        conversation.last_message = message.content.clone();
        conversation.time_label = time_label;
        self.repo.update_conversation(&conversation)?;
        info!(
            "event=message_send module=service status=ok conversation_id={}",
            conversation.id
        );
        Ok(message)
    }

    fn conversation(&self, id: &str) -> ServiceResult<Conversation> {
        self.repo
            .get_conversation(id)?
            .ok_or_else(|| ServiceError::not_found("conversation", id))
    }
}
