//! Notification and messaging repositories.

use crate::model::inbox::{Conversation, Message, Notification};
use crate::repo::memory::MemoryTable;
use crate::repo::RepoResult;

pub trait NotificationRepository: Send + Sync {
    /// Newest first, as seeded.
    fn list_notifications(&self) -> RepoResult<Vec<Notification>>;
    fn get_notification(&self, id: &str) -> RepoResult<Option<Notification>>;
    fn update_notification(&self, notification: &Notification) -> RepoResult<()>;
    fn delete_notification(&self, id: &str) -> RepoResult<bool>;
    /// Marks every notification read; returns how many changed.
    fn mark_all_read(&self) -> RepoResult<usize>;
}

pub trait MessageRepository: Send + Sync {
    fn list_conversations(&self) -> RepoResult<Vec<Conversation>>;
    fn get_conversation(&self, id: &str) -> RepoResult<Option<Conversation>>;
    fn update_conversation(&self, conversation: &Conversation) -> RepoResult<()>;
    /// Messages of one conversation in send order.
    fn list_messages(&self, conversation_id: &str) -> RepoResult<Vec<Message>>;
    fn create_message(&self, message: &Message) -> RepoResult<()>;
}

#[derive(Debug)]
pub struct InMemoryNotificationRepository {
    table: MemoryTable<Notification>,
}

impl InMemoryNotificationRepository {
    pub fn seeded(notifications: Vec<Notification>) -> Self {
        Self {
            table: MemoryTable::new(notifications),
        }
    }
}

impl NotificationRepository for InMemoryNotificationRepository {
    fn list_notifications(&self) -> RepoResult<Vec<Notification>> {
        self.table.list()
    }

    fn get_notification(&self, id: &str) -> RepoResult<Option<Notification>> {
        self.table.get(id)
    }

    fn update_notification(&self, notification: &Notification) -> RepoResult<()> {
        self.table.replace(notification.clone()).map(|_| ())
    }

    fn delete_notification(&self, id: &str) -> RepoResult<bool> {
        Ok(self.table.remove(id)?.is_some())
    }

    fn mark_all_read(&self) -> RepoResult<usize> {
        self.table.update_all(|notification| {
            let changed = !notification.read;
            notification.read = true;
            changed
        })
    }
}

#[derive(Debug)]
pub struct InMemoryMessageRepository {
    conversations: MemoryTable<Conversation>,
    messages: MemoryTable<Message>,
}

impl InMemoryMessageRepository {
    pub fn seeded(conversations: Vec<Conversation>, messages: Vec<Message>) -> Self {
        Self {
            conversations: MemoryTable::new(conversations),
            messages: MemoryTable::new(messages),
        }
    }
}

impl MessageRepository for InMemoryMessageRepository {
    fn list_conversations(&self) -> RepoResult<Vec<Conversation>> {
        self.conversations.list()
    }

    fn get_conversation(&self, id: &str) -> RepoResult<Option<Conversation>> {
        self.conversations.get(id)
    }

    fn update_conversation(&self, conversation: &Conversation) -> RepoResult<()> {
        self.conversations.replace(conversation.clone()).map(|_| ())
    }

    fn list_messages(&self, conversation_id: &str) -> RepoResult<Vec<Message>> {
        self.messages
            .list_where(|message| message.conversation_id == conversation_id)
    }

    fn create_message(&self, message: &Message) -> RepoResult<()> {
        self.messages.insert(message.clone())
    }
}
