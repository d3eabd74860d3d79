//! Group and invitation repositories.

use crate::model::group::{Group, GroupInvitation};
use crate::repo::memory::MemoryTable;
use crate::repo::RepoResult;

pub trait GroupRepository: Send + Sync {
    fn list_groups(&self) -> RepoResult<Vec<Group>>;
    fn get_group(&self, id: &str) -> RepoResult<Option<Group>>;
    fn create_group(&self, group: &Group) -> RepoResult<()>;
    fn update_group(&self, group: &Group) -> RepoResult<()>;
}

pub trait InvitationRepository: Send + Sync {
    fn list_invitations(&self) -> RepoResult<Vec<GroupInvitation>>;
    fn get_invitation(&self, id: &str) -> RepoResult<Option<GroupInvitation>>;
    fn create_invitation(&self, invitation: &GroupInvitation) -> RepoResult<()>;
    /// Removes and returns the invitation; `None` when it does not exist.
    fn take_invitation(&self, id: &str) -> RepoResult<Option<GroupInvitation>>;
}

#[derive(Debug)]
pub struct InMemoryGroupRepository {
    table: MemoryTable<Group>,
}

impl InMemoryGroupRepository {
    pub fn seeded(groups: Vec<Group>) -> Self {
        Self {
            table: MemoryTable::new(groups),
        }
    }
}

impl GroupRepository for InMemoryGroupRepository {
    fn list_groups(&self) -> RepoResult<Vec<Group>> {
        self.table.list()
    }

    fn get_group(&self, id: &str) -> RepoResult<Option<Group>> {
        self.table.get(id)
    }

    fn create_group(&self, group: &Group) -> RepoResult<()> {
        self.table.insert(group.clone())
    }

    fn update_group(&self, group: &Group) -> RepoResult<()> {
        self.table.replace(group.clone()).map(|_| ())
    }
}

#[derive(Debug)]
pub struct InMemoryInvitationRepository {
    table: MemoryTable<GroupInvitation>,
}

impl InMemoryInvitationRepository {
    pub fn seeded(invitations: Vec<GroupInvitation>) -> Self {
        Self {
            table: MemoryTable::new(invitations),
        }
    }
}

impl InvitationRepository for InMemoryInvitationRepository {
    fn list_invitations(&self) -> RepoResult<Vec<GroupInvitation>> {
        self.table.list()
    }

    fn get_invitation(&self, id: &str) -> RepoResult<Option<GroupInvitation>> {
        self.table.get(id)
    }

    fn create_invitation(&self, invitation: &GroupInvitation) -> RepoResult<()> {
        self.table.insert(invitation.clone())
    }

    fn take_invitation(&self, id: &str) -> RepoResult<Option<GroupInvitation>> {
        self.table.remove(id)
    }
}
