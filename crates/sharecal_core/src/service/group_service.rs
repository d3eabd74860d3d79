//! Group and invitation use-case service.
//!
//! # Invariants
//! - Responding to an invitation always consumes it.
//! - Accepting never duplicates a group that is already known.

use crate::model::form::GroupDraft;
use crate::model::group::{Group, GroupInvitation, InvitationResponse};
use crate::repo::group_repo::{GroupRepository, InvitationRepository};
use crate::repo::seed::Repositories;
use crate::service::ServiceResult;
use log::{info, warn};
use std::sync::Arc;

pub struct GroupService {
    groups: Arc<dyn GroupRepository>,
    invitations: Arc<dyn InvitationRepository>,
}

impl GroupService {
    pub fn new(
        groups: Arc<dyn GroupRepository>,
        invitations: Arc<dyn InvitationRepository>,
    ) -> Self {
        Self {
            groups,
            invitations,
        }
    }

    pub fn from_repositories(repos: &Repositories) -> Self {
        Self::new(Arc::clone(&repos.groups), Arc::clone(&repos.invitations))
    }

    pub fn list_groups(&self) -> ServiceResult<Vec<Group>> {
        Ok(self.groups.list_groups()?)
    }

    /// Case-insensitive search over name and description; a blank query
    /// returns every group.
    pub fn search_groups(&self, query: &str) -> ServiceResult<Vec<Group>> {
        let needle = query.trim().to_lowercase();
        let groups = self.groups.list_groups()?;
        if needle.is_empty() {
            return Ok(groups);
        }
        Ok(groups
            .into_iter()
            .filter(|group| group.matches(&needle))
            .collect())
    }

    pub fn create_group(&self, draft: GroupDraft) -> ServiceResult<Group> {
        draft.validate()?;
        let group = draft.into_group();
        self.groups.create_group(&group)?;
        info!(
            "event=group_create module=service status=ok group_id={}",
            group.id
        );
        Ok(group)
    }

    pub fn list_invitations(&self) -> ServiceResult<Vec<GroupInvitation>> {
        Ok(self.invitations.list_invitations()?)
    }

    /// Accepts or declines a pending invitation.
    ///
    /// Returns `false` when the invitation does not exist (already answered
    /// or never sent).
    pub fn respond_to_invitation(
        &self,
        invitation_id: &str,
        response: InvitationResponse,
    ) -> ServiceResult<bool> {
        let Some(invitation) = self.invitations.take_invitation(invitation_id)? else {
            warn!(
                "event=invitation_respond module=service status=not_found invitation_id={invitation_id}"
            );
            return Ok(false);
        };

        if response == InvitationResponse::Accept
            && self.groups.get_group(&invitation.group_id)?.is_none()
        {
            let mut group = Group::new(invitation.group_id.as_str(), invitation.group_name.as_str());
            // Inviter and the current user.
            group.members = 2;
            group.last_active = Some("just now".to_string());
            self.groups.create_group(&group)?;
        }

        info!(
            "event=invitation_respond module=service status=ok invitation_id={} action={}",
            invitation.id,
            response.as_str()
        );
        Ok(true)
    }
}
