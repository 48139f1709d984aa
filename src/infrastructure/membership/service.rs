//! Membership coordinator: precondition checks plus the atomic mutation

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::domain::auth::ActorContext;
use crate::domain::id::{MemberId, RoleId, TeamId, UserId};
use crate::domain::membership::{MembershipRepository, TeamMember};
use crate::domain::role::RoleRepository;
use crate::domain::user::UserRepository;
use crate::domain::DomainError;
use crate::infrastructure::policy::AccessPolicy;

/// Membership operation failures, one variant per precondition
#[derive(Debug, Error)]
pub enum MembershipError {
    #[error("You don't have permission to manage this team")]
    ManageDenied,

    #[error("User does not exist or does not belong to this business")]
    UserNotInBusiness,

    #[error("Role does not exist in this team")]
    RoleNotInTeam,

    #[error("User is already a member of this team")]
    AlreadyMember,

    #[error("Cannot remove team admin. Transfer admin role first")]
    CannotRemoveAdmin,

    #[error("User is not a member of this team")]
    NotAMember,

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Request to add a user to a team
#[derive(Debug, Clone)]
pub struct AddMemberRequest {
    pub team_id: TeamId,
    pub user_id: UserId,
    pub role_id: RoleId,
}

/// Enriched record returned after a successful add
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberAdded {
    pub id: MemberId,
    pub user_id: UserId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    pub user_email: String,
    pub team_id: TeamId,
    pub team_name: String,
    pub role_id: RoleId,
    pub role_name: String,
    pub permissions: Vec<String>,
    pub joined_at: DateTime<Utc>,
}

/// Identity of the actor who performed a removal
#[derive(Debug, Clone, Serialize)]
pub struct RemovedBy {
    pub id: UserId,
    pub email: String,
}

/// Confirmation returned after a successful removal
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRemoved {
    pub user_id: UserId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
    pub team_id: TeamId,
    pub team_name: String,
    pub removed_at: DateTime<Utc>,
    pub removed_by: RemovedBy,
}

/// Coordinates team membership changes.
///
/// Preconditions run in a fixed order, each with its own failure, and only
/// then does the repository apply the row-plus-counters mutation as one
/// atomic unit. The membership state machine per (team, user) is
/// `NotMember -> Member -> NotMember` with no partial state observable.
#[derive(Debug)]
pub struct MembershipService {
    policy: Arc<AccessPolicy>,
    users: Arc<dyn UserRepository>,
    roles: Arc<dyn RoleRepository>,
    members: Arc<dyn MembershipRepository>,
}

impl MembershipService {
    pub fn new(
        policy: Arc<AccessPolicy>,
        users: Arc<dyn UserRepository>,
        roles: Arc<dyn RoleRepository>,
        members: Arc<dyn MembershipRepository>,
    ) -> Self {
        Self {
            policy,
            users,
            roles,
            members,
        }
    }

    /// Add a user to a team with a role
    pub async fn add_member(
        &self,
        request: AddMemberRequest,
        actor: &ActorContext,
    ) -> Result<MemberAdded, MembershipError> {
        let access = self.policy.can_manage_team(&request.team_id, actor).await?;
        let team = match (access.allowed, access.team) {
            (true, Some(team)) => team,
            _ => return Err(MembershipError::ManageDenied),
        };

        let business_id = actor
            .require_business()
            .ok_or(MembershipError::ManageDenied)?;

        let user = self
            .users
            .get_in_business(&request.user_id, business_id)
            .await?
            .ok_or(MembershipError::UserNotInBusiness)?;

        let role = self
            .roles
            .get_in_team(&request.role_id, &request.team_id)
            .await?
            .ok_or(MembershipError::RoleNotInTeam)?;

        if self
            .members
            .get(&request.team_id, &request.user_id)
            .await?
            .is_some()
        {
            return Err(MembershipError::AlreadyMember);
        }

        let member = TeamMember::new(
            request.team_id.clone(),
            request.user_id.clone(),
            Some(request.role_id.clone()),
        );

        // The precondition check above can race a concurrent add; the store's
        // uniqueness guarantee is the final arbiter.
        let member = self.members.insert(member).await.map_err(|e| match e {
            DomainError::Conflict { .. } => MembershipError::AlreadyMember,
            other => MembershipError::Domain(other),
        })?;

        info!(
            team_id = %team.id(),
            user_id = %user.id(),
            actor = %actor.user_id,
            "Added team member"
        );

        Ok(MemberAdded {
            id: member.id().clone(),
            user_id: user.id().clone(),
            user_name: user.name().map(String::from),
            user_email: user.email().to_string(),
            team_id: team.id().clone(),
            team_name: team.name().to_string(),
            role_id: role.id().clone(),
            role_name: role.name().to_string(),
            permissions: role.permissions().to_vec(),
            joined_at: member.joined_at(),
        })
    }

    /// Remove a user from a team
    pub async fn remove_member(
        &self,
        team_id: &TeamId,
        target_user_id: &UserId,
        actor: &ActorContext,
    ) -> Result<MemberRemoved, MembershipError> {
        let access = self.policy.can_manage_team(team_id, actor).await?;
        let team = match (access.allowed, access.team) {
            (true, Some(team)) => team,
            _ => return Err(MembershipError::ManageDenied),
        };

        if team.is_admin(target_user_id) {
            return Err(MembershipError::CannotRemoveAdmin);
        }

        let removed = self
            .members
            .remove(team_id, target_user_id)
            .await?
            .ok_or(MembershipError::NotAMember)?;

        let user = self.users.get(target_user_id).await?;

        info!(
            team_id = %team.id(),
            user_id = %removed.user_id(),
            actor = %actor.user_id,
            "Removed team member"
        );

        Ok(MemberRemoved {
            user_id: removed.user_id().clone(),
            user_name: user.as_ref().and_then(|u| u.name().map(String::from)),
            user_email: user.as_ref().map(|u| u.email().to_string()),
            team_id: team.id().clone(),
            team_name: team.name().to_string(),
            removed_at: Utc::now(),
            removed_by: RemovedBy {
                id: actor.user_id.clone(),
                email: actor.email.clone(),
            },
        })
    }
}
