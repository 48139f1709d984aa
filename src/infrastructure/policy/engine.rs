//! Hierarchical team-manage access decisions

use std::sync::Arc;

use tracing::debug;

use crate::domain::auth::ActorContext;
use crate::domain::business::BusinessRepository;
use crate::domain::id::TeamId;
use crate::domain::team::{Team, TeamRepository};
use crate::domain::DomainError;

/// Outcome of a manage-access check. Denial is a value, never an error;
/// callers translate `allowed == false` into a forbidden response.
#[derive(Debug)]
pub struct TeamAccess {
    pub allowed: bool,
    /// The team, when it resolved inside the actor's tenancy. `None` covers
    /// nonexistent, inactive and cross-tenant teams alike, so a denial never
    /// reveals which of the three it was.
    pub team: Option<Team>,
}

impl TeamAccess {
    fn denied() -> Self {
        Self {
            allowed: false,
            team: None,
        }
    }
}

/// Decides whether an actor may manage a team.
///
/// The token's identity and tenancy claims are trusted, but admin and
/// ownership facts are always re-read from the store: both can change after
/// a token was issued, and a stale grant must not authorize a mutation.
#[derive(Debug)]
pub struct AccessPolicy {
    teams: Arc<dyn TeamRepository>,
    businesses: Arc<dyn BusinessRepository>,
}

impl AccessPolicy {
    pub fn new(teams: Arc<dyn TeamRepository>, businesses: Arc<dyn BusinessRepository>) -> Self {
        Self { teams, businesses }
    }

    /// Check manage access: team admin or business owner, tenant-scoped
    /// first so no admin/owner match can reach across businesses.
    pub async fn can_manage_team(
        &self,
        team_id: &TeamId,
        actor: &ActorContext,
    ) -> Result<TeamAccess, DomainError> {
        let Some(business_id) = actor.require_business() else {
            debug!(user_id = %actor.user_id, "Actor has no business tenancy");
            return Ok(TeamAccess::denied());
        };

        let Some(team) = self
            .teams
            .get_active_in_business(team_id, business_id)
            .await?
        else {
            debug!(%team_id, %business_id, "Team not visible in tenant");
            return Ok(TeamAccess::denied());
        };

        let is_admin = team.is_admin(&actor.user_id);

        let is_business_owner = match self.businesses.get(business_id).await? {
            Some(business) => business.is_owned_by(&actor.user_id),
            None => false,
        };

        Ok(TeamAccess {
            allowed: is_admin || is_business_owner,
            team: Some(team),
        })
    }
}
