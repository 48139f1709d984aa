//! In-memory repositories backed by a single shared store.
//!
//! One `RwLock` guards all tables, so the membership coordinator's
//! row-plus-counters updates are observed atomically, matching the
//! transactional guarantees of the Postgres backend. Used by the test
//! suites and for local runs without a database.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::domain::business::{Business, BusinessRepository};
use crate::domain::id::{BusinessId, RoleId, TeamId, UserId};
use crate::domain::membership::{MembershipRepository, TeamMember};
use crate::domain::role::{Role, RoleRepository};
use crate::domain::team::{Team, TeamRepository};
use crate::domain::user::{User, UserRepository};
use crate::domain::DomainError;

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<String, User>,
    businesses: HashMap<String, Business>,
    teams: HashMap<String, Team>,
    roles: HashMap<String, Role>,
    /// Keyed by (team_id, user_id) to enforce membership uniqueness
    members: HashMap<(String, String), TeamMember>,
}

/// Shared in-memory store handed to every repository
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// In-memory user repository
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    store: InMemoryStore,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_store(store: InMemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let tables = self
            .store
            .tables
            .read()
            .map_err(|_| DomainError::internal("Failed to acquire lock"))?;
        Ok(tables.users.get(id.as_str()).cloned())
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let tables = self
            .store
            .tables
            .read()
            .map_err(|_| DomainError::internal("Failed to acquire lock"))?;
        Ok(tables.users.values().find(|u| u.email() == email).cloned())
    }

    async fn get_in_business(
        &self,
        id: &UserId,
        business_id: &BusinessId,
    ) -> Result<Option<User>, DomainError> {
        let tables = self
            .store
            .tables
            .read()
            .map_err(|_| DomainError::internal("Failed to acquire lock"))?;
        Ok(tables
            .users
            .get(id.as_str())
            .filter(|u| u.belongs_to(business_id))
            .cloned())
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut tables = self
            .store
            .tables
            .write()
            .map_err(|_| DomainError::internal("Failed to acquire lock"))?;

        if tables.users.values().any(|u| u.email() == user.email()) {
            return Err(DomainError::conflict(format!(
                "User with email '{}' already exists",
                user.email()
            )));
        }

        tables.users.insert(user.id().as_str().to_string(), user.clone());
        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let mut tables = self
            .store
            .tables
            .write()
            .map_err(|_| DomainError::internal("Failed to acquire lock"))?;

        if !tables.users.contains_key(user.id().as_str()) {
            return Err(DomainError::not_found(format!(
                "User '{}' not found",
                user.id()
            )));
        }

        tables.users.insert(user.id().as_str().to_string(), user.clone());
        Ok(user.clone())
    }
}

/// In-memory business repository
#[derive(Debug, Clone, Default)]
pub struct InMemoryBusinessRepository {
    store: InMemoryStore,
}

impl InMemoryBusinessRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_store(store: InMemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl BusinessRepository for InMemoryBusinessRepository {
    async fn get(&self, id: &BusinessId) -> Result<Option<Business>, DomainError> {
        let tables = self
            .store
            .tables
            .read()
            .map_err(|_| DomainError::internal("Failed to acquire lock"))?;
        Ok(tables.businesses.get(id.as_str()).cloned())
    }

    async fn create(&self, business: Business) -> Result<Business, DomainError> {
        let mut tables = self
            .store
            .tables
            .write()
            .map_err(|_| DomainError::internal("Failed to acquire lock"))?;

        if tables.businesses.contains_key(business.id().as_str()) {
            return Err(DomainError::conflict(format!(
                "Business '{}' already exists",
                business.id()
            )));
        }

        tables
            .businesses
            .insert(business.id().as_str().to_string(), business.clone());
        Ok(business)
    }
}

/// In-memory team repository
#[derive(Debug, Clone, Default)]
pub struct InMemoryTeamRepository {
    store: InMemoryStore,
}

impl InMemoryTeamRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_store(store: InMemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl TeamRepository for InMemoryTeamRepository {
    async fn get(&self, id: &TeamId) -> Result<Option<Team>, DomainError> {
        let tables = self
            .store
            .tables
            .read()
            .map_err(|_| DomainError::internal("Failed to acquire lock"))?;
        Ok(tables.teams.get(id.as_str()).cloned())
    }

    async fn get_active_in_business(
        &self,
        id: &TeamId,
        business_id: &BusinessId,
    ) -> Result<Option<Team>, DomainError> {
        let tables = self
            .store
            .tables
            .read()
            .map_err(|_| DomainError::internal("Failed to acquire lock"))?;
        Ok(tables
            .teams
            .get(id.as_str())
            .filter(|t| t.business_id() == business_id && t.is_active())
            .cloned())
    }

    async fn create(&self, team: Team) -> Result<Team, DomainError> {
        let mut tables = self
            .store
            .tables
            .write()
            .map_err(|_| DomainError::internal("Failed to acquire lock"))?;

        if tables.teams.contains_key(team.id().as_str()) {
            return Err(DomainError::conflict(format!(
                "Team '{}' already exists",
                team.id()
            )));
        }

        tables.teams.insert(team.id().as_str().to_string(), team.clone());
        Ok(team)
    }
}

/// In-memory role repository
#[derive(Debug, Clone, Default)]
pub struct InMemoryRoleRepository {
    store: InMemoryStore,
}

impl InMemoryRoleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_store(store: InMemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl RoleRepository for InMemoryRoleRepository {
    async fn get(&self, id: &RoleId) -> Result<Option<Role>, DomainError> {
        let tables = self
            .store
            .tables
            .read()
            .map_err(|_| DomainError::internal("Failed to acquire lock"))?;
        Ok(tables.roles.get(id.as_str()).cloned())
    }

    async fn get_in_team(
        &self,
        id: &RoleId,
        team_id: &TeamId,
    ) -> Result<Option<Role>, DomainError> {
        let tables = self
            .store
            .tables
            .read()
            .map_err(|_| DomainError::internal("Failed to acquire lock"))?;
        Ok(tables
            .roles
            .get(id.as_str())
            .filter(|r| r.team_id() == team_id)
            .cloned())
    }

    async fn create(&self, role: Role) -> Result<Role, DomainError> {
        let mut tables = self
            .store
            .tables
            .write()
            .map_err(|_| DomainError::internal("Failed to acquire lock"))?;

        if tables.roles.contains_key(role.id().as_str()) {
            return Err(DomainError::conflict(format!(
                "Role '{}' already exists",
                role.id()
            )));
        }

        tables.roles.insert(role.id().as_str().to_string(), role.clone());
        Ok(role)
    }
}

/// In-memory membership repository.
///
/// Holds the single write lock across the row mutation and both counter
/// updates, so no reader ever observes a half-applied membership change.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMembershipRepository {
    store: InMemoryStore,
}

impl InMemoryMembershipRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_store(store: InMemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl MembershipRepository for InMemoryMembershipRepository {
    async fn get(
        &self,
        team_id: &TeamId,
        user_id: &UserId,
    ) -> Result<Option<TeamMember>, DomainError> {
        let tables = self
            .store
            .tables
            .read()
            .map_err(|_| DomainError::internal("Failed to acquire lock"))?;
        let key = (team_id.as_str().to_string(), user_id.as_str().to_string());
        Ok(tables.members.get(&key).cloned())
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<TeamMember>, DomainError> {
        let tables = self
            .store
            .tables
            .read()
            .map_err(|_| DomainError::internal("Failed to acquire lock"))?;
        Ok(tables
            .members
            .values()
            .filter(|m| m.user_id() == user_id)
            .cloned()
            .collect())
    }

    async fn insert(&self, member: TeamMember) -> Result<TeamMember, DomainError> {
        let mut tables = self
            .store
            .tables
            .write()
            .map_err(|_| DomainError::internal("Failed to acquire lock"))?;

        let key = (
            member.team_id().as_str().to_string(),
            member.user_id().as_str().to_string(),
        );

        if tables.members.contains_key(&key) {
            return Err(DomainError::conflict(format!(
                "User '{}' is already a member of team '{}'",
                member.user_id(),
                member.team_id()
            )));
        }

        let Some(team) = tables.teams.get_mut(member.team_id().as_str()) else {
            return Err(DomainError::not_found(format!(
                "Team '{}' not found",
                member.team_id()
            )));
        };
        team.record_member_added();

        if let Some(role_id) = member.role_id() {
            if let Some(role) = tables.roles.get_mut(role_id.as_str()) {
                role.record_user_added();
            }
        }

        tables.members.insert(key, member.clone());
        Ok(member)
    }

    async fn remove(
        &self,
        team_id: &TeamId,
        user_id: &UserId,
    ) -> Result<Option<TeamMember>, DomainError> {
        let mut tables = self
            .store
            .tables
            .write()
            .map_err(|_| DomainError::internal("Failed to acquire lock"))?;

        let key = (team_id.as_str().to_string(), user_id.as_str().to_string());
        let Some(member) = tables.members.remove(&key) else {
            return Ok(None);
        };

        if let Some(team) = tables.teams.get_mut(team_id.as_str()) {
            team.record_member_removed();
        }

        if let Some(role_id) = member.role_id() {
            if let Some(role) = tables.roles.get_mut(role_id.as_str()) {
                role.record_user_removed();
            }
        }

        Ok(Some(member))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_store() -> (
        InMemoryStore,
        InMemoryTeamRepository,
        InMemoryRoleRepository,
        InMemoryMembershipRepository,
    ) {
        let store = InMemoryStore::new();
        let teams = InMemoryTeamRepository::with_store(store.clone());
        let roles = InMemoryRoleRepository::with_store(store.clone());
        let members = InMemoryMembershipRepository::with_store(store.clone());
        (store, teams, roles, members)
    }

    fn team() -> Team {
        Team::new(
            TeamId::new("team-1").unwrap(),
            BusinessId::new("biz-1").unwrap(),
            UserId::new("admin-1").unwrap(),
            "Finance",
        )
        .unwrap()
    }

    fn role() -> Role {
        Role::new(
            RoleId::new("role-1").unwrap(),
            TeamId::new("team-1").unwrap(),
            "Analyst",
            vec!["read_expense".to_string()],
        )
    }

    #[tokio::test]
    async fn test_insert_bumps_both_counters() {
        let (_, teams, roles, members) = seeded_store();
        teams.create(team()).await.unwrap();
        roles.create(role()).await.unwrap();

        members
            .insert(TeamMember::new(
                TeamId::new("team-1").unwrap(),
                UserId::new("user-1").unwrap(),
                Some(RoleId::new("role-1").unwrap()),
            ))
            .await
            .unwrap();

        let team = teams.get(&TeamId::new("team-1").unwrap()).await.unwrap().unwrap();
        assert_eq!(team.member_count(), 1);

        let role = roles.get(&RoleId::new("role-1").unwrap()).await.unwrap().unwrap();
        assert_eq!(role.user_count(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_insert_leaves_counters_untouched() {
        let (_, teams, roles, members) = seeded_store();
        teams.create(team()).await.unwrap();
        roles.create(role()).await.unwrap();

        let make = || {
            TeamMember::new(
                TeamId::new("team-1").unwrap(),
                UserId::new("user-1").unwrap(),
                Some(RoleId::new("role-1").unwrap()),
            )
        };

        members.insert(make()).await.unwrap();
        let result = members.insert(make()).await;
        assert!(matches!(result, Err(DomainError::Conflict { .. })));

        let team = teams.get(&TeamId::new("team-1").unwrap()).await.unwrap().unwrap();
        assert_eq!(team.member_count(), 1);

        let role = roles.get(&RoleId::new("role-1").unwrap()).await.unwrap().unwrap();
        assert_eq!(role.user_count(), 1);
    }

    #[tokio::test]
    async fn test_remove_decrements_and_returns_row() {
        let (_, teams, roles, members) = seeded_store();
        teams.create(team()).await.unwrap();
        roles.create(role()).await.unwrap();

        let team_id = TeamId::new("team-1").unwrap();
        let user_id = UserId::new("user-1").unwrap();

        members
            .insert(TeamMember::new(
                team_id.clone(),
                user_id.clone(),
                Some(RoleId::new("role-1").unwrap()),
            ))
            .await
            .unwrap();

        let removed = members.remove(&team_id, &user_id).await.unwrap();
        assert!(removed.is_some());
        assert!(members.get(&team_id, &user_id).await.unwrap().is_none());

        let team = teams.get(&team_id).await.unwrap().unwrap();
        assert_eq!(team.member_count(), 0);

        let role = roles.get(&RoleId::new("role-1").unwrap()).await.unwrap().unwrap();
        assert_eq!(role.user_count(), 0);
    }

    #[tokio::test]
    async fn test_remove_missing_membership_is_noop() {
        let (_, teams, _, members) = seeded_store();
        teams.create(team()).await.unwrap();

        let removed = members
            .remove(
                &TeamId::new("team-1").unwrap(),
                &UserId::new("ghost").unwrap(),
            )
            .await
            .unwrap();
        assert!(removed.is_none());

        let team = teams.get(&TeamId::new("team-1").unwrap()).await.unwrap().unwrap();
        assert_eq!(team.member_count(), 0);
    }

    #[tokio::test]
    async fn test_list_for_user() {
        let (_, teams, _, members) = seeded_store();
        teams.create(team()).await.unwrap();

        members
            .insert(TeamMember::new(
                TeamId::new("team-1").unwrap(),
                UserId::new("user-1").unwrap(),
                None,
            ))
            .await
            .unwrap();

        let list = members
            .list_for_user(&UserId::new("user-1").unwrap())
            .await
            .unwrap();
        assert_eq!(list.len(), 1);

        let empty = members
            .list_for_user(&UserId::new("user-2").unwrap())
            .await
            .unwrap();
        assert!(empty.is_empty());
    }

    #[tokio::test]
    async fn test_poisoned_lock_surfaces_as_internal_error() {
        let (store, teams, _, members) = seeded_store();
        teams.create(team()).await.unwrap();

        let poisoner = store.clone();
        std::thread::spawn(move || {
            let _guard = poisoner.tables.write().unwrap();
            panic!("poison the lock");
        })
        .join()
        .unwrap_err();

        let result = members
            .get(
                &TeamId::new("team-1").unwrap(),
                &UserId::new("user-1").unwrap(),
            )
            .await;
        assert!(matches!(result, Err(DomainError::Internal { .. })));
    }

    #[tokio::test]
    async fn test_tenant_scoped_team_lookup() {
        let (_, teams, _, _) = seeded_store();
        teams.create(team()).await.unwrap();

        let id = TeamId::new("team-1").unwrap();

        let hit = teams
            .get_active_in_business(&id, &BusinessId::new("biz-1").unwrap())
            .await
            .unwrap();
        assert!(hit.is_some());

        let cross_tenant = teams
            .get_active_in_business(&id, &BusinessId::new("biz-2").unwrap())
            .await
            .unwrap();
        assert!(cross_tenant.is_none());
    }
}
