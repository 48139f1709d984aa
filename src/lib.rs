//! Finboard authorization and tenancy core
//!
//! Session-token auth, tenant-scoped access policy, and atomic team
//! membership management for a multi-tenant business finance service.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use domain::business::BusinessRepository;
use domain::membership::MembershipRepository;
use domain::role::RoleRepository;
use domain::team::TeamRepository;
use domain::user::UserRepository;
use infrastructure::auth::{JwtTokenCodec, TokenCodec, TokenConfig};
use infrastructure::business::PostgresBusinessRepository;
use infrastructure::membership::{MembershipService, PostgresMembershipRepository};
use infrastructure::memory::{
    InMemoryBusinessRepository, InMemoryMembershipRepository, InMemoryRoleRepository,
    InMemoryStore, InMemoryTeamRepository, InMemoryUserRepository,
};
use infrastructure::policy::AccessPolicy;
use infrastructure::role::PostgresRoleRepository;
use infrastructure::storage::{self, PostgresConfig};
use infrastructure::team::PostgresTeamRepository;
use infrastructure::user::{Argon2Hasher, PostgresUserRepository, UserService};

/// Repository set behind the application services
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub businesses: Arc<dyn BusinessRepository>,
    pub teams: Arc<dyn TeamRepository>,
    pub roles: Arc<dyn RoleRepository>,
    pub members: Arc<dyn MembershipRepository>,
}

/// Wire services and repositories into the shared application state
pub fn assemble_state(repos: Repositories, tokens: Arc<dyn TokenCodec>) -> AppState {
    let user_service = Arc::new(UserService::new(
        repos.users.clone(),
        Arc::new(Argon2Hasher::new()),
    ));

    let policy = Arc::new(AccessPolicy::new(
        repos.teams.clone(),
        repos.businesses.clone(),
    ));

    let membership_service = Arc::new(MembershipService::new(
        policy,
        repos.users.clone(),
        repos.roles.clone(),
        repos.members.clone(),
    ));

    AppState {
        tokens,
        user_service,
        membership_service,
        members: repos.members,
        teams: repos.teams,
        roles: repos.roles,
    }
}

/// Create application state backed by PostgreSQL
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let pool = storage::connect(
        &PostgresConfig::new(&config.database.url)
            .with_max_connections(config.database.max_connections),
    )
    .await?;

    let repos = Repositories {
        users: Arc::new(PostgresUserRepository::new(pool.clone())),
        businesses: Arc::new(PostgresBusinessRepository::new(pool.clone())),
        teams: Arc::new(PostgresTeamRepository::new(pool.clone())),
        roles: Arc::new(PostgresRoleRepository::new(pool.clone())),
        members: Arc::new(PostgresMembershipRepository::new(pool)),
    };

    let tokens = Arc::new(JwtTokenCodec::new(TokenConfig::new(
        &config.auth.jwt_secret,
        config.auth.session_ttl_days,
    )));

    Ok(assemble_state(repos, tokens))
}

/// Create application state backed by in-memory repositories.
///
/// Used by router-level tests and local experimentation; all repositories
/// share one store so membership mutations stay atomic across tables.
pub fn create_in_memory_state(token_config: TokenConfig) -> (AppState, InMemoryStore) {
    let store = InMemoryStore::new();

    let repos = Repositories {
        users: Arc::new(InMemoryUserRepository::with_store(store.clone())),
        businesses: Arc::new(InMemoryBusinessRepository::with_store(store.clone())),
        teams: Arc::new(InMemoryTeamRepository::with_store(store.clone())),
        roles: Arc::new(InMemoryRoleRepository::with_store(store.clone())),
        members: Arc::new(InMemoryMembershipRepository::with_store(store.clone())),
    };

    let tokens = Arc::new(JwtTokenCodec::new(token_config));

    (assemble_state(repos, tokens), store)
}
