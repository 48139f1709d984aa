//! Application state for shared services

use std::sync::Arc;

use crate::domain::membership::MembershipRepository;
use crate::domain::role::RoleRepository;
use crate::domain::team::TeamRepository;
use crate::infrastructure::auth::TokenCodec;
use crate::infrastructure::membership::MembershipService;
use crate::infrastructure::user::UserService;

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub tokens: Arc<dyn TokenCodec>,
    pub user_service: Arc<UserService>,
    pub membership_service: Arc<MembershipService>,
    pub members: Arc<dyn MembershipRepository>,
    pub teams: Arc<dyn TeamRepository>,
    pub roles: Arc<dyn RoleRepository>,
}
