//! Builders wiring a user repository into the HTTP state.

use std::sync::Arc;

use tracing::warn;

use crate::domain::UserService;
use crate::domain::ports::{AcceptAllUsers, UserRepository};
use crate::inbound::http::state::HttpState;
use crate::outbound::audit::TracingUserDeletionListener;
use crate::outbound::memory::InMemoryUserRepository;
use crate::outbound::persistence::DieselUserRepository;

use super::ServerConfig;

/// Wrap `repository` in a [`UserService`] and expose it through both ports.
fn state_for<R>(repository: Arc<R>) -> HttpState
where
    R: UserRepository + 'static,
{
    let service = Arc::new(UserService::with_hooks(
        repository,
        Arc::new(AcceptAllUsers),
        Arc::new(TracingUserDeletionListener),
    ));
    HttpState::new(service.clone(), service)
}

/// Build HTTP state backed by PostgreSQL when a pool is configured, falling
/// back to a process-local store otherwise.
pub fn build_http_state(config: &ServerConfig) -> HttpState {
    match &config.db_pool {
        Some(pool) => state_for(Arc::new(DieselUserRepository::new(pool.clone()))),
        None => {
            warn!("no database configured; users are kept in memory and lost on restart");
            state_for(Arc::new(InMemoryUserRepository::new()))
        }
    }
}
