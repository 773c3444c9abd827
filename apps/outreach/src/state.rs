use std::sync::Arc;

use crate::config::Config;
use crate::gateway::Gateway;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable gateway. `HttpGateway` in production, `FakeGateway` in tests.
    pub gateway: Arc<dyn Gateway>,
    pub sessions: SessionStore,
    pub config: Config,
}
