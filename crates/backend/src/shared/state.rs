use std::sync::Arc;

use super::config::Config;
use super::readiness::ReadinessState;
use crate::usecases::u501_sync_sources::executor::RemoteStore;

/// Process-wide state shared with the handlers.
pub struct AppState {
    pub config: Config,
    pub readiness: ReadinessState,
    pub store: Arc<dyn RemoteStore>,
}

pub type SharedState = Arc<AppState>;
