//! Personal health log API: per-user daily entries stored as CSV, chart
//! data for a dashboard, and trend/anomaly insights over the log.

use std::sync::Arc;

pub mod analysis;
pub mod auth;
pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod session;
pub mod store;

use auth::rate_limit::RateLimitState;
use config::Config;
use session::SessionRegistry;
use store::LogStore;

pub use routes::router;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: LogStore,
    pub sessions: SessionRegistry,
    pub rate_limiter: RateLimitState,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            store: LogStore::new(config.data_dir.clone()),
            sessions: SessionRegistry::new(),
            rate_limiter: RateLimitState::new(
                config.login_rate_limit_max,
                config.login_rate_limit_window_secs,
            ),
            config: Arc::new(config),
        }
    }
}
