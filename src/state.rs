// src/state.rs
use std::sync::Arc;

use crate::config::Config;
use crate::services::forwarder::WebhookClient;

pub type SharedState = Arc<AppState>;

/// Read-only after startup; requests share nothing mutable.
#[derive(Debug)]
pub struct AppState {
    pub config: Config,
    pub webhook: WebhookClient,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let webhook = WebhookClient::new(config.token.clone());
        Self { config, webhook }
    }
}
