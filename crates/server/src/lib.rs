//! Metadata provider HTTP server.
//!
//! Exposes the host-facing `GET /search` endpoint of the Audiobookshelf
//! custom metadata provider contract, backed by the ranobes.com lookup in
//! ranobes-provider-core.

pub mod api;
pub mod config;

use std::sync::Arc;

use axum::Router;

use ranobes_provider_core::provider::RanobesProvider;

use crate::config::ServerConfig;

/// Shared application state (provider and config).
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<RanobesProvider>,
    pub config: ServerConfig,
}

impl AppState {
    pub fn new(provider: RanobesProvider, config: ServerConfig) -> Self {
        Self {
            provider: Arc::new(provider),
            config,
        }
    }
}

/// Build API routes with state.
pub fn api_routes(state: AppState) -> Router {
    api::routes(state)
}
