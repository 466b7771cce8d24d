//! Binary entry point for the metadata provider server.
//!
//! Serves the host-facing search endpoint so a media-library application
//! can query ranobes.com metadata through its custom-provider contract.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ranobes_provider_core::config::SessionConfig;
use ranobes_provider_core::provider::RanobesProvider;
use ranobes_provider_server::{api_routes, config::ServerConfig, AppState};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ranobes_provider_server=info".parse().unwrap())
                .add_directive("ranobes_provider_core=info".parse().unwrap()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let session = match SessionConfig::load() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("configuration error: {e}");
            std::process::exit(1);
        }
    };
    let provider = match RanobesProvider::new(&session) {
        Ok(p) => p,
        Err(e) => {
            tracing::error!("could not build provider: {e}");
            std::process::exit(1);
        }
    };

    let config = ServerConfig::from_env();
    let state = AppState::new(provider, config);

    let app = api_routes(state.clone()).layer(tower_http::cors::CorsLayer::permissive());

    let addr = state.config.bind_addr();
    tracing::info!("Metadata provider listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await.expect("bind");
    axum::serve(listener, app).await.expect("serve");
}
