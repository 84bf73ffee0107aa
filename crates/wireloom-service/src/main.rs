//! Wireloom translation service.
//!
//! Loads the namespace configuration, assembles the translator for the
//! built-in integration vocabulary, and serves the HTTP API until the
//! process is stopped.
//!
//! ```bash
//! # Config from the default path (./wireloom.json)
//! cargo run --bin wireloom-service
//!
//! # Explicit config path
//! cargo run --bin wireloom-service -- /etc/wireloom/config.json
//! WIRELOOM_CONFIG=/etc/wireloom/config.json cargo run --bin wireloom-service
//! ```

use std::process::ExitCode;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::config::{resolve_config_path, ServiceConfig, CONFIG_ENV_VAR};

mod config;
mod routes;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let path = resolve_config_path(
        std::env::args().nth(1),
        std::env::var(CONFIG_ENV_VAR).ok(),
    );
    let config = match ServiceConfig::load(&path) {
        Ok(config) => config,
        Err(e) => {
            log::error!("failed to load config {}: {e}", path.display());
            return ExitCode::FAILURE;
        }
    };
    let ServiceConfig { listen, namespaces } = config;

    let translator = integration_nodes::standard_translator(namespaces);
    log::info!(
        "serving vocabulary with namespaces {:?}",
        translator.namespaces().ids()
    );

    let listener = match TcpListener::bind(&listen).await {
        Ok(listener) => listener,
        Err(e) => {
            log::error!("failed to bind {listen}: {e}");
            return ExitCode::FAILURE;
        }
    };
    log::info!("listening on {listen}");

    let app = routes::router(Arc::new(translator));
    if let Err(e) = axum::serve(listener, app).await {
        log::error!("server error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
