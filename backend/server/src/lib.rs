//! # Relay
//!
//! CORS relay for the scanner page.
//!
//! The page opens institutional ID links (`utb.edu.ec`) that do not send cross-origin headers, so
//! the browser cannot read them directly. The relay fetches the page server-side and hands the
//! body back with permissive CORS headers.
//!
//!
//!
//! ## Endpoint
//!
//! `GET /?url=<target>` (also `/proxy` and `/proxy.php`, POST accepted)
//!
//! - Missing or empty `url`: **400** `URL no proporcionada`
//! - Target mentions none of the allowed domains: **403** `URL no permitida`
//! - Upstream unreachable, timed out or non-2xx: **500** `Error al obtener el contenido`
//! - Otherwise **200**, upstream body streamed back as `text/html; charset=utf-8`
//! - `OPTIONS` pre-flight: empty 200
//!
//!
//!
//! ## Notes
//!
//! The allowlist is a substring check, `https://example.com/?utb.edu.ec` passes. Redirects are
//! only followed while the next hop is allowed too.
//!
//!
//!
//! ## Environment
//!
//! - `RELAY_PORT` (1111)
//! - `RELAY_TIMEOUT_SECS` (10)
//! - `RELAY_ALLOWED_DOMAINS` (`utb.edu.ec,salutb.edu.ec`)
//! - `RELAY_USER_AGENT`
//! - `RUST_LOG` for log filtering
//!
//! ```sh
//! RUST_LOG=info cargo run -p scaneo
//! curl "http://localhost:1111/?url=https://sai.utb.edu.ec/"
//! ```
use std::{future::pending, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::get,
};

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};
use tokio::{net::TcpListener, signal::ctrl_c};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod utils;

use config::Config;
use routes::relay_handler;
use state::State;

pub async fn start_server() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Loading config...");
    let config = Config::load()?;

    info!("Initializing state...");
    let state = State::new(config)?;

    info!("Starting relay...");

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    info!("Relay running on {address}");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Relay server failed")?;

    info!("Relay shutting down...");
    Ok(())
}

pub fn app(state: Arc<State>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/", get(relay_handler).post(relay_handler))
        .route("/proxy", get(relay_handler).post(relay_handler))
        .route("/proxy.php", get(relay_handler).post(relay_handler))
        .layer(cors)
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                warn!("Failed to install Ctrl+C handler: {e}");
                pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("Failed to install signal handler: {e}");
                pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
