use std::{net::SocketAddr, path::PathBuf};

use axum::Router;
use configs::AppConfig;
use service::{booking::BookingService, file::booking_store::FileBookingStore};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes::{self, AppState};

/// Any origin, method and header; no credentials.
pub fn build_cors() -> CorsLayer {
    CorsLayer::permissive()
}

fn parse_bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    cfg.server
        .bind_addr()
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("server address {}: {e}", cfg.server.bind_addr())))
}

/// Build the store, service and router for a data file.
pub async fn build_app(data_file: impl Into<PathBuf>) -> anyhow::Result<Router> {
    let store = FileBookingStore::new(data_file).await?;
    info!(data_file = %store.path().display(), "booking store ready");

    let state = AppState { bookings: BookingService::new(store) };
    Ok(routes::build_router(state, build_cors()))
}

/// Public entry: serve until Ctrl+C. Expects `.env` and logging to be set up
/// by the caller.
pub async fn run_with_config(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg.storage.data_file).await?;

    let addr = parse_bind_addr(&cfg)?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| StartupError::Bind { addr: addr.to_string(), source })?;
    info!(%addr, "starting booking api");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("booking api stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!(event = "shutdown_signal", "received Ctrl+C, shutting down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unparseable_host() {
        let mut cfg = AppConfig::default();
        cfg.server.host = "not a host".into();
        assert!(matches!(parse_bind_addr(&cfg), Err(StartupError::InvalidConfig(_))));
    }

    #[test]
    fn default_config_binds_localhost() {
        let addr = parse_bind_addr(&AppConfig::default()).unwrap();
        assert_eq!(addr.to_string(), "127.0.0.1:5000");
    }

    #[tokio::test]
    async fn occupied_port_is_a_bind_error() -> anyhow::Result<()> {
        let taken = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let mut cfg = AppConfig::default();
        cfg.server.port = taken.local_addr()?.port();
        cfg.storage.data_file = format!("target/test-data/{}/data.json", uuid::Uuid::new_v4());

        let err = run_with_config(cfg).await.unwrap_err();
        assert!(matches!(err.downcast_ref::<StartupError>(), Some(StartupError::Bind { .. })));
        Ok(())
    }
}
