//! Service entry-point: loads settings, selects storage, and serves the users
//! API with health probes and OpenAPI docs.

use std::ffi::OsString;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use users_api::inbound::http::health::HealthState;
use users_api::outbound::persistence::{DbPool, run_pending_migrations};
use users_api::server::{BoundServer, ServerConfig, create_server, drain};
use users_api::settings::ServerSettings;

/// Resolve on Ctrl-C, or on SIGTERM where the platform has it.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = terminate.recv() => {}
                }
                return;
            }
            Err(error) => warn!(%error, "SIGTERM handler unavailable; waiting for Ctrl-C"),
        }
    }

    if let Err(error) = tokio::signal::ctrl_c().await {
        warn!(%error, "Ctrl-C handler unavailable; stop the process externally");
        std::future::pending::<()>().await;
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load_from_iter(std::env::args_os().collect::<Vec<OsString>>())
        .wrap_err("failed to load server settings")?;
    let bind_addr = settings.bind_addr().wrap_err("invalid bind address")?;

    let mut config = ServerConfig::new(bind_addr);
    if let Some(pool_config) = settings.pool_config() {
        if settings.run_migrations() {
            let url = pool_config.database_url.clone();
            let applied = actix_web::rt::task::spawn_blocking(move || run_pending_migrations(&url))
                .await
                .wrap_err("migration task panicked")?
                .wrap_err("failed to apply database migrations")?;
            info!(applied, "database migrations up to date");
        }
        let pool = DbPool::new(pool_config)
            .await
            .wrap_err("failed to build database pool")?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let BoundServer { server, local_addr } =
        create_server(health_state.clone(), config).wrap_err("failed to start HTTP server")?;

    let handle = server.handle();
    actix_web::rt::spawn(async move {
        shutdown_signal().await;
        info!("shutdown requested; draining");
        drain(handle, health_state).await;
    });

    info!(%local_addr, "users API listening");
    server.await.wrap_err("HTTP server terminated with an error")
}
