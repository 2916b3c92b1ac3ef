//! Composition root: storage selection, app assembly and the listener
//! lifecycle.
//!
//! Actix's own signal handling is disabled. The binary listens for shutdown
//! signals itself and calls [`drain`], so the health probes fail before the
//! listener closes.

mod config;
mod state_builders;

pub use config::ServerConfig;
pub use state_builders::build_http_state;

use std::net::SocketAddr;

use actix_web::dev::{Server, ServerHandle, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use crate::Trace;
#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users;

/// The full application: user routes and health probes behind [`Trace`],
/// plus Swagger UI at `/docs` in debug builds.
pub fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .configure(users::configure)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// A listener that is bound but not yet serving.
pub struct BoundServer {
    /// Await this to serve until the server is stopped.
    pub server: Server,
    /// Address actually bound, which differs from the configured one when
    /// port 0 was requested.
    pub local_addr: SocketAddr,
}

/// Bind the users API. Readiness flips to healthy once the listener is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<BoundServer> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(build_http_state(&config));
    let ServerConfig {
        bind_addr, workers, ..
    } = config;

    let mut http_server =
        HttpServer::new(move || build_app(server_health_state.clone(), http_state.clone()))
            .disable_signals()
            .bind(bind_addr)?;
    if let Some(workers) = workers {
        http_server = http_server.workers(workers);
    }
    let local_addr = http_server.addrs().first().copied().unwrap_or(bind_addr);

    let server = http_server.run();
    health_state.mark_ready();
    Ok(BoundServer { server, local_addr })
}

/// Fail both probes, then stop accepting connections and let in-flight
/// requests finish.
pub async fn drain(handle: ServerHandle, health_state: web::Data<HealthState>) {
    health_state.mark_unhealthy();
    handle.stop(true).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn drain_fails_health_checks_and_stops_the_server() {
        let health = web::Data::new(HealthState::new());
        let config = ServerConfig::new(SocketAddr::from(([127, 0, 0, 1], 0))).with_workers(1);

        let bound = create_server(health.clone(), config).expect("bind ephemeral port");
        assert_ne!(bound.local_addr.port(), 0);
        assert!(health.is_ready());

        let handle = bound.server.handle();
        let running = actix_web::rt::spawn(bound.server);
        drain(handle, health.clone()).await;

        assert!(!health.is_alive());
        assert!(!health.is_ready());
        running
            .await
            .expect("server task joins")
            .expect("server exits cleanly");
    }
}
