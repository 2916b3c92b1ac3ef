//! In-process users server plus the mutable world shared by scenario steps.
//!
//! The server is the production composition from `users_api::server` with
//! no database configured, so it runs on the in-memory store. Actix spawns
//! its workers with `spawn_local`, so every future touching the server runs
//! on a current-thread runtime inside one `LocalSet`.

use std::cell::RefCell;
use std::future::Future;
use std::net::SocketAddr;
use std::rc::Rc;

use actix_web::dev::ServerHandle;
use actix_web::web;
use rstest::fixture;
use serde_json::Value;
use tokio::runtime::{Builder, Runtime};
use tokio::task::LocalSet;

use users_api::inbound::http::health::HealthState;
use users_api::server::{BoundServer, ServerConfig, create_server, drain};

/// A users server bound to an ephemeral port. Dropping it drains the server
/// the same way a shutdown signal does.
pub(crate) struct TestServer {
    runtime: Runtime,
    local: LocalSet,
    handle: ServerHandle,
    health: web::Data<HealthState>,
    pub(crate) base_url: String,
}

impl TestServer {
    fn start() -> Result<Self, String> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|err| err.to_string())?;
        let local = LocalSet::new();
        let health = web::Data::new(HealthState::new());
        let config = ServerConfig::new(SocketAddr::from(([127, 0, 0, 1], 0))).with_workers(1);

        let BoundServer { server, local_addr } = local.block_on(&runtime, async {
            create_server(health.clone(), config).map_err(|err| err.to_string())
        })?;
        let handle = server.handle();
        local.spawn_local(server);

        Ok(Self {
            runtime,
            local,
            handle,
            health,
            base_url: format!("http://{local_addr}"),
        })
    }

    /// Drive `future` to completion on the server's runtime.
    pub(crate) fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.local.block_on(&self.runtime, future)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let handle = self.handle.clone();
        let health = self.health.clone();
        self.block_on(drain(handle, health));
    }
}

/// Server plus the last response observed by a step.
pub(crate) struct UsersWorld {
    pub(crate) server: TestServer,
    pub(crate) last_status: Option<u16>,
    pub(crate) last_body: Option<Value>,
    pub(crate) last_trace_id: Option<String>,
}

pub(crate) type SharedWorld = Rc<RefCell<UsersWorld>>;

pub(crate) struct WorldFixture {
    world: SharedWorld,
}

impl WorldFixture {
    pub(crate) fn world(&self) -> SharedWorld {
        Rc::clone(&self.world)
    }
}

/// Run an async request against the server, passing it the base URL.
///
/// The world stays borrowed while the future runs, so `request` must not
/// borrow the world itself.
pub(crate) fn run_against_server<R, F, Req>(world: &SharedWorld, request: Req) -> R
where
    Req: FnOnce(String) -> F,
    F: Future<Output = R>,
{
    let ctx = world.borrow();
    let base_url = ctx.server.base_url.clone();
    ctx.server.block_on(request(base_url))
}

#[fixture]
pub(crate) fn world() -> WorldFixture {
    let server = TestServer::start().expect("users server should start");
    WorldFixture {
        world: Rc::new(RefCell::new(UsersWorld {
            server,
            last_status: None,
            last_body: None,
            last_trace_id: None,
        })),
    }
}
