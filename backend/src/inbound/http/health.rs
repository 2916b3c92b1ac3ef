//! Orchestrator probes at `/health/ready` and `/health/live`.
use std::sync::atomic::{AtomicU8, Ordering};

use actix_web::{HttpResponse, get, http::header, web};

const STARTING: u8 = 0;
const SERVING: u8 = 1;
const DRAINING: u8 = 2;

/// Lifecycle phase shared between the server and its probe handlers.
///
/// The phase only moves forward: starting, then serving, then draining.
pub struct HealthState {
    phase: AtomicU8,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            phase: AtomicU8::new(STARTING),
        }
    }
}

impl HealthState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called once the listener is bound.
    pub fn mark_ready(&self) {
        self.advance_to(SERVING);
    }

    /// Called when shutdown begins; both probes fail from here on.
    pub fn mark_unhealthy(&self) {
        self.advance_to(DRAINING);
    }

    pub fn is_ready(&self) -> bool {
        self.phase.load(Ordering::Acquire) == SERVING
    }

    pub fn is_alive(&self) -> bool {
        self.phase.load(Ordering::Acquire) != DRAINING
    }

    fn advance_to(&self, phase: u8) {
        self.phase.fetch_max(phase, Ordering::AcqRel);
    }
}

fn probe_result(passing: bool) -> HttpResponse {
    let mut builder = match passing {
        true => HttpResponse::Ok(),
        false => HttpResponse::ServiceUnavailable(),
    };
    builder
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .finish()
}

/// Readiness probe. 200 once the listener is bound, 503 before.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Accepting user requests"),
        (status = 503, description = "Still starting or already draining")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    probe_result(state.is_ready())
}

/// Liveness probe. 200 until shutdown begins.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    responses(
        (status = 200, description = "Process is running"),
        (status = 503, description = "Process is draining")
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    probe_result(state.is_alive())
}
