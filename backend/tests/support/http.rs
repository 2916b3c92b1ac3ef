//! HTTP helpers that issue requests against the harness server and record
//! the outcome in the shared world.

use actix_web::http::Method;
use awc::Client;
use serde_json::Value;
use users_api::domain::TRACE_ID_HEADER;

use crate::harness::{SharedWorld, run_against_server};

struct CapturedResponse {
    status: u16,
    trace_id: Option<String>,
    body: Option<Value>,
}

fn record_response(world: &SharedWorld, captured: CapturedResponse) {
    let mut ctx = world.borrow_mut();
    ctx.last_status = Some(captured.status);
    ctx.last_trace_id = captured.trace_id;
    ctx.last_body = captured.body;
}

/// Send `method path` with an optional JSON payload and record the response.
///
/// Empty bodies are recorded as `None`.
pub(crate) fn perform_request(
    world: &SharedWorld,
    method: Method,
    path: &str,
    payload: Option<Value>,
) {
    let path = path.to_owned();
    let captured = run_against_server(world, |base_url| async move {
        let request = Client::default().request(method, format!("{base_url}{path}"));
        let mut response = match payload {
            Some(payload) => request.send_json(&payload).await.expect("json request"),
            None => request.send().await.expect("request"),
        };
        let status = response.status().as_u16();
        let trace_id = response
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let bytes = response.body().await.expect("body");
        let body = (!bytes.is_empty())
            .then(|| serde_json::from_slice::<Value>(&bytes).expect("json body"));
        CapturedResponse {
            status,
            trace_id,
            body,
        }
    });

    record_response(world, captured);
}
