// src/routes/health.rs
//! API health check endpoint for the report service.
//!
//! This module defines the `/health` route used by container orchestrators
//! and CI pipelines to verify that the service is running. It is a sibling
//! module in the `routes` directory and follows the Explicit Module Boundary
//! Pattern (EMBP):
//! - Internal to this file: endpoint handler(s) and related types
//! - Exports to the gateway (`mod.rs`): a subrouter containing the `/health` route

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::repository::SharedGateway;

/// JSON response body for the `/health` endpoint.
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    store: String,
}

/// Handle `GET /health`.
///
/// Reports which store backend is wired in. Does not query the store, so a
/// slow database never makes the service look down.
async fn health(State(gateway): State<SharedGateway>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        store: gateway.name().to_string(),
    })
}

/// Create a subrouter containing the `/health` route.
pub fn router() -> Router<SharedGateway> {
    Router::new().route("/health", get(health))
}
