use axum::Router;

use crate::repository::SharedGateway;

mod calc;
mod dot;
mod health;
mod reports;

// ---

pub fn router(gateway: SharedGateway) -> Router {
    // ---
    Router::new()
        .merge(reports::router())
        .merge(dot::router())
        .merge(calc::router())
        .merge(health::router())
        .with_state(gateway)
}
