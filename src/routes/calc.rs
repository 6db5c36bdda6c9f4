//! Stateless calculation endpoints, for forms that want a result before
//! anything is saved.

use axum::{extract::Query, routing::get, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calc::{DerivedRatios, Readings, TcfTable, TemperatureReading, TurnsRatioTap};
use crate::repository::SharedGateway;

// ---

pub fn router() -> Router<SharedGateway> {
    // ---
    Router::new()
        .route("/calc/temperature", get(temperature))
        .route("/calc/insulation", post(insulation))
        .route("/calc/turns-ratio", post(turns_ratio))
}

#[derive(Debug, Deserialize)]
struct TemperatureQuery {
    fahrenheit: f64,
    table: Option<TcfTable>,
}

async fn temperature(Query(params): Query<TemperatureQuery>) -> Json<TemperatureReading> {
    // ---
    debug!("GET /calc/temperature {:?}", params);
    Json(TemperatureReading::new(
        params.fahrenheit,
        params.table.unwrap_or_default(),
    ))
}

#[derive(Debug, Deserialize)]
struct InsulationRequest {
    fahrenheit: f64,
    table: Option<TcfTable>,
    readings: Readings,
}

#[derive(Debug, Serialize)]
struct InsulationResponse {
    temperature: TemperatureReading,
    corrected: Readings,
    ratios: DerivedRatios,
}

async fn insulation(Json(request): Json<InsulationRequest>) -> Json<InsulationResponse> {
    // ---
    let temperature = TemperatureReading::new(request.fahrenheit, request.table.unwrap_or_default());
    let corrected = request.readings.corrected(temperature.correction_factor());
    let ratios = DerivedRatios::evaluate(&corrected);

    Json(InsulationResponse {
        temperature,
        corrected,
        ratios,
    })
}

#[derive(Debug, Deserialize)]
struct TurnsRatioRequest {
    secondary_voltage: String,
    tap: TurnsRatioTap,
}

async fn turns_ratio(Json(request): Json<TurnsRatioRequest>) -> Json<TurnsRatioTap> {
    // ---
    let mut tap = request.tap;
    tap.evaluate(&request.secondary_voltage);
    Json(tap)
}
