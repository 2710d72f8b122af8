use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{ErrorResponse, GatewayError};
use crate::extractors::WeatherParams;
use crate::schema::{CurrentWeather, UnitsOfMeasurement};
use crate::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Get current weather for a location
///
/// GET /api/v1/weather?lat=0.142&lon=37.01&units=standard
#[utoipa::path(
    get,
    path = "/api/v1/weather",
    tag = "weather",
    params(
        ("lat" = f64, Query, description = "Latitude of the location."),
        ("lon" = f64, Query, description = "Longitude of the location."),
        ("units" = Option<UnitsOfMeasurement>, Query, description = "Units of measurement: standard, metric, or imperial."),
        ("lang" = Option<String>, Query, description = "Output language."),
    ),
    responses(
        (status = 200, description = "Current weather", body = CurrentWeather),
        (status = 422, description = "Invalid query parameters", body = ErrorResponse),
        (status = 502, description = "Upstream returned unexpected data", body = ErrorResponse),
        (status = 503, description = "Upstream unreachable", body = ErrorResponse),
    )
)]
pub async fn get_current_weather(
    State(state): State<AppState>,
    params: WeatherParams,
) -> Result<Json<CurrentWeather>, GatewayError> {
    let weather = state.weather_service.get_current_weather(&params).await?;
    Ok(Json(weather))
}
