use axum::{extract::State, Json};

use crate::error::{ErrorResponse, GatewayError};
use crate::extractors::ForecastParams;
use crate::schema::{DailyForecastResponse, NPeriodForecastResponse, UnitsOfMeasurement};
use crate::AppState;

/// Get daily forecast
///
/// GET /api/v1/forecast/daily?lat=44.34&lon=10.99&cnt=7
#[utoipa::path(
    get,
    path = "/api/v1/forecast/daily",
    tag = "forecast",
    params(
        ("lat" = f64, Query, description = "Latitude of the location."),
        ("lon" = f64, Query, description = "Longitude of the location."),
        ("cnt" = Option<u8>, Query, description = "Number of days to return in the forecast (1 to 16)."),
        ("units" = Option<UnitsOfMeasurement>, Query, description = "Units of measurement: standard, metric, or imperial."),
        ("lang" = Option<String>, Query, description = "Output language."),
    ),
    responses(
        (status = 200, description = "Daily forecast", body = DailyForecastResponse),
        (status = 422, description = "Invalid query parameters", body = ErrorResponse),
        (status = 502, description = "Upstream returned unexpected data", body = ErrorResponse),
        (status = 503, description = "Upstream unreachable", body = ErrorResponse),
    )
)]
pub async fn get_daily_forecast(
    State(state): State<AppState>,
    params: ForecastParams,
) -> Result<Json<DailyForecastResponse>, GatewayError> {
    let forecast = state.forecast_service.get_daily_forecast(&params).await?;
    Ok(Json(forecast))
}

/// Get forecast in 3-hour steps
///
/// GET /api/v1/forecast?lat=44.34&lon=10.99&cnt=8
#[utoipa::path(
    get,
    path = "/api/v1/forecast",
    tag = "forecast",
    params(
        ("lat" = f64, Query, description = "Latitude of the location."),
        ("lon" = f64, Query, description = "Longitude of the location."),
        ("cnt" = Option<u8>, Query, description = "Number of timestamps to return in the forecast (1 to 16)."),
        ("units" = Option<UnitsOfMeasurement>, Query, description = "Units of measurement: standard, metric, or imperial."),
        ("lang" = Option<String>, Query, description = "Output language."),
    ),
    responses(
        (status = 200, description = "3-hour step forecast", body = NPeriodForecastResponse),
        (status = 422, description = "Invalid query parameters", body = ErrorResponse),
        (status = 502, description = "Upstream returned unexpected data", body = ErrorResponse),
        (status = 503, description = "Upstream unreachable", body = ErrorResponse),
    )
)]
pub async fn get_period_forecast(
    State(state): State<AppState>,
    params: ForecastParams,
) -> Result<Json<NPeriodForecastResponse>, GatewayError> {
    let forecast = state.forecast_service.get_period_forecast(&params).await?;
    Ok(Json(forecast))
}
