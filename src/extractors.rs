use axum::{
    extract::{FromRequestParts, Query},
    http::{request::Parts, StatusCode},
};
use thiserror::Error;

use crate::error::{FieldError, HttpError};
use crate::impl_into_response;
use crate::schema::UnitsOfMeasurement;
use crate::upstream::UpstreamQuery;

/// Bounds on `cnt`, identical for both forecast endpoints
pub const MIN_COUNT: i64 = 1;
pub const MAX_COUNT: i64 = 16;
pub const DEFAULT_COUNT: u8 = 3;

/// Query string as sent, before any validation
#[derive(Debug, Default)]
struct RawQuery {
    lat: Option<String>,
    lon: Option<String>,
    units: Option<String>,
    lang: Option<String>,
    cnt: Option<String>,
}

impl RawQuery {
    /// Collect known keys; a repeated key keeps its last value, unknown keys are ignored
    fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut raw = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "lat" => &mut raw.lat,
                "lon" => &mut raw.lon,
                "units" => &mut raw.units,
                "lang" => &mut raw.lang,
                "cnt" => &mut raw.cnt,
                _ => continue,
            };
            *slot = Some(value);
        }
        raw
    }
}

/// Rejection for query strings that fail validation; nothing is sent upstream
#[derive(Error, Debug)]
#[error("Invalid query parameters")]
pub struct QueryRejection(pub Vec<FieldError>);

impl HttpError for QueryRejection {
    fn status_code(&self) -> StatusCode {
        StatusCode::UNPROCESSABLE_ENTITY
    }

    fn error_code(&self) -> Option<&'static str> {
        Some("VALIDATION_ERROR")
    }

    fn details(&self) -> Option<Vec<FieldError>> {
        Some(self.0.clone())
    }
}

impl_into_response!(QueryRejection);

/// Validated parameters for the current weather route
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherParams {
    pub lat: f64,
    pub lon: f64,
    pub units: UnitsOfMeasurement,
    pub lang: Option<String>,
}

/// Validated parameters for the forecast routes
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastParams {
    pub location: WeatherParams,
    pub cnt: u8,
}

impl From<&WeatherParams> for UpstreamQuery {
    fn from(params: &WeatherParams) -> Self {
        UpstreamQuery {
            lat: params.lat,
            lon: params.lon,
            units: params.units,
            lang: params.lang.clone(),
            cnt: None,
        }
    }
}

impl From<&ForecastParams> for UpstreamQuery {
    fn from(params: &ForecastParams) -> Self {
        UpstreamQuery {
            cnt: Some(params.cnt),
            ..UpstreamQuery::from(&params.location)
        }
    }
}

fn parse_coordinate(field: &str, value: Option<&str>, errors: &mut Vec<FieldError>) -> f64 {
    let Some(value) = value else {
        errors.push(FieldError::new(field, "field required"));
        return f64::NAN;
    };

    match value.trim().parse::<f64>() {
        Ok(parsed) if parsed.is_finite() => parsed,
        _ => {
            errors.push(FieldError::new(field, "must be a finite number"));
            f64::NAN
        }
    }
}

fn parse_units(value: Option<&str>, errors: &mut Vec<FieldError>) -> UnitsOfMeasurement {
    match value.map(str::parse::<UnitsOfMeasurement>) {
        None => UnitsOfMeasurement::default(),
        Some(Ok(units)) => units,
        Some(Err(e)) => {
            errors.push(FieldError::new("units", e.to_string()));
            UnitsOfMeasurement::default()
        }
    }
}

fn parse_count(value: Option<&str>, errors: &mut Vec<FieldError>) -> u8 {
    let Some(value) = value else {
        return DEFAULT_COUNT;
    };

    match value.trim().parse::<i64>() {
        Ok(cnt) if (MIN_COUNT..=MAX_COUNT).contains(&cnt) => cnt as u8,
        Ok(_) => {
            errors.push(FieldError::new(
                "cnt",
                format!("must be between {} and {}", MIN_COUNT, MAX_COUNT),
            ));
            DEFAULT_COUNT
        }
        Err(_) => {
            errors.push(FieldError::new("cnt", "must be an integer"));
            DEFAULT_COUNT
        }
    }
}

fn parse_location(raw: &RawQuery, errors: &mut Vec<FieldError>) -> WeatherParams {
    WeatherParams {
        lat: parse_coordinate("lat", raw.lat.as_deref(), errors),
        lon: parse_coordinate("lon", raw.lon.as_deref(), errors),
        units: parse_units(raw.units.as_deref(), errors),
        lang: raw.lang.clone(),
    }
}

async fn raw_query<S>(parts: &mut Parts, state: &S) -> Result<RawQuery, QueryRejection>
where
    S: Send + Sync,
{
    Query::<Vec<(String, String)>>::from_request_parts(parts, state)
        .await
        .map(|Query(pairs)| RawQuery::from_pairs(pairs))
        .map_err(|e| QueryRejection(vec![FieldError::new("query", e.body_text())]))
}

impl WeatherParams {
    fn from_raw(raw: &RawQuery) -> Result<Self, QueryRejection> {
        let mut errors = Vec::new();
        let params = parse_location(raw, &mut errors);
        if errors.is_empty() {
            Ok(params)
        } else {
            Err(QueryRejection(errors))
        }
    }
}

impl ForecastParams {
    fn from_raw(raw: &RawQuery) -> Result<Self, QueryRejection> {
        let mut errors = Vec::new();
        let location = parse_location(raw, &mut errors);
        let cnt = parse_count(raw.cnt.as_deref(), &mut errors);
        if errors.is_empty() {
            Ok(Self { location, cnt })
        } else {
            Err(QueryRejection(errors))
        }
    }
}

impl<S> FromRequestParts<S> for WeatherParams
where
    S: Send + Sync,
{
    type Rejection = QueryRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let raw = raw_query(parts, state).await?;
        Self::from_raw(&raw)
    }
}

impl<S> FromRequestParts<S> for ForecastParams
where
    S: Send + Sync,
{
    type Rejection = QueryRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let raw = raw_query(parts, state).await?;
        Self::from_raw(&raw)
    }
}
