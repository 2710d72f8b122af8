use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use utoipa::ToSchema;

// ============================================================================
// Request-side types
// ============================================================================

/// Units of measurement, forwarded verbatim to the provider
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UnitsOfMeasurement {
    #[default]
    Standard,
    Metric,
    Imperial,
}

impl UnitsOfMeasurement {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Metric => "metric",
            Self::Imperial => "imperial",
        }
    }
}

impl fmt::Display for UnitsOfMeasurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("must be one of: standard, metric, imperial")]
pub struct InvalidUnits;

impl FromStr for UnitsOfMeasurement {
    type Err = InvalidUnits;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(Self::Standard),
            "metric" => Ok(Self::Metric),
            "imperial" => Ok(Self::Imperial),
            _ => Err(InvalidUnits),
        }
    }
}

// ============================================================================
// Shared building blocks
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Weather condition descriptor, present as a list in every response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WeatherCondition {
    pub id: u32,
    pub main: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MainInfo {
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub pressure: u32,
    pub humidity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sea_level: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grnd_level: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WindInfo {
    pub speed: f64,
    pub deg: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gust: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CloudInfo {
    pub all: u32,
}

// ============================================================================
// Current weather
// ============================================================================

/// Precipitation over the last hour (upstream key `1h`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RainInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub one_hour: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SysInfo {
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub country: String,
    pub sunrise: i64,
    pub sunset: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CurrentWeather {
    pub coord: Coordinates,
    pub weather: Vec<WeatherCondition>,
    pub base: String,
    pub main: MainInfo,
    pub visibility: u32,
    pub wind: WindInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rain: Option<RainInfo>,
    pub clouds: CloudInfo,
    pub dt: i64,
    pub sys: SysInfo,
    /// Shift in seconds from UTC
    pub timezone: i64,
    pub id: i64,
    pub name: String,
    pub cod: i64,
}

// ============================================================================
// Daily forecast
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TemperatureInfo {
    pub day: f64,
    pub min: f64,
    pub max: f64,
    pub night: f64,
    pub eve: f64,
    pub morn: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FeelsLikeInfo {
    pub day: f64,
    pub night: f64,
    pub eve: f64,
    pub morn: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DailyWeather {
    pub dt: i64,
    pub sunrise: i64,
    pub sunset: i64,
    pub temp: TemperatureInfo,
    pub feels_like: FeelsLikeInfo,
    pub pressure: u32,
    pub humidity: u32,
    pub weather: Vec<WeatherCondition>,
    pub speed: f64,
    pub deg: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gust: Option<f64>,
    /// Cloudiness, %
    pub clouds: u32,
    /// Probability of precipitation
    pub pop: f64,
    /// Precipitation volume, mm
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rain: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DailyForecastResponse {
    #[schema(value_type = Object)]
    pub city: Map<String, Value>,
    pub cod: String,
    pub message: f64,
    pub cnt: u32,
    pub list: Vec<DailyWeather>,
}

// ============================================================================
// 3-hour step forecast
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ForecastPeriod {
    pub dt: i64,
    pub main: MainInfo,
    pub weather: Vec<WeatherCondition>,
    pub clouds: CloudInfo,
    pub wind: WindInfo,
    pub visibility: u32,
    pub pop: f64,
    /// Passed through as sent, e.g. `{"3h": 0.26}`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub rain: Option<Map<String, Value>>,
    /// Part of the day marker, e.g. `{"pod": "d"}`
    #[schema(value_type = Object)]
    pub sys: Map<String, Value>,
    pub dt_txt: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NPeriodForecastResponse {
    pub cod: String,
    pub message: f64,
    pub cnt: u32,
    pub list: Vec<ForecastPeriod>,
    #[schema(value_type = Object)]
    pub city: Map<String, Value>,
}
