//! Response schemas and the validator that turns raw upstream JSON into them.

pub mod alias;
pub mod models;

#[cfg(test)]
pub mod fixtures;

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use self::alias::FieldAlias;
pub use self::models::*;

/// One of the fixed response shapes a route guarantees
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaVariant {
    CurrentWeather,
    DailyForecast,
    NPeriodForecast,
}

impl SchemaVariant {
    pub fn name(self) -> &'static str {
        match self {
            Self::CurrentWeather => "current weather",
            Self::DailyForecast => "daily forecast",
            Self::NPeriodForecast => "3-hour forecast",
        }
    }

    fn aliases(self) -> &'static [FieldAlias] {
        match self {
            Self::CurrentWeather => alias::CURRENT_WEATHER_ALIASES,
            Self::DailyForecast | Self::NPeriodForecast => &[],
        }
    }
}

#[derive(Error, Debug)]
pub enum SchemaValidationError {
    #[error("Upstream {} payload is not a JSON object", .0.name())]
    NotAnObject(SchemaVariant),

    #[error("Upstream {} payload does not match schema: {source}", .variant.name())]
    Mismatch {
        variant: SchemaVariant,
        #[source]
        source: serde_json::Error,
    },
}

/// A typed response the validator can produce
pub trait ResponseSchema: DeserializeOwned {
    const VARIANT: SchemaVariant;

    /// Post-deserialization cleanup
    fn finish(self) -> Self {
        self
    }
}

impl ResponseSchema for CurrentWeather {
    const VARIANT: SchemaVariant = SchemaVariant::CurrentWeather;

    // `rain` only survives when it carries the last-hour volume
    fn finish(mut self) -> Self {
        if self.rain.as_ref().is_some_and(|r| r.one_hour.is_none()) {
            self.rain = None;
        }
        self
    }
}

impl ResponseSchema for DailyForecastResponse {
    const VARIANT: SchemaVariant = SchemaVariant::DailyForecast;
}

impl ResponseSchema for NPeriodForecastResponse {
    const VARIANT: SchemaVariant = SchemaVariant::NPeriodForecast;
}

/// Validate a raw upstream document against the schema of `T`.
///
/// Aliases are renamed first, then the document is deserialized strictly:
/// missing required fields and wrong primitive kinds fail, unknown fields
/// are ignored.
pub fn validate<T: ResponseSchema>(mut raw: Value) -> Result<T, SchemaValidationError> {
    let variant = T::VARIANT;

    if !raw.is_object() {
        return Err(SchemaValidationError::NotAnObject(variant));
    }

    alias::apply(&mut raw, variant.aliases());

    serde_json::from_value::<T>(raw)
        .map(T::finish)
        .map_err(|source| SchemaValidationError::Mismatch { variant, source })
}
