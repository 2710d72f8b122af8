use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::error::{ErrorResponse, FieldError};
use crate::forecast::handlers as forecast_handlers;
use crate::schema::{
    CloudInfo, Coordinates, CurrentWeather, DailyForecastResponse, DailyWeather, FeelsLikeInfo,
    ForecastPeriod, MainInfo, NPeriodForecastResponse, RainInfo, SysInfo, TemperatureInfo,
    UnitsOfMeasurement, WeatherCondition, WindInfo,
};
use crate::weather::handlers as weather_handlers;
use crate::weather::handlers::HealthResponse;

pub const OPENAPI_JSON_PATH: &str = "/api/openapi.json";
pub const DOCS_PATH: &str = "/api/docs";

/// OpenAPI documentation for the gateway
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Weather API",
        description = "Typed gateway in front of the OpenWeatherMap data API. Provides current weather, daily forecasts and 3-hour step forecasts.",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    paths(
        weather_handlers::health,
        weather_handlers::get_current_weather,
        forecast_handlers::get_daily_forecast,
        forecast_handlers::get_period_forecast,
    ),
    tags(
        (name = "health", description = "Service status"),
        (name = "weather", description = "Current weather data"),
        (name = "forecast", description = "Daily and 3-hour step forecasts")
    ),
    components(
        schemas(
            ErrorResponse,
            FieldError,
            HealthResponse,
            UnitsOfMeasurement,
            Coordinates,
            WeatherCondition,
            MainInfo,
            WindInfo,
            RainInfo,
            CloudInfo,
            SysInfo,
            CurrentWeather,
            TemperatureInfo,
            FeelsLikeInfo,
            DailyWeather,
            DailyForecastResponse,
            ForecastPeriod,
            NPeriodForecastResponse,
        )
    )
)]
pub struct ApiDoc;

/// Create the Swagger UI router
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new(DOCS_PATH).url(OPENAPI_JSON_PATH, ApiDoc::openapi())
}
