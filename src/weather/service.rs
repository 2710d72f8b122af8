use std::sync::Arc;

use crate::error::GatewayError;
use crate::extractors::WeatherParams;
use crate::schema::{validate, CurrentWeather};
use crate::upstream::{Endpoint, UpstreamClient, UpstreamQuery};

pub struct WeatherService {
    upstream: Arc<UpstreamClient>,
}

impl WeatherService {
    pub fn new(upstream: Arc<UpstreamClient>) -> Self {
        Self { upstream }
    }

    pub async fn get_current_weather(
        &self,
        params: &WeatherParams,
    ) -> Result<CurrentWeather, GatewayError> {
        tracing::debug!(
            lat = %params.lat,
            lon = %params.lon,
            units = %params.units,
            "Fetching current weather"
        );

        let raw = self
            .upstream
            .fetch(Endpoint::CurrentWeather, &UpstreamQuery::from(params))
            .await?;

        let weather: CurrentWeather = validate(raw)?;

        tracing::info!(
            location = %weather.name,
            temp = %weather.main.temp,
            "Current weather fetched successfully"
        );

        Ok(weather)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::fixtures::current_weather_json;
    use crate::schema::UnitsOfMeasurement;
    use reqwest::StatusCode;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn service_for(server: &MockServer) -> WeatherService {
        let upstream = UpstreamClient::new(
            reqwest::Client::new(),
            &server.uri(),
            "0123456789abcdef0123456789abcdef",
        );
        WeatherService::new(Arc::new(upstream))
    }

    fn params() -> WeatherParams {
        WeatherParams {
            lat: 0.142,
            lon: 37.01,
            units: UnitsOfMeasurement::Metric,
            lang: Some("en".to_string()),
        }
    }

    #[tokio::test]
    async fn test_get_current_weather() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .and(query_param("units", "metric"))
            .and(query_param("lang", "en"))
            .respond_with(ResponseTemplate::new(200).set_body_json(current_weather_json()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let weather = service_for(&mock_server)
            .get_current_weather(&params())
            .await
            .unwrap();

        assert_eq!(weather.sys.country, "KE");
        assert_eq!(weather.coord.lat, 0.142);
    }

    #[tokio::test]
    async fn test_get_current_weather_upstream_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({ "cod": "404", "message": "city not found" })),
            )
            .mount(&mock_server)
            .await;

        let err = service_for(&mock_server)
            .get_current_weather(&params())
            .await
            .unwrap_err();

        match err {
            GatewayError::Upstream(upstream) => assert_eq!(upstream.status, StatusCode::NOT_FOUND),
            other => panic!("expected upstream error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_current_weather_schema_mismatch() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "cod": 200 })))
            .mount(&mock_server)
            .await;

        let err = service_for(&mock_server)
            .get_current_weather(&params())
            .await
            .unwrap_err();

        assert!(matches!(err, GatewayError::InvalidResponse(_)));
    }
}
