use std::sync::Arc;

use crate::error::GatewayError;
use crate::extractors::ForecastParams;
use crate::schema::{validate, DailyForecastResponse, NPeriodForecastResponse, ResponseSchema};
use crate::upstream::{Endpoint, UpstreamClient, UpstreamQuery};

pub struct ForecastService {
    upstream: Arc<UpstreamClient>,
}

impl ForecastService {
    pub fn new(upstream: Arc<UpstreamClient>) -> Self {
        Self { upstream }
    }

    /// Daily forecast, one entry per day
    pub async fn get_daily_forecast(
        &self,
        params: &ForecastParams,
    ) -> Result<DailyForecastResponse, GatewayError> {
        let forecast: DailyForecastResponse = self.fetch(Endpoint::DailyForecast, params).await?;
        tracing::info!(days = forecast.list.len(), "Daily forecast fetched successfully");
        Ok(forecast)
    }

    /// Forecast in 3-hour steps
    pub async fn get_period_forecast(
        &self,
        params: &ForecastParams,
    ) -> Result<NPeriodForecastResponse, GatewayError> {
        let forecast: NPeriodForecastResponse =
            self.fetch(Endpoint::PeriodForecast, params).await?;
        tracing::info!(steps = forecast.list.len(), "Period forecast fetched successfully");
        Ok(forecast)
    }

    async fn fetch<T: ResponseSchema>(
        &self,
        endpoint: Endpoint,
        params: &ForecastParams,
    ) -> Result<T, GatewayError> {
        tracing::debug!(
            endpoint = endpoint.path(),
            lat = %params.location.lat,
            lon = %params.location.lon,
            cnt = params.cnt,
            units = %params.location.units,
            "Fetching forecast"
        );

        let raw = self
            .upstream
            .fetch(endpoint, &UpstreamQuery::from(params))
            .await?;

        Ok(validate(raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::WeatherParams;
    use crate::schema::fixtures::{daily_forecast_json, period_forecast_json};
    use crate::schema::UnitsOfMeasurement;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn service_for(server: &MockServer) -> ForecastService {
        let upstream = UpstreamClient::new(
            reqwest::Client::new(),
            &server.uri(),
            "0123456789abcdef0123456789abcdef",
        );
        ForecastService::new(Arc::new(upstream))
    }

    fn params(cnt: u8) -> ForecastParams {
        ForecastParams {
            location: WeatherParams {
                lat: 44.34,
                lon: 10.99,
                units: UnitsOfMeasurement::Standard,
                lang: None,
            },
            cnt,
        }
    }

    #[tokio::test]
    async fn test_get_daily_forecast_forwards_count() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/forecast/daily"))
            .and(query_param("cnt", "7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(daily_forecast_json(7)))
            .expect(1)
            .mount(&mock_server)
            .await;

        let forecast = service_for(&mock_server)
            .get_daily_forecast(&params(7))
            .await
            .unwrap();

        assert_eq!(forecast.list.len(), 7);
        assert!(forecast.list.windows(2).all(|w| w[0].dt < w[1].dt));
    }

    #[tokio::test]
    async fn test_get_period_forecast() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/forecast"))
            .and(query_param("cnt", "3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(period_forecast_json(3)))
            .expect(1)
            .mount(&mock_server)
            .await;

        let forecast = service_for(&mock_server)
            .get_period_forecast(&params(3))
            .await
            .unwrap();

        assert_eq!(forecast.cnt, 3);
        assert_eq!(forecast.list[2].dt_txt, "2022-08-30 21:00:00");
    }

    #[tokio::test]
    async fn test_daily_payload_on_period_route_is_rejected() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(daily_forecast_json(3)))
            .mount(&mock_server)
            .await;

        let err = service_for(&mock_server)
            .get_period_forecast(&params(3))
            .await
            .unwrap_err();

        assert!(matches!(err, GatewayError::InvalidResponse(_)));
    }
}
