use serde_json::Value;

use super::{get_json, trim_base, ProviderError};
use crate::core::types::Coordinates;

/// OpenWeather current conditions
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OpenWeatherClient {
    pub fn new(client: reqwest::Client, base_url: &str, api_key: &str) -> Self {
        Self {
            client,
            base_url: trim_base(base_url),
            api_key: api_key.to_string(),
        }
    }

    /// # Errors
    ///
    /// Returns `ProviderError` on network failure, non-2xx status or a non-JSON body.
    pub async fn current(&self, coords: Coordinates) -> Result<Value, ProviderError> {
        let url = format!("{}/data/2.5/weather", self.base_url);
        let request = self.client.get(url).query(&[
            ("lat", coords.lat.to_string()),
            ("lon", coords.lon.to_string()),
            ("appid", self.api_key.clone()),
            ("units", "metric".to_string()),
        ]);
        get_json(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_current_passes_key_and_units() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .and(query_param("appid", "ow-key"))
            .and(query_param("units", "metric"))
            .and(query_param("lat", "-6.2"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"main": {"temp": 30.1}})),
            )
            .mount(&mock_server)
            .await;

        let client = OpenWeatherClient::new(reqwest::Client::new(), &mock_server.uri(), "ow-key");
        let body = client.current(Coordinates::new(-6.2, 106.8)).await.unwrap();
        assert_eq!(body["main"]["temp"], 30.1);
    }

    #[tokio::test]
    async fn test_current_unauthorized() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&mock_server)
            .await;

        let client = OpenWeatherClient::new(reqwest::Client::new(), &mock_server.uri(), "bad");
        let err = client.current(Coordinates::new(-6.2, 106.8)).await.unwrap_err();
        assert!(matches!(err, ProviderError::Status(401)));
    }
}
