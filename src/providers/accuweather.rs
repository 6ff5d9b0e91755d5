use serde_json::Value;

use super::{get_json, trim_base, ProviderError};
use crate::core::types::Coordinates;

/// AccuWeather current conditions, looked up through a geoposition location key
#[derive(Debug, Clone)]
pub struct AccuWeatherClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl AccuWeatherClient {
    pub fn new(client: reqwest::Client, base_url: &str, api_key: &str) -> Self {
        Self {
            client,
            base_url: trim_base(base_url),
            api_key: api_key.to_string(),
        }
    }

    /// Resolve the AccuWeather location key for a coordinate
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::MissingLocationKey` if the response has no `Key`,
    /// or another `ProviderError` on request failure.
    pub async fn location_key(&self, coords: Coordinates) -> Result<String, ProviderError> {
        let url = format!("{}/locations/v1/cities/geoposition/search", self.base_url);
        let request = self
            .client
            .get(url)
            .query(&[("apikey", self.api_key.clone()), ("q", coords.to_pair())]);
        let body = get_json(request).await?;

        // Some deployments return the key as a number
        match body.get("Key") {
            Some(Value::String(key)) if !key.is_empty() => Ok(key.clone()),
            Some(Value::Number(key)) => Ok(key.to_string()),
            _ => Err(ProviderError::MissingLocationKey),
        }
    }

    /// Current conditions for a coordinate (two requests)
    ///
    /// # Errors
    ///
    /// Returns the first failing step's `ProviderError`.
    pub async fn current(&self, coords: Coordinates) -> Result<Value, ProviderError> {
        let key = self.location_key(coords).await?;
        tracing::debug!("AccuWeather location key for {coords}: {key}");

        let url = format!("{}/currentconditions/v1/{key}", self.base_url);
        let request = self
            .client
            .get(url)
            .query(&[("apikey", self.api_key.as_str()), ("details", "true")]);
        get_json(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_current_two_step_lookup() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/locations/v1/cities/geoposition/search"))
            .and(query_param("q", "-6.2,106.8"))
            .and(query_param("apikey", "aw-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "Key": "3453754",
                "LocalizedName": "Kebayoran Baru"
            })))
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/currentconditions/v1/3453754"))
            .and(query_param("details", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"WeatherText": "Cloudy"}
            ])))
            .mount(&mock_server)
            .await;

        let client = AccuWeatherClient::new(reqwest::Client::new(), &mock_server.uri(), "aw-key");
        let body = client.current(Coordinates::new(-6.2, 106.8)).await.unwrap();
        assert_eq!(body[0]["WeatherText"], "Cloudy");
    }

    #[tokio::test]
    async fn test_missing_location_key() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/locations/v1/cities/geoposition/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&mock_server)
            .await;

        let client = AccuWeatherClient::new(reqwest::Client::new(), &mock_server.uri(), "k");
        let err = client.current(Coordinates::new(0.0, 0.0)).await.unwrap_err();
        assert!(matches!(err, ProviderError::MissingLocationKey));
    }
}
