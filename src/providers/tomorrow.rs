use serde_json::Value;

use super::{get_json, trim_base, ProviderError};
use crate::core::types::Coordinates;

/// Tomorrow.io temperature timeline
#[derive(Debug, Clone)]
pub struct TomorrowClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl TomorrowClient {
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
    pub async fn timeline(&self, coords: Coordinates) -> Result<Value, ProviderError> {
        let url = format!("{}/v4/timelines", self.base_url);
        let request = self.client.get(url).query(&[
            ("location", coords.to_pair()),
            ("fields", "temperature".to_string()),
            ("units", "metric".to_string()),
            ("apikey", self.api_key.clone()),
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
    async fn test_timeline_location_pair() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v4/timelines"))
            .and(query_param("location", "-6.2,106.8"))
            .and(query_param("fields", "temperature"))
            .and(query_param("apikey", "tm-key"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": {"timelines": []}})),
            )
            .mount(&mock_server)
            .await;

        let client = TomorrowClient::new(reqwest::Client::new(), &mock_server.uri(), "tm-key");
        let body = client.timeline(Coordinates::new(-6.2, 106.8)).await.unwrap();
        assert!(body["data"]["timelines"].is_array());
    }

    #[tokio::test]
    async fn test_timeline_malformed_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&mock_server)
            .await;

        let client = TomorrowClient::new(reqwest::Client::new(), &mock_server.uri(), "k");
        let err = client.timeline(Coordinates::new(0.0, 0.0)).await.unwrap_err();
        assert!(matches!(err, ProviderError::Decode(_)));
    }
}
