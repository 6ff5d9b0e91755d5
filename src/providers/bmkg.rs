use serde_json::Value;

use super::{get_json, trim_base, ProviderError};
use crate::core::region::dotted_village_code;

/// BMKG public forecast, indexed by ADM4 code
#[derive(Debug, Clone)]
pub struct BmkgClient {
    client: reqwest::Client,
    base_url: String,
}

impl BmkgClient {
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: trim_base(base_url),
        }
    }

    /// Forecast for a village code.
    ///
    /// BMKG expects the dotted form (`31.71.06.1001`); zero-padded 10-digit
    /// codes are converted, anything else is sent unchanged.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` on network failure, non-2xx status or a non-JSON body.
    pub async fn forecast(&self, adm4: &str) -> Result<Value, ProviderError> {
        let code = dotted_village_code(adm4).unwrap_or_else(|| adm4.to_string());
        let url = format!("{}/publik/prakiraan-cuaca", self.base_url);
        let request = self.client.get(url).query(&[("adm4", code)]);
        get_json(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_forecast_sends_dotted_code() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/publik/prakiraan-cuaca"))
            .and(query_param("adm4", "31.71.06.1001"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "lokasi": {"adm4": "31.71.06.1001", "desa": "Gunung"}
            })))
            .mount(&mock_server)
            .await;

        let client = BmkgClient::new(reqwest::Client::new(), &mock_server.uri());
        let body = client.forecast("3171061001").await.unwrap();
        assert_eq!(body["lokasi"]["desa"], "Gunung");
    }

    #[tokio::test]
    async fn test_forecast_passes_other_codes_through() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/publik/prakiraan-cuaca"))
            .and(query_param("adm4", "31.71.06.1001"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&mock_server)
            .await;

        let client = BmkgClient::new(reqwest::Client::new(), &mock_server.uri());
        assert!(client.forecast("31.71.06.1001").await.is_ok());
    }
}
