//! Concurrent fan-out to every weather provider.
//!
//! All four calls run together and each result is captured on its own: a
//! failing provider is reported in its own slot and never fails the others.
//! BMKG additionally depends on ADM4 resolution; a resolution failure only
//! fills BMKG's slot.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::catalog::store::RegionTable;
use crate::config::AppConfig;
use crate::core::types::Coordinates;
use crate::matching::resolver::Adm4Resolver;
use crate::providers::{
    AccuWeatherClient, BmkgClient, OpenWeatherClient, ProviderError, ProviderKind, TomorrowClient,
};

/// Error marker placed in a failed provider's slot
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderFailure {
    pub error: String,
    pub error_type: String,
}

/// Outcome of one provider call
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ProviderOutcome {
    Ok(Value),
    Failed(ProviderFailure),
}

impl ProviderOutcome {
    fn capture(kind: ProviderKind, result: Result<Value, ProviderError>) -> Self {
        match result {
            Ok(body) => Self::Ok(body),
            Err(e) => {
                // Full detail stays in the server log
                tracing::warn!("{kind} failed: {e}");
                Self::Failed(ProviderFailure {
                    error: format!("Failed to fetch {kind} data"),
                    error_type: e.kind().to_string(),
                })
            }
        }
    }

    #[must_use]
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }
}

/// Merged response of all providers
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateWeather {
    pub open_weather: ProviderOutcome,
    pub tomorrow_weather: ProviderOutcome,
    pub accu_weather: ProviderOutcome,
    pub bmkg_weather: ProviderOutcome,
}

impl AggregateWeather {
    /// Whether every provider failed
    #[must_use]
    pub fn all_failed(&self) -> bool {
        [
            &self.open_weather,
            &self.tomorrow_weather,
            &self.accu_weather,
            &self.bmkg_weather,
        ]
        .iter()
        .all(|o| !o.is_ok())
    }
}

/// Fans a coordinate out to all providers
#[derive(Debug, Clone)]
pub struct WeatherAggregator {
    openweather: OpenWeatherClient,
    tomorrow: TomorrowClient,
    accuweather: AccuWeatherClient,
    bmkg: BmkgClient,
    resolver: Adm4Resolver,
}

impl WeatherAggregator {
    /// Build every client from the configuration, sharing one HTTP client
    pub fn new(config: &AppConfig, client: reqwest::Client) -> Self {
        let e = &config.endpoints;
        let k = &config.keys;
        Self {
            openweather: OpenWeatherClient::new(client.clone(), &e.openweather, &k.openweather),
            tomorrow: TomorrowClient::new(client.clone(), &e.tomorrow, &k.tomorrow),
            accuweather: AccuWeatherClient::new(client.clone(), &e.accuweather, &k.accuweather),
            bmkg: BmkgClient::new(client.clone(), &e.bmkg),
            resolver: Adm4Resolver::new(config, client),
        }
    }

    /// Resolve ADM4 codes against a table loaded once
    #[must_use]
    pub fn with_table(mut self, table: Arc<RegionTable>) -> Self {
        self.resolver = self.resolver.with_table(table);
        self
    }

    #[must_use]
    pub fn resolver(&self) -> &Adm4Resolver {
        &self.resolver
    }

    /// Query every provider concurrently
    pub async fn aggregate(&self, coords: Coordinates) -> AggregateWeather {
        let (open_weather, tomorrow_weather, accu_weather, bmkg_weather) = tokio::join!(
            self.openweather.current(coords),
            self.tomorrow.timeline(coords),
            self.accuweather.current(coords),
            self.bmkg_forecast(coords),
        );

        AggregateWeather {
            open_weather: ProviderOutcome::capture(ProviderKind::OpenWeather, open_weather),
            tomorrow_weather: ProviderOutcome::capture(ProviderKind::Tomorrow, tomorrow_weather),
            accu_weather: ProviderOutcome::capture(ProviderKind::AccuWeather, accu_weather),
            bmkg_weather: ProviderOutcome::capture(ProviderKind::Bmkg, bmkg_weather),
        }
    }

    async fn bmkg_forecast(&self, coords: Coordinates) -> Result<Value, ProviderError> {
        let resolution = self.resolver.resolve(coords).await?;
        self.bmkg.forecast(&resolution.matched.code).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_serialization() {
        let ok = ProviderOutcome::Ok(serde_json::json!({"temp": 30}));
        assert_eq!(serde_json::to_value(&ok).unwrap(), serde_json::json!({"temp": 30}));

        let failed = ProviderOutcome::capture(ProviderKind::Bmkg, Err(ProviderError::Status(502)));
        assert_eq!(
            serde_json::to_value(&failed).unwrap(),
            serde_json::json!({
                "error": "Failed to fetch BMKG data",
                "errorType": "provider_status"
            })
        );
    }

    #[test]
    fn test_aggregate_keys_and_all_failed() {
        let failed = || ProviderOutcome::capture(ProviderKind::Tomorrow, Err(ProviderError::Status(500)));
        let mut weather = AggregateWeather {
            open_weather: failed(),
            tomorrow_weather: failed(),
            accu_weather: failed(),
            bmkg_weather: failed(),
        };
        assert!(weather.all_failed());

        weather.accu_weather = ProviderOutcome::Ok(serde_json::json!([]));
        assert!(!weather.all_failed());

        let json = serde_json::to_value(&weather).unwrap();
        for key in ["openWeather", "tomorrowWeather", "accuWeather", "bmkgWeather"] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
    }
}
