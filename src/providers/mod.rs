//! Upstream weather providers.
//!
//! Each provider is a thin pass-through: request in, provider JSON out.
//!
//! | Provider    | Keyed by        | Calls |
//! |-------------|-----------------|-------|
//! | OpenWeather | coordinate      | 1     |
//! | Tomorrow.io | coordinate      | 1     |
//! | AccuWeather | location key    | 2     |
//! | BMKG        | ADM4 region code| 1     |

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::matching::resolver::ResolveError;

pub mod accuweather;
pub mod bmkg;
pub mod openweather;
pub mod tomorrow;

pub use accuweather::AccuWeatherClient;
pub use bmkg::BmkgClient;
pub use openweather::OpenWeatherClient;
pub use tomorrow::TomorrowClient;

/// A single provider call failed
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Provider returned HTTP {0}")]
    Status(u16),

    #[error("Malformed provider response: {0}")]
    Decode(String),

    #[error("Geoposition response has no location key")]
    MissingLocationKey,

    #[error("Could not resolve ADM4 code: {0}")]
    Adm4(#[from] ResolveError),
}

impl ProviderError {
    /// Stable machine-readable kind for error markers
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Http(e) if e.is_timeout() => "timeout",
            Self::Http(_) => "provider_unavailable",
            Self::Status(_) => "provider_status",
            Self::Decode(_) | Self::MissingLocationKey => "malformed_response",
            Self::Adm4(e) => e.kind(),
        }
    }
}

/// The four aggregated providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ProviderKind {
    OpenWeather,
    Tomorrow,
    AccuWeather,
    Bmkg,
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OpenWeather => write!(f, "OpenWeather"),
            Self::Tomorrow => write!(f, "Tomorrow.io"),
            Self::AccuWeather => write!(f, "AccuWeather"),
            Self::Bmkg => write!(f, "BMKG"),
        }
    }
}

/// Send a request and decode a 2xx JSON body.
///
/// Transport errors drop their URL, since API keys travel in the query string.
pub(crate) async fn get_json(request: reqwest::RequestBuilder) -> Result<Value, ProviderError> {
    let response = request.send().await.map_err(reqwest::Error::without_url)?;
    let status = response.status();
    if !status.is_success() {
        return Err(ProviderError::Status(status.as_u16()));
    }
    let body = response.text().await.map_err(reqwest::Error::without_url)?;
    serde_json::from_str(&body).map_err(|e| ProviderError::Decode(e.to_string()))
}

pub(crate) fn trim_base(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::engine::MatchError;

    #[test]
    fn test_display_names() {
        assert_eq!(ProviderKind::Tomorrow.to_string(), "Tomorrow.io");
        assert_eq!(ProviderKind::Bmkg.to_string(), "BMKG");
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(ProviderError::Status(500).kind(), "provider_status");
        assert_eq!(ProviderError::MissingLocationKey.kind(), "malformed_response");
        let adm4 = ProviderError::from(ResolveError::NotResolvable(MatchError::ProvinceNotFound));
        assert_eq!(adm4.kind(), "province_not_found");
    }
}
