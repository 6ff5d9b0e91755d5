//! Process-wide configuration, built once at startup and shared read-only.

use std::time::Duration;

use crate::catalog::store::DatasetSource;
use crate::geocode::nominatim::DEFAULT_NOMINATIM_URL;

pub const DEFAULT_OPENWEATHER_URL: &str = "https://api.openweathermap.org";
pub const DEFAULT_TOMORROW_URL: &str = "https://api.tomorrow.io";
pub const DEFAULT_ACCUWEATHER_URL: &str = "http://dataservice.accuweather.com";
pub const DEFAULT_BMKG_URL: &str = "https://api.bmkg.go.id";

/// Default per-call upstream timeout
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 10;

/// Identifies this application to upstreams that require it (Nominatim)
pub const DEFAULT_USER_AGENT: &str = concat!("weather-adm4/", env!("CARGO_PKG_VERSION"));

/// API credentials for the keyed providers
#[derive(Clone, Default)]
pub struct ProviderKeys {
    pub openweather: String,
    pub tomorrow: String,
    pub accuweather: String,
}

// Keys stay out of logs
impl std::fmt::Debug for ProviderKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderKeys")
            .field("openweather", &redact(&self.openweather))
            .field("tomorrow", &redact(&self.tomorrow))
            .field("accuweather", &redact(&self.accuweather))
            .finish()
    }
}

fn redact(key: &str) -> &'static str {
    if key.is_empty() {
        "<unset>"
    } else {
        "<redacted>"
    }
}

/// Base URLs of every upstream, overridable for testing and self-hosting
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub openweather: String,
    pub tomorrow: String,
    pub accuweather: String,
    pub bmkg: String,
    pub nominatim: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            openweather: DEFAULT_OPENWEATHER_URL.to_string(),
            tomorrow: DEFAULT_TOMORROW_URL.to_string(),
            accuweather: DEFAULT_ACCUWEATHER_URL.to_string(),
            bmkg: DEFAULT_BMKG_URL.to_string(),
            nominatim: DEFAULT_NOMINATIM_URL.to_string(),
        }
    }
}

impl Endpoints {
    /// Point every upstream at one base URL
    #[must_use]
    pub fn all_at(base: &str) -> Self {
        let base = base.trim_end_matches('/').to_string();
        Self {
            openweather: base.clone(),
            tomorrow: base.clone(),
            accuweather: base.clone(),
            bmkg: base.clone(),
            nominatim: base,
        }
    }
}

/// Immutable application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub keys: ProviderKeys,
    pub endpoints: Endpoints,
    pub dataset: DatasetSource,
    /// Load the region table once at startup instead of per resolution
    pub preload_dataset: bool,
    pub upstream_timeout: Duration,
    pub user_agent: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            keys: ProviderKeys::default(),
            endpoints: Endpoints::default(),
            dataset: DatasetSource::default(),
            preload_dataset: false,
            upstream_timeout: Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl AppConfig {
    /// Build the shared HTTP client with the upstream timeout applied
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn http_client(&self) -> Result<reqwest::Client, reqwest::Error> {
        reqwest::Client::builder()
            .timeout(self.upstream_timeout)
            .user_agent(&self.user_agent)
            .build()
    }

    /// Log which providers will run without credentials
    pub fn warn_missing_keys(&self) {
        for (name, key) in [
            ("OPENWEATHER_API_KEY", &self.keys.openweather),
            ("TOMORROW_API_KEY", &self.keys.tomorrow),
            ("ACCUWEATHER_API_KEY", &self.keys.accuweather),
        ] {
            if key.is_empty() {
                tracing::warn!("{name} is not set; that provider will likely reject requests");
            }
        }
    }
}
