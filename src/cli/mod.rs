//! Command-line interface for weather-adm4.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **serve**: Start the HTTP API
//! - **resolve**: Resolve the ADM4 code for a coordinate
//! - **weather**: Fetch aggregated weather for a coordinate
//! - **match**: Match region names against a dataset, offline
//! - **dataset**: Load and audit the region dataset
//!
//! ## Usage
//!
//! ```text
//! # ADM4 code for a point in Jakarta
//! weather-adm4 resolve -- -6.2297 106.7997
//!
//! # Every provider, as JSON
//! OPENWEATHER_API_KEY=... weather-adm4 weather -- -6.2297 106.7997
//!
//! # Offline match against a local copy of the dataset
//! weather-adm4 --dataset base.csv match --province "DKI Jakarta" --village Gunung
//!
//! # Start the API
//! weather-adm4 serve --port 8080 --preload-dataset
//! ```

use std::time::Duration;

use clap::{Parser, Subcommand};

use crate::catalog::store::{DatasetSource, DEFAULT_DATASET_URL};
use crate::config::{
    AppConfig, Endpoints, ProviderKeys, DEFAULT_ACCUWEATHER_URL, DEFAULT_BMKG_URL,
    DEFAULT_OPENWEATHER_URL, DEFAULT_TOMORROW_URL, DEFAULT_UPSTREAM_TIMEOUT_SECS,
    DEFAULT_USER_AGENT,
};
use crate::core::types::Coordinates;
use crate::geocode::nominatim::DEFAULT_NOMINATIM_URL;
use crate::utils::validation::parse_coordinates;

pub mod dataset;
pub mod lookup;
pub mod resolve;
pub mod weather;

#[derive(Parser)]
#[command(name = "weather-adm4")]
#[command(version)]
#[command(about = "Aggregate weather providers and resolve Indonesian ADM4 region codes")]
#[command(
    long_about = "weather-adm4 fetches weather for a coordinate from OpenWeather, Tomorrow.io, AccuWeather and BMKG.\n\nBMKG forecasts are indexed by ADM4 (village) code, so the coordinate is reverse geocoded and matched against the Permendagri region list:\n- Direct village-name match when possible\n- Otherwise province, regency, district and village resolved in turn by code prefix"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    #[command(flatten)]
    pub config: ConfigArgs,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API
    Serve(ServeArgs),

    /// Resolve the ADM4 code for a coordinate
    Resolve(resolve::ResolveArgs),

    /// Fetch weather from every provider for a coordinate
    Weather(weather::WeatherArgs),

    /// Match region names against the dataset without geocoding
    #[command(name = "match")]
    Match(lookup::MatchArgs),

    /// Load the region dataset and check its code hierarchy
    Dataset(dataset::DatasetArgs),
}

#[derive(clap::Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value = "8080")]
    pub port: u16,

    /// Address to bind to
    #[arg(short, long, default_value = "127.0.0.1")]
    pub address: String,

    /// Load the region dataset once at startup instead of per request
    #[arg(long, env = "ADM4_PRELOAD_DATASET")]
    pub preload_dataset: bool,
}

/// Credentials and upstream settings, read from flags or the environment
#[derive(clap::Args)]
pub struct ConfigArgs {
    /// OpenWeather API key
    #[arg(long, global = true, env = "OPENWEATHER_API_KEY", default_value = "", hide_env_values = true, hide_default_value = true)]
    pub openweather_api_key: String,

    /// Tomorrow.io API key
    #[arg(long, global = true, env = "TOMORROW_API_KEY", default_value = "", hide_env_values = true, hide_default_value = true)]
    pub tomorrow_api_key: String,

    /// AccuWeather API key
    #[arg(long, global = true, env = "ACCUWEATHER_API_KEY", default_value = "", hide_env_values = true, hide_default_value = true)]
    pub accuweather_api_key: String,

    /// Region dataset: an http(s) URL or a local CSV/TSV path
    #[arg(long, global = true, env = "ADM4_DATASET", default_value = DEFAULT_DATASET_URL)]
    pub dataset: String,

    /// Timeout for each upstream request, in seconds
    #[arg(long, global = true, env = "UPSTREAM_TIMEOUT_SECS", default_value_t = DEFAULT_UPSTREAM_TIMEOUT_SECS)]
    pub upstream_timeout: u64,

    /// User-Agent sent upstream; Nominatim requires an identifying value
    #[arg(long, global = true, env = "WEATHER_ADM4_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    #[arg(long, global = true, env = "NOMINATIM_URL", default_value = DEFAULT_NOMINATIM_URL, hide = true)]
    pub nominatim_url: String,

    #[arg(long, global = true, env = "OPENWEATHER_URL", default_value = DEFAULT_OPENWEATHER_URL, hide = true)]
    pub openweather_url: String,

    #[arg(long, global = true, env = "TOMORROW_URL", default_value = DEFAULT_TOMORROW_URL, hide = true)]
    pub tomorrow_url: String,

    #[arg(long, global = true, env = "ACCUWEATHER_URL", default_value = DEFAULT_ACCUWEATHER_URL, hide = true)]
    pub accuweather_url: String,

    #[arg(long, global = true, env = "BMKG_URL", default_value = DEFAULT_BMKG_URL, hide = true)]
    pub bmkg_url: String,
}

impl ConfigArgs {
    /// Assemble the immutable application configuration
    #[must_use]
    pub fn to_config(&self) -> AppConfig {
        AppConfig {
            keys: ProviderKeys {
                openweather: self.openweather_api_key.clone(),
                tomorrow: self.tomorrow_api_key.clone(),
                accuweather: self.accuweather_api_key.clone(),
            },
            endpoints: Endpoints {
                openweather: self.openweather_url.clone(),
                tomorrow: self.tomorrow_url.clone(),
                accuweather: self.accuweather_url.clone(),
                bmkg: self.bmkg_url.clone(),
                nominatim: self.nominatim_url.clone(),
            },
            dataset: DatasetSource::parse(&self.dataset),
            preload_dataset: false,
            upstream_timeout: Duration::from_secs(self.upstream_timeout),
            user_agent: self.user_agent.clone(),
        }
    }
}

/// A coordinate given as two positional arguments
#[derive(clap::Args)]
pub struct CoordinateArgs {
    /// Latitude in decimal degrees (prefix negative values with `--`)
    #[arg(allow_hyphen_values = true)]
    pub lat: String,

    /// Longitude in decimal degrees
    #[arg(allow_hyphen_values = true)]
    pub lon: String,
}

impl CoordinateArgs {
    /// # Errors
    ///
    /// Returns an error if either value is not a valid coordinate.
    pub fn coordinates(&self) -> anyhow::Result<Coordinates> {
        Ok(parse_coordinates(Some(&self.lat), Some(&self.lon))?)
    }
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

