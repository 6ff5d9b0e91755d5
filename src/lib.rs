//! # weather-adm4
//!
//! Weather aggregation for Indonesian coordinates, and the ADM4 resolver it
//! depends on.
//!
//! Four providers are queried concurrently for a `(lat, lon)` pair:
//! OpenWeather, Tomorrow.io, AccuWeather and BMKG. The first three take the
//! coordinate directly. BMKG indexes its public forecast by ADM4 code, the
//! 10-digit village identifier from the Permendagri region list, so the
//! coordinate is first reverse geocoded through Nominatim and the returned
//! place names are matched against that list.
//!
//! ## Features
//!
//! - **Two-phase matching**: direct village-name match, then a
//!   province → regency → district → village descent narrowed by code prefix
//! - **Per-provider isolation**: a failing provider fills only its own slot
//!   with an error marker
//! - **Dataset audit**: tier counts and orphaned or malformed codes
//!
//! ## Example
//!
//! ```rust
//! use weather_adm4::{AddressFragments, AdmMatcher, RegionTable};
//!
//! let table = RegionTable::from_csv(
//!     "31,DKI JAKARTA\n31.71,JAKARTA SELATAN\n31.71.06,KEBAYORAN BARU\n31.71.06.1001,GUNUNG\n",
//! )
//! .unwrap();
//!
//! let fragments = AddressFragments::new(
//!     Some("DKI Jakarta"),
//!     Some("Jakarta Selatan"),
//!     Some("Kebayoran Baru"),
//!     Some("Gunung"),
//! );
//!
//! let matched = AdmMatcher::new(&table).resolve(&fragments).unwrap();
//! assert_eq!(matched.code, "3171061001");
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Coordinates, tiers, region rows and address fragments
//! - [`parsing`]: Delimited region-list parser
//! - [`catalog`]: Region table loading and hierarchy audit
//! - [`geocode`]: Nominatim reverse geocoding
//! - [`matching`]: ADM4 matching and coordinate resolution
//! - [`providers`]: Weather provider clients
//! - [`aggregator`]: Concurrent fan-out over all providers
//! - [`config`]: Keys, endpoints and timeouts
//! - [`cli`]: Command-line interface implementation
//! - [`web`]: HTTP API

pub mod aggregator;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod core;
pub mod geocode;
pub mod matching;
pub mod parsing;
pub mod providers;
pub mod utils;
pub mod web;

// Re-export commonly used types for convenience
pub use aggregator::{AggregateWeather, WeatherAggregator};
pub use catalog::store::{DatasetSource, RegionTable};
pub use config::AppConfig;
pub use core::address::AddressFragments;
pub use core::region::ReferenceRow;
pub use core::types::*;
pub use matching::{Adm4Resolver, AdmMatch, AdmMatcher, MatchError, ResolveError};
