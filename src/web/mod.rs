//! HTTP API for weather aggregation and ADM4 resolution.
//!
//! ## Starting the Server
//!
//! ```text
//! # Start on default port 8080
//! weather-adm4 serve
//!
//! # Load the region table once at startup
//! weather-adm4 serve --preload-dataset --address 0.0.0.0
//! ```
//!
//! ## API Endpoints
//!
//! - `GET /weather?lat=..&lon=..` - Merged `{ openWeather, tomorrowWeather, accuWeather, bmkgWeather }`
//! - `GET /api/adm4?lat=..&lon=..` - Resolved ADM4 code with the matched region path
//! - `GET /health` - Liveness check
//!
//! A provider that fails is reported in its own slot as
//! `{ "error": "...", "errorType": "..." }`; the response is still `200`
//! unless every provider failed (`502`). Missing or malformed coordinates
//! are rejected with `400`.

pub mod server;
