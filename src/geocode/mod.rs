//! Reverse geocoding of coordinates into Indonesian address tiers.
//!
//! Uses Nominatim (OpenStreetMap). Each request carries a fixed
//! `User-Agent` identifying this application.
//!
//! | Tier     | Nominatim field, in priority order |
//! |----------|------------------------------------|
//! | Province | `state`                            |
//! | Regency  | `city`, `county`                   |
//! | District | `suburb`, `city_district`          |
//! | Village  | `village`, `neighbourhood`         |

pub mod nominatim;

pub use nominatim::{GeocodeError, Geocoder};
