//! Core data types for ADM4 resolution.
//!
//! - [`ReferenceRow`](region::ReferenceRow): one code/name pair from the region dataset
//! - [`AddressFragments`](address::AddressFragments): per-tier names from reverse geocoding
//! - [`Coordinates`](types::Coordinates), [`Tier`](types::Tier), [`MatchStrategy`](types::MatchStrategy)
//!
//! ## Code Convention
//!
//! Codes encode containment by prefix, with zero padding marking the tier:
//!
//! | Tier     | Example      | Suffix rule                  |
//! |----------|--------------|------------------------------|
//! | Province | `31000000`   | ends with `000000`           |
//! | Regency  | `31710000`   | ends with `0000`, not `000000` |
//! | District | `31710600`   | ends with `00`, not `0000`   |
//! | Village  | `3171061001` | does not end with `00`       |

pub mod address;
pub mod region;
pub mod types;
