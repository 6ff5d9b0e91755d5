//! Administrative code resolution.
//!
//! - [`AdmMatcher`](engine::AdmMatcher): matches address fragments against a region table
//! - [`Adm4Resolver`](resolver::Adm4Resolver): geocodes a coordinate, loads the table, and matches
//!
//! ## Matching Algorithm
//!
//! 1. **Direct match**: the first row anywhere whose name equals the village name
//! 2. **Hierarchical fallback**: resolve province, regency, district and village in
//!    turn. Each step keeps only rows under the previous step's code (by prefix) and
//!    on its own tier (by zero suffix), so village names that repeat across the
//!    country are told apart by where they sit.
//!
//! The fallback stops at the first tier without a match and reports that tier.
//! It never returns a coarser code in place of a village code.
//!
//! ## Example
//!
//! ```rust
//! use weather_adm4::catalog::store::RegionTable;
//! use weather_adm4::core::address::AddressFragments;
//! use weather_adm4::matching::engine::AdmMatcher;
//!
//! let table = RegionTable::from_csv(
//!     "31,DKI JAKARTA\n31.71,JAKARTA SELATAN\n31.71.06,KEBAYORAN BARU\n31.71.06.1001,GUNUNG\n",
//! ).unwrap();
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

pub mod engine;
pub mod resolver;

pub use engine::{AdmMatch, AdmMatcher, MatchError};
pub use resolver::{Adm4Resolver, Resolution, ResolveError};
