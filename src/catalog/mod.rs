//! Administrative region reference table.
//!
//! The table is a flat list of code/name pairs covering all four tiers
//! (~83,000 rows for the full Permendagri dataset). It is read-only once
//! loaded; matchers borrow it.
//!
//! ## Example
//!
//! ```rust
//! use weather_adm4::catalog::store::RegionTable;
//!
//! let table = RegionTable::from_csv("31,DKI JAKARTA\n31.71,JAKARTA SELATAN\n").unwrap();
//! assert_eq!(table.len(), 2);
//! assert!(table.audit().is_clean());
//! ```

pub mod hierarchy;
pub mod store;
