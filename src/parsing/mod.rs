//! Parsers for the administrative region reference dataset.
//!
//! The dataset is delimited text with one administrative unit per line:
//!
//! ```text
//! 31,DKI JAKARTA
//! 31.71,KOTA ADM. JAKARTA SELATAN
//! 31.71.06,KEBAYORAN BARU
//! 31.71.06.1001,GUNUNG
//! ```
//!
//! Dotted codes are expanded to the zero-padded form the matcher relies on.
//!
//! ## Example
//!
//! ```rust
//! use weather_adm4::parsing::delimited::parse_region_text;
//!
//! let rows = parse_region_text("31.71.06,Kebayoran Baru\n", ',').unwrap();
//! assert_eq!(rows[0].code, "31710600");
//! assert_eq!(rows[0].name, "KEBAYORAN BARU");
//! ```

pub mod delimited;
