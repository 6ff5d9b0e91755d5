//! Centralized validation and helper functions.

use crate::core::types::Coordinates;

/// Maximum number of rows accepted from a region dataset (DOS protection)
pub const MAX_ROWS: usize = 500_000;

/// Longest accepted raw `lat`/`lon` query value
pub const MAX_COORDINATE_LENGTH: usize = 32;

/// Check if adding another row would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new row.
/// Returns an error message if adding would exceed the limit, None if safe to add.
#[must_use]
pub fn check_row_limit(count: usize) -> Option<String> {
    if count >= MAX_ROWS {
        Some(format!(
            "Too many rows: adding another would exceed maximum of {MAX_ROWS}"
        ))
    } else {
        None
    }
}

/// Inbound parameter validation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing lat or lon query parameter")]
    MissingCoordinate,
    #[error("Invalid {0}: not a finite decimal number")]
    InvalidCoordinate(&'static str),
    #[error("Invalid {0}: out of range")]
    CoordinateOutOfRange(&'static str),
}

/// Validate raw `lat`/`lon` values into [`Coordinates`].
///
/// Blank values count as missing.
///
/// # Examples
///
/// ```
/// use weather_adm4::utils::validation::{parse_coordinates, ValidationError};
///
/// let c = parse_coordinates(Some("-6.2297"), Some("106.7997")).unwrap();
/// assert_eq!(c.lat, -6.2297);
///
/// assert_eq!(
///     parse_coordinates(None, Some("106.8")),
///     Err(ValidationError::MissingCoordinate)
/// );
/// ```
///
/// # Errors
///
/// Returns `ValidationError::MissingCoordinate` if either value is absent,
/// `ValidationError::InvalidCoordinate` if it does not parse as a finite
/// number, or `ValidationError::CoordinateOutOfRange` if latitude is outside
/// [-90, 90] or longitude outside [-180, 180].
pub fn parse_coordinates(
    lat: Option<&str>,
    lon: Option<&str>,
) -> Result<Coordinates, ValidationError> {
    let lat = lat.map(str::trim).filter(|s| !s.is_empty());
    let lon = lon.map(str::trim).filter(|s| !s.is_empty());

    let (Some(lat), Some(lon)) = (lat, lon) else {
        return Err(ValidationError::MissingCoordinate);
    };

    let lat = parse_degrees(lat, "lat")?;
    let lon = parse_degrees(lon, "lon")?;

    if !(-90.0..=90.0).contains(&lat) {
        return Err(ValidationError::CoordinateOutOfRange("lat"));
    }
    if !(-180.0..=180.0).contains(&lon) {
        return Err(ValidationError::CoordinateOutOfRange("lon"));
    }

    Ok(Coordinates::new(lat, lon))
}

fn parse_degrees(raw: &str, field: &'static str) -> Result<f64, ValidationError> {
    if raw.len() > MAX_COORDINATE_LENGTH {
        return Err(ValidationError::InvalidCoordinate(field));
    }
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or(ValidationError::InvalidCoordinate(field))
}

/// Whether a code is plain ASCII digits long enough to carry a tier suffix
#[must_use]
pub fn is_well_formed_code(code: &str) -> bool {
    code.len() >= 8 && code.chars().all(|c| c.is_ascii_digit())
}
