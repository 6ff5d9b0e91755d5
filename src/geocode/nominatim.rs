use serde::Deserialize;
use thiserror::Error;

use crate::core::address::AddressFragments;
use crate::core::types::Coordinates;

pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

/// Reverse geocoding failed
#[derive(Error, Debug)]
pub enum GeocodeError {
    #[error("Reverse geocode request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Reverse geocode returned HTTP {0}")]
    Status(u16),

    #[error("Reverse geocode response has no address")]
    MissingAddress,
}

#[derive(Debug, Deserialize)]
struct NominatimResponse {
    address: Option<NominatimAddress>,
}

/// The subset of Nominatim's address object used for Indonesian tiers
#[derive(Debug, Default, Deserialize)]
pub struct NominatimAddress {
    pub state: Option<String>,
    pub city: Option<String>,
    pub county: Option<String>,
    pub suburb: Option<String>,
    pub city_district: Option<String>,
    pub village: Option<String>,
    pub neighbourhood: Option<String>,
}

impl NominatimAddress {
    /// Map locale-dependent fields onto tiers.
    ///
    /// Dense urban areas tag kota/kecamatan/kelurahan as city/suburb/
    /// neighbourhood, rural areas as county/city_district/village, so each
    /// tier takes the first populated field in priority order.
    #[must_use]
    pub fn to_fragments(&self) -> AddressFragments {
        AddressFragments::new(
            first_present(&[&self.state]),
            first_present(&[&self.city, &self.county]),
            first_present(&[&self.suburb, &self.city_district]),
            first_present(&[&self.village, &self.neighbourhood]),
        )
    }
}

fn first_present<'a>(fields: &[&'a Option<String>]) -> Option<&'a str> {
    fields
        .iter()
        .filter_map(|f| Option::as_deref(*f))
        .find(|s| !s.trim().is_empty())
}

/// Reverse geocoding client for a Nominatim-compatible endpoint
#[derive(Debug, Clone)]
pub struct Geocoder {
    client: reqwest::Client,
    base_url: String,
    user_agent: String,
}

impl Geocoder {
    /// `user_agent` identifies this application, as Nominatim's usage policy requires
    pub fn new(client: reqwest::Client, base_url: &str, user_agent: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            user_agent: user_agent.to_string(),
        }
    }

    /// Reverse geocode a coordinate into per-tier names
    ///
    /// # Errors
    ///
    /// Returns `GeocodeError::Http` on network or decode failure,
    /// `GeocodeError::Status` on a non-2xx response, or
    /// `GeocodeError::MissingAddress` when the response has no address.
    pub async fn reverse(&self, coords: Coordinates) -> Result<AddressFragments, GeocodeError> {
        let url = format!("{}/reverse", self.base_url);
        let response = self
            .client
            .get(&url)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .query(&[
                ("lat", coords.lat.to_string()),
                ("lon", coords.lon.to_string()),
                ("format", "json".to_string()),
                ("zoom", "18".to_string()),
                ("addressdetails", "1".to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::Status(status.as_u16()));
        }

        let body: NominatimResponse = response.json().await?;
        let address = body.address.ok_or(GeocodeError::MissingAddress)?;
        let fragments = address.to_fragments();

        tracing::debug!(
            "Reverse geocoded {coords}: province={:?} regency={:?} district={:?} village={:?}",
            fragments.province,
            fragments.regency,
            fragments.district,
            fragments.village
        );

        Ok(fragments)
    }
}
