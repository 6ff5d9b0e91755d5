use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::catalog::store::{CatalogError, DatasetSource, RegionTable};
use crate::config::AppConfig;
use crate::core::address::AddressFragments;
use crate::core::types::Coordinates;
use crate::geocode::{GeocodeError, Geocoder};
use crate::matching::engine::{AdmMatch, AdmMatcher, MatchError};

/// Coordinate-to-code resolution failed
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("Geocoding unavailable: {0}")]
    Geocoding(#[from] GeocodeError),

    #[error("Region dataset unavailable: {0}")]
    Source(#[from] CatalogError),

    #[error("Code not resolvable: {0}")]
    NotResolvable(#[from] MatchError),
}

impl ResolveError {
    /// Stable machine-readable kind for API responses
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Geocoding(_) => "geocoding_unavailable",
            Self::Source(_) => "source_unavailable",
            Self::NotResolvable(MatchError::MissingFragment(_)) => "address_incomplete",
            Self::NotResolvable(MatchError::ProvinceNotFound) => "province_not_found",
            Self::NotResolvable(MatchError::RegencyNotFound) => "regency_not_found",
            Self::NotResolvable(MatchError::DistrictNotFound) => "district_not_found",
            Self::NotResolvable(MatchError::VillageNotFound) => "village_not_found",
        }
    }
}

/// A resolved code together with the address it came from
#[derive(Debug, Clone, Serialize)]
pub struct Resolution {
    #[serde(flatten)]
    pub matched: AdmMatch,
    pub fragments: AddressFragments,
}

/// Reverse geocodes a coordinate and matches it against the region table
#[derive(Debug, Clone)]
pub struct Adm4Resolver {
    geocoder: Geocoder,
    client: reqwest::Client,
    source: DatasetSource,
    preloaded: Option<Arc<RegionTable>>,
}

impl Adm4Resolver {
    pub fn new(config: &AppConfig, client: reqwest::Client) -> Self {
        Self {
            geocoder: Geocoder::new(client.clone(), &config.endpoints.nominatim, &config.user_agent),
            client,
            source: config.dataset.clone(),
            preloaded: None,
        }
    }

    /// Use an already-loaded table for every resolution
    #[must_use]
    pub fn with_table(mut self, table: Arc<RegionTable>) -> Self {
        self.preloaded = Some(table);
        self
    }

    /// The preloaded table, or a fresh load from the configured source
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the source cannot be fetched or parsed.
    pub async fn table(&self) -> Result<Arc<RegionTable>, CatalogError> {
        match &self.preloaded {
            Some(table) => Ok(Arc::clone(table)),
            None => Ok(Arc::new(RegionTable::load(&self.client, &self.source).await?)),
        }
    }

    /// Resolve a coordinate to its village-tier code
    ///
    /// # Errors
    ///
    /// Returns `ResolveError::Geocoding` or `ResolveError::Source` when an
    /// upstream is unavailable, or `ResolveError::NotResolvable` when no tier
    /// matches.
    pub async fn resolve(&self, coords: Coordinates) -> Result<Resolution, ResolveError> {
        // Geocoding and dataset loading are independent
        let (fragments, table) = tokio::try_join!(
            async { self.geocoder.reverse(coords).await.map_err(ResolveError::from) },
            async { self.table().await.map_err(ResolveError::from) },
        )?;

        let matched = AdmMatcher::new(&table).resolve(&fragments).inspect_err(|e| {
            tracing::info!("ADM4 unresolved for {coords}: {e} (fragments: {fragments:?})");
        })?;

        tracing::info!(
            "ADM4 for {coords}: {} via {:?} match",
            matched.code,
            matched.strategy
        );

        Ok(Resolution { matched, fragments })
    }
}
