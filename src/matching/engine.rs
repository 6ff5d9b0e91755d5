use serde::Serialize;
use thiserror::Error;

use crate::catalog::store::RegionTable;
use crate::core::address::AddressFragments;
use crate::core::region::ReferenceRow;
use crate::core::types::{MatchStrategy, Tier};

/// No tier produced a usable code
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    #[error("Province not found")]
    ProvinceNotFound,

    #[error("Regency/city not found under the resolved province")]
    RegencyNotFound,

    #[error("District not found under the resolved regency")]
    DistrictNotFound,

    #[error("Village not found under the resolved district")]
    VillageNotFound,

    #[error("Geocoder did not provide a {0} name")]
    MissingFragment(Tier),
}

impl MatchError {
    /// The tier at which resolution stopped
    #[must_use]
    pub fn tier(&self) -> Tier {
        match self {
            Self::ProvinceNotFound => Tier::Province,
            Self::RegencyNotFound => Tier::Regency,
            Self::DistrictNotFound => Tier::District,
            Self::VillageNotFound => Tier::Village,
            Self::MissingFragment(tier) => *tier,
        }
    }

    fn not_found(tier: Tier) -> Self {
        match tier {
            Tier::Province => Self::ProvinceNotFound,
            Tier::Regency => Self::RegencyNotFound,
            Tier::District => Self::DistrictNotFound,
            Tier::Village => Self::VillageNotFound,
        }
    }
}

/// A resolved administrative code
#[derive(Debug, Clone, Serialize)]
pub struct AdmMatch {
    /// Village-tier code
    pub code: String,
    pub strategy: MatchStrategy,
    /// Rows resolved on the way, coarsest first
    pub path: Vec<ReferenceRow>,
}

/// Resolves address fragments to a code against a borrowed region table
pub struct AdmMatcher<'a> {
    table: &'a RegionTable,
}

impl<'a> AdmMatcher<'a> {
    pub fn new(table: &'a RegionTable) -> Self {
        Self { table }
    }

    /// Resolve fragments to the most specific code.
    ///
    /// Tries a nationwide village-name match first. When that misses, walks
    /// province → regency → district → village, each step restricted to
    /// codes under the previous step's code and to its own tier's suffix.
    ///
    /// Ties go to the first row in dataset order, so a re-ordered dataset
    /// can resolve an ambiguous village name differently.
    ///
    /// The direct match is not restricted to the village tier. Where a
    /// kelurahan shares its name with its kecamatan (`GAMBIR`), the district
    /// row precedes it in dataset order and its 8-digit code is returned.
    /// BMKG receives that code undotted.
    ///
    /// # Errors
    ///
    /// Returns the `*NotFound` variant for the first tier with no matching
    /// row, or `MatchError::MissingFragment` when a needed name was never
    /// provided.
    pub fn resolve(&self, fragments: &AddressFragments) -> Result<AdmMatch, MatchError> {
        if let Some(row) = self.direct(fragments) {
            tracing::debug!("Direct village match: {} ({})", row.name, row.code);
            if row.tier() != Tier::Village {
                tracing::debug!(
                    "Direct match for {} is a {} row, not a village",
                    row.name,
                    row.tier()
                );
            }
            return Ok(AdmMatch {
                code: row.code.clone(),
                strategy: MatchStrategy::Direct,
                path: vec![row.clone()],
            });
        }

        tracing::debug!("No direct village match, resolving tier by tier");
        self.hierarchical(fragments)
    }

    /// Phase 1: first row anywhere whose name equals the village fragment
    fn direct(&self, fragments: &AddressFragments) -> Option<&'a ReferenceRow> {
        let village = fragments.village.as_deref()?;
        self.table.find_by_name(village).next()
    }

    /// Phase 2: tier-by-tier descent narrowed by code prefix
    fn hierarchical(&self, fragments: &AddressFragments) -> Result<AdmMatch, MatchError> {
        let province = self.find_tier(fragments, Tier::Province, None)?;
        let regency = self.find_tier(fragments, Tier::Regency, Some(province))?;
        let district = self.find_tier(fragments, Tier::District, Some(regency))?;
        let village = self.find_tier(fragments, Tier::Village, Some(district))?;

        Ok(AdmMatch {
            code: village.code.clone(),
            strategy: MatchStrategy::Hierarchical,
            path: vec![
                province.clone(),
                regency.clone(),
                district.clone(),
                village.clone(),
            ],
        })
    }

    fn find_tier(
        &self,
        fragments: &AddressFragments,
        tier: Tier,
        parent: Option<&ReferenceRow>,
    ) -> Result<&'a ReferenceRow, MatchError> {
        let name = fragments
            .get(tier)
            .ok_or(MatchError::MissingFragment(tier))?;

        let found = self.table.find_by_name(name).find(|row| {
            tier.accepts(&row.code)
                && match (parent, tier.parent()) {
                    (Some(parent), Some(parent_tier)) => row.is_within(parent, parent_tier),
                    _ => true,
                }
        });

        match found {
            Some(row) => {
                tracing::debug!("Resolved {tier}: {} ({})", row.name, row.code);
                Ok(row)
            }
            None => Err(MatchError::not_found(tier)),
        }
    }
}
