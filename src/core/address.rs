use serde::{Deserialize, Serialize};

use crate::core::types::Tier;

/// Uppercased place names for each administrative tier of one coordinate.
///
/// A `None` field means the geocoder never provided it, which the matcher
/// reports differently from a name that was provided but matched nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressFragments {
    pub province: Option<String>,
    pub regency: Option<String>,
    pub district: Option<String>,
    pub village: Option<String>,
}

impl AddressFragments {
    /// Build fragments from raw names, normalizing each one
    #[must_use]
    pub fn new(
        province: Option<&str>,
        regency: Option<&str>,
        district: Option<&str>,
        village: Option<&str>,
    ) -> Self {
        Self {
            province: province.and_then(normalize_name),
            regency: regency.and_then(normalize_name),
            district: district.and_then(normalize_name),
            village: village.and_then(normalize_name),
        }
    }

    #[must_use]
    pub fn get(&self, tier: Tier) -> Option<&str> {
        match tier {
            Tier::Province => self.province.as_deref(),
            Tier::Regency => self.regency.as_deref(),
            Tier::District => self.district.as_deref(),
            Tier::Village => self.village.as_deref(),
        }
    }
}

/// Trim and uppercase a name; blank names count as absent.
///
/// Only case is folded. Diacritics and inner whitespace are left alone so
/// that comparisons behave exactly like the reference dataset's own names.
#[must_use]
pub fn normalize_name(name: &str) -> Option<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_uppercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalizes_and_drops_blanks() {
        let f = AddressFragments::new(Some("Dki Jakarta"), Some("  "), None, Some(" gunung "));
        assert_eq!(f.province.as_deref(), Some("DKI JAKARTA"));
        assert_eq!(f.regency, None);
        assert_eq!(f.district, None);
        assert_eq!(f.village.as_deref(), Some("GUNUNG"));
    }

    #[test]
    fn test_normalize_keeps_diacritics() {
        assert_eq!(normalize_name("Pasar Minggü").as_deref(), Some("PASAR MINGGÜ"));
    }

    #[test]
    fn test_get_by_tier() {
        let f = AddressFragments::new(Some("a"), Some("b"), Some("c"), Some("d"));
        assert_eq!(f.get(Tier::Province), Some("A"));
        assert_eq!(f.get(Tier::Village), Some("D"));
    }
}
