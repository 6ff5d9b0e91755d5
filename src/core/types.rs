use serde::{Deserialize, Serialize};

/// A validated latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    #[must_use]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// `lat,lon` as used by the providers that take a single `location` parameter
    #[must_use]
    pub fn to_pair(&self) -> String {
        format!("{},{}", self.lat, self.lon)
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.lat, self.lon)
    }
}

/// One of the four Indonesian administrative levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Provinsi
    Province,
    /// Kabupaten / Kota
    Regency,
    /// Kecamatan
    District,
    /// Kelurahan / Desa
    Village,
}

impl Tier {
    pub const ALL: [Tier; 4] = [Self::Province, Self::Regency, Self::District, Self::Village];

    /// Classify a code by its zero-suffix convention.
    ///
    /// # Examples
    ///
    /// ```
    /// use weather_adm4::core::types::Tier;
    ///
    /// assert_eq!(Tier::of("31000000"), Tier::Province);
    /// assert_eq!(Tier::of("31710000"), Tier::Regency);
    /// assert_eq!(Tier::of("31710600"), Tier::District);
    /// assert_eq!(Tier::of("3171061001"), Tier::Village);
    /// ```
    #[must_use]
    pub fn of(code: &str) -> Self {
        if code.ends_with("000000") {
            Self::Province
        } else if code.ends_with("0000") {
            Self::Regency
        } else if code.ends_with("00") {
            Self::District
        } else {
            Self::Village
        }
    }

    /// Whether `code` satisfies this tier's suffix rule
    #[must_use]
    pub fn accepts(self, code: &str) -> bool {
        Self::of(code) == self
    }

    /// The tier directly above this one
    #[must_use]
    pub fn parent(self) -> Option<Self> {
        match self {
            Self::Province => None,
            Self::Regency => Some(Self::Province),
            Self::District => Some(Self::Regency),
            Self::Village => Some(Self::District),
        }
    }

    /// Number of leading code characters a child of this tier shares with it
    #[must_use]
    pub fn prefix_len(self) -> usize {
        match self {
            Self::Province => 2,
            Self::Regency => 4,
            Self::District => 6,
            Self::Village => 10,
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Province => write!(f, "province"),
            Self::Regency => write!(f, "regency"),
            Self::District => write!(f, "district"),
            Self::Village => write!(f, "village"),
        }
    }
}

/// How a code was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    /// Village name matched a row directly
    Direct,
    /// Resolved tier by tier, narrowing by code prefix
    Hierarchical,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_of_follows_suffix_convention() {
        assert_eq!(Tier::of("11000000"), Tier::Province);
        assert_eq!(Tier::of("11010000"), Tier::Regency);
        assert_eq!(Tier::of("11010100"), Tier::District);
        assert_eq!(Tier::of("1101012001"), Tier::Village);
    }

    #[test]
    fn test_tier_accepts_excludes_coarser_tiers() {
        assert!(!Tier::Regency.accepts("31000000"));
        assert!(!Tier::District.accepts("31710000"));
        assert!(!Tier::Village.accepts("31710600"));
        assert!(Tier::Village.accepts("3171061001"));
    }

    #[test]
    fn test_tier_parent_chain() {
        assert_eq!(Tier::Village.parent(), Some(Tier::District));
        assert_eq!(Tier::District.parent(), Some(Tier::Regency));
        assert_eq!(Tier::Regency.parent(), Some(Tier::Province));
        assert_eq!(Tier::Province.parent(), None);
    }

    #[test]
    fn test_coordinates_pair() {
        let c = Coordinates::new(-6.2, 106.8);
        assert_eq!(c.to_pair(), "-6.2,106.8");
    }
}
