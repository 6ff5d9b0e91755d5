use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use crate::core::types::Tier;

/// One administrative unit from the reference dataset
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReferenceRow {
    /// Zero-padded hierarchical code, e.g. `31710600`
    pub code: String,
    /// Uppercased name used as the comparison key
    pub name: String,
}

impl ReferenceRow {
    /// Create a row, uppercasing the name
    pub fn new(code: impl Into<String>, name: impl AsRef<str>) -> Self {
        Self {
            code: code.into(),
            name: name.as_ref().to_uppercase(),
        }
    }

    #[must_use]
    pub fn tier(&self) -> Tier {
        Tier::of(&self.code)
    }

    /// Whether this row sits under `parent` by code prefix.
    ///
    /// Uses the parent tier's prefix length; a parent code shorter than that
    /// is compared whole.
    #[must_use]
    pub fn is_within(&self, parent: &ReferenceRow, parent_tier: Tier) -> bool {
        let prefix = parent
            .code
            .get(..parent_tier.prefix_len())
            .unwrap_or(&parent.code);
        self.code.starts_with(prefix)
    }
}

// The tier is derived from the code, so it is written out but never read back
impl Serialize for ReferenceRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ReferenceRow", 3)?;
        state.serialize_field("code", &self.code)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("tier", &self.tier())?;
        state.end()
    }
}

/// Canonicalize a dataset code into the zero-padded convention.
///
/// Dotted codes (`31.71.06.1001`) are expanded segment by segment; anything
/// without dots is returned as-is.
///
/// # Examples
///
/// ```
/// use weather_adm4::core::region::canonical_code;
///
/// assert_eq!(canonical_code("31"), "31000000");
/// assert_eq!(canonical_code("31.71"), "31710000");
/// assert_eq!(canonical_code("31.71.06"), "31710600");
/// assert_eq!(canonical_code("31.71.06.1001"), "3171061001");
/// assert_eq!(canonical_code("31710600"), "31710600");
/// ```
#[must_use]
pub fn canonical_code(raw: &str) -> String {
    let raw = raw.trim();
    if !raw.contains('.') {
        // Bare two-digit province codes carry no padding in the dotted dataset
        if raw.len() == 2 && raw.chars().all(|c| c.is_ascii_digit()) {
            return format!("{raw}000000");
        }
        return raw.to_string();
    }

    let segments: Vec<&str> = raw.split('.').collect();
    let mut code = segments.concat();
    match segments.len() {
        2 => code.push_str("0000"),
        3 => code.push_str("00"),
        _ => {}
    }
    code
}

/// Render a 10-digit village code in the dotted form (`31.71.06.1001`).
///
/// Returns `None` for codes that are not ten ASCII digits.
#[must_use]
pub fn dotted_village_code(code: &str) -> Option<String> {
    if code.len() != 10 || !code.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(format!(
        "{}.{}.{}.{}",
        &code[..2],
        &code[2..4],
        &code[4..6],
        &code[6..]
    ))
}
