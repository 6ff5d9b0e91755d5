//! Structural audit of a region table.
//!
//! The matcher only works when every code follows the zero-suffix convention
//! and every non-province row has an ancestor at the tier directly above it.
//! [`RegionTable::audit`] reports how far a dataset departs from that.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::catalog::store::RegionTable;
use crate::core::region::ReferenceRow;
use crate::core::types::Tier;
use crate::utils::validation::is_well_formed_code;

/// Why a row breaks the hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Violation {
    /// Not all digits, or too short to carry a tier suffix
    MalformedCode,
    /// No row at the parent tier shares its prefix
    Orphan,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuditFinding {
    pub code: String,
    pub name: String,
    pub violation: Violation,
}

/// Summary of a table's structure
#[derive(Debug, Clone, Serialize)]
pub struct HierarchyAudit {
    pub total_rows: usize,
    pub tier_counts: BTreeMap<Tier, usize>,
    pub findings: Vec<AuditFinding>,
}

impl HierarchyAudit {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }

    #[must_use]
    pub fn count(&self, tier: Tier) -> usize {
        self.tier_counts.get(&tier).copied().unwrap_or(0)
    }
}

impl RegionTable {
    /// Count rows per tier and flag rows that break the code convention
    #[must_use]
    pub fn audit(&self) -> HierarchyAudit {
        let mut tier_counts: BTreeMap<Tier, usize> = Tier::ALL.iter().map(|t| (*t, 0)).collect();
        let mut findings = Vec::new();

        // Prefixes each tier offers to its children
        let mut parents: BTreeMap<Tier, HashSet<&str>> = BTreeMap::new();
        for row in &self.rows {
            let tier = row.tier();
            *tier_counts.entry(tier).or_default() += 1;
            if let Some(prefix) = row.code.get(..tier.prefix_len()) {
                parents.entry(tier).or_default().insert(prefix);
            }
        }

        for row in &self.rows {
            if !is_well_formed_code(&row.code) {
                findings.push(finding(row, Violation::MalformedCode));
                continue;
            }

            let Some(parent) = row.tier().parent() else {
                continue;
            };
            let has_parent = row
                .code
                .get(..parent.prefix_len())
                .is_some_and(|prefix| parents.get(&parent).is_some_and(|set| set.contains(prefix)));
            if !has_parent {
                findings.push(finding(row, Violation::Orphan));
            }
        }

        if !findings.is_empty() {
            tracing::warn!(
                "Region table has {} rows breaking the code hierarchy",
                findings.len()
            );
        }

        HierarchyAudit {
            total_rows: self.rows.len(),
            tier_counts,
            findings,
        }
    }
}

fn finding(row: &ReferenceRow, violation: Violation) -> AuditFinding {
    AuditFinding {
        code: row.code.clone(),
        name: row.name.clone(),
        violation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[(&str, &str)]) -> RegionTable {
        RegionTable::new(rows.iter().map(|(c, n)| ReferenceRow::new(*c, n)).collect())
    }

    #[test]
    fn test_audit_clean_chain() {
        let t = table(&[
            ("31000000", "DKI JAKARTA"),
            ("31710000", "JAKARTA SELATAN"),
            ("31710600", "KEBAYORAN BARU"),
            ("3171061001", "GUNUNG"),
        ]);
        let audit = t.audit();
        assert!(audit.is_clean());
        assert_eq!(audit.total_rows, 4);
        for tier in Tier::ALL {
            assert_eq!(audit.count(tier), 1);
        }
    }

    #[test]
    fn test_audit_flags_orphans() {
        let t = table(&[
            ("31000000", "DKI JAKARTA"),
            ("31710600", "KEBAYORAN BARU"),
            ("3171061001", "GUNUNG"),
        ]);
        let audit = t.audit();
        assert_eq!(audit.findings.len(), 1);
        assert_eq!(audit.findings[0].code, "31710600");
        assert_eq!(audit.findings[0].violation, Violation::Orphan);
    }

    #[test]
    fn test_audit_flags_malformed_codes() {
        let t = table(&[("31000000", "DKI JAKARTA"), ("31.71", "JAKARTA SELATAN")]);
        let audit = t.audit();
        assert_eq!(audit.findings.len(), 1);
        assert_eq!(audit.findings[0].violation, Violation::MalformedCode);
    }
}
