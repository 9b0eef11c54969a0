//! Multigenic classification of persistent gene families.

use std::collections::HashSet;

use crate::pangenome::Pangenome;
use crate::types::{FamilyId, Partition};

/// Collects the persistent families that are multigenic: duplicated in at
/// least `dup_margin` of the organisms carrying them (inclusive threshold).
///
/// Multigenic families behave like mobile or repeated elements, so the scan
/// treats their genes as variable rather than persistent, and the border
/// walks skip them as unreliable location markers. Shell and cloud families
/// are never classified here.
#[must_use]
pub fn multigenic_families(pangenome: &Pangenome, dup_margin: f64) -> HashSet<FamilyId> {
    pangenome
        .families()
        .iter()
        .enumerate()
        .filter(|(_, family)| {
            family.partition == Partition::Persistent
                && family.organism_count() > 0
                && family.duplicated_count() as f64 / family.organism_count() as f64 >= dup_margin
        })
        .map(|(id, _)| id)
        .collect()
}
