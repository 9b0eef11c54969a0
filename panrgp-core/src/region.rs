//! Predicted regions of genomic plasticity and their flanking borders.

use std::collections::HashSet;

use crate::pangenome::{ContigRef, Pangenome};
use crate::types::{FamilyId, Partition};

/// The slice of gene information a region keeps for each member gene.
///
/// Regions outlive the scan that produced them, so they carry copies of the
/// positional and coordinate data instead of borrowing the contig.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionGene {
    pub family: FamilyId,
    /// Positional index on the owning contig
    pub position: usize,
    pub start: u64,
    pub stop: u64,
}

/// Ordered flanking families on each side of a region, nearest first.
pub type BorderPair = [Vec<FamilyId>; 2];

/// A Region of Genomic Plasticity: a contiguous gene run flagged as
/// atypical relative to the core genome content.
///
/// Regions are created by the extraction pass and immutable once emitted.
/// `genes` is ordered along the extraction walk (left end first); on a
/// circular contig the run may wrap past the nominal origin, in which case
/// positions are not monotonic.
#[derive(Debug, Clone)]
pub struct Region {
    /// Identifier scoped to the contig (`<contig>_<n>`)
    pub id: String,
    /// Owning contig
    pub contig: ContigRef,
    /// Member genes, non-empty, left end first
    pub genes: Vec<RegionGene>,
    /// Score of the run at extraction time
    pub score: i64,
}

impl Region {
    /// Genomic span: stop coordinate of the right-end gene minus start
    /// coordinate of the left-end gene.
    ///
    /// A run that wraps a circular origin puts the right end at lower
    /// coordinates than the left end; the naive difference goes negative in
    /// that case, and the span falls back to the outermost coordinates of
    /// the member genes so wrapping regions still clear length thresholds.
    #[must_use]
    pub fn span(&self) -> i64 {
        let first = self.genes.first().map_or(0, |gene| gene.start);
        let last = self.genes.last().map_or(0, |gene| gene.stop);
        let naive = last as i64 - first as i64;
        if naive >= 0 {
            naive
        } else {
            self.stop() as i64 - self.start() as i64
        }
    }

    /// Lowest start coordinate over the member genes.
    #[must_use]
    pub fn start(&self) -> u64 {
        self.genes.iter().map(|gene| gene.start).min().unwrap_or(0)
    }

    /// Highest stop coordinate over the member genes.
    #[must_use]
    pub fn stop(&self) -> u64 {
        self.genes.iter().map(|gene| gene.stop).max().unwrap_or(0)
    }

    /// Gene-content equality: the ordered family sequences are identical,
    /// read in the same or in opposite directions.
    ///
    /// This is the deduplication identity for regions; two regions from
    /// different genomes count as the same "organisation" when their family
    /// content matches.
    #[must_use]
    pub fn same_gene_content(&self, other: &Region) -> bool {
        if self.genes.len() != other.genes.len() {
            return false;
        }
        let forward = self
            .genes
            .iter()
            .zip(other.genes.iter())
            .all(|(a, b)| a.family == b.family);
        if forward {
            return true;
        }
        self.genes
            .iter()
            .rev()
            .zip(other.genes.iter())
            .all(|(a, b)| a.family == b.family)
    }

    /// Collects the flanking borders of this region.
    ///
    /// Walks outward from each end of the region, keeping the families of
    /// non-multigenic persistent genes (nearest first) until `set_size` are
    /// collected, the contig edge is reached, or a circular walk has gone
    /// all the way around. Either side may come back short; callers decide
    /// whether a short border disqualifies the region.
    #[must_use]
    pub fn bordering_families(
        &self,
        pangenome: &Pangenome,
        set_size: usize,
        multigenics: &HashSet<FamilyId>,
    ) -> BorderPair {
        let contig = pangenome.contig(self.contig);
        let gene_count = contig.genes.len();
        if self.genes.is_empty() || gene_count == 0 {
            return [Vec::new(), Vec::new()];
        }
        let left_end = self.genes[0].position;
        let right_end = self.genes[self.genes.len() - 1].position;

        let is_marker = |position: usize| {
            let gene = &contig.genes[position];
            pangenome.family(gene.family).partition == Partition::Persistent
                && !multigenics.contains(&gene.family)
        };

        let mut left = Vec::new();
        let mut position = left_end;
        loop {
            if left.len() >= set_size {
                break;
            }
            if position == 0 && !contig.is_circular {
                break;
            }
            position = if position == 0 {
                gene_count - 1
            } else {
                position - 1
            };
            if position == left_end {
                // walked the whole circular contig
                break;
            }
            if is_marker(position) {
                left.push(contig.genes[position].family);
            }
        }

        let mut right = Vec::new();
        let mut position = right_end;
        loop {
            if right.len() >= set_size {
                break;
            }
            if position == gene_count - 1 && !contig.is_circular {
                break;
            }
            position = if position == gene_count - 1 {
                0
            } else {
                position + 1
            };
            if position == right_end {
                break;
            }
            if is_marker(position) {
                right.push(contig.genes[position].family);
            }
        }

        [left, right]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pangenome::{ContigRef, GeneRecord, Pangenome};
    use crate::types::Partition;

    fn region_gene(family: FamilyId, position: usize) -> RegionGene {
        RegionGene {
            family,
            position,
            start: position as u64 * 1000 + 1,
            stop: position as u64 * 1000 + 900,
        }
    }

    fn region_with_families(families: &[FamilyId]) -> Region {
        Region {
            id: "c_0".to_string(),
            contig: ContigRef {
                organism: 0,
                contig: 0,
            },
            genes: families
                .iter()
                .enumerate()
                .map(|(position, &family)| region_gene(family, position))
                .collect(),
            score: 5,
        }
    }

    /// One organism, one contig; partition of gene i taken from `layout`.
    fn pangenome_with_layout(layout: &[Partition], circular: bool) -> (Pangenome, ContigRef) {
        let mut pangenome = Pangenome::new();
        let organism = pangenome.add_organism("org");
        let contig = pangenome.add_contig(organism, "c", circular);
        let location = ContigRef { organism, contig };
        for (i, &partition) in layout.iter().enumerate() {
            let family = pangenome
                .add_family(&format!("fam{i}"), partition)
                .unwrap();
            pangenome
                .add_gene(
                    location,
                    GeneRecord {
                        id: format!("g{i}"),
                        family,
                        start: i as u64 * 1000 + 1,
                        stop: i as u64 * 1000 + 900,
                        ..Default::default()
                    },
                )
                .unwrap();
        }
        (pangenome, location)
    }

    #[test]
    fn test_span_uses_run_endpoints() {
        let region = region_with_families(&[0, 1, 2]);
        // first start = 1, last stop = 2900
        assert_eq!(region.span(), 2899);
    }

    #[test]
    fn test_span_of_wrapping_run_uses_outermost_coordinates() {
        // walk order across a circular origin: positions 6, 7, 0, 1
        let region = Region {
            id: "c_0".to_string(),
            contig: ContigRef {
                organism: 0,
                contig: 0,
            },
            genes: vec![
                region_gene(0, 6),
                region_gene(1, 7),
                region_gene(2, 0),
                region_gene(3, 1),
            ],
            score: 5,
        };
        // naive right-stop minus left-start would be negative here
        assert_eq!(region.span(), 7899);
    }

    #[test]
    fn test_same_gene_content_forward_and_reversed() {
        let a = region_with_families(&[1, 2, 3]);
        let b = region_with_families(&[1, 2, 3]);
        let c = region_with_families(&[3, 2, 1]);
        let d = region_with_families(&[1, 2, 4]);
        assert!(a.same_gene_content(&b));
        assert!(a.same_gene_content(&c));
        assert!(!a.same_gene_content(&d));
    }

    #[test]
    fn test_same_gene_content_length_mismatch() {
        let a = region_with_families(&[1, 2, 3]);
        let b = region_with_families(&[1, 2]);
        assert!(!a.same_gene_content(&b));
    }

    #[test]
    fn test_borders_collect_persistent_markers() {
        use Partition::{Cloud, Persistent as P, Shell};
        // P P P V V P P P with a shell gene interleaved on the right
        let layout = [P, P, P, Cloud, Cloud, Shell, P, P, P];
        let (pangenome, location) = pangenome_with_layout(&layout, false);
        let region = Region {
            id: "c_0".to_string(),
            contig: location,
            genes: vec![region_gene(3, 3), region_gene(4, 4)],
            score: 2,
        };
        let borders = region.bordering_families(&pangenome, 3, &HashSet::new());
        // nearest first
        assert_eq!(borders[0], vec![2, 1, 0]);
        assert_eq!(borders[1], vec![6, 7, 8]);
    }

    #[test]
    fn test_borders_short_at_contig_edge() {
        use Partition::{Cloud, Persistent as P};
        let layout = [P, Cloud, Cloud, P];
        let (pangenome, location) = pangenome_with_layout(&layout, false);
        let region = Region {
            id: "c_0".to_string(),
            contig: location,
            genes: vec![region_gene(1, 1), region_gene(2, 2)],
            score: 2,
        };
        let borders = region.bordering_families(&pangenome, 3, &HashSet::new());
        assert_eq!(borders[0].len(), 1);
        assert_eq!(borders[1].len(), 1);
    }

    #[test]
    fn test_borders_wrap_on_circular_contig() {
        use Partition::{Cloud, Persistent as P};
        // region at the start; left walk must wrap to the tail markers
        let layout = [Cloud, Cloud, P, P, P];
        let (pangenome, location) = pangenome_with_layout(&layout, true);
        let region = Region {
            id: "c_0".to_string(),
            contig: location,
            genes: vec![region_gene(0, 0), region_gene(1, 1)],
            score: 2,
        };
        let borders = region.bordering_families(&pangenome, 3, &HashSet::new());
        assert_eq!(borders[0], vec![4, 3, 2]);
        assert_eq!(borders[1], vec![2, 3, 4]);
    }

    #[test]
    fn test_borders_skip_multigenic_families() {
        use Partition::{Cloud, Persistent as P};
        let layout = [P, P, Cloud, P];
        let (pangenome, location) = pangenome_with_layout(&layout, false);
        let region = Region {
            id: "c_0".to_string(),
            contig: location,
            genes: vec![region_gene(2, 2)],
            score: 1,
        };
        let multigenics: HashSet<FamilyId> = [1].into_iter().collect();
        let borders = region.bordering_families(&pangenome, 2, &multigenics);
        assert_eq!(borders[0], vec![0]);
        assert_eq!(borders[1], vec![3]);
    }
}
