//! Per-contig scoring scan and region extraction.
//!
//! Each contig is scored gene by gene: a run of strictly persistent genes
//! (persistent partition, not multigenic) costs `penalty^k` for its k-th
//! gene counted from zero, every other gene rewards the running score by the
//! configured gain, and the score is clamped at zero. A node is "in region
//! state" while its clamped score is strictly positive. Maximal-score runs
//! are then claimed greedily, highest score first, and the scores downstream
//! of each claim are recomputed before the next claim.

use std::collections::HashSet;

use crate::config::RgpConfig;
use crate::pangenome::{Contig, ContigRef, Pangenome};
use crate::region::{Region, RegionGene};
use crate::types::{FamilyId, Partition};

/// One cell of the score matrix.
///
/// `prev` is the index of the node the score was accumulated from, forming
/// the back-chain the extraction walk follows. It is `None` only for the
/// first gene of a linear contig.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreNode {
    /// Clamped running score
    pub score: i64,
    /// Whether the node is part of a candidate region
    pub state: bool,
    /// Back-chain link
    pub prev: Option<usize>,
}

impl ScoreNode {
    fn assign(&mut self, raw: i64) {
        self.score = raw.max(0);
        self.state = self.score > 0;
    }
}

/// Per-gene increment of the running score, tracking the length of the
/// current strictly-persistent run in `run`.
fn step(strict: bool, run: &mut u32, penalty: u32, gain: i64) -> i64 {
    if strict {
        let cost = i64::from(penalty).saturating_pow(*run);
        *run += 1;
        -cost
    } else {
        *run = 0;
        gain
    }
}

/// Flags the strictly persistent genes of a contig: persistent partition and
/// not classified multigenic.
#[must_use]
pub fn strict_persistent_flags(
    pangenome: &Pangenome,
    contig: &Contig,
    multigenics: &HashSet<FamilyId>,
) -> Vec<bool> {
    contig
        .genes
        .iter()
        .map(|gene| {
            pangenome.family(gene.family).partition == Partition::Persistent
                && !multigenics.contains(&gene.family)
        })
        .collect()
}

/// Builds the initial score matrix for a contig.
///
/// The first pass accumulates left to right from a zero score. If the contig
/// is circular and the last node ends in region state, the run continues
/// past the origin: the first node's back-chain is linked to the last node
/// and scores are recomputed cumulatively from the front, stopping when the
/// run leaves region state or when the whole sequence has been traversed a
/// second time (a fully plastic circular contig would otherwise rescore
/// forever).
#[must_use]
pub fn score_contig(is_circular: bool, strict: &[bool], penalty: u32, gain: i64) -> Vec<ScoreNode> {
    let gene_count = strict.len();
    let mut matrix = Vec::with_capacity(gene_count);
    let mut prev_score = 0i64;
    let mut run = 0u32;
    for (index, &is_strict) in strict.iter().enumerate() {
        let mut node = ScoreNode {
            score: 0,
            state: false,
            prev: index.checked_sub(1),
        };
        node.assign(prev_score.saturating_add(step(is_strict, &mut run, penalty, gain)));
        prev_score = node.score;
        matrix.push(node);
    }

    if is_circular && gene_count > 0 && matrix[gene_count - 1].state {
        matrix[0].prev = Some(gene_count - 1);
        let mut prev_score = matrix[gene_count - 1].score;
        let mut run = 0u32;
        let mut index = 0;
        while index != gene_count - 1 {
            let raw = prev_score.saturating_add(step(strict[index], &mut run, penalty, gain));
            matrix[index].assign(raw);
            if !matrix[index].state {
                break;
            }
            prev_score = matrix[index].score;
            index += 1;
        }
    }
    matrix
}

/// Index and score of the best extraction start: the highest score, with the
/// last occurrence winning ties so extraction walks the longest back-chain.
fn max_score_index(matrix: &[ScoreNode]) -> (i64, usize) {
    let mut best_score = i64::MIN;
    let mut best_index = 0;
    for (index, node) in matrix.iter().enumerate() {
        if node.score >= best_score {
            best_score = node.score;
            best_index = index;
        }
    }
    (best_score, best_index)
}

/// Claims the region ending at `start`: walks the back-chain while nodes are
/// in region state, collecting their genes and zeroing them out of the
/// matrix. Returns the member genes ordered left end first.
fn claim_region(matrix: &mut [ScoreNode], start: usize, contig: &Contig) -> Vec<RegionGene> {
    let mut genes = Vec::new();
    let mut index = start;
    while matrix[index].state {
        let gene = &contig.genes[index];
        genes.push(RegionGene {
            family: gene.family,
            position: gene.position,
            start: gene.start,
            stop: gene.stop,
        });
        matrix[index].score = 0;
        matrix[index].state = false;
        match matrix[index].prev {
            Some(previous) => index = previous,
            None => break,
        }
    }
    genes.reverse();
    genes
}

/// Recomputes the scores downstream of a claimed node.
///
/// Walks forward from the node after `claimed` while the visited nodes were
/// in region state before the claim, re-accumulating from the zeroed claim
/// point; the walk wraps on circular contigs and is bounded by one full
/// traversal.
fn rescore(
    matrix: &mut [ScoreNode],
    strict: &[bool],
    is_circular: bool,
    claimed: usize,
    penalty: u32,
    gain: i64,
) {
    let gene_count = matrix.len();
    let mut prev_score = matrix[claimed].score;
    let mut index = claimed + 1;
    if index == gene_count {
        if is_circular {
            index = 0;
        } else {
            return;
        }
    }
    let mut run = 0u32;
    let mut steps = 0;
    while matrix[index].state {
        let raw = prev_score.saturating_add(step(strict[index], &mut run, penalty, gain));
        matrix[index].assign(raw);
        prev_score = matrix[index].score;
        steps += 1;
        if steps >= gene_count {
            break;
        }
        index += 1;
        if index == gene_count {
            if is_circular {
                index = 0;
            } else {
                break;
            }
        }
    }
}

/// Extracts all regions of one contig.
///
/// Repeatedly claims the best-scoring run while it clears `min_score`
/// (inclusive), recomputing downstream scores after every claim. Claims
/// spanning `min_length` bp or less are erased but not reported, and a claim
/// whose gene content duplicates an already accepted region of the contig
/// (same family sequence, read in either direction) is dropped. An empty
/// claim ends the extraction: a non-positive threshold would otherwise keep
/// selecting score-zero nodes that are already out of region state. Region
/// identifiers are `<contig>_<n>` with `n` counting accepted regions.
#[must_use]
pub fn extract_regions(
    pangenome: &Pangenome,
    location: ContigRef,
    multigenics: &HashSet<FamilyId>,
    config: &RgpConfig,
) -> Vec<Region> {
    let contig = pangenome.contig(location);
    if contig.genes.is_empty() {
        return Vec::new();
    }
    let strict = strict_persistent_flags(pangenome, contig, multigenics);
    let mut matrix = score_contig(
        contig.is_circular,
        &strict,
        config.persistent_penalty,
        config.variable_gain,
    );

    let mut regions: Vec<Region> = Vec::new();
    loop {
        let (score, index) = max_score_index(&matrix);
        if score < config.min_score {
            break;
        }
        let genes = claim_region(&mut matrix, index, contig);
        if genes.is_empty() {
            // score-zero nodes are out of region state; nothing left to claim
            break;
        }
        rescore(
            &mut matrix,
            &strict,
            contig.is_circular,
            index,
            config.persistent_penalty,
            config.variable_gain,
        );
        let candidate = Region {
            id: format!("{}_{}", contig.name, regions.len()),
            contig: location,
            genes,
            score,
        };
        if candidate.span() > config.min_length
            && !regions
                .iter()
                .any(|region| region.same_gene_content(&candidate))
        {
            regions.push(candidate);
        }
    }
    regions
}
