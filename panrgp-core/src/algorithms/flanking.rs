//! Spot-level flanking-context graph.
//!
//! One node per spot, annotated with its RGP count and its number of
//! distinct gene-content organisations. Two spots are connected when they
//! share at least one flanking family set, the edge weight counting the
//! shared sets. Family order inside a border is ignored here, each side is
//! reduced to its set of families.

use std::collections::BTreeSet;

use petgraph::graph::{NodeIndex, UnGraph};

use crate::algorithms::spots::{unique_region_count, Spot};
use crate::region::Region;
use crate::types::FamilyId;

/// Node annotations of the flanking graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlankingNode {
    /// Spot id the node stands for
    pub spot: usize,
    /// RGPs grouped in the spot
    pub rgp_count: usize,
    /// Distinct gene-content organisations among those RGPs
    pub organisation_count: usize,
}

/// Undirected graph over spots; edge weights count shared border sets.
pub type FlankingGraph = UnGraph<FlankingNode, usize>;

/// Builds the flanking graph for a set of spots.
#[must_use]
pub fn build_flanking_graph(spots: &[Spot], regions: &[Region]) -> FlankingGraph {
    let mut graph = FlankingGraph::new_undirected();
    let mut border_sets: Vec<BTreeSet<BTreeSet<FamilyId>>> = Vec::with_capacity(spots.len());
    for spot in spots {
        let mut sets = BTreeSet::new();
        for pair in &spot.borders {
            sets.insert(pair[0].iter().copied().collect::<BTreeSet<_>>());
            sets.insert(pair[1].iter().copied().collect::<BTreeSet<_>>());
        }
        border_sets.push(sets);
        graph.add_node(FlankingNode {
            spot: spot.id,
            rgp_count: spot.regions.len(),
            organisation_count: unique_region_count(regions, &spot.regions),
        });
    }

    for i in 0..spots.len() {
        for j in i + 1..spots.len() {
            let shared = border_sets[i].intersection(&border_sets[j]).count();
            if shared != 0 {
                graph.add_edge(NodeIndex::new(i), NodeIndex::new(j), shared);
            }
        }
    }
    graph
}
