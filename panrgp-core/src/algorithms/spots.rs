//! Border-signature graph and spot clustering.
//!
//! Every RGP with complete flanking borders contributes a signature: the
//! canonicalized pair of its border family lists. Signatures become nodes of
//! an undirected graph, similar signatures are connected, and each connected
//! component is a spot, the genomic location where the pangenome keeps
//! swapping gene content.

use std::collections::{HashMap, HashSet};

use petgraph::algo::tarjan_scc;
use petgraph::graph::{NodeIndex, UnGraph};

use crate::config::RgpConfig;
use crate::pangenome::Pangenome;
use crate::region::{BorderPair, Region};
use crate::types::FamilyId;

/// One node of the signature graph: a distinct pair of flanking borders and
/// the RGPs (by index into the prediction's region list) observed with it.
#[derive(Debug, Clone)]
pub struct SignatureNode {
    /// Canonical signature string, also used as the GEXF node label
    pub key: String,
    /// Borders as first observed, before canonicalization
    pub borders: BorderPair,
    /// Indices of the regions sharing this signature
    pub regions: Vec<usize>,
}

impl SignatureNode {
    /// Number of RGPs observed with this signature.
    #[must_use]
    pub fn rgp_count(&self) -> usize {
        self.regions.len()
    }
}

/// The border-signature similarity graph.
#[derive(Debug, Clone)]
pub struct SpotGraph {
    pub graph: UnGraph<SignatureNode, ()>,
    /// RGPs skipped because a flanking border came back short
    pub lost: usize,
}

/// A hotspot: a connected component of the signature graph.
#[derive(Debug, Clone)]
pub struct Spot {
    pub id: usize,
    /// Border pairs of the member signatures
    pub borders: Vec<BorderPair>,
    /// Member region indices, sorted and deduplicated
    pub regions: Vec<usize>,
}

/// Canonical form of a border pair: the two sides sorted so that swapped
/// walk directions of the same location produce the same key.
fn signature(borders: &BorderPair) -> String {
    let mut pair = [borders[0].clone(), borders[1].clone()];
    pair.sort();
    format!("{:?}|{:?}", pair[0], pair[1])
}

/// Whether two border family lists describe the same flanking context.
///
/// They match if their first `exact_match` families are identical in order,
/// or if both are complete (`set_size` families) and one is a shifted copy
/// of the other with at least `set_size - overlapping_match` families of
/// ordered overlap, in either direction.
#[must_use]
pub fn borders_match(
    border1: &[FamilyId],
    border2: &[FamilyId],
    overlapping_match: usize,
    exact_match: usize,
    set_size: usize,
) -> bool {
    if border1.len() >= exact_match
        && border2.len() >= exact_match
        && border1[..exact_match] == border2[..exact_match]
    {
        return true;
    }
    if border1.len() == set_size && border2.len() == set_size {
        for offset in 1..=set_size.saturating_sub(overlapping_match) {
            if border1[..set_size - offset] == border2[offset..]
                || border2[..set_size - offset] == border1[offset..]
            {
                return true;
            }
        }
    }
    false
}

/// Whether two border pairs describe the same genomic location.
///
/// Every side of both pairs must find a matching side on the other pair;
/// the pairing is free, so opposite walk directions still match.
#[must_use]
pub fn pairs_match(
    first: &BorderPair,
    second: &BorderPair,
    overlapping_match: usize,
    exact_match: usize,
    set_size: usize,
) -> bool {
    let mut first_matched = [false; 2];
    let mut second_matched = [false; 2];
    for (i, side_a) in first.iter().enumerate() {
        for (j, side_b) in second.iter().enumerate() {
            if borders_match(side_a, side_b, overlapping_match, exact_match, set_size) {
                first_matched[i] = true;
                second_matched[j] = true;
            }
        }
    }
    first_matched[0] && first_matched[1] && second_matched[0] && second_matched[1]
}

/// Builds the signature graph over the predicted regions.
///
/// Regions whose borders are incomplete (fewer than `set_size` flanking
/// families on either side, typically near a contig edge) do not get a
/// signature; they are counted in [`SpotGraph::lost`].
#[must_use]
pub fn build_spot_graph(
    pangenome: &Pangenome,
    regions: &[Region],
    multigenics: &HashSet<FamilyId>,
    config: &RgpConfig,
) -> SpotGraph {
    let mut graph = UnGraph::new_undirected();
    let mut node_by_key: HashMap<String, NodeIndex> = HashMap::new();
    let mut lost = 0;
    for (region_index, region) in regions.iter().enumerate() {
        let borders = region.bordering_families(pangenome, config.set_size, multigenics);
        if borders[0].len() < config.set_size || borders[1].len() < config.set_size {
            lost += 1;
            continue;
        }
        let key = signature(&borders);
        let node = *node_by_key.entry(key.clone()).or_insert_with(|| {
            graph.add_node(SignatureNode {
                key,
                borders,
                regions: Vec::new(),
            })
        });
        graph[node].regions.push(region_index);
    }

    let nodes: Vec<NodeIndex> = graph.node_indices().collect();
    for (i, &a) in nodes.iter().enumerate() {
        for &b in &nodes[i + 1..] {
            let matched = pairs_match(
                &graph[a].borders,
                &graph[b].borders,
                config.overlapping_match,
                config.exact_match,
                config.set_size,
            );
            if matched {
                graph.add_edge(a, b, ());
            }
        }
    }
    SpotGraph { graph, lost }
}

/// Groups the signature graph into spots, one per connected component.
///
/// Spot ids number the components in order of their lowest node index, so
/// they are stable for a given prediction.
#[must_use]
pub fn spots_from_graph(spot_graph: &SpotGraph) -> Vec<Spot> {
    let mut components = tarjan_scc(&spot_graph.graph);
    for component in &mut components {
        component.sort_unstable();
    }
    components.sort_by_key(|component| component.first().copied());

    components
        .into_iter()
        .enumerate()
        .map(|(id, component)| {
            let mut borders = Vec::new();
            let mut regions = Vec::new();
            for node in component {
                let weight = &spot_graph.graph[node];
                borders.push(weight.borders.clone());
                regions.extend(weight.regions.iter().copied());
            }
            regions.sort_unstable();
            regions.dedup();
            Spot {
                id,
                borders,
                regions,
            }
        })
        .collect()
}

/// Counts the distinct gene-content organisations among the listed regions.
#[must_use]
pub fn unique_region_count(regions: &[Region], members: &[usize]) -> usize {
    let mut representatives: Vec<&Region> = Vec::new();
    for &member in members {
        let region = &regions[member];
        if !representatives
            .iter()
            .any(|seen| seen.same_gene_content(region))
        {
            representatives.push(region);
        }
    }
    representatives.len()
}

/// Runs signature graph construction and component grouping in one call.
#[must_use]
pub fn detect_spots(
    pangenome: &Pangenome,
    regions: &[Region],
    multigenics: &HashSet<FamilyId>,
    config: &RgpConfig,
) -> (SpotGraph, Vec<Spot>) {
    let spot_graph = build_spot_graph(pangenome, regions, multigenics, config);
    let spots = spots_from_graph(&spot_graph);
    (spot_graph, spots)
}
