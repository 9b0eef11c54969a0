//! Aggregated results of a prediction run.

use crate::algorithms::flanking::FlankingGraph;
use crate::algorithms::spots::{unique_region_count, Spot, SpotGraph};
use crate::config::RgpParameters;
use crate::region::Region;

/// Everything a prediction run produced.
///
/// The graphs are only retained when the corresponding artifact was
/// requested in the configuration.
#[derive(Debug, Clone)]
pub struct RgpResults {
    /// Predicted regions, grouped by organism in input order
    pub regions: Vec<Region>,
    /// Detected spots; member indices refer into `regions`
    pub spots: Vec<Spot>,
    /// Regions left out of spot clustering because a border came back short
    pub lost_regions: usize,
    /// Distinct pairs of flanking gene families among the clustered regions
    pub signature_count: usize,
    /// Parameters the run was performed with
    pub parameters: RgpParameters,
    /// Border-signature graph, if requested
    pub spot_graph: Option<SpotGraph>,
    /// Spot-level flanking graph, if requested
    pub flanking_graph: Option<FlankingGraph>,
}

/// One row of the spot distribution report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotDistributionRow {
    pub spot: usize,
    /// RGPs grouped in the spot
    pub rgp_count: usize,
    /// Distinct gene-content organisations among those RGPs
    pub organisation_count: usize,
    /// RGP count over the number of genomes in the pangenome
    pub organism_ratio: f64,
}

impl RgpResults {
    #[must_use]
    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    #[must_use]
    pub fn spot_count(&self) -> usize {
        self.spots.len()
    }

    /// Per-spot distribution rows, in spot id order.
    #[must_use]
    pub fn spot_distribution(&self, organism_count: usize) -> Vec<SpotDistributionRow> {
        self.spots
            .iter()
            .map(|spot| SpotDistributionRow {
                spot: spot.id,
                rgp_count: spot.regions.len(),
                organisation_count: unique_region_count(&self.regions, &spot.regions),
                organism_ratio: if organism_count == 0 {
                    0.0
                } else {
                    spot.regions.len() as f64 / organism_count as f64
                },
            })
            .collect()
    }
}
