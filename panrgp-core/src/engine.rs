//! Orchestration of the full prediction pipeline.

use rayon::prelude::*;

use crate::algorithms::flanking::build_flanking_graph;
use crate::algorithms::multigenic::multigenic_families;
use crate::algorithms::scan::extract_regions;
use crate::algorithms::spots::detect_spots;
use crate::config::RgpConfig;
use crate::pangenome::{ContigRef, Pangenome};
use crate::region::Region;
use crate::results::RgpResults;
use crate::types::PanRgpError;

/// Main entry point for RGP prediction and spot detection.
///
/// Created with a validated-on-run [`RgpConfig`], the analyzer walks a
/// populated pangenome through the full pipeline: multigenic classification,
/// per-organism region extraction, spot clustering and the optional graph
/// artifacts.
///
/// # Examples
///
/// ```rust,no_run
/// use panrgp_core::config::RgpConfig;
/// use panrgp_core::pangenome::Pangenome;
/// use panrgp_core::RgpAnalyzer;
///
/// let mut pangenome = Pangenome::new();
/// // ... populate organisms, contigs, genes and partitioned families ...
///
/// let analyzer = RgpAnalyzer::new(RgpConfig::default());
/// let results = analyzer.run(&mut pangenome)?;
/// for region in &results.regions {
///     println!("{}: {} genes, score {}", region.id, region.genes.len(), region.score);
/// }
/// # Ok::<(), panrgp_core::types::PanRgpError>(())
/// ```
#[derive(Debug, Clone)]
pub struct RgpAnalyzer {
    config: RgpConfig,
}

impl RgpAnalyzer {
    #[must_use]
    pub fn new(config: RgpConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &RgpConfig {
        &self.config
    }

    /// Runs the full pipeline on a pangenome.
    ///
    /// On success the predicted regions and the run parameters are attached
    /// to the pangenome, its prediction status flag is raised, and the
    /// aggregated results are returned.
    ///
    /// # Errors
    ///
    /// Returns [`PanRgpError::InvalidParameters`] if the configuration
    /// violates its validation contract, or
    /// [`PanRgpError::MissingPrerequisite`] if the pangenome lacks
    /// annotations, clustered families or partitions.
    pub fn run(&self, pangenome: &mut Pangenome) -> Result<RgpResults, PanRgpError> {
        self.config.validate()?;
        pangenome.check_prerequisites()?;

        if let Some(threads) = self.config.num_threads {
            // a pool configured earlier in the process keeps its size
            let _ = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build_global();
        }

        let multigenics = multigenic_families(pangenome, self.config.dup_margin);
        if !self.config.quiet {
            eprintln!(
                "{} gene families are classified as multigenic (duplicated in at least {} of their carrying genomes)",
                multigenics.len(),
                self.config.dup_margin
            );
        }

        // organisms are independent once the multigenic set is fixed
        let shared = &*pangenome;
        let per_organism: Vec<Vec<Region>> = (0..shared.organisms.len())
            .into_par_iter()
            .map(|organism| {
                let mut organism_regions = Vec::new();
                for contig in 0..shared.organisms[organism].contigs.len() {
                    organism_regions.extend(extract_regions(
                        shared,
                        ContigRef { organism, contig },
                        &multigenics,
                        &self.config,
                    ));
                }
                organism_regions
            })
            .collect();
        let regions: Vec<Region> = per_organism.into_iter().flatten().collect();
        if !self.config.quiet {
            eprintln!("{} RGPs were predicted", regions.len());
        }

        let (spot_graph, spots) = detect_spots(pangenome, &regions, &multigenics, &self.config);
        if !self.config.quiet {
            eprintln!(
                "{} RGPs were skipped: fewer than {} persistent flanking families before a contig edge",
                spot_graph.lost, self.config.set_size
            );
            eprintln!(
                "{} distinct pairs of flanking gene families",
                spot_graph.graph.node_count()
            );
            let organism_count = pangenome.organisms.len();
            let frequent = spots
                .iter()
                .filter(|spot| spot.regions.len() as f64 > organism_count as f64 * 0.05)
                .count();
            eprintln!(
                "There are {} spots in this pangenome, {} of them have RGPs in more than 5% of the genomes",
                spots.len(),
                frequent
            );
        }

        let flanking_graph = self
            .config
            .flanking_graph
            .then(|| build_flanking_graph(&spots, &regions));
        let lost_regions = spot_graph.lost;
        let signature_count = spot_graph.graph.node_count();
        let spot_graph = self.config.spot_graph.then_some(spot_graph);

        pangenome.attach_regions(regions.clone(), self.config.parameters());

        Ok(RgpResults {
            regions,
            spots,
            lost_regions,
            signature_count,
            parameters: self.config.parameters(),
            spot_graph,
            flanking_graph,
        })
    }
}
