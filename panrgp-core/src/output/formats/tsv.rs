//! Tab-separated reports.

use std::io::Write;

use crate::pangenome::Pangenome;
use crate::region::Region;
use crate::results::RgpResults;
use crate::types::PanRgpError;

/// Writes the predicted regions, one row per region.
///
/// # Errors
///
/// Returns [`PanRgpError::IoError`] if writing fails.
pub fn write_regions<W: Write>(
    mut writer: W,
    pangenome: &Pangenome,
    regions: &[Region],
) -> Result<(), PanRgpError> {
    writeln!(writer, "region\torganism\tcontig\tstart\tstop\tgenes\tscore")?;
    for region in regions {
        let organism = &pangenome.organisms[region.contig.organism];
        let contig = pangenome.contig(region.contig);
        writeln!(
            writer,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            region.id,
            organism.name,
            contig.name,
            region.start(),
            region.stop(),
            region.genes.len(),
            region.score
        )?;
    }
    Ok(())
}

/// Writes the spot distribution report, one row per spot.
///
/// # Errors
///
/// Returns [`PanRgpError::IoError`] if writing fails.
pub fn write_spot_distribution<W: Write>(
    mut writer: W,
    results: &RgpResults,
    organism_count: usize,
) -> Result<(), PanRgpError> {
    writeln!(writer, "spot\tnb_rgp\tnb_organisations\torganism_ratio")?;
    for row in results.spot_distribution(organism_count) {
        writeln!(
            writer,
            "{}\t{}\t{}\t{:.2}",
            row.spot, row.rgp_count, row.organisation_count, row.organism_ratio
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::spots::Spot;
    use crate::pangenome::{ContigRef, GeneRecord, Pangenome};
    use crate::region::RegionGene;
    use crate::types::Partition;

    fn small_run() -> (Pangenome, RgpResults) {
        let mut pangenome = Pangenome::new();
        let family = pangenome.add_family("v0", Partition::Cloud).unwrap();
        let organism = pangenome.add_organism("orgA");
        let contig = pangenome.add_contig(organism, "cA", false);
        let location = ContigRef { organism, contig };
        pangenome
            .add_gene(
                location,
                GeneRecord {
                    id: "g0".to_string(),
                    family,
                    start: 100,
                    stop: 4200,
                    ..Default::default()
                },
            )
            .unwrap();
        let results = RgpResults {
            regions: vec![Region {
                id: "cA_0".to_string(),
                contig: location,
                genes: vec![RegionGene {
                    family,
                    position: 0,
                    start: 100,
                    stop: 4200,
                }],
                score: 6,
            }],
            spots: vec![Spot {
                id: 0,
                borders: Vec::new(),
                regions: vec![0],
            }],
            lost_regions: 0,
            signature_count: 1,
            parameters: crate::config::RgpConfig::default().parameters(),
            spot_graph: None,
            flanking_graph: None,
        };
        (pangenome, results)
    }

    #[test]
    fn test_regions_report() {
        let (pangenome, results) = small_run();
        let mut buffer = Vec::new();
        write_regions(&mut buffer, &pangenome, &results.regions).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "region\torganism\tcontig\tstart\tstop\tgenes\tscore"
        );
        assert_eq!(lines[1], "cA_0\torgA\tcA\t100\t4200\t1\t6");
    }

    #[test]
    fn test_spot_distribution_report() {
        let (_, results) = small_run();
        let mut buffer = Vec::new();
        write_spot_distribution(&mut buffer, &results, 4).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "spot\tnb_rgp\tnb_organisations\torganism_ratio");
        assert_eq!(lines[1], "0\t1\t1\t0.25");
    }
}
