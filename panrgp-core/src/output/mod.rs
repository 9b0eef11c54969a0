//! Report writers for prediction results.
//!
//! All format writers are generic over [`std::io::Write`];
//! [`write_reports`] wires them to files in an output directory.

pub mod formats;

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::pangenome::Pangenome;
use crate::results::RgpResults;
use crate::types::PanRgpError;

/// Writes the standard report set to `output_dir`, creating it if needed.
///
/// Always writes `regions.tsv` and `spot_rgp_distribution.tsv`; the GEXF
/// graph files are written only when the corresponding graph was produced.
///
/// # Errors
///
/// Returns [`PanRgpError::IoError`] if the directory or a report file
/// cannot be written.
pub fn write_reports(
    output_dir: &Path,
    pangenome: &Pangenome,
    results: &RgpResults,
) -> Result<(), PanRgpError> {
    std::fs::create_dir_all(output_dir)?;

    let regions = File::create(output_dir.join("regions.tsv"))?;
    formats::tsv::write_regions(BufWriter::new(regions), pangenome, &results.regions)?;

    let distribution = File::create(output_dir.join("spot_rgp_distribution.tsv"))?;
    formats::tsv::write_spot_distribution(
        BufWriter::new(distribution),
        results,
        pangenome.organisms.len(),
    )?;

    if let Some(spot_graph) = &results.spot_graph {
        let file = File::create(output_dir.join("spot_graph.gexf"))?;
        formats::gexf::write_spot_graph(BufWriter::new(file), spot_graph)?;
    }
    if let Some(flanking_graph) = &results.flanking_graph {
        let file = File::create(output_dir.join("flanking_graph.gexf"))?;
        formats::gexf::write_flanking_graph(BufWriter::new(file), flanking_graph)?;
    }
    Ok(())
}
