//! Gene table loading.
//!
//! The input is a tab-separated gene table with one row per gene, in
//! positional order along its contig:
//!
//! ```text
//! organism  contig  circular  gene  family  partition  start  stop  strand  type  [name]  [product]
//! ```
//!
//! A header row starting with `organism` and lines starting with `#` are
//! skipped. Organisms, contigs and families are created on first mention;
//! the `circular` flag of a contig is taken from its first row.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use panrgp_core::pangenome::{ContigRef, GeneRecord, Pangenome};
use panrgp_core::types::{FeatureKind, PanRgpError, Partition, Strand};

/// Loads a pangenome from a gene table file.
///
/// # Errors
///
/// Returns [`PanRgpError::IoError`] if the file cannot be read, or
/// [`PanRgpError::InvalidInput`] naming the offending line for malformed
/// rows.
pub fn load_pangenome_file(path: &Path) -> Result<Pangenome, PanRgpError> {
    let file = File::open(path)?;
    load_pangenome(BufReader::new(file))
}

/// Loads a pangenome from any buffered gene table reader.
///
/// # Errors
///
/// Same contract as [`load_pangenome_file`].
pub fn load_pangenome<R: BufRead>(reader: R) -> Result<Pangenome, PanRgpError> {
    let mut pangenome = Pangenome::new();
    let mut organisms: HashMap<String, usize> = HashMap::new();
    let mut contigs: HashMap<(usize, String), usize> = HashMap::new();

    for (line_index, line) in reader.lines().enumerate() {
        let line = line?;
        let row = line_index + 1;
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if row == 1 && line.starts_with("organism\t") {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 10 {
            return Err(PanRgpError::InvalidInput(format!(
                "line {row}: expected at least 10 tab-separated fields, found {}",
                fields.len()
            )));
        }

        let organism_name = fields[0];
        let contig_name = fields[1];
        let is_circular = parse_circular(fields[2], row)?;
        let partition = parse_partition(fields[5], row)?;
        let start = parse_coordinate(fields[6], "start", row)?;
        let stop = parse_coordinate(fields[7], "stop", row)?;
        let strand = parse_strand(fields[8], row)?;
        let kind = parse_kind(fields[9]);

        let organism = match organisms.get(organism_name) {
            Some(&index) => index,
            None => {
                let index = pangenome.add_organism(organism_name);
                organisms.insert(organism_name.to_string(), index);
                index
            }
        };
        let contig_key = (organism, contig_name.to_string());
        let contig = match contigs.get(&contig_key) {
            Some(&index) => index,
            None => {
                let index = pangenome.add_contig(organism, contig_name, is_circular);
                contigs.insert(contig_key, index);
                index
            }
        };
        let family = pangenome.add_family(fields[4], partition)?;
        pangenome.add_gene(
            ContigRef { organism, contig },
            GeneRecord {
                id: fields[3].to_string(),
                family,
                start,
                stop,
                strand,
                kind,
                name: fields.get(10).copied().unwrap_or("").to_string(),
                product: fields.get(11).copied().unwrap_or("").to_string(),
            },
        )?;
    }
    Ok(pangenome)
}

fn parse_circular(value: &str, row: usize) -> Result<bool, PanRgpError> {
    match value {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(PanRgpError::InvalidInput(format!(
            "line {row}: expected true/false in the circular column, found {other}"
        ))),
    }
}

fn parse_partition(value: &str, row: usize) -> Result<Partition, PanRgpError> {
    value.parse().map_err(|_| {
        PanRgpError::InvalidInput(format!("line {row}: unknown partition label {value}"))
    })
}

fn parse_coordinate(value: &str, column: &str, row: usize) -> Result<u64, PanRgpError> {
    value.parse().map_err(|_| {
        PanRgpError::InvalidInput(format!("line {row}: invalid {column} coordinate {value}"))
    })
}

fn parse_strand(value: &str, row: usize) -> Result<Strand, PanRgpError> {
    match value {
        "+" => Ok(Strand::Forward),
        "-" => Ok(Strand::Reverse),
        "." => Ok(Strand::Unknown),
        other => Err(PanRgpError::InvalidInput(format!(
            "line {row}: invalid strand {other}"
        ))),
    }
}

fn parse_kind(value: &str) -> FeatureKind {
    match value {
        "CDS" => FeatureKind::Cds,
        "RNA" | "tRNA" | "rRNA" | "tmRNA" => FeatureKind::Rna,
        _ => FeatureKind::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "\
organism\tcontig\tcircular\tgene\tfamily\tpartition\tstart\tstop\tstrand\ttype
orgA\tcA\tfalse\tg0\tp0\tpersistent\t1\t900\t+\tCDS
orgA\tcA\tfalse\tg1\tv0\tcloud\t1001\t1900\t-\tCDS\tinsA\tintegrase
orgA\tcA\tfalse\tg2\tp1\tpersistent\t2001\t2900\t+\tCDS
orgB\tcB\ttrue\tg3\tp0\tpersistent\t1\t900\t+\tCDS
";

    #[test]
    fn test_load_builds_pangenome() {
        let pangenome = load_pangenome(TABLE.as_bytes()).unwrap();
        assert_eq!(pangenome.organisms.len(), 2);
        assert_eq!(pangenome.gene_count(), 4);
        assert_eq!(pangenome.families().len(), 3);

        let contig_a = &pangenome.organisms[0].contigs[0];
        assert_eq!(contig_a.name, "cA");
        assert!(!contig_a.is_circular);
        assert_eq!(contig_a.genes[1].name, "insA");
        assert_eq!(contig_a.genes[1].product, "integrase");
        assert_eq!(contig_a.genes[1].position, 1);

        let contig_b = &pangenome.organisms[1].contigs[0];
        assert!(contig_b.is_circular);

        // p0 is shared between the two organisms
        let p0 = pangenome.family_id("p0").unwrap();
        assert_eq!(pangenome.family(p0).organism_count(), 2);
        assert!(pangenome.check_prerequisites().is_ok());
    }

    #[test]
    fn test_comments_and_blank_lines_are_skipped() {
        let table = "# comment\n\norgA\tcA\tfalse\tg0\tp0\tpersistent\t1\t900\t+\tCDS\n";
        let pangenome = load_pangenome(table.as_bytes()).unwrap();
        assert_eq!(pangenome.gene_count(), 1);
    }

    #[test]
    fn test_bad_partition_reports_line() {
        let table = "orgA\tcA\tfalse\tg0\tp0\tcore\t1\t900\t+\tCDS\n";
        match load_pangenome(table.as_bytes()) {
            Err(PanRgpError::InvalidInput(message)) => {
                assert!(message.contains("line 1"));
                assert!(message.contains("core"));
            }
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_fields_are_rejected() {
        let table = "orgA\tcA\tfalse\tg0\n";
        assert!(matches!(
            load_pangenome(table.as_bytes()),
            Err(PanRgpError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_bad_strand_is_rejected() {
        let table = "orgA\tcA\tfalse\tg0\tp0\tpersistent\t1\t900\tx\tCDS\n";
        assert!(matches!(
            load_pangenome(table.as_bytes()),
            Err(PanRgpError::InvalidInput(_))
        ));
    }
}
