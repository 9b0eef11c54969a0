//! # panrgp CLI - Regions of Genomic Plasticity
//!
//! Command-line interface for RGP prediction and spot detection on
//! annotated, partitioned pangenomes.
//!
//! ## Usage
//!
//! ```bash
//! # Basic prediction
//! panrgp -i pangenome.tsv -o results/
//!
//! # Emit the signature and flanking graphs as GEXF
//! panrgp -i pangenome.tsv -o results/ --spot-graph --flanking-graph
//!
//! # Tighter region threshold, four worker threads
//! panrgp -i pangenome.tsv -o results/ --min-score 6 --threads 4
//! ```
//!
//! ## Options
//!
//! - `-i, --input <FILE>`: Input gene table (see `table` module docs)
//! - `-o, --output <DIR>`: Output directory for the reports
//! - `--persistent-penalty <N>`: Penalty base for persistent runs (default: 3)
//! - `--variable-gain <N>`: Score gain per variable gene (default: 1)
//! - `--min-length <BP>`: Minimum region span in bp (default: 3000)
//! - `--min-score <N>`: Minimum region score (default: 4)
//! - `--dup-margin <F>`: Multigenic duplication margin (default: 0.05)
//! - `--overlapping-match <N>`: Border overlap tolerance (default: 2)
//! - `--set-size <N>`: Flanking families per border (default: 3)
//! - `--exact-match <N>`: Exact border prefix length (default: 1)
//! - `--spot-graph`: Write the border-signature graph (GEXF)
//! - `--flanking-graph`: Write the spot flanking graph (GEXF)
//! - `--threads <N>`: Worker threads for per-genome prediction
//! - `-q, --quiet`: Suppress progress messages
//!
//! ## Output
//!
//! The output directory receives `regions.tsv`,
//! `spot_rgp_distribution.tsv`, `parameters.json` and, when requested,
//! `spot_graph.gexf` and `flanking_graph.gexf`.

mod table;

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::str::FromStr;

use clap::{Arg, ArgAction, Command};
use panrgp_core::config::RgpConfig;
use panrgp_core::output::write_reports;
use panrgp_core::RgpAnalyzer;

fn parse_arg<T: FromStr>(
    matches: &clap::ArgMatches,
    id: &str,
) -> Result<T, Box<dyn std::error::Error>> {
    let value = matches
        .get_one::<String>(id)
        .ok_or_else(|| format!("missing value for --{id}"))?;
    value
        .parse()
        .map_err(|_| format!("invalid value for --{id}: {value}").into())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = Command::new("panrgp")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Predicts regions of genomic plasticity and their hotspots")
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .value_name("FILE")
                .required(true)
                .help("Input gene table (TSV)"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("DIR")
                .required(true)
                .help("Output directory"),
        )
        .arg(
            Arg::new("persistent-penalty")
                .long("persistent-penalty")
                .value_name("N")
                .default_value("3")
                .help("Penalty base for consecutive persistent genes"),
        )
        .arg(
            Arg::new("variable-gain")
                .long("variable-gain")
                .value_name("N")
                .default_value("1")
                .help("Score gain per variable gene"),
        )
        .arg(
            Arg::new("min-length")
                .long("min-length")
                .value_name("BP")
                .default_value("3000")
                .help("Minimum genomic span of a reported region (bp)"),
        )
        .arg(
            Arg::new("min-score")
                .long("min-score")
                .value_name("N")
                .default_value("4")
                .help("Minimum score of a reported region"),
        )
        .arg(
            Arg::new("dup-margin")
                .long("dup-margin")
                .value_name("F")
                .default_value("0.05")
                .help("Duplication margin for multigenic classification"),
        )
        .arg(
            Arg::new("overlapping-match")
                .long("overlapping-match")
                .value_name("N")
                .default_value("2")
                .help("Allowed border shift when overlap-matching signatures"),
        )
        .arg(
            Arg::new("set-size")
                .long("set-size")
                .value_name("N")
                .default_value("3")
                .help("Flanking families collected per border"),
        )
        .arg(
            Arg::new("exact-match")
                .long("exact-match")
                .value_name("N")
                .default_value("1")
                .help("Exactly matching border prefix length"),
        )
        .arg(
            Arg::new("spot-graph")
                .long("spot-graph")
                .action(ArgAction::SetTrue)
                .help("Write the border-signature graph (GEXF)"),
        )
        .arg(
            Arg::new("flanking-graph")
                .long("flanking-graph")
                .action(ArgAction::SetTrue)
                .help("Write the spot flanking graph (GEXF)"),
        )
        .arg(
            Arg::new("threads")
                .long("threads")
                .value_name("N")
                .help("Worker threads for per-genome prediction"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .help("Quiet mode"),
        )
        .get_matches();

    let mut config = RgpConfig {
        persistent_penalty: parse_arg(&matches, "persistent-penalty")?,
        variable_gain: parse_arg(&matches, "variable-gain")?,
        min_length: parse_arg(&matches, "min-length")?,
        min_score: parse_arg(&matches, "min-score")?,
        dup_margin: parse_arg(&matches, "dup-margin")?,
        overlapping_match: parse_arg(&matches, "overlapping-match")?,
        set_size: parse_arg(&matches, "set-size")?,
        exact_match: parse_arg(&matches, "exact-match")?,
        spot_graph: matches.get_flag("spot-graph"),
        flanking_graph: matches.get_flag("flanking-graph"),
        quiet: matches.get_flag("quiet"),
        num_threads: None,
    };
    if matches.contains_id("threads") {
        config.num_threads = Some(parse_arg(&matches, "threads")?);
    }

    let input = matches
        .get_one::<String>("input")
        .expect("required argument");
    let output = matches
        .get_one::<String>("output")
        .expect("required argument");

    let mut pangenome = table::load_pangenome_file(Path::new(input))?;
    if !config.quiet {
        eprintln!(
            "Loaded {} genes across {} genomes",
            pangenome.gene_count(),
            pangenome.organisms.len()
        );
    }

    let analyzer = RgpAnalyzer::new(config);
    let results = analyzer.run(&mut pangenome)?;

    let output_dir = Path::new(output);
    write_reports(output_dir, &pangenome, &results)?;
    let parameters = File::create(output_dir.join("parameters.json"))?;
    serde_json::to_writer_pretty(BufWriter::new(parameters), &analyzer.config().parameters())?;

    if !analyzer.config().quiet {
        eprintln!(
            "Analysis complete! Predicted {} RGPs grouped in {} spots.",
            results.region_count(),
            results.spot_count()
        );
    }
    Ok(())
}
