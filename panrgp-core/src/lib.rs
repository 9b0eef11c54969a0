//! # panrgp - Regions of Genomic Plasticity
//!
//! Detection of Regions of Genomic Plasticity (RGPs) in annotated pangenomes,
//! and clustering of RGPs that recur at equivalent genomic locations into
//! hotspots ("spots").
//!
//! ## Overview
//!
//! An RGP is a contiguous run of genes on a contig that deviates from the
//! conserved core gene content of the pangenome. Detection is a per-contig
//! dynamic-programming scan: persistent genes penalize a running score
//! (exponentially with run length), variable genes reward it, and maximal
//! positive-score runs are greedily extracted as candidate regions.
//!
//! Spots are connected components of a similarity graph over the flanking
//! gene-family context of the predicted RGPs, tolerating partial overlaps
//! and genome-order ambiguity of the flanking families.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use panrgp_core::{RgpAnalyzer, config::RgpConfig};
//! use panrgp_core::pangenome::Pangenome;
//!
//! let mut pangenome = Pangenome::new();
//! // ... populate organisms, contigs, genes and partitioned families ...
//!
//! let analyzer = RgpAnalyzer::new(RgpConfig::default());
//! let results = analyzer.run(&mut pangenome)?;
//!
//! println!("Predicted {} RGPs in {} spots",
//!          results.regions.len(), results.spots.len());
//! # Ok::<(), panrgp_core::types::PanRgpError>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`config`]: Run parameters and their validation contract
//! - [`pangenome`]: In-memory data model (organisms, contigs, genes, families)
//! - [`region`]: Predicted regions and their flanking borders
//! - [`algorithms`]: Scan, extraction, multigenic classification, spot clustering
//! - [`engine`]: Orchestration of the full prediction pipeline
//! - [`results`]: Aggregated run results
//! - [`output`]: TSV and GEXF report writers
//! - [`types`]: Core shared types and errors
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T, PanRgpError>`](types::PanRgpError).
//! Configuration errors and missing upstream prerequisites (annotations,
//! families, partitions) are reported before any computation starts.

pub mod algorithms;
pub mod config;
pub mod engine;
pub mod output;
pub mod pangenome;
pub mod region;
pub mod results;
pub mod types;

pub use engine::RgpAnalyzer;
