//! Algorithms of the prediction pipeline.
//!
//! - [`multigenic`]: classification of duplicated persistent families
//! - [`scan`]: per-contig score matrix and region extraction
//! - [`spots`]: border-signature graph and spot clustering
//! - [`flanking`]: spot-level flanking-context graph

pub mod flanking;
pub mod multigenic;
pub mod scan;
pub mod spots;
