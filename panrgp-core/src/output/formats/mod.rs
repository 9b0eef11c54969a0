//! Concrete report formats.

pub mod gexf;
pub mod tsv;
