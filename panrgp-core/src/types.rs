use std::fmt;
use std::str::FromStr;

use thiserror::Error;

pub use bio::bio_types::strand::Strand;

/// Index of a gene family in the pangenome family arena.
///
/// Families are stored once on the [`Pangenome`](crate::pangenome::Pangenome)
/// and referenced by index everywhere else, so genes, regions and border
/// signatures stay `Copy`-cheap and free of reference cycles.
pub type FamilyId = usize;

/// Pangenome partition of a gene family.
///
/// Partitions are computed upstream and only read here: `Persistent`
/// families are near-universal, `Shell` moderately conserved and `Cloud`
/// rare. The scan penalizes persistent genes and rewards the rest. A family
/// clustered before partitioning ran carries `Undefined`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Partition {
    /// Present in (nearly) every genome of the pangenome
    Persistent,
    /// Moderately conserved
    Shell,
    /// Rare or genome-specific
    Cloud,
    /// Not yet partitioned
    #[default]
    Undefined,
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Persistent => write!(f, "persistent"),
            Self::Shell => write!(f, "shell"),
            Self::Cloud => write!(f, "cloud"),
            Self::Undefined => write!(f, "undefined"),
        }
    }
}

impl FromStr for Partition {
    type Err = PanRgpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "persistent" => Ok(Self::Persistent),
            "shell" => Ok(Self::Shell),
            "cloud" => Ok(Self::Cloud),
            "undefined" => Ok(Self::Undefined),
            other => Err(PanRgpError::InvalidInput(format!(
                "unknown partition label: {other}"
            ))),
        }
    }
}

/// Biological type of a gene feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeatureKind {
    /// Protein coding sequence
    #[default]
    Cds,
    /// RNA gene (tRNA, rRNA, ...)
    Rna,
    /// Any other annotated feature
    Other,
}

impl fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cds => write!(f, "CDS"),
            Self::Rna => write!(f, "RNA"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// Error types that can occur during RGP prediction and spot detection.
#[derive(Error, Debug)]
pub enum PanRgpError {
    /// The parameter set violates the validation contract
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),
    /// The pangenome lacks a computation this core depends on
    #[error("Missing prerequisite: {0}")]
    MissingPrerequisite(String),
    /// Malformed or inconsistent input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// File I/O operation failed
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
