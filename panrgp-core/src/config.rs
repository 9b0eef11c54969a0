use serde::{Deserialize, Serialize};

use crate::types::PanRgpError;

/// Configuration settings for RGP prediction and spot detection.
///
/// The numeric defaults reproduce the reference parameterization of the
/// method: persistent genes cost `persistent_penalty^k` for the k-th gene of
/// a consecutive persistent run, every other gene rewards the running score
/// by `variable_gain`, and candidate regions must clear `min_score` and span
/// more than `min_length` base pairs.
///
/// # Examples
///
/// ```rust
/// use panrgp_core::config::RgpConfig;
///
/// let config = RgpConfig {
///     min_length: 0,
///     min_score: 4,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct RgpConfig {
    /// Base of the exponential penalty applied to consecutive
    /// non-multigenic persistent genes during the scan.
    ///
    /// **Default**: `3`
    pub persistent_penalty: u32,

    /// Reward added to the running score for every shell, cloud or
    /// multigenic-persistent gene.
    ///
    /// **Default**: `1`
    pub variable_gain: i64,

    /// Minimum genomic span (bp, exclusive) for a candidate region to be
    /// kept as an RGP. Shorter candidates are erased from the scan but not
    /// reported.
    ///
    /// **Default**: `3000`
    pub min_length: i64,

    /// Minimum score (inclusive) for a candidate region to be extracted.
    ///
    /// **Default**: `4`
    pub min_score: i64,

    /// Minimum fraction of carrying organisms in which a persistent family
    /// must be duplicated to be classified multigenic (inclusive threshold).
    /// Must lie in `[0, 1]`.
    ///
    /// **Default**: `0.05`
    pub dup_margin: f64,

    /// Number of flanking families that may be inserted or deleted at the
    /// shared boundary when overlap-matching two borders. Must be strictly
    /// smaller than `set_size`.
    ///
    /// **Default**: `2`
    pub overlapping_match: usize,

    /// Number of non-multigenic persistent flanking families collected on
    /// each side of an RGP to form its border.
    ///
    /// **Default**: `3`
    pub set_size: usize,

    /// Number of leading flanking families that must match exactly, in
    /// order, for two borders to be considered identical. Must not exceed
    /// `set_size`.
    ///
    /// **Default**: `1`
    pub exact_match: usize,

    /// Emit the border-signature similarity graph as a GEXF artifact.
    ///
    /// **Default**: `false`
    pub spot_graph: bool,

    /// Emit the spot-level flanking graph as a GEXF artifact.
    ///
    /// **Default**: `false`
    pub flanking_graph: bool,

    /// Suppress informational output during processing.
    ///
    /// **Default**: `false`
    pub quiet: bool,

    /// Number of threads for the per-organism prediction loop.
    ///
    /// When set, configures the Rayon global thread pool. `None` uses all
    /// available cores.
    ///
    /// **Default**: `None`
    pub num_threads: Option<usize>,
}

impl Default for RgpConfig {
    fn default() -> Self {
        Self {
            persistent_penalty: 3,
            variable_gain: 1,
            min_length: 3000,
            min_score: 4,
            dup_margin: 0.05,
            overlapping_match: 2,
            set_size: 3,
            exact_match: 1,
            spot_graph: false,
            flanking_graph: false,
            quiet: false,
            num_threads: None,
        }
    }
}

impl RgpConfig {
    /// Checks the parameter validation contract.
    ///
    /// `overlapping_match < set_size`, `exact_match <= set_size` and
    /// `dup_margin` within `[0, 1]` must hold; a violation is fatal and
    /// reported before any scan runs.
    ///
    /// # Errors
    ///
    /// Returns [`PanRgpError::InvalidParameters`] describing the violated
    /// relationship.
    pub fn validate(&self) -> Result<(), PanRgpError> {
        if self.overlapping_match >= self.set_size {
            return Err(PanRgpError::InvalidParameters(format!(
                "overlapping_match ({}) cannot be bigger than (or equal to) set_size ({})",
                self.overlapping_match, self.set_size
            )));
        }
        if self.exact_match > self.set_size {
            return Err(PanRgpError::InvalidParameters(format!(
                "exact_match ({}) cannot be bigger than set_size ({})",
                self.exact_match, self.set_size
            )));
        }
        if !(0.0..=1.0).contains(&self.dup_margin) {
            return Err(PanRgpError::InvalidParameters(format!(
                "dup_margin ({}) must be a fraction between 0 and 1",
                self.dup_margin
            )));
        }
        Ok(())
    }

    /// The parameter subset recorded as run metadata on the pangenome.
    #[must_use]
    pub fn parameters(&self) -> RgpParameters {
        RgpParameters {
            persistent_penalty: self.persistent_penalty,
            variable_gain: self.variable_gain,
            min_length: self.min_length,
            min_score: self.min_score,
            dup_margin: self.dup_margin,
            overlapping_match: self.overlapping_match,
            set_size: self.set_size,
            exact_match: self.exact_match,
        }
    }
}

/// Parameters recorded for auditability after a prediction run.
///
/// Attached to the pangenome once RGP prediction completes; persisting this
/// record to durable storage is left to external collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RgpParameters {
    pub persistent_penalty: u32,
    pub variable_gain: i64,
    pub min_length: i64,
    pub min_score: i64,
    pub dup_margin: f64,
    pub overlapping_match: usize,
    pub set_size: usize,
    pub exact_match: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_parameterization() {
        let config = RgpConfig::default();
        assert_eq!(config.persistent_penalty, 3);
        assert_eq!(config.variable_gain, 1);
        assert_eq!(config.min_length, 3000);
        assert_eq!(config.min_score, 4);
        assert_eq!(config.dup_margin, 0.05);
        assert_eq!(config.overlapping_match, 2);
        assert_eq!(config.set_size, 3);
        assert_eq!(config.exact_match, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_large_overlap() {
        let config = RgpConfig {
            overlapping_match: 3,
            set_size: 3,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(PanRgpError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_validate_rejects_large_exact_match() {
        let config = RgpConfig {
            exact_match: 4,
            set_size: 3,
            overlapping_match: 1,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(PanRgpError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_validate_accepts_exact_match_equal_to_set_size() {
        let config = RgpConfig {
            exact_match: 3,
            set_size: 3,
            overlapping_match: 2,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range_dup_margin() {
        for dup_margin in [-0.1, 1.5] {
            let config = RgpConfig {
                dup_margin,
                ..Default::default()
            };
            assert!(matches!(
                config.validate(),
                Err(PanRgpError::InvalidParameters(_))
            ));
        }
    }

    #[test]
    fn test_recorded_parameters_match_config() {
        let config = RgpConfig {
            min_score: 7,
            set_size: 4,
            ..Default::default()
        };
        let parameters = config.parameters();
        assert_eq!(parameters.min_score, 7);
        assert_eq!(parameters.set_size, 4);
        assert_eq!(parameters.persistent_penalty, 3);
    }
}
