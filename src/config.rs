//! Tunable settings for reading, solving and presenting a truss.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::palette::ForceRange;
use crate::solver::SolverConfig;

/// Node-numbering convention used by an input file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexBase {
    /// The first node is `0`.
    #[default]
    Zero,
    /// The first node is `1`.
    One,
}

impl IndexBase {
    /// Smallest valid index under this convention.
    #[must_use]
    pub const fn offset(self) -> usize {
        match self {
            IndexBase::Zero => 0,
            IndexBase::One => 1,
        }
    }
}

/// Colour-mapping settings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    /// Number of colours in the palette.
    pub size: usize,
    /// Fixed force range; when `None` the range covers the largest member force.
    pub range: Option<ForceRange>,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            size: 64,
            range: None,
        }
    }
}

/// Settings for a complete analysis run.
///
/// Every field has a default, so a configuration file only needs the values
/// it changes.
///
/// # Examples
/// ```
/// use trussx_joints::{AnalysisConfig, IndexBase};
///
/// let config = AnalysisConfig::from_json(r#"{ "index_base": "one" }"#).expect("valid json");
/// assert_eq!(config.index_base, IndexBase::One);
/// assert_eq!(config.solver.pivot_tolerance, 1.0e-12);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Linear solver settings.
    pub solver: SolverConfig,
    /// Forces with magnitude at or below this value are classified as zero.
    pub zero_force_tolerance: f64,
    /// Largest equilibrium residual accepted without a warning.
    pub residual_warning: f64,
    /// Node numbering of the input file.
    pub index_base: IndexBase,
    /// Colour mapping for rendered output.
    pub palette: PaletteConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            solver: SolverConfig::default(),
            zero_force_tolerance: 1.0e-9,
            residual_warning: 1.0e-6,
            index_base: IndexBase::Zero,
            palette: PaletteConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Return `true` when `max_residual` is above the warning threshold.
    #[must_use]
    pub fn residual_is_large(&self, max_residual: f64) -> bool {
        max_residual.is_nan() || max_residual > self.residual_warning
    }

    /// Parse a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns the [`serde_json::Error`] when the text is not a valid configuration.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Read a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the file cannot be read or its contents are
    /// not a valid configuration.
    pub fn from_json_file(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text).map_err(std::io::Error::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let config = AnalysisConfig::from_json("{}").expect("valid json");
        assert_eq!(config, AnalysisConfig::default());
    }

    #[test]
    fn nested_fields_override_defaults() {
        let config = AnalysisConfig::from_json(
            r#"{
                "solver": { "pivot_tolerance": 1e-8 },
                "zero_force_tolerance": 1e-6,
                "palette": { "size": 9, "range": { "max_compression": -5.0, "max_tension": 10.0 } }
            }"#,
        )
        .expect("valid json");
        assert_eq!(config.solver.pivot_tolerance, 1.0e-8);
        assert_eq!(config.zero_force_tolerance, 1.0e-6);
        assert_eq!(config.residual_warning, 1.0e-6);
        assert_eq!(config.index_base, IndexBase::Zero);
        assert_eq!(config.palette.size, 9);
        assert_eq!(
            config.palette.range,
            Some(ForceRange {
                max_compression: -5.0,
                max_tension: 10.0
            })
        );
    }

    #[test]
    fn empty_or_inverted_palette_range_is_rejected() {
        for range in [
            r#"{ "max_compression": 5.0, "max_tension": 5.0 }"#,
            r#"{ "max_compression": 10.0, "max_tension": -10.0 }"#,
        ] {
            let text = format!(r#"{{ "palette": {{ "range": {range} }} }}"#);
            let error = AnalysisConfig::from_json(&text).expect_err("invalid range rejected");
            assert!(error.to_string().contains("range"), "{error}");
        }
    }

    #[test]
    fn residual_warning_threshold_is_configurable() {
        let config = AnalysisConfig::default();
        assert!(!config.residual_is_large(1.0e-9));
        assert!(config.residual_is_large(1.0e-3));
        assert!(config.residual_is_large(f64::NAN));

        let strict = AnalysisConfig::from_json(r#"{ "residual_warning": 1e-12 }"#)
            .expect("valid json");
        assert!(strict.residual_is_large(1.0e-9));
    }

    #[test]
    fn unknown_index_base_is_rejected() {
        assert!(AnalysisConfig::from_json(r#"{ "index_base": "two" }"#).is_err());
    }

    #[test]
    fn index_base_offsets() {
        assert_eq!(IndexBase::Zero.offset(), 0);
        assert_eq!(IndexBase::One.offset(), 1);
    }
}
