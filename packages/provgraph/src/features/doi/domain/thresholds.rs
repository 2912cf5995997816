//! Visibility thresholds

use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, ConfigResult};
use crate::shared::constants::doi;

/// Score cutoffs of the visibility state machine
///
/// Expand thresholds are inclusive (`>=`), collapse thresholds exclusive (`<`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DoiThresholds {
    pub layer_expand: f64,
    pub analysis_expand: f64,
    pub analysis_collapse: f64,
    /// Siblings of a collapsing analysis at or above this stay visible
    pub exaggerate: f64,
    pub leaf_collapse: f64,
    pub subanalysis_expand: f64,
    pub subanalysis_collapse: f64,
}

impl Default for DoiThresholds {
    fn default() -> Self {
        Self {
            layer_expand: doi::LAYER_EXPAND,
            analysis_expand: doi::ANALYSIS_EXPAND,
            analysis_collapse: doi::ANALYSIS_COLLAPSE,
            exaggerate: doi::EXAGGERATE,
            leaf_collapse: doi::LEAF_COLLAPSE,
            subanalysis_expand: doi::SUBANALYSIS_EXPAND,
            subanalysis_collapse: doi::SUBANALYSIS_COLLAPSE,
        }
    }
}

impl DoiThresholds {
    /// Field name / value pairs, in state machine order
    pub fn entries(&self) -> [(&'static str, f64); 7] {
        [
            ("layer_expand", self.layer_expand),
            ("analysis_expand", self.analysis_expand),
            ("analysis_collapse", self.analysis_collapse),
            ("exaggerate", self.exaggerate),
            ("leaf_collapse", self.leaf_collapse),
            ("subanalysis_expand", self.subanalysis_expand),
            ("subanalysis_collapse", self.subanalysis_collapse),
        ]
    }

    pub fn validate(&self) -> ConfigResult<()> {
        for (field, value) in self.entries() {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::range_with_hint(
                    format!("thresholds.{}", field),
                    value,
                    0,
                    1,
                    "DOI scores are normalized to [0, 1]",
                ));
            }
        }
        Ok(())
    }
}
