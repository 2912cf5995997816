//! Configuration sections
//!
//! Each section validates itself; [`VisConfig::validate`] runs them all.

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};
use crate::features::doi::domain::DoiThresholds;
use crate::features::motifs::domain::LayeringPolicy;
use crate::shared::constants::layout;
use crate::shared::models::{DoiComponent, DoiWeights};

// ============================================================================
// Grid cell
// ============================================================================

/// Grid cell geometry used by every positioning pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CellConfig {
    pub width: f64,
    pub height: f64,
    pub radius: f64,
}

impl Default for CellConfig {
    fn default() -> Self {
        Self {
            width: layout::CELL_WIDTH,
            height: layout::CELL_HEIGHT,
            radius: layout::NODE_RADIUS,
        }
    }
}

impl CellConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        for (field, value) in [("width", self.width), ("height", self.height)] {
            if !(value > 0.0 && value <= 10_000.0) {
                return Err(ConfigError::range_with_hint(
                    field,
                    value,
                    "0 (exclusive)",
                    10_000,
                    "Cell dimensions must be positive",
                ));
            }
        }
        if !(self.radius >= 0.0) {
            return Err(ConfigError::range_with_hint(
                "radius",
                self.radius,
                0,
                "inf",
                "Node radius cannot be negative",
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Layering
// ============================================================================

/// What happens to entities outside the active filter result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterAction {
    /// Keep them in the view, dimmed
    Blend,
    /// Drop them from the re-layered view
    Hide,
}

impl FilterAction {
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "blend" => Ok(Self::Blend),
            "hide" => Ok(Self::Hide),
            _ => Err(format!(
                "Unknown filter action '{}'. Valid actions: blend, hide",
                s
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blend => "blend",
            Self::Hide => "hide",
        }
    }
}

impl Default for FilterAction {
    fn default() -> Self {
        Self::Blend
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayeringConfig {
    pub policy: LayeringPolicy,
    pub filter_action: FilterAction,
    /// Offset separating equal barycenters (0..1, exclusive)
    pub barycenter_epsilon: f64,
}

impl Default for LayeringConfig {
    fn default() -> Self {
        Self {
            policy: LayeringPolicy::default(),
            filter_action: FilterAction::default(),
            barycenter_epsilon: layout::BARYCENTER_EPSILON,
        }
    }
}

impl LayeringConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if !(self.barycenter_epsilon > 0.0 && self.barycenter_epsilon < 1.0) {
            return Err(ConfigError::range_with_hint(
                "barycenter_epsilon",
                self.barycenter_epsilon,
                "0 (exclusive)",
                "1 (exclusive)",
                "Use a small positive offset such as 0.01",
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Degree of interest
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DoiConfig {
    pub weights: DoiWeights,
    pub thresholds: DoiThresholds,
    /// Recompute scores and visibility after every event
    pub auto_update: bool,
}

impl Default for DoiConfig {
    fn default() -> Self {
        Self {
            weights: DoiWeights::default(),
            thresholds: DoiThresholds::default(),
            auto_update: false,
        }
    }
}

impl DoiConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        for component in DoiComponent::ALL {
            let value = self.weights.get(component);
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::range_with_hint(
                    format!("weights.{}", component),
                    value,
                    0,
                    1,
                    "Component weights are fractions of the total score",
                ));
            }
        }

        if self.weights.active_count() > 0 && (self.weights.active_sum() - 1.0).abs() > 1e-6 {
            return Err(ConfigError::Validation(format!(
                "active DOI weights sum to {:.4}, expected 1.0",
                self.weights.active_sum()
            )));
        }

        self.thresholds.validate()
    }
}

// ============================================================================
// Aggregate
// ============================================================================

/// Complete session configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisConfig {
    pub cell: CellConfig,
    pub layering: LayeringConfig,
    pub doi: DoiConfig,
}

impl VisConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        self.cell.validate()?;
        self.layering.validate()?;
        self.doi.validate()
    }

    pub fn with_policy(mut self, policy: LayeringPolicy) -> Self {
        self.layering.policy = policy;
        self
    }

    pub fn with_filter_action(mut self, action: FilterAction) -> Self {
        self.layering.filter_action = action;
        self
    }

    pub fn with_auto_update(mut self, enabled: bool) -> Self {
        self.doi.auto_update = enabled;
        self
    }
}
