//! Degree-of-interest components and weights
//!
//! Every hierarchy entity carries a [`DoiComponents`] record. The weighted
//! sum is computed against the session-wide [`DoiWeights`].

use serde::{Deserialize, Serialize};

use crate::shared::constants::doi::{DEFAULT_WEIGHT, UNFILTERED_VALUE};

/// One of the five interest components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DoiComponent {
    Filtered,
    Selected,
    Highlighted,
    Time,
    #[serde(rename = "diff")]
    LayerDiff,
}

impl DoiComponent {
    pub const ALL: [DoiComponent; 5] = [
        DoiComponent::Filtered,
        DoiComponent::Selected,
        DoiComponent::Highlighted,
        DoiComponent::Time,
        DoiComponent::LayerDiff,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Filtered => "filtered",
            Self::Selected => "selected",
            Self::Highlighted => "highlighted",
            Self::Time => "time",
            Self::LayerDiff => "diff",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "filtered" => Ok(Self::Filtered),
            "selected" => Ok(Self::Selected),
            "highlighted" => Ok(Self::Highlighted),
            "time" => Ok(Self::Time),
            "diff" | "layer_diff" => Ok(Self::LayerDiff),
            _ => Err(format!(
                "Unknown DOI component '{}'. Valid components: filtered, selected, highlighted, time, diff",
                s
            )),
        }
    }
}

impl std::fmt::Display for DoiComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Weight of a single component and whether it takes part in the sum
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DoiFactor {
    pub value: f64,
    pub active: bool,
}

impl Default for DoiFactor {
    fn default() -> Self {
        Self {
            value: DEFAULT_WEIGHT,
            active: true,
        }
    }
}

/// Component weights
///
/// Active weights are kept summing to 1.0 by [`redistribute`] and
/// [`set_weight`]. Deactivating a component zeroes its weight.
///
/// [`redistribute`]: DoiWeights::redistribute
/// [`set_weight`]: DoiWeights::set_weight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DoiWeights {
    pub filtered: DoiFactor,
    pub selected: DoiFactor,
    pub highlighted: DoiFactor,
    pub time: DoiFactor,
    pub diff: DoiFactor,
}

impl Default for DoiWeights {
    fn default() -> Self {
        Self {
            filtered: DoiFactor::default(),
            selected: DoiFactor::default(),
            highlighted: DoiFactor::default(),
            time: DoiFactor::default(),
            diff: DoiFactor::default(),
        }
    }
}

impl DoiWeights {
    pub fn factor(&self, component: DoiComponent) -> &DoiFactor {
        match component {
            DoiComponent::Filtered => &self.filtered,
            DoiComponent::Selected => &self.selected,
            DoiComponent::Highlighted => &self.highlighted,
            DoiComponent::Time => &self.time,
            DoiComponent::LayerDiff => &self.diff,
        }
    }

    fn factor_mut(&mut self, component: DoiComponent) -> &mut DoiFactor {
        match component {
            DoiComponent::Filtered => &mut self.filtered,
            DoiComponent::Selected => &mut self.selected,
            DoiComponent::Highlighted => &mut self.highlighted,
            DoiComponent::Time => &mut self.time,
            DoiComponent::LayerDiff => &mut self.diff,
        }
    }

    pub fn get(&self, component: DoiComponent) -> f64 {
        self.factor(component).value
    }

    pub fn is_active(&self, component: DoiComponent) -> bool {
        self.factor(component).active
    }

    /// Sum of the active weights
    pub fn active_sum(&self) -> f64 {
        DoiComponent::ALL
            .iter()
            .filter(|c| self.is_active(**c))
            .map(|c| self.get(*c))
            .sum()
    }

    pub fn active_count(&self) -> usize {
        DoiComponent::ALL
            .iter()
            .filter(|c| self.is_active(**c))
            .count()
    }

    /// Switch a component on or off. Switching off zeroes its weight.
    pub fn set_active(&mut self, component: DoiComponent, active: bool) {
        let factor = self.factor_mut(component);
        factor.active = active;
        if !active {
            factor.value = 0.0;
        }
    }

    /// Renormalize active weights proportionally so they sum to 1.0
    ///
    /// When every active weight is zero, each gets `1 / active_count`.
    pub fn redistribute(&mut self) {
        let count = self.active_count();
        if count == 0 {
            return;
        }

        let acc = self.active_sum();
        for component in DoiComponent::ALL {
            if !self.is_active(component) {
                continue;
            }
            let factor = self.factor_mut(component);
            factor.value = if acc == 0.0 {
                1.0 / count as f64
            } else {
                factor.value / acc
            };
        }
    }

    /// Set one active weight and rescale the other active weights to share
    /// the remainder. Returns false when the component is inactive.
    pub fn set_weight(&mut self, component: DoiComponent, value: f64) -> bool {
        if !self.is_active(component) {
            return false;
        }

        let others: Vec<DoiComponent> = DoiComponent::ALL
            .into_iter()
            .filter(|c| *c != component && self.is_active(*c))
            .collect();
        if others.is_empty() {
            // sole active component carries the whole score
            self.factor_mut(component).value = 1.0;
            return true;
        }

        let value = value.clamp(0.0, 1.0);
        self.factor_mut(component).value = value;

        let acc: f64 = others.iter().map(|c| self.get(*c)).sum();
        let target = 1.0 - value;
        for other in &others {
            let factor = self.factor_mut(*other);
            factor.value = if acc == 0.0 {
                target / others.len() as f64
            } else {
                factor.value / acc * target
            };
        }
        true
    }

    /// Restore the defaults (every component active at 0.2)
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Raw component values of one entity plus the derived weighted sum
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DoiComponents {
    pub filtered: f64,
    pub selected: f64,
    pub highlighted: f64,
    pub time: f64,
    pub layer_diff: f64,
    pub weighted_sum: f64,
}

impl DoiComponents {
    pub fn value(&self, component: DoiComponent) -> f64 {
        match component {
            DoiComponent::Filtered => self.filtered,
            DoiComponent::Selected => self.selected,
            DoiComponent::Highlighted => self.highlighted,
            DoiComponent::Time => self.time,
            DoiComponent::LayerDiff => self.layer_diff,
        }
    }

    pub fn filtered_changed(&mut self, filtered: bool) {
        self.filtered = if filtered { 1.0 } else { UNFILTERED_VALUE };
    }

    pub fn selected_changed(&mut self, selected: bool) {
        self.selected = if selected { 1.0 } else { 0.0 };
    }

    pub fn highlighted_changed(&mut self, highlighted: bool) {
        self.highlighted = if highlighted { 1.0 } else { 0.0 };
    }

    pub fn init_time_component(&mut self, value: f64) {
        self.time = clamp_unit(value);
    }

    pub fn init_layer_diff_component(&mut self, value: f64) {
        self.layer_diff = clamp_unit(value);
    }

    /// Σ component × weight over active components, rounded to two decimals
    pub fn compute_weighted_sum(&mut self, weights: &DoiWeights) -> f64 {
        let sum: f64 = DoiComponent::ALL
            .iter()
            .filter(|c| weights.is_active(**c))
            .map(|c| self.value(*c) * weights.get(*c))
            .sum();

        self.weighted_sum = clamp_unit((sum * 100.0).round() / 100.0);
        self.weighted_sum
    }
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_default_weights_sum_to_one() {
        let weights = DoiWeights::default();
        assert!(approx(weights.active_sum(), 1.0));
        assert_eq!(weights.active_count(), 5);
    }

    #[test]
    fn test_mask_and_redistribute() {
        let mut weights = DoiWeights::default();
        weights.set_active(DoiComponent::Time, false);
        weights.redistribute();

        for c in DoiComponent::ALL {
            if c == DoiComponent::Time {
                assert_eq!(weights.get(c), 0.0);
            } else {
                assert!(approx(weights.get(c), 0.25));
            }
        }
        assert!(approx(weights.active_sum(), 1.0));
    }

    #[test]
    fn test_redistribute_all_zero_splits_evenly() {
        let mut weights = DoiWeights::default();
        for c in DoiComponent::ALL {
            weights.set_active(c, false);
        }
        weights.set_active(DoiComponent::Selected, true);
        weights.set_active(DoiComponent::Filtered, true);
        weights.redistribute();

        assert!(approx(weights.get(DoiComponent::Selected), 0.5));
        assert!(approx(weights.get(DoiComponent::Filtered), 0.5));
    }

    #[test]
    fn test_set_weight_rescales_others() {
        let mut weights = DoiWeights::default();
        assert!(weights.set_weight(DoiComponent::Selected, 0.6));

        assert!(approx(weights.get(DoiComponent::Selected), 0.6));
        assert!(approx(weights.get(DoiComponent::Filtered), 0.1));
        assert!(approx(weights.active_sum(), 1.0));
    }

    #[test]
    fn test_set_weight_on_sole_active_component_pins_to_one() {
        let mut weights = DoiWeights::default();
        for c in DoiComponent::ALL {
            if c != DoiComponent::Time {
                weights.set_active(c, false);
            }
        }
        assert!(weights.set_weight(DoiComponent::Time, 0.3));
        assert!(approx(weights.get(DoiComponent::Time), 1.0));
    }

    #[test]
    fn test_set_weight_on_inactive_component_is_rejected() {
        let mut weights = DoiWeights::default();
        weights.set_active(DoiComponent::LayerDiff, false);
        assert!(!weights.set_weight(DoiComponent::LayerDiff, 0.9));
        assert_eq!(weights.get(DoiComponent::LayerDiff), 0.0);
    }

    #[test]
    fn test_weighted_sum_rounds_and_bounds() {
        let mut doi = DoiComponents::default();
        doi.filtered_changed(true);
        doi.selected_changed(true);
        doi.init_time_component(0.333);

        let sum = doi.compute_weighted_sum(&DoiWeights::default());
        // 0.2 * (1 + 1 + 0 + 0.333 + 0) = 0.4666
        assert_eq!(sum, 0.47);
    }

    #[test]
    fn test_unfiltered_component_is_half() {
        let mut doi = DoiComponents::default();
        doi.filtered_changed(false);
        assert_eq!(doi.filtered, 0.5);
    }

    #[test]
    fn test_component_names_roundtrip() {
        for c in DoiComponent::ALL {
            assert_eq!(DoiComponent::from_str(c.as_str()).unwrap(), c);
        }
        assert!(DoiComponent::from_str("bogus").is_err());
    }
}
