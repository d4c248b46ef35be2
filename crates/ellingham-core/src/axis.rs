// File: crates/ellingham-core/src/axis.rs
// Summary: Axis model with labels, ranges and tick spacing.

use crate::grid::{nice_step, ticks};

/// Default temperature span (°C) when there is nothing to autoscale against.
pub const DEFAULT_T_RANGE: (f64, f64) = (0.0, 2000.0);
/// Default free-energy span (kJ/mol) when there is nothing to autoscale against.
pub const DEFAULT_G_RANGE: (f64, f64) = (-1000.0, 0.0);

#[derive(Clone, Debug, PartialEq)]
pub struct Axis {
    pub label: String,
    pub min: f64,
    pub max: f64,
    /// Fixed tick spacing; `None` picks a 1/2/5 step for ~10 ticks.
    pub step: Option<f64>,
}

impl Axis {
    pub fn new(label: impl Into<String>, min: f64, max: f64) -> Self {
        Self { label: label.into(), min, max, step: None }
    }

    pub fn temperature() -> Self {
        Self::new("Temperature (°C)", DEFAULT_T_RANGE.0, DEFAULT_T_RANGE.1)
    }

    pub fn free_energy() -> Self {
        Self::new("ΔG°f (kJ/mol)", DEFAULT_G_RANGE.0, DEFAULT_G_RANGE.1)
    }

    /// Free-energy axis in kJ per mole of the given reactants, e.g. `O₂`.
    pub fn free_energy_per(reactants: &str) -> Self {
        Self::new(format!("ΔG°f (kJ/mol {reactants})"), DEFAULT_G_RANGE.0, DEFAULT_G_RANGE.1)
    }

    pub fn with_step(mut self, step: f64) -> Self {
        self.step = Some(step);
        self
    }

    pub fn span(&self) -> f64 {
        (self.max - self.min).max(1e-9)
    }

    pub fn contains(&self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }

    pub fn tick_values(&self) -> Vec<f64> {
        let step = self
            .step
            .filter(|s| *s > 0.0 && s.is_finite())
            .unwrap_or_else(|| nice_step(self.span(), 10));
        ticks(self.min, self.max, step)
    }
}
