//! Emission-factor table: `(category, unit) -> kg CO2e per unit`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::value_object::ActivityCategory;

/// Factor applied when a `(category, unit)` pair is not in the table.
///
/// Unknown pairs are not rejected; the reported quantity passes through
/// unscaled. Kept as-is, but callers should treat these impacts as suspect.
pub const DEFAULT_FACTOR: f64 = 1.0;

/// Read-only lookup table injected at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmissionFactorTable {
    factors: BTreeMap<ActivityCategory, BTreeMap<String, f64>>,
}

impl EmissionFactorTable {
    pub fn new(factors: BTreeMap<ActivityCategory, BTreeMap<String, f64>>) -> Self {
        Self { factors }
    }

    /// An empty table: every lookup falls back to [`DEFAULT_FACTOR`].
    pub fn empty() -> Self {
        Self::new(BTreeMap::new())
    }

    /// Add or replace one factor.
    pub fn with_factor(mut self, category: ActivityCategory, unit: &str, factor: f64) -> Self {
        self.factors
            .entry(category)
            .or_default()
            .insert(unit.to_string(), factor);
        self
    }

    /// The configured factor, if the pair is known.
    pub fn factor(&self, category: ActivityCategory, unit: &str) -> Option<f64> {
        self.factors
            .get(&category)
            .and_then(|units| units.get(unit))
            .copied()
    }

    /// `quantity * factor`, using [`DEFAULT_FACTOR`] for unknown pairs.
    pub fn impact(&self, category: ActivityCategory, unit: &str, quantity: f64) -> f64 {
        let factor = self.factor(category, unit).unwrap_or_else(|| {
            tracing::debug!(
                "No emission factor for ({}, {}); using default {}",
                category,
                unit,
                DEFAULT_FACTOR
            );
            DEFAULT_FACTOR
        });
        quantity * factor
    }
}

impl Default for EmissionFactorTable {
    fn default() -> Self {
        use ActivityCategory::*;

        Self::empty()
            .with_factor(Transportation, "car_km", 0.2)
            .with_factor(Transportation, "bus_km", 0.1)
            .with_factor(Transportation, "train_km", 0.04)
            .with_factor(Transportation, "flight_km", 0.25)
            .with_factor(Transportation, "bike_km", 0.0)
            .with_factor(Energy, "kwh", 0.5)
            .with_factor(Energy, "gas_m3", 2.0)
            .with_factor(Diet, "beef_kg", 27.0)
            .with_factor(Diet, "chicken_kg", 6.9)
            .with_factor(Diet, "vegetables_kg", 2.0)
            .with_factor(Diet, "meal", 2.5)
            .with_factor(Waste, "landfill_kg", 0.5)
            .with_factor(Waste, "recycled_kg", 0.1)
            .with_factor(Water, "liter", 0.0003)
            .with_factor(Shopping, "clothing_item", 10.0)
            .with_factor(Shopping, "electronics_item", 50.0)
    }
}
