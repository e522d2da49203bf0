// ABOUTME: Age-based calorie adjustment applied to relaxed-path match results
// ABOUTME: Shifts a plan's calorie band toward the user's age per the configured policy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ahara Health

//! # Age-Calorie Adjuster
//!
//! Plans are authored for a target age band; users land near it, not on it.
//! This module nudges a plan's published calorie range toward the user:
//! younger than the plan's midpoint raises the band (more metabolic
//! headroom), older lowers it. The policy engages only once either the user
//! or the plan's target midpoint is past the configured threshold.
//!
//! This is a product heuristic, tunable via [`AgeAdjustmentPolicy`]. It is
//! not a basal-metabolic-rate calculation and must not be read as one.

use serde::Serialize;

use crate::config::AgeAdjustmentPolicy;
use crate::models::{AgeRange, NutritionSummary};

/// Outcome of the age adjustment for one (profile, plan) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AgeAdjustment {
    /// Signed calorie delta; negative lowers the band
    pub delta_kcal: i32,
    /// False when the plan has no age midpoint or the policy did not engage
    pub applied: bool,
}

impl AgeAdjustment {
    pub const NONE: Self = Self {
        delta_kcal: 0,
        applied: false,
    };

    /// Apply the delta to a plan's calorie band; other nutrients pass
    /// through unchanged
    pub fn apply(self, nutrition: &NutritionSummary) -> NutritionSummary {
        let mut adjusted = *nutrition;
        if self.applied {
            adjusted.calories = nutrition.calories.map(|c| c.shifted(self.delta_kcal));
        }
        adjusted
    }
}

/// Compute the calorie delta for a profile age against a plan's age range.
///
/// Returns [`AgeAdjustment::NONE`] when the range has no midpoint or when
/// both the user and the plan midpoint sit at or below the threshold. The
/// delta counts full years of distance only (a half-year gap from a
/// `30-35` midpoint does not move the band), truncated toward zero so the
/// adjustment stays antisymmetric around the midpoint.
pub fn adjust(age: u32, range: &AgeRange, policy: &AgeAdjustmentPolicy) -> AgeAdjustment {
    let Some(midpoint) = range.midpoint() else {
        return AgeAdjustment::NONE;
    };

    let threshold = f64::from(policy.threshold_years);
    if f64::from(age) <= threshold && midpoint <= threshold {
        return AgeAdjustment::NONE;
    }

    let full_years = (f64::from(age) - midpoint).trunc() as i32;
    let delta_kcal = -(policy.kcal_per_year as i32) * full_years;
    AgeAdjustment {
        delta_kcal,
        applied: delta_kcal != 0,
    }
}
