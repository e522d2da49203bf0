// ABOUTME: Strict hierarchical exact-match filter over six categorical fields
// ABOUTME: All-or-nothing conjunction; optional seeded shuffle for presentation variety
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ahara Health

//! # Exact-Match Filter
//!
//! The strict strategy: a plan qualifies only when all six categorical
//! fields equal the profile's, after normalization at load time. There is
//! no partial credit and no nearest-match fallback — the result is either a
//! non-empty list of fully-matching plans or empty.
//!
//! Fields are tested most-discriminating first (category, then region,
//! diet, gender, BMI, activity) so non-matches exit the conjunction early.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::models::{Plan, UserProfile};

/// Keep only plans matching the profile on every categorical field.
///
/// An unmapped goal yields an empty result, never an error. Plans whose BMI
/// or activity metadata was unrecognizable at load time carry `None` there
/// and can never satisfy the conjunction. Output preserves corpus order, so
/// re-running with the same inputs yields the same list.
pub fn filter_exact<'a>(profile: &UserProfile, plans: &'a [Plan]) -> Vec<&'a Plan> {
    let Some(category) = profile.goal.category() else {
        debug!(goal = profile.goal.as_str(), "Goal has no corpus category; exact match empty");
        return Vec::new();
    };

    plans
        .iter()
        .filter(|plan| {
            plan.category == category
                && plan.region == profile.region
                && plan.diet_type == profile.diet_type
                && plan.gender == profile.gender
                && plan.bmi_category == Some(profile.bmi_category)
                && plan.activity_level == Some(profile.activity_level)
        })
        .collect()
}

/// Exact match with presentation variety: the fully-matching set, shuffled
/// and truncated to `top_k`.
///
/// A fixed `seed` makes the order reproducible; `None` draws a fresh seed
/// so repeat visitors see their matching plans rotated.
pub fn recommend_exact<'a>(
    profile: &UserProfile,
    plans: &'a [Plan],
    top_k: usize,
    seed: Option<u64>,
) -> Vec<&'a Plan> {
    let mut matches = filter_exact(profile, plans);
    let mut rng = match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    matches.shuffle(&mut rng);
    matches.truncate(top_k);
    matches
}
