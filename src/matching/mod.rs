// ABOUTME: Deterministic matching strategies over the corpus index
// ABOUTME: Strict six-field exact match, relaxed goal-only match with soft scoring, age adjustment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ahara Health

//! # Matching Strategies
//!
//! Two deterministic strategies over the plan corpus, plus the age-based
//! calorie adjustment applied to relaxed-path results:
//!
//! - [`exact`] — hierarchical AND over all six categorical fields;
//!   all-or-nothing, no partial credit.
//! - [`goal_only`] — admits on goal-derived category and region only, then
//!   ranks by a bounded additive soft score.
//! - [`age_adjust`] — shifts a plan's calorie band toward the user's age.
//!
//! All strategy functions are pure over `(&UserProfile, &[Plan])` and safe to
//! call concurrently; the semantic strategy lives in [`crate::retrieval`].

pub mod age_adjust;
pub mod exact;
pub mod goal_only;

pub use age_adjust::{adjust, AgeAdjustment};
pub use exact::{filter_exact, recommend_exact};
pub use goal_only::filter_and_score;
