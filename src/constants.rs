// ABOUTME: Policy constants and defaults for matching, scoring, and retrieval
// ABOUTME: Single home for tunable weights so no magic numbers live in the filters
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ahara Health

//! # Constants
//!
//! Default values for every tunable policy in the engine. The soft-score
//! weights and the age-adjustment policy are heuristics inherited from the
//! product's observed behavior, not clinically derived values; they can be
//! overridden through [`crate::config::MatcherConfig`].

/// Soft-score weights for the relaxed (goal-only) strategy
pub mod scoring {
    /// Bonus when the plan category matches the goal-derived category.
    /// Always true for admitted plans today; kept explicit so multi-category
    /// profiles can reuse the same scorer.
    pub const CATEGORY_MATCH: f64 = 50.0;

    /// Bonus when the plan region matches the profile region
    pub const REGION_MATCH: f64 = 30.0;

    /// Bonus when a declared medical condition corresponds to the plan's
    /// category or condition tags
    pub const CONDITION_MATCH: f64 = 20.0;

    /// Bonus when the profile age falls inside the plan's age range
    pub const AGE_IN_RANGE: f64 = 20.0;

    /// Bonus when the profile age is within [`AGE_NEAR_WINDOW_YEARS`] of
    /// either bound of the plan's age range
    pub const AGE_NEAR_RANGE: f64 = 10.0;

    /// Width of the "near the range" band, in years
    pub const AGE_NEAR_WINDOW_YEARS: u32 = 5;

    /// Maximum attainable soft score
    pub const MAX_SCORE: f64 =
        CATEGORY_MATCH + REGION_MATCH + CONDITION_MATCH + AGE_IN_RANGE;
}

/// Age-based calorie adjustment policy defaults
pub mod age_adjustment {
    /// The policy engages only once the user age or the plan's target age
    /// midpoint exceeds this threshold
    pub const THRESHOLD_YEARS: u32 = 30;

    /// Kilocalories added or removed per year of distance from the plan's
    /// age midpoint. Younger than the plan raises the calorie band, older
    /// lowers it.
    pub const KCAL_PER_YEAR: u32 = 10;
}

/// Semantic retrieval defaults
pub mod retrieval {
    /// Default number of plans returned by the retriever
    pub const DEFAULT_TOP_K: usize = 5;

    /// Timeout for the remote embedding backend, in seconds
    pub const EMBED_TIMEOUT_SECS: u64 = 10;
}

/// Meal slot vocabulary shared by the extractor and planner
pub mod meals {
    /// Canonical meal slot identifiers, earliest first; mirrors
    /// `extractor::MealType::ALL`
    pub const MEAL_SLOTS: [&str; 8] = [
        "early_morning",
        "pre_activity",
        "breakfast",
        "mid_morning_snack",
        "lunch",
        "evening_snack",
        "dinner",
        "bedtime",
    ];

    /// Maximum options per meal slot surfaced in grounding context
    pub const GROUNDING_OPTIONS_PER_SLOT: usize = 3;
}

/// Environment variable names for configuration overrides
pub mod env_config {
    /// Override the age-adjustment threshold (years)
    pub const AGE_THRESHOLD: &str = "AHARA_AGE_THRESHOLD_YEARS";

    /// Override the per-year calorie adjustment (kcal)
    pub const AGE_KCAL_PER_YEAR: &str = "AHARA_AGE_KCAL_PER_YEAR";

    /// Override the remote embedding endpoint URL
    pub const EMBED_ENDPOINT: &str = "AHARA_EMBED_ENDPOINT";

    /// Override the embedding request timeout (seconds)
    pub const EMBED_TIMEOUT: &str = "AHARA_EMBED_TIMEOUT_SECS";
}
