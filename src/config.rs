// ABOUTME: Matcher configuration with validated defaults and environment overrides
// ABOUTME: Scoring weights, age-adjustment policy, and retrieval settings behind a process-wide singleton
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ahara Health

//! # Matcher Configuration
//!
//! Type-safe configuration for the matching and retrieval strategies.
//! Defaults come from [`crate::constants`]; individual values can be
//! overridden through `AHARA_*` environment variables. The global instance
//! is initialized at most once per process.

use crate::constants::{age_adjustment, env_config, retrieval, scoring};
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Weights used by the soft scorer on the relaxed path
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Bonus for a category match
    #[serde(default = "default_category_weight")]
    pub category_match: f64,

    /// Bonus for a region match
    #[serde(default = "default_region_weight")]
    pub region_match: f64,

    /// Bonus for a medical-condition correspondence
    #[serde(default = "default_condition_weight")]
    pub condition_match: f64,

    /// Bonus when the profile age is inside the plan age range
    #[serde(default = "default_age_in_range_weight")]
    pub age_in_range: f64,

    /// Bonus when the profile age is near (but outside) the range
    #[serde(default = "default_age_near_weight")]
    pub age_near_range: f64,

    /// Width of the "near the range" band, in years
    #[serde(default = "default_age_near_window")]
    pub age_near_window_years: u32,
}

fn default_category_weight() -> f64 {
    scoring::CATEGORY_MATCH
}

fn default_region_weight() -> f64 {
    scoring::REGION_MATCH
}

fn default_condition_weight() -> f64 {
    scoring::CONDITION_MATCH
}

fn default_age_in_range_weight() -> f64 {
    scoring::AGE_IN_RANGE
}

fn default_age_near_weight() -> f64 {
    scoring::AGE_NEAR_RANGE
}

fn default_age_near_window() -> u32 {
    scoring::AGE_NEAR_WINDOW_YEARS
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            category_match: default_category_weight(),
            region_match: default_region_weight(),
            condition_match: default_condition_weight(),
            age_in_range: default_age_in_range_weight(),
            age_near_range: default_age_near_weight(),
            age_near_window_years: default_age_near_window(),
        }
    }
}

impl ScoringConfig {
    /// Maximum score attainable under this weight set
    pub fn max_score(&self) -> f64 {
        self.category_match + self.region_match + self.condition_match + self.age_in_range
    }
}

/// Age-based calorie adjustment policy.
///
/// This is a product heuristic, not a clinical calculation: it nudges a
/// plan's published calorie band toward the user's age rather than deriving
/// a basal metabolic rate. BMR derivation belongs to profile intake, outside
/// this engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgeAdjustmentPolicy {
    /// The policy engages once user age or plan midpoint exceeds this
    #[serde(default = "default_age_threshold")]
    pub threshold_years: u32,

    /// Kilocalories shifted per year of distance from the plan midpoint
    #[serde(default = "default_kcal_per_year")]
    pub kcal_per_year: u32,
}

fn default_age_threshold() -> u32 {
    age_adjustment::THRESHOLD_YEARS
}

fn default_kcal_per_year() -> u32 {
    age_adjustment::KCAL_PER_YEAR
}

impl Default for AgeAdjustmentPolicy {
    fn default() -> Self {
        Self {
            threshold_years: default_age_threshold(),
            kcal_per_year: default_kcal_per_year(),
        }
    }
}

/// Semantic retrieval settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Default number of plans returned when the caller does not specify
    #[serde(default = "default_top_k")]
    pub default_top_k: usize,

    /// Remote embedding endpoint; `None` means no remote backend configured
    #[serde(default)]
    pub embed_endpoint: Option<String>,

    /// Timeout applied to remote embedding calls, in seconds
    #[serde(default = "default_embed_timeout")]
    pub embed_timeout_secs: u64,
}

fn default_top_k() -> usize {
    retrieval::DEFAULT_TOP_K
}

fn default_embed_timeout() -> u64 {
    retrieval::EMBED_TIMEOUT_SECS
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            default_top_k: default_top_k(),
            embed_endpoint: None,
            embed_timeout_secs: default_embed_timeout(),
        }
    }
}

/// Top-level matcher configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatcherConfig {
    #[serde(default)]
    pub scoring: ScoringConfig,

    #[serde(default)]
    pub age_adjustment: AgeAdjustmentPolicy,

    #[serde(default)]
    pub retrieval: RetrievalConfig,
}

static MATCHER_CONFIG: OnceLock<MatcherConfig> = OnceLock::new();

impl MatcherConfig {
    /// Load configuration from environment variables over defaults
    pub fn from_env() -> AppResult<Self> {
        let mut config = Self::default();

        if let Ok(raw) = std::env::var(env_config::AGE_THRESHOLD) {
            config.age_adjustment.threshold_years = raw
                .parse()
                .map_err(|_| AppError::Config(format!("bad {}: {raw}", env_config::AGE_THRESHOLD)))?;
        }
        if let Ok(raw) = std::env::var(env_config::AGE_KCAL_PER_YEAR) {
            config.age_adjustment.kcal_per_year = raw.parse().map_err(|_| {
                AppError::Config(format!("bad {}: {raw}", env_config::AGE_KCAL_PER_YEAR))
            })?;
        }
        if let Ok(url) = std::env::var(env_config::EMBED_ENDPOINT) {
            if !url.is_empty() {
                config.retrieval.embed_endpoint = Some(url);
            }
        }
        if let Ok(raw) = std::env::var(env_config::EMBED_TIMEOUT) {
            config.retrieval.embed_timeout_secs = raw
                .parse()
                .map_err(|_| AppError::Config(format!("bad {}: {raw}", env_config::EMBED_TIMEOUT)))?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate weight and policy ranges
    pub fn validate(&self) -> AppResult<()> {
        let s = &self.scoring;
        for (name, w) in [
            ("category_match", s.category_match),
            ("region_match", s.region_match),
            ("condition_match", s.condition_match),
            ("age_in_range", s.age_in_range),
            ("age_near_range", s.age_near_range),
        ] {
            if !w.is_finite() || w < 0.0 {
                return Err(AppError::Config(format!(
                    "scoring weight {name} must be finite and non-negative, got {w}"
                )));
            }
        }
        if s.age_near_range > s.age_in_range {
            return Err(AppError::Config(
                "age_near_range must not exceed age_in_range".into(),
            ));
        }
        if self.retrieval.embed_timeout_secs == 0 {
            return Err(AppError::Config("embed_timeout_secs must be non-zero".into()));
        }
        Ok(())
    }

    /// Global configuration instance, initialized at most once per process
    pub fn global() -> &'static Self {
        MATCHER_CONFIG.get_or_init(|| {
            Self::from_env().unwrap_or_else(|e| {
                tracing::warn!("Failed to load matcher config: {e}, using defaults");
                Self::default()
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_sum_to_max_score() {
        let config = MatcherConfig::default();
        assert!((config.scoring.max_score() - scoring::MAX_SCORE).abs() < f64::EPSILON);
        assert!((config.scoring.max_score() - 120.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_default_config_validates() {
        assert!(MatcherConfig::default().validate().is_ok());
    }

    #[test]
    fn test_negative_weight_rejected() {
        let mut config = MatcherConfig::default();
        config.scoring.region_match = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_near_bonus_may_not_exceed_in_range_bonus() {
        let mut config = MatcherConfig::default();
        config.scoring.age_near_range = config.scoring.age_in_range + 1.0;
        assert!(config.validate().is_err());
    }
}
