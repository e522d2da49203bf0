// ABOUTME: Pure normalizers mapping free-text attribute spellings to canonical enums
// ABOUTME: All variant-spelling knowledge for diet, BMI, and activity lives here
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ahara Health

//! # Normalizer
//!
//! The corpus documents were named and authored independently, so the same
//! attribute appears under several spellings ("vegeterian", "non veg",
//! "Normal Weight", "heavy active"). These functions are the single place
//! that knowledge lives; filters compare enums, never raw strings.
//!
//! Every function is pure, total, and idempotent: normalizing an
//! already-canonical token returns the same value.

use crate::models::{ActivityLevel, BmiCategory, DietType};

/// Lowercase, trim, and fold `_`/`-` separators to single spaces
fn fold(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .replace(['_', '-'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse a diet token, returning `None` when no keyword matches
pub fn parse_diet(raw: &str) -> Option<DietType> {
    match fold(raw).as_str() {
        "veg" | "vegetarian" | "vegeterian" => Some(DietType::Vegetarian),
        "vegan" => Some(DietType::Vegan),
        "non veg" | "nonveg" | "non vegetarian" | "non vegeterian" => Some(DietType::NonVeg),
        "eggetarian" | "eggitarian" => Some(DietType::Eggetarian),
        _ => None,
    }
}

/// Normalize a diet token, defaulting to vegetarian.
///
/// Defaulting is deliberate policy, not silent failure: plans with missing
/// or unrecognizable diet metadata are overwhelmingly vegetarian in this
/// corpus, and a vegetarian default can never surface meat to a vegetarian
/// user. Callers that need to distinguish "recognized" from "defaulted"
/// should use [`parse_diet`].
pub fn normalize_diet(raw: &str) -> DietType {
    parse_diet(raw).unwrap_or(DietType::Vegetarian)
}

/// Normalize a BMI category token; the "weight" suffix and `_`/space
/// separators are equivalent ("over weight" == "overweight")
pub fn normalize_bmi(raw: &str) -> Option<BmiCategory> {
    match fold(raw).as_str() {
        "normal" | "normal weight" => Some(BmiCategory::Normal),
        "overweight" | "over weight" => Some(BmiCategory::Overweight),
        "underweight" | "under weight" => Some(BmiCategory::Underweight),
        "obese" => Some(BmiCategory::Obese),
        _ => None,
    }
}

/// Normalize an activity-level token; "heavy active", "heavy activity",
/// and "very_active" all collapse to heavy
pub fn normalize_activity(raw: &str) -> Option<ActivityLevel> {
    let folded = fold(raw);
    if folded.contains("heavy") || folded == "very active" {
        return Some(ActivityLevel::Heavy);
    }
    if folded.contains("moderate") {
        return Some(ActivityLevel::Moderate);
    }
    if folded.contains("light") {
        return Some(ActivityLevel::Light);
    }
    if folded.contains("sedentary") {
        return Some(ActivityLevel::Sedentary);
    }
    None
}
