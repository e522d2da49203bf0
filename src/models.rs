// ABOUTME: Core data model for the diet plan matching engine
// ABOUTME: Defines Plan, UserProfile, MatchResult and the six categorical dimensions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ahara Health

//! # Data Models
//!
//! Strongly-typed values for the matching engine. The original corpus was
//! authored as free-text documents, so every categorical dimension here is
//! an enum constructed once at the boundary (profile intake or index load)
//! via [`crate::normalize`]; downstream filters never compare raw strings.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::goals::Goal;

/// Biological gender as recorded in the corpus metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Parse from a raw token, case-insensitive
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "male" => Some(Self::Male),
            "female" => Some(Self::Female),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

/// Regional cuisine the plan is authored for.
///
/// Open vocabulary (the corpus currently carries `north_indian` and
/// `south_indian` but new regions appear without an engine release), so this
/// is a normalized lowercase token rather than a closed enum.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Region(String);

impl Region {
    /// Normalize a raw token: lowercase, trimmed, spaces and dashes to
    /// underscores. Idempotent.
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_lowercase().replace([' ', '-'], "_"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Dietary pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DietType {
    Vegetarian,
    Vegan,
    NonVeg,
    Eggetarian,
}

impl DietType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Vegetarian => "vegetarian",
            Self::Vegan => "vegan",
            Self::NonVeg => "non_veg",
            Self::Eggetarian => "eggetarian",
        }
    }
}

/// BMI category band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Underweight => "underweight",
            Self::Normal => "normal",
            Self::Overweight => "overweight",
            Self::Obese => "obese",
        }
    }

    /// Categorize a BMI value with goal-aware borderline handling.
    ///
    /// Provided for callers deriving `bmi_category` at profile intake; the
    /// engine itself never computes BMI. Weight-gain goals widen the
    /// underweight band below 20, weight-loss widens overweight above 24,
    /// so borderline users land on plans that serve their goal.
    pub fn from_bmi(bmi: f64, goal: Option<Goal>) -> Self {
        if bmi < 18.5 {
            return Self::Underweight;
        }
        if bmi < 25.0 {
            match goal {
                Some(Goal::WeightGainUnderweight | Goal::HighProteinHighFiber) if bmi < 20.0 => {
                    return Self::Underweight;
                }
                Some(
                    Goal::WeightLossOnly | Goal::WeightLossPcos | Goal::WeightLossType1Diabetes,
                ) if bmi > 24.0 => {
                    return Self::Overweight;
                }
                _ => return Self::Normal,
            }
        }
        if bmi < 30.0 {
            Self::Overweight
        } else {
            Self::Obese
        }
    }
}

/// Physical activity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Heavy,
}

impl ActivityLevel {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sedentary => "sedentary",
            Self::Light => "light",
            Self::Moderate => "moderate",
            Self::Heavy => "heavy",
        }
    }
}

/// Health/goal category a corpus plan belongs to (one per plan)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanCategory {
    WeightLoss,
    WeightGain,
    WeightLossPcos,
    WeightLossDiabetes,
    SkinHealth,
    SkinDetox,
    GutDetox,
    GutCleanseDigestiveDetox,
    LiverDetox,
    AyurvedicDetox,
    HairLoss,
    AntiAging,
    AntiInflammatory,
    Probiotic,
    GasBloating,
    HighProteinBalanced,
    HighProteinHighFiber,
    Maintenance,
}

impl PlanCategory {
    /// Parse from the normalized corpus token
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "weight_loss" => Some(Self::WeightLoss),
            "weight_gain" => Some(Self::WeightGain),
            "weight_loss_pcos" => Some(Self::WeightLossPcos),
            "weight_loss_diabetes" => Some(Self::WeightLossDiabetes),
            "skin_health" => Some(Self::SkinHealth),
            "skin_detox" => Some(Self::SkinDetox),
            "gut_detox" => Some(Self::GutDetox),
            "gut_cleanse_digestive_detox" => Some(Self::GutCleanseDigestiveDetox),
            "liver_detox" => Some(Self::LiverDetox),
            "ayurvedic_detox" => Some(Self::AyurvedicDetox),
            "hair_loss" => Some(Self::HairLoss),
            "anti_aging" => Some(Self::AntiAging),
            "anti_inflammatory" => Some(Self::AntiInflammatory),
            "probiotic" => Some(Self::Probiotic),
            "gas_bloating" => Some(Self::GasBloating),
            "high_protein_balanced" => Some(Self::HighProteinBalanced),
            "high_protein_high_fiber" => Some(Self::HighProteinHighFiber),
            "maintenance" => Some(Self::Maintenance),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WeightLoss => "weight_loss",
            Self::WeightGain => "weight_gain",
            Self::WeightLossPcos => "weight_loss_pcos",
            Self::WeightLossDiabetes => "weight_loss_diabetes",
            Self::SkinHealth => "skin_health",
            Self::SkinDetox => "skin_detox",
            Self::GutDetox => "gut_detox",
            Self::GutCleanseDigestiveDetox => "gut_cleanse_digestive_detox",
            Self::LiverDetox => "liver_detox",
            Self::AyurvedicDetox => "ayurvedic_detox",
            Self::HairLoss => "hair_loss",
            Self::AntiAging => "anti_aging",
            Self::AntiInflammatory => "anti_inflammatory",
            Self::Probiotic => "probiotic",
            Self::GasBloating => "gas_bloating",
            Self::HighProteinBalanced => "high_protein_balanced",
            Self::HighProteinHighFiber => "high_protein_high_fiber",
            Self::Maintenance => "maintenance",
        }
    }
}

/// Inclusive age range a plan was authored for. Both ends optional; a fully
/// absent range means "any age" for bonus purposes and never fails a filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeRange {
    #[serde(default)]
    pub min: Option<u32>,
    #[serde(default)]
    pub max: Option<u32>,
}

impl AgeRange {
    pub const fn new(min: Option<u32>, max: Option<u32>) -> Self {
        Self { min, max }
    }

    /// Target-age midpoint; `None` when both ends are absent. With a single
    /// bound present that bound stands in for the midpoint.
    pub fn midpoint(&self) -> Option<f64> {
        match (self.min, self.max) {
            (Some(lo), Some(hi)) => Some(f64::from(lo + hi) / 2.0),
            (Some(only), None) | (None, Some(only)) => Some(f64::from(only)),
            (None, None) => None,
        }
    }

    /// Inclusive containment; an absent bound is unbounded on that side
    pub fn contains(&self, age: u32) -> bool {
        self.min.is_none_or(|lo| age >= lo) && self.max.is_none_or(|hi| age <= hi)
    }

    /// True when `age` is outside the range but within `window` years of
    /// either present bound
    pub fn within_window(&self, age: u32, window: u32) -> bool {
        if self.contains(age) {
            return false;
        }
        let near = |bound: u32| age.abs_diff(bound) <= window;
        self.min.is_some_and(near) || self.max.is_some_and(near)
    }
}

/// Closed numeric range for one nutrient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutrientRange {
    pub min: u32,
    pub max: u32,
}

impl NutrientRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Shift both ends by a signed delta, saturating at zero
    pub fn shifted(self, delta: i32) -> Self {
        Self {
            min: self.min.saturating_add_signed(delta),
            max: self.max.saturating_add_signed(delta),
        }
    }
}

/// Daily nutrition summary extracted from a plan document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutritionSummary {
    #[serde(default)]
    pub calories: Option<NutrientRange>,
    #[serde(default)]
    pub protein_g: Option<NutrientRange>,
    #[serde(default)]
    pub carbs_g: Option<NutrientRange>,
    #[serde(default)]
    pub fat_g: Option<NutrientRange>,
    #[serde(default)]
    pub fiber_g: Option<NutrientRange>,
}

/// One structured diet-plan record derived from a single source document.
///
/// Immutable once loaded; the index is a closed snapshot for the process
/// lifetime, so plans can be shared across threads without locking.
#[derive(Debug, Clone, Serialize)]
pub struct Plan {
    /// Stable identifier (corpus-relative source path)
    pub id: String,
    /// Source document reference (filename as authored)
    pub source: String,
    /// Human-readable plan title
    pub title: String,
    pub category: PlanCategory,
    pub region: Region,
    pub diet_type: DietType,
    pub gender: Gender,
    /// `None` when the source metadata was unrecognizable; never matches
    pub bmi_category: Option<BmiCategory>,
    /// `None` when the source metadata was unrecognizable; never matches
    pub activity_level: Option<ActivityLevel>,
    pub age_range: AgeRange,
    pub nutrition: NutritionSummary,
    /// Raw extracted document text, consumed by the meal extractor
    pub text: String,
}

/// A normalized user profile, constructed once at the API boundary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub gender: Gender,
    pub age: u32,
    /// Carried for callers; not matched by any strategy here
    pub height_cm: f64,
    /// Carried for callers; not matched by any strategy here
    pub weight_kg: f64,
    pub bmi_category: BmiCategory,
    pub activity_level: ActivityLevel,
    pub diet_type: DietType,
    pub region: Region,
    pub goal: Goal,
    /// Free-text condition tokens, e.g. "pcos", "type 1 diabetes"
    #[serde(default)]
    pub medical_conditions: BTreeSet<String>,
    /// Consulted by callers when presenting meals; not scored here
    #[serde(default)]
    pub allergies: BTreeSet<String>,
}

/// Ranked output of the relaxed (goal-only) strategy
#[derive(Debug, Clone, Serialize)]
pub struct MatchResult<'a> {
    pub plan: &'a Plan,
    /// Soft score in `[0, max_score]`; 0 when scoring was not applicable
    pub score: f64,
    /// Signed calorie delta from the age adjuster; 0 when none applied
    pub age_adjustment: i32,
    pub age_adjusted: bool,
    /// The plan's nutrition with the age delta applied to the calorie band
    pub adjusted_nutrition: NutritionSummary,
}

/// Output of the semantic retriever: a plan with its similarity score
#[derive(Debug, Clone, Serialize)]
pub struct ScoredPlan<'a> {
    pub plan: &'a Plan,
    pub similarity: f32,
}
