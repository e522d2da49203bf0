// ABOUTME: User-facing goal vocabulary and the static goal-to-category mapping
// ABOUTME: Total function over all goals; some goals intentionally map to no corpus category
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ahara Health

//! # Goal Mapper
//!
//! The onboarding flow offers twenty goals; the corpus folders cover
//! eighteen categories. The mapping is many-to-one (two skin goals share one
//! category) and deliberately partial: `edema` and
//! `insulin_resistance_obesity` have no authored plans, and mapping them to
//! `None` is how "diet not available" propagates — callers must treat `None`
//! as zero matches, never as an error.

use serde::{Deserialize, Serialize};

use crate::models::PlanCategory;

/// User-facing goal identifier selected during onboarding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    AyurvedicDetox,
    DigestiveDetox,
    GutDetox,
    HairLossThinning,
    LiverDetox,
    ProbioticRich,
    SkinDetox,
    SkinHealth,
    WeightGainUnderweight,
    AntiInflammatory,
    AntiAgingSunDamage,
    GasBloating,
    ProteinRichBalanced,
    HighProteinHighFiber,
    AcneOilySkin,
    WeightLossPcos,
    WeightLossOnly,
    WeightLossType1Diabetes,
    Edema,
    InsulinResistanceObesity,
}

impl Goal {
    /// All goals in the declared vocabulary
    pub const ALL: [Self; 20] = [
        Self::AyurvedicDetox,
        Self::DigestiveDetox,
        Self::GutDetox,
        Self::HairLossThinning,
        Self::LiverDetox,
        Self::ProbioticRich,
        Self::SkinDetox,
        Self::SkinHealth,
        Self::WeightGainUnderweight,
        Self::AntiInflammatory,
        Self::AntiAgingSunDamage,
        Self::GasBloating,
        Self::ProteinRichBalanced,
        Self::HighProteinHighFiber,
        Self::AcneOilySkin,
        Self::WeightLossPcos,
        Self::WeightLossOnly,
        Self::WeightLossType1Diabetes,
        Self::Edema,
        Self::InsulinResistanceObesity,
    ];

    /// Parse from the snake_case identifier used by the onboarding form
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "ayurvedic_detox" => Some(Self::AyurvedicDetox),
            "digestive_detox" => Some(Self::DigestiveDetox),
            "gut_detox" => Some(Self::GutDetox),
            "hair_loss_thinning" => Some(Self::HairLossThinning),
            "liver_detox" => Some(Self::LiverDetox),
            "probiotic_rich" => Some(Self::ProbioticRich),
            "skin_detox" => Some(Self::SkinDetox),
            "skin_health" => Some(Self::SkinHealth),
            "weight_gain_underweight" => Some(Self::WeightGainUnderweight),
            "anti_inflammatory" => Some(Self::AntiInflammatory),
            "anti_aging_sun_damage" => Some(Self::AntiAgingSunDamage),
            "gas_bloating" => Some(Self::GasBloating),
            "protein_rich_balanced" => Some(Self::ProteinRichBalanced),
            "high_protein_high_fiber" => Some(Self::HighProteinHighFiber),
            "acne_oily_skin" => Some(Self::AcneOilySkin),
            "weight_loss_pcos" => Some(Self::WeightLossPcos),
            "weight_loss_only" => Some(Self::WeightLossOnly),
            "weight_loss_type1_diabetes" => Some(Self::WeightLossType1Diabetes),
            "edema" => Some(Self::Edema),
            "insulin_resistance_obesity" => Some(Self::InsulinResistanceObesity),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AyurvedicDetox => "ayurvedic_detox",
            Self::DigestiveDetox => "digestive_detox",
            Self::GutDetox => "gut_detox",
            Self::HairLossThinning => "hair_loss_thinning",
            Self::LiverDetox => "liver_detox",
            Self::ProbioticRich => "probiotic_rich",
            Self::SkinDetox => "skin_detox",
            Self::SkinHealth => "skin_health",
            Self::WeightGainUnderweight => "weight_gain_underweight",
            Self::AntiInflammatory => "anti_inflammatory",
            Self::AntiAgingSunDamage => "anti_aging_sun_damage",
            Self::GasBloating => "gas_bloating",
            Self::ProteinRichBalanced => "protein_rich_balanced",
            Self::HighProteinHighFiber => "high_protein_high_fiber",
            Self::AcneOilySkin => "acne_oily_skin",
            Self::WeightLossPcos => "weight_loss_pcos",
            Self::WeightLossOnly => "weight_loss_only",
            Self::WeightLossType1Diabetes => "weight_loss_type1_diabetes",
            Self::Edema => "edema",
            Self::InsulinResistanceObesity => "insulin_resistance_obesity",
        }
    }

    /// Corpus category this goal resolves to, or `None` when no authored
    /// plans exist for it. Total over the vocabulary.
    pub const fn category(self) -> Option<PlanCategory> {
        match self {
            Self::AyurvedicDetox => Some(PlanCategory::AyurvedicDetox),
            Self::DigestiveDetox => Some(PlanCategory::GutCleanseDigestiveDetox),
            Self::GutDetox => Some(PlanCategory::GutDetox),
            Self::HairLossThinning => Some(PlanCategory::HairLoss),
            Self::LiverDetox => Some(PlanCategory::LiverDetox),
            Self::ProbioticRich => Some(PlanCategory::Probiotic),
            Self::SkinDetox => Some(PlanCategory::SkinDetox),
            // Two distinct skin goals share the one skin_health folder
            Self::SkinHealth | Self::AcneOilySkin => Some(PlanCategory::SkinHealth),
            Self::WeightGainUnderweight => Some(PlanCategory::WeightGain),
            Self::AntiInflammatory => Some(PlanCategory::AntiInflammatory),
            Self::AntiAgingSunDamage => Some(PlanCategory::AntiAging),
            Self::GasBloating => Some(PlanCategory::GasBloating),
            Self::ProteinRichBalanced => Some(PlanCategory::HighProteinBalanced),
            Self::HighProteinHighFiber => Some(PlanCategory::HighProteinHighFiber),
            Self::WeightLossPcos => Some(PlanCategory::WeightLossPcos),
            Self::WeightLossOnly => Some(PlanCategory::WeightLoss),
            Self::WeightLossType1Diabetes => Some(PlanCategory::WeightLossDiabetes),
            // No corpus folders exist for these
            Self::Edema | Self::InsulinResistanceObesity => None,
        }
    }
}

impl PlanCategory {
    /// Condition tokens this category serves, matched case-insensitively
    /// against a profile's declared medical conditions by the soft scorer.
    pub const fn condition_tags(self) -> &'static [&'static str] {
        match self {
            Self::WeightLossPcos => &["pcos", "pcod", "polycystic"],
            Self::WeightLossDiabetes => &["diabetes", "diabetic", "type 1", "type1"],
            Self::GasBloating => &["bloating", "gas", "flatulence", "ibs"],
            Self::AntiInflammatory => &["inflammation", "arthritis", "joint pain"],
            Self::SkinHealth | Self::SkinDetox => &["acne", "eczema", "pigmentation"],
            Self::HairLoss => &["hair loss", "hair fall", "thinning", "alopecia"],
            Self::LiverDetox => &["fatty liver"],
            Self::GutDetox | Self::GutCleanseDigestiveDetox | Self::Probiotic => {
                &["constipation", "indigestion", "acidity", "gut"]
            }
            _ => &[],
        }
    }
}
