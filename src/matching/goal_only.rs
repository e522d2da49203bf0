// ABOUTME: Relaxed goal-only filter with the bounded additive soft scorer
// ABOUTME: Admits on category and region; ranks by score with stable id tie-break
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ahara Health

//! # Goal-Only Filter + Soft Scorer
//!
//! The relaxed strategy, preferred when availability matters more than
//! precision: a plan is admitted when its category matches the profile's
//! goal-derived category and its region matches — diet, gender, BMI, and
//! activity are ignored for admission.
//!
//! The soft score ranks the admitted set and is never used for admission.
//! Category and region bonuses are always earned by admitted plans; they
//! are still scored per-plan so the same scorer extends to multi-category
//! profiles later. Condition and age-proximity bonuses differentiate the
//! ranking in practice. Each result also carries the age-adjusted calorie
//! band from [`super::age_adjust`].

use tracing::debug;

use crate::config::MatcherConfig;
use crate::models::{MatchResult, Plan, UserProfile};

use super::age_adjust;

/// Relaxed filter and rank under the process-wide configuration
pub fn filter_and_score<'a>(profile: &UserProfile, plans: &'a [Plan]) -> Vec<MatchResult<'a>> {
    filter_and_score_with(profile, plans, MatcherConfig::global())
}

/// Relaxed filter and rank under an explicit configuration
pub fn filter_and_score_with<'a>(
    profile: &UserProfile,
    plans: &'a [Plan],
    config: &MatcherConfig,
) -> Vec<MatchResult<'a>> {
    let Some(category) = profile.goal.category() else {
        debug!(goal = profile.goal.as_str(), "Goal has no corpus category; relaxed match empty");
        return Vec::new();
    };

    let mut results: Vec<MatchResult<'a>> = plans
        .iter()
        .filter(|plan| plan.category == category && plan.region == profile.region)
        .map(|plan| {
            let score = soft_score(profile, plan, config);
            let adjustment = age_adjust::adjust(profile.age, &plan.age_range, &config.age_adjustment);
            MatchResult {
                plan,
                score,
                age_adjustment: adjustment.delta_kcal,
                age_adjusted: adjustment.applied,
                adjusted_nutrition: adjustment.apply(&plan.nutrition),
            }
        })
        .collect();

    // Descending score; ties broken by ascending plan id for reproducibility
    results.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.plan.id.cmp(&b.plan.id))
    });
    results
}

/// Bounded additive score in `[0, config.scoring.max_score()]`
fn soft_score(profile: &UserProfile, plan: &Plan, config: &MatcherConfig) -> f64 {
    let weights = &config.scoring;
    let mut score = 0.0;

    if profile.goal.category() == Some(plan.category) {
        score += weights.category_match;
    }
    if plan.region == profile.region {
        score += weights.region_match;
    }
    if conditions_correspond(profile, plan) {
        score += weights.condition_match;
    }
    if plan.age_range.contains(profile.age) {
        score += weights.age_in_range;
    } else if plan
        .age_range
        .within_window(profile.age, weights.age_near_window_years)
    {
        score += weights.age_near_range;
    }

    score
}

/// True when any declared condition textually corresponds to the plan's
/// category or its known condition tags
fn conditions_correspond(profile: &UserProfile, plan: &Plan) -> bool {
    if profile.medical_conditions.is_empty() {
        return false;
    }
    let category_text = plan.category.as_str().replace('_', " ");
    profile.medical_conditions.iter().any(|condition| {
        let condition = condition.trim().to_lowercase();
        if condition.is_empty() {
            return false;
        }
        condition.contains(&category_text)
            || plan
                .category
                .condition_tags()
                .iter()
                .any(|tag| condition.contains(tag) || tag.contains(condition.as_str()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goals::Goal;
    use crate::models::{
        ActivityLevel, AgeRange, BmiCategory, DietType, Gender, NutrientRange, NutritionSummary,
        PlanCategory, Region,
    };
    use std::collections::BTreeSet;

    fn plan(id: &str, category: PlanCategory) -> Plan {
        Plan {
            id: id.into(),
            source: format!("{id}.txt"),
            title: String::new(),
            category,
            region: Region::new("north_indian"),
            diet_type: DietType::Vegetarian,
            gender: Gender::Female,
            bmi_category: Some(BmiCategory::Overweight),
            activity_level: Some(ActivityLevel::Light),
            age_range: AgeRange::default(),
            nutrition: NutritionSummary::default(),
            text: String::new(),
        }
    }

    fn profile(goal: Goal) -> UserProfile {
        UserProfile {
            gender: Gender::Female,
            age: 32,
            height_cm: 160.0,
            weight_kg: 72.0,
            bmi_category: BmiCategory::Overweight,
            activity_level: ActivityLevel::Light,
            diet_type: DietType::Vegetarian,
            region: Region::new("north_indian"),
            goal,
            medical_conditions: BTreeSet::new(),
            allergies: BTreeSet::new(),
        }
    }

    fn config() -> MatcherConfig {
        MatcherConfig::default()
    }

    #[test]
    fn test_admission_ignores_diet_gender_bmi_activity() {
        let mut p1 = plan("p1", PlanCategory::WeightLoss);
        p1.diet_type = DietType::NonVeg;
        p1.gender = Gender::Male;
        p1.bmi_category = None;
        p1.activity_level = None;
        let plans = [p1];
        let results = filter_and_score_with(&profile(Goal::WeightLossOnly), &plans, &config());
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_region_mismatch_excludes() {
        let mut p1 = plan("p1", PlanCategory::WeightLoss);
        p1.region = Region::new("south_indian");
        let plans = [p1];
        let results = filter_and_score_with(&profile(Goal::WeightLossOnly), &plans, &config());
        assert!(results.is_empty());
    }

    #[test]
    fn test_admitted_plan_scores_at_least_category_plus_region() {
        let plans = [plan("p1", PlanCategory::WeightLoss)];
        let results = filter_and_score_with(&profile(Goal::WeightLossOnly), &plans, &config());
        assert!(results[0].score >= 80.0);
    }

    #[test]
    fn test_score_bounded_by_max() {
        let cfg = config();
        let mut p1 = plan("p1", PlanCategory::WeightLossPcos);
        p1.age_range = AgeRange::new(Some(30), Some(40));
        let mut user = profile(Goal::WeightLossPcos);
        user.medical_conditions.insert("PCOS".into());
        let plans = [p1];
        let results = filter_and_score_with(&user, &plans, &cfg);
        assert!((results[0].score - cfg.scoring.max_score()).abs() < f64::EPSILON);
    }

    #[test]
    fn test_age_in_range_outscores_age_outside() {
        let mut in_range = plan("a_in", PlanCategory::WeightLoss);
        in_range.age_range = AgeRange::new(Some(30), Some(40));
        let mut outside = plan("b_out", PlanCategory::WeightLoss);
        outside.age_range = AgeRange::new(Some(50), Some(60));
        let plans = [outside, in_range];
        let results = filter_and_score_with(&profile(Goal::WeightLossOnly), &plans, &config());
        assert_eq!(results[0].plan.id, "a_in");
        assert!(results[0].score > results[1].score);
    }

    #[test]
    fn test_near_range_bonus_between_in_and_out() {
        let mut near = plan("near", PlanCategory::WeightLoss);
        near.age_range = AgeRange::new(Some(35), Some(45)); // profile age 32 is 3 from the bound
        let mut far = plan("far", PlanCategory::WeightLoss);
        far.age_range = AgeRange::new(Some(50), Some(60));
        let plans = [far, near];
        let results = filter_and_score_with(&profile(Goal::WeightLossOnly), &plans, &config());
        assert_eq!(results[0].plan.id, "near");
        assert_eq!(results[0].score - results[1].score, 10.0);
    }

    #[test]
    fn test_condition_bonus_matches_tags_case_insensitively() {
        let p1 = plan("p1", PlanCategory::WeightLossPcos);
        let mut user = profile(Goal::WeightLossPcos);
        user.medical_conditions.insert("diagnosed PCOD".into());
        let with = filter_and_score_with(&user, std::slice::from_ref(&p1), &config());
        user.medical_conditions.clear();
        let without = filter_and_score_with(&user, std::slice::from_ref(&p1), &config());
        assert_eq!(with[0].score - without[0].score, 20.0);
    }

    #[test]
    fn test_unmapped_goal_yields_empty() {
        let plans = vec![plan("p1", PlanCategory::WeightLoss)];
        assert!(filter_and_score_with(&profile(Goal::Edema), &plans, &config()).is_empty());
        assert!(filter_and_score_with(
            &profile(Goal::InsulinResistanceObesity),
            &plans,
            &config()
        )
        .is_empty());
    }

    #[test]
    fn test_ties_break_by_plan_id() {
        let plans = vec![
            plan("zeta", PlanCategory::WeightLoss),
            plan("alpha", PlanCategory::WeightLoss),
        ];
        let results = filter_and_score_with(&profile(Goal::WeightLossOnly), &plans, &config());
        assert_eq!(results[0].plan.id, "alpha");
        assert_eq!(results[1].plan.id, "zeta");
    }

    #[test]
    fn test_results_carry_age_adjusted_calories() {
        let mut p1 = plan("p1", PlanCategory::WeightLoss);
        p1.age_range = AgeRange::new(Some(30), Some(40)); // midpoint 35
        p1.nutrition.calories = Some(NutrientRange::new(1400, 1600));
        let mut user = profile(Goal::WeightLossOnly);
        user.age = 45;
        let plans = [p1];
        let results = filter_and_score_with(&user, &plans, &config());
        assert!(results[0].age_adjusted);
        assert_eq!(results[0].age_adjustment, -100);
        assert_eq!(
            results[0].adjusted_nutrition.calories,
            Some(NutrientRange::new(1300, 1500))
        );
    }
}
