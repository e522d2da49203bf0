// ABOUTME: Meal cycle planner rotating selected plans into an N-day schedule
// ABOUTME: Cycles plans across days and option indices within days for variety
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ahara Health

//! # Meal Cycle Planner
//!
//! Users pick one or more matched plans; the planner turns them into a
//! dated day-by-day schedule (default seven days). Plans rotate across
//! days, and within a plan the option index advances each day so the same
//! plan served twice in a week shows different dishes.
//!
//! A meal slot with no extracted options stays in the schedule as a
//! placeholder entry (the slot with no dish) so renderers keep a uniform
//! eight-slot day; it never fails the cycle.

use chrono::{Datelike, Duration, NaiveDate};
use tracing::{debug, info};

use crate::constants::meals::GROUNDING_OPTIONS_PER_SLOT;
use crate::errors::{AppError, AppResult};
use crate::extractor::{extract_meals, MealOption, MealType};
use crate::models::{NutritionSummary, Plan, PlanCategory};

/// Default cycle length in days
pub const DEFAULT_CYCLE_DAYS: u32 = 7;

/// One slot of a scheduled day
#[derive(Debug, Clone, serde::Serialize)]
pub struct ScheduledMeal {
    pub meal_type: MealType,
    /// `None` when the source plan had no extracted options for this slot;
    /// renderers show the slot label as a placeholder
    pub option: Option<MealOption>,
}

/// One day of the generated cycle
#[derive(Debug, Clone, serde::Serialize)]
pub struct DayPlan {
    pub date: NaiveDate,
    /// 1-based day number within the cycle
    pub day: u32,
    pub weekday: String,
    pub plan_id: String,
    pub category: PlanCategory,
    /// The source plan's daily nutrition summary, unadjusted
    pub nutrition: NutritionSummary,
    /// Exactly one entry per meal slot, in daily order
    pub meals: Vec<ScheduledMeal>,
}

/// Generate a dated meal cycle from the selected plans.
///
/// Day `d` serves plan `(d-1) mod plans`, with the option index advancing
/// each day modulo the per-slot option cap so repeated plans rotate their
/// dishes. Requires at least one plan.
pub fn generate_cycle(
    plans: &[&Plan],
    days: u32,
    start_date: NaiveDate,
) -> AppResult<Vec<DayPlan>> {
    if plans.is_empty() {
        return Err(AppError::EmptyPlanSelection);
    }
    info!(days, plans = plans.len(), "Generating meal cycle");

    // Extract once per plan, not once per day
    let extracted: Vec<Vec<crate::extractor::ExtractedMeal>> = plans
        .iter()
        .map(|plan| extract_meals(&plan.text))
        .collect();

    let mut schedule = Vec::with_capacity(days as usize);
    for day in 1..=days {
        let plan_index = ((day - 1) as usize) % plans.len();
        let plan = plans[plan_index];
        let meals_for_plan = &extracted[plan_index];
        let option_index = ((day - 1) as usize) % GROUNDING_OPTIONS_PER_SLOT;
        let date = start_date + Duration::days(i64::from(day - 1));

        let meals = MealType::ALL
            .iter()
            .map(|&meal_type| ScheduledMeal {
                meal_type,
                option: pick_option(meals_for_plan, meal_type, option_index),
            })
            .collect();

        schedule.push(DayPlan {
            date,
            day,
            weekday: date.weekday().to_string(),
            plan_id: plan.id.clone(),
            category: plan.category,
            nutrition: plan.nutrition,
            meals,
        });
    }

    debug!(days = schedule.len(), "Meal cycle complete");
    Ok(schedule)
}

fn pick_option(
    extracted: &[crate::extractor::ExtractedMeal],
    meal_type: MealType,
    option_index: usize,
) -> Option<MealOption> {
    let meal = extracted.iter().find(|m| m.meal_type == meal_type)?;
    if meal.options.is_empty() {
        return None;
    }
    Some(meal.options[option_index % meal.options.len()].clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        ActivityLevel, AgeRange, BmiCategory, DietType, Gender, Region,
    };

    fn plan_with_text(id: &str, text: &str) -> Plan {
        Plan {
            id: id.into(),
            source: format!("{id}.txt"),
            title: String::new(),
            category: PlanCategory::WeightLoss,
            region: Region::new("north_indian"),
            diet_type: DietType::Vegetarian,
            gender: Gender::Female,
            bmi_category: Some(BmiCategory::Overweight),
            activity_level: Some(ActivityLevel::Light),
            age_range: AgeRange::default(),
            nutrition: NutritionSummary::default(),
            text: text.into(),
        }
    }

    const TEXT: &str = "\
Breakfast
Option 1: Poha
Option 2: Upma
Option 3: Idli

Lunch
Option 1: Dal Rice
";

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 2).unwrap_or_default()
    }

    #[test]
    fn test_cycle_length_and_dates() {
        let plan = plan_with_text("p1", TEXT);
        let schedule = generate_cycle(&[&plan], 7, start()).expect("cycle");
        assert_eq!(schedule.len(), 7);
        assert_eq!(schedule[0].date, start());
        assert_eq!(schedule[6].date, start() + Duration::days(6));
        assert_eq!(schedule[0].day, 1);
    }

    #[test]
    fn test_options_rotate_across_days() {
        let plan = plan_with_text("p1", TEXT);
        let schedule = generate_cycle(&[&plan], 3, start()).expect("cycle");
        let breakfast_names: Vec<String> = schedule
            .iter()
            .map(|d| {
                d.meals
                    .iter()
                    .find(|m| m.meal_type == MealType::Breakfast)
                    .and_then(|m| m.option.as_ref())
                    .map(|o| o.name.clone())
                    .unwrap_or_default()
            })
            .collect();
        assert_eq!(breakfast_names, vec!["Poha", "Upma", "Idli"]);
    }

    #[test]
    fn test_plans_alternate_across_days() {
        let a = plan_with_text("a", TEXT);
        let b = plan_with_text("b", TEXT);
        let schedule = generate_cycle(&[&a, &b], 4, start()).expect("cycle");
        let ids: Vec<&str> = schedule.iter().map(|d| d.plan_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "a", "b"]);
    }

    #[test]
    fn test_missing_slot_becomes_placeholder_not_failure() {
        let plan = plan_with_text("p1", TEXT); // no dinner section at all
        let schedule = generate_cycle(&[&plan], 1, start()).expect("cycle");
        let dinner = schedule[0]
            .meals
            .iter()
            .find(|m| m.meal_type == MealType::Dinner)
            .expect("slot present");
        assert!(dinner.option.is_none());
        assert_eq!(schedule[0].meals.len(), MealType::ALL.len());
    }

    #[test]
    fn test_single_option_slot_repeats() {
        let plan = plan_with_text("p1", TEXT);
        let schedule = generate_cycle(&[&plan], 3, start()).expect("cycle");
        for day in &schedule {
            let lunch = day
                .meals
                .iter()
                .find(|m| m.meal_type == MealType::Lunch)
                .and_then(|m| m.option.as_ref())
                .expect("lunch present");
            assert_eq!(lunch.name, "Dal Rice");
        }
    }

    #[test]
    fn test_empty_selection_is_an_error() {
        assert!(matches!(
            generate_cycle(&[], 7, start()),
            Err(AppError::EmptyPlanSelection)
        ));
    }
}
