// ABOUTME: End-to-end tests from raw plan text through extraction to a dated meal cycle
// ABOUTME: Covers header tolerance, grounding context rendering, and cycle rotation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ahara Health

mod common;

use chrono::NaiveDate;

use ahara_engine::extractor::{extract_meals, grounding_context, MealType};
use ahara_engine::planner::{generate_cycle, DEFAULT_CYCLE_DAYS};
use ahara_engine::models::PlanCategory;

use common::{init_test_logging, matching_plan};

const PLAN_TEXT: &str = "\
Weight Loss Diet Plan | Vegetarian | North Indian

Early Morning (On Waking)
Option 1: Warm Jeera Water
Ingredients: water 250 ml, cumin 1 tsp

Breakfast (8:00 AM)
Option 1: Vegetable Poha
Ingredients with Quantities: poha 50 g, peas 30 g
Serving Size: 1 bowl
Nutritive Values: 280 kcal, 8 g protein, 45 g carbs, 7 g fat
Option 2 – Moong Dal Chilla
Ingredients: moong dal 60 g, onion 20 g
Option 3: Besan Cheela
Ingredients: besan 50 g, spinach 20 g

Meal Type: Lunch
Option -1 Dish – Millet Khichdi
Ingredients: foxtail millet 60 g, moong dal 30 g
Servings: 1 plate

Dinner:
Dish Name: Paneer Bhurji with Roti
Ingredients: paneer 80 g, whole wheat roti 2

Dietary & Cultural Context
Allergens: none
";

fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 2).expect("valid date")
}

#[test]
fn test_extraction_to_cycle_round_trip() {
    init_test_logging();
    let mut plan = matching_plan("wl_1", PlanCategory::WeightLoss);
    plan.text = PLAN_TEXT.into();

    let schedule =
        generate_cycle(&[&plan], DEFAULT_CYCLE_DAYS, start_date()).expect("cycle generates");
    assert_eq!(schedule.len(), 7);

    // Breakfast rotates through its three authored options and wraps
    let names: Vec<String> = schedule
        .iter()
        .map(|day| {
            day.meals
                .iter()
                .find(|m| m.meal_type == MealType::Breakfast)
                .and_then(|m| m.option.as_ref())
                .map(|o| o.name.clone())
                .expect("breakfast scheduled")
        })
        .collect();
    assert_eq!(names[0], "Vegetable Poha");
    assert_eq!(names[1], "Moong Dal Chilla");
    assert_eq!(names[2], "Besan Cheela");
    assert_eq!(names[3], "Vegetable Poha");

    // Slots the document never mentions stay as placeholders
    let bedtime = schedule[0]
        .meals
        .iter()
        .find(|m| m.meal_type == MealType::Bedtime)
        .expect("slot present");
    assert!(bedtime.option.is_none());
}

#[test]
fn test_cycle_days_carry_source_plan_and_dates() {
    init_test_logging();
    let mut plan = matching_plan("wl_1", PlanCategory::WeightLoss);
    plan.text = PLAN_TEXT.into();
    let schedule = generate_cycle(&[&plan], 3, start_date()).expect("cycle generates");
    assert_eq!(schedule[0].weekday, "Mon");
    assert_eq!(schedule[2].date, NaiveDate::from_ymd_opt(2025, 6, 4).expect("valid"));
    assert!(schedule.iter().all(|d| d.plan_id == "wl_1"));
    assert!(schedule.iter().all(|d| d.nutrition.calories.is_some()));
}

#[test]
fn test_grounding_context_only_contains_extracted_dishes() {
    init_test_logging();
    let mut plan = matching_plan("wl_1", PlanCategory::WeightLoss);
    plan.text = PLAN_TEXT.into();

    let context = grounding_context(&plan);
    // Every dish in the context traces back to the source text
    for dish in ["Vegetable Poha", "Millet Khichdi", "Paneer Bhurji with Roti"] {
        assert!(context.contains(dish), "missing {dish}");
        assert!(plan.text.contains(dish));
    }
    // Slots with no extracted options are omitted entirely
    assert!(!context.contains("Bedtime"));
    assert!(context.contains("~280 kcal"));
}

#[test]
fn test_extracted_meals_preserve_document_order() {
    init_test_logging();
    let meals = extract_meals(PLAN_TEXT);
    let order: Vec<MealType> = meals.iter().map(|m| m.meal_type).collect();
    assert_eq!(
        order,
        vec![
            MealType::EarlyMorning,
            MealType::Breakfast,
            MealType::Lunch,
            MealType::Dinner,
        ]
    );
}
