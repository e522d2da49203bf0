// ABOUTME: Shared test fixtures for integration tests
// ABOUTME: Provides logging init, corpus fixtures, and profile builders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ahara Health
#![allow(dead_code)]

//! Shared test utilities for `ahara_engine` integration tests

use std::collections::BTreeSet;
use std::sync::Once;

use ahara_engine::goals::Goal;
use ahara_engine::models::{
    ActivityLevel, AgeRange, BmiCategory, DietType, Gender, NutrientRange, NutritionSummary,
    Plan, PlanCategory, Region, UserProfile,
};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };
        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// A plan with every field set to the fixture profile's values
pub fn matching_plan(id: &str, category: PlanCategory) -> Plan {
    Plan {
        id: id.into(),
        source: format!("{id}.txt"),
        title: format!("Plan {id}"),
        category,
        region: Region::new("north_indian"),
        diet_type: DietType::Vegetarian,
        gender: Gender::Female,
        bmi_category: Some(BmiCategory::Overweight),
        activity_level: Some(ActivityLevel::Light),
        age_range: AgeRange::new(Some(30), Some(40)),
        nutrition: NutritionSummary {
            calories: Some(NutrientRange::new(1400, 1600)),
            protein_g: Some(NutrientRange::new(60, 80)),
            ..NutritionSummary::default()
        },
        text: String::new(),
    }
}

/// The concrete scenario profile: overweight vegetarian female from the
/// north, light activity, weight-loss goal
pub fn scenario_profile() -> UserProfile {
    UserProfile {
        gender: Gender::Female,
        age: 32,
        height_cm: 160.0,
        weight_kg: 72.0,
        bmi_category: BmiCategory::Overweight,
        activity_level: ActivityLevel::Light,
        diet_type: DietType::Vegetarian,
        region: Region::new("north_indian"),
        goal: Goal::WeightLossOnly,
        medical_conditions: BTreeSet::new(),
        allergies: BTreeSet::new(),
    }
}
