// ABOUTME: Format-tolerant meal extractor over raw plan text
// ABOUTME: Ordered header matchers pull meal/option/ingredient structure for generation grounding
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ahara Health

//! # Meal Extractor
//!
//! Plan documents were authored over several format generations, so meal
//! content appears under many header shapes: `Option 1: Poha`,
//! `Option 2 – Upma`, `Option -3 Dish – Masala Oats`, single-dish sections
//! (`Dish Name: Khichdi`), and time-annotated meal headers
//! (`Breakfast (8:00 AM)`). Extraction runs an ordered list of matchers
//! rather than one monolithic pattern; a section none of them understand
//! yields an empty options list for that meal and extraction moves on.
//!
//! The output feeds an external generation step as grounding context. Every
//! meal surfaced traces back to extracted source text — the formatter never
//! invents content.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::constants::meals::GROUNDING_OPTIONS_PER_SLOT;
use crate::models::Plan;

/// Canonical meal slot in daily order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    EarlyMorning,
    PreActivity,
    Breakfast,
    MidMorningSnack,
    Lunch,
    EveningSnack,
    Dinner,
    Bedtime,
}

impl MealType {
    /// All slots in daily order
    pub const ALL: [Self; 8] = [
        Self::EarlyMorning,
        Self::PreActivity,
        Self::Breakfast,
        Self::MidMorningSnack,
        Self::Lunch,
        Self::EveningSnack,
        Self::Dinner,
        Self::Bedtime,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EarlyMorning => "early_morning",
            Self::PreActivity => "pre_activity",
            Self::Breakfast => "breakfast",
            Self::MidMorningSnack => "mid_morning_snack",
            Self::Lunch => "lunch",
            Self::EveningSnack => "evening_snack",
            Self::Dinner => "dinner",
            Self::Bedtime => "bedtime",
        }
    }

    /// Human-readable label for rendered output
    pub const fn label(self) -> &'static str {
        match self {
            Self::EarlyMorning => "Early Morning",
            Self::PreActivity => "Pre-Activity",
            Self::Breakfast => "Breakfast",
            Self::MidMorningSnack => "Mid-Morning Snack",
            Self::Lunch => "Lunch",
            Self::EveningSnack => "Evening Snack",
            Self::Dinner => "Dinner",
            Self::Bedtime => "Bedtime",
        }
    }

    /// Lowercase header spellings this slot answers to, longest first so
    /// "mid-morning snack" wins over "mid-morning"
    const fn header_aliases(self) -> &'static [&'static str] {
        match self {
            Self::EarlyMorning => &["early morning"],
            Self::PreActivity => &[
                "pre-workout",
                "pre workout",
                "pre-yoga / light activity",
                "pre-activity",
                "pre activity",
                "pre-breakfast",
            ],
            Self::Breakfast => &["breakfast"],
            Self::MidMorningSnack => &["mid-morning snack", "mid morning snack", "mid-morning", "mid morning"],
            Self::Lunch => &["lunch"],
            Self::EveningSnack => &["evening snack", "evening"],
            Self::Dinner => &["dinner"],
            Self::Bedtime => &["bedtime snack", "bedtime"],
        }
    }
}

/// Per-option nutrition parsed from a "Nutritive Values" line
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct OptionNutrition {
    pub calories_kcal: Option<u32>,
    pub protein_g: Option<u32>,
    pub carbs_g: Option<u32>,
    pub fat_g: Option<f32>,
    pub fiber_g: Option<u32>,
}

impl OptionNutrition {
    fn is_empty(&self) -> bool {
        self.calories_kcal.is_none()
            && self.protein_g.is_none()
            && self.carbs_g.is_none()
            && self.fat_g.is_none()
            && self.fiber_g.is_none()
    }
}

/// One dish option within a meal section
#[derive(Debug, Clone, Serialize)]
pub struct MealOption {
    pub number: u32,
    pub name: String,
    /// Comma-separated ingredient entries as authored
    pub ingredients: Vec<String>,
    pub serving: Option<String>,
    pub nutrition: Option<OptionNutrition>,
}

/// One extracted meal section: slot plus its options, in document order
#[derive(Debug, Clone, Serialize)]
pub struct ExtractedMeal {
    pub meal_type: MealType,
    /// Options as authored; empty when the section could not be parsed
    pub options: Vec<MealOption>,
}

fn option_header_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // "Option 1: Poha" / "Option 2 – Upma" / "Option -3 Dish – Masala Oats"
    RE.get_or_init(|| {
        Regex::new(r"(?i)^option\s*[:\-–—]?\s*(\d+)\s*(?:dish\s*)?[:\-–—]\s*(.+)$")
            .unwrap_or_else(|e| unreachable!("option header pattern: {e}"))
    })
}

fn dish_header_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^dish(?:\s*name)?:\s*(.+)$")
            .unwrap_or_else(|e| unreachable!("dish header pattern: {e}"))
    })
}

fn ingredients_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // "Ingredients:", "Ingredients with Quantities:", "... & Units:"
    RE.get_or_init(|| {
        Regex::new(r"(?i)^ingredients?(?:\s+with\s+quantities(?:\s*&\s*units)?)?:\s*(.+)$")
            .unwrap_or_else(|e| unreachable!("ingredients pattern: {e}"))
    })
}

fn serving_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^servings?(?:\s+size)?:\s*(.+)$")
            .unwrap_or_else(|e| unreachable!("serving pattern: {e}"))
    })
}

fn nutritive_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^nutritive\s+values?:\s*(.*)$")
            .unwrap_or_else(|e| unreachable!("nutritive pattern: {e}"))
    })
}

/// Extract all recognizable meal sections from a plan's raw text, in
/// document order. Never fails: unparseable sections surface as meals with
/// empty option lists, unrecognizable documents as an empty vector.
pub fn extract_meals(text: &str) -> Vec<ExtractedMeal> {
    let lines: Vec<&str> = text.lines().collect();

    // Locate meal headers; first occurrence per slot wins
    let mut headers: Vec<(usize, MealType)> = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        if is_section_terminator(line) {
            break;
        }
        if let Some(meal_type) = classify_header(line) {
            if !headers.iter().any(|(_, t)| *t == meal_type) {
                headers.push((i, meal_type));
            }
        }
    }

    let mut meals = Vec::with_capacity(headers.len());
    for (idx, &(start, meal_type)) in headers.iter().enumerate() {
        let end = headers
            .get(idx + 1)
            .map_or(lines.len(), |&(next_start, _)| next_start);
        let section = &lines[start + 1..end.min(terminator_bound(&lines, start, end))];
        let options = parse_options(section);
        if options.is_empty() {
            debug!(meal = meal_type.as_str(), "No parseable options in meal section");
        }
        meals.push(ExtractedMeal { meal_type, options });
    }
    meals
}

fn terminator_bound(lines: &[&str], start: usize, end: usize) -> usize {
    lines[start..end]
        .iter()
        .position(|line| is_section_terminator(line))
        .map_or(end, |offset| start + offset)
}

fn is_section_terminator(line: &str) -> bool {
    line.trim().to_lowercase().starts_with("dietary & cultural context")
}

/// Classify a line as a meal header, accepting the shapes
/// `Meal Type: Lunch`, `Lunch Options`, `Lunch (1:00 PM)`, `Lunch:`, and a
/// standalone `Lunch`
fn classify_header(line: &str) -> Option<MealType> {
    let folded = line.trim().to_lowercase();
    if folded.is_empty() {
        return None;
    }
    let folded = folded
        .strip_prefix("meal type:")
        .map(str::trim_start)
        .unwrap_or(&folded);

    for meal_type in MealType::ALL {
        for alias in meal_type.header_aliases() {
            if let Some(rest) = folded.strip_prefix(alias) {
                let is_header = rest.is_empty()
                    || rest.starts_with(':')
                    || rest.starts_with(" options")
                    || rest.starts_with(" (");
                if is_header {
                    return Some(meal_type);
                }
            }
        }
    }
    None
}

fn parse_options(section: &[&str]) -> Vec<MealOption> {
    let mut options: Vec<MealOption> = Vec::new();

    for line in section {
        let line = line.trim();
        if let Some(caps) = option_header_re().captures(line) {
            let number = caps[1].parse().unwrap_or(options.len() as u32 + 1);
            options.push(MealOption {
                number,
                name: caps[2].trim().to_owned(),
                ingredients: Vec::new(),
                serving: None,
                nutrition: None,
            });
            continue;
        }
        if options.is_empty() {
            // Single-dish sections have no "Option N" markers
            if let Some(caps) = dish_header_re().captures(line) {
                options.push(MealOption {
                    number: 1,
                    name: caps[1].trim().to_owned(),
                    ingredients: Vec::new(),
                    serving: None,
                    nutrition: None,
                });
            }
            continue;
        }

        let Some(current) = options.last_mut() else {
            continue;
        };
        if let Some(caps) = ingredients_re().captures(line) {
            current.ingredients = caps[1]
                .split(',')
                .map(|i| i.trim().to_owned())
                .filter(|i| !i.is_empty())
                .collect();
        } else if let Some(caps) = serving_re().captures(line) {
            current.serving = Some(caps[1].trim().to_owned());
        } else if let Some(caps) = nutritive_re().captures(line) {
            // May be a bare "Nutritive Values:" marker with figures below
            current.nutrition = Some(parse_nutrition(&caps[1]));
        } else if let Some(nutrition) = current.nutrition.as_mut() {
            if nutrition.is_empty() {
                let parsed = parse_nutrition(line);
                if !parsed.is_empty() {
                    *nutrition = parsed;
                }
            }
        }
    }

    for option in &mut options {
        if option.nutrition.is_some_and(|n| n.is_empty()) {
            option.nutrition = None;
        }
    }
    options
}

/// Parse nutrition figures from either authored format:
/// `280 kcal, 22 g protein, 25 g carbs, 8 g fat` or
/// `Calories: 280 kcal | Protein: 22 g | Carbs: 25 g`
fn parse_nutrition(text: &str) -> OptionNutrition {
    fn first_number(text: &str, patterns: &[&str]) -> Option<u32> {
        patterns.iter().find_map(|p| {
            Regex::new(p)
                .ok()
                .and_then(|re| re.captures(text))
                .and_then(|caps| caps[1].parse().ok())
        })
    }

    let fat = [r"(?i)(\d+(?:\.\d+)?)\s*g\s+fat", r"(?i)fat:?\s*(\d+(?:\.\d+)?)\s*g"]
        .iter()
        .find_map(|p| {
            Regex::new(p)
                .ok()
                .and_then(|re| re.captures(text))
                .and_then(|caps| caps[1].parse().ok())
        });

    OptionNutrition {
        calories_kcal: first_number(text, &[r"(?i)(\d+)\s*kcal"]),
        protein_g: first_number(
            text,
            &[r"(?i)(\d+)\s*g\s+protein", r"(?i)protein:?\s*(\d+)\s*g"],
        ),
        carbs_g: first_number(text, &[r"(?i)(\d+)\s*g\s+carb", r"(?i)carbs?:?\s*(\d+)\s*g"]),
        fat_g: fat,
        fiber_g: first_number(text, &[r"(?i)(\d+)\s*g\s+fiber", r"(?i)fiber:?\s*(\d+)\s*g"]),
    }
}

/// Render a plan's extracted meals into the grounding context consumed by
/// the external generation step. Options are capped per slot; only
/// extracted content appears, never fabricated dishes.
pub fn grounding_context(plan: &Plan) -> String {
    let meals = extract_meals(&plan.text);
    let mut out = String::new();
    out.push_str(&format!(
        "Plan: {} [{} | {} | {}]\n",
        if plan.title.is_empty() { &plan.id } else { &plan.title },
        plan.category.as_str(),
        plan.region.as_str(),
        plan.diet_type.as_str(),
    ));

    for meal in &meals {
        if meal.options.is_empty() {
            continue;
        }
        out.push_str(&format!("\n{}:\n", meal.meal_type.label()));
        for option in meal.options.iter().take(GROUNDING_OPTIONS_PER_SLOT) {
            out.push_str(&format!("- {}", option.name));
            if !option.ingredients.is_empty() {
                out.push_str(&format!(" (ingredients: {})", option.ingredients.join(", ")));
            }
            if let Some(serving) = &option.serving {
                out.push_str(&format!(" [serving: {serving}]"));
            }
            if let Some(kcal) = option.nutrition.and_then(|n| n.calories_kcal) {
                out.push_str(&format!(" ~{kcal} kcal"));
            }
            out.push('\n');
        }
    }
    out
}
