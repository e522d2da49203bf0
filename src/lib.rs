// ABOUTME: Main library entry point for the ahara diet plan matching engine
// ABOUTME: Exact, goal-based, and semantic (RAG) plan matching over a pre-built corpus
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ahara Health

// deny(unsafe_code): the engine is pure data plumbing; nothing here needs unsafe
#![deny(unsafe_code)]

//! # Ahara Engine
//!
//! Matches a structured user health/diet profile against a fixed corpus of
//! pre-authored diet-plan documents and returns the best-fitting plans.
//!
//! ## Strategies
//!
//! - **Exact match**: hierarchical AND over all six categorical fields
//!   (category, region, diet, gender, BMI, activity); all-or-nothing.
//! - **Goal-only match**: relaxed admission on goal-derived category and
//!   region, ranked by a bounded soft score with age-adjusted calorie bands.
//! - **Semantic retrieval (RAG)**: embeds the profile and ranks plans by
//!   cosine similarity over precomputed document embeddings, with an
//!   automatic keyword-overlap fallback; the meal extractor turns retrieved
//!   plan text into grounding context for an external generation step.
//!
//! The corpus index is built externally, loaded once per process, and shared
//! read-only; all matching operations are pure over `(index, profile)` and
//! safe to run concurrently.
//!
//! ## Example
//!
//! ```rust,no_run
//! use ahara_engine::corpus::CorpusIndex;
//! use ahara_engine::errors::AppResult;
//! use ahara_engine::matching;
//!
//! # fn demo(profile: &ahara_engine::models::UserProfile) -> AppResult<()> {
//! let index = CorpusIndex::load("outputs/plan_index.json")?;
//! let exact = matching::filter_exact(profile, index.plans());
//! let ranked = matching::filter_and_score(profile, index.plans());
//! println!("{} exact, {} relaxed", exact.len(), ranked.len());
//! # Ok(())
//! # }
//! ```

/// Matcher configuration with validated defaults and environment overrides
pub mod config;

/// Policy constants and defaults for matching, scoring, and retrieval
pub mod constants;

/// Read-only corpus index of diet plan records
pub mod corpus;

/// Unified error handling with structured error types
pub mod errors;

/// Format-tolerant meal extraction from raw plan text
pub mod extractor;

/// User-facing goal vocabulary and the goal-to-category mapping
pub mod goals;

/// Logging configuration and structured tracing setup
pub mod logging;

/// Deterministic matching strategies (exact, goal-only, age adjustment)
pub mod matching;

/// Core data model: plans, profiles, match results
pub mod models;

/// Free-text attribute normalizers
pub mod normalize;

/// Meal cycle planner over selected plans
pub mod planner;

/// Semantic retriever with embedding backend SPI and keyword fallback
pub mod retrieval;

pub use config::MatcherConfig;
pub use corpus::CorpusIndex;
pub use errors::{AppError, AppResult};
pub use goals::Goal;
pub use models::{MatchResult, Plan, ScoredPlan, UserProfile};
