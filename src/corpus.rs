// ABOUTME: Read-only corpus index of diet plan records with optional embedding matrix
// ABOUTME: Loads the externally-built JSON snapshot, normalizes records, shares via Arc
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ahara Health

//! # Corpus Index
//!
//! The corpus-building pipeline (external to this crate) turns source
//! documents into a single JSON snapshot: a list of plan records plus an
//! optional parallel embedding matrix, one row per record. This module
//! loads that snapshot once, normalizes each record into a typed
//! [`Plan`], and exposes the result as an immutable, lock-free index.
//!
//! A record missing its category, region, or gender is skipped with a
//! warning rather than aborting the load; its embedding row (if any) is
//! dropped alongside it so the matrix stays aligned with the plan list.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, OnceLock};

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::errors::{AppError, AppResult};
use crate::models::{
    AgeRange, Gender, NutritionSummary, Plan, PlanCategory, Region,
};
use crate::normalize::{normalize_activity, normalize_bmi, normalize_diet};

/// Snapshot-level metadata carried by the index file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IndexMetadata {
    /// Version stamp written by the corpus builder
    #[serde(default)]
    pub version: Option<String>,
    /// When the snapshot was built
    #[serde(default)]
    pub built_at: Option<DateTime<Utc>>,
}

/// One plan record as written by the corpus builder, before normalization
#[derive(Debug, Clone, Deserialize)]
pub struct RawPlanRecord {
    /// Stable identifier (corpus-relative source path)
    #[serde(alias = "relative_path")]
    pub id: String,
    /// Source document filename
    #[serde(default, alias = "filename")]
    pub source: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub diet_type: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub bmi_category: Option<String>,
    #[serde(default, alias = "activity")]
    pub activity_level: Option<String>,
    #[serde(default)]
    pub age_range: AgeRange,
    #[serde(default)]
    pub nutrition: NutritionSummary,
    /// Raw extracted document text
    #[serde(default, alias = "content")]
    pub text: String,
}

/// On-disk index file shape
#[derive(Debug, Deserialize)]
pub struct IndexFile {
    #[serde(default)]
    pub metadata: IndexMetadata,
    pub plans: Vec<RawPlanRecord>,
    /// Optional embedding matrix, one row per entry in `plans`
    #[serde(default)]
    pub embeddings: Option<Vec<Vec<f32>>>,
}

/// Precomputed document embeddings aligned with the plan list
#[derive(Debug, Clone)]
pub struct EmbeddingMatrix {
    dim: usize,
    rows: Vec<Vec<f32>>,
}

impl EmbeddingMatrix {
    fn from_rows(rows: Vec<Vec<f32>>) -> AppResult<Self> {
        let dim = rows.first().map_or(0, Vec::len);
        if dim == 0 {
            return Err(AppError::EmbeddingMatrix("empty embedding rows".into()));
        }
        if let Some(bad) = rows.iter().position(|r| r.len() != dim) {
            return Err(AppError::EmbeddingMatrix(format!(
                "row {bad} has {} dims, expected {dim}",
                rows[bad].len()
            )));
        }
        Ok(Self { dim, rows })
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn row(&self, i: usize) -> Option<&[f32]> {
        self.rows.get(i).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Immutable, shareable corpus of normalized diet plans
#[derive(Debug)]
pub struct CorpusIndex {
    plans: Vec<Plan>,
    embeddings: Option<EmbeddingMatrix>,
    metadata: IndexMetadata,
}

static GLOBAL_INDEX: OnceLock<Arc<CorpusIndex>> = OnceLock::new();

impl CorpusIndex {
    /// Load and normalize an index snapshot from a JSON file
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| AppError::IndexIo {
            path: path.display().to_string(),
            source,
        })?;
        let file: IndexFile = serde_json::from_str(&raw)?;
        let index = Self::from_file(file)?;
        info!(
            plans = index.len(),
            embedded = index.embeddings.is_some(),
            "Loaded corpus index from {}",
            path.display()
        );
        Ok(index)
    }

    /// Build an index from an already-parsed snapshot
    pub fn from_file(file: IndexFile) -> AppResult<Self> {
        if let Some(rows) = &file.embeddings {
            if rows.len() != file.plans.len() {
                return Err(AppError::EmbeddingMatrix(format!(
                    "{} embedding rows for {} plans",
                    rows.len(),
                    file.plans.len()
                )));
            }
        }

        let mut plans = Vec::with_capacity(file.plans.len());
        let mut kept_rows = Vec::new();
        let mut skipped = 0usize;

        for (i, record) in file.plans.into_iter().enumerate() {
            match normalize_record(record) {
                Some(plan) => {
                    plans.push(plan);
                    if let Some(rows) = &file.embeddings {
                        kept_rows.push(rows[i].clone());
                    }
                }
                None => skipped += 1,
            }
        }

        if skipped > 0 {
            warn!(skipped, kept = plans.len(), "Skipped malformed plan records");
        }

        let embeddings = if kept_rows.is_empty() {
            None
        } else {
            Some(EmbeddingMatrix::from_rows(kept_rows)?)
        };

        Ok(Self {
            plans,
            embeddings,
            metadata: file.metadata,
        })
    }

    /// Build an index directly from typed plans (used by tests and callers
    /// that assemble corpora in memory)
    pub fn from_plans(plans: Vec<Plan>) -> Self {
        Self {
            plans,
            embeddings: None,
            metadata: IndexMetadata::default(),
        }
    }

    /// Attach an embedding matrix to an in-memory index
    pub fn with_embeddings(mut self, rows: Vec<Vec<f32>>) -> AppResult<Self> {
        if rows.len() != self.plans.len() {
            return Err(AppError::EmbeddingMatrix(format!(
                "{} embedding rows for {} plans",
                rows.len(),
                self.plans.len()
            )));
        }
        self.embeddings = Some(EmbeddingMatrix::from_rows(rows)?);
        Ok(self)
    }

    /// Install this index as the process-wide singleton. Returns `false`
    /// when a singleton was already installed (the first install wins; the
    /// index is never rebuilt mid-process).
    pub fn install_global(self: Arc<Self>) -> bool {
        GLOBAL_INDEX.set(self).is_ok()
    }

    /// The process-wide singleton, when one has been installed
    pub fn global() -> Option<Arc<Self>> {
        GLOBAL_INDEX.get().cloned()
    }

    pub fn plans(&self) -> &[Plan] {
        &self.plans
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }

    pub fn metadata(&self) -> &IndexMetadata {
        &self.metadata
    }

    pub fn embeddings(&self) -> Option<&EmbeddingMatrix> {
        self.embeddings.as_ref()
    }

    /// Look up a plan by its stable identifier
    pub fn plan_by_id(&self, id: &str) -> Option<&Plan> {
        self.plans.iter().find(|p| p.id == id)
    }

    /// Case-insensitive keyword search over id, title, category, and text
    pub fn search_by_keyword(&self, keyword: &str) -> Vec<&Plan> {
        let needle = keyword.to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.plans
            .iter()
            .filter(|p| {
                p.id.to_lowercase().contains(&needle)
                    || p.title.to_lowercase().contains(&needle)
                    || p.category.as_str().contains(&needle)
                    || p.text.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Plan counts per category
    pub fn category_stats(&self) -> BTreeMap<&'static str, usize> {
        let mut stats = BTreeMap::new();
        for plan in &self.plans {
            *stats.entry(plan.category.as_str()).or_insert(0) += 1;
        }
        stats
    }
}

/// Normalize one raw record into a typed plan. Returns `None` (and logs)
/// when a required categorical field is missing or unrecognizable.
fn normalize_record(record: RawPlanRecord) -> Option<Plan> {
    let id = record.id;
    if id.is_empty() {
        warn!("Dropping plan record with empty id");
        return None;
    }

    let category = match record.category.as_deref().and_then(PlanCategory::parse) {
        Some(c) => c,
        None => {
            warn!(plan = %id, raw = ?record.category, "Dropping plan with unrecognized category");
            return None;
        }
    };
    let region = match record.region.as_deref().map(Region::new) {
        Some(r) if !r.is_empty() => r,
        _ => {
            warn!(plan = %id, "Dropping plan without a region");
            return None;
        }
    };
    let gender = match record.gender.as_deref().and_then(Gender::parse) {
        Some(g) => g,
        None => {
            warn!(plan = %id, raw = ?record.gender, "Dropping plan with unrecognized gender");
            return None;
        }
    };

    // Diet defaults to vegetarian (normalizer policy); BMI and activity stay
    // unknown when unrecognizable and simply never match.
    let diet_type = normalize_diet(record.diet_type.as_deref().unwrap_or_default());
    let bmi_category = record.bmi_category.as_deref().and_then(normalize_bmi);
    let activity_level = record.activity_level.as_deref().and_then(normalize_activity);
    if bmi_category.is_none() || activity_level.is_none() {
        debug!(plan = %id, "Plan has unknown BMI or activity metadata; exact matching excluded");
    }

    Some(Plan {
        id,
        source: record.source,
        title: record.title,
        category,
        region,
        diet_type,
        gender,
        bmi_category,
        activity_level,
        age_range: record.age_range,
        nutrition: record.nutrition,
        text: record.text,
    })
}
