// ABOUTME: Semantic retriever - cosine search over precomputed plan embeddings
// ABOUTME: Degrades automatically to keyword-overlap similarity when embeddings are unavailable
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ahara Health

//! # Semantic Retriever
//!
//! Renders a profile into a canonical query text, embeds it through a
//! pluggable [`EmbeddingBackend`], and ranks corpus plans by cosine
//! similarity against the index's precomputed embedding matrix.
//!
//! Degradation is automatic and silent to the caller: when no matrix was
//! loaded, the backend errors out, or the query vector's dimension does not
//! match the matrix, retrieval falls back to keyword-overlap similarity
//! (shared normalized tokens, min-max scaled). The fallback is logged once
//! per process lifetime, not per request.

pub mod backend;

use std::collections::BTreeSet;
use std::sync::Once;

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::corpus::CorpusIndex;
use crate::models::{ScoredPlan, UserProfile};

pub use backend::{EmbeddingBackend, RemoteEmbeddingBackend};

static FALLBACK_LOGGED: Once = Once::new();

fn log_fallback_once(reason: &str) {
    FALLBACK_LOGGED.call_once(|| {
        warn!(reason, "Embedding backend unavailable; using keyword-overlap retrieval");
    });
}

/// Render a profile into the canonical embedding query text.
///
/// Field order is fixed (gender, diet, region, goal, BMI, activity, then
/// conditions) so the same profile always embeds to the same vector.
pub fn profile_to_query_text(profile: &UserProfile) -> String {
    let mut parts = vec![
        profile.gender.as_str().to_owned(),
        profile.diet_type.as_str().replace('_', " "),
        profile.region.as_str().replace('_', " "),
        profile.goal.as_str().replace('_', " "),
        profile.bmi_category.as_str().to_owned(),
        format!("{} activity", profile.activity_level.as_str()),
    ];
    // BTreeSet keeps condition order stable across calls
    parts.extend(profile.medical_conditions.iter().map(|c| c.to_lowercase()));
    parts.join(" ")
}

/// Retrieve the `top_k` most similar plans for a profile.
///
/// Semantic path when the index carries embeddings and the backend yields a
/// dimension-compatible vector; keyword fallback otherwise. Results are
/// sorted by strictly non-increasing similarity with an ascending plan-id
/// tie-break, and never exceed `top_k`.
pub async fn retrieve<'a>(
    profile: &UserProfile,
    index: &'a CorpusIndex,
    backend: &dyn EmbeddingBackend,
    top_k: usize,
) -> Vec<ScoredPlan<'a>> {
    let query = profile_to_query_text(profile);

    let Some(matrix) = index.embeddings() else {
        log_fallback_once("index has no embedding matrix");
        return keyword_retrieve_text(&query, index, top_k);
    };

    match backend.embed(&query).await {
        Ok(vector) if vector.len() == matrix.dim() => {
            debug!(backend = backend.name(), dim = matrix.dim(), "Semantic retrieval");
            rank_by_similarity(index, |i| {
                matrix.row(i).map_or(0.0, |row| cosine(&vector, row))
            })
            .into_iter()
            .take(top_k)
            .collect()
        }
        Ok(vector) => {
            log_fallback_once("query embedding dimension does not match the corpus matrix");
            debug!(
                got = vector.len(),
                expected = matrix.dim(),
                "Query vector dimension mismatch"
            );
            keyword_retrieve_text(&query, index, top_k)
        }
        Err(err) => {
            log_fallback_once("embedding backend error");
            debug!(backend = backend.name(), error = %err, "Embedding call failed");
            keyword_retrieve_text(&query, index, top_k)
        }
    }
}

/// [`retrieve`] with the configured default result count
pub async fn retrieve_default<'a>(
    profile: &UserProfile,
    index: &'a CorpusIndex,
    backend: &dyn EmbeddingBackend,
) -> Vec<ScoredPlan<'a>> {
    let top_k = crate::config::MatcherConfig::global().retrieval.default_top_k;
    retrieve(profile, index, backend, top_k).await
}

/// Keyword-overlap retrieval for callers with no embedding backend at all
pub fn keyword_retrieve<'a>(
    profile: &UserProfile,
    index: &'a CorpusIndex,
    top_k: usize,
) -> Vec<ScoredPlan<'a>> {
    keyword_retrieve_text(&profile_to_query_text(profile), index, top_k)
}

fn keyword_retrieve_text<'a>(
    query: &str,
    index: &'a CorpusIndex,
    top_k: usize,
) -> Vec<ScoredPlan<'a>> {
    let query_tokens = tokenize(query);
    if query_tokens.is_empty() || index.is_empty() {
        return Vec::new();
    }

    let overlaps: Vec<usize> = index
        .plans()
        .par_iter()
        .map(|plan| {
            let haystack = tokenize(&format!(
                "{} {} {} {}",
                plan.title,
                plan.category.as_str().replace('_', " "),
                plan.region.as_str().replace('_', " "),
                plan.text
            ));
            query_tokens.intersection(&haystack).count()
        })
        .collect();

    let max = overlaps.iter().copied().max().unwrap_or(0);
    let min = overlaps.iter().copied().min().unwrap_or(0);
    let scale = |count: usize| -> f32 {
        if max == min {
            if max == 0 {
                0.0
            } else {
                1.0
            }
        } else {
            (count - min) as f32 / (max - min) as f32
        }
    };

    let mut scored: Vec<ScoredPlan<'a>> = index
        .plans()
        .iter()
        .zip(overlaps)
        .map(|(plan, count)| ScoredPlan {
            plan,
            similarity: scale(count),
        })
        .collect();
    sort_scored(&mut scored);
    scored.truncate(top_k);
    scored
}

fn rank_by_similarity<'a, F>(index: &'a CorpusIndex, similarity: F) -> Vec<ScoredPlan<'a>>
where
    F: Fn(usize) -> f32 + Sync,
{
    let mut scored: Vec<ScoredPlan<'a>> = index
        .plans()
        .par_iter()
        .enumerate()
        .map(|(i, plan)| ScoredPlan {
            plan,
            similarity: similarity(i),
        })
        .collect();
    sort_scored(&mut scored);
    scored
}

fn sort_scored(scored: &mut [ScoredPlan<'_>]) {
    scored.sort_by(|a, b| {
        b.similarity
            .total_cmp(&a.similarity)
            .then_with(|| a.plan.id.cmp(&b.plan.id))
    });
}

/// Lowercased alphanumeric tokens, deduplicated
fn tokenize(text: &str) -> BTreeSet<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Cosine similarity; zero when either vector has zero magnitude
fn cosine(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}
