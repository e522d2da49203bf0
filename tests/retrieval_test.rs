// ABOUTME: Integration tests for semantic retrieval and its keyword fallback
// ABOUTME: Uses a stub embedding backend to exercise both the happy path and degradation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ahara Health

mod common;

use async_trait::async_trait;

use ahara_engine::corpus::CorpusIndex;
use ahara_engine::errors::{AppError, AppResult};
use ahara_engine::models::{Plan, PlanCategory};
use ahara_engine::retrieval::{self, EmbeddingBackend};

use common::{init_test_logging, matching_plan, scenario_profile};

/// Backend returning a fixed vector, or failing on demand
struct StubBackend {
    vector: Vec<f32>,
    fail: bool,
}

#[async_trait]
impl EmbeddingBackend for StubBackend {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn embed(&self, _text: &str) -> AppResult<Vec<f32>> {
        if self.fail {
            Err(AppError::backend("stub backend down"))
        } else {
            Ok(self.vector.clone())
        }
    }
}

fn embedded_corpus() -> CorpusIndex {
    let plans: Vec<Plan> = vec![
        matching_plan("closest", PlanCategory::WeightLoss),
        matching_plan("middling", PlanCategory::WeightLoss),
        matching_plan("farthest", PlanCategory::GutDetox),
    ];
    CorpusIndex::from_plans(plans)
        .with_embeddings(vec![
            vec![1.0, 0.0],
            vec![0.7, 0.7],
            vec![0.0, 1.0],
        ])
        .expect("aligned matrix")
}

#[tokio::test]
async fn test_semantic_ranking_follows_cosine_similarity() {
    init_test_logging();
    let index = embedded_corpus();
    let backend = StubBackend {
        vector: vec![1.0, 0.0],
        fail: false,
    };
    let results = retrieval::retrieve(&scenario_profile(), &index, &backend, 3).await;
    let ids: Vec<&str> = results.iter().map(|r| r.plan.id.as_str()).collect();
    assert_eq!(ids, vec!["closest", "middling", "farthest"]);
    for pair in results.windows(2) {
        assert!(pair[0].similarity >= pair[1].similarity);
    }
}

#[tokio::test]
async fn test_top_k_five_returns_exactly_five_non_increasing() {
    init_test_logging();
    let plans: Vec<Plan> = (0..8)
        .map(|i| matching_plan(&format!("p{i}"), PlanCategory::WeightLoss))
        .collect();
    let rows: Vec<Vec<f32>> = (0..8).map(|i| vec![1.0, i as f32 * 0.1]).collect();
    let index = CorpusIndex::from_plans(plans)
        .with_embeddings(rows)
        .expect("aligned matrix");
    let backend = StubBackend {
        vector: vec![1.0, 0.0],
        fail: false,
    };
    let results = retrieval::retrieve(&scenario_profile(), &index, &backend, 5).await;
    assert_eq!(results.len(), 5);
    for pair in results.windows(2) {
        assert!(pair[0].similarity >= pair[1].similarity);
    }
}

#[tokio::test]
async fn test_backend_failure_degrades_to_keyword_fallback() {
    init_test_logging();
    let mut relevant = matching_plan("relevant", PlanCategory::WeightLoss);
    relevant.text = "vegetarian weight loss plan for overweight female, light activity".into();
    let mut irrelevant = matching_plan("irrelevant", PlanCategory::GutDetox);
    irrelevant.text = "millet khichdi with buttermilk".into();
    let index = CorpusIndex::from_plans(vec![irrelevant, relevant])
        .with_embeddings(vec![vec![1.0, 0.0], vec![0.0, 1.0]])
        .expect("aligned matrix");

    let backend = StubBackend {
        vector: vec![],
        fail: true,
    };
    let results = retrieval::retrieve(&scenario_profile(), &index, &backend, 2).await;
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].plan.id, "relevant");
}

#[tokio::test]
async fn test_dimension_mismatch_degrades_instead_of_failing() {
    init_test_logging();
    let index = embedded_corpus();
    let backend = StubBackend {
        vector: vec![1.0, 0.0, 0.0, 0.0], // corpus matrix is 2-dimensional
        fail: false,
    };
    let results = retrieval::retrieve(&scenario_profile(), &index, &backend, 3).await;
    assert_eq!(results.len(), 3);
}

#[tokio::test]
async fn test_index_without_embeddings_uses_fallback() {
    init_test_logging();
    let index = CorpusIndex::from_plans(vec![matching_plan("only", PlanCategory::WeightLoss)]);
    let backend = StubBackend {
        vector: vec![1.0, 0.0],
        fail: false,
    };
    let results = retrieval::retrieve(&scenario_profile(), &index, &backend, 5).await;
    assert_eq!(results.len(), 1);
}

#[test]
fn test_query_text_is_reproducible_across_calls() {
    init_test_logging();
    let profile = scenario_profile();
    assert_eq!(
        retrieval::profile_to_query_text(&profile),
        retrieval::profile_to_query_text(&profile)
    );
}
