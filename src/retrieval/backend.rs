// ABOUTME: Pluggable async embedding backend SPI and the remote HTTP implementation
// ABOUTME: Remote calls carry an explicit timeout; failures surface as typed errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ahara Health

//! # Embedding Backend
//!
//! The retriever does not embed text itself; it calls whatever backend the
//! host wires in through this trait. The shipped implementation posts to a
//! remote embedding service over HTTP. Any error (transport, timeout,
//! malformed response) comes back as [`AppError::EmbeddingBackend`], which
//! the retriever treats as "backend unavailable" and degrades past.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::RetrievalConfig;
use crate::errors::{AppError, AppResult};

/// Produces a dense vector for a piece of query text
#[async_trait]
pub trait EmbeddingBackend: Send + Sync {
    /// Backend identifier used in logs
    fn name(&self) -> &'static str;

    /// Embed one text; the returned vector's dimension must match the
    /// corpus embedding matrix for semantic retrieval to proceed
    async fn embed(&self, text: &str) -> AppResult<Vec<f32>>;
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    input: &'a str,
}

#[derive(Deserialize)]
struct EmbedResponse {
    embedding: Vec<f32>,
}

/// HTTP embedding backend posting `{"input": text}` to a configured endpoint
pub struct RemoteEmbeddingBackend {
    client: reqwest::Client,
    endpoint: String,
}

impl RemoteEmbeddingBackend {
    /// Build a backend with an explicit per-request timeout
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(AppError::backend)?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Build from retrieval configuration; `None` when no endpoint is set
    pub fn from_config(config: &RetrievalConfig) -> AppResult<Option<Self>> {
        match &config.embed_endpoint {
            Some(endpoint) => Ok(Some(Self::new(
                endpoint.clone(),
                Duration::from_secs(config.embed_timeout_secs),
            )?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl EmbeddingBackend for RemoteEmbeddingBackend {
    fn name(&self) -> &'static str {
        "remote_http"
    }

    async fn embed(&self, text: &str) -> AppResult<Vec<f32>> {
        debug!(endpoint = %self.endpoint, chars = text.len(), "Requesting embedding");
        let response = self
            .client
            .post(&self.endpoint)
            .json(&EmbedRequest { input: text })
            .send()
            .await
            .map_err(AppError::backend)?;

        if !response.status().is_success() {
            return Err(AppError::backend(format!(
                "embedding service returned {}",
                response.status()
            )));
        }

        let body: EmbedResponse = response.json().await.map_err(AppError::backend)?;
        if body.embedding.is_empty() {
            return Err(AppError::backend("embedding service returned an empty vector"));
        }
        Ok(body.embedding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_without_endpoint_is_none() {
        let config = RetrievalConfig::default();
        assert!(RemoteEmbeddingBackend::from_config(&config)
            .expect("builds")
            .is_none());
    }

    #[test]
    fn test_from_config_with_endpoint_builds() {
        let config = RetrievalConfig {
            embed_endpoint: Some("http://localhost:8089/embed".into()),
            ..RetrievalConfig::default()
        };
        let backend = RemoteEmbeddingBackend::from_config(&config).expect("builds");
        assert!(backend.is_some());
        assert_eq!(backend.map(|b| b.name()), Some("remote_http"));
    }
}
