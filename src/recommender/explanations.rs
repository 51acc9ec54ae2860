//! Natural-language explanation cache, keyed by security pattern id.

use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::api::RecSecBackend;
use crate::error::ApiError;
use crate::model::SecurityPatternRecommendation;

/// Each pattern is explained at most once per cache. Failures are not cached.
#[derive(Default)]
pub struct ExplanationCache {
    entries: RwLock<HashMap<i64, String>>,
}

impl ExplanationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Explanation for the recommendation's pattern, fetched on first use.
    pub async fn explain(
        &self,
        backend: &dyn RecSecBackend,
        recommendation: &SecurityPatternRecommendation,
    ) -> Result<String, ApiError> {
        let pattern = &recommendation.security_pattern;
        if let Some(cached) = self.get(pattern.id).await {
            tracing::debug!(pattern_id = pattern.id, "Explanation served from cache");
            return Ok(cached);
        }

        let text = backend
            .natural_language_explanation(pattern, &recommendation.explanations)
            .await?;
        self.entries.write().await.insert(pattern.id, text.clone());
        Ok(text)
    }

    pub async fn get(&self, pattern_id: i64) -> Option<String> {
        self.entries.read().await.get(&pattern_id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }
}
