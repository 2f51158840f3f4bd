use super::store::GraphStore;
use super::types::{ReviewSummary, Reviewer};
use crate::error::ApiError;

use std::sync::Arc;

/// Runs the fixed review queries and applies their NotFound policy.
pub struct ReviewGateway {
    store: Arc<dyn GraphStore>,
}

impl ReviewGateway {
    pub fn new(store: Arc<dyn GraphStore>) -> Self {
        Self { store }
    }

    pub async fn users_who_reviewed(&self, title: &str) -> Result<Vec<Reviewer>, ApiError> {
        let reviewers = self.store.reviewers_of(title).await?;
        if reviewers.is_empty() {
            tracing::warn!("No reviewers found for '{}'", title);
            return Err(ApiError::NotFound(format!(
                "Users who rated movie '{}' not found",
                title
            )));
        }
        tracing::debug!("Found {} reviewers for '{}'", reviewers.len(), title);
        Ok(reviewers)
    }

    /// NotFound only when the graph returns no aggregate row; a known person without
    /// reviews comes back with `count = 0`.
    pub async fn movies_reviewed_by(&self, name: &str) -> Result<ReviewSummary, ApiError> {
        self.store.reviewed_by(name).await?.ok_or_else(|| {
            ApiError::NotFound(format!("Movies rated by user '{}' not found", name))
        })
    }
}
