use super::types::{ReviewSummary, Reviewer};

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashSet;

/// Read-only queries against the `(:Person)-[:REVIEWED]->(:Movie)` graph.
///
/// Lookups match `title` and `name` exactly.
#[async_trait]
pub trait GraphStore: Send + Sync {
    async fn reviewers_of(&self, title: &str) -> Result<Vec<Reviewer>>;

    /// `None` when the graph yields no aggregate row for `name`.
    async fn reviewed_by(&self, name: &str) -> Result<Option<ReviewSummary>>;

    /// The subset of `titles` that exist as Movie nodes.
    async fn titles_among(&self, titles: &[String]) -> Result<HashSet<String>>;
}
