//! Neo4j Graph Store
//!
//! Runs the review queries over Bolt through the `neo4rs` driver. The driver owns the
//! connection pool; each call is a single auto-committed statement and failures propagate
//! immediately, there is no retry.

use super::cypher::{MOVIES_REVIEWED_BY, REVIEWERS_OF_MOVIE, TITLES_AMONG};
use super::store::GraphStore;
use super::types::{PropertyMap, ReviewSummary, Reviewer};
use crate::config::GraphSettings;

use anyhow::Result;
use async_trait::async_trait;
use neo4rs::{ConfigBuilder, Graph, Row, query};
use std::collections::HashSet;

pub struct Neo4jGraphStore {
    graph: Graph,
}

/// Driver configuration for the graph. The URI is handed to the driver as configured.
pub fn graph_config(settings: &GraphSettings<'_>) -> Result<neo4rs::Config> {
    Ok(ConfigBuilder::default()
        .uri(settings.uri)
        .user(settings.username)
        .password(settings.password)
        .db(settings.database)
        .build()?)
}

fn decode_reviewer(row: &Row) -> Result<Reviewer> {
    let properties: PropertyMap = row.get("p")?;
    Ok(Reviewer { properties })
}

fn decode_summary(row: &Row) -> Result<ReviewSummary> {
    let user: String = row.get("user")?;
    let count: i64 = row.get("count")?;
    let movies: Vec<PropertyMap> = row.get("movies")?;
    Ok(ReviewSummary {
        user,
        count: u64::try_from(count)?,
        movies,
    })
}

impl Neo4jGraphStore {
    pub async fn connect(settings: &GraphSettings<'_>) -> Result<Self> {
        let graph = Graph::connect(graph_config(settings)?).await?;
        tracing::info!(
            "Neo4j store bound to {} (database {})",
            settings.uri,
            settings.database
        );
        Ok(Self { graph })
    }
}

#[async_trait]
impl GraphStore for Neo4jGraphStore {
    async fn reviewers_of(&self, title: &str) -> Result<Vec<Reviewer>> {
        let q = query(REVIEWERS_OF_MOVIE).param("title", title);
        let mut stream = self.graph.execute(q).await?;

        let mut reviewers = Vec::new();
        while let Some(row) = stream.next().await? {
            reviewers.push(decode_reviewer(&row)?);
        }
        Ok(reviewers)
    }

    async fn reviewed_by(&self, name: &str) -> Result<Option<ReviewSummary>> {
        let q = query(MOVIES_REVIEWED_BY).param("name", name);
        let mut stream = self.graph.execute(q).await?;

        match stream.next().await? {
            Some(row) => Ok(Some(decode_summary(&row)?)),
            None => Ok(None),
        }
    }

    async fn titles_among(&self, titles: &[String]) -> Result<HashSet<String>> {
        let q = query(TITLES_AMONG).param("titles", titles.to_vec());
        let mut stream = self.graph.execute(q).await?;

        let mut found = HashSet::new();
        while let Some(row) = stream.next().await? {
            let title: String = row.get("title")?;
            found.insert(title);
        }
        Ok(found)
    }
}
