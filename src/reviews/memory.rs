use super::store::GraphStore;
use super::types::{PropertyMap, ReviewSummary, Reviewer};

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use std::collections::HashSet;

/// In-process review graph.
///
/// People are keyed by `name`, movies by `title`, and REVIEWED edges are kept as an
/// adjacency list from person name to movie titles.
pub struct InMemoryGraphStore {
    people: DashMap<String, PropertyMap>,
    movies: DashMap<String, PropertyMap>,
    reviewed: DashMap<String, Vec<String>>,
}

impl InMemoryGraphStore {
    pub fn new() -> Self {
        Self {
            people: DashMap::new(),
            movies: DashMap::new(),
            reviewed: DashMap::new(),
        }
    }

    /// Adds or replaces a Person node; `name` is written into its properties.
    pub fn add_person(&self, name: &str, mut properties: PropertyMap) {
        properties.insert("name".to_string(), Value::String(name.to_string()));
        self.people.insert(name.to_string(), properties);
    }

    /// Adds or replaces a Movie node; `title` is written into its properties.
    pub fn add_movie(&self, title: &str, mut properties: PropertyMap) {
        properties.insert("title".to_string(), Value::String(title.to_string()));
        self.movies.insert(title.to_string(), properties);
    }

    /// Connects an existing person to an existing movie.
    pub fn add_review(&self, name: &str, title: &str) -> Result<()> {
        if !self.people.contains_key(name) {
            return Err(anyhow!("no Person named '{}'", name));
        }
        if !self.movies.contains_key(title) {
            return Err(anyhow!("no Movie titled '{}'", title));
        }

        let mut titles = self.reviewed.entry(name.to_string()).or_default();
        if !titles.iter().any(|t| t == title) {
            titles.push(title.to_string());
        }
        Ok(())
    }
}

impl Default for InMemoryGraphStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GraphStore for InMemoryGraphStore {
    async fn reviewers_of(&self, title: &str) -> Result<Vec<Reviewer>> {
        let mut reviewers = Vec::new();
        for entry in self.reviewed.iter() {
            if !entry.value().iter().any(|t| t == title) {
                continue;
            }
            if let Some(person) = self.people.get(entry.key()) {
                reviewers.push(Reviewer {
                    properties: person.value().clone(),
                });
            }
        }
        Ok(reviewers)
    }

    async fn reviewed_by(&self, name: &str) -> Result<Option<ReviewSummary>> {
        if !self.people.contains_key(name) {
            return Ok(None);
        }

        let titles = self
            .reviewed
            .get(name)
            .map(|entry| entry.value().clone())
            .unwrap_or_default();
        let movies: Vec<PropertyMap> = titles
            .iter()
            .filter_map(|title| self.movies.get(title).map(|m| m.value().clone()))
            .collect();

        Ok(Some(ReviewSummary {
            user: name.to_string(),
            count: movies.len() as u64,
            movies,
        }))
    }

    async fn titles_among(&self, titles: &[String]) -> Result<HashSet<String>> {
        Ok(titles
            .iter()
            .filter(|title| self.movies.contains_key(title.as_str()))
            .cloned()
            .collect())
    }
}
