use super::store::{DuplicateId, MovieFilter, MovieSelector, MovieStore};
use super::types::{Movie, MovieId, MoviePatch};

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashSet;
use tokio::sync::RwLock;

/// In-process movie collection.
///
/// Keeps records in insertion order, which is the "store-native" order `find` reports.
pub struct InMemoryMovieStore {
    records: RwLock<Vec<Movie>>,
}

impl InMemoryMovieStore {
    pub fn new() -> Self {
        Self::with_movies(Vec::new())
    }

    pub fn with_movies(movies: Vec<Movie>) -> Self {
        Self {
            records: RwLock::new(movies),
        }
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

impl Default for InMemoryMovieStore {
    fn default() -> Self {
        Self::new()
    }
}

fn selects(selector: &MovieSelector, movie: &Movie) -> bool {
    match selector {
        MovieSelector::Id(id) => &movie.id == id,
        MovieSelector::Title(title) => movie.details.title.as_deref() == Some(title.as_str()),
    }
}

#[async_trait]
impl MovieStore for InMemoryMovieStore {
    async fn find(&self, filter: &MovieFilter, limit: Option<usize>) -> Result<Vec<Movie>> {
        let title = filter.title.as_ref().map(|c| c.compile()).transpose()?;
        let cast = filter.cast.as_ref().map(|c| c.compile()).transpose()?;

        let records = self.records.read().await;
        let matches = records
            .iter()
            .filter(|movie| match &title {
                Some(re) => movie.details.title.as_deref().is_some_and(|t| re.is_match(t)),
                None => true,
            })
            .filter(|movie| match &cast {
                Some(re) => movie
                    .details
                    .cast
                    .as_ref()
                    .is_some_and(|members| members.iter().any(|m| re.is_match(m))),
                None => true,
            })
            .take(limit.unwrap_or(usize::MAX))
            .cloned()
            .collect();

        Ok(matches)
    }

    async fn find_one(&self, selector: &MovieSelector) -> Result<Option<Movie>> {
        let records = self.records.read().await;
        Ok(records.iter().find(|movie| selects(selector, movie)).cloned())
    }

    async fn titles(&self) -> Result<HashSet<String>> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter_map(|movie| movie.details.title.clone())
            .collect())
    }

    async fn insert(&self, movie: &Movie) -> Result<MovieId> {
        let mut records = self.records.write().await;
        if records.iter().any(|existing| existing.id == movie.id) {
            return Err(DuplicateId(movie.id.clone()).into());
        }
        records.push(movie.clone());
        tracing::debug!("Stored movie {} in memory", movie.id);
        Ok(movie.id.clone())
    }

    async fn update_one(
        &self,
        selector: &MovieSelector,
        patch: &MoviePatch,
    ) -> Result<Option<Movie>> {
        let mut records = self.records.write().await;
        let Some(movie) = records.iter_mut().find(|movie| selects(selector, movie)) else {
            return Ok(None);
        };

        movie.details.overlay(patch.clone());
        Ok(Some(movie.clone()))
    }

    async fn delete_one(&self, id: &MovieId) -> Result<u64> {
        let mut records = self.records.write().await;
        match records.iter().position(|movie| &movie.id == id) {
            Some(index) => {
                records.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }
}
