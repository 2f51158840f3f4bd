use super::store::{DuplicateId, MovieFilter, MovieSelector, MovieStore};
use super::types::{Movie, MovieId, MoviePatch, MovieUpdate, NewMovie};
use crate::error::ApiError;

use anyhow::anyhow;
use std::sync::Arc;

/// Cap on unfiltered listings.
pub const LIST_LIMIT: usize = 10;

/// Translates API-level movie requests into document-store operations.
pub struct MovieGateway {
    store: Arc<dyn MovieStore>,
}

fn parse_id(id: &str) -> Result<MovieId, ApiError> {
    id.parse().map_err(|_| ApiError::InvalidId(id.to_string()))
}

impl MovieGateway {
    pub fn new(store: Arc<dyn MovieStore>) -> Self {
        Self { store }
    }

    /// Up to `limit` movies in store order. An empty collection is NotFound.
    pub async fn list(&self, limit: usize) -> Result<Vec<Movie>, ApiError> {
        let movies = self.store.find(&MovieFilter::default(), Some(limit)).await?;
        if movies.is_empty() {
            tracing::warn!("Movie listing came back empty");
            return Err(ApiError::NotFound("Movies not found".to_string()));
        }
        Ok(movies)
    }

    pub async fn find(&self, id: &str) -> Result<Movie, ApiError> {
        let movie_id = parse_id(id)?;
        self.store
            .find_one(&MovieSelector::Id(movie_id))
            .await?
            .ok_or_else(|| ApiError::movie_not_found(id))
    }

    /// Case-insensitive substring search on title and/or cast.
    ///
    /// Without any condition this is the bounded listing, so both listing paths share one
    /// limit and one empty-result policy.
    pub async fn search(
        &self,
        title: Option<&str>,
        actor: Option<&str>,
    ) -> Result<Vec<Movie>, ApiError> {
        let filter = MovieFilter::new(title, actor);
        if filter.is_empty() {
            return self.list(LIST_LIMIT).await;
        }

        let movies = self.store.find(&filter, None).await?;
        tracing::debug!(
            "Search title={:?} actor={:?} matched {} movies",
            title,
            actor,
            movies.len()
        );
        if movies.is_empty() {
            return Err(ApiError::NotFound("Movies not found".to_string()));
        }
        Ok(movies)
    }

    /// Inserts and returns the record as read back from the store. A taken identifier is a
    /// Conflict.
    pub async fn create(&self, movie: NewMovie) -> Result<Movie, ApiError> {
        let movie = movie.into_movie();
        let id = match self.store.insert(&movie).await {
            Ok(id) => id,
            Err(e) if e.is::<DuplicateId>() => return Err(ApiError::Conflict(e.to_string())),
            Err(e) => return Err(e.into()),
        };
        tracing::info!("Created movie {}", id);

        self.store
            .find_one(&MovieSelector::Id(id.clone()))
            .await?
            .ok_or_else(|| ApiError::Upstream(anyhow!("movie {} missing right after insert", id)))
    }

    pub async fn update_by_id(&self, id: &str, update: MovieUpdate) -> Result<Movie, ApiError> {
        let selector = MovieSelector::Id(parse_id(id)?);
        let missing = format!("Movie with ID {} not found", id);
        self.apply(&selector, update.into_patch(), missing).await
    }

    /// Patches the first movie with exactly `title`. The record returned is the one matched,
    /// even when the patch renames it to a title another record already carries.
    pub async fn update_by_title(
        &self,
        title: &str,
        update: MovieUpdate,
    ) -> Result<Movie, ApiError> {
        let selector = MovieSelector::Title(title.to_string());
        let missing = format!("Movie with title '{}' not found", title);
        self.apply(&selector, update.into_patch(), missing).await
    }

    /// An empty patch issues no write and returns the current record.
    async fn apply(
        &self,
        target: &MovieSelector,
        patch: MoviePatch,
        missing: String,
    ) -> Result<Movie, ApiError> {
        let current = if patch.is_empty() {
            self.store.find_one(target).await?
        } else {
            self.store.update_one(target, &patch).await?
        };

        current.ok_or_else(|| {
            tracing::warn!("Update matched nothing for {:?}", target);
            ApiError::NotFound(missing)
        })
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let movie_id = parse_id(id)?;
        if self.store.delete_one(&movie_id).await? == 0 {
            return Err(ApiError::movie_not_found(id));
        }
        tracing::info!("Deleted movie {}", id);
        Ok(())
    }
}
