//! Document Store Abstraction
//!
//! The `MovieStore` trait is the seam between the gateway and a concrete document store.
//! Filters and selectors are store-neutral values so every backend applies the same match
//! semantics: case-insensitive substring conditions travel as already-escaped regex patterns.

use super::types::{Movie, MovieId, MoviePatch};

use anyhow::Result;
use async_trait::async_trait;
use regex::{Regex, RegexBuilder};
use std::collections::HashSet;

/// Case-insensitive "contains" condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contains {
    pattern: String,
}

impl Contains {
    /// Escapes `needle` so characters like `.` or `(` match literally.
    pub fn new(needle: &str) -> Self {
        Self {
            pattern: regex::escape(needle),
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn compile(&self) -> Result<Regex> {
        Ok(RegexBuilder::new(&self.pattern)
            .case_insensitive(true)
            .build()?)
    }
}

/// Conjunction of optional substring conditions on `title` and `cast`.
///
/// The `cast` condition holds when any cast member contains the substring.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieFilter {
    pub title: Option<Contains>,
    pub cast: Option<Contains>,
}

impl MovieFilter {
    /// Builds a filter from raw query input. Empty strings impose no condition.
    pub fn new(title: Option<&str>, actor: Option<&str>) -> Self {
        Self {
            title: title.filter(|t| !t.is_empty()).map(Contains::new),
            cast: actor.filter(|a| !a.is_empty()).map(Contains::new),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.cast.is_none()
    }
}

/// Addresses the single record an update or lookup targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovieSelector {
    Id(MovieId),
    /// Exact, case-sensitive title match.
    Title(String),
}

/// Insert rejected because a record with the same identifier exists.
#[derive(Debug, thiserror::Error)]
#[error("Movie with ID {0} already exists")]
pub struct DuplicateId(pub MovieId);

#[async_trait]
pub trait MovieStore: Send + Sync {
    /// Records matching `filter` in store-native order, at most `limit` of them.
    async fn find(&self, filter: &MovieFilter, limit: Option<usize>) -> Result<Vec<Movie>>;

    async fn find_one(&self, selector: &MovieSelector) -> Result<Option<Movie>>;

    /// Distinct titles across the collection, reading only the title field.
    async fn titles(&self) -> Result<HashSet<String>>;

    /// Fails with `DuplicateId` when the identifier is taken.
    async fn insert(&self, movie: &Movie) -> Result<MovieId>;

    /// Merge-sets the fields of `patch` on the first record matched by `selector` and returns
    /// that record as it reads after the write, or `None` when nothing matched.
    async fn update_one(&self, selector: &MovieSelector, patch: &MoviePatch)
    -> Result<Option<Movie>>;

    /// Number of records removed (0 or 1).
    async fn delete_one(&self, id: &MovieId) -> Result<u64>;
}
