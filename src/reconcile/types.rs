use serde::{Deserialize, Serialize};

/// Titles present in both stores. `titles` carries no ordering guarantee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommonMovies {
    pub common_movies_count: usize,
    pub titles: Vec<String>,
}
