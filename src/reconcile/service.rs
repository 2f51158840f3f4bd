use super::types::CommonMovies;
use crate::error::ApiError;
use crate::movies::store::MovieStore;
use crate::reviews::store::GraphStore;

use std::collections::HashSet;
use std::sync::Arc;

pub struct Reconciler {
    movies: Arc<dyn MovieStore>,
    graph: Arc<dyn GraphStore>,
}

impl Reconciler {
    pub fn new(movies: Arc<dyn MovieStore>, graph: Arc<dyn GraphStore>) -> Self {
        Self { movies, graph }
    }

    /// Intersection of document-store titles and graph Movie titles.
    ///
    /// The graph is only asked about titles the document store holds, so the filtering
    /// happens store-side. An empty intersection is NotFound.
    pub async fn common_movies(&self) -> Result<CommonMovies, ApiError> {
        let document_titles = self.movies.titles().await?;
        tracing::debug!("Document store holds {} titles", document_titles.len());

        let graph_titles = if document_titles.is_empty() {
            HashSet::new()
        } else {
            let candidates: Vec<String> = document_titles.iter().cloned().collect();
            self.graph.titles_among(&candidates).await?
        };

        let titles: Vec<String> = document_titles
            .intersection(&graph_titles)
            .cloned()
            .collect();

        if titles.is_empty() {
            tracing::warn!("No movie titles shared between the stores");
            return Err(ApiError::NotFound("Common movies not found".to_string()));
        }

        tracing::info!("{} movie titles shared between the stores", titles.len());
        Ok(CommonMovies {
            common_movies_count: titles.len(),
            titles,
        })
    }
}
