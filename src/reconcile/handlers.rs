use super::service::Reconciler;
use super::types::CommonMovies;
use crate::error::ApiError;

use axum::{Extension, Json};
use std::sync::Arc;

pub async fn handle_common_movies_count(
    Extension(reconciler): Extension<Arc<Reconciler>>,
) -> Result<Json<CommonMovies>, ApiError> {
    Ok(Json(reconciler.common_movies().await?))
}
