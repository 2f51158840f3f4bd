use super::gateway::ReviewGateway;
use super::types::{ReviewSummary, Reviewer};
use crate::error::ApiError;

use axum::extract::Query;
use axum::{Extension, Json};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct MovieTitleParams {
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct UserNameParams {
    pub name: String,
}

pub async fn handle_users_rated_movie(
    Query(params): Query<MovieTitleParams>,
    Extension(reviews): Extension<Arc<ReviewGateway>>,
) -> Result<Json<Vec<Reviewer>>, ApiError> {
    Ok(Json(reviews.users_who_reviewed(&params.title).await?))
}

pub async fn handle_movies_rated_by_user(
    Query(params): Query<UserNameParams>,
    Extension(reviews): Extension<Arc<ReviewGateway>>,
) -> Result<Json<ReviewSummary>, ApiError> {
    Ok(Json(reviews.movies_reviewed_by(&params.name).await?))
}
