use super::gateway::{LIST_LIMIT, MovieGateway};
use super::types::{Movie, MovieUpdate, NewMovie};
use crate::error::ApiError;

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub title: Option<String>,
    pub actor: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TitleParams {
    pub title: String,
}

pub async fn handle_list_movies(
    Extension(movies): Extension<Arc<MovieGateway>>,
) -> Result<Json<Vec<Movie>>, ApiError> {
    let found = movies.list(LIST_LIMIT).await?;
    tracing::debug!("Listing {} movies", found.len());
    Ok(Json(found))
}

pub async fn handle_search_movies(
    Query(params): Query<SearchParams>,
    Extension(movies): Extension<Arc<MovieGateway>>,
) -> Result<Json<Vec<Movie>>, ApiError> {
    let found = movies
        .search(params.title.as_deref(), params.actor.as_deref())
        .await?;
    Ok(Json(found))
}

pub async fn handle_get_movie(
    Path(id): Path<String>,
    Extension(movies): Extension<Arc<MovieGateway>>,
) -> Result<Json<Movie>, ApiError> {
    Ok(Json(movies.find(&id).await?))
}

pub async fn handle_create_movie(
    Extension(movies): Extension<Arc<MovieGateway>>,
    Json(movie): Json<NewMovie>,
) -> Result<(StatusCode, Json<Movie>), ApiError> {
    let created = movies.create(movie).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn handle_update_movie(
    Path(id): Path<String>,
    Extension(movies): Extension<Arc<MovieGateway>>,
    Json(update): Json<MovieUpdate>,
) -> Result<Json<Movie>, ApiError> {
    Ok(Json(movies.update_by_id(&id, update).await?))
}

pub async fn handle_update_movie_by_title(
    Query(params): Query<TitleParams>,
    Extension(movies): Extension<Arc<MovieGateway>>,
    Json(update): Json<MovieUpdate>,
) -> Result<Json<Movie>, ApiError> {
    Ok(Json(movies.update_by_title(&params.title, update).await?))
}

pub async fn handle_delete_movie(
    Path(id): Path<String>,
    Extension(movies): Extension<Arc<MovieGateway>>,
) -> Result<StatusCode, ApiError> {
    movies.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
