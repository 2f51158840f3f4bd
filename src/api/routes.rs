use crate::movies::gateway::MovieGateway;
use crate::movies::handlers::{
    handle_create_movie, handle_delete_movie, handle_get_movie, handle_list_movies,
    handle_search_movies, handle_update_movie, handle_update_movie_by_title,
};
use crate::reconcile::handlers::handle_common_movies_count;
use crate::reconcile::service::Reconciler;
use crate::reviews::gateway::ReviewGateway;
use crate::reviews::handlers::{handle_movies_rated_by_user, handle_users_rated_movie};

use axum::routing::{MethodRouter, get, put};
use axum::{Extension, Router};
use std::sync::Arc;

// --- API Endpoints ---

/// Collection root: list (GET) and create (POST).
pub const ENDPOINT_MOVIES: &str = "/movies";
/// Substring search on title and cast.
pub const ENDPOINT_SEARCH: &str = "/movies/search";
/// Patch by exact title.
pub const ENDPOINT_UPDATE_BY_TITLE: &str = "/movies/update";
/// Titles shared by the document store and the review graph.
pub const ENDPOINT_COMMON_MOVIES: &str = "/movies/common_movies_count";
/// People who reviewed a movie.
pub const ENDPOINT_USERS_RATED_MOVIE: &str = "/movies/users_rated_movie";
/// Movies a person reviewed.
pub const ENDPOINT_MOVIES_RATED_BY_USER: &str = "/movies/movies_rated_by_user";
/// Single record by identifier: get, patch, delete.
pub const ENDPOINT_MOVIE_BY_ID: &str = "/movies/:id";

/// Registers `path` with and without a trailing slash.
fn either_slash(router: Router, path: &str, method_router: MethodRouter) -> Router {
    router
        .route(path, method_router.clone())
        .route(&format!("{}/", path), method_router)
}

/// Builds the HTTP surface over the three services.
///
/// Static segments take precedence over `/movies/:id`, so `search`, `update` and the
/// graph endpoints never reach the id handlers.
pub fn router(
    movies: Arc<MovieGateway>,
    reviews: Arc<ReviewGateway>,
    reconciler: Arc<Reconciler>,
) -> Router {
    let router = Router::new();
    let router = either_slash(
        router,
        ENDPOINT_MOVIES,
        get(handle_list_movies).post(handle_create_movie),
    );
    let router = either_slash(router, ENDPOINT_SEARCH, get(handle_search_movies));
    let router = either_slash(
        router,
        ENDPOINT_UPDATE_BY_TITLE,
        put(handle_update_movie_by_title),
    );
    let router = either_slash(router, ENDPOINT_COMMON_MOVIES, get(handle_common_movies_count));
    let router = either_slash(router, ENDPOINT_USERS_RATED_MOVIE, get(handle_users_rated_movie));
    let router = either_slash(
        router,
        ENDPOINT_MOVIES_RATED_BY_USER,
        get(handle_movies_rated_by_user),
    );

    router
        .route(
            ENDPOINT_MOVIE_BY_ID,
            get(handle_get_movie)
                .put(handle_update_movie)
                .delete(handle_delete_movie),
        )
        .layer(Extension(movies))
        .layer(Extension(reviews))
        .layer(Extension(reconciler))
}
