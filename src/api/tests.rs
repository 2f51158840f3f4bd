//! HTTP API Tests
//!
//! Drives the assembled router end to end over the in-memory stores.
//!
//! ## Test Scopes
//! - **Movies**: Status codes and bodies of the CRUD and search routes.
//! - **Reviews & Reconciliation**: The graph-backed routes.
//! - **Routing**: Trailing-slash variants and static segments shadowing `/movies/:id`.

#[cfg(test)]
mod tests {
    use crate::api::routes::router;
    use crate::movies::gateway::MovieGateway;
    use crate::movies::memory::InMemoryMovieStore;
    use crate::movies::types::{Movie, MovieDetails, MovieId};
    use crate::reconcile::service::Reconciler;
    use crate::reviews::gateway::ReviewGateway;
    use crate::reviews::memory::InMemoryGraphStore;
    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Method, Request, StatusCode, header};
    use serde_json::{Map, Value, json};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn movie(title: &str, cast: &[&str]) -> Movie {
        Movie {
            id: MovieId::generate(),
            details: MovieDetails {
                title: Some(title.to_string()),
                cast: Some(cast.iter().map(|c| c.to_string()).collect()),
                ..Default::default()
            },
        }
    }

    fn test_app(movies: Vec<Movie>, graph: InMemoryGraphStore) -> Router {
        let movie_store = Arc::new(InMemoryMovieStore::with_movies(movies));
        let graph_store = Arc::new(graph);
        router(
            Arc::new(MovieGateway::new(movie_store.clone())),
            Arc::new(ReviewGateway::new(graph_store.clone())),
            Arc::new(Reconciler::new(movie_store, graph_store)),
        )
    }

    fn review_graph() -> InMemoryGraphStore {
        let graph = InMemoryGraphStore::new();
        graph.add_person("Keanu Reeves", Map::new());
        graph.add_person("Hugo Weaving", Map::new());
        graph.add_movie("The Matrix", Map::new());
        graph.add_movie("Speed", Map::new());
        graph.add_review("Keanu Reeves", "The Matrix").unwrap();
        graph
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
        send(app, Method::GET, uri, None).await
    }

    // ============================================================
    // MOVIE ROUTE TESTS
    // ============================================================

    #[tokio::test]
    async fn test_list_empty_collection_is_404() {
        let app = test_app(vec![], InMemoryGraphStore::new());

        let (status, body) = get(&app, "/movies").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"detail": "Movies not found"}));
    }

    #[tokio::test]
    async fn test_list_caps_at_ten() {
        let movies = (0..12).map(|i| movie(&format!("Movie {}", i), &[])).collect();
        let app = test_app(movies, InMemoryGraphStore::new());

        for uri in ["/movies", "/movies/"] {
            let (status, body) = get(&app, uri).await;
            assert_eq!(status, StatusCode::OK, "GET {}", uri);
            assert_eq!(body.as_array().unwrap().len(), 10);
        }
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let app = test_app(vec![], InMemoryGraphStore::new());

        let (status, created) = send(
            &app,
            Method::POST,
            "/movies",
            Some(json!({"title": "Alien", "released": "1979-05-25", "runtime": 117})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["title"], "Alien");
        assert_eq!(created["released"], "1979-05-25T00:00:00Z");

        let id = created["_id"].as_str().unwrap().to_string();
        assert!(!id.is_empty());

        let (status, fetched) = get(&app, &format!("/movies/{}", id)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_create_with_string_key_then_get() {
        let app = test_app(vec![], InMemoryGraphStore::new());

        let (status, created) = send(
            &app,
            Method::POST,
            "/movies",
            Some(json!({"_id": "tt0078748", "title": "Alien"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["_id"], "tt0078748");

        let (status, fetched) = get(&app, "/movies/tt0078748").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["title"], "Alien");
    }

    #[tokio::test]
    async fn test_create_duplicate_id_is_409() {
        let app = test_app(vec![], InMemoryGraphStore::new());
        let body = json!({"_id": "tt0078748", "title": "Alien"});

        let (status, _) = send(&app, Method::POST, "/movies", Some(body.clone())).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = send(&app, Method::POST, "/movies", Some(body)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["detail"], "Movie with ID tt0078748 already exists");
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_404() {
        let app = test_app(vec![movie("Alien", &[])], InMemoryGraphStore::new());

        let (status, body) = get(&app, "/movies/573a1390f29313caabcd4135").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body["detail"],
            "Movie with ID 573a1390f29313caabcd4135 not found"
        );

        let (status, body) = get(&app, "/movies/garbage").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Movie with ID garbage not found");
    }

    #[tokio::test]
    async fn test_update_by_id_is_sparse() {
        let record = movie("Alien", &["Sigourney Weaver"]);
        let app = test_app(vec![record.clone()], InMemoryGraphStore::new());

        let (status, updated) = send(
            &app,
            Method::PUT,
            &format!("/movies/{}", record.id),
            Some(json!({"year": 1979, "cast": null})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["year"], 1979);
        assert_eq!(updated["title"], "Alien");
        assert_eq!(updated["cast"], json!(["Sigourney Weaver"]));
    }

    #[tokio::test]
    async fn test_update_by_title_with_trailing_slash() {
        let app = test_app(vec![movie("Alien", &[])], InMemoryGraphStore::new());

        let (status, updated) = send(
            &app,
            Method::PUT,
            "/movies/update/?title=Alien",
            Some(json!({"rated": "R"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["rated"], "R");

        let (status, _) = send(
            &app,
            Method::PUT,
            "/movies/update?title=Aliens",
            Some(json!({"rated": "R"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_by_title_requires_title() {
        let app = test_app(vec![movie("Alien", &[])], InMemoryGraphStore::new());

        let (status, _) =
            send(&app, Method::PUT, "/movies/update", Some(json!({"rated": "R"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_delete_then_404() {
        let record = movie("Alien", &[]);
        let app = test_app(vec![record.clone()], InMemoryGraphStore::new());
        let uri = format!("/movies/{}", record.id);

        let (status, body) = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, Value::Null);

        let (status, _) = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = get(&app, &uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_search_with_and_without_trailing_slash() {
        let app = test_app(
            vec![
                movie("Alien Resurrection", &["Winona Ryder"]),
                movie("Heat", &["Al Pacino"]),
            ],
            InMemoryGraphStore::new(),
        );

        for uri in ["/movies/search?title=ALIEN", "/movies/search/?title=ALIEN"] {
            let (status, body) = get(&app, uri).await;
            assert_eq!(status, StatusCode::OK, "GET {}", uri);
            assert_eq!(body.as_array().unwrap().len(), 1);
            assert_eq!(body[0]["title"], "Alien Resurrection");
        }

        let (status, body) = get(&app, "/movies/search?actor=pacino").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["title"], "Heat");

        let (status, _) = get(&app, "/movies/search?title=a.b").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_search_without_parameters_lists() {
        let app = test_app(vec![movie("Heat", &[])], InMemoryGraphStore::new());

        let (status, body) = get(&app, "/movies/search").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
    }

    // ============================================================
    // REVIEW & RECONCILIATION ROUTE TESTS
    // ============================================================

    #[tokio::test]
    async fn test_common_movies_count() {
        let app = test_app(
            vec![movie("The Matrix", &[]), movie("Alien", &[]), movie("Speed", &[])],
            review_graph(),
        );

        let (status, body) = get(&app, "/movies/common_movies_count").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["common_movies_count"], 2);
        let mut titles: Vec<&str> = body["titles"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();
        titles.sort();
        assert_eq!(titles, vec!["Speed", "The Matrix"]);
    }

    #[tokio::test]
    async fn test_common_movies_none_shared_is_404() {
        let app = test_app(vec![movie("Alien", &[])], review_graph());

        let (status, body) = get(&app, "/movies/common_movies_count/").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"detail": "Common movies not found"}));
    }

    #[tokio::test]
    async fn test_users_rated_movie() {
        let app = test_app(vec![], review_graph());

        let (status, body) = get(&app, "/movies/users_rated_movie?title=The%20Matrix").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([{"p": {"name": "Keanu Reeves"}}]));

        let (status, body) = get(&app, "/movies/users_rated_movie?title=Speed").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Users who rated movie 'Speed' not found");
    }

    #[tokio::test]
    async fn test_movies_rated_by_user() {
        let app = test_app(vec![], review_graph());

        let (status, body) =
            get(&app, "/movies/movies_rated_by_user?name=Keanu%20Reeves").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"], "Keanu Reeves");
        assert_eq!(body["count"], 1);
        assert_eq!(body["movies"], json!([{"title": "The Matrix"}]));

        let (status, body) =
            get(&app, "/movies/movies_rated_by_user/?name=Hugo%20Weaving").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 0);

        let (status, body) = get(&app, "/movies/movies_rated_by_user?name=Nobody").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Movies rated by user 'Nobody' not found");
    }
}
