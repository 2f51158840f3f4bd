//! Movie Catalogue & Review Graph API Library
//!
//! This library crate defines the modules behind the HTTP binary (`main.rs`).
//!
//! ## Architecture Modules
//! The system composes three stateless services over two external stores:
//!
//! - **`movies`**: The document-store gateway. CRUD, case-insensitive substring search and
//!   sparse-patch updates over the MongoDB movie collection.
//! - **`reviews`**: The graph-store gateway. Read-only lookups over
//!   `(:Person)-[:REVIEWED]->(:Movie)` relationships held in Neo4j.
//! - **`reconcile`**: The cross-store reconciler. Intersects the titles known to both stores.
//! - **`api`**: The Axum router wiring the services onto the `/movies` surface.
//! - **`config`**: Command-line / environment configuration.
//! - **`error`**: `ApiError` and its HTTP rendering.
//!
//! Store clients are created once at startup and injected as trait objects, so every
//! service also runs against the in-memory stores.

pub mod api;
pub mod config;
pub mod error;
pub mod movies;
pub mod reconcile;
pub mod reviews;
