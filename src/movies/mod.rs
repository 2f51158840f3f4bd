//! Movie Document Module
//!
//! The document-store gateway: CRUD and substring search over the movie collection.
//!
//! ## Submodules
//! - **`types`**: Movie records, the identifier and release-date encodings, and the sparse
//!   update payload.
//! - **`store`**: The `MovieStore` trait plus store-neutral filters and selectors.
//! - **`mongo`**: MongoDB-backed store.
//! - **`memory`**: In-process store with identical match semantics.
//! - **`gateway`**: Request-level operations and their NotFound policy.
//! - **`handlers`**: HTTP request handlers for the Axum web server.

pub mod gateway;
pub mod handlers;
pub mod memory;
pub mod mongo;
pub mod store;
pub mod types;
