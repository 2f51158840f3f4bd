//! Review Graph Module
//!
//! The graph-store gateway: read-only lookups over `(:Person)-[:REVIEWED]->(:Movie)`.
//! Person and Movie nodes and their edges are owned by the graph; nothing here writes to it.
//!
//! ## Submodules
//! - **`types`**: Reviewer nodes and per-user review summaries.
//! - **`cypher`**: The Cypher statements.
//! - **`store`**: The `GraphStore` trait.
//! - **`neo4j`**: Neo4j-backed store over Bolt.
//! - **`memory`**: In-process graph with identical query semantics.
//! - **`gateway`**: Request-level lookups and their NotFound policy.
//! - **`handlers`**: HTTP request handlers for the Axum web server.

pub mod cypher;
pub mod gateway;
pub mod handlers;
pub mod memory;
pub mod neo4j;
pub mod store;
pub mod types;
