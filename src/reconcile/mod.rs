//! Cross-Store Reconciliation Module
//!
//! Compares the movie titles held by the document store with the Movie nodes of the review
//! graph.
//!
//! The two reads are independent snapshots; nothing coordinates them, so the result may
//! reflect writes that landed in one store between the two queries.

pub mod handlers;
pub mod service;
pub mod types;
