//! HTTP API Module
//!
//! Assembles the Axum router for the `/movies` surface and injects the movie gateway, the
//! review gateway and the reconciler as `Extension` layers.

pub mod routes;

#[cfg(test)]
mod tests;
