//! Shared service plumbing for Quill services: tracing setup, health
//! endpoints, request-id middleware, and serialization helpers.

pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
