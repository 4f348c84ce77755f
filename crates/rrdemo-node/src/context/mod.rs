//! Per-request context shared across layers.
//!
//! Handlers take `RequestInfo` so the structured logger can record who asked
//! for what without coupling the logger to axum types.

pub mod request;

pub use request::RequestInfo;
