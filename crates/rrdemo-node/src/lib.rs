//! rrdemo node library entry.
//!
//! Wires config, shared state, the structured logger, and the HTTP routes
//! into one axum application. Consumed by the binary (`main.rs`) and by
//! integration tests.

pub mod app_state;
pub mod config;
pub mod context;
pub mod landing;
pub mod obs;
pub mod ops;
pub mod router;
