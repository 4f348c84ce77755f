//! rrdemo core: transport-agnostic primitives for a round-robin demo node.
//!
//! This crate holds the node identity, the request counter state machine, and
//! the structured log record shape. It carries no HTTP or runtime dependencies
//! so the same rules can be exercised from the server and from plain tests.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Fallible paths surface as `DemoError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod counter;
pub mod error;
pub mod identity;
pub mod record;

pub use counter::{RequestCounter, Visit};
/// Shared result type.
pub use error::{DemoError, Result};
pub use identity::ServiceIdentity;
pub use record::{LogEvent, LogLevel, LogRecord, RecordTemplate, RequestMeta};
