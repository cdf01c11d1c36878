//! Gauge Memory
//!
//! A tiny append-only note store kept next to the CLI. Notes are tagged with
//! who wrote them and in which context, and found again by substring.

pub mod error;
mod store;

pub use error::{MemoryError, Result};
pub use store::{DEFAULT_ENTITY_ID, DEFAULT_PROCESS_ID, MemoryStore, NO_MATCHES, render};
