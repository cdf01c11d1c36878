//! Repository Module
//!
//! Data access layer for the orchestrator.
//! The control plane persists nothing of its own beyond flat-file artifacts
//! shared with the worker: the configuration document, the results table,
//! the log, and uploaded source files.

pub mod artifact;

// Re-export for convenience
pub use artifact as artifact_repository;
