//! Gauge Orchestrator
//!
//! Control plane for a measurement worker hosted in a separate container.
//!
//! Architecture:
//! - Settings: where artifacts live and how the container is reached
//! - Channel: remote execution inside the worker container
//! - Repository: flat-file artifacts shared with the worker
//! - Services: launch, status, logs, schedule, results, config, uploads
//! - API: HTTP routes mapping onto the services

pub mod api;
pub mod channel;
pub mod config;
pub mod repository;
pub mod service;
