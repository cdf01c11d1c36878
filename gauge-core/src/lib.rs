//! Gauge Core
//!
//! Core types and abstractions for the Gauge measurement control plane.
//!
//! This crate contains:
//! - Domain types: run configuration, run state, schedules, result rows
//! - Command synthesis: turning a run configuration into a worker invocation
//! - DTOs: request/response shapes shared by the orchestrator and its clients

pub mod command;
pub mod domain;
pub mod dto;
