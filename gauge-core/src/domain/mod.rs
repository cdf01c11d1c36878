//! Core domain types
//!
//! This module contains the core domain structures used across Gauge services.
//! They are shared between the orchestrator (which persists and executes) and
//! the client/CLI (which sends and displays).

pub mod config;
pub mod memory;
pub mod result;
pub mod run;
pub mod schedule;
