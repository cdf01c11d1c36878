//! Service Module
//!
//! Business logic layer for the orchestrator.
//! Services combine the execution channel, the artifact repository and the
//! command synthesizer. Each operation receives what it needs as arguments;
//! nothing is held in process-wide state.

pub mod config;
pub mod error;
pub mod launcher;
pub mod log;
pub mod results;
pub mod schedule;
pub mod status;
pub mod upload;

pub use error::{Result, ServiceError};

// Re-export for convenience
pub use config as config_service;
pub use launcher as launch_service;
pub use log as log_service;
pub use results as result_service;
pub use schedule as schedule_service;
pub use status as status_service;
pub use upload as upload_service;
