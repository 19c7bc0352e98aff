//! Utility functions shared by the engine.
//!
//! - [`code_generator`] - Short code generation
//! - [`deadline`] - Per-call deadlines for outbound requests
//! - [`startup_retry`] - Startup connection retries

pub mod code_generator;
pub mod deadline;
pub mod startup_retry;
