//! Adapters for the external tiers.
//!
//! # Modules
//!
//! - [`cache`] - Fast cache tier (Redis and no-op implementations)
//! - [`persistence`] - Durable store (PostgreSQL)

pub mod cache;
pub mod persistence;
