//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to one inbound operation.

pub mod resolve;
pub mod shorten;
pub mod stats;

pub use resolve::resolve_handler;
pub use shorten::shorten_handler;
pub use stats::stats_handler;
