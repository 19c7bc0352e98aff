//! Core domain entities.
//!
//! - [`UrlRecord`] - An immutable short code to URL mapping
//! - [`UrlStats`] - Click count and creation time for a short code
//! - [`ShortenedUrl`] - Result of a successful shorten
//! - [`Resolution`] - Result of a tiered lookup, with the tier that answered

pub mod url_record;

pub use url_record::{Resolution, ShortenedUrl, Tier, UrlRecord, UrlStats};
