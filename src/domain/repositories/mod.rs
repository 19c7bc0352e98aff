//! Contract for the durable store.
//!
//! The trait abstracts the durable tier so the engine can be exercised against
//! in-memory fakes or `mockall` mocks. The PostgreSQL implementation lives in
//! `crate::infrastructure::persistence`.

pub mod url_repository;

pub use url_repository::{StoreError, UrlRepository};

#[cfg(test)]
pub use url_repository::MockUrlRepository;
