//! PostgreSQL durable store.
//!
//! - [`PgUrlRepository`] - URL mappings and click counters in the `urls` table

pub mod pg_url_repository;

pub use pg_url_repository::PgUrlRepository;
