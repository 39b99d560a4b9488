//! Link repository implementations.
//!
//! Concrete implementations of [`crate::domain::repositories::LinkRepository`].
//!
//! # Repositories
//!
//! - [`InMemoryLinkRepository`] - Process-local map guarded by an async `RwLock`
//! - [`PgLinkRepository`] - PostgreSQL storage via SQLx

pub mod in_memory_link_repository;
pub mod pg_link_repository;

pub use in_memory_link_repository::InMemoryLinkRepository;
pub use pg_link_repository::PgLinkRepository;
