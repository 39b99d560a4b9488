//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures; the few methods they carry are pure
//! state transitions (applying a patch, recording a click) that every store
//! implementation shares.
//!
//! # Design Pattern
//!
//! - [`Link`] - The stored record
//! - [`NewLink`] - Insert payload
//! - [`LinkPatch`] - Partial update
//! - [`LinkStats`] - Read-only statistics projection

pub mod link;

pub use link::{Link, LinkPatch, LinkStats, NewLink};
