//! Utility functions used across the application.
//!
//! - [`code_generator`] - Short identifier generation and validation
//! - [`password`] - Argon2id hashing for protected links
//! - [`timestamp`] - ISO-8601 parsing for expiry fields
//! - [`url_validator`] - Redirect target validation

pub mod code_generator;
pub mod password;
pub mod timestamp;
pub mod url_validator;
