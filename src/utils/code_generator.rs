//! Short identifier generation and validation utilities.
//!
//! Provides cryptographically secure random identifier generation and
//! validation for caller-supplied custom identifiers.

use crate::error::AppError;
use base64::Engine as _;
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

/// Length of random bytes before base64 encoding.
///
/// 6 bytes encode to exactly 8 URL-safe characters (48 bits of entropy).
const SHORT_ID_LENGTH_BYTES: usize = 6;

/// Minimum length of a custom short identifier.
pub const CUSTOM_ID_MIN_LEN: usize = 3;

/// Maximum length of a custom short identifier.
pub const CUSTOM_ID_MAX_LEN: usize = 64;

static CUSTOM_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("static regex is valid"));

/// Generates a cryptographically secure random short identifier.
///
/// Uses `getrandom` for entropy and encodes the result as URL-safe base64
/// without padding, producing an 8-character identifier.
///
/// # Errors
///
/// Returns an error if the system random number generator fails.
///
/// # Examples
///
/// ```ignore
/// let id = generate_short_id()?;
/// assert_eq!(id.len(), 8);
/// assert!(id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
/// ```
pub fn generate_short_id() -> Result<String, getrandom::Error> {
    let mut buffer = [0u8; SHORT_ID_LENGTH_BYTES];

    getrandom::fill(&mut buffer)?;

    Ok(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer))
}

/// Validates a caller-supplied custom short identifier.
///
/// # Rules
///
/// - Length: 3-64 characters
/// - Allowed characters: ASCII letters, digits, hyphens, underscores
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
///
/// # Examples
///
/// ```ignore
/// assert!(validate_custom_short_id("abc123").is_ok());
/// assert!(validate_custom_short_id("mi-link").is_ok());
///
/// assert!(validate_custom_short_id("ab").is_err());          // Too short
/// assert!(validate_custom_short_id("has space").is_err());   // Illegal character
/// ```
pub fn validate_custom_short_id(short_id: &str) -> Result<(), AppError> {
    let len = short_id.chars().count();
    if !(CUSTOM_ID_MIN_LEN..=CUSTOM_ID_MAX_LEN).contains(&len) {
        return Err(AppError::bad_request(
            format!(
                "Custom short id must be {}-{} characters",
                CUSTOM_ID_MIN_LEN, CUSTOM_ID_MAX_LEN
            ),
            json!({ "provided_length": len }),
        ));
    }

    if !CUSTOM_ID_REGEX.is_match(short_id) {
        return Err(AppError::bad_request(
            "Custom short id can only contain letters, digits, hyphens and underscores",
            json!({ "short_id": short_id }),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_short_id_has_correct_length() {
        let id = generate_short_id().unwrap();
        assert_eq!(id.len(), 8);
    }

    #[test]
    fn test_generate_short_id_url_safe_characters() {
        let id = generate_short_id().unwrap();
        assert!(
            id.chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
        assert!(!id.contains('='));
    }

    #[test]
    fn test_generate_short_id_produces_unique_ids() {
        let mut ids = HashSet::new();

        for _ in 0..1000 {
            ids.insert(generate_short_id().unwrap());
        }

        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_generated_ids_pass_custom_validation() {
        for _ in 0..100 {
            let id = generate_short_id().unwrap();
            assert!(validate_custom_short_id(&id).is_ok(), "rejected {id}");
        }
    }

    #[test]
    fn test_validate_accepts_common_shapes() {
        assert!(validate_custom_short_id("abc123").is_ok());
        assert!(validate_custom_short_id("mi-link").is_ok());
        assert!(validate_custom_short_id("Promo_2025").is_ok());
        assert!(validate_custom_short_id("abc").is_ok());
    }

    #[test]
    fn test_validate_length_bounds() {
        assert!(validate_custom_short_id("ab").is_err());
        assert!(validate_custom_short_id("").is_err());
        assert!(validate_custom_short_id(&"a".repeat(64)).is_ok());

        let err = validate_custom_short_id(&"a".repeat(65)).unwrap_err();
        assert!(err.to_string().contains("3-64 characters"));
    }

    #[test]
    fn test_validate_rejects_illegal_characters() {
        for bad in ["has space", "slash/id", "query?x", "frag#1", "dot.id", "ümlaut"] {
            let result = validate_custom_short_id(bad);
            assert!(
                matches!(result, Err(AppError::Validation { .. })),
                "'{bad}' should be rejected"
            );
        }
    }
}
