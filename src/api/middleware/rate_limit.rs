//! Rate limiting middleware using token bucket algorithm.

use anyhow::Context;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor,
};

/// Per-IP rate limiter keyed on the peer socket address.
pub type RateLimitLayer =
    GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Creates a rate limiter for every public endpoint.
///
/// # Limits
///
/// - **Rate**: `per_second` requests per second, sustained (at most 1000)
/// - **Burst**: `burst` requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// The server must be started with connect info so the peer address is
/// available (see [`crate::server::run`]).
///
/// # Errors
///
/// Returns an error if either limit is zero or the rate exceeds 1000/s.
pub fn layer(per_second: u64, burst: u32) -> anyhow::Result<RateLimitLayer> {
    anyhow::ensure!(per_second > 0, "Rate limit must be at least 1 request per second");

    // Governor counts in replenish intervals, not rates.
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_millisecond(1000 / per_second)
            .burst_size(burst)
            .finish()
            .context("Invalid rate limit configuration")?,
    );

    Ok(GovernorLayer::new(governor_conf))
}
