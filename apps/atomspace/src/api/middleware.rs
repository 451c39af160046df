//! # Middleware Module
//!
//! One token bucket shared by every route of the store, so a client
//! flooding `POST /api/v1/atoms` also slows its own queries and inference
//! calls. Probe routes count against the same bucket.
//!
//! `ATOMSPACE_RATE_LIMIT` sets the refill rate in requests per second. The
//! router skips this layer entirely when it is `0`.

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};
use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use std::num::NonZeroU32;
use std::sync::Arc;

/// Refill rate used when `ATOMSPACE_RATE_LIMIT` is unset or unparsable.
const DEFAULT_RPS: NonZeroU32 = NonZeroU32::MIN.saturating_add(99);

// =============================================================================
// RATE LIMITER
// =============================================================================

/// Bucket shared across all connections to the store.
pub type GlobalRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// Build the shared bucket. A rate of 0 never reaches here from the router;
/// called directly it gets [`DEFAULT_RPS`].
pub fn create_rate_limiter(requests_per_second: u32) -> GlobalRateLimiter {
    let rps = NonZeroU32::new(requests_per_second).unwrap_or(DEFAULT_RPS);
    Arc::new(RateLimiter::direct(Quota::per_second(rps)))
}

/// Configured rate for the store's HTTP surface.
pub fn get_rate_limit_from_env() -> u32 {
    std::env::var("ATOMSPACE_RATE_LIMIT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_RPS.get())
}

/// Rejects with 429 when the bucket is empty; the handler never runs, so
/// a throttled write leaves the store untouched.
pub async fn rate_limit_middleware(
    State(limiter): State<GlobalRateLimiter>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, &'static str)> {
    if limiter.check().is_ok() {
        return Ok(next.run(request).await);
    }
    tracing::warn!(
        method = %request.method(),
        path = %request.uri().path(),
        "Request throttled"
    );
    Err((StatusCode::TOO_MANY_REQUESTS, "Too Many Requests"))
}

// =============================================================================
// TESTS
// =============================================================================
