//! Error types for the scout domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error enum; `TaskError` is the
//! top-level type a run fails with.
//!
//! Per-item conditions during filtering (stale date, unparseable date) are
//! deliberately NOT errors — they never abort a run. See `filter`.

use thiserror::Error;

/// The top-level error type for a task run.
///
/// Any variant is fatal to the current run: no partial digest is ever
/// published. There is no retry — a single failure propagates to the caller
/// as-is.
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),
}

/// Failures turning a raw model payload into a digest.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The model call produced no text at all. Distinguished from
    /// `MalformedPayload` because upstream callers respond differently: an
    /// empty payload usually means the model call itself failed silently.
    #[error("Empty payload: model returned no text")]
    EmptyPayload,

    /// Text was present but did not conform to the digest schema
    /// (unparseable JSON, missing field, type mismatch, invalid domain).
    /// The reason names the offending field path.
    #[error("Malformed payload: {reason}")]
    MalformedPayload { reason: String },
}

/// Failures from the external generative-model call.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    Api { status_code: u16, message: String },

    #[error("Rate limited by provider")]
    RateLimited,

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Network error: {0}")]
    Network(String),
}

/// Failures delivering a digest to an external publisher.
///
/// Publisher errors never abort a run — the digest is already validated and
/// filtered. Callers log the failure and move on to the next publisher.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("Publisher not configured: {0}")]
    NotConfigured(String),

    #[error("Delivery failed to {publisher}: {reason}")]
    DeliveryFailed { publisher: String, reason: String },
}
