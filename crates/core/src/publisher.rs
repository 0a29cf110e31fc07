//! DigestPublisher trait — the abstraction over outbound delivery targets.
//!
//! A publisher receives a validated, filtered digest and delivers it to one
//! external surface (a chat channel, a documentation workspace). Publishers
//! never see raw model output, and a publisher failure never aborts a run.

use async_trait::async_trait;

use crate::digest::ResearchDigest;
use crate::error::PublishError;

/// The outbound-delivery seam.
#[async_trait]
pub trait DigestPublisher: Send + Sync {
    /// A human-readable name for this publisher (e.g., "notion", "google-chat").
    fn name(&self) -> &str;

    /// Deliver the digest. `log_blob`, when present, is a plain-text
    /// execution log the publisher may attach; publishers that have nowhere
    /// to put it ignore it.
    async fn publish(
        &self,
        digest: &ResearchDigest,
        log_blob: Option<&str>,
    ) -> Result<(), PublishError>;
}
