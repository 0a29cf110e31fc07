//! Google Chat publisher.
//!
//! Delivers the digest to a Google Chat space via an incoming webhook.
//! Chat gets the compact rendering: title, source link, domain tag, and key
//! innovation per item. The execution-log blob has no home here and is
//! ignored.

use async_trait::async_trait;
use scout_core::digest::ResearchDigest;
use scout_core::error::PublishError;
use scout_core::publisher::DigestPublisher;
use tracing::{debug, info};

/// Google Chat incoming-webhook publisher.
pub struct ChatPublisher {
    webhook_url: String,
    client: reqwest::Client,
}

impl ChatPublisher {
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self {
            webhook_url: webhook_url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Render the digest as a Chat-formatted text message.
    fn format_message(digest: &ResearchDigest) -> String {
        let mut message = format!("*{} - {}*\n\n", digest.topic, digest.report_date);

        for (i, item) in digest.items.iter().enumerate() {
            message.push_str(&format!("*{}. {}*\n", i + 1, item.title));
            message.push_str(&format!(
                "<{}|Source> | `Domain: {}`\n",
                item.source_link, item.primary_domain
            ));
            message.push_str(&format!("> {}\n\n", item.key_innovation));
        }

        message
    }
}

#[async_trait]
impl DigestPublisher for ChatPublisher {
    fn name(&self) -> &str {
        "google-chat"
    }

    async fn publish(
        &self,
        digest: &ResearchDigest,
        _log_blob: Option<&str>,
    ) -> Result<(), PublishError> {
        let body = serde_json::json!({ "text": Self::format_message(digest) });

        debug!(items = digest.items.len(), "Posting digest to Google Chat");

        let response = self
            .client
            .post(&self.webhook_url)
            .header("Content-Type", "application/json; charset=UTF-8")
            .json(&body)
            .send()
            .await
            .map_err(|e| PublishError::DeliveryFailed {
                publisher: "google-chat".into(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(PublishError::DeliveryFailed {
                publisher: "google-chat".into(),
                reason: format!("status {status}: {error_body}"),
            });
        }

        info!(status = %status, "Google Chat response");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scout_core::digest::{ResearchDomain, ResearchItem};

    fn digest() -> ResearchDigest {
        ResearchDigest {
            topic: "Garment Simulation".into(),
            report_date: "2024-06-15".into(),
            items: vec![
                ResearchItem {
                    title: "Neural Cloth Solver".into(),
                    source_link: "https://example.org/ncs".into(),
                    publication_date: "2024-06-01".into(),
                    primary_domain: ResearchDomain::AiDataDrivenMethods,
                    relevance_explanation: "r".into(),
                    key_innovation: "GNN surrogate replaces the solver.".into(),
                    summary: "s".into(),
                },
                ResearchItem {
                    title: "Fast CCD".into(),
                    source_link: "https://example.org/ccd".into(),
                    publication_date: "2024-06-03".into(),
                    primary_domain: ResearchDomain::CollisionHandling,
                    relevance_explanation: "r".into(),
                    key_innovation: "No tunneling at high velocity.".into(),
                    summary: "s".into(),
                },
            ],
        }
    }

    #[test]
    fn message_header_has_topic_and_date() {
        let msg = ChatPublisher::format_message(&digest());
        assert!(msg.starts_with("*Garment Simulation - 2024-06-15*\n\n"));
    }

    #[test]
    fn items_are_numbered_from_one() {
        let msg = ChatPublisher::format_message(&digest());
        assert!(msg.contains("*1. Neural Cloth Solver*\n"));
        assert!(msg.contains("*2. Fast CCD*\n"));
    }

    #[test]
    fn item_lines_carry_link_domain_and_innovation() {
        let msg = ChatPublisher::format_message(&digest());
        assert!(msg.contains("<https://example.org/ncs|Source> | `Domain: AI & Data-Driven Methods`\n"));
        assert!(msg.contains("> GNN surrogate replaces the solver.\n"));
    }

    #[test]
    fn empty_digest_renders_header_only() {
        let empty = ResearchDigest {
            topic: "Garment Simulation".into(),
            report_date: "2024-06-15".into(),
            items: vec![],
        };
        let msg = ChatPublisher::format_message(&empty);
        assert_eq!(msg, "*Garment Simulation - 2024-06-15*\n\n");
    }
}
