//! Notion publisher.
//!
//! Creates a child page under a configured parent page, one page per report,
//! titled `{topic} - {report_date}`. Notion gets the full rendering —
//! relevance, innovation, and summary per item — plus the execution-log
//! blob, folded into a toggle of code blocks.

use async_trait::async_trait;
use scout_core::digest::{ResearchDigest, ResearchItem};
use scout_core::error::PublishError;
use scout_core::publisher::DigestPublisher;
use serde_json::{Value, json};
use tracing::{debug, info};

const NOTION_API_URL: &str = "https://api.notion.com/v1/pages";
const NOTION_VERSION: &str = "2022-06-28";

/// Notion enforces a 2000-character limit per rich-text block.
const LOG_CHUNK_CHARS: usize = 2000;

/// Notion pages publisher.
pub struct NotionPublisher {
    api_key: String,
    parent_page_id: String,
    base_url: String,
    client: reqwest::Client,
}

impl NotionPublisher {
    pub fn new(api_key: impl Into<String>, parent_page_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            parent_page_id: parent_page_id.into(),
            base_url: NOTION_API_URL.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Create with a custom endpoint URL (e.g., for testing or proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn text_block(content: &str) -> Value {
        json!({ "type": "text", "text": { "content": content } })
    }

    fn divider() -> Value {
        json!({ "object": "block", "type": "divider", "divider": {} })
    }

    /// Build the page blocks for the digest body.
    fn build_blocks(digest: &ResearchDigest) -> Vec<Value> {
        let mut blocks = Vec::new();

        blocks.push(json!({
            "object": "block",
            "type": "paragraph",
            "paragraph": {
                "rich_text": [{
                    "type": "text",
                    "text": { "content": format!("Generated on {}", digest.report_date) },
                    "annotations": { "italic": true }
                }]
            }
        }));
        blocks.push(Self::divider());

        for (i, item) in digest.items.iter().enumerate() {
            blocks.extend(Self::item_blocks(i + 1, item));
        }

        blocks
    }

    /// Blocks for one item: linked heading, domain callout, relevance,
    /// innovation, quoted summary, divider.
    fn item_blocks(index: usize, item: &ResearchItem) -> Vec<Value> {
        vec![
            json!({
                "object": "block",
                "type": "heading_2",
                "heading_2": {
                    "rich_text": [
                        Self::text_block(&format!("{index}. ")),
                        {
                            "type": "text",
                            "text": {
                                "content": item.title,
                                "link": { "url": item.source_link }
                            }
                        }
                    ]
                }
            }),
            json!({
                "object": "block",
                "type": "callout",
                "callout": {
                    "rich_text": [
                        Self::text_block(&format!("Domain: {}", item.primary_domain))
                    ],
                    "icon": { "emoji": "🏷️" }
                }
            }),
            json!({
                "object": "block",
                "type": "paragraph",
                "paragraph": {
                    "rich_text": [
                        {
                            "type": "text",
                            "text": { "content": "Relevance: " },
                            "annotations": { "bold": true }
                        },
                        Self::text_block(&item.relevance_explanation)
                    ]
                }
            }),
            json!({
                "object": "block",
                "type": "paragraph",
                "paragraph": {
                    "rich_text": [
                        {
                            "type": "text",
                            "text": { "content": "Key Innovation: " },
                            "annotations": { "bold": true }
                        },
                        Self::text_block(&item.key_innovation)
                    ]
                }
            }),
            json!({
                "object": "block",
                "type": "quote",
                "quote": {
                    "rich_text": [Self::text_block(&item.summary)]
                }
            }),
            Self::divider(),
        ]
    }

    /// Fold the execution log into a toggle of code blocks, chunked to the
    /// per-block character limit.
    fn build_log_blocks(logs: &str) -> Value {
        let code_blocks: Vec<Value> = chunk_chars(logs, LOG_CHUNK_CHARS)
            .into_iter()
            .map(|chunk| {
                json!({
                    "object": "block",
                    "type": "code",
                    "code": {
                        "rich_text": [Self::text_block(&chunk)],
                        "language": "plain text"
                    }
                })
            })
            .collect();

        json!({
            "object": "block",
            "type": "toggle",
            "toggle": {
                "rich_text": [Self::text_block("Execution Logs")],
                "children": code_blocks
            }
        })
    }

    /// Build the full pages.create request body.
    fn build_page_request(&self, digest: &ResearchDigest, log_blob: Option<&str>) -> Value {
        let mut children = Self::build_blocks(digest);

        if let Some(logs) = log_blob {
            if !logs.is_empty() {
                children.push(Self::build_log_blocks(logs));
            }
        }

        json!({
            "parent": { "page_id": self.parent_page_id },
            "properties": {
                "title": [{
                    "text": {
                        "content": format!("{} - {}", digest.topic, digest.report_date)
                    }
                }]
            },
            "children": children
        })
    }
}

#[async_trait]
impl DigestPublisher for NotionPublisher {
    fn name(&self) -> &str {
        "notion"
    }

    async fn publish(
        &self,
        digest: &ResearchDigest,
        log_blob: Option<&str>,
    ) -> Result<(), PublishError> {
        let body = self.build_page_request(digest, log_blob);

        debug!(parent = %self.parent_page_id, "Creating child page in Notion");

        let response = self
            .client
            .post(&self.base_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Notion-Version", NOTION_VERSION)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| PublishError::DeliveryFailed {
                publisher: "notion".into(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(PublishError::DeliveryFailed {
                publisher: "notion".into(),
                reason: format!("status {status}: {error_body}"),
            });
        }

        info!("Successfully saved report to Notion");
        Ok(())
    }
}

/// Split a string into chunks of at most `size` characters, respecting
/// UTF-8 boundaries.
fn chunk_chars(s: &str, size: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut count = 0;

    for ch in s.chars() {
        if count == size {
            chunks.push(std::mem::take(&mut current));
            count = 0;
        }
        current.push(ch);
        count += 1;
    }
    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}
