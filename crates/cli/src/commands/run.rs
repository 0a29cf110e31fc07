//! `scout run` — Execute a research task and publish the digest.
//!
//! Control flow: load config → execute the task (one model call, validate,
//! filter) → hand the digest to the workspace publisher (with the captured
//! execution log) and the chat publisher. A fatal task error aborts before
//! any publish is attempted; a publisher failure is logged and does not
//! affect the other publisher.

use std::sync::Arc;

use scout_config::AppConfig;
use scout_core::digest::ResearchDigest;
use scout_core::publisher::DigestPublisher;
use scout_core::task::TaskRunner;
use scout_providers::GeminiProvider;
use scout_publishers::{ChatPublisher, NotionPublisher};
use scout_tasks::TaskKind;
use tracing::{error, info, warn};

use crate::logging::LogBuffer;

pub async fn run(
    task_name: &str,
    lookback_days: Option<u32>,
    skip_publish: bool,
    log_buffer: LogBuffer,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    let kind: TaskKind = task_name.parse()?;
    let lookback = lookback_days.unwrap_or(config.lookback_days);
    let task = kind.build(lookback, config.max_items);

    let api_key = config
        .gemini_api_key
        .clone()
        .ok_or("GEMINI_API_KEY not available")?;
    let provider = Arc::new(GeminiProvider::new(api_key));
    let runner = TaskRunner::new(provider, &config.model);

    info!(task = %kind, "Starting research agent run");
    info!("==================================================");

    let today = chrono::Utc::now().date_naive();
    let outcome = runner.execute(task.as_ref(), today).await?;

    info!(
        items = outcome.digest.items.len(),
        dropped = outcome.dropped(),
        unparseable = outcome.unparseable(),
        "Task execution successful"
    );

    if skip_publish {
        println!("{}", serde_json::to_string_pretty(&outcome.digest)?);
        return Ok(());
    }

    publish_all(&config, &outcome.digest, &log_buffer).await;

    info!("All operations completed");
    Ok(())
}

/// Deliver the digest to every configured publisher. Failures are reported,
/// never propagated: the run itself already succeeded.
async fn publish_all(config: &AppConfig, digest: &ResearchDigest, log_buffer: &LogBuffer) {
    if config.notion.is_configured() {
        let publisher = NotionPublisher::new(
            config.notion.api_key.clone().unwrap_or_default(),
            config.notion.parent_page_id.clone().unwrap_or_default(),
        );
        // Snapshot the log right before the save so the page carries
        // everything up to this point.
        let logs = log_buffer.contents();
        deliver(&publisher, digest, Some(&logs)).await;
    } else {
        warn!("Notion credentials not found, skipping Notion save");
    }

    if let Some(webhook_url) = &config.chat.webhook_url {
        let publisher = ChatPublisher::new(webhook_url.clone());
        deliver(&publisher, digest, None).await;
    } else {
        warn!("Google Chat webhook URL not found, skipping chat notification");
    }
}

async fn deliver(publisher: &dyn DigestPublisher, digest: &ResearchDigest, logs: Option<&str>) {
    match publisher.publish(digest, logs).await {
        Ok(()) => info!(publisher = publisher.name(), "Digest published"),
        Err(e) => error!(publisher = publisher.name(), error = %e, "Publish failed"),
    }
}
