//! Research tasks and the runner that executes them.
//!
//! A task is a fixed (query, system instruction) pair plus its windowing
//! parameters. The runner wires a task to a model provider and drives the
//! pipeline: build query → one model call → validate → filter. It holds no
//! state across runs and is isolated from transport, so it can be exercised
//! with a fake provider.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{error, info};

use crate::digest;
use crate::error::{TaskError, ValidationError};
use crate::filter::{FilterOutcome, RecencyFilter};
use crate::provider::{GenerateRequest, ModelProvider};
use crate::validate::parse_digest;

/// Default lookback window in calendar days.
pub const DEFAULT_LOOKBACK_DAYS: u32 = 30;

/// Default maximum item count requested from the model. Communicated via the
/// query text only — never enforced post-hoc.
pub const DEFAULT_MAX_ITEMS: usize = 10;

/// The date window a query covers, substituted into the query text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl QueryWindow {
    /// A window of `lookback_days` calendar days ending at `end`.
    pub fn ending_at(end: NaiveDate, lookback_days: u32) -> Self {
        Self {
            start: end - chrono::Duration::days(i64::from(lookback_days)),
            end,
        }
    }

    pub fn start_str(&self) -> String {
        self.start.format("%Y-%m-%d").to_string()
    }

    pub fn end_str(&self) -> String {
        self.end.format("%Y-%m-%d").to_string()
    }
}

/// A research task: what to ask, how the model should conduct itself, and
/// how far back results may reach.
pub trait ResearchTask: Send + Sync {
    /// Stable task name (e.g., "garment-research").
    fn name(&self) -> &str;

    /// The research directive sent as the user turn.
    fn build_query(&self, window: &QueryWindow) -> String;

    /// The system instruction governing tone and constraint adherence.
    fn build_system_instruction(&self) -> String;

    /// Lookback window in calendar days.
    fn lookback_days(&self) -> u32 {
        DEFAULT_LOOKBACK_DAYS
    }

    /// Maximum items requested from the model (prompt-level contract only).
    fn max_items(&self) -> usize {
        DEFAULT_MAX_ITEMS
    }
}

/// Executes research tasks against a model provider.
pub struct TaskRunner {
    provider: Arc<dyn ModelProvider>,
    model: String,
}

impl TaskRunner {
    pub fn new(provider: Arc<dyn ModelProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    /// Run a task: one provider call, validate, filter.
    ///
    /// Any fatal error (provider failure, empty payload, schema violation)
    /// aborts the run — no partial digest is ever returned. `today` anchors
    /// both the query window and the recency cutoff.
    pub async fn execute(
        &self,
        task: &dyn ResearchTask,
        today: NaiveDate,
    ) -> Result<FilterOutcome, TaskError> {
        let window = QueryWindow::ending_at(today, task.lookback_days());
        let query = task.build_query(&window);
        let system_instruction = task.build_system_instruction();

        info!(task = task.name(), model = %self.model, "Running research query");

        let raw = self
            .provider
            .generate(GenerateRequest {
                model: self.model.clone(),
                query,
                system_instruction,
                response_schema: digest::response_schema(),
            })
            .await?;

        if raw.trim().is_empty() {
            error!(task = task.name(), "Empty response from provider");
            return Err(ValidationError::EmptyPayload.into());
        }

        let parsed = parse_digest(&raw)?;
        info!(
            task = task.name(),
            items = parsed.items.len(),
            "Response validated"
        );

        Ok(RecencyFilter::new(task.lookback_days()).apply(parsed, today))
    }
}
