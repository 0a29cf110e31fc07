//! Recency filtering — pruning stale items and stamping the report date.
//!
//! The filter is a total function: it never fails, it degrades. Items whose
//! publication date parses and falls before the cutoff are dropped; items
//! whose date does not parse at all are KEPT with a warning. The asymmetry
//! is intentional: the filter cannot distinguish "bad date" from "bad
//! format", so it favors keeping possibly-stale items over dropping
//! valid-but-oddly-formatted ones.

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::digest::ResearchDigest;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// What happened to one item during filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemDisposition {
    /// Publication date parsed and falls within the lookback window.
    Kept,
    /// Publication date parsed but precedes the cutoff; item removed.
    DroppedStale,
    /// Publication date did not parse as `YYYY-MM-DD`; item retained.
    KeptUnparseable,
}

/// Per-item record of a filtering decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRecord {
    pub title: String,
    pub publication_date: String,
    pub disposition: ItemDisposition,
}

/// The result of a filter pass: the surviving digest plus a record of every
/// retention decision, so callers and tests can inspect behavior without
/// scraping log output.
#[derive(Debug, Clone)]
pub struct FilterOutcome {
    pub digest: ResearchDigest,
    pub records: Vec<ItemRecord>,
}

impl FilterOutcome {
    /// Number of items dropped as stale.
    pub fn dropped(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.disposition == ItemDisposition::DroppedStale)
            .count()
    }

    /// Number of items kept despite an unparseable date.
    pub fn unparseable(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.disposition == ItemDisposition::KeptUnparseable)
            .count()
    }
}

/// Filters digest items by publication recency.
#[derive(Debug, Clone, Copy)]
pub struct RecencyFilter {
    lookback_days: u32,
}

impl RecencyFilter {
    /// Create a filter with the given lookback window in calendar days.
    pub fn new(lookback_days: u32) -> Self {
        Self { lookback_days }
    }

    /// Apply the filter to a digest.
    ///
    /// 1. Overwrites `report_date` with `today` — the model's own value is
    ///    untrusted.
    /// 2. Drops items dated before `today - lookback_days`.
    /// 3. Keeps items whose date does not parse, with a warning.
    ///
    /// Item order is preserved; filtering only removes, never reorders.
    /// Idempotent for a fixed `today`.
    pub fn apply(&self, mut digest: ResearchDigest, today: NaiveDate) -> FilterOutcome {
        digest.report_date = today.format(DATE_FORMAT).to_string();

        let cutoff = today - chrono::Duration::days(i64::from(self.lookback_days));
        debug!(cutoff = %cutoff, lookback_days = self.lookback_days, "Filtering digest items");

        let mut records = Vec::with_capacity(digest.items.len());
        let items = std::mem::take(&mut digest.items);

        digest.items = items
            .into_iter()
            .filter(|item| {
                let disposition = match NaiveDate::parse_from_str(
                    &item.publication_date,
                    DATE_FORMAT,
                ) {
                    Ok(date) if date >= cutoff => ItemDisposition::Kept,
                    Ok(_) => {
                        info!(
                            title = %item.title,
                            date = %item.publication_date,
                            "Skipping old item"
                        );
                        ItemDisposition::DroppedStale
                    }
                    Err(_) => {
                        warn!(
                            title = %item.title,
                            date = %item.publication_date,
                            "Invalid date format, keeping item"
                        );
                        ItemDisposition::KeptUnparseable
                    }
                };

                records.push(ItemRecord {
                    title: item.title.clone(),
                    publication_date: item.publication_date.clone(),
                    disposition,
                });

                disposition != ItemDisposition::DroppedStale
            })
            .collect();

        info!(kept = digest.items.len(), "Filtered items for the report");

        FilterOutcome { digest, records }
    }
}
