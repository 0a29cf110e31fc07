//! # Scout Core
//!
//! Domain types, traits, and error definitions for the scout research-digest
//! agent. This crate has **zero framework dependencies** — it defines the
//! digest contract and the seams to external collaborators (model provider,
//! publishers) that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! A run is a pure pipeline: build query → one model call → validate the raw
//! JSON against the digest schema → filter by recency → hand the clean digest
//! to publishers. The model call and the publishing calls are behind narrow
//! traits so the pipeline can be exercised with deterministic fakes.

pub mod digest;
pub mod error;
pub mod filter;
pub mod provider;
pub mod publisher;
pub mod task;
pub mod validate;

// Re-export key types at crate root for ergonomics
pub use digest::{ResearchDigest, ResearchDomain, ResearchItem};
pub use error::{ProviderError, PublishError, TaskError, ValidationError};
pub use filter::{FilterOutcome, ItemDisposition, ItemRecord, RecencyFilter};
pub use provider::{GenerateRequest, ModelProvider};
pub use publisher::DigestPublisher;
pub use task::{QueryWindow, ResearchTask, TaskRunner};
pub use validate::parse_digest;
