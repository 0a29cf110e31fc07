//! Digest publishers for scout.
//!
//! Each publisher implements the `scout_core::DigestPublisher` trait for one
//! delivery surface. Payload construction is pure and unit-tested; the HTTP
//! POST is the only effect.

pub mod chat;
pub mod notion;

pub use chat::ChatPublisher;
pub use notion::NotionPublisher;
