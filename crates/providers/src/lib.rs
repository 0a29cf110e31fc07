//! Model provider implementations for scout.
//!
//! All providers implement the `scout_core::ModelProvider` trait.

pub mod gemini;

pub use gemini::GeminiProvider;
