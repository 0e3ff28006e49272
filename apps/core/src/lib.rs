//! UNITE Campus Assistant Brain
//!
//! Answers natural-language questions about courses, instructors and campus
//! events by combining a structured knowledge store with free-text matching,
//! optionally augmented by a generative-language backend.
//!
//! The crate covers the decision logic only: keyword extraction, intent
//! classification, domain matching, the knowledge fallback and the
//! generative augmenter. HTTP transport, persistence schema and seed data
//! are external collaborators behind the traits in [`store`] and
//! [`generative`].

pub mod config;
pub mod error;
pub mod generative;
pub mod models;
pub mod pipeline;
pub mod store;
pub mod telemetry;

pub use config::ChatbotConfig;
pub use error::AppError;
pub use generative::{GeminiClient, GenerativeClient};
pub use models::{ChatRequest, ChatResponse, ConversationRecord, RelatedEntities};
pub use pipeline::{ChatbotService, Intent};
pub use store::{CampusStore, ConversationLog, MemoryStore};

#[cfg(test)]
mod tests;
