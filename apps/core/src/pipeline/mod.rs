//! # Pipeline Module
//!
//! The intent classification and answer-composition pipeline.
//! Turns a raw user message into an intent, a ranked set of matching
//! records, and a composed answer with follow-up suggestions.
//!
//! ## Components
//! - `keywords`: keyword extraction and entity detection (fast path)
//! - `intent`: ordered keyword-family intent classification
//! - `course` / `professor` / `activity` / `matching`: domain matchers
//! - `general`: knowledge fallback plus generative augmentation
//! - `service`: main orchestrator and catch-all boundary

pub mod activity;
pub mod course;
pub mod general;
pub mod intent;
pub mod keywords;
pub mod matching;
pub mod professor;
pub mod service;

// Re-export main types for convenience
pub use intent::{Intent, IntentClassifier};
pub use keywords::{KeywordExtractor, MessageEntities};
pub use service::ChatbotService;
