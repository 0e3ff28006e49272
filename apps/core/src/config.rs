//! Runtime configuration for the assistant core.
//!
//! Everything tunable lives here: confidence tiers, query limits and the
//! generative provider credentials. Values come from the environment
//! (via `.env` in development), with sensible defaults for everything
//! except the API key, which stays optional on purpose - the pipeline
//! must keep working without the generative backend.

use serde::{Deserialize, Serialize};
use std::env;

/// Heuristic confidence tiers attached to answers.
///
/// These are fixed design constants, not calibrated probabilities. The
/// ordering `structured > knowledge > fallback` is relied upon by callers
/// and tests; change at your own risk.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ConfidenceTiers {
    /// A structured record matched directly (course, professor, event).
    pub structured: f32,
    /// A curated knowledge-base entry answered the question.
    pub knowledge: f32,
    /// Knowledge-base hit on the general (no-intent) path.
    pub general_knowledge: f32,
    /// The static peer-matching explainer.
    pub matching: f32,
    /// Answer composed by the generative provider.
    pub enhanced: f32,
    /// Default welcome answer when nothing matched at all.
    pub welcome: f32,
    /// No upcoming event matched; softer than a hard miss.
    pub activity_missing: f32,
    /// Canned "not found" answer for a domain query.
    pub not_found: f32,
}

impl Default for ConfidenceTiers {
    fn default() -> Self {
        Self {
            structured: 0.9,
            knowledge: 0.7,
            general_knowledge: 0.75,
            matching: 0.8,
            enhanced: 0.85,
            welcome: 0.5,
            activity_missing: 0.5,
            not_found: 0.3,
        }
    }
}

/// Connection settings for the Gemini-style generative backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerativeConfig {
    /// API key; `None` disables the generative path entirely.
    pub api_key: Option<String>,
    /// Base URL of the REST endpoint. Overridable for tests.
    pub base_url: String,
    /// Model identifier appended to the request path.
    pub model: String,
}

impl Default for GenerativeConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-pro".to_string(),
        }
    }
}

/// Top-level configuration for [`crate::pipeline::ChatbotService`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatbotConfig {
    pub confidence: ConfidenceTiers,
    /// Cap on structured-record results per query.
    pub record_limit: usize,
    /// Cap on knowledge-base hits when used as a matcher fallback.
    pub knowledge_fallback_limit: usize,
    /// Cap on knowledge-base hits on the general path.
    pub knowledge_limit: usize,
    /// Cap on loosely related courses/professors fetched for context.
    pub related_limit: usize,
    pub generative: GenerativeConfig,
}

impl Default for ChatbotConfig {
    fn default() -> Self {
        Self {
            confidence: ConfidenceTiers::default(),
            record_limit: 5,
            knowledge_fallback_limit: 3,
            knowledge_limit: 5,
            related_limit: 3,
            generative: GenerativeConfig::default(),
        }
    }
}

impl ChatbotConfig {
    /// Load configuration from the environment, falling back to defaults.
    ///
    /// Reads `GEMINI_API_KEY`, `GEMINI_BASE_URL` and `GEMINI_MODEL`. A `.env`
    /// file is honored if present; a missing one is not an error.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        let mut config = Self::default();
        config.generative.api_key = env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty());
        if let Ok(base_url) = env::var("GEMINI_BASE_URL") {
            config.generative.base_url = base_url;
        }
        if let Ok(model) = env::var("GEMINI_MODEL") {
            config.generative.model = model;
        }
        config
    }
}
