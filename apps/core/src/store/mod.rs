//! Store collaborator interfaces.
//!
//! The persistent domain store is external to the core; these traits define
//! exactly what the pipeline needs from it: OR-combined, case-insensitive
//! keyword matching with a limit, plus one atomic counter increment.
//! [`MemoryStore`] is the in-process reference implementation.

pub mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::AppError;
use crate::models::{
    Activity, ActivityStatus, ConversationRecord, Course, KnowledgeCategory, KnowledgeEntry,
    Professor,
};

/// Keyword-OR query over courses or professors.
///
/// A record matches when any keyword case-insensitively matches any of the
/// searched fields (name/code/topics for courses, name/research areas for
/// professors). Empty keywords match nothing; the matchers skip the query
/// entirely in that case.
#[derive(Debug, Clone)]
pub struct EntityQuery {
    pub keywords: Vec<String>,
    pub limit: usize,
}

impl EntityQuery {
    pub fn new(keywords: Vec<String>, limit: usize) -> Self {
        Self { keywords, limit }
    }
}

/// Query over campus events.
#[derive(Debug, Clone)]
pub struct ActivityQuery {
    /// Keyword-OR over title/category/description; empty means "all upcoming".
    pub keywords: Vec<String>,
    /// Only events on or after this instant.
    pub after: DateTime<Utc>,
    /// Acceptable lifecycle states.
    pub statuses: Vec<ActivityStatus>,
    pub limit: usize,
}

/// Query over the curated knowledge base.
///
/// Matches by text relevance against the raw message OR by keyword overlap
/// with the entry's keyword set. Results are ranked by
/// `(importance desc, view_count desc)`.
#[derive(Debug, Clone)]
pub struct KnowledgeQuery {
    pub category: Option<KnowledgeCategory>,
    /// Raw user message for text-relevance scoring.
    pub text: String,
    pub keywords: Vec<String>,
    pub limit: usize,
}

/// Read access to the campus domain store.
///
/// The only write the core ever performs is the view-counter increment,
/// modeled as an atomic operation on the store rather than a
/// read-modify-write on a loaded record.
#[async_trait]
pub trait CampusStore: Send + Sync + 'static {
    async fn find_courses(&self, query: &EntityQuery) -> Result<Vec<Course>, AppError>;

    async fn find_professors(&self, query: &EntityQuery) -> Result<Vec<Professor>, AppError>;

    async fn find_activities(&self, query: &ActivityQuery) -> Result<Vec<Activity>, AppError>;

    async fn find_knowledge(&self, query: &KnowledgeQuery) -> Result<Vec<KnowledgeEntry>, AppError>;

    /// Atomically bump the view counter of a knowledge entry. Best effort;
    /// a missing id is not an error.
    async fn increment_knowledge_view_count(&self, id: &str) -> Result<(), AppError>;
}

/// Append-only sink for processed exchanges.
#[async_trait]
pub trait ConversationLog: Send + Sync + 'static {
    async fn append(&self, record: ConversationRecord) -> Result<(), AppError>;
}
