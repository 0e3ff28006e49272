//! In-process implementation of the store collaborators.
//!
//! Backs the test suite and small single-node deployments. Query semantics
//! mirror the store contract: case- and accent-insensitive substring matching joined
//! with OR across keywords and fields, importance/view-count ranking for
//! knowledge entries, and counter increments performed under the write
//! lock so concurrent requests cannot lose updates.

use async_trait::async_trait;
use std::sync::RwLock;
use tracing::warn;
use uuid::Uuid;

use super::{ActivityQuery, CampusStore, ConversationLog, EntityQuery, KnowledgeQuery};
use crate::error::AppError;
use crate::models::{Activity, ConversationRecord, Course, KnowledgeEntry, Professor};
use crate::pipeline::keywords::{keyword_similarity, normalize_turkish, KeywordExtractor};

#[derive(Default)]
struct Inner {
    courses: Vec<Course>,
    professors: Vec<Professor>,
    activities: Vec<Activity>,
    knowledge: Vec<KnowledgeEntry>,
    conversations: Vec<ConversationRecord>,
}

/// In-memory campus store.
pub struct MemoryStore {
    inner: RwLock<Inner>,
    extractor: KeywordExtractor,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            extractor: KeywordExtractor::new(),
        }
    }

    fn lock_poisoned() -> AppError {
        AppError::Internal("memory store lock poisoned".to_string())
    }

    /// Insert a course, minting an id when the record carries none.
    pub fn insert_course(&self, mut course: Course) -> Result<String, AppError> {
        if course.id.is_empty() {
            course.id = Uuid::new_v4().to_string();
        }
        let id = course.id.clone();
        let mut inner = self.inner.write().map_err(|_| Self::lock_poisoned())?;
        inner.courses.push(course);
        Ok(id)
    }

    pub fn insert_professor(&self, mut professor: Professor) -> Result<String, AppError> {
        if professor.id.is_empty() {
            professor.id = Uuid::new_v4().to_string();
        }
        let id = professor.id.clone();
        let mut inner = self.inner.write().map_err(|_| Self::lock_poisoned())?;
        inner.professors.push(professor);
        Ok(id)
    }

    pub fn insert_activity(&self, mut activity: Activity) -> Result<String, AppError> {
        if activity.id.is_empty() {
            activity.id = Uuid::new_v4().to_string();
        }
        let id = activity.id.clone();
        let mut inner = self.inner.write().map_err(|_| Self::lock_poisoned())?;
        inner.activities.push(activity);
        Ok(id)
    }

    pub fn insert_knowledge(&self, mut entry: KnowledgeEntry) -> Result<String, AppError> {
        if entry.id.is_empty() {
            entry.id = Uuid::new_v4().to_string();
        }
        let id = entry.id.clone();
        let mut inner = self.inner.write().map_err(|_| Self::lock_poisoned())?;
        inner.knowledge.push(entry);
        Ok(id)
    }

    /// Current view count of a knowledge entry, for assertions in tests.
    pub fn knowledge_view_count(&self, id: &str) -> Option<u64> {
        let inner = self.inner.read().ok()?;
        inner
            .knowledge
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| entry.view_count)
    }

    /// Snapshot of the appended conversation records.
    pub fn conversations(&self) -> Vec<ConversationRecord> {
        self.inner
            .read()
            .map(|inner| inner.conversations.clone())
            .unwrap_or_default()
    }

    /// Case- and accent-insensitive comparison key ("Ağaçlar" → "agaclar").
    fn fold(text: &str) -> String {
        normalize_turkish(text).to_lowercase()
    }

    fn matches_any(haystack: &str, keywords: &[String]) -> bool {
        let folded = Self::fold(haystack);
        keywords.iter().any(|kw| folded.contains(&Self::fold(kw)))
    }

    fn set_contains_any(values: &[String], keywords: &[String]) -> bool {
        values.iter().any(|value| {
            let folded = Self::fold(value);
            keywords.iter().any(|kw| folded == Self::fold(kw))
        })
    }
}

#[async_trait]
impl CampusStore for MemoryStore {
    async fn find_courses(&self, query: &EntityQuery) -> Result<Vec<Course>, AppError> {
        if query.keywords.is_empty() {
            return Ok(vec![]);
        }
        let inner = self.inner.read().map_err(|_| Self::lock_poisoned())?;
        Ok(inner
            .courses
            .iter()
            .filter(|course| {
                Self::matches_any(&course.name, &query.keywords)
                    || Self::matches_any(&course.code, &query.keywords)
                    || Self::set_contains_any(&course.topics, &query.keywords)
            })
            .take(query.limit)
            .cloned()
            .collect())
    }

    async fn find_professors(&self, query: &EntityQuery) -> Result<Vec<Professor>, AppError> {
        if query.keywords.is_empty() {
            return Ok(vec![]);
        }
        let inner = self.inner.read().map_err(|_| Self::lock_poisoned())?;
        Ok(inner
            .professors
            .iter()
            .filter(|prof| {
                Self::matches_any(&prof.name, &query.keywords)
                    || Self::set_contains_any(&prof.research_areas, &query.keywords)
            })
            .take(query.limit)
            .cloned()
            .collect())
    }

    async fn find_activities(&self, query: &ActivityQuery) -> Result<Vec<Activity>, AppError> {
        let inner = self.inner.read().map_err(|_| Self::lock_poisoned())?;
        let mut hits: Vec<Activity> = inner
            .activities
            .iter()
            .filter(|activity| {
                activity.date >= query.after && query.statuses.contains(&activity.status)
            })
            .filter(|activity| {
                query.keywords.is_empty()
                    || Self::matches_any(&activity.title, &query.keywords)
                    || Self::matches_any(&activity.category, &query.keywords)
                    || Self::matches_any(&activity.description, &query.keywords)
            })
            .cloned()
            .collect();

        hits.sort_by_key(|activity| activity.date);
        hits.truncate(query.limit);
        Ok(hits)
    }

    async fn find_knowledge(&self, query: &KnowledgeQuery) -> Result<Vec<KnowledgeEntry>, AppError> {
        let inner = self.inner.read().map_err(|_| Self::lock_poisoned())?;
        let mut hits: Vec<KnowledgeEntry> = inner
            .knowledge
            .iter()
            .filter(|entry| query.category.map_or(true, |cat| entry.category == cat))
            .filter(|entry| {
                let corpus = format!(
                    "{} {} {}",
                    entry.question,
                    entry.answer,
                    entry.keywords.join(" ")
                );
                keyword_similarity(&self.extractor, &query.text, &corpus) > 0.0
                    || Self::set_contains_any(&entry.keywords, &query.keywords)
            })
            .cloned()
            .collect();

        hits.sort_by(|a, b| {
            b.importance
                .cmp(&a.importance)
                .then(b.view_count.cmp(&a.view_count))
        });
        hits.truncate(query.limit);
        Ok(hits)
    }

    async fn increment_knowledge_view_count(&self, id: &str) -> Result<(), AppError> {
        let mut inner = self.inner.write().map_err(|_| Self::lock_poisoned())?;
        match inner.knowledge.iter_mut().find(|entry| entry.id == id) {
            Some(entry) => entry.view_count += 1,
            None => warn!(id, "view count increment for unknown knowledge entry"),
        }
        Ok(())
    }
}

#[async_trait]
impl ConversationLog for MemoryStore {
    async fn append(&self, record: ConversationRecord) -> Result<(), AppError> {
        let mut inner = self.inner.write().map_err(|_| Self::lock_poisoned())?;
        inner.conversations.push(record);
        Ok(())
    }
}
