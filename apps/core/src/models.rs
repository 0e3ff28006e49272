//! Domain records and wire-shaped types.
//!
//! Records mirror what the external store hands back; the core only reads
//! them (the single exception being knowledge-entry view counters, which are
//! incremented through the store, never mutated on a loaded record).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::pipeline::intent::Intent;

/// A course as delivered by the store, with instructors already resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub code: String,
    pub name: String,
    pub department: String,
    pub credits: u8,
    /// Semester number, 1-8.
    pub semester: u8,
    pub description: String,
    #[serde(default)]
    pub topics: Vec<String>,
    /// Difficulty tier, e.g. "Kolay", "Orta", "Zor", "Çok Zor".
    pub difficulty: String,
    #[serde(default)]
    pub professors: Vec<InstructorRef>,
    #[serde(default)]
    pub student_comments: Vec<StudentComment>,
}

/// Lightweight reference to an instructor attached to a course.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstructorRef {
    pub id: String,
    pub name: String,
    pub title: String,
}

/// A student comment with its 1-5 rating.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentComment {
    pub comment: String,
    pub rating: u8,
    pub date: DateTime<Utc>,
}

impl Course {
    /// Arithmetic mean of comment ratings; `None` when there are no comments.
    pub fn average_rating(&self) -> Option<f32> {
        if self.student_comments.is_empty() {
            return None;
        }
        let sum: u32 = self.student_comments.iter().map(|c| u32::from(c.rating)).sum();
        Some(sum as f32 / self.student_comments.len() as f32)
    }
}

/// A professor record with taught courses resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Professor {
    pub id: String,
    pub name: String,
    /// Academic title, e.g. "Prof. Dr.", "Doç. Dr.", "Dr. Öğr. Üyesi".
    pub title: String,
    pub department: String,
    pub email: String,
    #[serde(default)]
    pub office_location: Option<String>,
    #[serde(default)]
    pub office_hours: Option<String>,
    #[serde(default)]
    pub research_areas: Vec<String>,
    #[serde(default)]
    pub courses: Vec<CourseRef>,
    #[serde(default)]
    pub student_reviews: Vec<StudentReview>,
}

/// Lightweight reference to a course taught by a professor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseRef {
    pub id: String,
    pub code: String,
    pub name: String,
}

/// A student review of a professor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentReview {
    #[serde(default)]
    pub comment: Option<String>,
    pub rating: u8,
    pub date: DateTime<Utc>,
}

impl Professor {
    /// Arithmetic mean of review ratings; `None` when there are no reviews.
    pub fn average_rating(&self) -> Option<f32> {
        if self.student_reviews.is_empty() {
            return None;
        }
        let sum: u32 = self.student_reviews.iter().map(|r| u32::from(r.rating)).sum();
        Some(sum as f32 / self.student_reviews.len() as f32)
    }

    /// The most recently added review, if any.
    pub fn latest_review(&self) -> Option<&StudentReview> {
        self.student_reviews.last()
    }
}

/// Lifecycle status of a campus event. Labels stay Turkish on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityStatus {
    #[serde(rename = "Yaklaşan")]
    Upcoming,
    #[serde(rename = "Devam Ediyor")]
    Ongoing,
    #[serde(rename = "Tamamlandı")]
    Completed,
    #[serde(rename = "İptal Edildi")]
    Cancelled,
}

/// Venue of an event; all fields optional in the source data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActivityLocation {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

/// A campus event (seminar, club meeting, workshop...).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    pub title: String,
    /// Free-form category, e.g. "Akademik", "Sosyal", "Kariyer".
    pub category: String,
    pub description: String,
    pub organizer: String,
    #[serde(default)]
    pub location: Option<ActivityLocation>,
    pub date: DateTime<Utc>,
    /// Display time, e.g. "14:00".
    pub time: String,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub registered_students: Vec<String>,
    pub status: ActivityStatus,
}

impl Activity {
    /// Seats left, shown only when a capacity is set. Saturates at zero.
    pub fn remaining_capacity(&self) -> Option<u32> {
        self.capacity
            .map(|cap| cap.saturating_sub(self.registered_students.len() as u32))
    }
}

/// Category of a curated knowledge-base entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KnowledgeCategory {
    #[serde(rename = "Dersler")]
    Courses,
    #[serde(rename = "Hocalar")]
    Professors,
    #[serde(rename = "Sosyal")]
    Social,
    #[serde(rename = "Kampüs")]
    Campus,
    #[serde(rename = "Bölüm Kültürü")]
    DepartmentCulture,
    #[serde(rename = "Sınavlar")]
    Exams,
    #[serde(rename = "Projeler")]
    Projects,
    #[serde(rename = "Genel")]
    General,
}

/// A curated Q&A entry consulted when no structured record matches.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeEntry {
    pub id: String,
    pub category: KnowledgeCategory,
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub related_questions: Vec<String>,
    /// Curation rank, 1-5. Drives result ordering together with `view_count`.
    pub importance: u8,
    #[serde(default)]
    pub view_count: u64,
    #[serde(default)]
    pub helpful_count: u64,
}

/// Identifiers of records that contributed to an answer.
///
/// All three keys are always present; unused ones are empty, never absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelatedEntities {
    pub courses: Vec<String>,
    pub professors: Vec<String>,
    pub activities: Vec<String>,
}

/// The composed answer handed back to the transport layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub answer: String,
    pub intent: Intent,
    /// Heuristic certainty tier in [0, 1]; see [`crate::config::ConfidenceTiers`].
    pub confidence: f32,
    pub suggestions: Vec<String>,
    pub related_entities: RelatedEntities,
    /// Whether the answer text came from the generative provider.
    #[serde(default)]
    pub ai_enhanced: bool,
}

impl ChatResponse {
    /// A bare response carrying only an intent, used as a builder base.
    pub fn empty(intent: Intent) -> Self {
        Self {
            answer: String::new(),
            intent,
            confidence: 0.0,
            suggestions: vec![],
            related_entities: RelatedEntities::default(),
            ai_enhanced: false,
        }
    }
}

/// One processed exchange, handed to the logging collaborator.
///
/// Output only: the core never reads these back.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationRecord {
    pub session_id: String,
    pub user_message: String,
    pub bot_response: String,
    pub intent: Intent,
    pub confidence: f32,
    pub related_entities: RelatedEntities,
    pub created_at: DateTime<Utc>,
}

/// The inbound `(message, sessionId)` pair from the transport layer.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[validate(length(min = 1, message = "mesaj boş olamaz"))]
    pub message: String,
    #[validate(length(min = 1, message = "session ID gerekli"))]
    pub session_id: String,
}
