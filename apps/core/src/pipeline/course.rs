//! Course matcher: structured record first, knowledge base second,
//! canned fallback last.

use std::sync::Arc;
use tracing::debug;

use crate::config::ChatbotConfig;
use crate::error::AppError;
use crate::models::{ChatResponse, Course, KnowledgeCategory, RelatedEntities};
use crate::pipeline::intent::Intent;
use crate::store::{CampusStore, EntityQuery, KnowledgeQuery};

pub struct CourseMatcher {
    store: Arc<dyn CampusStore>,
    config: Arc<ChatbotConfig>,
}

impl CourseMatcher {
    pub fn new(store: Arc<dyn CampusStore>, config: Arc<ChatbotConfig>) -> Self {
        Self { store, config }
    }

    pub async fn handle(
        &self,
        message: &str,
        keywords: &[String],
    ) -> Result<ChatResponse, AppError> {
        let courses = if keywords.is_empty() {
            vec![]
        } else {
            self.store
                .find_courses(&EntityQuery::new(
                    keywords.to_vec(),
                    self.config.record_limit,
                ))
                .await?
        };

        if let Some(course) = courses.first() {
            debug!(code = %course.code, "course matched");
            return Ok(ChatResponse {
                answer: Self::format_course(course),
                intent: Intent::CourseInfo,
                confidence: self.config.confidence.structured,
                suggestions: vec![
                    "Dersin konuları neler?".to_string(),
                    "Hangi hoca veriyor?".to_string(),
                    "Zorluğu nasıl?".to_string(),
                ],
                related_entities: RelatedEntities {
                    courses: courses.iter().map(|c| c.id.clone()).collect(),
                    ..RelatedEntities::default()
                },
                ai_enhanced: false,
            });
        }

        let kb_hits = self
            .store
            .find_knowledge(&KnowledgeQuery {
                category: Some(KnowledgeCategory::Courses),
                text: message.to_string(),
                keywords: vec![],
                limit: self.config.knowledge_fallback_limit,
            })
            .await?;

        if let Some(hit) = kb_hits.first() {
            self.store.increment_knowledge_view_count(&hit.id).await?;
            return Ok(ChatResponse {
                answer: hit.answer.clone(),
                intent: Intent::CourseInfo,
                confidence: self.config.confidence.knowledge,
                suggestions: hit.related_questions.clone(),
                related_entities: RelatedEntities::default(),
                ai_enhanced: false,
            });
        }

        Ok(ChatResponse {
            answer: "Üzgünüm, aradığınız dersle ilgili bilgi bulamadım. Ders adını veya \
                     kodunu daha net yazabilir misiniz? Örneğin: \"Veri Yapıları dersi\" \
                     veya \"BIL211\""
                .to_string(),
            intent: Intent::CourseInfo,
            confidence: self.config.confidence.not_found,
            suggestions: vec![
                "Tüm dersleri göster".to_string(),
                "Zorluk seviyelerine göre dersler".to_string(),
                "3. dönem dersleri neler?".to_string(),
            ],
            related_entities: RelatedEntities::default(),
            ai_enhanced: false,
        })
    }

    fn format_course(course: &Course) -> String {
        let mut answer = format!(
            "**{}** ({}) hakkında bilgiler:\n\n",
            course.name, course.code
        );
        answer.push_str(&format!("📚 **Kredi:** {}\n", course.credits));
        answer.push_str(&format!("📅 **Dönem:** {}. yarıyıl\n", course.semester));
        answer.push_str(&format!("📊 **Zorluk:** {}\n\n", course.difficulty));
        answer.push_str(&format!("**Açıklama:** {}\n\n", course.description));

        if !course.professors.is_empty() {
            let names: Vec<String> = course
                .professors
                .iter()
                .map(|p| format!("{} {}", p.title, p.name))
                .collect();
            answer.push_str(&format!("**Verildiği Hocalar:** {}\n\n", names.join(", ")));
        }

        if let Some(rating) = course.average_rating() {
            answer.push_str(&format!(
                "⭐ **Öğrenci Değerlendirmesi:** {:.1}/5 ({} yorum)\n\n",
                rating,
                course.student_comments.len()
            ));
            answer.push_str("💬 **Son Yorumlar:**\n");
            let skip = course.student_comments.len().saturating_sub(2);
            for comment in course.student_comments.iter().skip(skip) {
                answer.push_str(&format!("- \"{}\"\n", comment.comment));
            }
        }

        answer
    }
}
