//! Professor matcher. Same tiering as the course matcher, with the
//! professor-specific answer template.

use std::sync::Arc;
use tracing::debug;

use crate::config::ChatbotConfig;
use crate::error::AppError;
use crate::models::{ChatResponse, KnowledgeCategory, Professor, RelatedEntities};
use crate::pipeline::intent::Intent;
use crate::store::{CampusStore, EntityQuery, KnowledgeQuery};

pub struct ProfessorMatcher {
    store: Arc<dyn CampusStore>,
    config: Arc<ChatbotConfig>,
}

impl ProfessorMatcher {
    pub fn new(store: Arc<dyn CampusStore>, config: Arc<ChatbotConfig>) -> Self {
        Self { store, config }
    }

    pub async fn handle(
        &self,
        message: &str,
        keywords: &[String],
    ) -> Result<ChatResponse, AppError> {
        let professors = if keywords.is_empty() {
            vec![]
        } else {
            self.store
                .find_professors(&EntityQuery::new(
                    keywords.to_vec(),
                    self.config.record_limit,
                ))
                .await?
        };

        if let Some(prof) = professors.first() {
            debug!(name = %prof.name, "professor matched");
            return Ok(ChatResponse {
                answer: Self::format_professor(prof),
                intent: Intent::ProfessorInfo,
                confidence: self.config.confidence.structured,
                suggestions: vec![
                    "Hangi dersleri veriyor?".to_string(),
                    "Ofis saatleri ne zaman?".to_string(),
                    "Araştırma alanları neler?".to_string(),
                ],
                related_entities: RelatedEntities {
                    professors: professors.iter().map(|p| p.id.clone()).collect(),
                    ..RelatedEntities::default()
                },
                ai_enhanced: false,
            });
        }

        let kb_hits = self
            .store
            .find_knowledge(&KnowledgeQuery {
                category: Some(KnowledgeCategory::Professors),
                text: message.to_string(),
                keywords: vec![],
                limit: self.config.knowledge_fallback_limit,
            })
            .await?;

        if let Some(hit) = kb_hits.first() {
            self.store.increment_knowledge_view_count(&hit.id).await?;
            return Ok(ChatResponse {
                answer: hit.answer.clone(),
                intent: Intent::ProfessorInfo,
                confidence: self.config.confidence.knowledge,
                suggestions: hit.related_questions.clone(),
                related_entities: RelatedEntities::default(),
                ai_enhanced: false,
            });
        }

        Ok(ChatResponse {
            answer: "Üzgünüm, aradığınız hoca ile ilgili bilgi bulamadım. Hocanın ismini \
                     daha net yazabilir misiniz?"
                .to_string(),
            intent: Intent::ProfessorInfo,
            confidence: self.config.confidence.not_found,
            suggestions: vec![
                "Tüm hocaları göster".to_string(),
                "Veri yapıları dersini kim veriyor?".to_string(),
            ],
            related_entities: RelatedEntities::default(),
            ai_enhanced: false,
        })
    }

    fn format_professor(prof: &Professor) -> String {
        let mut answer = format!("**{} {}** hakkında bilgiler:\n\n", prof.title, prof.name);
        answer.push_str(&format!("🏢 **Bölüm:** {}\n", prof.department));
        answer.push_str(&format!("📧 **E-posta:** {}\n", prof.email));

        if let Some(office) = &prof.office_location {
            answer.push_str(&format!("🚪 **Ofis:** {}\n", office));
        }
        if let Some(hours) = &prof.office_hours {
            answer.push_str(&format!("⏰ **Ofis Saatleri:** {}\n", hours));
        }

        if !prof.research_areas.is_empty() {
            answer.push_str(&format!(
                "\n🔬 **Araştırma Alanları:** {}\n",
                prof.research_areas.join(", ")
            ));
        }

        if !prof.courses.is_empty() {
            let courses: Vec<String> = prof
                .courses
                .iter()
                .map(|c| format!("{} - {}", c.code, c.name))
                .collect();
            answer.push_str(&format!("\n📚 **Verdiği Dersler:** {}\n", courses.join(", ")));
        }

        if let Some(rating) = prof.average_rating() {
            answer.push_str(&format!(
                "\n⭐ **Öğrenci Değerlendirmesi:** {:.1}/5 ({} değerlendirme)\n",
                rating,
                prof.student_reviews.len()
            ));

            if let Some(comment) = prof.latest_review().and_then(|r| r.comment.as_ref()) {
                answer.push_str(&format!("\n💬 **Son Yorum:** \"{}\"\n", comment));
            }
        }

        answer
    }
}
