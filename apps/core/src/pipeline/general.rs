//! General handler: knowledge fallback plus optional generative augmentation.
//!
//! Runs when no domain intent matched. Gathers knowledge hits and loosely
//! related courses/professors, lets the augmenter try to compose a richer
//! answer, and otherwise serves the top knowledge entry or the welcome text.

use std::sync::Arc;
use tracing::debug;

use crate::config::ChatbotConfig;
use crate::error::AppError;
use crate::generative::{AnswerContext, AugmentOutcome, ResponseAugmenter};
use crate::models::{ChatResponse, RelatedEntities};
use crate::pipeline::intent::Intent;
use crate::store::{CampusStore, EntityQuery, KnowledgeQuery};

pub struct GeneralHandler {
    store: Arc<dyn CampusStore>,
    augmenter: ResponseAugmenter,
    config: Arc<ChatbotConfig>,
}

impl GeneralHandler {
    pub fn new(
        store: Arc<dyn CampusStore>,
        augmenter: ResponseAugmenter,
        config: Arc<ChatbotConfig>,
    ) -> Self {
        Self {
            store,
            augmenter,
            config,
        }
    }

    pub async fn handle(
        &self,
        message: &str,
        keywords: &[String],
    ) -> Result<ChatResponse, AppError> {
        let kb_hits = self
            .store
            .find_knowledge(&KnowledgeQuery {
                category: None,
                text: message.to_string(),
                keywords: keywords.to_vec(),
                limit: self.config.knowledge_limit,
            })
            .await?;

        // The two related lookups are read-only and order-independent.
        let (related_courses, related_professors) = if keywords.is_empty() {
            (vec![], vec![])
        } else {
            let course_query = EntityQuery::new(keywords.to_vec(), self.config.related_limit);
            let professor_query = EntityQuery::new(keywords.to_vec(), self.config.related_limit);
            tokio::try_join!(
                self.store.find_courses(&course_query),
                self.store.find_professors(&professor_query),
            )?
        };

        // One increment per request that selects a knowledge hit, whether
        // or not the augmenter ends up producing the answer.
        if let Some(top) = kb_hits.first() {
            self.store.increment_knowledge_view_count(&top.id).await?;
        }

        let related_entities = RelatedEntities {
            courses: related_courses.iter().map(|c| c.id.clone()).collect(),
            professors: related_professors.iter().map(|p| p.id.clone()).collect(),
            activities: vec![],
        };

        let context = AnswerContext {
            knowledge: kb_hits.clone(),
            courses: related_courses,
            professors: related_professors,
            activities: vec![],
        };

        match self.augmenter.augment(message, &context).await {
            AugmentOutcome::Enhanced {
                answer,
                suggestions,
            } => {
                return Ok(ChatResponse {
                    answer,
                    intent: Intent::General,
                    confidence: self.config.confidence.enhanced,
                    suggestions,
                    related_entities,
                    ai_enhanced: true,
                });
            }
            AugmentOutcome::Unavailable => {
                debug!("augmenter unavailable, using templated answer");
            }
            AugmentOutcome::Failed(reason) => {
                debug!(reason, "augmenter failed, using templated answer");
            }
        }

        if let Some(top) = kb_hits.first() {
            let suggestions = if top.related_questions.is_empty() {
                vec![
                    "Başka bir soru sor".to_string(),
                    "Dersler hakkında".to_string(),
                    "Etkinlikler hakkında".to_string(),
                ]
            } else {
                top.related_questions.clone()
            };

            return Ok(ChatResponse {
                answer: top.answer.clone(),
                intent: Intent::General,
                confidence: self.config.confidence.general_knowledge,
                suggestions,
                related_entities,
                ai_enhanced: false,
            });
        }

        Ok(Self::welcome_response(self.config.confidence.welcome))
    }

    /// Default welcome answer when neither the knowledge base nor the
    /// related lookups produced anything.
    fn welcome_response(confidence: f32) -> ChatResponse {
        let answer = "Merhaba! 👋 Ben UNİTE chatbot'u, size yardımcı olmak için buradayım.\n\n\
            Size şu konularda yardımcı olabilirim:\n\n\
            📚 **Dersler** - Ders içerikleri, zorluk seviyeleri, konular\n\
            👨‍🏫 **Hocalar** - Hoca bilgileri, ofis saatleri, iletişim\n\
            🎉 **Etkinlikler** - Sosyal aktiviteler, topluluklar, organizasyonlar\n\
            👥 **Eşleştirme** - Üst-alt sınıf eşleştirme, mentörlük\n\
            🏫 **Bölüm** - Genel bilgiler, sosyal dinamikler\n\n\
            Nasıl yardımcı olabilirim?"
            .to_string();

        ChatResponse {
            answer,
            intent: Intent::General,
            confidence,
            suggestions: vec![
                "Veri Yapıları dersi hakkında bilgi ver".to_string(),
                "Yaklaşan etkinlikler neler?".to_string(),
                "Nasıl mentör bulabilirim?".to_string(),
            ],
            related_entities: RelatedEntities::default(),
            ai_enhanced: false,
        }
    }
}
