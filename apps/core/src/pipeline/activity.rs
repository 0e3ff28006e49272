//! Event matcher: lists up to five upcoming events, keyword-filtered when
//! the message carries keywords, otherwise the soonest upcoming ones.

use chrono::Utc;
use std::sync::Arc;

use crate::config::ChatbotConfig;
use crate::error::AppError;
use crate::models::{Activity, ActivityStatus, ChatResponse, KnowledgeCategory, RelatedEntities};
use crate::pipeline::intent::Intent;
use crate::store::{ActivityQuery, CampusStore, KnowledgeQuery};

/// Description excerpt length in the event listing, in characters.
const DESCRIPTION_EXCERPT_CHARS: usize = 150;

pub struct ActivityMatcher {
    store: Arc<dyn CampusStore>,
    config: Arc<ChatbotConfig>,
}

impl ActivityMatcher {
    pub fn new(store: Arc<dyn CampusStore>, config: Arc<ChatbotConfig>) -> Self {
        Self { store, config }
    }

    pub async fn handle(
        &self,
        message: &str,
        keywords: &[String],
    ) -> Result<ChatResponse, AppError> {
        let now = Utc::now();

        // Keyword queries also surface ongoing events; the bare listing
        // shows only upcoming ones, soonest first.
        let query = if keywords.is_empty() {
            ActivityQuery {
                keywords: vec![],
                after: now,
                statuses: vec![ActivityStatus::Upcoming],
                limit: self.config.record_limit,
            }
        } else {
            ActivityQuery {
                keywords: keywords.to_vec(),
                after: now,
                statuses: vec![ActivityStatus::Upcoming, ActivityStatus::Ongoing],
                limit: self.config.record_limit,
            }
        };

        let activities = self.store.find_activities(&query).await?;

        if !activities.is_empty() {
            return Ok(ChatResponse {
                answer: Self::format_activities(&activities),
                intent: Intent::ActivityInfo,
                confidence: self.config.confidence.structured,
                suggestions: vec![
                    "Sosyal etkinlikler".to_string(),
                    "Akademik etkinlikler".to_string(),
                    "Bu hafta neler var?".to_string(),
                ],
                related_entities: RelatedEntities {
                    activities: activities.iter().map(|a| a.id.clone()).collect(),
                    ..RelatedEntities::default()
                },
                ai_enhanced: false,
            });
        }

        let kb_hits = self
            .store
            .find_knowledge(&KnowledgeQuery {
                category: Some(KnowledgeCategory::Social),
                text: message.to_string(),
                keywords: vec![],
                limit: self.config.knowledge_fallback_limit,
            })
            .await?;

        if let Some(hit) = kb_hits.first() {
            self.store.increment_knowledge_view_count(&hit.id).await?;
            return Ok(ChatResponse {
                answer: hit.answer.clone(),
                intent: Intent::ActivityInfo,
                confidence: self.config.confidence.knowledge,
                suggestions: hit.related_questions.clone(),
                related_entities: RelatedEntities::default(),
                ai_enhanced: false,
            });
        }

        Ok(ChatResponse {
            answer: "Şu anda bu konuda planlı bir etkinlik yok gibi görünüyor. Tüm \
                     etkinlikleri görmek için \"yaklaşan etkinlikler\" diyebilirsiniz."
                .to_string(),
            intent: Intent::ActivityInfo,
            confidence: self.config.confidence.activity_missing,
            suggestions: vec![
                "Yaklaşan tüm etkinlikler".to_string(),
                "Sosyal aktiviteler".to_string(),
                "Kulüpler".to_string(),
            ],
            related_entities: RelatedEntities::default(),
            ai_enhanced: false,
        })
    }

    fn format_activities(activities: &[Activity]) -> String {
        let mut answer = "📅 **Yaklaşan Etkinlikler:**\n\n".to_string();

        for (index, activity) in activities.iter().enumerate() {
            answer.push_str(&format!("**{}. {}**\n", index + 1, activity.title));
            answer.push_str(&format!("🏷️ Kategori: {}\n", activity.category));
            answer.push_str(&format!("📆 Tarih: {}\n", activity.date.format("%d.%m.%Y")));
            answer.push_str(&format!("⏰ Saat: {}\n", activity.time));

            let location = activity
                .location
                .as_ref()
                .and_then(|loc| loc.name.clone())
                .unwrap_or_else(|| "Belirtilmemiş".to_string());
            answer.push_str(&format!("📍 Konum: {}\n", location));
            answer.push_str(&format!("👥 Organizatör: {}\n", activity.organizer));

            if let (Some(capacity), Some(remaining)) =
                (activity.capacity, activity.remaining_capacity())
            {
                answer.push_str(&format!("🎫 Kontenjan: {}/{}\n", remaining, capacity));
            }

            answer.push_str(&format!("\n{}...\n\n", Self::excerpt(&activity.description)));
        }

        answer
    }

    /// Char-boundary-safe excerpt of the description.
    fn excerpt(description: &str) -> String {
        description.chars().take(DESCRIPTION_EXCERPT_CHARS).collect()
    }
}
