//! Static explainer for the mentor / peer-matching feature.
//!
//! No store query: the feature lives in its own page, the assistant only
//! points students at it.

use std::sync::Arc;

use crate::config::ChatbotConfig;
use crate::models::{ChatResponse, RelatedEntities};
use crate::pipeline::intent::Intent;

pub struct MatchingHandler {
    config: Arc<ChatbotConfig>,
}

impl MatchingHandler {
    pub fn new(config: Arc<ChatbotConfig>) -> Self {
        Self { config }
    }

    pub fn handle(&self) -> ChatResponse {
        let answer = "👥 **Öğrenci Eşleştirme Sistemi**\n\n\
            Üst-alt sınıf eşleştirme sistemimiz ile:\n\n\
            ✅ Aldığınız dersleri daha önce almış üst sınıf öğrencilerle tanışabilir\n\
            ✅ Ders notlarını paylaşabilir, deneyim aktarımı yapabilirsiniz\n\
            ✅ Çalışma grupları oluşturabilirsiniz\n\n\
            Eşleştirme sistemini kullanmak için \"Eşleştirme\" sayfasına gidin ve \
            profilinizi oluşturun!"
            .to_string();

        ChatResponse {
            answer,
            intent: Intent::StudentMatching,
            confidence: self.config.confidence.matching,
            suggestions: vec![
                "Nasıl eşleşebilirim?".to_string(),
                "Mentörlük sistemi nedir?".to_string(),
                "Çalışma grubu bul".to_string(),
            ],
            related_entities: RelatedEntities::default(),
            ai_enhanced: false,
        }
    }
}
