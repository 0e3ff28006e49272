//! Response augmentation via the generative provider.
//!
//! Builds a bounded textual context from retrieved records and asks the
//! provider for a composed answer plus follow-up suggestions. The augmenter
//! never queries the store itself, and any failure degrades to
//! [`AugmentOutcome::Failed`] - the caller falls back to the templated
//! knowledge-base answer.

use std::sync::Arc;
use tracing::warn;

use super::GenerativeClient;
use crate::error::AppError;
use crate::models::{Activity, Course, KnowledgeEntry, Professor};

/// Persona and behavior preamble prepended to every generation request.
const SYSTEM_CONTEXT: &str = "Sen bir üniversite bölümü için geliştirilmiş UNİTE chatbot asistanısın.

Görevlerin:
- Öğrencilere dersler, hocalar, etkinlikler ve kampüs hakkında bilgi vermek
- Profesyonel, dostane ve yardımsever bir dille iletişim kurmak
- Türkçe olarak doğal ve akıcı yanıtlar vermek
- Sadece verilen bağlam (context) bilgilerini kullanarak yanıt vermek
- Bilmediğin konularda dürüst olmak

Yanıt Kuralları:
1. Kısa ve öz yanıtlar ver (maksimum 3-4 paragraf)
2. Markdown formatı kullan (**, -, #)
3. Bağlamda bulunmayan bilgileri uydurmak yerine \"Bu konuda bilgim yok\" de
4. Her zaman Türkçe yanıt ver";

/// Fallback follow-up suggestions when the suggestion call fails.
const FALLBACK_SUGGESTIONS: &[&str] = &[
    "Dersler hakkında bilgi ver",
    "Yaklaşan etkinlikler neler?",
    "Hocalar hakkında bilgi",
];

/// Records retrieved by the general handler, bundled for context building.
#[derive(Debug, Clone, Default)]
pub struct AnswerContext {
    pub knowledge: Vec<KnowledgeEntry>,
    pub courses: Vec<Course>,
    pub professors: Vec<Professor>,
    pub activities: Vec<Activity>,
}

impl AnswerContext {
    pub fn is_empty(&self) -> bool {
        self.knowledge.is_empty()
            && self.courses.is_empty()
            && self.professors.is_empty()
            && self.activities.is_empty()
    }
}

/// Outcome of an augmentation attempt.
///
/// Callers pattern-match to pick the enhanced branch or fall through to
/// the templated answer; failures never propagate as errors.
#[derive(Debug, Clone)]
pub enum AugmentOutcome {
    /// The provider composed an answer; use it verbatim.
    Enhanced {
        answer: String,
        suggestions: Vec<String>,
    },
    /// Provider not configured, or nothing to build context from.
    Unavailable,
    /// Provider was attempted and failed; reason kept for logging only.
    Failed(String),
}

/// Composes enhanced answers from retrieved records and the user message.
pub struct ResponseAugmenter {
    client: Arc<dyn GenerativeClient>,
}

impl ResponseAugmenter {
    pub fn new(client: Arc<dyn GenerativeClient>) -> Self {
        Self { client }
    }

    /// Attempt a single augmented answer. No retry.
    pub async fn augment(&self, message: &str, context: &AnswerContext) -> AugmentOutcome {
        if !self.client.is_available() || context.is_empty() {
            return AugmentOutcome::Unavailable;
        }

        let prompt = format!(
            "{}\n\nBAĞLAM BİLGİLERİ:\n{}\n\nKULLANICI SORUSU:\n{}\n\n\
             Yukarıdaki bağlam bilgilerini kullanarak kullanıcı sorusuna doğal, \
             yardımsever ve Türkçe bir yanıt ver. Eğer bağlamda yeterli bilgi yoksa, \
             bunu kibarca belirt ve alternatif sorular öner.",
            SYSTEM_CONTEXT,
            Self::build_context_block(context),
            message
        );

        match self.client.generate(&prompt).await {
            Ok(answer) => {
                let suggestions = self.suggestions(message).await;
                AugmentOutcome::Enhanced {
                    answer,
                    suggestions,
                }
            }
            Err(AppError::GenerativeUnavailable) => AugmentOutcome::Unavailable,
            Err(err) => {
                warn!(error = %err, "generative augmentation failed, using templated answer");
                AugmentOutcome::Failed(err.to_string())
            }
        }
    }

    /// Ask for up to three follow-up questions; fall back to a fixed list.
    async fn suggestions(&self, message: &str) -> Vec<String> {
        let prompt = format!(
            "Kullanıcının sorusu: \"{}\"\n\n\
             Yukarıdaki soruyla ilgili 3 takip sorusu öner. Her soru tek satır olmalı, \
             Türkçe ve doğal olmalı.\n\
             Sadece soruları ver, numaralandırma veya açıklama ekleme.",
            message
        );

        match self.client.generate(&prompt).await {
            Ok(text) => {
                let suggestions: Vec<String> = text
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .take(3)
                    .map(str::to_string)
                    .collect();

                if suggestions.is_empty() {
                    Self::fallback_suggestions()
                } else {
                    suggestions
                }
            }
            Err(err) => {
                warn!(error = %err, "suggestion generation failed");
                Self::fallback_suggestions()
            }
        }
    }

    fn fallback_suggestions() -> Vec<String> {
        FALLBACK_SUGGESTIONS.iter().map(|s| s.to_string()).collect()
    }

    /// Render the labeled context block. Empty sections are omitted.
    fn build_context_block(context: &AnswerContext) -> String {
        let mut parts: Vec<String> = Vec::new();

        if !context.knowledge.is_empty() {
            parts.push("BİLGİ BANKASI:".to_string());
            for (index, entry) in context.knowledge.iter().enumerate() {
                parts.push(format!("\n{}. Soru: {}", index + 1, entry.question));
                parts.push(format!("   Cevap: {}", entry.answer));
                if !entry.keywords.is_empty() {
                    parts.push(format!("   Anahtar Kelimeler: {}", entry.keywords.join(", ")));
                }
            }
            parts.push(String::new());
        }

        if !context.courses.is_empty() {
            parts.push("DERSLER:".to_string());
            for (index, course) in context.courses.iter().enumerate() {
                parts.push(format!("\n{}. {} ({})", index + 1, course.name, course.code));
                parts.push(format!("   - Kredi: {}", course.credits));
                parts.push(format!("   - Dönem: {}. yarıyıl", course.semester));
                parts.push(format!("   - Zorluk: {}", course.difficulty));
                parts.push(format!("   - Açıklama: {}", course.description));
                if !course.professors.is_empty() {
                    let names: Vec<String> = course
                        .professors
                        .iter()
                        .map(|p| format!("{} {}", p.title, p.name))
                        .collect();
                    parts.push(format!("   - Hocalar: {}", names.join(", ")));
                }
                if let Some(rating) = course.average_rating() {
                    parts.push(format!("   - Öğrenci Puanı: {:.1}/5", rating));
                    if let Some(comment) = course.student_comments.first() {
                        parts.push(format!("   - Örnek Yorum: \"{}\"", comment.comment));
                    }
                }
            }
            parts.push(String::new());
        }

        if !context.professors.is_empty() {
            parts.push("HOCALAR:".to_string());
            for (index, prof) in context.professors.iter().enumerate() {
                parts.push(format!("\n{}. {} {}", index + 1, prof.title, prof.name));
                parts.push(format!("   - Bölüm: {}", prof.department));
                parts.push(format!("   - E-posta: {}", prof.email));
                if let Some(office) = &prof.office_location {
                    parts.push(format!("   - Ofis: {}", office));
                }
                if let Some(hours) = &prof.office_hours {
                    parts.push(format!("   - Ofis Saatleri: {}", hours));
                }
                if !prof.research_areas.is_empty() {
                    parts.push(format!(
                        "   - Araştırma Alanları: {}",
                        prof.research_areas.join(", ")
                    ));
                }
                if let Some(rating) = prof.average_rating() {
                    parts.push(format!("   - Öğrenci Puanı: {:.1}/5", rating));
                }
            }
            parts.push(String::new());
        }

        if !context.activities.is_empty() {
            parts.push("ETKİNLİKLER:".to_string());
            for (index, activity) in context.activities.iter().enumerate() {
                parts.push(format!("\n{}. {}", index + 1, activity.title));
                parts.push(format!("   - Kategori: {}", activity.category));
                parts.push(format!("   - Tarih: {}", activity.date.format("%d.%m.%Y")));
                parts.push(format!("   - Saat: {}", activity.time));
                let location = activity
                    .location
                    .as_ref()
                    .and_then(|loc| loc.name.clone())
                    .unwrap_or_else(|| "Belirtilmemiş".to_string());
                parts.push(format!("   - Konum: {}", location));
                parts.push(format!("   - Organizatör: {}", activity.organizer));
                parts.push(format!("   - Açıklama: {}", activity.description));
                if let (Some(capacity), Some(remaining)) =
                    (activity.capacity, activity.remaining_capacity())
                {
                    parts.push(format!("   - Kontenjan: {}/{}", remaining, capacity));
                }
            }
            parts.push(String::new());
        }

        if parts.is_empty() {
            return "Veritabanında ilgili bilgi bulunamadı. Genel bilgilerinle yanıt ver."
                .to_string();
        }

        parts.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::KnowledgeCategory;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubClient {
        available: bool,
        responses: Vec<Result<String, AppError>>,
        calls: AtomicUsize,
    }

    impl StubClient {
        fn new(available: bool, responses: Vec<Result<String, AppError>>) -> Self {
            Self {
                available,
                responses,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl GenerativeClient for StubClient {
        fn is_available(&self) -> bool {
            self.available
        }

        async fn generate(&self, _prompt: &str) -> Result<String, AppError> {
            let index = self.calls.fetch_add(1, Ordering::SeqCst);
            self.responses
                .get(index)
                .cloned()
                .unwrap_or(Err(AppError::GenerativeProvider("exhausted".to_string())))
        }
    }

    fn knowledge_entry() -> KnowledgeEntry {
        KnowledgeEntry {
            id: "k1".to_string(),
            category: KnowledgeCategory::General,
            question: "Yemekhane nerede?".to_string(),
            answer: "Merkez kampüste.".to_string(),
            keywords: vec!["yemekhane".to_string()],
            related_questions: vec![],
            importance: 3,
            view_count: 0,
            helpful_count: 0,
        }
    }

    fn context_with_knowledge() -> AnswerContext {
        AnswerContext {
            knowledge: vec![knowledge_entry()],
            ..AnswerContext::default()
        }
    }

    #[tokio::test]
    async fn test_enhanced_outcome() {
        let client = Arc::new(StubClient::new(
            true,
            vec![
                Ok("Yemekhane merkez kampüstedir.".to_string()),
                Ok("Menü nedir?\nFiyatlar nasıl?\nAçılış saatleri?".to_string()),
            ],
        ));
        let augmenter = ResponseAugmenter::new(client);

        let outcome = augmenter
            .augment("yemekhane nerede", &context_with_knowledge())
            .await;

        match outcome {
            AugmentOutcome::Enhanced { answer, suggestions } => {
                assert_eq!(answer, "Yemekhane merkez kampüstedir.");
                assert_eq!(suggestions.len(), 3);
                assert_eq!(suggestions[0], "Menü nedir?");
            }
            other => panic!("expected Enhanced, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unavailable_when_not_configured() {
        let client = Arc::new(StubClient::new(false, vec![]));
        let augmenter = ResponseAugmenter::new(client);

        let outcome = augmenter
            .augment("yemekhane nerede", &context_with_knowledge())
            .await;
        assert!(matches!(outcome, AugmentOutcome::Unavailable));
    }

    #[tokio::test]
    async fn test_unavailable_when_context_empty() {
        let client = Arc::new(StubClient::new(true, vec![Ok("cevap".to_string())]));
        let augmenter = ResponseAugmenter::new(client);

        let outcome = augmenter
            .augment("yemekhane nerede", &AnswerContext::default())
            .await;
        assert!(matches!(outcome, AugmentOutcome::Unavailable));
    }

    #[tokio::test]
    async fn test_failed_on_provider_error() {
        let client = Arc::new(StubClient::new(
            true,
            vec![Err(AppError::GenerativeProvider("boom".to_string()))],
        ));
        let augmenter = ResponseAugmenter::new(client);

        let outcome = augmenter
            .augment("yemekhane nerede", &context_with_knowledge())
            .await;
        assert!(matches!(outcome, AugmentOutcome::Failed(_)));
    }

    #[tokio::test]
    async fn test_suggestion_failure_uses_fallback_list() {
        let client = Arc::new(StubClient::new(
            true,
            vec![
                Ok("Yanıt.".to_string()),
                Err(AppError::GenerativeProvider("boom".to_string())),
            ],
        ));
        let augmenter = ResponseAugmenter::new(client);

        match augmenter
            .augment("yemekhane nerede", &context_with_knowledge())
            .await
        {
            AugmentOutcome::Enhanced { suggestions, .. } => {
                assert_eq!(suggestions.len(), 3);
                assert_eq!(suggestions[0], "Dersler hakkında bilgi ver");
            }
            other => panic!("expected Enhanced, got {:?}", other),
        }
    }

    #[test]
    fn test_context_block_omits_empty_sections() {
        let block = ResponseAugmenter::build_context_block(&context_with_knowledge());

        assert!(block.contains("BİLGİ BANKASI:"));
        assert!(!block.contains("DERSLER:"));
        assert!(!block.contains("HOCALAR:"));
        assert!(!block.contains("ETKİNLİKLER:"));
        assert!(block.contains("Yemekhane nerede?"));
    }
}
