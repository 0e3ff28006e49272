//! The chatbot service: sole entry point of the pipeline.
//!
//! Extractor → classifier → matching domain handler → response, with a
//! catch-all boundary so the transport layer never sees a raw error. One
//! service instance is constructed at startup and shared across requests;
//! all per-request state is local.

use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, error, instrument, warn};

use crate::config::ChatbotConfig;
use crate::generative::{GenerativeClient, ResponseAugmenter};
use crate::models::{ChatResponse, ConversationRecord};
use crate::pipeline::activity::ActivityMatcher;
use crate::pipeline::course::CourseMatcher;
use crate::pipeline::general::GeneralHandler;
use crate::pipeline::intent::{Intent, IntentClassifier};
use crate::pipeline::keywords::KeywordExtractor;
use crate::pipeline::matching::MatchingHandler;
use crate::pipeline::professor::ProfessorMatcher;
use crate::store::{CampusStore, ConversationLog};

pub struct ChatbotService {
    extractor: KeywordExtractor,
    classifier: IntentClassifier,
    course: CourseMatcher,
    professor: ProfessorMatcher,
    activity: ActivityMatcher,
    matching: MatchingHandler,
    general: GeneralHandler,
    log: Arc<dyn ConversationLog>,
}

impl ChatbotService {
    pub fn new(
        store: Arc<dyn CampusStore>,
        generative: Arc<dyn GenerativeClient>,
        log: Arc<dyn ConversationLog>,
        config: ChatbotConfig,
    ) -> Self {
        let config = Arc::new(config);
        let augmenter = ResponseAugmenter::new(generative);

        Self {
            extractor: KeywordExtractor::new(),
            classifier: IntentClassifier::new(),
            course: CourseMatcher::new(Arc::clone(&store), Arc::clone(&config)),
            professor: ProfessorMatcher::new(Arc::clone(&store), Arc::clone(&config)),
            activity: ActivityMatcher::new(Arc::clone(&store), Arc::clone(&config)),
            matching: MatchingHandler::new(Arc::clone(&config)),
            general: GeneralHandler::new(Arc::clone(&store), augmenter, Arc::clone(&config)),
            log,
        }
    }

    /// Process one user message. Never raises: any failure from a matcher
    /// or collaborator collapses into an apologetic low-confidence answer
    /// with the detected intent preserved.
    #[instrument(skip(self, message), fields(session_id = %session_id))]
    pub async fn process_message(&self, message: &str, session_id: &str) -> ChatResponse {
        let message = message.trim();

        let mut keywords = self.extractor.extract(message);
        let entities = self.extractor.extract_entities(message);
        let intent = self.classifier.classify(message);

        debug!(
            ?intent,
            keyword_count = keywords.len(),
            course_codes = ?entities.course_codes,
            is_greeting = entities.is_greeting,
            "message analyzed"
        );

        // Normalized course codes ("bil 211" → "bil211") sharpen the
        // course lookup beyond what plain tokenization yields.
        if intent == Intent::CourseInfo {
            for code in &entities.course_codes {
                let code = code.to_lowercase();
                if !keywords.contains(&code) {
                    keywords.push(code);
                }
            }
        }

        let result = match intent {
            Intent::CourseInfo => self.course.handle(message, &keywords).await,
            Intent::ProfessorInfo => self.professor.handle(message, &keywords).await,
            Intent::ActivityInfo => self.activity.handle(message, &keywords).await,
            Intent::StudentMatching => Ok(self.matching.handle()),
            Intent::General | Intent::Unknown => self.general.handle(message, &keywords).await,
        };

        let response = match result {
            Ok(response) => response,
            Err(err) => {
                error!(error = %err, "message processing failed");
                Self::error_response(intent)
            }
        };

        self.append_record(message, session_id, &response).await;

        response
    }

    async fn append_record(&self, message: &str, session_id: &str, response: &ChatResponse) {
        let record = ConversationRecord {
            session_id: session_id.to_string(),
            user_message: message.to_string(),
            bot_response: response.answer.clone(),
            intent: response.intent,
            confidence: response.confidence,
            related_entities: response.related_entities.clone(),
            created_at: Utc::now(),
        };

        // Logging is best effort; a failing sink must not fail the answer.
        if let Err(err) = self.log.append(record).await {
            warn!(error = %err, "failed to append conversation record");
        }
    }

    fn error_response(intent: Intent) -> ChatResponse {
        ChatResponse {
            answer: "Üzgünüm, sorunuzu işlerken bir hata oluştu. Lütfen farklı bir şekilde \
                     sormayı deneyin."
                .to_string(),
            ..ChatResponse::empty(intent)
        }
    }
}
