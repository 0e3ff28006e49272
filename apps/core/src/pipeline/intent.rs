//! Intent classification using ordered keyword families.
//!
//! A deliberately simple design: four fixed term families are tested
//! against the lowercased message in a strict priority order and the first
//! family containing any matching term wins. A message mentioning both a
//! course term and a professor term therefore resolves to `CourseInfo`.
//! The precedence order is part of the contract and covered by tests.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse category assigned to a user message.
///
/// Drives which domain matcher handles the request. Exactly one intent is
/// assigned per message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Course contents, credits, difficulty, exams.
    CourseInfo,
    /// Instructors, office hours, contact details.
    ProfessorInfo,
    /// Events, clubs, seminars.
    ActivityInfo,
    /// Mentor / peer matching feature.
    StudentMatching,
    /// Anything else; handled by the knowledge fallback.
    General,
    /// Reserved for records whose intent was never assigned.
    Unknown,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Intent {
    /// Returns the wire label for the intent.
    pub fn label(&self) -> &'static str {
        match self {
            Intent::CourseInfo => "course_info",
            Intent::ProfessorInfo => "professor_info",
            Intent::ActivityInfo => "activity_info",
            Intent::StudentMatching => "student_matching",
            Intent::General => "general",
            Intent::Unknown => "unknown",
        }
    }
}

/// Term family for one intent, evaluated by substring containment.
struct IntentFamily {
    intent: Intent,
    terms: &'static [&'static str],
}

const COURSE_TERMS: &[&str] = &[
    "ders", "kurs", "dersler", "kredisi", "içerik", "konular", "ödev", "proje", "sınav",
    "final", "vize",
];

const PROFESSOR_TERMS: &[&str] = &[
    "hoca", "hocam", "öğretim görevlisi", "profesör", "doçent", "dr.", "öğretmen", "ofis",
    "danışman",
];

const ACTIVITY_TERMS: &[&str] = &[
    "etkinlik", "aktivite", "topluluk", "kulüp", "sosyal", "organizasyon", "seminer",
    "konferans", "workshop",
];

const MATCHING_TERMS: &[&str] = &[
    "mentör", "mentor", "üst sınıf", "alt sınıf", "eşleş", "not paylaş", "çalışma grubu",
    "arkadaş bul",
];

/// Intent classifier over ordered keyword families.
pub struct IntentClassifier {
    families: Vec<IntentFamily>,
}

impl Default for IntentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl IntentClassifier {
    /// Create a classifier with the fixed family order:
    /// course → professor → activity → matching.
    pub fn new() -> Self {
        let families = vec![
            IntentFamily {
                intent: Intent::CourseInfo,
                terms: COURSE_TERMS,
            },
            IntentFamily {
                intent: Intent::ProfessorInfo,
                terms: PROFESSOR_TERMS,
            },
            IntentFamily {
                intent: Intent::ActivityInfo,
                terms: ACTIVITY_TERMS,
            },
            IntentFamily {
                intent: Intent::StudentMatching,
                terms: MATCHING_TERMS,
            },
        ];

        Self { families }
    }

    /// Classify a message. Total and deterministic: unmatched input
    /// returns [`Intent::General`], never an error.
    pub fn classify(&self, text: &str) -> Intent {
        let lower = text.to_lowercase();

        for family in &self.families {
            if family.terms.iter().any(|term| lower.contains(term)) {
                return family.intent;
            }
        }

        Intent::General
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_intent() {
        let classifier = IntentClassifier::new();

        assert_eq!(classifier.classify("BIL211 dersi zor mu?"), Intent::CourseInfo);
        assert_eq!(classifier.classify("Vize tarihleri belli mi"), Intent::CourseInfo);
        assert_eq!(classifier.classify("kaç kredisi var"), Intent::CourseInfo);
    }

    #[test]
    fn test_professor_intent() {
        let classifier = IntentClassifier::new();

        assert_eq!(classifier.classify("Ayşe Demir hoca nasıl?"), Intent::ProfessorInfo);
        assert_eq!(classifier.classify("danışman atamaları"), Intent::ProfessorInfo);
    }

    #[test]
    fn test_activity_intent() {
        let classifier = IntentClassifier::new();

        assert_eq!(classifier.classify("bu hafta etkinlik var mı"), Intent::ActivityInfo);
        assert_eq!(classifier.classify("satranç kulübü toplantısı"), Intent::ActivityInfo);
    }

    #[test]
    fn test_matching_intent() {
        let classifier = IntentClassifier::new();

        assert_eq!(classifier.classify("bana bir mentör lazım"), Intent::StudentMatching);
        assert_eq!(classifier.classify("çalışma grubu arıyorum"), Intent::StudentMatching);
    }

    #[test]
    fn test_general_fallback() {
        let classifier = IntentClassifier::new();

        assert_eq!(classifier.classify("merhaba"), Intent::General);
        assert_eq!(classifier.classify(""), Intent::General);
        assert_eq!(classifier.classify("yemekhane menüsü"), Intent::General);
    }

    #[test]
    fn test_precedence_course_over_professor() {
        let classifier = IntentClassifier::new();

        // Contains both a course term ("ders") and a professor term ("hoca");
        // the course family is checked first and must win.
        assert_eq!(
            classifier.classify("bu dersi hangi hoca veriyor"),
            Intent::CourseInfo
        );
    }

    #[test]
    fn test_precedence_professor_over_activity() {
        let classifier = IntentClassifier::new();

        assert_eq!(
            classifier.classify("hoca seminer verecek mi"),
            Intent::ProfessorInfo
        );
    }

    #[test]
    fn test_determinism() {
        let classifier = IntentClassifier::new();

        let text = "etkinlik ve sosyal topluluk";
        let first = classifier.classify(text);
        for _ in 0..10 {
            assert_eq!(classifier.classify(text), first);
        }
    }

    #[test]
    fn test_substring_containment_not_token_match() {
        let classifier = IntentClassifier::new();

        // "derslerin" contains "ders" as a substring; containment semantics
        // are intentional, see DESIGN.md.
        assert_eq!(classifier.classify("derslerin listesi"), Intent::CourseInfo);
    }
}
