//! Memory store query and counter semantics.

use chrono::{Duration, Utc};

use crate::models::{
    Activity, ActivityStatus, Course, KnowledgeCategory, KnowledgeEntry, Professor,
};
use crate::store::{ActivityQuery, CampusStore, EntityQuery, KnowledgeQuery, MemoryStore};

fn course(code: &str, name: &str, topics: &[&str]) -> Course {
    Course {
        id: String::new(),
        code: code.to_string(),
        name: name.to_string(),
        department: "Bilgisayar Mühendisliği".to_string(),
        credits: 4,
        semester: 3,
        description: "Açıklama".to_string(),
        topics: topics.iter().map(|t| t.to_string()).collect(),
        difficulty: "Orta".to_string(),
        professors: vec![],
        student_comments: vec![],
    }
}

fn professor(name: &str, areas: &[&str]) -> Professor {
    Professor {
        id: String::new(),
        name: name.to_string(),
        title: "Doç. Dr.".to_string(),
        department: "Bilgisayar Mühendisliği".to_string(),
        email: "test@example.edu.tr".to_string(),
        office_location: None,
        office_hours: None,
        research_areas: areas.iter().map(|a| a.to_string()).collect(),
        courses: vec![],
        student_reviews: vec![],
    }
}

fn activity(title: &str, days_from_now: i64, status: ActivityStatus) -> Activity {
    Activity {
        id: String::new(),
        title: title.to_string(),
        category: "Akademik".to_string(),
        description: "Etkinlik açıklaması".to_string(),
        organizer: "IEEE".to_string(),
        location: None,
        date: Utc::now() + Duration::days(days_from_now),
        time: "14:00".to_string(),
        capacity: None,
        registered_students: vec![],
        status,
    }
}

fn knowledge(
    category: KnowledgeCategory,
    question: &str,
    keywords: &[&str],
    importance: u8,
    view_count: u64,
) -> KnowledgeEntry {
    KnowledgeEntry {
        id: String::new(),
        category,
        question: question.to_string(),
        answer: format!("Cevap: {}", question),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        related_questions: vec![],
        importance,
        view_count,
        helpful_count: 0,
    }
}

#[tokio::test]
async fn test_course_keyword_or_matching() {
    let store = MemoryStore::new();
    store
        .insert_course(course("BIL211", "Veri Yapıları", &["ağaçlar"]))
        .expect("insert");
    store
        .insert_course(course("MAT101", "Matematik I", &[]))
        .expect("insert");

    // Matches by code substring.
    let hits = store
        .find_courses(&EntityQuery::new(vec!["bil211".to_string()], 5))
        .await
        .expect("query");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].code, "BIL211");

    // Matches by topic membership.
    let hits = store
        .find_courses(&EntityQuery::new(vec!["ağaçlar".to_string()], 5))
        .await
        .expect("query");
    assert_eq!(hits.len(), 1);

    // OR across keywords.
    let hits = store
        .find_courses(&EntityQuery::new(
            vec!["matematik".to_string(), "veri".to_string()],
            5,
        ))
        .await
        .expect("query");
    assert_eq!(hits.len(), 2);
}

#[tokio::test]
async fn test_accent_insensitive_matching() {
    let store = MemoryStore::new();
    store
        .insert_course(course("BIL211", "Veri Yapıları", &["ağaçlar"]))
        .expect("insert");

    // ASCII-typed queries hit accented names and topics.
    let hits = store
        .find_courses(&EntityQuery::new(vec!["yapilari".to_string()], 5))
        .await
        .expect("query");
    assert_eq!(hits.len(), 1);

    let hits = store
        .find_courses(&EntityQuery::new(vec!["agaclar".to_string()], 5))
        .await
        .expect("query");
    assert_eq!(hits.len(), 1);
}

#[tokio::test]
async fn test_empty_keywords_match_nothing() {
    let store = MemoryStore::new();
    store
        .insert_course(course("BIL211", "Veri Yapıları", &[]))
        .expect("insert");

    let hits = store
        .find_courses(&EntityQuery::new(vec![], 5))
        .await
        .expect("query");
    assert!(hits.is_empty());

    let hits = store
        .find_professors(&EntityQuery::new(vec![], 5))
        .await
        .expect("query");
    assert!(hits.is_empty());
}

#[tokio::test]
async fn test_professor_research_area_exact_membership() {
    let store = MemoryStore::new();
    store
        .insert_professor(professor("Ayşe Demir", &["yapay zeka"]))
        .expect("insert");

    // Area matching is whole-value, not substring.
    let hits = store
        .find_professors(&EntityQuery::new(vec!["yapay zeka".to_string()], 5))
        .await
        .expect("query");
    assert_eq!(hits.len(), 1);

    let hits = store
        .find_professors(&EntityQuery::new(vec!["yapay".to_string()], 5))
        .await
        .expect("query");
    assert!(hits.is_empty());

    // Name matching is substring.
    let hits = store
        .find_professors(&EntityQuery::new(vec!["demir".to_string()], 5))
        .await
        .expect("query");
    assert_eq!(hits.len(), 1);
}

#[tokio::test]
async fn test_activities_sorted_by_date_and_filtered_by_status() {
    let store = MemoryStore::new();
    store
        .insert_activity(activity("Sonraki Ay", 30, ActivityStatus::Upcoming))
        .expect("insert");
    store
        .insert_activity(activity("Yarın", 1, ActivityStatus::Upcoming))
        .expect("insert");
    store
        .insert_activity(activity("Geçmiş", -5, ActivityStatus::Completed))
        .expect("insert");
    store
        .insert_activity(activity("İptal", 3, ActivityStatus::Cancelled))
        .expect("insert");

    let hits = store
        .find_activities(&ActivityQuery {
            keywords: vec![],
            after: Utc::now(),
            statuses: vec![ActivityStatus::Upcoming],
            limit: 5,
        })
        .await
        .expect("query");

    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].title, "Yarın");
    assert_eq!(hits[1].title, "Sonraki Ay");
}

#[tokio::test]
async fn test_knowledge_ranked_by_importance_then_views() {
    let store = MemoryStore::new();
    store
        .insert_knowledge(knowledge(
            KnowledgeCategory::General,
            "Yemekhane nerede?",
            &["yemekhane"],
            3,
            10,
        ))
        .expect("insert");
    store
        .insert_knowledge(knowledge(
            KnowledgeCategory::General,
            "Yemekhane fiyatları nedir?",
            &["yemekhane"],
            5,
            0,
        ))
        .expect("insert");
    store
        .insert_knowledge(knowledge(
            KnowledgeCategory::General,
            "Yemekhane menüsü nasıl?",
            &["yemekhane"],
            3,
            50,
        ))
        .expect("insert");

    let hits = store
        .find_knowledge(&KnowledgeQuery {
            category: None,
            text: "yemekhane hakkında".to_string(),
            keywords: vec!["yemekhane".to_string()],
            limit: 5,
        })
        .await
        .expect("query");

    assert_eq!(hits.len(), 3);
    assert_eq!(hits[0].question, "Yemekhane fiyatları nedir?");
    assert_eq!(hits[1].question, "Yemekhane menüsü nasıl?");
    assert_eq!(hits[2].question, "Yemekhane nerede?");
}

#[tokio::test]
async fn test_knowledge_category_filter() {
    let store = MemoryStore::new();
    store
        .insert_knowledge(knowledge(
            KnowledgeCategory::Courses,
            "Zorunlu dersler hangileri?",
            &["zorunlu"],
            3,
            0,
        ))
        .expect("insert");
    store
        .insert_knowledge(knowledge(
            KnowledgeCategory::Professors,
            "Danışman hocalar kim?",
            &["danışman"],
            3,
            0,
        ))
        .expect("insert");

    let hits = store
        .find_knowledge(&KnowledgeQuery {
            category: Some(KnowledgeCategory::Courses),
            text: "zorunlu dersler".to_string(),
            keywords: vec![],
            limit: 5,
        })
        .await
        .expect("query");

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].category, KnowledgeCategory::Courses);
}

#[tokio::test]
async fn test_view_count_increment() {
    let store = MemoryStore::new();
    let id = store
        .insert_knowledge(knowledge(
            KnowledgeCategory::General,
            "Yemekhane nerede?",
            &["yemekhane"],
            3,
            0,
        ))
        .expect("insert");

    store
        .increment_knowledge_view_count(&id)
        .await
        .expect("increment");
    store
        .increment_knowledge_view_count(&id)
        .await
        .expect("increment");

    assert_eq!(store.knowledge_view_count(&id), Some(2));

    // Unknown ids are ignored, not errors.
    store
        .increment_knowledge_view_count("missing")
        .await
        .expect("increment");
}

#[tokio::test]
async fn test_insert_mints_ids() {
    let store = MemoryStore::new();
    let id = store
        .insert_course(course("BIL211", "Veri Yapıları", &[]))
        .expect("insert");

    assert!(!id.is_empty());
}

#[tokio::test]
async fn test_result_limit_applied() {
    let store = MemoryStore::new();
    for index in 0..10 {
        store
            .insert_course(course(
                &format!("BIL{:03}", index),
                &format!("Ders {}", index),
                &[],
            ))
            .expect("insert");
    }

    let hits = store
        .find_courses(&EntityQuery::new(vec!["ders".to_string()], 5))
        .await
        .expect("query");
    assert_eq!(hits.len(), 5);
}
