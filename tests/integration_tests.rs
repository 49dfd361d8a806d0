// Integration tests for CampusConnect

use campus_connect::core::compatibility::{compatibility_score, CompatibilityParams};
use campus_connect::core::questions::default_question_pool;
use campus_connect::core::quiz::QuizEngine;
use campus_connect::models::{Match, MatchStatus, QuizQuestion, QuizResult};
use campus_connect::services::{DiscoverFilter, ProfileDirectory, Storage, StorageKey};
use chrono::Utc;
use std::collections::HashSet;

fn single_option_pool(count: usize) -> Vec<QuizQuestion> {
    (0..count)
        .map(|i| QuizQuestion {
            id: format!("q{}", i),
            question: format!("Question {}", i),
            options: vec![format!("only-{}", i)],
        })
        .collect()
}

#[test]
fn test_discover_pipeline_end_to_end() {
    let directory = ProfileDirectory::seeded();
    let params = CompatibilityParams::default();

    // Filter down to a college, then rank for a user from that college
    let filter = DiscoverFilter {
        college: Some("IIT Indore".to_string()),
        ..Default::default()
    };
    let candidates = directory.discover(&filter);
    assert_eq!(candidates.len(), 2);

    let user_interests: Vec<String> = ["Technology", "Hiking", "Coffee", "Photography"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    let ranked = directory.rank_by_compatibility(
        candidates,
        &user_interests,
        Some("IIT Indore"),
        &params,
    );

    // Aanya shares all four interests; Rohan only two
    assert_eq!(ranked[0].name, "Aanya Sharma");
    let top_score = compatibility_score(&user_interests, &ranked[0].interests, true, &params);
    assert_eq!(top_score, 100);
}

#[test]
fn test_compatibility_against_seeded_profiles() {
    let directory = ProfileDirectory::seeded();
    let params = CompatibilityParams::default();

    let profile = directory.get(1).expect("profile 1 is seeded");
    let user_interests: Vec<String> = ["Technology", "Hiking", "Cricket"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    // 2 of 3 shared -> 67, +10 for the shared college
    assert_eq!(
        compatibility_score(&user_interests, &profile.interests, false, &params),
        67
    );
    assert_eq!(
        compatibility_score(&user_interests, &profile.interests, true, &params),
        77
    );
}

#[tokio::test]
async fn test_quiz_flow_end_to_end() {
    let engine = QuizEngine::new(default_question_pool(), 5, 180);
    let storage = Storage::new();

    let quiz = engine.start("user-1", "3").await.unwrap();
    assert_eq!(quiz.questions.len(), 5);
    let ids: HashSet<_> = quiz.questions.iter().map(|q| q.id.clone()).collect();
    assert_eq!(ids.len(), 5);

    for question in &quiz.questions {
        engine
            .answer("user-1", &question.id, &question.options[0])
            .await
            .unwrap();
    }

    let result = engine.complete("user-1").await.unwrap();
    assert!(result.match_percentage <= 100);
    assert_eq!(result.user_answers.len(), 5);
    assert_eq!(result.partner_answers.len(), 5);
    assert_eq!(result.partner_id, "3");

    // Persist into the append-only log and read it back
    let key = StorageKey::quiz_results("user-1");
    let mut results: Vec<QuizResult> = storage.get_or_default(&key).await.unwrap();
    results.push(result.clone());
    storage.set(&key, &results).await.unwrap();

    let loaded: Vec<QuizResult> = storage.get(&key).await.unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].id, result.id);

    // Engine is idle again
    assert!(engine.snapshot("user-1").await.is_none());
}

#[tokio::test]
async fn test_quiz_deterministic_extremes() {
    // Single-option questions pin the synthesized partner answers
    let engine = QuizEngine::new(single_option_pool(5), 5, 180);

    let quiz = engine.start("agree", "3").await.unwrap();
    for question in &quiz.questions {
        engine
            .answer("agree", &question.id, &question.options[0])
            .await
            .unwrap();
    }
    assert_eq!(engine.complete("agree").await.unwrap().match_percentage, 100);

    let quiz = engine.start("disagree", "3").await.unwrap();
    for question in &quiz.questions {
        engine
            .answer("disagree", &question.id, "never an option")
            .await
            .unwrap();
    }
    assert_eq!(engine.complete("disagree").await.unwrap().match_percentage, 0);
}

#[tokio::test]
async fn test_quiz_deadline_auto_completes() {
    // Zero time limit: the first tick finds the attempt already due
    let engine = QuizEngine::new(default_question_pool(), 5, 0);

    let quiz = engine.start("user-1", "7").await.unwrap();
    engine
        .answer("user-1", &quiz.questions[0].id, &quiz.questions[0].options[0])
        .await
        .unwrap();

    let results = engine.expire_due(Utc::now()).await;
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].user_answers.len(), 1);
    assert_eq!(results[0].partner_id, "7");

    // Manual submit after expiry is a no-op
    assert!(engine.complete("user-1").await.is_err());
}

#[tokio::test]
async fn test_quiz_cancel_leaves_no_trace() {
    let engine = QuizEngine::new(default_question_pool(), 5, 180);

    let quiz = engine.start("user-1", "3").await.unwrap();
    engine
        .answer("user-1", &quiz.questions[0].id, &quiz.questions[0].options[0])
        .await
        .unwrap();

    assert!(engine.cancel("user-1").await);
    assert!(engine.snapshot("user-1").await.is_none());
    assert!(engine.expire_due(Utc::now()).await.is_empty());
}

#[tokio::test]
async fn test_storage_round_trip_and_versioning() {
    let storage = Storage::new();

    let matches = vec![Match {
        id: "m1".to_string(),
        user_id: "u1".to_string(),
        profile_id: 8,
        matched_at: Utc::now(),
        compatibility: 67,
        status: MatchStatus::Pending,
        is_mutual: false,
        last_message: None,
    }];

    let key = StorageKey::matches("u1");
    storage.set(&key, &matches).await.unwrap();

    let loaded: Vec<Match> = storage.get(&key).await.unwrap();
    assert_eq!(loaded[0].profile_id, 8);

    // Other namespaces are untouched
    let other: Vec<Match> = storage
        .get_or_default(&StorageKey::matches("u2"))
        .await
        .unwrap();
    assert!(other.is_empty());
}
