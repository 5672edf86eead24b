mod common;

use std::sync::Arc;

use serde_json::json;

use common::{GatedApi, StubApi};
use mastery_core::model::{MasteryBuckets, TopicId};
use services::{LearningSystem, RecordingRenderer, RenderEvent};
use storage::repository::StoredUser;
use storage::InMemoryStateStore;

fn topics_payload() -> serde_json::Value {
    json!([
        {
            "id": 1,
            "name": "Arrays",
            "subject_name": "Data Structures",
            "quiz": [
                {"q": "Array access?", "options": ["O(1)", "O(n)"], "correct": 0},
                {"q": "First index?", "options": ["0", "1"], "correct": 0},
                {"q": "Memory layout?", "options": ["Contiguous", "Scattered"], "correct": 0},
                {"q": "Static size?", "options": ["Fixed", "Dynamic"], "correct": 0}
            ]
        },
        {"id": 2, "name": "Strings", "quiz": []}
    ])
}

#[tokio::test]
async fn offline_init_lands_in_demo_mode() {
    let api = Arc::new(StubApi::new());
    let store = Arc::new(InMemoryStateStore::new());
    let renderer = Arc::new(RecordingRenderer::new());
    let system = LearningSystem::new(api, store, renderer.clone());

    system.init().await;

    let user = system.user();
    assert_eq!(user.id().value(), 1);
    assert_eq!(user.name(), "Avinash");
    assert_eq!(user.streak(), 7);
    assert_eq!(user.xp(), 1250);
    assert!(system.mastery().is_empty());
    assert!(system.catalog().is_empty());

    // Every section still renders: empty chart, no weak topics, the seeded
    // streak, and the rule-based default recommendation.
    let events = renderer.events();
    assert!(events.contains(&RenderEvent::ProgressChart(MasteryBuckets::default())));
    assert!(events.contains(&RenderEvent::WeakTopics(Vec::new())));
    assert!(events.contains(&RenderEvent::Streak(7)));
    assert_eq!(renderer.last_recommendation().unwrap().next_topic, "Arrays");
    assert!(events.contains(&RenderEvent::Downloads(Vec::new())));
    assert!(events.contains(&RenderEvent::TestScores(Vec::new())));
    assert!(events.contains(&RenderEvent::Leaderboard(Vec::new())));
}

#[tokio::test]
async fn online_init_merges_profile_and_loads_catalog() {
    let api = Arc::new(
        StubApi::new()
            .respond(
                "/user/1",
                json!({
                    "id": 1,
                    "name": "Avinash",
                    "email": "a@example.com",
                    "xp": 4000,
                    "streak": 2,
                    "theme": "Dark",
                    "mastery_map": {"1": 40.0, "2": 90}
                }),
            )
            .respond("/topics", topics_payload()),
    );
    let store = Arc::new(InMemoryStateStore::new());
    let renderer = Arc::new(RecordingRenderer::new());
    let system = LearningSystem::new(api, store, renderer.clone());

    system.init().await;

    let user = system.user();
    assert_eq!(user.xp(), 4000);
    assert_eq!(user.streak(), 2);

    let mastery = system.mastery();
    assert_eq!(mastery.get(&TopicId::from(1)), Some(40));
    assert_eq!(mastery.get(&TopicId::from(2)), Some(90));

    let events = renderer.events();
    assert!(events.contains(&RenderEvent::DarkMode(true)));
    assert!(events.contains(&RenderEvent::ProgressChart(MasteryBuckets {
        mastered: 1,
        good: 0,
        needs_work: 1,
    })));

    // Weak topics resolve ids to catalog names.
    let weak = events
        .iter()
        .find_map(|e| match e {
            RenderEvent::WeakTopics(weak) if !weak.is_empty() => Some(weak.clone()),
            _ => None,
        })
        .unwrap();
    assert_eq!(weak.len(), 1);
    assert_eq!(weak[0].label, "Arrays");
    assert_eq!(weak[0].score, 40);

    // The remote recommendation was unavailable, so the local rule picks
    // the weakest topic by name.
    assert_eq!(renderer.last_recommendation().unwrap().next_topic, "Arrays");
}

#[tokio::test]
async fn stored_user_seed_is_used_for_reconciliation() {
    let api = Arc::new(StubApi::new().respond(
        "/user/42",
        json!({"id": 42, "name": "Zoe", "xp": 10, "streak": 1}),
    ));
    let store = Arc::new(InMemoryStateStore::new().with_user(StoredUser {
        id: Some(42),
        name: Some("Zoe".into()),
        streak: Some(1),
        xp: Some(5),
    }));
    let renderer = Arc::new(RecordingRenderer::new());
    let system = LearningSystem::new(api, store, renderer);

    system.init().await;

    let user = system.user();
    assert_eq!(user.id().value(), 42);
    assert_eq!(user.name(), "Zoe");
    assert_eq!(user.xp(), 10);
}

#[tokio::test]
async fn incomplete_stored_user_falls_back_to_default_identity() {
    let api = Arc::new(StubApi::new());
    let store = Arc::new(InMemoryStateStore::new().with_user(StoredUser {
        id: Some(42),
        name: None,
        streak: None,
        xp: None,
    }));
    let system = LearningSystem::new(api, store, Arc::new(RecordingRenderer::new()));

    system.init().await;

    assert_eq!(system.user().id().value(), 1);
    assert_eq!(system.user().name(), "Avinash");
}

#[tokio::test]
async fn error_profile_body_keeps_local_seed_and_empty_mastery() {
    let api = Arc::new(
        StubApi::new()
            .respond("/user/1", json!({"error": "User not found"}))
            .respond("/topics", topics_payload()),
    );
    let system = LearningSystem::new(
        api,
        Arc::new(InMemoryStateStore::new()),
        Arc::new(RecordingRenderer::new()),
    );

    system.init().await;

    assert_eq!(system.user().xp(), 1250);
    assert!(system.mastery().is_empty());
    assert_eq!(system.catalog().len(), 2);
}

#[tokio::test]
async fn remote_recommendation_parses_string_encoded_payload() {
    let recommendation = json!({
        "next_topic": "Graphs",
        "daily_plan": ["Day 1: Graphs basics (45 min)", "Day 2: Practice problems (60 min)"],
        "estimated_completion": "2.5 hours",
        "priority": "weak foundational concepts"
    });
    let api = Arc::new(StubApi::new().respond(
        "/recommendations/1",
        json!({"recommendations": recommendation.to_string()}),
    ));
    let system = LearningSystem::new(
        api,
        Arc::new(InMemoryStateStore::new()),
        Arc::new(RecordingRenderer::new()),
    );

    let rec = system.recommendations().refresh().await.unwrap();
    assert_eq!(rec.next_topic, "Graphs");
    assert_eq!(rec.daily_plan.len(), 2);
}

#[tokio::test]
async fn recommendation_error_payload_falls_back_to_rule() {
    let api = Arc::new(
        StubApi::new()
            .respond("/user/1", json!({"id": 1, "mastery_map": {"2": 30, "1": 55}}))
            .respond("/topics", topics_payload())
            .respond("/recommendations/1", json!({"error": "AI service down"})),
    );
    let renderer = Arc::new(RecordingRenderer::new());
    let system = LearningSystem::new(api, Arc::new(InMemoryStateStore::new()), renderer.clone());

    system.init().await;

    let rec = renderer.last_recommendation().unwrap();
    assert_eq!(rec.next_topic, "Strings");
    assert_eq!(rec.daily_plan[0], "Day 1: Strings basics (45min)");
    assert_eq!(rec.estimated_completion, "2.5 hours");
}

#[tokio::test]
async fn superseded_recommendation_refresh_is_discarded() {
    let api = Arc::new(GatedApi::new(StubApi::new().respond(
        "/recommendations/1",
        json!({"recommendations": {
            "next_topic": "Remote",
            "daily_plan": [],
            "estimated_completion": "1 hour"
        }}),
    )));
    let system = Arc::new(LearningSystem::new(
        api.clone(),
        Arc::new(InMemoryStateStore::new()),
        Arc::new(RecordingRenderer::new()),
    ));

    // First refresh parks inside the gateway with its ticket issued.
    let slow = tokio::spawn({
        let system = system.clone();
        async move { system.recommendations().refresh().await }
    });
    tokio::task::yield_now().await;

    // A newer refresh overtakes it and wins.
    let fresh = system.recommendations().refresh().await;
    assert_eq!(fresh.unwrap().next_topic, "Remote");

    // The superseded call resolves but must not surface a value.
    api.release();
    let stale = slow.await.unwrap();
    assert!(stale.is_none());
}

#[tokio::test]
async fn dashboard_extras_render_wire_rows() {
    let api = Arc::new(
        StubApi::new()
            .respond(
                "/downloads/1",
                json!([{"resource_name": "arrays.pdf", "topic_id": 1, "created_at": "2024-05-01"}]),
            )
            .respond(
                "/test-scores/1",
                json!([{"topic_id": 1, "topic_name": "Arrays", "score": 77.5, "created_at": "2024-05-02"}]),
            )
            .respond(
                "/leaderboard",
                json!([{"rank": 1, "user_id": 1, "name": "Avinash", "xp": 1250, "streak": 7}]),
            ),
    );
    let renderer = Arc::new(RecordingRenderer::new());
    let system = LearningSystem::new(api, Arc::new(InMemoryStateStore::new()), renderer.clone());

    system.render_dashboard_extras().await;

    let events = renderer.events();
    assert!(events.iter().any(|e| matches!(
        e,
        RenderEvent::Downloads(items) if items.len() == 1 && items[0].resource_name == "arrays.pdf"
    )));
    assert!(events.iter().any(|e| matches!(
        e,
        RenderEvent::TestScores(scores) if scores.len() == 1 && scores[0].topic_name == "Arrays"
    )));
    assert!(events.iter().any(|e| matches!(
        e,
        RenderEvent::Leaderboard(entries) if entries.len() == 1 && entries[0].rank == 1
    )));
}
