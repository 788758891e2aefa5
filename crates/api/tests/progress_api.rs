//! End-to-end tests for the join / complete / leave flow over HTTP.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_as, get, get_as, post_as, post_json, post_json_as};
use serde_json::json;
use sqlx::PgPool;

async fn create_user(app: &axum::Router, nickname: &str) -> i64 {
    let response = post_json(app, "/api/v1/users", json!({ "nickname": nickname })).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

async fn create_challenge(app: &axum::Router, title: &str, max_participants: i32) -> i64 {
    let response = post_json(
        app,
        "/api/v1/challenges",
        json!({
            "title": title,
            "category": "fitness",
            "max_participants": max_participants,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Test: Full happy path with cascaded snapshot
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn join_and_complete_returns_cascaded_snapshot(pool: PgPool) {
    let app = common::build_test_app(pool);
    let user_id = create_user(&app, "alice").await;
    let challenge_id = create_challenge(&app, "Morning run", 10).await;

    let response = post_as(&app, &format!("/api/v1/challenges/{challenge_id}/join"), user_id).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let record = body_json(response).await;
    assert_eq!(record["data"]["total_completions"], 0);
    assert_eq!(record["data"]["current_streak"], 0);

    let response = post_json_as(
        &app,
        &format!("/api/v1/challenges/{challenge_id}/completions"),
        user_id,
        json!({ "photo_url": "photos/run-day-one.jpg" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let snapshot = body_json(response).await;
    let data = &snapshot["data"];
    assert_eq!(data["score"], 10);
    assert_eq!(data["total_completions"], 1);
    assert_eq!(data["current_streak"], 1);
    assert_eq!(data["max_streak"], 1);
    // Streak 1: base increase only, far from the cap.
    assert_eq!(data["trust_score"], 1.0);
    assert_eq!(data["trust_score_increase"], 1.0);
    // One completion earns exactly the first-completion badge.
    assert_eq!(data["total_badges"], 1);
    assert_eq!(data["grade"], "starter");

    // The aggregator ran: one possible day, one completion.
    let response = get(&app, &format!("/api/v1/challenges/{challenge_id}")).await;
    let challenge = body_json(response).await;
    assert_eq!(challenge["data"]["completion_rate"], 100);

    // The badge shows up both as earned and as a representative slot.
    let response = get_as(&app, "/api/v1/users/me/badges", user_id).await;
    let badges = body_json(response).await;
    assert_eq!(badges["data"]["earned"][0]["code"], "first_step");
    assert_eq!(badges["data"]["representative"][0]["code"], "first_step");
    assert_eq!(badges["data"]["representative"][0]["display_order"], 1);
}

// ---------------------------------------------------------------------------
// Test: Second completion on the same day is rejected
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn second_completion_same_day_is_conflict(pool: PgPool) {
    let app = common::build_test_app(pool);
    let user_id = create_user(&app, "alice").await;
    let challenge_id = create_challenge(&app, "Morning run", 10).await;
    post_as(&app, &format!("/api/v1/challenges/{challenge_id}/join"), user_id).await;

    let uri = format!("/api/v1/challenges/{challenge_id}/completions");
    let first = post_json_as(&app, &uri, user_id, json!({ "photo_url": "one.jpg" })).await;
    assert_eq!(first.status(), StatusCode::OK);

    let second = post_json_as(&app, &uri, user_id, json!({ "photo_url": "two.jpg" })).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    let json = body_json(second).await;
    assert_eq!(json["code"], "ALREADY_COMPLETED_TODAY");

    // The record still shows a single completion.
    let response = get_as(&app, &format!("/api/v1/challenges/{challenge_id}/progress"), user_id).await;
    let progress = body_json(response).await;
    assert_eq!(progress["data"]["total_completions"], 1);
    assert_eq!(progress["data"]["completions"].as_array().unwrap().len(), 1);
    assert_eq!(progress["data"]["completions"][0]["photo_url"], "one.jpg");
}

// ---------------------------------------------------------------------------
// Test: Capacity and membership edges
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn join_full_challenge_is_conflict(pool: PgPool) {
    let app = common::build_test_app(pool);
    let alice = create_user(&app, "alice").await;
    let bob = create_user(&app, "bob").await;
    let challenge_id = create_challenge(&app, "Tiny group", 1).await;

    let uri = format!("/api/v1/challenges/{challenge_id}/join");
    assert_eq!(post_as(&app, &uri, alice).await.status(), StatusCode::CREATED);
    assert_eq!(post_as(&app, &uri, bob).await.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn completion_without_join_is_not_found(pool: PgPool) {
    let app = common::build_test_app(pool);
    let user_id = create_user(&app, "alice").await;
    let challenge_id = create_challenge(&app, "Morning run", 10).await;

    let response = post_json_as(
        &app,
        &format!("/api/v1/challenges/{challenge_id}/completions"),
        user_id,
        json!({ "photo_url": "p.jpg" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn leave_removes_progress(pool: PgPool) {
    let app = common::build_test_app(pool);
    let user_id = create_user(&app, "alice").await;
    let challenge_id = create_challenge(&app, "Morning run", 10).await;
    post_as(&app, &format!("/api/v1/challenges/{challenge_id}/join"), user_id).await;

    let response = delete_as(&app, &format!("/api/v1/challenges/{challenge_id}/join"), user_id).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_as(&app, &format!("/api/v1/challenges/{challenge_id}/progress"), user_id).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Leaving again: nothing left to delete.
    let response = delete_as(&app, &format!("/api/v1/challenges/{challenge_id}/join"), user_id).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: Validation and identity failures reject before any mutation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn malformed_input_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);

    // Empty nickname.
    let response = post_json(&app, "/api/v1/users", json!({ "nickname": "" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Zero capacity.
    let response = post_json(
        &app,
        "/api/v1/challenges",
        json!({ "title": "x", "category": "fitness", "max_participants": 0 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Missing identity header on an identity-scoped route.
    let user_id = create_user(&app, "alice").await;
    let challenge_id = create_challenge(&app, "Morning run", 10).await;
    post_as(&app, &format!("/api/v1/challenges/{challenge_id}/join"), user_id).await;

    let response = post_json(
        &app,
        &format!("/api/v1/challenges/{challenge_id}/completions"),
        json!({ "photo_url": "p.jpg" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Empty photo reference.
    let response = post_json_as(
        &app,
        &format!("/api/v1/challenges/{challenge_id}/completions"),
        user_id,
        json!({ "photo_url": "" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
