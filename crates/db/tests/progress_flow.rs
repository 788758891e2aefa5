//! Integration tests for the progress store and the daily-completion
//! apply: streak advancement, same-day idempotency, and leave cascades.

use assert_matches::assert_matches;
use chrono::NaiveDate;
use pacer_db::models::challenge::CreateChallenge;
use pacer_db::models::progress::{CompletionOutcome, ProgressRecord};
use pacer_db::models::user::CreateUser;
use pacer_db::repositories::{ChallengeRepo, ProgressRepo, UserRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn day(n: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, n).unwrap()
}

async fn seed_user(pool: &PgPool, nickname: &str) -> i64 {
    UserRepo::create(
        pool,
        &CreateUser {
            nickname: nickname.to_string(),
            avatar_url: None,
        },
    )
    .await
    .unwrap()
    .id
}

async fn seed_challenge(pool: &PgPool, title: &str, category: &str) -> i64 {
    ChallengeRepo::create(
        pool,
        &CreateChallenge {
            title: title.to_string(),
            category: category.to_string(),
            max_participants: 10,
        },
    )
    .await
    .unwrap()
    .id
}

async fn complete(pool: &PgPool, user_id: i64, challenge_id: i64, on: NaiveDate) -> ProgressRecord {
    match ProgressRepo::record_completion(pool, user_id, challenge_id, on, "photos/proof.jpg")
        .await
        .unwrap()
    {
        CompletionOutcome::Recorded(record) => record,
        other => panic!("Expected Recorded, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Test: Joining creates a zeroed record
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn join_creates_zeroed_record(pool: PgPool) {
    let user_id = seed_user(&pool, "alice").await;
    let challenge_id = seed_challenge(&pool, "Morning run", "fitness").await;

    let record = ProgressRepo::create(&pool, user_id, challenge_id, day(1))
        .await
        .unwrap();

    assert_eq!(record.user_id, user_id);
    assert_eq!(record.challenge_id, challenge_id);
    assert_eq!(record.start_date, day(1));
    assert_eq!(record.total_completions, 0);
    assert_eq!(record.score, 0);
    assert_eq!(record.current_streak, 0);
    assert_eq!(record.max_streak, 0);
    assert!(record.last_completion_date.is_none());
}

// ---------------------------------------------------------------------------
// Test: Daily completions grow streaks; a gap resets the running streak
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn daily_completions_then_gap(pool: PgPool) {
    let user_id = seed_user(&pool, "alice").await;
    let challenge_id = seed_challenge(&pool, "Morning run", "fitness").await;
    ProgressRepo::create(&pool, user_id, challenge_id, day(1))
        .await
        .unwrap();

    // Four consecutive days.
    let mut record = complete(&pool, user_id, challenge_id, day(1)).await;
    assert_eq!(record.current_streak, 1);
    for n in 2..=4 {
        record = complete(&pool, user_id, challenge_id, day(n)).await;
    }
    assert_eq!(record.total_completions, 4);
    assert_eq!(record.current_streak, 4);
    assert_eq!(record.max_streak, 4);
    assert_eq!(record.score, 40);
    assert_eq!(record.last_completion_date, Some(day(4)));

    // Skip day 5, complete day 6: running streak resets, max survives.
    record = complete(&pool, user_id, challenge_id, day(6)).await;
    assert_eq!(record.total_completions, 5);
    assert_eq!(record.current_streak, 1);
    assert_eq!(record.max_streak, 4);
    assert_eq!(record.score, 50);
}

// ---------------------------------------------------------------------------
// Test: Same-day completion is rejected without mutating anything
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn same_day_completion_is_idempotent(pool: PgPool) {
    let user_id = seed_user(&pool, "alice").await;
    let challenge_id = seed_challenge(&pool, "Morning run", "fitness").await;
    ProgressRepo::create(&pool, user_id, challenge_id, day(1))
        .await
        .unwrap();

    complete(&pool, user_id, challenge_id, day(1)).await;

    let second = ProgressRepo::record_completion(&pool, user_id, challenge_id, day(1), "other.jpg")
        .await
        .unwrap();
    assert_matches!(second, CompletionOutcome::AlreadyCompleted);

    let record = ProgressRepo::find(&pool, user_id, challenge_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.total_completions, 1);
    assert_eq!(record.score, 10);

    // The rejected photo was not stored.
    let completions = ProgressRepo::list_completions(&pool, record.id).await.unwrap();
    assert_eq!(completions.len(), 1);
    assert_eq!(completions[0].photo_url, "photos/proof.jpg");
}

// ---------------------------------------------------------------------------
// Test: Completing a challenge that was never joined
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn completion_without_join_reports_not_joined(pool: PgPool) {
    let user_id = seed_user(&pool, "alice").await;
    let challenge_id = seed_challenge(&pool, "Morning run", "fitness").await;

    let outcome = ProgressRepo::record_completion(&pool, user_id, challenge_id, day(1), "p.jpg")
        .await
        .unwrap();
    assert_matches!(outcome, CompletionOutcome::NotJoined);
}

// ---------------------------------------------------------------------------
// Test: Leaving deletes the record and cascades to completions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn leave_deletes_record_and_history(pool: PgPool) {
    let user_id = seed_user(&pool, "alice").await;
    let challenge_id = seed_challenge(&pool, "Morning run", "fitness").await;
    let record = ProgressRepo::create(&pool, user_id, challenge_id, day(1))
        .await
        .unwrap();
    complete(&pool, user_id, challenge_id, day(1)).await;

    assert!(ProgressRepo::delete(&pool, user_id, challenge_id).await.unwrap());
    assert!(ProgressRepo::find(&pool, user_id, challenge_id)
        .await
        .unwrap()
        .is_none());

    let orphaned: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM progress_completions WHERE progress_id = $1")
            .bind(record.id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(orphaned, 0);

    // Leaving twice reports that nothing was there.
    assert!(!ProgressRepo::delete(&pool, user_id, challenge_id).await.unwrap());
}

// ---------------------------------------------------------------------------
// Test: Duplicate join violates the per-pair unique constraint
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_join_is_rejected(pool: PgPool) {
    let user_id = seed_user(&pool, "alice").await;
    let challenge_id = seed_challenge(&pool, "Morning run", "fitness").await;
    ProgressRepo::create(&pool, user_id, challenge_id, day(1))
        .await
        .unwrap();

    let err = ProgressRepo::create(&pool, user_id, challenge_id, day(2))
        .await
        .unwrap_err();
    assert_matches!(
        err,
        sqlx::Error::Database(db_err)
            if db_err.constraint() == Some("uq_progress_user_challenge")
    );

    assert_eq!(
        ProgressRepo::participant_count(&pool, challenge_id).await.unwrap(),
        1
    );
}
