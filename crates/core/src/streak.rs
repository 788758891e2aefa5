//! Streak and score arithmetic for daily challenge completions.

use crate::types::Day;

/// Points added to a progress record's score per recorded completion.
pub const SCORE_PER_COMPLETION: i32 = 10;

/// New counter values produced by recording one completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionUpdate {
    pub total_completions: i32,
    pub score: i32,
    pub current_streak: i32,
    pub max_streak: i32,
    pub last_completion_date: Day,
}

/// Advance a record's counters for a completion on `today`.
///
/// `completed_yesterday` is whether the record already holds a completion
/// for `today - 1 day`. A gap is not an error; it resets the running
/// streak to 1. The max streak never decreases.
pub fn apply_completion(
    total_completions: i32,
    score: i32,
    current_streak: i32,
    max_streak: i32,
    today: Day,
    completed_yesterday: bool,
) -> CompletionUpdate {
    let current = if completed_yesterday {
        current_streak + 1
    } else {
        1
    };

    CompletionUpdate {
        total_completions: total_completions + 1,
        score: score + SCORE_PER_COMPLETION,
        current_streak: current,
        max_streak: max_streak.max(current),
        last_completion_date: today,
    }
}
