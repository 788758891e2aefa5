//! Trust-score arithmetic.
//!
//! Every successful completion raises the user's trust score by a base
//! amount plus a streak bonus; the score is capped at
//! [`TRUST_SCORE_MAX`] and never decreases.

/// Upper bound on a user's trust score.
pub const TRUST_SCORE_MAX: f64 = 100.0;

/// Base increase applied for every successful completion.
pub const BASE_INCREASE: f64 = 1.0;

/// Streak length at or above which the top bonus applies.
pub const TOP_BONUS_STREAK: i32 = 10;
/// Streak length at or above which the middle bonus applies (below top).
pub const MID_BONUS_STREAK: i32 = 7;
/// Streak length at or above which the entry bonus applies (below middle).
pub const ENTRY_BONUS_STREAK: i32 = 3;

/// Streak bonus on top of [`BASE_INCREASE`].
///
/// Tiers are evaluated highest first; exactly one applies.
pub fn streak_bonus(current_streak: i32) -> f64 {
    if current_streak >= TOP_BONUS_STREAK {
        2.0
    } else if current_streak >= MID_BONUS_STREAK {
        1.5
    } else if current_streak >= ENTRY_BONUS_STREAK {
        1.0
    } else {
        0.0
    }
}

/// Total trust-score increase for a completion at the given streak length.
pub fn increase_for_streak(current_streak: i32) -> f64 {
    BASE_INCREASE + streak_bonus(current_streak)
}

/// Apply an increase to a trust score, capped at [`TRUST_SCORE_MAX`].
///
/// Returns the new score and the delta actually applied (which is smaller
/// than `increase` when the cap truncates it).
pub fn apply_increase(trust_score: f64, increase: f64) -> (f64, f64) {
    let new_score = (trust_score + increase).min(TRUST_SCORE_MAX);
    (new_score, new_score - trust_score)
}
