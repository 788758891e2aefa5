//! Badge catalog rules and their evaluation over lifetime aggregates.
//!
//! The catalog is loaded by the caller and passed in as a parameter, so
//! evaluation is deterministic and testable with a synthetic catalog.
//! Badges are never revoked: evaluation only ever returns ids that are
//! not already earned.

use std::collections::{HashMap, HashSet};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// Maximum number of representative (displayed) badge slots per user.
pub const MAX_REPRESENTATIVE_BADGES: i64 = 4;

/// The lifetime aggregate a badge condition is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeKind {
    Completions,
    Streak,
    Score,
    Challenges,
    Days,
    CategoryCompletions,
}

impl BadgeKind {
    /// Database representation of the kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Completions => "completions",
            Self::Streak => "streak",
            Self::Score => "score",
            Self::Challenges => "challenges",
            Self::Days => "days",
            Self::CategoryCompletions => "category_completions",
        }
    }
}

impl FromStr for BadgeKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "completions" => Ok(Self::Completions),
            "streak" => Ok(Self::Streak),
            "score" => Ok(Self::Score),
            "challenges" => Ok(Self::Challenges),
            "days" => Ok(Self::Days),
            "category_completions" => Ok(Self::CategoryCompletions),
            other => Err(CoreError::Validation(format!(
                "Unknown badge condition kind: {other}"
            ))),
        }
    }
}

/// One immutable catalog entry, ready for evaluation.
#[derive(Debug, Clone)]
pub struct BadgeRule {
    pub id: DbId,
    pub kind: BadgeKind,
    pub threshold: i64,
    /// Target category; required when `kind` is `CategoryCompletions`.
    pub category: Option<String>,
}

impl BadgeRule {
    /// Check that the rule is well-formed.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.kind == BadgeKind::CategoryCompletions && self.category.is_none() {
            return Err(CoreError::Validation(format!(
                "Badge {} requires a target category",
                self.id
            )));
        }
        Ok(())
    }
}

/// A user's lifetime aggregates across all progress records.
#[derive(Debug, Clone, Default)]
pub struct LifetimeStats {
    pub total_completions: i64,
    pub max_streak: i64,
    pub total_score: i64,
    pub total_challenges: i64,
    pub total_active_days: i64,
    /// Completions attributed to each challenge category.
    pub completions_by_category: HashMap<String, i64>,
}

impl LifetimeStats {
    /// The aggregate value the given rule is compared against. An absent
    /// category maps to 0.
    fn value_for(&self, rule: &BadgeRule) -> i64 {
        match rule.kind {
            BadgeKind::Completions => self.total_completions,
            BadgeKind::Streak => self.max_streak,
            BadgeKind::Score => self.total_score,
            BadgeKind::Challenges => self.total_challenges,
            BadgeKind::Days => self.total_active_days,
            BadgeKind::CategoryCompletions => rule
                .category
                .as_deref()
                .and_then(|c| self.completions_by_category.get(c).copied())
                .unwrap_or(0),
        }
    }
}

/// Evaluate the catalog against a user's aggregates.
///
/// Returns the ids of badges whose condition is newly met (aggregate >=
/// threshold), in catalog order. Already-earned badges are skipped, so a
/// grant can never be duplicated or revoked by re-evaluation.
pub fn evaluate(catalog: &[BadgeRule], stats: &LifetimeStats, earned: &HashSet<DbId>) -> Vec<DbId> {
    catalog
        .iter()
        .filter(|rule| !earned.contains(&rule.id))
        .filter(|rule| stats.value_for(rule) >= rule.threshold)
        .map(|rule| rule.id)
        .collect()
}
