//! Badge catalog and per-user badge state models.

use pacer_core::badge::BadgeRule;
use pacer_core::error::CoreError;
use pacer_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `badges` catalog table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Badge {
    pub id: DbId,
    pub code: String,
    pub name: String,
    pub description: String,
    pub condition_kind: String,
    pub threshold: i32,
    pub category: Option<String>,
    pub sort_order: i32,
    pub created_at: Timestamp,
}

impl Badge {
    /// Convert the stored row into an evaluator rule.
    ///
    /// Fails with `Validation` when the stored kind is unknown or a
    /// category target is missing for a category condition.
    pub fn to_rule(&self) -> Result<BadgeRule, CoreError> {
        let rule = BadgeRule {
            id: self.id,
            kind: self.condition_kind.parse()?,
            threshold: i64::from(self.threshold),
            category: self.category.clone(),
        };
        rule.validate()?;
        Ok(rule)
    }
}

/// An earned badge joined with its catalog entry.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EarnedBadge {
    pub badge_id: DbId,
    pub code: String,
    pub name: String,
    pub description: String,
    pub earned_at: Timestamp,
}

/// A representative (displayed) badge slot, ordered 1-4.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RepresentativeBadge {
    pub badge_id: DbId,
    pub code: String,
    pub name: String,
    pub display_order: i32,
}
