//! Ranking metrics and rank/percentile math.
//!
//! The SQL ordering (including tie-breaks) lives in the ranking
//! repository; this module owns the metric vocabulary and the arithmetic
//! that turns query results into ranks and percentiles.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Metric a leaderboard is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankMetric {
    #[default]
    Score,
    Completions,
    Streak,
}

impl RankMetric {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Score => "score",
            Self::Completions => "completions",
            Self::Streak => "streak",
        }
    }
}

impl FromStr for RankMetric {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "score" => Ok(Self::Score),
            "completions" => Ok(Self::Completions),
            "streak" => Ok(Self::Streak),
            other => Err(CoreError::Validation(format!(
                "Unknown ranking metric: {other}"
            ))),
        }
    }
}

/// Absolute rank of the item at `index` on a 1-based page of `limit` items.
pub fn page_rank(page: u32, limit: u32, index: usize) -> i64 {
    (page as i64 - 1) * limit as i64 + index as i64 + 1
}

/// Percentile for `rank` out of `total` records, rounded to the nearest
/// integer. Rank 1 of N maps to 100, rank N of N to the smallest bucket.
pub fn percentile(rank: i64, total: i64) -> i32 {
    if total <= 0 {
        return 0;
    }
    (100.0 * (total - rank + 1) as f64 / total as f64).round() as i32
}
