//! User grade tiers derived from earned badge count.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Badge count at or above which a user is Master.
pub const MASTER_BADGES: i64 = 40;
/// Badge count at or above which a user is Expert (below Master).
pub const EXPERT_BADGES: i64 = 20;
/// Badge count at or above which a user is Challenger (below Expert).
pub const CHALLENGER_BADGES: i64 = 10;

/// Coarse user tier, ordered from lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Grade {
    Starter,
    Challenger,
    Expert,
    Master,
}

impl Grade {
    /// Classify a user by the number of badges they have earned.
    pub fn from_badge_count(count: i64) -> Self {
        if count >= MASTER_BADGES {
            Self::Master
        } else if count >= EXPERT_BADGES {
            Self::Expert
        } else if count >= CHALLENGER_BADGES {
            Self::Challenger
        } else {
            Self::Starter
        }
    }

    /// Database representation of the grade.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Starter => "starter",
            Self::Challenger => "challenger",
            Self::Expert => "expert",
            Self::Master => "master",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Grade {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "starter" => Ok(Self::Starter),
            "challenger" => Ok(Self::Challenger),
            "expert" => Ok(Self::Expert),
            "master" => Ok(Self::Master),
            other => Err(CoreError::Validation(format!("Unknown grade: {other}"))),
        }
    }
}
