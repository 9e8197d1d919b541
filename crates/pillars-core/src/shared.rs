//! Shared types: the four pillars and the persisted blob keys.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Persistence key for the `UserProgress` aggregate.
pub const PROGRESS_KEY: &str = "progress";

/// Persistence key for today's task list.
pub const DAILY_TASKS_KEY: &str = "dailyTasks";

/// Persistence key for the latest onboarding `AssessmentResult` snapshot.
pub const ASSESSMENT_KEY: &str = "assessment";

/// One of the four life domains tracked by the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pillar {
    Finance,
    Mental,
    Physical,
    Nutrition,
}

impl Pillar {
    /// Fixed pillar order. Streak records, task generation and action tie-breaks follow it.
    pub const ALL: [Pillar; 4] = [
        Pillar::Finance,
        Pillar::Mental,
        Pillar::Physical,
        Pillar::Nutrition,
    ];

    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Finance => "finance",
            Self::Mental => "mental",
            Self::Physical => "physical",
            Self::Nutrition => "nutrition",
        }
    }

    /// Human-readable label for summaries.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Finance => "Finance",
            Self::Mental => "Mental Health",
            Self::Physical => "Physical Health",
            Self::Nutrition => "Nutrition",
        }
    }

    /// Position within [`Pillar::ALL`].
    #[inline]
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "finance" => Some(Self::Finance),
            "mental" => Some(Self::Mental),
            "physical" => Some(Self::Physical),
            "nutrition" => Some(Self::Nutrition),
            _ => None,
        }
    }
}

impl fmt::Display for Pillar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_is_in_index_order() {
        for (i, p) in Pillar::ALL.iter().enumerate() {
            assert_eq!(p.index(), i);
        }
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&Pillar::Nutrition).unwrap();
        assert_eq!(json, "\"nutrition\"");
        assert_eq!(Pillar::parse(" Mental "), Some(Pillar::Mental));
        assert_eq!(Pillar::parse("sleep"), None);
    }
}
