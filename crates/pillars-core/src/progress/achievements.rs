//! Fixed achievement catalog. Only `unlocked` / `unlocked_at` ever change, and only
//! from locked to unlocked.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AchievementId {
    #[serde(rename = "first_task")]
    FirstTask,
    #[serde(rename = "all_pillars")]
    AllPillars,
    #[serde(rename = "week_streak")]
    WeekStreak,
    #[serde(rename = "level_5")]
    Level5,
    #[serde(rename = "level_10")]
    Level10,
}

impl AchievementId {
    /// Catalog order.
    pub const ALL: [AchievementId; 5] = [
        AchievementId::FirstTask,
        AchievementId::AllPillars,
        AchievementId::WeekStreak,
        AchievementId::Level5,
        AchievementId::Level10,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstTask => "first_task",
            Self::AllPillars => "all_pillars",
            Self::WeekStreak => "week_streak",
            Self::Level5 => "level_5",
            Self::Level10 => "level_10",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.as_str() == s.trim())
    }

    /// (name, description, icon)
    fn details(&self) -> (&'static str, &'static str, &'static str) {
        match self {
            Self::FirstTask => ("First Step", "Complete your first task", "🎯"),
            Self::AllPillars => ("Balanced Day", "Complete a task in all four pillars in one day", "⚖️"),
            Self::WeekStreak => ("Week Warrior", "Keep a 7-day streak in any pillar", "🔥"),
            Self::Level5 => ("Rising Star", "Reach level 5", "⭐"),
            Self::Level10 => ("Dedicated", "Reach level 10", "🏆"),
        }
    }
}

impl fmt::Display for AchievementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: AchievementId,
    pub name: String,
    pub description: String,
    pub icon: String,
    #[serde(default)]
    pub unlocked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unlocked_at: Option<DateTime<Utc>>,
}

impl Achievement {
    /// Locked catalog entry for `id`.
    pub fn locked(id: AchievementId) -> Self {
        let (name, description, icon) = id.details();
        Self {
            id,
            name: name.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
            unlocked: false,
            unlocked_at: None,
        }
    }

    /// Unlocks once. Returns false when it was already unlocked.
    pub(crate) fn unlock(&mut self, at: DateTime<Utc>) -> bool {
        if self.unlocked {
            return false;
        }
        self.unlocked = true;
        self.unlocked_at = Some(at);
        true
    }
}

/// The full catalog, all locked.
pub fn catalog() -> Vec<Achievement> {
    AchievementId::ALL.into_iter().map(Achievement::locked).collect()
}
