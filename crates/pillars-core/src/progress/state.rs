//! `UserProgress` aggregate and its pure transitions.
//!
//! Every transition consumes the current state and returns a [`Transition`]: the next
//! state plus the [`ProgressChange`]s it caused. Nothing here performs I/O; the engine
//! persists the result.
//!
//! | Transition | Effect |
//! |------------|--------|
//! | `add_points(p)` | `total_points += p`, `xp += p`, `level = xp / 100 + 1`; unlock `level_5` / `level_10` |
//! | `update_streak(pillar)` | same local day → no-op; else `current += 1`, `longest = max`, unlock `week_streak` at 7 |
//! | `unlock_achievement(id)` | locked → unlocked with timestamp; already unlocked → no-op |
//! | [`complete_task`] | mark task, add points, extend streak, `first_task` at 1 done today, `all_pillars` at 4 |

use super::achievements::{catalog, Achievement, AchievementId};
use crate::ports::Moment;
use crate::shared::Pillar;
use crate::tasks::{completed_count, Task};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// XP needed per level.
pub const XP_PER_LEVEL: u32 = 100;

/// Streak length that unlocks `week_streak`.
pub const WEEK_STREAK_DAYS: u32 = 7;

/// Completed-today counts that unlock `first_task` / `all_pillars`.
const FIRST_TASK_COUNT: usize = 1;
const ALL_PILLARS_COUNT: usize = 4;

/// `floor(xp / 100) + 1`.
pub fn level_for_xp(xp: u32) -> u32 {
    xp / XP_PER_LEVEL + 1
}

static EMPTY_STREAKS: [Streak; 4] = [
    Streak::new(Pillar::Finance),
    Streak::new(Pillar::Mental),
    Streak::new(Pillar::Physical),
    Streak::new(Pillar::Nutrition),
];

/// Consecutive-day completion record for one pillar. `longest >= current` always.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Streak {
    pub pillar: Pillar,
    pub current: u32,
    pub longest: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_completed_date: Option<DateTime<Utc>>,
}

impl Streak {
    pub const fn new(pillar: Pillar) -> Self {
        Self {
            pillar,
            current: 0,
            longest: 0,
            last_completed_date: None,
        }
    }
}

/// What a transition changed. Used for logging and for callers that celebrate unlocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProgressChange {
    PointsAdded { points: u32, xp: u32 },
    LevelUp { from: u32, to: u32 },
    StreakExtended { pillar: Pillar, current: u32, longest: u32 },
    AchievementUnlocked { id: AchievementId },
    TaskCompleted { task_id: String, pillar: Pillar, points: u32 },
}

/// Next state plus the changes that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub progress: UserProgress,
    pub changes: Vec<ProgressChange>,
}

impl Transition {
    fn unchanged(progress: UserProgress) -> Self {
        Self {
            progress,
            changes: Vec::new(),
        }
    }

    /// Applies `next` to the resulting state and concatenates the change lists.
    pub fn then(self, next: impl FnOnce(UserProgress) -> Transition) -> Transition {
        let Transition { progress, mut changes } = self;
        let t = next(progress);
        changes.extend(t.changes);
        Transition {
            progress: t.progress,
            changes,
        }
    }

    pub fn is_noop(&self) -> bool {
        self.changes.is_empty()
    }
}

/// Single per-user gamification aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProgress {
    pub level: u32,
    pub xp: u32,
    pub total_points: u32,
    pub streaks: Vec<Streak>,
    pub achievements: Vec<Achievement>,
}

impl Default for UserProgress {
    fn default() -> Self {
        Self {
            level: 1,
            xp: 0,
            total_points: 0,
            streaks: Pillar::ALL.iter().map(|p| Streak::new(*p)).collect(),
            achievements: catalog(),
        }
    }
}

impl UserProgress {
    /// Restores the fixed shape after loading a stored blob: exactly one streak per
    /// pillar (in pillar order) and the full achievement catalog. Stored progress and
    /// unlock flags are kept; `level` is re-derived from `xp`.
    pub fn normalized(self) -> Self {
        let streaks = Pillar::ALL
            .iter()
            .map(|p| {
                self.streaks
                    .iter()
                    .find(|s| s.pillar == *p)
                    .cloned()
                    .map(|mut s| {
                        s.longest = s.longest.max(s.current);
                        s
                    })
                    .unwrap_or_else(|| Streak::new(*p))
            })
            .collect();
        let achievements = AchievementId::ALL
            .iter()
            .map(|id| {
                let mut fresh = Achievement::locked(*id);
                if let Some(stored) = self.achievements.iter().find(|a| a.id == *id) {
                    fresh.unlocked = stored.unlocked;
                    fresh.unlocked_at = stored.unlocked_at;
                }
                fresh
            })
            .collect();
        Self {
            level: level_for_xp(self.xp),
            xp: self.xp,
            total_points: self.total_points,
            streaks,
            achievements,
        }
    }

    /// Streak record for `pillar`, looked up by pillar rather than position. A pillar
    /// with no stored record reads as a fresh streak.
    pub fn streak(&self, pillar: Pillar) -> &Streak {
        self.streaks
            .iter()
            .find(|s| s.pillar == pillar)
            .unwrap_or(&EMPTY_STREAKS[pillar.index()])
    }

    fn streak_mut(&mut self, pillar: Pillar) -> &mut Streak {
        let pos = match self.streaks.iter().position(|s| s.pillar == pillar) {
            Some(pos) => pos,
            None => {
                self.streaks.push(Streak::new(pillar));
                self.streaks.len() - 1
            }
        };
        &mut self.streaks[pos]
    }

    pub fn achievement(&self, id: AchievementId) -> Option<&Achievement> {
        self.achievements.iter().find(|a| a.id == id)
    }

    pub fn is_unlocked(&self, id: AchievementId) -> bool {
        self.achievement(id).is_some_and(|a| a.unlocked)
    }

    pub fn unlocked_achievements(&self) -> impl Iterator<Item = &Achievement> {
        self.achievements.iter().filter(|a| a.unlocked)
    }

    /// XP earned inside the current level (0–99).
    pub fn xp_into_level(&self) -> u32 {
        self.xp % XP_PER_LEVEL
    }

    /// XP still needed for the next level (1–100).
    pub fn xp_to_next_level(&self) -> u32 {
        XP_PER_LEVEL - self.xp_into_level()
    }

    /// Adds points to the running totals and re-derives the level.
    pub fn add_points(mut self, points: u32, at: Moment) -> Transition {
        let from = self.level;
        self.total_points = self.total_points.saturating_add(points);
        self.xp = self.xp.saturating_add(points);
        self.level = level_for_xp(self.xp);

        let mut changes = vec![ProgressChange::PointsAdded { points, xp: self.xp }];
        if self.level > from {
            changes.push(ProgressChange::LevelUp { from, to: self.level });
        }
        let level = self.level;
        Transition {
            progress: self,
            changes,
        }
        .then(|p| {
            if level >= 5 {
                p.unlock_achievement(AchievementId::Level5, at)
            } else {
                Transition::unchanged(p)
            }
        })
        .then(|p| {
            if level >= 10 {
                p.unlock_achievement(AchievementId::Level10, at)
            } else {
                Transition::unchanged(p)
            }
        })
    }

    /// Extends the pillar's streak once per local day.
    ///
    /// A skipped day does not reset `current`; the gap is never inspected.
    pub fn update_streak(mut self, pillar: Pillar, at: Moment) -> Transition {
        let today = at.today();
        let streak = self.streak_mut(pillar);
        if streak.last_completed_date.map(|ts| at.date_of(ts)) == Some(today) {
            return Transition::unchanged(self);
        }
        streak.current += 1;
        streak.longest = streak.longest.max(streak.current);
        streak.last_completed_date = Some(at.now);
        let change = ProgressChange::StreakExtended {
            pillar,
            current: streak.current,
            longest: streak.longest,
        };
        let reached_week = streak.current >= WEEK_STREAK_DAYS;

        Transition {
            progress: self,
            changes: vec![change],
        }
        .then(|p| {
            if reached_week {
                p.unlock_achievement(AchievementId::WeekStreak, at)
            } else {
                Transition::unchanged(p)
            }
        })
    }

    /// Monotonic unlock: already unlocked stays untouched.
    pub fn unlock_achievement(mut self, id: AchievementId, at: Moment) -> Transition {
        let unlocked = self
            .achievements
            .iter_mut()
            .find(|a| a.id == id)
            .is_some_and(|a| a.unlock(at.now));
        let changes = if unlocked {
            vec![ProgressChange::AchievementUnlocked { id }]
        } else {
            Vec::new()
        };
        Transition {
            progress: self,
            changes,
        }
    }
}

/// Why a completion did or did not happen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CompletionOutcome {
    Completed { task_id: String, pillar: Pillar, points: u32 },
    NotFound { task_id: String },
    AlreadyCompleted { task_id: String },
}

impl CompletionOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }
}

/// Result of [`complete_task`]: both aggregates after the event.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub progress: UserProgress,
    pub tasks: Vec<Task>,
    pub outcome: CompletionOutcome,
    pub changes: Vec<ProgressChange>,
}

/// Completes `task_id` in today's list.
///
/// Unknown or already completed ids are silent no-ops: state comes back unchanged and
/// the outcome says why.
pub fn complete_task(progress: UserProgress, mut tasks: Vec<Task>, task_id: &str, at: Moment) -> Completion {
    let Some(task) = tasks.iter_mut().find(|t| t.id == task_id) else {
        return Completion {
            progress,
            tasks,
            outcome: CompletionOutcome::NotFound {
                task_id: task_id.to_string(),
            },
            changes: Vec::new(),
        };
    };
    if task.completed {
        return Completion {
            progress,
            tasks,
            outcome: CompletionOutcome::AlreadyCompleted {
                task_id: task_id.to_string(),
            },
            changes: Vec::new(),
        };
    }

    task.completed = true;
    task.completed_at = Some(at.now);
    let (pillar, points) = (task.pillar, task.points);
    let done_today = completed_count(&tasks);

    let Transition { progress, changes } = Transition {
        progress,
        changes: vec![ProgressChange::TaskCompleted {
            task_id: task_id.to_string(),
            pillar,
            points,
        }],
    }
    .then(|p| p.add_points(points, at))
    .then(|p| p.update_streak(pillar, at))
    .then(|p| match done_today {
        FIRST_TASK_COUNT => p.unlock_achievement(AchievementId::FirstTask, at),
        ALL_PILLARS_COUNT => p.unlock_achievement(AchievementId::AllPillars, at),
        _ => Transition::unchanged(p),
    });

    Completion {
        progress,
        tasks,
        outcome: CompletionOutcome::Completed {
            task_id: task_id.to_string(),
            pillar,
            points,
        },
        changes,
    }
}
