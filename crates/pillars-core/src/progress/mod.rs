//! Gamification state machine: XP/levels, per-pillar streaks and achievements.

mod achievements;
mod state;

pub use achievements::{catalog, Achievement, AchievementId};
pub use state::{
    complete_task, level_for_xp, Completion, CompletionOutcome, ProgressChange, Streak, Transition,
    UserProgress, WEEK_STREAK_DAYS, XP_PER_LEVEL,
};
