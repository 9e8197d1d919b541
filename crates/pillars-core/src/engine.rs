//! **ProgressEngine**: per-user session over the persistence and clock ports.
//!
//! Holds the three aggregates (`progress`, `dailyTasks`, `assessment`) in memory, applies
//! the pure transitions from [`crate::progress`], then writes the whole affected aggregate
//! back through the [`PersistencePort`]. Every mutation awaits its write before returning.
//! A failed write surfaces as [`EngineError::Persistence`]; the in-memory state is not
//! rolled back, so callers can retry by persisting again.

use crate::assessment::{assess, AssessmentResult, OnboardingAnswers};
use crate::config::EngineToggles;
use crate::error::{EngineError, EngineResult};
use crate::ports::{Clock, Moment, PersistencePort};
use crate::progress::{
    complete_task as apply_completion, AchievementId, Completion, CompletionOutcome, ProgressChange,
    Transition, UserProgress,
};
use crate::shared::{Pillar, ASSESSMENT_KEY, DAILY_TASKS_KEY, PROGRESS_KEY};
use crate::tasks::{generate_daily_tasks, Task};
use rand::Rng;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// What a completion request did.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionReport {
    pub outcome: CompletionOutcome,
    pub changes: Vec<ProgressChange>,
}

pub struct ProgressEngine<S: PersistencePort, C: Clock> {
    user_id: String,
    progress: UserProgress,
    tasks: Vec<Task>,
    assessment: Option<AssessmentResult>,
    store: S,
    clock: C,
    toggles: EngineToggles,
}

async fn load_blob<S, T>(store: &S, user_id: &str, key: &str) -> EngineResult<Option<T>>
where
    S: PersistencePort,
    T: DeserializeOwned,
{
    match store.load(user_id, key).await? {
        Some(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(|source| EngineError::Corrupt {
                key: key.to_string(),
                source,
            }),
        None => Ok(None),
    }
}

impl<S: PersistencePort, C: Clock> ProgressEngine<S, C> {
    /// Loads all aggregates for `user_id`. Absent blobs start fresh; a blob that no
    /// longer decodes is an error rather than a silent reset.
    pub async fn load(user_id: impl Into<String>, store: S, clock: C) -> EngineResult<Self> {
        let user_id = user_id.into();
        let progress = load_blob::<S, UserProgress>(&store, &user_id, PROGRESS_KEY)
            .await?
            .map(UserProgress::normalized)
            .unwrap_or_default();
        let tasks = load_blob::<S, Vec<Task>>(&store, &user_id, DAILY_TASKS_KEY)
            .await?
            .unwrap_or_default();
        let assessment = load_blob::<S, AssessmentResult>(&store, &user_id, ASSESSMENT_KEY).await?;

        tracing::info!(
            user_id = %user_id,
            level = progress.level,
            xp = progress.xp,
            tasks = tasks.len(),
            assessed = assessment.is_some(),
            "progress loaded"
        );

        Ok(Self {
            user_id,
            progress,
            tasks,
            assessment,
            store,
            clock,
            toggles: EngineToggles::default(),
        })
    }

    pub fn with_toggles(mut self, toggles: EngineToggles) -> Self {
        self.toggles = toggles;
        self
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn progress(&self) -> &UserProgress {
        &self.progress
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn assessment(&self) -> Option<&AssessmentResult> {
        self.assessment.as_ref()
    }

    pub fn toggles(&self) -> &EngineToggles {
        &self.toggles
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    // -------------------------------------------------------------------------
    // Progress mutations
    // -------------------------------------------------------------------------

    /// Completes a task from today's list. Unknown or already completed ids change
    /// nothing and write nothing.
    ///
    /// Progress is written before the task list. If the task list write fails, the
    /// stored points already include this task while the stored list still shows it
    /// open; the error is [`EngineError::Persistence`] and the next task list write
    /// from this session brings the stored list in line.
    pub async fn complete_task(&mut self, task_id: &str) -> EngineResult<CompletionReport> {
        let at = self.clock.moment();
        let Completion {
            progress,
            tasks,
            outcome,
            changes,
        } = apply_completion(
            std::mem::take(&mut self.progress),
            std::mem::take(&mut self.tasks),
            task_id,
            at,
        );
        self.progress = progress;
        self.tasks = tasks;

        match &outcome {
            CompletionOutcome::Completed { pillar, points, .. } => {
                tracing::info!(user_id = %self.user_id, task_id, pillar = %pillar, points, "task completed");
            }
            CompletionOutcome::NotFound { .. } => {
                tracing::debug!(user_id = %self.user_id, task_id, "completion ignored: unknown task");
                return Ok(CompletionReport { outcome, changes });
            }
            CompletionOutcome::AlreadyCompleted { .. } => {
                tracing::debug!(user_id = %self.user_id, task_id, "completion ignored: already completed");
                return Ok(CompletionReport { outcome, changes });
            }
        }
        self.log_changes(&changes);

        self.persist(PROGRESS_KEY, &self.progress).await?;
        self.persist(DAILY_TASKS_KEY, &self.tasks).await?;
        Ok(CompletionReport { outcome, changes })
    }

    pub async fn add_points(&mut self, points: u32) -> EngineResult<Vec<ProgressChange>> {
        let changes = self.apply(|p, at| p.add_points(points, at));
        self.persist(PROGRESS_KEY, &self.progress).await?;
        Ok(changes)
    }

    /// At most one increment per local day; a same-day call writes nothing.
    pub async fn update_streak(&mut self, pillar: Pillar) -> EngineResult<Vec<ProgressChange>> {
        let changes = self.apply(|p, at| p.update_streak(pillar, at));
        if !changes.is_empty() {
            self.persist(PROGRESS_KEY, &self.progress).await?;
        }
        Ok(changes)
    }

    pub async fn unlock_achievement(&mut self, id: AchievementId) -> EngineResult<Vec<ProgressChange>> {
        let changes = self.apply(|p, at| p.unlock_achievement(id, at));
        if !changes.is_empty() {
            self.persist(PROGRESS_KEY, &self.progress).await?;
        }
        Ok(changes)
    }

    /// Replaces progress with a fresh default and persists it. Every achievement goes
    /// back to locked; this is the only operation that re-locks one. Tasks and the
    /// assessment snapshot are untouched.
    pub async fn reset_progress(&mut self) -> EngineResult<()> {
        self.progress = UserProgress::default();
        tracing::info!(user_id = %self.user_id, "progress reset");
        self.persist(PROGRESS_KEY, &self.progress).await
    }

    // -------------------------------------------------------------------------
    // Daily tasks
    // -------------------------------------------------------------------------

    /// Generates today's tasks only when the stored list is empty. A non-empty list
    /// from an earlier day is kept as is. Returns whether a new list was generated.
    pub async fn ensure_daily_tasks<R: Rng + ?Sized>(&mut self, rng: &mut R) -> EngineResult<bool> {
        if !self.tasks.is_empty() {
            return Ok(false);
        }
        self.regenerate_daily_tasks(rng).await?;
        Ok(true)
    }

    /// Unconditionally replaces the list with a freshly generated one.
    pub async fn regenerate_daily_tasks<R: Rng + ?Sized>(&mut self, rng: &mut R) -> EngineResult<&[Task]> {
        self.tasks = generate_daily_tasks(rng, self.clock.now());
        tracing::info!(user_id = %self.user_id, count = self.tasks.len(), "daily tasks generated");
        self.persist(DAILY_TASKS_KEY, &self.tasks).await?;
        Ok(&self.tasks)
    }

    // -------------------------------------------------------------------------
    // Assessment
    // -------------------------------------------------------------------------

    /// Scores the answers and stores the snapshot, replacing any earlier one.
    /// Invalid answers are rejected before anything changes.
    pub async fn record_assessment(&mut self, answers: &OnboardingAnswers) -> EngineResult<AssessmentResult> {
        let result = assess(answers, self.clock.now())?;
        tracing::info!(
            user_id = %self.user_id,
            overall = result.overall_score,
            actions = result.immediate_actions.len(),
            "assessment recorded"
        );
        self.assessment = Some(result.clone());
        self.persist(ASSESSMENT_KEY, &result).await?;
        Ok(result)
    }

    /// Re-reads the assessment snapshot from the store.
    pub async fn load_assessment(&mut self) -> EngineResult<Option<&AssessmentResult>> {
        self.assessment = load_blob(&self.store, &self.user_id, ASSESSMENT_KEY).await?;
        Ok(self.assessment.as_ref())
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn apply(&mut self, f: impl FnOnce(UserProgress, Moment) -> Transition) -> Vec<ProgressChange> {
        let at = self.clock.moment();
        let Transition { progress, changes } = f(std::mem::take(&mut self.progress), at);
        self.progress = progress;
        self.log_changes(&changes);
        changes
    }

    fn log_changes(&self, changes: &[ProgressChange]) {
        if !self.toggles.log_transitions {
            return;
        }
        for change in changes {
            tracing::debug!(user_id = %self.user_id, change = ?change, "progress change");
        }
    }

    async fn persist<T: Serialize>(&self, key: &str, value: &T) -> EngineResult<()> {
        let json = serde_json::to_value(value).map_err(|source| EngineError::Encode {
            key: key.to_string(),
            source,
        })?;
        if let Err(e) = self.store.save(&self.user_id, key, json).await {
            tracing::warn!(user_id = %self.user_id, key, error = %e, "persist failed; keeping in-memory state");
            return Err(e.into());
        }
        Ok(())
    }
}
