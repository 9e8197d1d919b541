//! Daily task generation: one random catalog entry per pillar, in shuffled order.

use super::catalog::{templates, TaskTemplate};
use crate::shared::Pillar;
use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

const ID_SUFFIX_LEN: usize = 9;
const ID_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// One task in today's list. Only `completed`/`completed_at` change after generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub pillar: Pillar,
    pub title: String,
    pub description: String,
    pub duration_minutes: u16,
    pub points: u32,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Instantiates `template` for `pillar` with a fresh id.
    pub fn from_template<R: Rng + ?Sized>(
        pillar: Pillar,
        template: &TaskTemplate,
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: task_id(pillar, &mut *rng, now),
            pillar,
            title: template.title.to_string(),
            description: template.description.to_string(),
            duration_minutes: template.duration_minutes,
            points: template.points,
            completed: false,
            completed_at: None,
        }
    }
}

/// `{pillar}-{timestamp_ms}-{9 random alphanumerics}`.
fn task_id<R: Rng + ?Sized>(pillar: Pillar, rng: &mut R, now: DateTime<Utc>) -> String {
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect();
    format!("{}-{}-{}", pillar.as_str(), now.timestamp_millis(), suffix)
}

/// Builds a fresh day: exactly one uniformly chosen task per pillar, shuffled.
///
/// Always produces a new list; callers decide whether today already has one.
pub fn generate_daily_tasks<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>) -> Vec<Task> {
    let mut tasks: Vec<Task> = Pillar::ALL
        .iter()
        .map(|pillar| {
            let pool = templates(*pillar);
            let idx = rng.gen_range(0..pool.len());
            Task::from_template(*pillar, &pool[idx], &mut *rng, now)
        })
        .collect();
    tasks.shuffle(rng);
    tasks
}

/// Number of completed tasks in the list.
pub fn completed_count(tasks: &[Task]) -> usize {
    tasks.iter().filter(|t| t.completed).count()
}

/// Points still available in the list.
pub fn remaining_points(tasks: &[Task]) -> u32 {
    tasks.iter().filter(|t| !t.completed).map(|t| t.points).sum()
}
