//! pillars-core: progress & assessment engine for the four life pillars
//! (finance, mental, physical, nutrition).
//!
//! Onboarding answers are scored once into an [`AssessmentResult`]; day to day the
//! [`ProgressEngine`] hands out randomized daily tasks and folds completions into
//! points, levels, per-pillar streaks and achievements. Storage and time come in
//! through the [`PersistencePort`] and [`Clock`] ports.

mod config;
mod engine;
mod error;
mod memory;
mod ports;
mod shared;
pub mod assessment;
pub mod progress;
pub mod tasks;

// Shared
pub use shared::{Pillar, ASSESSMENT_KEY, DAILY_TASKS_KEY, PROGRESS_KEY};

// Errors
pub use error::{EngineError, EngineResult, StoreError, ValidationError};

// Configuration
pub use crate::config::{EngineConfig, EngineToggles};

// Ports + adapters
pub use memory::{InMemoryStore, SledStore};
pub use ports::{Clock, FixedClock, Moment, PersistencePort, SystemClock};

// Engine
pub use engine::{CompletionReport, ProgressEngine};

// Most-used domain types
pub use assessment::{assess, AssessmentResult, OnboardingAnswers, RawAnswers};
pub use progress::{AchievementId, CompletionOutcome, ProgressChange, UserProgress};
pub use tasks::Task;
