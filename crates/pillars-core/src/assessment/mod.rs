//! Onboarding assessment: questionnaire answers → BMI, pillar scores, overall score,
//! immediate actions and learning-path placement. One-shot and pure; the engine
//! persists the resulting snapshot.

mod answers;
mod bmi;
mod orchestrator;
mod scoring;

pub use answers::{Gender, OnboardingAnswers, RawAnswers};
pub use bmi::{calculate_bmi, ideal_weight_range, BmiCategory, BmiResult, WeightRange};
pub use orchestrator::{
    assess, immediate_actions, path_placement, AssessmentResult, ImmediateAction, PathPlacement,
    MAX_IMMEDIATE_ACTIONS,
};
pub use scoring::{
    score_finance, score_mental, score_nutrition, score_physical, sleep_band_points, PillarScores,
};

#[cfg(test)]
pub(crate) use answers::sample_answers;
