//! Assessment orchestrator: BMI + pillar scores → overall score, path placement and
//! the ranked immediate actions.
//!
//! Immediate actions come from a fixed priority chain per pillar (first matching rule
//! wins, at most one action per pillar). Candidates are ordered by their pillar's score,
//! worst first, and cut to three. Rule order is part of the output contract.

use super::answers::OnboardingAnswers;
use super::bmi::{calculate_bmi, BmiResult};
use super::scoring::PillarScores;
use crate::error::ValidationError;
use crate::shared::Pillar;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Maximum number of immediate actions in a result.
pub const MAX_IMMEDIATE_ACTIONS: usize = 3;

/// Position in a pillar's content sequence (coarse foundation, fine lesson).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathPlacement {
    pub foundation: u8,
    pub lesson: u16,
}

/// Step function from a pillar score to its starting placement. Tiers are lower-inclusive.
///
/// | Score | Foundation | Lesson |
/// |-------|------------|--------|
/// | ≥ 86 | 5 | 41 |
/// | ≥ 71 | 4 | 31 |
/// | ≥ 56 | 3 | 21 |
/// | ≥ 41 | 2 | 11 |
/// | else | 1 | 1 |
pub fn path_placement(score: u8) -> PathPlacement {
    let (foundation, lesson) = match score {
        86.. => (5, 41),
        71.. => (4, 31),
        56.. => (3, 21),
        41.. => (2, 11),
        _ => (1, 1),
    };
    PathPlacement { foundation, lesson }
}

/// A single next-step recommendation for a weak pillar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImmediateAction {
    pub pillar: Pillar,
    pub title: String,
    pub description: String,
    pub lesson_id: String,
}

impl ImmediateAction {
    fn new(pillar: Pillar, title: &str, description: &str, lesson_id: &str) -> Self {
        Self {
            pillar,
            title: title.to_string(),
            description: description.to_string(),
            lesson_id: lesson_id.to_string(),
        }
    }
}

/// Onboarding snapshot. Re-running onboarding replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResult {
    pub overall_score: u8,
    pub scores: PillarScores,
    pub bmi: BmiResult,
    pub immediate_actions: Vec<ImmediateAction>,
    pub path_placement: BTreeMap<Pillar, PathPlacement>,
    pub completed_at: DateTime<Utc>,
}

fn physical_action(a: &OnboardingAnswers) -> Option<ImmediateAction> {
    if a.exercise_frequency == 0 {
        Some(ImmediateAction::new(
            Pillar::Physical,
            "Start Moving",
            "Begin with a 10-minute walk every day this week.",
            "physical-1-1",
        ))
    } else if a.sleep_hours < 6.0 {
        Some(ImmediateAction::new(
            Pillar::Physical,
            "Fix Your Sleep",
            "Set a fixed bedtime and aim for 7–9 hours of sleep.",
            "physical-1-5",
        ))
    } else if a.fitness_level <= 3 {
        Some(ImmediateAction::new(
            Pillar::Physical,
            "Build Fitness",
            "Add two short strength sessions to your week.",
            "physical-2-11",
        ))
    } else {
        None
    }
}

fn mental_action(a: &OnboardingAnswers) -> Option<ImmediateAction> {
    if a.stress_level >= 7 {
        Some(ImmediateAction::new(
            Pillar::Mental,
            "Manage Your Stress",
            "Practice box breathing for 5 minutes whenever stress peaks.",
            "mental-1-1",
        ))
    } else if a.overwhelmed_frequency >= 2 {
        Some(ImmediateAction::new(
            Pillar::Mental,
            "Reduce Overwhelm",
            "Write down your top three priorities each morning and ignore the rest.",
            "mental-1-4",
        ))
    } else if a.meditation_practice == 0 {
        Some(ImmediateAction::new(
            Pillar::Mental,
            "Start Meditating",
            "Try a guided 5-minute meditation before bed.",
            "mental-2-11",
        ))
    } else {
        None
    }
}

fn finance_action(a: &OnboardingAnswers) -> Option<ImmediateAction> {
    if a.debt_level >= 2 {
        Some(ImmediateAction::new(
            Pillar::Finance,
            "Tackle Your Debt",
            "List every debt with its interest rate and pick one to pay down first.",
            "finance-1-1",
        ))
    } else if a.savings_level == 0 {
        Some(ImmediateAction::new(
            Pillar::Finance,
            "Build an Emergency Fund",
            "Set up an automatic transfer of a small amount on every payday.",
            "finance-1-6",
        ))
    } else if a.budgeting == 0 {
        Some(ImmediateAction::new(
            Pillar::Finance,
            "Create a Budget",
            "Track every expense for one week, then draft a simple monthly budget.",
            "finance-2-11",
        ))
    } else {
        None
    }
}

fn nutrition_action(a: &OnboardingAnswers) -> Option<ImmediateAction> {
    if a.fast_food_frequency <= 1 {
        Some(ImmediateAction::new(
            Pillar::Nutrition,
            "Cut Back on Fast Food",
            "Swap one fast-food meal this week for a simple home-cooked one.",
            "nutrition-1-1",
        ))
    } else if a.water_intake <= 1 {
        Some(ImmediateAction::new(
            Pillar::Nutrition,
            "Drink More Water",
            "Keep a bottle nearby and drink a glass with every meal.",
            "nutrition-1-4",
        ))
    } else if a.meals_per_day <= 1 {
        Some(ImmediateAction::new(
            Pillar::Nutrition,
            "Eat Regular Meals",
            "Plan three meals a day at roughly the same times.",
            "nutrition-2-11",
        ))
    } else {
        None
    }
}

fn candidate_action(pillar: Pillar, a: &OnboardingAnswers) -> Option<ImmediateAction> {
    match pillar {
        Pillar::Finance => finance_action(a),
        Pillar::Mental => mental_action(a),
        Pillar::Physical => physical_action(a),
        Pillar::Nutrition => nutrition_action(a),
    }
}

/// Worst-scoring pillars' actions first, at most [`MAX_IMMEDIATE_ACTIONS`].
/// A pillar whose answers trigger no rule contributes nothing.
pub fn immediate_actions(a: &OnboardingAnswers, scores: &PillarScores) -> Vec<ImmediateAction> {
    let mut candidates: Vec<(u8, ImmediateAction)> = Pillar::ALL
        .iter()
        .filter_map(|p| candidate_action(*p, a).map(|action| (scores.get(*p), action)))
        .collect();
    // Stable: equal scores keep pillar order.
    candidates.sort_by_key(|(score, _)| *score);
    candidates
        .into_iter()
        .take(MAX_IMMEDIATE_ACTIONS)
        .map(|(_, action)| action)
        .collect()
}

/// Validates the answers and produces the full assessment. Refuses partial or
/// out-of-range input.
pub fn assess(
    answers: &OnboardingAnswers,
    completed_at: DateTime<Utc>,
) -> Result<AssessmentResult, ValidationError> {
    answers.validate()?;

    let scores = PillarScores::compute(answers);
    let path_placement = Pillar::ALL
        .iter()
        .map(|p| (*p, path_placement(scores.get(*p))))
        .collect();

    Ok(AssessmentResult {
        overall_score: scores.overall(),
        scores,
        bmi: calculate_bmi(answers.weight_kg, answers.height_cm),
        immediate_actions: immediate_actions(answers, &scores),
        path_placement,
        completed_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::answers::sample_answers;
    use crate::assessment::bmi::BmiCategory;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn placement_tiers_are_lower_inclusive() {
        assert_eq!(path_placement(85).foundation, 4);
        assert_eq!(path_placement(86), PathPlacement { foundation: 5, lesson: 41 });
        assert_eq!(path_placement(70).foundation, 3);
        assert_eq!(path_placement(71), PathPlacement { foundation: 4, lesson: 31 });
        assert_eq!(path_placement(56), PathPlacement { foundation: 3, lesson: 21 });
        assert_eq!(path_placement(55).foundation, 2);
        assert_eq!(path_placement(41), PathPlacement { foundation: 2, lesson: 11 });
        assert_eq!(path_placement(40), PathPlacement { foundation: 1, lesson: 1 });
        assert_eq!(path_placement(0), PathPlacement { foundation: 1, lesson: 1 });
        assert_eq!(path_placement(100).foundation, 5);
    }

    #[test]
    fn sample_assessment() {
        let r = assess(&sample_answers(), at()).unwrap();
        assert_eq!(r.overall_score, 67);
        assert_eq!(r.bmi.category, BmiCategory::Normal);
        assert_eq!(r.path_placement[&Pillar::Physical].foundation, 4);
        assert_eq!(r.path_placement[&Pillar::Mental].foundation, 3);
        assert_eq!(r.path_placement[&Pillar::Finance].foundation, 2);
        assert_eq!(r.path_placement[&Pillar::Nutrition].foundation, 4);
        // Sample answers trigger no rule in any pillar.
        assert!(r.immediate_actions.is_empty());
    }

    #[test]
    fn actions_sorted_worst_first_and_capped() {
        let mut a = sample_answers();
        a.exercise_frequency = 0; // physical: Start Moving
        a.stress_level = 9; // mental: Manage Your Stress
        a.debt_level = 3; // finance: Tackle Your Debt
        a.fast_food_frequency = 0; // nutrition: Cut Back on Fast Food
        let scores = PillarScores::compute(&a);
        let actions = immediate_actions(&a, &scores);

        assert_eq!(actions.len(), MAX_IMMEDIATE_ACTIONS);
        let action_scores: Vec<u8> = actions.iter().map(|x| scores.get(x.pillar)).collect();
        assert!(action_scores.windows(2).all(|w| w[0] <= w[1]));

        let max_excluded = Pillar::ALL
            .iter()
            .filter(|p| !actions.iter().any(|x| x.pillar == **p))
            .map(|p| scores.get(*p))
            .min()
            .unwrap();
        assert!(action_scores.iter().all(|s| *s <= max_excluded));
    }

    #[test]
    fn physical_chain_priority() {
        let mut a = sample_answers();
        a.exercise_frequency = 0;
        a.sleep_hours = 4.0;
        assert_eq!(physical_action(&a).unwrap().title, "Start Moving");
        a.exercise_frequency = 1;
        assert_eq!(physical_action(&a).unwrap().title, "Fix Your Sleep");
        a.sleep_hours = 8.0;
        a.fitness_level = 3;
        assert_eq!(physical_action(&a).unwrap().title, "Build Fitness");
        a.fitness_level = 4;
        assert!(physical_action(&a).is_none());
    }

    #[test]
    fn mental_chain_priority() {
        let mut a = sample_answers();
        a.stress_level = 7;
        a.overwhelmed_frequency = 3;
        a.meditation_practice = 0;
        assert_eq!(mental_action(&a).unwrap().title, "Manage Your Stress");
        a.stress_level = 6;
        assert_eq!(mental_action(&a).unwrap().title, "Reduce Overwhelm");
        a.overwhelmed_frequency = 2;
        assert_eq!(mental_action(&a).unwrap().title, "Reduce Overwhelm");
        a.overwhelmed_frequency = 1;
        assert_eq!(mental_action(&a).unwrap().title, "Start Meditating");
        a.meditation_practice = 1;
        assert!(mental_action(&a).is_none());
    }

    #[test]
    fn finance_chain_priority() {
        let mut a = sample_answers();
        a.debt_level = 2;
        a.savings_level = 0;
        a.budgeting = 0;
        assert_eq!(finance_action(&a).unwrap().title, "Tackle Your Debt");
        a.debt_level = 1;
        assert_eq!(finance_action(&a).unwrap().title, "Build an Emergency Fund");
        a.savings_level = 1;
        assert_eq!(finance_action(&a).unwrap().title, "Create a Budget");
        a.budgeting = 1;
        assert!(finance_action(&a).is_none());
    }

    #[test]
    fn nutrition_chain_priority() {
        let mut a = sample_answers();
        a.fast_food_frequency = 1;
        a.water_intake = 0;
        a.meals_per_day = 1;
        assert_eq!(nutrition_action(&a).unwrap().title, "Cut Back on Fast Food");
        a.fast_food_frequency = 2;
        assert_eq!(nutrition_action(&a).unwrap().title, "Drink More Water");
        a.water_intake = 1;
        assert_eq!(nutrition_action(&a).unwrap().title, "Drink More Water");
        a.water_intake = 2;
        assert_eq!(nutrition_action(&a).unwrap().title, "Eat Regular Meals");
        a.meals_per_day = 2;
        assert!(nutrition_action(&a).is_none());
    }

    #[test]
    fn lowest_pillar_without_rule_contributes_nothing() {
        let mut a = sample_answers();
        // Finance is the weakest pillar but no finance rule fires.
        a.income_level = 0;
        a.savings_level = 1;
        a.debt_level = 1;
        a.budgeting = 1;
        a.water_intake = 1; // nutrition: Drink More Water
        let r = assess(&a, at()).unwrap();
        assert!(r.scores.finance < r.scores.nutrition);
        assert_eq!(r.immediate_actions.len(), 1);
        assert_eq!(r.immediate_actions[0].pillar, Pillar::Nutrition);
        assert_eq!(r.immediate_actions[0].title, "Drink More Water");
    }

    #[test]
    fn invalid_answers_are_refused() {
        let mut a = sample_answers();
        a.debt_level = 9;
        let err = assess(&a, at()).unwrap_err();
        assert_eq!(err.field(), "debtLevel");
    }

    #[test]
    fn result_serializes_camel_case() {
        let r = assess(&sample_answers(), at()).unwrap();
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["overallScore"], 67);
        assert_eq!(v["pathPlacement"]["physical"]["foundation"], 4);
        assert_eq!(v["bmi"]["idealWeightRange"]["min"], 57);
    }
}
