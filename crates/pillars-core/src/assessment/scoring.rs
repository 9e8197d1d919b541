//! Pillar scorers: fixed weighted sums of normalized answers, 0–100.
//!
//! | Pillar | Terms (weight × normalized answer) |
//! |--------|------------------------------------|
//! | Physical | 25·exercise/3 + 25·fitness/10 + sleep band (25/15/5) + 25·(2−healthIssues)/2 |
//! | Mental | 30·(10−stress)/10 + 30·(3−overwhelmed)/3 + 20·meditation/2 + 20·lifeQuality/10 |
//! | Finance | 25·income/4 + 25·(3−debt)/3 + 25·savings/4 + 25·budgeting/2 |
//! | Nutrition | 20·meals/3 + 30·fastFood/3 + 20·water/3 + 30·diet/10 |
//!
//! Terms are summed exactly (common denominator) and rounded half-up once, at the end.

use super::answers::OnboardingAnswers;
use crate::shared::Pillar;
use serde::{Deserialize, Serialize};

/// One weighted sub-score: contributes `weight * value / scale`.
#[derive(Debug, Clone, Copy)]
struct Term {
    weight: u64,
    value: u64,
    scale: u64,
}

impl Term {
    const fn new(weight: u64, value: u64, scale: u64) -> Self {
        Self { weight, value, scale }
    }

    /// A fixed point contribution (sleep band).
    const fn points(points: u64) -> Self {
        Self::new(points, 1, 1)
    }
}

fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

fn lcm(a: u64, b: u64) -> u64 {
    a / gcd(a, b) * b
}

/// `num / den` rounded half-up. `den` must be non-zero.
pub(crate) fn round_half_up(num: u64, den: u64) -> u64 {
    (2 * num + den) / (2 * den)
}

fn weighted_score(terms: &[Term]) -> u8 {
    let den = terms.iter().fold(1, |acc, t| lcm(acc, t.scale));
    let num: u64 = terms
        .iter()
        .map(|t| t.weight * t.value * (den / t.scale))
        .sum();
    round_half_up(num, den).min(100) as u8
}

/// Points from the sleep band: 7–9h → 25, 6–10h → 15, otherwise 5.
pub fn sleep_band_points(sleep_hours: f64) -> u8 {
    if (7.0..=9.0).contains(&sleep_hours) {
        25
    } else if (6.0..=10.0).contains(&sleep_hours) {
        15
    } else {
        5
    }
}

pub fn score_physical(a: &OnboardingAnswers) -> u8 {
    weighted_score(&[
        Term::new(25, a.exercise_frequency as u64, 3),
        Term::new(25, a.fitness_level as u64, 10),
        Term::points(sleep_band_points(a.sleep_hours) as u64),
        Term::new(25, 2u64.saturating_sub(a.health_issues as u64), 2),
    ])
}

pub fn score_mental(a: &OnboardingAnswers) -> u8 {
    weighted_score(&[
        Term::new(30, 10u64.saturating_sub(a.stress_level as u64), 10),
        Term::new(30, 3u64.saturating_sub(a.overwhelmed_frequency as u64), 3),
        Term::new(20, a.meditation_practice as u64, 2),
        Term::new(20, a.life_quality as u64, 10),
    ])
}

pub fn score_finance(a: &OnboardingAnswers) -> u8 {
    weighted_score(&[
        Term::new(25, a.income_level as u64, 4),
        Term::new(25, 3u64.saturating_sub(a.debt_level as u64), 3),
        Term::new(25, a.savings_level as u64, 4),
        Term::new(25, a.budgeting as u64, 2),
    ])
}

pub fn score_nutrition(a: &OnboardingAnswers) -> u8 {
    weighted_score(&[
        Term::new(20, a.meals_per_day as u64, 3),
        Term::new(30, a.fast_food_frequency as u64, 3),
        Term::new(20, a.water_intake as u64, 3),
        Term::new(30, a.diet_quality as u64, 10),
    ])
}

/// The four pillar scores of one assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PillarScores {
    pub finance: u8,
    pub mental: u8,
    pub physical: u8,
    pub nutrition: u8,
}

impl PillarScores {
    pub fn compute(a: &OnboardingAnswers) -> Self {
        Self {
            finance: score_finance(a),
            mental: score_mental(a),
            physical: score_physical(a),
            nutrition: score_nutrition(a),
        }
    }

    pub fn get(&self, pillar: Pillar) -> u8 {
        match pillar {
            Pillar::Finance => self.finance,
            Pillar::Mental => self.mental,
            Pillar::Physical => self.physical,
            Pillar::Nutrition => self.nutrition,
        }
    }

    /// Mean of the four scores, rounded half-up.
    pub fn overall(&self) -> u8 {
        let sum: u64 = Pillar::ALL.iter().map(|p| self.get(*p) as u64).sum();
        round_half_up(sum, Pillar::ALL.len() as u64) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::answers::sample_answers;

    fn physical(ex: u8, fit: u8, sleep: f64, issues: u8) -> u8 {
        let mut a = sample_answers();
        a.exercise_frequency = ex;
        a.fitness_level = fit;
        a.sleep_hours = sleep;
        a.health_issues = issues;
        score_physical(&a)
    }

    #[test]
    fn physical_best_case_is_100() {
        assert_eq!(physical(3, 10, 8.0, 0), 100);
    }

    #[test]
    fn physical_worst_case_keeps_sleep_floor() {
        // Fitness 1 already adds 2.5, so the all-minimum profile that scores 5 has
        // fitness 0. See "Physical worst case" in DESIGN.md.
        assert_eq!(physical(0, 0, 1.0, 2), 5);
    }

    #[test]
    fn physical_rounds_half_up_after_summing() {
        // 2.5 (fitness) + 5 (sleep floor) = 7.5 -> 8
        assert_eq!(physical(0, 1, 0.0, 2), 8);
        // 16.67 + 15 + 25 + 25 = 81.67 -> 82
        assert_eq!(physical(2, 6, 7.0, 0), 82);
    }

    #[test]
    fn sleep_bands() {
        assert_eq!(sleep_band_points(7.0), 25);
        assert_eq!(sleep_band_points(9.0), 25);
        assert_eq!(sleep_band_points(6.0), 15);
        assert_eq!(sleep_band_points(10.0), 15);
        assert_eq!(sleep_band_points(9.5), 15);
        assert_eq!(sleep_band_points(5.5), 5);
        assert_eq!(sleep_band_points(11.0), 5);
    }

    #[test]
    fn sample_pillar_scores() {
        let s = PillarScores::compute(&sample_answers());
        assert_eq!(s.physical, 82);
        assert_eq!(s.mental, 59);
        assert_eq!(s.finance, 54);
        assert_eq!(s.nutrition, 71);
        // (82 + 59 + 54 + 71) / 4 = 66.5 -> 67
        assert_eq!(s.overall(), 67);
    }

    #[test]
    fn mental_ceiling_is_97() {
        let mut a = sample_answers();
        a.stress_level = 1;
        a.overwhelmed_frequency = 0;
        a.meditation_practice = 2;
        a.life_quality = 10;
        assert_eq!(score_mental(&a), 97);
    }

    #[test]
    fn finance_and_nutrition_extremes() {
        let mut a = sample_answers();
        a.income_level = 4;
        a.debt_level = 0;
        a.savings_level = 4;
        a.budgeting = 2;
        assert_eq!(score_finance(&a), 100);
        a.income_level = 0;
        a.debt_level = 3;
        a.savings_level = 0;
        a.budgeting = 0;
        assert_eq!(score_finance(&a), 0);

        a.meals_per_day = 0;
        a.fast_food_frequency = 0;
        a.water_intake = 0;
        a.diet_quality = 0;
        assert_eq!(score_nutrition(&a), 0);
        a.meals_per_day = 3;
        a.fast_food_frequency = 3;
        a.water_intake = 3;
        a.diet_quality = 10;
        assert_eq!(score_nutrition(&a), 100);
    }
}
