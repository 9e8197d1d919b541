//! Onboarding questionnaire answers and their range validation.
//!
//! | Field | Range | Notes |
//! |-------|-------|-------|
//! | age | optional | not scored |
//! | gender | optional | not scored |
//! | heightCm | > 0 | feeds BMI |
//! | weightKg | > 0 | feeds BMI |
//! | exerciseFrequency | 0–3 | 0 = never, 3 = 5+ days/week |
//! | fitnessLevel | 0–10 | self-rated |
//! | sleepHours | 0–24 | average per night |
//! | healthIssues | 0–2 | 0 = none, 2 = chronic |
//! | stressLevel | 1–10 | 10 = constant stress |
//! | overwhelmedFrequency | 0–3 | 3 = daily |
//! | meditationPractice | 0–2 | 0 = never, 2 = daily |
//! | lifeQuality | 0–10 | self-rated |
//! | incomeLevel | 0–4 | |
//! | debtLevel | 0–3 | 3 = severe |
//! | savingsLevel | 0–4 | 0 = none |
//! | budgeting | 0–2 | 0 = no budget, 2 = strict |
//! | mealsPerDay | 0–3 | 3 = three regular meals |
//! | fastFoodFrequency | 0–3 | 0 = daily, 3 = rarely |
//! | waterIntake | 0–3 | 3 = 8+ glasses |
//! | dietQuality | 0–10 | self-rated |

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
    PreferNotToSay,
}

/// Complete, range-checked questionnaire answers. Immutable input to every scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingAnswers {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u8>,
    pub height_cm: f64,
    pub weight_kg: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,

    pub exercise_frequency: u8,
    pub fitness_level: u8,
    pub sleep_hours: f64,
    pub health_issues: u8,

    pub stress_level: u8,
    pub overwhelmed_frequency: u8,
    pub meditation_practice: u8,
    pub life_quality: u8,

    pub income_level: u8,
    pub debt_level: u8,
    pub savings_level: u8,
    pub budgeting: u8,

    pub meals_per_day: u8,
    pub fast_food_frequency: u8,
    pub water_intake: u8,
    pub diet_quality: u8,
}

/// Answers exactly as the questionnaire submitted them; any field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawAnswers {
    pub age: Option<u8>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub gender: Option<Gender>,

    pub exercise_frequency: Option<u8>,
    pub fitness_level: Option<u8>,
    pub sleep_hours: Option<f64>,
    pub health_issues: Option<u8>,

    pub stress_level: Option<u8>,
    pub overwhelmed_frequency: Option<u8>,
    pub meditation_practice: Option<u8>,
    pub life_quality: Option<u8>,

    pub income_level: Option<u8>,
    pub debt_level: Option<u8>,
    pub savings_level: Option<u8>,
    pub budgeting: Option<u8>,

    pub meals_per_day: Option<u8>,
    pub fast_food_frequency: Option<u8>,
    pub water_intake: Option<u8>,
    pub diet_quality: Option<u8>,
}

fn require<T>(field: &'static str, value: Option<T>) -> Result<T, ValidationError> {
    value.ok_or(ValidationError::Missing { field })
}

fn check_ordinal(field: &'static str, value: u8, min: u8, max: u8) -> Result<u8, ValidationError> {
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(ValidationError::OutOfRange {
            field,
            value: value as f64,
            min: min as f64,
            max: max as f64,
        })
    }
}

fn check_positive(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ValidationError::NotPositive { field, value })
    }
}

fn check_measure(field: &'static str, value: f64, min: f64, max: f64) -> Result<f64, ValidationError> {
    // NaN fails the contains check as well.
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(ValidationError::OutOfRange { field, value, min, max })
    }
}

impl RawAnswers {
    /// Checks presence and range of every scored field, in questionnaire order. The
    /// first failing field is reported. `age` and `gender` pass through as given.
    pub fn validate(&self) -> Result<OnboardingAnswers, ValidationError> {
        let answers = OnboardingAnswers {
            age: self.age,
            height_cm: require("heightCm", self.height_cm)?,
            weight_kg: require("weightKg", self.weight_kg)?,
            gender: self.gender,
            exercise_frequency: require("exerciseFrequency", self.exercise_frequency)?,
            fitness_level: require("fitnessLevel", self.fitness_level)?,
            sleep_hours: require("sleepHours", self.sleep_hours)?,
            health_issues: require("healthIssues", self.health_issues)?,
            stress_level: require("stressLevel", self.stress_level)?,
            overwhelmed_frequency: require("overwhelmedFrequency", self.overwhelmed_frequency)?,
            meditation_practice: require("meditationPractice", self.meditation_practice)?,
            life_quality: require("lifeQuality", self.life_quality)?,
            income_level: require("incomeLevel", self.income_level)?,
            debt_level: require("debtLevel", self.debt_level)?,
            savings_level: require("savingsLevel", self.savings_level)?,
            budgeting: require("budgeting", self.budgeting)?,
            meals_per_day: require("mealsPerDay", self.meals_per_day)?,
            fast_food_frequency: require("fastFoodFrequency", self.fast_food_frequency)?,
            water_intake: require("waterIntake", self.water_intake)?,
            diet_quality: require("dietQuality", self.diet_quality)?,
        };
        answers.validate()?;
        Ok(answers)
    }
}

impl From<&OnboardingAnswers> for RawAnswers {
    fn from(a: &OnboardingAnswers) -> Self {
        Self {
            age: a.age,
            height_cm: Some(a.height_cm),
            weight_kg: Some(a.weight_kg),
            gender: a.gender,
            exercise_frequency: Some(a.exercise_frequency),
            fitness_level: Some(a.fitness_level),
            sleep_hours: Some(a.sleep_hours),
            health_issues: Some(a.health_issues),
            stress_level: Some(a.stress_level),
            overwhelmed_frequency: Some(a.overwhelmed_frequency),
            meditation_practice: Some(a.meditation_practice),
            life_quality: Some(a.life_quality),
            income_level: Some(a.income_level),
            debt_level: Some(a.debt_level),
            savings_level: Some(a.savings_level),
            budgeting: Some(a.budgeting),
            meals_per_day: Some(a.meals_per_day),
            fast_food_frequency: Some(a.fast_food_frequency),
            water_intake: Some(a.water_intake),
            diet_quality: Some(a.diet_quality),
        }
    }
}

impl OnboardingAnswers {
    /// Range-checks an already typed record.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_positive("heightCm", self.height_cm)?;
        check_positive("weightKg", self.weight_kg)?;

        check_ordinal("exerciseFrequency", self.exercise_frequency, 0, 3)?;
        check_ordinal("fitnessLevel", self.fitness_level, 0, 10)?;
        check_measure("sleepHours", self.sleep_hours, 0.0, 24.0)?;
        check_ordinal("healthIssues", self.health_issues, 0, 2)?;

        check_ordinal("stressLevel", self.stress_level, 1, 10)?;
        check_ordinal("overwhelmedFrequency", self.overwhelmed_frequency, 0, 3)?;
        check_ordinal("meditationPractice", self.meditation_practice, 0, 2)?;
        check_ordinal("lifeQuality", self.life_quality, 0, 10)?;

        check_ordinal("incomeLevel", self.income_level, 0, 4)?;
        check_ordinal("debtLevel", self.debt_level, 0, 3)?;
        check_ordinal("savingsLevel", self.savings_level, 0, 4)?;
        check_ordinal("budgeting", self.budgeting, 0, 2)?;

        check_ordinal("mealsPerDay", self.meals_per_day, 0, 3)?;
        check_ordinal("fastFoodFrequency", self.fast_food_frequency, 0, 3)?;
        check_ordinal("waterIntake", self.water_intake, 0, 3)?;
        check_ordinal("dietQuality", self.diet_quality, 0, 10)?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn sample_answers() -> OnboardingAnswers {
    OnboardingAnswers {
        age: Some(32),
        height_cm: 175.0,
        weight_kg: 70.0,
        gender: Some(Gender::Female),
        exercise_frequency: 2,
        fitness_level: 6,
        sleep_hours: 7.0,
        health_issues: 0,
        stress_level: 5,
        overwhelmed_frequency: 1,
        meditation_practice: 1,
        life_quality: 7,
        income_level: 2,
        debt_level: 1,
        savings_level: 2,
        budgeting: 1,
        meals_per_day: 3,
        fast_food_frequency: 2,
        water_intake: 2,
        diet_quality: 6,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_raw_answers_validate() {
        let a = sample_answers();
        let raw = RawAnswers::from(&a);
        assert_eq!(raw.validate().unwrap(), a);
    }

    #[test]
    fn missing_field_is_reported_not_defaulted() {
        let mut raw = RawAnswers::from(&sample_answers());
        raw.stress_level = None;
        let err = raw.validate().unwrap_err();
        assert_eq!(err, ValidationError::Missing { field: "stressLevel" });
    }

    #[test]
    fn out_of_range_ordinal_is_rejected() {
        let mut a = sample_answers();
        a.exercise_frequency = 4;
        let err = a.validate().unwrap_err();
        assert_eq!(err.field(), "exerciseFrequency");
    }

    #[test]
    fn stress_level_zero_is_rejected() {
        let mut a = sample_answers();
        a.stress_level = 0;
        assert!(a.validate().is_err());
    }

    #[test]
    fn nan_measure_is_rejected() {
        let mut a = sample_answers();
        a.sleep_hours = f64::NAN;
        assert_eq!(a.validate().unwrap_err().field(), "sleepHours");
    }

    #[test]
    fn demographics_are_optional() {
        let mut raw = RawAnswers::from(&sample_answers());
        raw.age = None;
        raw.gender = None;
        let answers = raw.validate().unwrap();
        assert_eq!(answers.age, None);
        assert_eq!(answers.gender, None);
        let json = serde_json::to_value(&answers).unwrap();
        assert!(json.get("age").is_none());
        assert!(json.get("gender").is_none());
    }

    #[test]
    fn unusual_but_positive_body_measures_are_accepted() {
        let mut a = sample_answers();
        a.height_cm = 60.0;
        a.weight_kg = 400.0;
        assert!(a.validate().is_ok());
    }

    #[test]
    fn zero_or_negative_body_measures_are_rejected() {
        let mut a = sample_answers();
        a.height_cm = 0.0;
        assert_eq!(
            a.validate().unwrap_err(),
            ValidationError::NotPositive { field: "heightCm", value: 0.0 }
        );

        let mut a = sample_answers();
        a.weight_kg = -70.0;
        assert_eq!(a.validate().unwrap_err().field(), "weightKg");

        let mut a = sample_answers();
        a.weight_kg = f64::INFINITY;
        assert_eq!(a.validate().unwrap_err().field(), "weightKg");
    }

    #[test]
    fn camel_case_json_parses() {
        let json = r#"{"age":40,"heightCm":180,"weightKg":82.5,"gender":"male","exerciseFrequency":1}"#;
        let raw: RawAnswers = serde_json::from_str(json).unwrap();
        assert_eq!(raw.height_cm, Some(180.0));
        assert_eq!(raw.gender, Some(Gender::Male));
        assert_eq!(raw.validate().unwrap_err(), ValidationError::Missing { field: "fitnessLevel" });
    }
}
