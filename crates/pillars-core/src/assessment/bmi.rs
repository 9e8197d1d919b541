//! Body-mass index: value, category and ideal weight range for a height.

use serde::{Deserialize, Serialize};

const UNDERWEIGHT_BELOW: f64 = 18.5;
const OVERWEIGHT_FROM: f64 = 25.0;
const OBESE_FROM: f64 = 30.0;
const IDEAL_BMI_MIN: f64 = 18.5;
const IDEAL_BMI_MAX: f64 = 24.9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    /// Category for a BMI value (<18.5, [18.5,25), [25,30), ≥30).
    pub fn from_value(bmi: f64) -> Self {
        if bmi < UNDERWEIGHT_BELOW {
            Self::Underweight
        } else if bmi < OVERWEIGHT_FROM {
            Self::Normal
        } else if bmi < OBESE_FROM {
            Self::Overweight
        } else {
            Self::Obese
        }
    }
}

/// Whole-kilogram weight bounds for a healthy BMI at a given height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightRange {
    pub min: u32,
    pub max: u32,
}

/// Derived on demand from weight/height; never persisted on its own.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BmiResult {
    /// Rounded to one decimal.
    pub value: f64,
    pub category: BmiCategory,
    pub ideal_weight_range: WeightRange,
}

/// Computes BMI for a valid (positive) weight and height. Input checking belongs to the caller.
///
/// The category is taken from the rounded value, so the displayed number and label agree.
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> BmiResult {
    let height_m = height_cm / 100.0;
    let raw = weight_kg / (height_m * height_m);
    let value = (raw * 10.0).round() / 10.0;
    BmiResult {
        value,
        category: BmiCategory::from_value(value),
        ideal_weight_range: ideal_weight_range(height_cm),
    }
}

/// Weight range for BMI 18.5–24.9 at `height_cm`, rounded to the nearest kilogram.
pub fn ideal_weight_range(height_cm: f64) -> WeightRange {
    let height_m = height_cm / 100.0;
    let sq = height_m * height_m;
    WeightRange {
        min: (IDEAL_BMI_MIN * sq).round().max(0.0) as u32,
        max: (IDEAL_BMI_MAX * sq).round().max(0.0) as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_adult() {
        let r = calculate_bmi(70.0, 175.0);
        assert_eq!(r.value, 22.9);
        assert_eq!(r.category, BmiCategory::Normal);
    }

    #[test]
    fn underweight_adult() {
        let r = calculate_bmi(50.0, 175.0);
        assert_eq!(r.value, 16.3);
        assert_eq!(r.category, BmiCategory::Underweight);
    }

    #[test]
    fn ideal_range_for_175cm() {
        assert_eq!(ideal_weight_range(175.0), WeightRange { min: 57, max: 76 });
        assert_eq!(calculate_bmi(70.0, 175.0).ideal_weight_range, WeightRange { min: 57, max: 76 });
    }

    #[test]
    fn category_boundaries_are_lower_inclusive() {
        assert_eq!(BmiCategory::from_value(18.4), BmiCategory::Underweight);
        assert_eq!(BmiCategory::from_value(18.5), BmiCategory::Normal);
        assert_eq!(BmiCategory::from_value(24.9), BmiCategory::Normal);
        assert_eq!(BmiCategory::from_value(25.0), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_value(29.9), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_value(30.0), BmiCategory::Obese);
    }

    #[test]
    fn obese_adult() {
        let r = calculate_bmi(110.0, 170.0);
        assert_eq!(r.value, 38.1);
        assert_eq!(r.category, BmiCategory::Obese);
    }
}
