//! Metric engine: BMI, category classification and ideal-weight estimate.
//!
//! Everything here is a pure function of its arguments. Degenerate input
//! never raises an error; it resolves to a sentinel instead:
//! - BMI `0.0` for non-positive or non-finite weight or height, and when
//!   the quotient overflows
//! - `Category::NotApplicable` for a BMI of zero
//! - `"N/A"` for a negative or non-finite ideal-weight estimate

use crate::{Category, Gender};

/// Label returned when no ideal weight can be estimated
pub const NOT_APPLICABLE_LABEL: &str = "N/A";

const CM_PER_INCH: f64 = 2.54;

/// Devine baseline height (5 ft)
const BASELINE_INCHES: f64 = 60.0;
const KG_PER_INCH_OVER_BASELINE: f64 = 2.3;

/// Compute BMI from weight (kg) and height (cm)
///
/// Returns `0.0` when either argument is not a positive finite number, or
/// when the result does not fit in an `f64`. Otherwise the result is
/// rounded to one decimal place, half-up: `81 kg / 2.00 m²` is exactly
/// `20.25` and yields `20.3`.
pub fn compute_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let usable = |v: f64| v.is_finite() && v > 0.0;
    if !usable(weight_kg) || !usable(height_cm) {
        return 0.0;
    }

    let height_m = height_cm / 100.0;
    let bmi = round_one_decimal(weight_kg / (height_m * height_m));
    if bmi.is_finite() {
        bmi
    } else {
        0.0
    }
}

/// Classify a BMI value
///
/// Bands are closed on the lower bound: `[18.5, 25)` is Normal, `[25, 30)` is
/// Overweight, `30` and above is Obese. Zero (and anything that is not a
/// positive number) is NotApplicable.
pub fn classify(bmi: f64) -> Category {
    if bmi.is_nan() || bmi <= 0.0 {
        Category::NotApplicable
    } else if bmi < 18.5 {
        Category::Underweight
    } else if bmi < 25.0 {
        Category::Normal
    } else if bmi < 30.0 {
        Category::Overweight
    } else {
        Category::Obese
    }
}

/// Estimate ideal weight with the Devine formula
///
/// Returns a label such as `"65.9 kg"`, or `"N/A"` when the estimate is
/// negative (heights below roughly 97 cm) or not a finite number.
pub fn ideal_weight_label(height_cm: f64, gender: Gender) -> String {
    let inches = height_cm / CM_PER_INCH;
    let base = match gender {
        Gender::Male => 50.0,
        Gender::Female => 45.5,
    };
    let ideal_kg = base + KG_PER_INCH_OVER_BASELINE * (inches - BASELINE_INCHES);

    if !ideal_kg.is_finite() || ideal_kg < 0.0 {
        return NOT_APPLICABLE_LABEL.to_string();
    }
    format!("{:.1} kg", ideal_kg)
}

/// Round half away from zero to one decimal place
fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
