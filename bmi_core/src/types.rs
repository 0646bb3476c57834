//! Core domain types for the BMI log.
//!
//! This module defines the fundamental types used throughout the system:
//! - Measurement input and the computed result record
//! - BMI categories and their display metadata
//! - Views of an interactive session and the transitions between them

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// serde_json writes non-finite floats as `null`; read those back as NaN
fn f64_or_nan<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

// ============================================================================
// Measurement Types
// ============================================================================

/// Biological sex used by the ideal-weight estimate
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "Male"),
            Gender::Female => write!(f, "Female"),
        }
    }
}

/// Body measurements for a single computation
///
/// Bounds (height 100-250, weight 30-200, age 5-100) belong to whatever
/// collects the input; any numeric value is accepted here.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementInput {
    /// Display-only name
    #[serde(default)]
    pub name: Option<String>,
    pub age: u32,
    pub gender: Gender,
    #[serde(deserialize_with = "f64_or_nan")]
    pub weight_kg: f64,
    #[serde(deserialize_with = "f64_or_nan")]
    pub height_cm: f64,
}

// ============================================================================
// Category Types
// ============================================================================

/// BMI category
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    NotApplicable = 0,
    Underweight = 1,
    Normal = 2,
    Overweight = 3,
    Obese = 4,
}

/// Display metadata for a category
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CategoryInfo {
    pub label: &'static str,
    pub color: &'static str,
    /// Band index (0..=3) on the four-band BMI scale
    pub scale_position: u8,
}

/// Indexed by the `Category` discriminant.
const CATEGORY_INFO: [CategoryInfo; 5] = [
    CategoryInfo {
        label: "N/A",
        color: "gray",
        scale_position: 0,
    },
    CategoryInfo {
        label: "Underweight",
        color: "blue",
        scale_position: 0,
    },
    CategoryInfo {
        label: "Normal weight",
        color: "green",
        scale_position: 1,
    },
    CategoryInfo {
        label: "Overweight",
        color: "yellow",
        scale_position: 2,
    },
    CategoryInfo {
        label: "Obese",
        color: "red",
        scale_position: 3,
    },
];

/// Boundaries between the bands of the BMI scale, in display order
pub const SCALE_TICKS: [f64; 3] = [18.5, 25.0, 30.0];

impl Category {
    pub const ALL: [Category; 5] = [
        Category::NotApplicable,
        Category::Underweight,
        Category::Normal,
        Category::Overweight,
        Category::Obese,
    ];

    /// Look up the display metadata for this category
    pub fn info(self) -> &'static CategoryInfo {
        &CATEGORY_INFO[self as usize]
    }

    pub fn label(self) -> &'static str {
        self.info().label
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Result Record
// ============================================================================

/// A computed and stored BMI result
///
/// Created once per submitted measurement and never modified afterwards.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResultRecord {
    /// Creation instant in UTC RFC 3339 with nanosecond precision.
    /// Sorts lexicographically in creation order.
    pub id: String,
    #[serde(flatten)]
    pub input: MeasurementInput,
    #[serde(deserialize_with = "f64_or_nan")]
    pub bmi: f64,
    pub category: Category,
    pub ideal_weight_label: String,
    pub created_at: DateTime<Utc>,
    pub display_date: String,
}

impl ResultRecord {
    /// One-line description of the measurement, e.g. `"Ayu | 25th | Female | 170cm"`
    pub fn summary_line(&self) -> String {
        let name = match self.input.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => format!("{} | ", name),
            _ => String::new(),
        };
        format!(
            "{}{}th | {} | {}cm",
            name, self.input.age, self.input.gender, self.input.height_cm
        )
    }
}

// ============================================================================
// Session Views
// ============================================================================

/// Screen currently presented by an interactive session
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum View {
    #[default]
    Input,
    Result,
    History,
    Profile,
}

impl View {
    pub const ALL: [View; 4] = [View::Input, View::Result, View::History, View::Profile];

    /// Views reachable from `self` through plain navigation.
    ///
    /// `Result` is only entered by submitting a measurement, and only left
    /// by going back to `Input`.
    pub fn reachable_from(self) -> &'static [View] {
        match self {
            View::Input | View::History | View::Profile => {
                &[View::Input, View::History, View::Profile]
            }
            View::Result => &[View::Input],
        }
    }

    /// Whether `navigate(to)` is allowed from this view
    pub fn can_transition_to(self, to: View) -> bool {
        self == to || self.reachable_from().contains(&to)
    }
}
