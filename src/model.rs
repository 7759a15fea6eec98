//src/model.rs
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

pub const LB_TO_KG: f64 = 0.453_592_37;

/// A per-day container for logged sets, as handed out by the data service.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: String,
    pub date: NaiveDate,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub muscle_group: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, Display)]
#[strum(ascii_case_insensitive)]
pub enum WeightUnit {
    #[default]
    #[serde(rename = "kg")]
    #[strum(to_string = "kg")]
    Kilograms,
    #[serde(rename = "lbs", alias = "lb")]
    #[strum(to_string = "lbs", serialize = "lb")]
    Pounds,
}

impl WeightUnit {
    /// Converts a value entered in this unit to kilograms.
    #[must_use]
    pub fn to_kg(self, value: f64) -> f64 {
        match self {
            Self::Kilograms => value,
            Self::Pounds => value * LB_TO_KG,
        }
    }

    /// Converts a stored kilogram value back into this unit for display.
    #[must_use]
    pub fn from_kg(self, kg: f64) -> f64 {
        match self {
            Self::Kilograms => kg,
            Self::Pounds => kg / LB_TO_KG,
        }
    }
}

/// One logged performance of an exercise within a session.
/// `weight` is always kilograms; `unit` only records what the lifter typed in.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSet {
    pub id: String,
    pub session_id: String,
    pub exercise_id: String,
    #[serde(default)]
    pub exercise_name: Option<String>,
    #[serde(default)]
    pub reps: Option<u32>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub unit: WeightUnit,
    #[serde(default)]
    pub rpe: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub set_count: Option<u32>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl WorkoutSet {
    /// Weight in the unit the set was logged with.
    #[must_use]
    pub fn display_weight(&self) -> Option<f64> {
        self.weight.map(|kg| self.unit.from_kg(kg))
    }
}

/// Payload for `createWorkoutSet`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewWorkoutSet {
    pub session_id: String,
    pub exercise_id: String,
    pub reps: u32,
    pub weight: Option<f64>, // kg
    pub unit: WeightUnit,
    pub rpe: Option<f64>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Statistics {
    pub total_sets: usize,
    pub unique_exercises: usize,
    pub total_reps: u64,
    pub max_weight: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
    Info,
}

/// Renders a session date the way the header shows it, e.g. "Monday, October 19, 2026".
#[must_use]
pub fn format_session_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}
