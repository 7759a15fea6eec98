use crate::model::{Exercise, NewWorkoutSet, WeightUnit};
use std::collections::BTreeMap;
use strum_macros::Display;
use thiserror::Error;

const RPE_MIN: f64 = 1.0;
const RPE_MAX: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub enum Field {
    #[strum(to_string = "Muscle group")]
    MuscleGroup,
    Exercise,
    Reps,
    Weight,
    #[strum(to_string = "RPE")]
    Rpe,
    Notes,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldError {
    #[error("{0} is required.")]
    Missing(Field),
    #[error("{field} must be a number, got '{value}'.")]
    NotANumber { field: Field, value: String },
    #[error("{field} must be between {min} and {max}.")]
    OutOfRange { field: Field, min: f64, max: f64 },
}

/// Draft values of the "log a set" form. Text inputs are kept exactly as typed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SetForm {
    pub muscle_group: Option<String>,
    pub exercise_id: Option<String>,
    pub exercise_options: Vec<Exercise>,
    pub reps: String,
    pub weight: String,
    pub unit: WeightUnit,
    pub rpe: String,
    pub notes: String,
    /// Fields currently flagged by the last validation pass.
    pub invalid: BTreeMap<Field, FieldError>,
}

/// A form that passed validation, with weight still in the entered unit.
#[derive(Debug, Clone, PartialEq)]
pub struct SetDraft {
    pub exercise_id: String,
    pub reps: u32,
    pub weight: Option<f64>,
    pub unit: WeightUnit,
    pub rpe: Option<f64>,
    pub notes: Option<String>,
}

impl SetDraft {
    #[must_use]
    pub fn into_new_set(self, session_id: &str) -> NewWorkoutSet {
        NewWorkoutSet {
            session_id: session_id.to_string(),
            exercise_id: self.exercise_id,
            reps: self.reps,
            weight: self.weight.map(|w| self.unit.to_kg(w)),
            unit: self.unit,
            rpe: self.rpe,
            notes: self.notes,
        }
    }
}

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn parse_number(field: Field, value: &str) -> Result<f64, FieldError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| FieldError::NotANumber {
            field,
            value: value.to_string(),
        })
}

impl SetForm {
    #[must_use]
    pub fn with_unit(unit: WeightUnit) -> Self {
        Self {
            unit,
            ..Default::default()
        }
    }

    /// Stores a typed value and drops that field's invalid marker. A new
    /// muscle group also empties the exercise choice and its options.
    pub fn set_value(&mut self, field: Field, value: String) {
        match field {
            Field::MuscleGroup => {
                self.muscle_group = non_blank(&value).map(str::to_string);
                self.exercise_id = None;
                self.exercise_options.clear();
            }
            Field::Exercise => self.exercise_id = non_blank(&value).map(str::to_string),
            Field::Reps => self.reps = value,
            Field::Weight => self.weight = value,
            Field::Rpe => self.rpe = value,
            Field::Notes => self.notes = value,
        }
        self.invalid.remove(&field);
    }

    #[must_use]
    pub fn selected_exercise(&self) -> Option<&Exercise> {
        let id = self.exercise_id.as_deref()?;
        self.exercise_options.iter().find(|e| e.id == id)
    }

    /// Checks every field and returns either a submittable draft or the
    /// full set of problems. All fields are scanned; it never stops at the first error.
    pub fn check(&self) -> Result<SetDraft, BTreeMap<Field, FieldError>> {
        let mut errors = BTreeMap::new();

        if self.muscle_group.as_deref().and_then(non_blank).is_none() {
            errors.insert(Field::MuscleGroup, FieldError::Missing(Field::MuscleGroup));
        }
        let exercise_id = self.exercise_id.as_deref().and_then(non_blank);
        if exercise_id.is_none() {
            errors.insert(Field::Exercise, FieldError::Missing(Field::Exercise));
        }

        let reps = match non_blank(&self.reps) {
            None => {
                errors.insert(Field::Reps, FieldError::Missing(Field::Reps));
                None
            }
            Some(raw) => match raw.parse::<u32>() {
                Ok(n) if n > 0 => Some(n),
                Ok(_) => {
                    errors.insert(
                        Field::Reps,
                        FieldError::OutOfRange {
                            field: Field::Reps,
                            min: 1.0,
                            max: f64::from(u32::MAX),
                        },
                    );
                    None
                }
                Err(_) => {
                    errors.insert(
                        Field::Reps,
                        FieldError::NotANumber {
                            field: Field::Reps,
                            value: raw.to_string(),
                        },
                    );
                    None
                }
            },
        };

        let weight = match non_blank(&self.weight).map(|raw| parse_number(Field::Weight, raw)) {
            None => None,
            Some(Ok(w)) if w >= 0.0 => Some(w),
            Some(Ok(_)) => {
                errors.insert(
                    Field::Weight,
                    FieldError::OutOfRange {
                        field: Field::Weight,
                        min: 0.0,
                        max: f64::MAX,
                    },
                );
                None
            }
            Some(Err(e)) => {
                errors.insert(Field::Weight, e);
                None
            }
        };

        let rpe = match non_blank(&self.rpe).map(|raw| parse_number(Field::Rpe, raw)) {
            None => None,
            Some(Ok(r)) if (RPE_MIN..=RPE_MAX).contains(&r) => Some(r),
            Some(Ok(_)) => {
                errors.insert(
                    Field::Rpe,
                    FieldError::OutOfRange {
                        field: Field::Rpe,
                        min: RPE_MIN,
                        max: RPE_MAX,
                    },
                );
                None
            }
            Some(Err(e)) => {
                errors.insert(Field::Rpe, e);
                None
            }
        };

        match (exercise_id, reps) {
            (Some(exercise_id), Some(reps)) if errors.is_empty() => Ok(SetDraft {
                exercise_id: exercise_id.to_string(),
                reps,
                weight,
                unit: self.unit,
                rpe,
                notes: non_blank(&self.notes).map(str::to_string),
            }),
            _ => Err(errors),
        }
    }

    /// Empties the numeric and note inputs and drops all invalid markers.
    /// Muscle group, exercise and unit stay as they were.
    pub fn clear(&mut self) {
        self.reps.clear();
        self.weight.clear();
        self.rpe.clear();
        self.notes.clear();
        self.invalid.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> SetForm {
        SetForm {
            muscle_group: Some("Chest".into()),
            exercise_id: Some("ex-bench".into()),
            reps: "8".into(),
            weight: "100".into(),
            ..Default::default()
        }
    }

    #[test]
    fn empty_form_flags_every_required_field() {
        let errors = SetForm::default().check().unwrap_err();
        let fields: Vec<_> = errors.keys().copied().collect();
        assert_eq!(fields, vec![Field::MuscleGroup, Field::Exercise, Field::Reps]);
        assert_eq!(errors[&Field::Reps], FieldError::Missing(Field::Reps));
    }

    #[test]
    fn filled_form_yields_draft() {
        let draft = filled().check().unwrap();
        assert_eq!(draft.exercise_id, "ex-bench");
        assert_eq!(draft.reps, 8);
        assert_eq!(draft.weight, Some(100.0));
        assert_eq!(draft.rpe, None);
        assert_eq!(draft.notes, None);
    }

    #[test]
    fn weight_is_optional_but_must_be_numeric() {
        let mut form = filled();
        form.weight = "  ".into();
        assert_eq!(form.check().unwrap().weight, None);

        form.weight = "heavy".into();
        let errors = form.check().unwrap_err();
        assert!(matches!(errors[&Field::Weight], FieldError::NotANumber { .. }));
    }

    #[test]
    fn rpe_outside_scale_is_rejected() {
        let mut form = filled();
        form.rpe = "11".into();
        let errors = form.check().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[&Field::Rpe], FieldError::OutOfRange { .. }));

        form.rpe = "8.5".into();
        assert_eq!(form.check().unwrap().rpe, Some(8.5));
    }

    #[test]
    fn zero_reps_is_out_of_range() {
        let mut form = filled();
        form.reps = "0".into();
        assert!(matches!(
            form.check().unwrap_err()[&Field::Reps],
            FieldError::OutOfRange { .. }
        ));
    }

    #[test]
    fn draft_converts_pounds_to_kilograms() {
        let mut form = filled();
        form.unit = WeightUnit::Pounds;
        form.weight = "220.462".into();
        let new_set = form.check().unwrap().into_new_set("session-1");
        assert_eq!(new_set.session_id, "session-1");
        assert_eq!(new_set.unit, WeightUnit::Pounds);
        assert!((new_set.weight.unwrap() - 100.0).abs() < 0.001);
    }

    #[test]
    fn clear_keeps_selects_and_unit() {
        let mut form = filled();
        form.unit = WeightUnit::Pounds;
        form.rpe = "7".into();
        form.notes = "paused reps".into();
        form.invalid
            .insert(Field::Reps, FieldError::Missing(Field::Reps));

        form.clear();

        assert_eq!(form.reps, "");
        assert_eq!(form.weight, "");
        assert_eq!(form.rpe, "");
        assert_eq!(form.notes, "");
        assert!(form.invalid.is_empty());
        assert_eq!(form.muscle_group.as_deref(), Some("Chest"));
        assert_eq!(form.exercise_id.as_deref(), Some("ex-bench"));
        assert_eq!(form.unit, WeightUnit::Pounds);
    }

    #[test]
    fn editing_a_field_drops_its_marker() {
        let mut form = SetForm::default();
        form.invalid = form.check().unwrap_err();
        form.set_value(Field::Reps, "5".into());
        assert!(!form.invalid.contains_key(&Field::Reps));
        assert!(form.invalid.contains_key(&Field::Exercise));
    }
}
