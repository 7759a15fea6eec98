use crate::model::WorkoutSet;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use strum_macros::{Display, EnumString};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, Display)]
#[strum(ascii_case_insensitive)]
pub enum SortField {
    #[default]
    SetCount,
    ExerciseName,
    Reps,
    Weight,
    Unit,
    #[strum(to_string = "RPE")]
    Rpe,
    Notes,
    CreatedDate,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, Display)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortState {
    pub field: SortField,
    pub direction: SortDirection,
}

/// A cell value as the table compares it. Missing cells behave like an empty string.
#[derive(Debug, Clone, PartialEq)]
enum SortKey {
    Missing,
    Number(f64),
    Text(String),
}

impl SortKey {
    fn of(set: &WorkoutSet, field: SortField) -> Self {
        match field {
            SortField::SetCount => set.set_count.map_or(Self::Missing, |n| Self::Number(n.into())),
            SortField::Reps => set.reps.map_or(Self::Missing, |n| Self::Number(n.into())),
            SortField::Weight => set.weight.map_or(Self::Missing, Self::Number),
            SortField::Rpe => set.rpe.map_or(Self::Missing, Self::Number),
            SortField::ExerciseName => set
                .exercise_name
                .clone()
                .map_or(Self::Missing, Self::Text),
            SortField::Notes => set.notes.clone().map_or(Self::Missing, Self::Text),
            SortField::Unit => Self::Text(set.unit.to_string()),
            // RFC 3339 in UTC orders lexicographically
            SortField::CreatedDate => set
                .created_at
                .map_or(Self::Missing, |ts| Self::Text(ts.to_rfc3339())),
        }
    }

    fn as_number(&self) -> Option<f64> {
        match self {
            Self::Missing => Some(0.0),
            Self::Number(n) => Some(*n),
            Self::Text(t) => {
                let t = t.trim();
                if t.is_empty() {
                    Some(0.0)
                } else {
                    t.parse().ok()
                }
            }
        }
    }

    /// Three-way comparison built only from `<` and `>`, so incomparable
    /// pairs (NaN, non-numeric text against a number) come out equal.
    fn compare(&self, other: &Self) -> Ordering {
        let (a, b) = match (self, other) {
            (Self::Missing, Self::Missing) => return Ordering::Equal,
            (Self::Text(a), Self::Text(b)) => return a.cmp(b),
            (Self::Missing, Self::Text(b)) => return "".cmp(b.as_str()),
            (Self::Text(a), Self::Missing) => return a.as_str().cmp(""),
            _ => match (self.as_number(), other.as_number()) {
                (Some(a), Some(b)) => (a, b),
                _ => return Ordering::Equal,
            },
        };
        if a > b {
            Ordering::Greater
        } else if a < b {
            Ordering::Less
        } else {
            Ordering::Equal
        }
    }
}

/// Reorders `sets` in place by `field`. Stable, so equal rows keep their order.
pub fn sort_sets(sets: &mut [WorkoutSet], field: SortField, direction: SortDirection) {
    sets.sort_by(|a, b| {
        let ord = SortKey::of(a, field).compare(&SortKey::of(b, field));
        match direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
}
