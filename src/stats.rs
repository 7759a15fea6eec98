use crate::model::{Statistics, WorkoutSet};
use std::collections::HashSet;

/// Recomputes the summary cards from the full set list.
/// Missing reps and weights count as zero.
#[must_use]
pub fn compute_statistics(sets: &[WorkoutSet]) -> Statistics {
    let unique_exercises = sets
        .iter()
        .map(|s| s.exercise_id.as_str())
        .collect::<HashSet<_>>()
        .len();
    let total_reps = sets.iter().map(|s| u64::from(s.reps.unwrap_or(0))).sum();
    let max_weight = sets
        .iter()
        .map(|s| s.weight.unwrap_or(0.0))
        .fold(0.0_f64, f64::max);

    Statistics {
        total_sets: sets.len(),
        unique_exercises,
        total_reps,
        max_weight,
    }
}
