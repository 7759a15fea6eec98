// Explicit view state plus the reducer that moves it forward.
// The controller only ever replaces state through `reduce`.
use crate::form::{Field, FieldError, SetForm};
use crate::model::{Exercise, Session, Statistics, WeightUnit, WorkoutSet};
use crate::stats::compute_statistics;
use crate::table::{sort_sets, SortDirection, SortField, SortState};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub session: Option<Session>,
    /// Advisory spinner flag. Nothing is gated on it.
    pub is_loading: bool,
    pub muscle_groups: Vec<String>,
    pub form: SetForm,
    /// Every set loaded for the active session, in service order.
    pub sets: Vec<WorkoutSet>,
    /// What the table shows: a separate copy of `sets`, possibly re-sorted.
    pub display_sets: Vec<WorkoutSet>,
    pub statistics: Statistics,
    pub sort: SortState,
    pub table_visible: bool,
    pub preserve_sort_on_reload: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            session: None,
            is_loading: false,
            muscle_groups: Vec::new(),
            form: SetForm::default(),
            sets: Vec::new(),
            display_sets: Vec::new(),
            statistics: Statistics::default(),
            sort: SortState::default(),
            table_visible: true,
            preserve_sort_on_reload: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    LoadingStarted,
    LoadingFinished,
    /// Result of looking up today's session; `None` also covers a failed lookup.
    SessionLoaded(Option<Session>),
    SessionCreated(Session),
    SessionEnded,
    MuscleGroupsLoaded(Vec<String>),
    MuscleGroupChanged(Option<String>),
    ExercisesLoaded {
        muscle_group: String,
        exercises: Vec<Exercise>,
    },
    ExerciseSelected(Option<String>),
    FieldEdited(Field, String),
    UnitChanged(WeightUnit),
    /// Replaces the invalid markers with the latest validation result.
    Validated(BTreeMap<Field, FieldError>),
    FormCleared,
    SetsLoaded(Vec<WorkoutSet>),
    Sorted(SortField, SortDirection),
    TableToggled,
}

impl ViewState {
    #[must_use]
    pub fn new(unit: WeightUnit, table_visible: bool, preserve_sort_on_reload: bool) -> Self {
        Self {
            form: SetForm::with_unit(unit),
            table_visible,
            preserve_sort_on_reload,
            ..Default::default()
        }
    }

    #[must_use]
    pub const fn session_exists(&self) -> bool {
        self.session.is_some()
    }

    #[must_use]
    pub fn session_id(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.id.as_str())
    }

    /// True once a muscle group is picked, i.e. exercise options are (or are being) loaded.
    #[must_use]
    pub const fn has_muscle_group(&self) -> bool {
        self.form.muscle_group.is_some()
    }

    fn replace_sets(&mut self, sets: Vec<WorkoutSet>) {
        self.statistics = compute_statistics(&sets);
        self.display_sets = sets.clone();
        self.sets = sets;
        if self.preserve_sort_on_reload {
            sort_sets(&mut self.display_sets, self.sort.field, self.sort.direction);
        } else {
            self.sort = SortState::default();
        }
    }

    #[must_use]
    pub fn reduce(mut self, action: Action) -> Self {
        match action {
            Action::LoadingStarted => self.is_loading = true,
            Action::LoadingFinished => self.is_loading = false,
            Action::SessionLoaded(session) => self.session = session,
            Action::SessionCreated(session) => {
                self.session = Some(session);
                self.replace_sets(Vec::new());
            }
            Action::SessionEnded => {
                self.session = None;
                self.replace_sets(Vec::new());
            }
            Action::MuscleGroupsLoaded(groups) => self.muscle_groups = groups,
            Action::MuscleGroupChanged(group) => {
                self.form.set_value(Field::MuscleGroup, group.unwrap_or_default());
            }
            Action::ExercisesLoaded {
                muscle_group,
                exercises,
            } => {
                // Drop answers for a group the user has already moved away from
                if self.form.muscle_group.as_deref() == Some(muscle_group.as_str()) {
                    self.form.exercise_options = exercises;
                }
            }
            Action::ExerciseSelected(id) => {
                self.form.set_value(Field::Exercise, id.unwrap_or_default());
            }
            Action::FieldEdited(field, value) => self.form.set_value(field, value),
            Action::UnitChanged(unit) => self.form.unit = unit,
            Action::Validated(errors) => self.form.invalid = errors,
            Action::FormCleared => self.form.clear(),
            Action::SetsLoaded(sets) => self.replace_sets(sets),
            Action::Sorted(field, direction) => {
                self.sort = SortState { field, direction };
                sort_sets(&mut self.display_sets, field, direction);
            }
            Action::TableToggled => self.table_visible = !self.table_visible,
        }
        self
    }
}
