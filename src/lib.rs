use tracing::{debug, error, info};

// --- Declare modules ---
pub mod config;
pub mod form;
pub mod model;
pub mod notifier;
pub mod remote;
pub mod repository;
pub mod state;
pub mod stats;
pub mod table;

// --- Expose public types ---
pub use config::{
    get_config_path as get_config_path_util, load as load_config_util,
    save as save_config_util, Config, Error as ConfigError,
};
pub use form::{Field, FieldError, SetDraft, SetForm};
pub use model::{
    format_session_date, Exercise, NewWorkoutSet, Session, Severity, Statistics, WeightUnit,
    WorkoutSet,
};
pub use notifier::Notifier;
pub use remote::HttpRepository;
pub use repository::{RepoError, WorkoutRepository};
pub use state::{Action, ViewState};
pub use stats::compute_statistics;
pub use table::{SortDirection, SortField, SortState};

const END_SESSION_PROMPT: &str =
    "End today's workout session? This closes the session and cannot be undone.";

/// Drives one workout-logging screen: owns the view state, calls the data
/// service, and reports every outcome through the notifier. Handlers never
/// return errors; failures become error notifications and leave the state as
/// it was before the call.
pub struct SessionController<R, N> {
    repo: R,
    notifier: N,
    state: ViewState,
}

impl<R: WorkoutRepository, N: Notifier> SessionController<R, N> {
    pub fn new(repo: R, notifier: N, config: &Config) -> Self {
        Self {
            repo,
            notifier,
            state: ViewState::new(
                config.default_unit,
                config.table_visible,
                config.preserve_sort_on_reload,
            ),
        }
    }

    pub const fn state(&self) -> &ViewState {
        &self.state
    }

    pub const fn repository(&self) -> &R {
        &self.repo
    }

    pub const fn notifier(&self) -> &N {
        &self.notifier
    }

    fn dispatch(&mut self, action: Action) {
        debug!(?action, "dispatch");
        let state = std::mem::take(&mut self.state);
        self.state = state.reduce(action);
    }

    fn report_failure(&self, message: &str, err: &RepoError) {
        error!("{}: {}", message, err);
        self.notifier.notify("Error", message, Severity::Error);
    }

    // --- Session Manager ---

    /// Looks up today's session (loading its sets if there is one), then
    /// loads the muscle-group options regardless of the outcome.
    pub async fn initialize(&mut self) {
        self.dispatch(Action::LoadingStarted);
        let lookup = self.repo.get_today_session().await;
        self.dispatch(Action::LoadingFinished);

        match lookup {
            Ok(Some(session)) => {
                info!("Found today's session {} ({})", session.id, session.date);
                self.dispatch(Action::SessionLoaded(Some(session)));
                self.load_sets().await;
            }
            Ok(None) => {
                info!("No session for today yet");
                self.dispatch(Action::SessionLoaded(None));
            }
            Err(e) => {
                self.report_failure("Failed to load today's workout session", &e);
                self.dispatch(Action::SessionLoaded(None));
            }
        }

        self.load_muscle_groups().await;
    }

    /// Starts today's session. Returns whether a session was created.
    pub async fn create_session(&mut self) -> bool {
        if let Some(existing) = self.state.session_id() {
            info!("Session {} already active, not creating another", existing);
            self.notifier.notify(
                "Session active",
                "A workout session is already running for today",
                Severity::Info,
            );
            return false;
        }

        self.dispatch(Action::LoadingStarted);
        let created = self.repo.create_workout_session().await;
        self.dispatch(Action::LoadingFinished);

        match created {
            Ok(session) => {
                info!("Started session {}", session.id);
                self.dispatch(Action::SessionCreated(session));
                self.notifier
                    .notify("Success", "Workout session started", Severity::Success);
                true
            }
            Err(e) => {
                self.report_failure("Failed to start workout session", &e);
                false
            }
        }
    }

    /// Closes the active session after the user confirms. Local sets are only
    /// dropped once the service has acknowledged the close.
    pub async fn end_session(&mut self) -> bool {
        let Some(session_id) = self.state.session_id().map(str::to_string) else {
            debug!("end_session called without a session");
            return false;
        };

        if !self.notifier.confirm(END_SESSION_PROMPT).await {
            info!("End of session {} declined", session_id);
            return false;
        }

        self.dispatch(Action::LoadingStarted);
        let ended = self.repo.end_workout_session(&session_id).await;
        self.dispatch(Action::LoadingFinished);

        match ended {
            Ok(()) => {
                info!("Ended session {}", session_id);
                self.dispatch(Action::SessionEnded);
                self.notifier
                    .notify("Success", "Workout session ended", Severity::Success);
                true
            }
            Err(e) => {
                self.report_failure("Failed to end workout session", &e);
                false
            }
        }
    }

    // --- Form Controller ---

    async fn load_muscle_groups(&mut self) {
        match self.repo.get_muscle_groups().await {
            Ok(groups) => self.dispatch(Action::MuscleGroupsLoaded(groups)),
            Err(e) => self.report_failure("Failed to load muscle groups", &e),
        }
    }

    /// Picks a muscle group. The chosen exercise and its options are cleared
    /// right away; options for the new group are fetched afterwards.
    pub async fn change_muscle_group(&mut self, muscle_group: Option<&str>) {
        self.dispatch(Action::MuscleGroupChanged(muscle_group.map(str::to_string)));

        let Some(group) = self.state.form.muscle_group.clone() else {
            return;
        };
        match self.repo.get_exercises_by_muscle_group(&group).await {
            Ok(exercises) => {
                debug!("Loaded {} exercises for {}", exercises.len(), group);
                self.dispatch(Action::ExercisesLoaded {
                    muscle_group: group,
                    exercises,
                });
            }
            Err(e) => self.report_failure("Failed to load exercises", &e),
        }
    }

    pub fn select_exercise(&mut self, exercise_id: Option<&str>) {
        self.dispatch(Action::ExerciseSelected(exercise_id.map(str::to_string)));
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.dispatch(Action::FieldEdited(field, value.into()));
    }

    pub fn set_unit(&mut self, unit: WeightUnit) {
        self.dispatch(Action::UnitChanged(unit));
    }

    fn validated_draft(&mut self) -> Option<SetDraft> {
        match self.state.form.check() {
            Ok(draft) => {
                self.dispatch(Action::Validated(Default::default()));
                Some(draft)
            }
            Err(errors) => {
                debug!("Validation failed on {:?}", errors.keys().collect::<Vec<_>>());
                self.dispatch(Action::Validated(errors));
                None
            }
        }
    }

    /// Re-checks every required input and flags the ones that are missing or
    /// malformed. Returns `true` when the form can be submitted.
    pub fn validate(&mut self) -> bool {
        self.validated_draft().is_some()
    }

    pub fn clear_form(&mut self) {
        self.dispatch(Action::FormCleared);
    }

    // --- Set Repository Client ---

    /// Replaces the cached set list with a fresh copy from the service.
    pub async fn load_sets(&mut self) {
        let Some(session_id) = self.state.session_id().map(str::to_string) else {
            return;
        };

        self.dispatch(Action::LoadingStarted);
        let loaded = self.repo.get_workout_sets(&session_id).await;
        self.dispatch(Action::LoadingFinished);

        match loaded {
            Ok(sets) => {
                debug!("Loaded {} sets for session {}", sets.len(), session_id);
                self.dispatch(Action::SetsLoaded(sets));
            }
            Err(e) => self.report_failure("Failed to load workout sets", &e),
        }
    }

    pub async fn refresh(&mut self) {
        self.load_sets().await;
    }

    /// Submits the form as a new set, then reloads the whole list.
    /// Returns whether the set was created.
    pub async fn add_set(&mut self) -> bool {
        let Some(draft) = self.validated_draft() else {
            return false;
        };
        let Some(session_id) = self.state.session_id().map(str::to_string) else {
            self.notifier.notify(
                "No session",
                "Start a workout session before logging sets",
                Severity::Info,
            );
            return false;
        };
        let new_set = draft.into_new_set(&session_id);

        self.dispatch(Action::LoadingStarted);
        let created = self.repo.create_workout_set(&new_set).await;
        self.dispatch(Action::LoadingFinished);

        match created {
            Ok(set) => {
                info!(
                    "Logged set {} ({} x {:?} kg) in session {}",
                    set.id, new_set.reps, new_set.weight, session_id
                );
                self.dispatch(Action::FormCleared);
                self.notifier
                    .notify("Success", "Workout set added", Severity::Success);
                self.load_sets().await;
                true
            }
            Err(e) => {
                self.report_failure("Failed to add workout set", &e);
                false
            }
        }
    }

    // --- Table Presenter ---

    pub fn sort(&mut self, field: SortField, direction: SortDirection) {
        self.dispatch(Action::Sorted(field, direction));
    }

    pub fn toggle_visibility(&mut self) {
        self.dispatch(Action::TableToggled);
    }
}
