//src/repository.rs
use crate::model::{Exercise, NewWorkoutSet, Session, WorkoutSet};
use std::future::Future;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RepoError {
    #[error("Request to '{operation}' failed: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("Server returned {status} for '{operation}': {body}")]
    Status {
        operation: &'static str,
        status: u16,
        body: String,
    },
    #[error("Failed to decode response from '{operation}': {message}")]
    Decode {
        operation: &'static str,
        message: String,
    },
    #[error("{0}")]
    Other(String),
}

/// The remote data service the controller talks to. Every call either
/// returns its result or fails; callers never retry.
pub trait WorkoutRepository {
    fn get_today_session(&self) -> impl Future<Output = Result<Option<Session>, RepoError>> + Send;

    fn create_workout_session(&self) -> impl Future<Output = Result<Session, RepoError>> + Send;

    fn end_workout_session(
        &self,
        session_id: &str,
    ) -> impl Future<Output = Result<(), RepoError>> + Send;

    fn get_muscle_groups(&self) -> impl Future<Output = Result<Vec<String>, RepoError>> + Send;

    fn get_exercises_by_muscle_group(
        &self,
        muscle_group: &str,
    ) -> impl Future<Output = Result<Vec<Exercise>, RepoError>> + Send;

    fn get_workout_sets(
        &self,
        session_id: &str,
    ) -> impl Future<Output = Result<Vec<WorkoutSet>, RepoError>> + Send;

    fn create_workout_set(
        &self,
        new_set: &NewWorkoutSet,
    ) -> impl Future<Output = Result<WorkoutSet, RepoError>> + Send;
}
