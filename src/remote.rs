use crate::model::{Exercise, NewWorkoutSet, Session, WorkoutSet};
use crate::repository::{RepoError, WorkoutRepository};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, error};

/// Talks to the data service over HTTP. Each operation is a
/// `POST {base_url}/{operationName}` with a JSON object of arguments; the
/// response body is the JSON result.
pub struct HttpRepository {
    http_client: Client,
    base_url: String,
}

impl HttpRepository {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn call<A, T>(&self, operation: &'static str, args: &A) -> Result<T, RepoError>
    where
        A: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = format!("{}/{}", self.base_url, operation);
        debug!("POST {}", url);

        let response = self
            .http_client
            .post(&url)
            .json(args)
            .send()
            .await
            .map_err(|source| RepoError::Transport { operation, source })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error body".to_string());
            error!("{} failed with status: {}. Body: {}", operation, status, body);
            return Err(RepoError::Status {
                operation,
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|source| RepoError::Transport { operation, source })?;
        // An empty body is how some endpoints say "nothing"
        let raw: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
            b"null"
        } else {
            &bytes
        };
        serde_json::from_slice(raw).map_err(|e| RepoError::Decode {
            operation,
            message: e.to_string(),
        })
    }
}

impl WorkoutRepository for HttpRepository {
    async fn get_today_session(&self) -> Result<Option<Session>, RepoError> {
        self.call("getTodaySession", &json!({})).await
    }

    async fn create_workout_session(&self) -> Result<Session, RepoError> {
        self.call("createWorkoutSession", &json!({})).await
    }

    async fn end_workout_session(&self, session_id: &str) -> Result<(), RepoError> {
        let _: Value = self
            .call("endWorkoutSession", &json!({ "sessionId": session_id }))
            .await?;
        Ok(())
    }

    async fn get_muscle_groups(&self) -> Result<Vec<String>, RepoError> {
        self.call("getMuscleGroups", &json!({})).await
    }

    async fn get_exercises_by_muscle_group(
        &self,
        muscle_group: &str,
    ) -> Result<Vec<Exercise>, RepoError> {
        self.call(
            "getExercisesByMuscleGroup",
            &json!({ "muscleGroup": muscle_group }),
        )
        .await
    }

    async fn get_workout_sets(&self, session_id: &str) -> Result<Vec<WorkoutSet>, RepoError> {
        self.call("getWorkoutSets", &json!({ "sessionId": session_id }))
            .await
    }

    async fn create_workout_set(&self, new_set: &NewWorkoutSet) -> Result<WorkoutSet, RepoError> {
        self.call("createWorkoutSet", new_set).await
    }
}
