//! Typed client for the Progress Buddy REST API.
//!
//! One method per backend endpoint. Non-2xx responses surface the
//! server's `error` message, falling back to the HTTP status.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::models::activity::{Activity, ActivityWithLogs};
use crate::models::log::{ActivityStatsResponse, LogWithActivity};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP transport error.
    #[error("request to {endpoint} failed: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// The server answered with a non-2xx status.
    #[error("{message}")]
    Api { status: u16, message: String },
    /// Response deserialization failed.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: reqwest::Error,
    },
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Fields accepted by the activity create/update endpoints.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ActivityPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specific: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measurable: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub achievable: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relevant: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timebound: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buddy_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

/// Fields accepted by the log create/update endpoints.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LogPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<serde_json::Value>,
}

/// Fields accepted by the new-goal notification endpoint.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewGoalPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measurable: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timebound: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relevant: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Message {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct NotificationResponse {
    pub success: bool,
}

#[derive(Debug, Deserialize)]
pub struct NewGoalResponse {
    pub success: bool,
    #[serde(default)]
    pub result: serde_json::Value,
}

#[derive(Debug, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

/// Client for the Progress Buddy API. The base URL includes the `/api`
/// prefix, e.g. `http://localhost:3001/api`.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        req: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        let resp = req.send().await.map_err(|source| ClientError::Http {
            endpoint: endpoint.to_string(),
            source,
        })?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp
                .json::<ErrorBody>()
                .await
                .map(|body| body.error)
                .unwrap_or_else(|_| format!("HTTP error! status: {}", status.as_u16()));
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        resp.json()
            .await
            .map_err(|source| ClientError::Deserialization {
                endpoint: endpoint.to_string(),
                source,
            })
    }

    // -- Activities ---------------------------------------------------------

    pub async fn list_activities(&self) -> Result<Vec<Activity>, ClientError> {
        self.execute("GET /activities", self.http.get(self.url("/activities")))
            .await
    }

    pub async fn get_activity(&self, id: i64) -> Result<ActivityWithLogs, ClientError> {
        self.execute(
            "GET /activities/{id}",
            self.http.get(self.url(&format!("/activities/{id}"))),
        )
        .await
    }

    pub async fn create_activity(
        &self,
        payload: &ActivityPayload,
    ) -> Result<Activity, ClientError> {
        self.execute(
            "POST /activities",
            self.http.post(self.url("/activities")).json(payload),
        )
        .await
    }

    pub async fn update_activity(
        &self,
        id: i64,
        payload: &ActivityPayload,
    ) -> Result<Activity, ClientError> {
        self.execute(
            "PUT /activities/{id}",
            self.http
                .put(self.url(&format!("/activities/{id}")))
                .json(payload),
        )
        .await
    }

    pub async fn delete_activity(&self, id: i64) -> Result<Message, ClientError> {
        self.execute(
            "DELETE /activities/{id}",
            self.http.delete(self.url(&format!("/activities/{id}"))),
        )
        .await
    }

    pub async fn complete_activity(&self, id: i64) -> Result<Activity, ClientError> {
        self.execute(
            "PATCH /activities/{id}/complete",
            self.http
                .patch(self.url(&format!("/activities/{id}/complete"))),
        )
        .await
    }

    // -- Logs ---------------------------------------------------------------

    pub async fn list_logs(
        &self,
        activity_id: Option<i64>,
    ) -> Result<Vec<LogWithActivity>, ClientError> {
        let url = match activity_id {
            Some(id) => self.url(&format!("/logs?activity_id={id}")),
            None => self.url("/logs"),
        };
        self.execute("GET /logs", self.http.get(url)).await
    }

    pub async fn get_log(&self, id: i64) -> Result<LogWithActivity, ClientError> {
        self.execute(
            "GET /logs/{id}",
            self.http.get(self.url(&format!("/logs/{id}"))),
        )
        .await
    }

    pub async fn create_log(&self, payload: &LogPayload) -> Result<LogWithActivity, ClientError> {
        self.execute("POST /logs", self.http.post(self.url("/logs")).json(payload))
            .await
    }

    pub async fn update_log(
        &self,
        id: i64,
        payload: &LogPayload,
    ) -> Result<LogWithActivity, ClientError> {
        self.execute(
            "PUT /logs/{id}",
            self.http.put(self.url(&format!("/logs/{id}"))).json(payload),
        )
        .await
    }

    pub async fn delete_log(&self, id: i64) -> Result<Message, ClientError> {
        self.execute(
            "DELETE /logs/{id}",
            self.http.delete(self.url(&format!("/logs/{id}"))),
        )
        .await
    }

    pub async fn log_stats(&self, activity_id: i64) -> Result<ActivityStatsResponse, ClientError> {
        self.execute(
            "GET /logs/activity/{id}/stats",
            self.http
                .get(self.url(&format!("/logs/activity/{activity_id}/stats"))),
        )
        .await
    }

    // -- Notifications ------------------------------------------------------

    pub async fn send_achievement(
        &self,
        activity_id: i64,
        message: &str,
    ) -> Result<NotificationResponse, ClientError> {
        self.execute(
            "POST /notifications/achievement",
            self.http
                .post(self.url("/notifications/achievement"))
                .json(&serde_json::json!({ "activity_id": activity_id, "message": message })),
        )
        .await
    }

    pub async fn send_goal_completed(
        &self,
        activity_id: i64,
    ) -> Result<NotificationResponse, ClientError> {
        self.execute(
            "POST /notifications/goal-completed",
            self.http
                .post(self.url("/notifications/goal-completed"))
                .json(&serde_json::json!({ "activity_id": activity_id })),
        )
        .await
    }

    pub async fn send_weekly_summary(
        &self,
        activity_id: i64,
    ) -> Result<NotificationResponse, ClientError> {
        self.execute(
            "POST /notifications/weekly-summary",
            self.http
                .post(self.url("/notifications/weekly-summary"))
                .json(&serde_json::json!({ "activity_id": activity_id })),
        )
        .await
    }

    pub async fn send_new_goal(
        &self,
        payload: &NewGoalPayload,
    ) -> Result<NewGoalResponse, ClientError> {
        self.execute(
            "POST /notifications",
            self.http.post(self.url("/notifications")).json(payload),
        )
        .await
    }

    // -- Health -------------------------------------------------------------

    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        self.execute("GET /health", self.http.get(self.url("/health")))
            .await
    }
}
