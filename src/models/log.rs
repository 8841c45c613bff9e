use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A progress entry tied to exactly one activity.
///
/// `metrics` holds either free text or a JSON-encoded structure; the
/// handlers decide which at write time and clients re-parse at read time.
#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone)]
pub struct Log {
    pub id: i64,
    pub activity_id: i64,
    pub text: String,
    pub metrics: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Log row joined with the owning activity's name.
#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone)]
pub struct LogWithActivity {
    pub id: i64,
    pub activity_id: i64,
    pub text: String,
    pub metrics: Option<String>,
    pub created_at: DateTime<Utc>,
    pub activity_name: String,
}

/// Aggregate counters for one activity's logs. Dates are `DATE(...)`
/// strings and stay null while the activity has no logs.
#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone)]
pub struct LogStats {
    pub total_logs: i64,
    pub first_log_date: Option<String>,
    pub last_log_date: Option<String>,
    pub days_logged: i64,
}

/// Response body for `GET /api/logs/activity/{id}/stats`.
#[derive(Serialize, Deserialize, Debug)]
pub struct ActivityStatsResponse {
    pub activity_name: String,
    pub stats: LogStats,
    pub recent_logs: Vec<Log>,
}
