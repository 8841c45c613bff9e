use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Numeric progress target against an activity. The table ships with the
/// schema and cascades with its activity, but no routes are mounted for
/// it yet.
#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone)]
pub struct Goal {
    pub id: i64,
    pub activity_id: i64,
    pub target_value: i64,
    pub current_value: i64,
    pub target_date: Option<String>,
    pub achieved: bool,
    pub created_at: DateTime<Utc>,
}
