use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::log::Log;

/// A SMART goal. Owns its logs and goals rows (cascade delete).
#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone)]
pub struct Activity {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub specific: String,
    pub measurable: String,
    pub achievable: Option<String>,
    pub relevant: Option<String>,
    pub timebound: String,
    pub buddy_email: Option<String>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Detail view: the activity row with its logs inlined, newest first.
#[derive(Serialize, Deserialize, Debug)]
pub struct ActivityWithLogs {
    #[serde(flatten)]
    pub activity: Activity,
    pub logs: Vec<Log>,
}
