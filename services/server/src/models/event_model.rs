use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Serialize, Deserialize, Debug, Clone, FromRow)]
pub struct EventTable {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: String,
    pub approval_for_publish: bool,
    pub owner_id: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, FromRow)]
pub struct EventRuleTable {
    pub id: i64,
    pub event_id: i64,
    pub rule_name: String,
    pub rule_value: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, FromRow)]
pub struct EventLogTable {
    pub id: i64,
    pub event_id: i64,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, FromRow)]
pub struct AttachmentTable {
    pub id: i64,
    pub event_id: i64,
    pub file_name: String,
    pub file_path: String,
    pub uploaded_at: DateTime<Utc>,
}
