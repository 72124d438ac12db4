use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

#[derive(Deserialize, Validate, Debug)]
pub struct CreateEventRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub description: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: Option<String>,
    pub approval_for_publish: Option<bool>,
}

#[derive(Deserialize, Validate, Debug)]
pub struct PatchEventRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub status: Option<String>,
    pub approval_for_publish: Option<bool>,
}

#[derive(Deserialize, Debug)]
pub struct EventFilter {
    pub status: Option<String>,
    pub owner: Option<i64>,
}

#[derive(Deserialize, Validate, Debug)]
pub struct CreateEventRuleRequest {
    pub event_id: i64,
    #[validate(length(min = 1, message = "Rule name is required"))]
    pub rule_name: String,
    pub rule_value: String,
}

#[derive(Deserialize, Validate, Debug)]
pub struct PatchEventRuleRequest {
    pub event_id: Option<i64>,
    pub rule_name: Option<String>,
    pub rule_value: Option<String>,
}

#[derive(Deserialize, Validate, Debug)]
pub struct CreateEventLogRequest {
    pub event_id: i64,
    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,
}
