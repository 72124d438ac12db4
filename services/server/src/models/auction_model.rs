use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Serialize, Deserialize, Debug, Clone, FromRow)]
pub struct ItemTable {
    pub id: i64,
    pub event_id: i64,
    pub name: String,
    pub description: String,
    pub quantity: i32,
    pub currency: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, FromRow)]
pub struct ParticipantTable {
    pub id: i64,
    pub event_id: i64,
    pub name: String,
    pub contact_info: String,
    pub blocked: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, FromRow)]
pub struct BidTable {
    pub id: i64,
    pub event_id: i64,
    pub participant_id: i64,
    pub amount: Decimal,
    pub timestamp: DateTime<Utc>,
    pub is_alternative: bool,
}
