use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Serialize, Deserialize, Debug, Clone, FromRow)]
pub struct ScenarioTable {
    pub id: i64,
    pub event_id: i64,
    pub name: String,
    pub description: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, FromRow)]
pub struct AwardTable {
    pub id: i64,
    pub scenario_id: i64,
    pub participant_id: i64,
    pub item_id: i64,
    pub quantity: i32,
    pub amount: Decimal,
}
