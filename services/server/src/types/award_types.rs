use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

#[derive(Deserialize, Validate, Debug)]
pub struct CreateScenarioRequest {
    pub event_id: i64,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub description: Option<String>,
}

#[derive(Deserialize, Validate, Debug)]
pub struct PatchScenarioRequest {
    pub event_id: Option<i64>,
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Deserialize, Validate, Debug)]
pub struct CreateAwardRequest {
    pub scenario_id: i64,
    pub participant_id: i64,
    pub item_id: i64,
    pub quantity: i32,
    pub amount: Decimal,
}

#[derive(Deserialize, Validate, Debug)]
pub struct PatchAwardRequest {
    pub scenario_id: Option<i64>,
    pub participant_id: Option<i64>,
    pub item_id: Option<i64>,
    pub quantity: Option<i32>,
    pub amount: Option<Decimal>,
}
