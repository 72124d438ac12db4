use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

#[derive(Deserialize, Validate, Debug)]
pub struct CreateItemRequest {
    pub event_id: i64,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub description: Option<String>,
    pub quantity: i32,
    pub currency: Option<String>,
}

#[derive(Deserialize, Validate, Debug)]
pub struct PatchItemRequest {
    pub event_id: Option<i64>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub quantity: Option<i32>,
    pub currency: Option<String>,
}

#[derive(Deserialize, Validate, Debug)]
pub struct CreateParticipantRequest {
    pub event_id: i64,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub contact_info: Option<String>,
    pub blocked: Option<bool>,
}

#[derive(Deserialize, Validate, Debug)]
pub struct PatchParticipantRequest {
    pub event_id: Option<i64>,
    pub name: Option<String>,
    pub contact_info: Option<String>,
    pub blocked: Option<bool>,
}

#[derive(Deserialize, Validate, Debug)]
pub struct CreateBidRequest {
    pub event_id: i64,
    pub participant_id: i64,
    pub amount: Decimal,
    pub is_alternative: Option<bool>,
}

/// Bid timestamps are immutable, so only the offer fields can be patched.
#[derive(Deserialize, Validate, Debug)]
pub struct PatchBidRequest {
    pub event_id: Option<i64>,
    pub participant_id: Option<i64>,
    pub amount: Option<Decimal>,
    pub is_alternative: Option<bool>,
}
