use serde::Deserialize;
use validator::Validate;

#[derive(Deserialize, Validate, Debug)]
pub struct CreateTemplateRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub rules: Option<serde_json::Value>,
}

#[derive(Deserialize, Validate, Debug)]
pub struct PatchTemplateRequest {
    pub name: Option<String>,
    pub rules: Option<serde_json::Value>,
}
