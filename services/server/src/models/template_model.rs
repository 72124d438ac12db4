use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Serialize, Deserialize, Debug, Clone, FromRow)]
pub struct TemplateTable {
    pub id: i64,
    pub name: String,
    pub rules: serde_json::Value,
}
