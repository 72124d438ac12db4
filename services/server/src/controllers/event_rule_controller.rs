use actix_web::{delete, get, patch, post, put, web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

use crate::controllers::item_controller::event_exists;
use crate::models::event_model::EventRuleTable;
use crate::types::event_types::{CreateEventRuleRequest, PatchEventRuleRequest};
use crate::utils::responses::{bad_request, db_error, not_found};

const RULE_COLUMNS: &str = "id, event_id, rule_name, rule_value";

#[get("/rules")]
pub async fn list_rules(db_pool: web::Data<PgPool>) -> impl Responder {
    let query = format!("SELECT {} FROM event_rules ORDER BY id DESC", RULE_COLUMNS);
    match sqlx::query_as::<_, EventRuleTable>(&query)
        .fetch_all(db_pool.get_ref())
        .await
    {
        Ok(rules) => HttpResponse::Ok().json(json!({
            "status": "success",
            "message": "Rules fetched successfully",
            "rules": rules,
            "count": rules.len()
        })),
        Err(_) => db_error("Failed to fetch rules"),
    }
}

#[get("/rules/{rule_id}")]
pub async fn get_rule(db_pool: web::Data<PgPool>, path: web::Path<i64>) -> impl Responder {
    let query = format!("SELECT {} FROM event_rules WHERE id = $1", RULE_COLUMNS);
    match sqlx::query_as::<_, EventRuleTable>(&query)
        .bind(path.into_inner())
        .fetch_optional(db_pool.get_ref())
        .await
    {
        Ok(Some(rule)) => HttpResponse::Ok().json(json!({
            "status": "success",
            "message": "Rule fetched successfully",
            "rule": rule
        })),
        Ok(None) => not_found("Rule not found"),
        Err(_) => db_error("Failed to fetch rule"),
    }
}

#[post("/rules")]
pub async fn create_rule(
    db_pool: web::Data<PgPool>,
    payload: web::Json<CreateEventRuleRequest>,
) -> impl Responder {
    if let Err(e) = payload.validate() {
        return bad_request(e.to_string());
    }

    match event_exists(db_pool.get_ref(), payload.event_id).await {
        Ok(true) => {}
        Ok(false) => return bad_request("Unknown event"),
        Err(_) => return db_error("Failed to create rule"),
    }

    let query = format!(
        r#"
        INSERT INTO event_rules (event_id, rule_name, rule_value)
        VALUES ($1, $2, $3)
        RETURNING {}
        "#,
        RULE_COLUMNS
    );

    match sqlx::query_as::<_, EventRuleTable>(&query)
        .bind(payload.event_id)
        .bind(&payload.rule_name)
        .bind(&payload.rule_value)
        .fetch_one(db_pool.get_ref())
        .await
    {
        Ok(rule) => HttpResponse::Created().json(json!({
            "status": "success",
            "message": "Rule created successfully",
            "rule": rule
        })),
        Err(_) => db_error("Failed to create rule"),
    }
}

#[put("/rules/{rule_id}")]
pub async fn update_rule(
    db_pool: web::Data<PgPool>,
    path: web::Path<i64>,
    payload: web::Json<CreateEventRuleRequest>,
) -> impl Responder {
    if let Err(e) = payload.validate() {
        return bad_request(e.to_string());
    }

    match event_exists(db_pool.get_ref(), payload.event_id).await {
        Ok(true) => {}
        Ok(false) => return bad_request("Unknown event"),
        Err(_) => return db_error("Failed to update rule"),
    }

    let query = format!(
        r#"
        UPDATE event_rules
        SET event_id = $1,
            rule_name = $2,
            rule_value = $3
        WHERE id = $4
        RETURNING {}
        "#,
        RULE_COLUMNS
    );

    match sqlx::query_as::<_, EventRuleTable>(&query)
        .bind(payload.event_id)
        .bind(&payload.rule_name)
        .bind(&payload.rule_value)
        .bind(path.into_inner())
        .fetch_optional(db_pool.get_ref())
        .await
    {
        Ok(Some(rule)) => HttpResponse::Ok().json(json!({
            "status": "success",
            "message": "Rule updated successfully",
            "rule": rule
        })),
        Ok(None) => not_found("Rule not found"),
        Err(_) => db_error("Failed to update rule"),
    }
}

#[patch("/rules/{rule_id}")]
pub async fn patch_rule(
    db_pool: web::Data<PgPool>,
    path: web::Path<i64>,
    payload: web::Json<PatchEventRuleRequest>,
) -> impl Responder {
    if let Err(e) = payload.validate() {
        return bad_request(e.to_string());
    }

    let query = format!("SELECT {} FROM event_rules WHERE id = $1", RULE_COLUMNS);
    let rule = match sqlx::query_as::<_, EventRuleTable>(&query)
        .bind(path.into_inner())
        .fetch_optional(db_pool.get_ref())
        .await
    {
        Ok(Some(rule)) => rule,
        Ok(None) => return not_found("Rule not found"),
        Err(_) => return db_error("Failed to load rule"),
    };

    let event_id = payload.event_id.unwrap_or(rule.event_id);
    if event_id != rule.event_id {
        match event_exists(db_pool.get_ref(), event_id).await {
            Ok(true) => {}
            Ok(false) => return bad_request("Unknown event"),
            Err(_) => return db_error("Failed to update rule"),
        }
    }

    let query = format!(
        r#"
        UPDATE event_rules
        SET event_id = $1,
            rule_name = $2,
            rule_value = $3
        WHERE id = $4
        RETURNING {}
        "#,
        RULE_COLUMNS
    );

    match sqlx::query_as::<_, EventRuleTable>(&query)
        .bind(event_id)
        .bind(payload.rule_name.as_ref().unwrap_or(&rule.rule_name))
        .bind(payload.rule_value.as_ref().unwrap_or(&rule.rule_value))
        .bind(rule.id)
        .fetch_one(db_pool.get_ref())
        .await
    {
        Ok(rule) => HttpResponse::Ok().json(json!({
            "status": "success",
            "message": "Rule updated successfully",
            "rule": rule
        })),
        Err(_) => db_error("Failed to update rule"),
    }
}

#[delete("/rules/{rule_id}")]
pub async fn delete_rule(db_pool: web::Data<PgPool>, path: web::Path<i64>) -> impl Responder {
    match sqlx::query("DELETE FROM event_rules WHERE id = $1")
        .bind(path.into_inner())
        .execute(db_pool.get_ref())
        .await
    {
        Ok(result) if result.rows_affected() > 0 => HttpResponse::Ok().json(json!({
            "status": "success",
            "message": "Rule deleted successfully"
        })),
        Ok(_) => not_found("Rule not found"),
        Err(_) => db_error("Failed to delete rule"),
    }
}
