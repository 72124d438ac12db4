use actix_web::{delete, get, post, web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

use crate::controllers::item_controller::event_exists;
use crate::models::event_model::EventLogTable;
use crate::types::event_types::CreateEventLogRequest;
use crate::utils::responses::{bad_request, db_error, not_found};

const LOG_COLUMNS: &str = "id, event_id, message, timestamp";

// The audit trail is append-only: entries can be listed, created, and
// removed, but there are no update routes.

#[get("/logs")]
pub async fn list_logs(db_pool: web::Data<PgPool>) -> impl Responder {
    let query = format!("SELECT {} FROM event_logs ORDER BY id DESC", LOG_COLUMNS);
    match sqlx::query_as::<_, EventLogTable>(&query)
        .fetch_all(db_pool.get_ref())
        .await
    {
        Ok(logs) => HttpResponse::Ok().json(json!({
            "status": "success",
            "message": "Logs fetched successfully",
            "logs": logs,
            "count": logs.len()
        })),
        Err(_) => db_error("Failed to fetch logs"),
    }
}

#[get("/logs/{log_id}")]
pub async fn get_log(db_pool: web::Data<PgPool>, path: web::Path<i64>) -> impl Responder {
    let query = format!("SELECT {} FROM event_logs WHERE id = $1", LOG_COLUMNS);
    match sqlx::query_as::<_, EventLogTable>(&query)
        .bind(path.into_inner())
        .fetch_optional(db_pool.get_ref())
        .await
    {
        Ok(Some(log)) => HttpResponse::Ok().json(json!({
            "status": "success",
            "message": "Log fetched successfully",
            "log": log
        })),
        Ok(None) => not_found("Log not found"),
        Err(_) => db_error("Failed to fetch log"),
    }
}

#[post("/logs")]
pub async fn create_log(
    db_pool: web::Data<PgPool>,
    payload: web::Json<CreateEventLogRequest>,
) -> impl Responder {
    if let Err(e) = payload.validate() {
        return bad_request(e.to_string());
    }

    match event_exists(db_pool.get_ref(), payload.event_id).await {
        Ok(true) => {}
        Ok(false) => return bad_request("Unknown event"),
        Err(_) => return db_error("Failed to create log"),
    }

    let query = format!(
        r#"
        INSERT INTO event_logs (event_id, message)
        VALUES ($1, $2)
        RETURNING {}
        "#,
        LOG_COLUMNS
    );

    match sqlx::query_as::<_, EventLogTable>(&query)
        .bind(payload.event_id)
        .bind(&payload.message)
        .fetch_one(db_pool.get_ref())
        .await
    {
        Ok(log) => HttpResponse::Created().json(json!({
            "status": "success",
            "message": "Log created successfully",
            "log": log
        })),
        Err(_) => db_error("Failed to create log"),
    }
}

#[delete("/logs/{log_id}")]
pub async fn delete_log(db_pool: web::Data<PgPool>, path: web::Path<i64>) -> impl Responder {
    match sqlx::query("DELETE FROM event_logs WHERE id = $1")
        .bind(path.into_inner())
        .execute(db_pool.get_ref())
        .await
    {
        Ok(result) if result.rows_affected() > 0 => HttpResponse::Ok().json(json!({
            "status": "success",
            "message": "Log deleted successfully"
        })),
        Ok(_) => not_found("Log not found"),
        Err(_) => db_error("Failed to delete log"),
    }
}
