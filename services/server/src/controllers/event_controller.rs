use actix_web::{delete, get, patch, post, put, web, HttpRequest, HttpResponse, Responder};
use log::warn;
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

use crate::lifecycle::EventStatus;
use crate::models::event_model::{EventLogTable, EventRuleTable, EventTable};
use crate::types::event_types::{CreateEventRequest, EventFilter, PatchEventRequest};
use crate::utils::jwt::extract_user_id;
use crate::utils::responses::{bad_request, db_error, forbidden, not_found};

const EVENT_COLUMNS: &str =
    "id, name, description, start_time, end_time, status, approval_for_publish, owner_id";

/// Checks shared by create and update: times must be ordered and a direct
/// write of `published` must pass the approval gate.
fn check_event_fields(
    start_time: chrono::DateTime<chrono::Utc>,
    end_time: chrono::DateTime<chrono::Utc>,
    status: &str,
    approval: bool,
) -> Result<EventStatus, HttpResponse> {
    if start_time >= end_time {
        return Err(bad_request("End time must be after start time."));
    }

    let parsed = match EventStatus::parse(status) {
        Some(s) => s,
        None => return Err(bad_request(format!("Unknown status '{}'", status))),
    };

    if parsed == EventStatus::Published && !approval {
        return Err(bad_request("Event cannot be published without approval."));
    }

    Ok(parsed)
}

async fn load_event(db_pool: &PgPool, event_id: i64) -> Result<EventTable, HttpResponse> {
    let query = format!("SELECT {} FROM events WHERE id = $1", EVENT_COLUMNS);
    match sqlx::query_as::<_, EventTable>(&query)
        .bind(event_id)
        .fetch_optional(db_pool)
        .await
    {
        Ok(Some(event)) => Ok(event),
        Ok(None) => Err(not_found("Event not found")),
        Err(_) => Err(db_error("Failed to load event")),
    }
}

#[get("/events")]
pub async fn list_events(
    db_pool: web::Data<PgPool>,
    filter: web::Query<EventFilter>,
) -> impl Responder {
    if let Some(status) = filter.status.as_deref() {
        if EventStatus::parse(status).is_none() {
            return bad_request(format!("Unknown status '{}'", status));
        }
    }

    let query = format!(
        r#"
        SELECT {}
        FROM events
        WHERE ($1::text IS NULL OR status = $1)
          AND ($2::bigint IS NULL OR owner_id = $2)
        ORDER BY id DESC
        "#,
        EVENT_COLUMNS
    );

    let events = match sqlx::query_as::<_, EventTable>(&query)
        .bind(&filter.status)
        .bind(filter.owner)
        .fetch_all(db_pool.get_ref())
        .await
    {
        Ok(events) => events,
        Err(_) => return db_error("Failed to fetch events"),
    };

    HttpResponse::Ok().json(json!({
        "status": "success",
        "message": "Events fetched successfully",
        "events": events,
        "count": events.len()
    }))
}

#[get("/events/{event_id}")]
pub async fn get_event(db_pool: web::Data<PgPool>, path: web::Path<i64>) -> impl Responder {
    let event_id = path.into_inner();

    let event = match load_event(db_pool.get_ref(), event_id).await {
        Ok(event) => event,
        Err(resp) => return resp,
    };

    let rules = match sqlx::query_as::<_, EventRuleTable>(
        r#"
        SELECT id, event_id, rule_name, rule_value
        FROM event_rules
        WHERE event_id = $1
        ORDER BY id ASC
        "#,
    )
    .bind(event_id)
    .fetch_all(db_pool.get_ref())
    .await
    {
        Ok(rules) => rules,
        Err(_) => return db_error("Failed to load event rules"),
    };

    let logs = match sqlx::query_as::<_, EventLogTable>(
        r#"
        SELECT id, event_id, message, timestamp
        FROM event_logs
        WHERE event_id = $1
        ORDER BY id ASC
        "#,
    )
    .bind(event_id)
    .fetch_all(db_pool.get_ref())
    .await
    {
        Ok(logs) => logs,
        Err(_) => return db_error("Failed to load event logs"),
    };

    HttpResponse::Ok().json(json!({
        "status": "success",
        "message": "Event fetched successfully",
        "event": event,
        "rules": rules,
        "logs": logs
    }))
}

#[post("/events")]
pub async fn create_event(
    req: HttpRequest,
    db_pool: web::Data<PgPool>,
    payload: web::Json<CreateEventRequest>,
) -> impl Responder {
    let user_id = match extract_user_id(&req) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    if let Err(e) = payload.validate() {
        return bad_request(e.to_string());
    }

    let status = payload.status.as_deref().unwrap_or("draft");
    let approval = payload.approval_for_publish.unwrap_or(false);
    let status = match check_event_fields(payload.start_time, payload.end_time, status, approval) {
        Ok(s) => s,
        Err(resp) => return resp,
    };

    let query = format!(
        r#"
        INSERT INTO events (name, description, start_time, end_time, status, approval_for_publish, owner_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING {}
        "#,
        EVENT_COLUMNS
    );

    let event = match sqlx::query_as::<_, EventTable>(&query)
        .bind(&payload.name)
        .bind(payload.description.as_deref().unwrap_or(""))
        .bind(payload.start_time)
        .bind(payload.end_time)
        .bind(status.as_str())
        .bind(approval)
        .bind(user_id)
        .fetch_one(db_pool.get_ref())
        .await
    {
        Ok(event) => event,
        Err(_) => return db_error("Failed to create event"),
    };

    HttpResponse::Created().json(json!({
        "status": "success",
        "message": "Event created successfully",
        "event": event
    }))
}

#[put("/events/{event_id}")]
pub async fn update_event(
    req: HttpRequest,
    db_pool: web::Data<PgPool>,
    path: web::Path<i64>,
    payload: web::Json<CreateEventRequest>,
) -> impl Responder {
    let user_id = match extract_user_id(&req) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    if let Err(e) = payload.validate() {
        return bad_request(e.to_string());
    }

    let event = match load_event(db_pool.get_ref(), path.into_inner()).await {
        Ok(event) => event,
        Err(resp) => return resp,
    };

    if event.owner_id != user_id {
        return forbidden("Only the event owner can update this event");
    }

    let status = payload.status.as_deref().unwrap_or("draft");
    let approval = payload.approval_for_publish.unwrap_or(false);
    let status = match check_event_fields(payload.start_time, payload.end_time, status, approval) {
        Ok(s) => s,
        Err(resp) => return resp,
    };

    let query = format!(
        r#"
        UPDATE events
        SET name = $1,
            description = $2,
            start_time = $3,
            end_time = $4,
            status = $5,
            approval_for_publish = $6
        WHERE id = $7
        RETURNING {}
        "#,
        EVENT_COLUMNS
    );

    let updated = match sqlx::query_as::<_, EventTable>(&query)
        .bind(&payload.name)
        .bind(payload.description.as_deref().unwrap_or(""))
        .bind(payload.start_time)
        .bind(payload.end_time)
        .bind(status.as_str())
        .bind(approval)
        .bind(event.id)
        .fetch_one(db_pool.get_ref())
        .await
    {
        Ok(event) => event,
        Err(_) => return db_error("Failed to update event"),
    };

    HttpResponse::Ok().json(json!({
        "status": "success",
        "message": "Event updated successfully",
        "event": updated
    }))
}

#[patch("/events/{event_id}")]
pub async fn patch_event(
    req: HttpRequest,
    db_pool: web::Data<PgPool>,
    path: web::Path<i64>,
    payload: web::Json<PatchEventRequest>,
) -> impl Responder {
    let user_id = match extract_user_id(&req) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    if let Err(e) = payload.validate() {
        return bad_request(e.to_string());
    }

    let event = match load_event(db_pool.get_ref(), path.into_inner()).await {
        Ok(event) => event,
        Err(resp) => return resp,
    };

    if event.owner_id != user_id {
        return forbidden("Only the event owner can update this event");
    }

    let name = payload.name.as_ref().unwrap_or(&event.name);
    let description = payload.description.as_ref().unwrap_or(&event.description);
    let start_time = payload.start_time.unwrap_or(event.start_time);
    let end_time = payload.end_time.unwrap_or(event.end_time);
    let status = payload.status.as_deref().unwrap_or(&event.status);
    let approval = payload
        .approval_for_publish
        .unwrap_or(event.approval_for_publish);

    let status = match check_event_fields(start_time, end_time, status, approval) {
        Ok(s) => s,
        Err(resp) => return resp,
    };

    let query = format!(
        r#"
        UPDATE events
        SET name = $1,
            description = $2,
            start_time = $3,
            end_time = $4,
            status = $5,
            approval_for_publish = $6
        WHERE id = $7
        RETURNING {}
        "#,
        EVENT_COLUMNS
    );

    let updated = match sqlx::query_as::<_, EventTable>(&query)
        .bind(name)
        .bind(description)
        .bind(start_time)
        .bind(end_time)
        .bind(status.as_str())
        .bind(approval)
        .bind(event.id)
        .fetch_one(db_pool.get_ref())
        .await
    {
        Ok(event) => event,
        Err(_) => return db_error("Failed to update event"),
    };

    HttpResponse::Ok().json(json!({
        "status": "success",
        "message": "Event updated successfully",
        "event": updated
    }))
}

// Children are removed explicitly, inside one transaction, before the event
// row itself. Awards can reference this event's scenarios, items, or
// participants even when their own scenario hangs off another event, so the
// filter covers all three references.
const DELETE_CHILDREN: &[(&str, &str)] = &[
    (
        r#"
        DELETE FROM awards
        WHERE scenario_id IN (SELECT id FROM scenarios WHERE event_id = $1)
           OR item_id IN (SELECT id FROM items WHERE event_id = $1)
           OR participant_id IN (SELECT id FROM participants WHERE event_id = $1)
        "#,
        "Failed to delete awards",
    ),
    (
        r#"
        DELETE FROM bids
        WHERE event_id = $1
           OR participant_id IN (SELECT id FROM participants WHERE event_id = $1)
        "#,
        "Failed to delete bids",
    ),
    ("DELETE FROM attachments WHERE event_id = $1", "Failed to delete attachments"),
    ("DELETE FROM event_rules WHERE event_id = $1", "Failed to delete event rules"),
    ("DELETE FROM event_logs WHERE event_id = $1", "Failed to delete event logs"),
    ("DELETE FROM scenarios WHERE event_id = $1", "Failed to delete scenarios"),
    ("DELETE FROM items WHERE event_id = $1", "Failed to delete items"),
    ("DELETE FROM participants WHERE event_id = $1", "Failed to delete participants"),
];

#[delete("/events/{event_id}")]
pub async fn delete_event(
    req: HttpRequest,
    db_pool: web::Data<PgPool>,
    path: web::Path<i64>,
) -> impl Responder {
    let user_id = match extract_user_id(&req) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    let event_id = path.into_inner();

    let mut tx = match db_pool.begin().await {
        Ok(t) => t,
        Err(_) => return db_error("Failed to start the database transaction"),
    };

    let query = format!("SELECT {} FROM events WHERE id = $1 FOR UPDATE", EVENT_COLUMNS);
    let event = match sqlx::query_as::<_, EventTable>(&query)
        .bind(event_id)
        .fetch_optional(&mut *tx)
        .await
    {
        Ok(Some(event)) => event,
        Ok(None) => {
            let _ = tx.rollback().await;
            return not_found("Event not found");
        }
        Err(_) => {
            let _ = tx.rollback().await;
            return db_error("Failed to load event");
        }
    };

    if event.owner_id != user_id {
        let _ = tx.rollback().await;
        return forbidden("Only the event owner can delete this event");
    }

    let file_paths = match sqlx::query_scalar::<_, String>(
        "SELECT file_path FROM attachments WHERE event_id = $1",
    )
    .bind(event_id)
    .fetch_all(&mut *tx)
    .await
    {
        Ok(paths) => paths,
        Err(_) => {
            let _ = tx.rollback().await;
            return db_error("Failed to load attachments");
        }
    };

    for (sql, context) in DELETE_CHILDREN {
        if sqlx::query(sql).bind(event_id).execute(&mut *tx).await.is_err() {
            let _ = tx.rollback().await;
            return db_error(context);
        }
    }

    if sqlx::query("DELETE FROM events WHERE id = $1")
        .bind(event_id)
        .execute(&mut *tx)
        .await
        .is_err()
    {
        let _ = tx.rollback().await;
        return db_error("Failed to delete event");
    }

    if tx.commit().await.is_err() {
        return db_error("Failed to delete event");
    }

    for path in file_paths {
        if let Err(e) = std::fs::remove_file(&path) {
            warn!("Failed to remove attachment file {}: {}", path, e);
        }
    }

    HttpResponse::Ok().json(json!({
        "status": "success",
        "message": "Event deleted successfully"
    }))
}
