use actix_web::{delete, get, patch, post, put, web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

use crate::controllers::item_controller::event_exists;
use crate::models::auction_model::ParticipantTable;
use crate::types::auction_types::{CreateParticipantRequest, PatchParticipantRequest};
use crate::utils::responses::{bad_request, db_error, not_found};

const PARTICIPANT_COLUMNS: &str = "id, event_id, name, contact_info, blocked";

#[get("/participants")]
pub async fn list_participants(db_pool: web::Data<PgPool>) -> impl Responder {
    let query = format!(
        "SELECT {} FROM participants ORDER BY id DESC",
        PARTICIPANT_COLUMNS
    );
    match sqlx::query_as::<_, ParticipantTable>(&query)
        .fetch_all(db_pool.get_ref())
        .await
    {
        Ok(participants) => HttpResponse::Ok().json(json!({
            "status": "success",
            "message": "Participants fetched successfully",
            "participants": participants,
            "count": participants.len()
        })),
        Err(_) => db_error("Failed to fetch participants"),
    }
}

#[get("/participants/{participant_id}")]
pub async fn get_participant(db_pool: web::Data<PgPool>, path: web::Path<i64>) -> impl Responder {
    let query = format!("SELECT {} FROM participants WHERE id = $1", PARTICIPANT_COLUMNS);
    match sqlx::query_as::<_, ParticipantTable>(&query)
        .bind(path.into_inner())
        .fetch_optional(db_pool.get_ref())
        .await
    {
        Ok(Some(participant)) => HttpResponse::Ok().json(json!({
            "status": "success",
            "message": "Participant fetched successfully",
            "participant": participant
        })),
        Ok(None) => not_found("Participant not found"),
        Err(_) => db_error("Failed to fetch participant"),
    }
}

#[post("/participants")]
pub async fn create_participant(
    db_pool: web::Data<PgPool>,
    payload: web::Json<CreateParticipantRequest>,
) -> impl Responder {
    if let Err(e) = payload.validate() {
        return bad_request(e.to_string());
    }

    match event_exists(db_pool.get_ref(), payload.event_id).await {
        Ok(true) => {}
        Ok(false) => return bad_request("Unknown event"),
        Err(_) => return db_error("Failed to create participant"),
    }

    let query = format!(
        r#"
        INSERT INTO participants (event_id, name, contact_info, blocked)
        VALUES ($1, $2, $3, $4)
        RETURNING {}
        "#,
        PARTICIPANT_COLUMNS
    );

    match sqlx::query_as::<_, ParticipantTable>(&query)
        .bind(payload.event_id)
        .bind(&payload.name)
        .bind(payload.contact_info.as_deref().unwrap_or(""))
        .bind(payload.blocked.unwrap_or(false))
        .fetch_one(db_pool.get_ref())
        .await
    {
        Ok(participant) => HttpResponse::Created().json(json!({
            "status": "success",
            "message": "Participant created successfully",
            "participant": participant
        })),
        Err(_) => db_error("Failed to create participant"),
    }
}

#[put("/participants/{participant_id}")]
pub async fn update_participant(
    db_pool: web::Data<PgPool>,
    path: web::Path<i64>,
    payload: web::Json<CreateParticipantRequest>,
) -> impl Responder {
    if let Err(e) = payload.validate() {
        return bad_request(e.to_string());
    }

    match event_exists(db_pool.get_ref(), payload.event_id).await {
        Ok(true) => {}
        Ok(false) => return bad_request("Unknown event"),
        Err(_) => return db_error("Failed to update participant"),
    }

    let query = format!(
        r#"
        UPDATE participants
        SET event_id = $1,
            name = $2,
            contact_info = $3,
            blocked = $4
        WHERE id = $5
        RETURNING {}
        "#,
        PARTICIPANT_COLUMNS
    );

    match sqlx::query_as::<_, ParticipantTable>(&query)
        .bind(payload.event_id)
        .bind(&payload.name)
        .bind(payload.contact_info.as_deref().unwrap_or(""))
        .bind(payload.blocked.unwrap_or(false))
        .bind(path.into_inner())
        .fetch_optional(db_pool.get_ref())
        .await
    {
        Ok(Some(participant)) => HttpResponse::Ok().json(json!({
            "status": "success",
            "message": "Participant updated successfully",
            "participant": participant
        })),
        Ok(None) => not_found("Participant not found"),
        Err(_) => db_error("Failed to update participant"),
    }
}

#[patch("/participants/{participant_id}")]
pub async fn patch_participant(
    db_pool: web::Data<PgPool>,
    path: web::Path<i64>,
    payload: web::Json<PatchParticipantRequest>,
) -> impl Responder {
    if let Err(e) = payload.validate() {
        return bad_request(e.to_string());
    }

    let query = format!("SELECT {} FROM participants WHERE id = $1", PARTICIPANT_COLUMNS);
    let participant = match sqlx::query_as::<_, ParticipantTable>(&query)
        .bind(path.into_inner())
        .fetch_optional(db_pool.get_ref())
        .await
    {
        Ok(Some(participant)) => participant,
        Ok(None) => return not_found("Participant not found"),
        Err(_) => return db_error("Failed to load participant"),
    };

    let event_id = payload.event_id.unwrap_or(participant.event_id);
    if event_id != participant.event_id {
        match event_exists(db_pool.get_ref(), event_id).await {
            Ok(true) => {}
            Ok(false) => return bad_request("Unknown event"),
            Err(_) => return db_error("Failed to update participant"),
        }
    }

    let query = format!(
        r#"
        UPDATE participants
        SET event_id = $1,
            name = $2,
            contact_info = $3,
            blocked = $4
        WHERE id = $5
        RETURNING {}
        "#,
        PARTICIPANT_COLUMNS
    );

    match sqlx::query_as::<_, ParticipantTable>(&query)
        .bind(event_id)
        .bind(payload.name.as_ref().unwrap_or(&participant.name))
        .bind(payload.contact_info.as_ref().unwrap_or(&participant.contact_info))
        .bind(payload.blocked.unwrap_or(participant.blocked))
        .bind(participant.id)
        .fetch_one(db_pool.get_ref())
        .await
    {
        Ok(participant) => HttpResponse::Ok().json(json!({
            "status": "success",
            "message": "Participant updated successfully",
            "participant": participant
        })),
        Err(_) => db_error("Failed to update participant"),
    }
}

#[delete("/participants/{participant_id}")]
pub async fn delete_participant(db_pool: web::Data<PgPool>, path: web::Path<i64>) -> impl Responder {
    let participant_id = path.into_inner();

    let mut tx = match db_pool.begin().await {
        Ok(t) => t,
        Err(_) => return db_error("Failed to start the database transaction"),
    };

    // awards and bids referencing this participant go first
    if sqlx::query("DELETE FROM awards WHERE participant_id = $1")
        .bind(participant_id)
        .execute(&mut *tx)
        .await
        .is_err()
    {
        let _ = tx.rollback().await;
        return db_error("Failed to delete awards");
    }

    if sqlx::query("DELETE FROM bids WHERE participant_id = $1")
        .bind(participant_id)
        .execute(&mut *tx)
        .await
        .is_err()
    {
        let _ = tx.rollback().await;
        return db_error("Failed to delete bids");
    }

    let deleted = match sqlx::query("DELETE FROM participants WHERE id = $1")
        .bind(participant_id)
        .execute(&mut *tx)
        .await
    {
        Ok(result) => result.rows_affected() > 0,
        Err(_) => {
            let _ = tx.rollback().await;
            return db_error("Failed to delete participant");
        }
    };

    if !deleted {
        let _ = tx.rollback().await;
        return not_found("Participant not found");
    }

    if tx.commit().await.is_err() {
        return db_error("Failed to delete participant");
    }

    HttpResponse::Ok().json(json!({
        "status": "success",
        "message": "Participant deleted successfully"
    }))
}
