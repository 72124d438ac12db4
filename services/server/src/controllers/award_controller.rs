use actix_web::{delete, get, patch, post, put, web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

use crate::controllers::bid_controller::participant_exists;
use crate::models::award_model::AwardTable;
use crate::types::award_types::{CreateAwardRequest, PatchAwardRequest};
use crate::utils::responses::{bad_request, db_error, not_found};

const AWARD_COLUMNS: &str = "id, scenario_id, participant_id, item_id, quantity, amount";

async fn scenario_exists(db_pool: &PgPool, scenario_id: i64) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM scenarios WHERE id = $1)")
        .bind(scenario_id)
        .fetch_one(db_pool)
        .await
}

async fn item_exists(db_pool: &PgPool, item_id: i64) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM items WHERE id = $1)")
        .bind(item_id)
        .fetch_one(db_pool)
        .await
}

// Reference checks are existence-only. Nothing requires the participant or
// item to belong to the scenario's event, and award quantities are not
// bounded by the item quantity.
async fn check_references(
    db_pool: &PgPool,
    scenario_id: i64,
    participant_id: i64,
    item_id: i64,
) -> Result<(), HttpResponse> {
    match scenario_exists(db_pool, scenario_id).await {
        Ok(true) => {}
        Ok(false) => return Err(bad_request("Unknown scenario")),
        Err(_) => return Err(db_error("Failed to check scenario")),
    }
    match participant_exists(db_pool, participant_id).await {
        Ok(true) => {}
        Ok(false) => return Err(bad_request("Unknown participant")),
        Err(_) => return Err(db_error("Failed to check participant")),
    }
    match item_exists(db_pool, item_id).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(bad_request("Unknown item")),
        Err(_) => Err(db_error("Failed to check item")),
    }
}

#[get("/awards")]
pub async fn list_awards(db_pool: web::Data<PgPool>) -> impl Responder {
    let query = format!("SELECT {} FROM awards ORDER BY id DESC", AWARD_COLUMNS);
    match sqlx::query_as::<_, AwardTable>(&query)
        .fetch_all(db_pool.get_ref())
        .await
    {
        Ok(awards) => HttpResponse::Ok().json(json!({
            "status": "success",
            "message": "Awards fetched successfully",
            "awards": awards,
            "count": awards.len()
        })),
        Err(_) => db_error("Failed to fetch awards"),
    }
}

#[get("/awards/{award_id}")]
pub async fn get_award(db_pool: web::Data<PgPool>, path: web::Path<i64>) -> impl Responder {
    let query = format!("SELECT {} FROM awards WHERE id = $1", AWARD_COLUMNS);
    match sqlx::query_as::<_, AwardTable>(&query)
        .bind(path.into_inner())
        .fetch_optional(db_pool.get_ref())
        .await
    {
        Ok(Some(award)) => HttpResponse::Ok().json(json!({
            "status": "success",
            "message": "Award fetched successfully",
            "award": award
        })),
        Ok(None) => not_found("Award not found"),
        Err(_) => db_error("Failed to fetch award"),
    }
}

#[post("/awards")]
pub async fn create_award(
    db_pool: web::Data<PgPool>,
    payload: web::Json<CreateAwardRequest>,
) -> impl Responder {
    if let Err(e) = payload.validate() {
        return bad_request(e.to_string());
    }

    if let Err(resp) = check_references(
        db_pool.get_ref(),
        payload.scenario_id,
        payload.participant_id,
        payload.item_id,
    )
    .await
    {
        return resp;
    }

    let query = format!(
        r#"
        INSERT INTO awards (scenario_id, participant_id, item_id, quantity, amount)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING {}
        "#,
        AWARD_COLUMNS
    );

    match sqlx::query_as::<_, AwardTable>(&query)
        .bind(payload.scenario_id)
        .bind(payload.participant_id)
        .bind(payload.item_id)
        .bind(payload.quantity)
        .bind(payload.amount)
        .fetch_one(db_pool.get_ref())
        .await
    {
        Ok(award) => HttpResponse::Created().json(json!({
            "status": "success",
            "message": "Award created successfully",
            "award": award
        })),
        Err(_) => db_error("Failed to create award"),
    }
}

#[put("/awards/{award_id}")]
pub async fn update_award(
    db_pool: web::Data<PgPool>,
    path: web::Path<i64>,
    payload: web::Json<CreateAwardRequest>,
) -> impl Responder {
    if let Err(e) = payload.validate() {
        return bad_request(e.to_string());
    }

    if let Err(resp) = check_references(
        db_pool.get_ref(),
        payload.scenario_id,
        payload.participant_id,
        payload.item_id,
    )
    .await
    {
        return resp;
    }

    let query = format!(
        r#"
        UPDATE awards
        SET scenario_id = $1,
            participant_id = $2,
            item_id = $3,
            quantity = $4,
            amount = $5
        WHERE id = $6
        RETURNING {}
        "#,
        AWARD_COLUMNS
    );

    match sqlx::query_as::<_, AwardTable>(&query)
        .bind(payload.scenario_id)
        .bind(payload.participant_id)
        .bind(payload.item_id)
        .bind(payload.quantity)
        .bind(payload.amount)
        .bind(path.into_inner())
        .fetch_optional(db_pool.get_ref())
        .await
    {
        Ok(Some(award)) => HttpResponse::Ok().json(json!({
            "status": "success",
            "message": "Award updated successfully",
            "award": award
        })),
        Ok(None) => not_found("Award not found"),
        Err(_) => db_error("Failed to update award"),
    }
}

#[patch("/awards/{award_id}")]
pub async fn patch_award(
    db_pool: web::Data<PgPool>,
    path: web::Path<i64>,
    payload: web::Json<PatchAwardRequest>,
) -> impl Responder {
    if let Err(e) = payload.validate() {
        return bad_request(e.to_string());
    }

    let query = format!("SELECT {} FROM awards WHERE id = $1", AWARD_COLUMNS);
    let award = match sqlx::query_as::<_, AwardTable>(&query)
        .bind(path.into_inner())
        .fetch_optional(db_pool.get_ref())
        .await
    {
        Ok(Some(award)) => award,
        Ok(None) => return not_found("Award not found"),
        Err(_) => return db_error("Failed to load award"),
    };

    let scenario_id = payload.scenario_id.unwrap_or(award.scenario_id);
    let participant_id = payload.participant_id.unwrap_or(award.participant_id);
    let item_id = payload.item_id.unwrap_or(award.item_id);
    if scenario_id != award.scenario_id
        || participant_id != award.participant_id
        || item_id != award.item_id
    {
        if let Err(resp) = check_references(db_pool.get_ref(), scenario_id, participant_id, item_id).await
        {
            return resp;
        }
    }

    let query = format!(
        r#"
        UPDATE awards
        SET scenario_id = $1,
            participant_id = $2,
            item_id = $3,
            quantity = $4,
            amount = $5
        WHERE id = $6
        RETURNING {}
        "#,
        AWARD_COLUMNS
    );

    match sqlx::query_as::<_, AwardTable>(&query)
        .bind(scenario_id)
        .bind(participant_id)
        .bind(item_id)
        .bind(payload.quantity.unwrap_or(award.quantity))
        .bind(payload.amount.unwrap_or(award.amount))
        .bind(award.id)
        .fetch_one(db_pool.get_ref())
        .await
    {
        Ok(award) => HttpResponse::Ok().json(json!({
            "status": "success",
            "message": "Award updated successfully",
            "award": award
        })),
        Err(_) => db_error("Failed to update award"),
    }
}

#[delete("/awards/{award_id}")]
pub async fn delete_award(db_pool: web::Data<PgPool>, path: web::Path<i64>) -> impl Responder {
    match sqlx::query("DELETE FROM awards WHERE id = $1")
        .bind(path.into_inner())
        .execute(db_pool.get_ref())
        .await
    {
        Ok(result) if result.rows_affected() > 0 => HttpResponse::Ok().json(json!({
            "status": "success",
            "message": "Award deleted successfully"
        })),
        Ok(_) => not_found("Award not found"),
        Err(_) => db_error("Failed to delete award"),
    }
}
