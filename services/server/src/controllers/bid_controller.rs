use actix_web::{delete, get, patch, post, put, web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

use crate::controllers::item_controller::event_exists;
use crate::models::auction_model::BidTable;
use crate::types::auction_types::{CreateBidRequest, PatchBidRequest};
use crate::utils::responses::{bad_request, db_error, not_found};

const BID_COLUMNS: &str = "id, event_id, participant_id, amount, timestamp, is_alternative";

pub(crate) async fn participant_exists(
    db_pool: &PgPool,
    participant_id: i64,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM participants WHERE id = $1)")
        .bind(participant_id)
        .fetch_one(db_pool)
        .await
}

async fn check_references(
    db_pool: &PgPool,
    event_id: i64,
    participant_id: i64,
) -> Result<(), HttpResponse> {
    match event_exists(db_pool, event_id).await {
        Ok(true) => {}
        Ok(false) => return Err(bad_request("Unknown event")),
        Err(_) => return Err(db_error("Failed to check event")),
    }
    match participant_exists(db_pool, participant_id).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(bad_request("Unknown participant")),
        Err(_) => Err(db_error("Failed to check participant")),
    }
}

#[get("/bids")]
pub async fn list_bids(db_pool: web::Data<PgPool>) -> impl Responder {
    let query = format!("SELECT {} FROM bids ORDER BY id DESC", BID_COLUMNS);
    match sqlx::query_as::<_, BidTable>(&query)
        .fetch_all(db_pool.get_ref())
        .await
    {
        Ok(bids) => HttpResponse::Ok().json(json!({
            "status": "success",
            "message": "Bids fetched successfully",
            "bids": bids,
            "count": bids.len()
        })),
        Err(_) => db_error("Failed to fetch bids"),
    }
}

#[get("/bids/{bid_id}")]
pub async fn get_bid(db_pool: web::Data<PgPool>, path: web::Path<i64>) -> impl Responder {
    let query = format!("SELECT {} FROM bids WHERE id = $1", BID_COLUMNS);
    match sqlx::query_as::<_, BidTable>(&query)
        .bind(path.into_inner())
        .fetch_optional(db_pool.get_ref())
        .await
    {
        Ok(Some(bid)) => HttpResponse::Ok().json(json!({
            "status": "success",
            "message": "Bid fetched successfully",
            "bid": bid
        })),
        Ok(None) => not_found("Bid not found"),
        Err(_) => db_error("Failed to fetch bid"),
    }
}

#[post("/bids")]
pub async fn create_bid(
    db_pool: web::Data<PgPool>,
    payload: web::Json<CreateBidRequest>,
) -> impl Responder {
    if let Err(e) = payload.validate() {
        return bad_request(e.to_string());
    }

    if let Err(resp) = check_references(db_pool.get_ref(), payload.event_id, payload.participant_id).await {
        return resp;
    }

    // timestamp comes from the column default and is never client-writable
    let query = format!(
        r#"
        INSERT INTO bids (event_id, participant_id, amount, is_alternative)
        VALUES ($1, $2, $3, $4)
        RETURNING {}
        "#,
        BID_COLUMNS
    );

    match sqlx::query_as::<_, BidTable>(&query)
        .bind(payload.event_id)
        .bind(payload.participant_id)
        .bind(payload.amount)
        .bind(payload.is_alternative.unwrap_or(false))
        .fetch_one(db_pool.get_ref())
        .await
    {
        Ok(bid) => HttpResponse::Created().json(json!({
            "status": "success",
            "message": "Bid created successfully",
            "bid": bid
        })),
        Err(_) => db_error("Failed to create bid"),
    }
}

#[put("/bids/{bid_id}")]
pub async fn update_bid(
    db_pool: web::Data<PgPool>,
    path: web::Path<i64>,
    payload: web::Json<CreateBidRequest>,
) -> impl Responder {
    if let Err(e) = payload.validate() {
        return bad_request(e.to_string());
    }

    if let Err(resp) = check_references(db_pool.get_ref(), payload.event_id, payload.participant_id).await {
        return resp;
    }

    let query = format!(
        r#"
        UPDATE bids
        SET event_id = $1,
            participant_id = $2,
            amount = $3,
            is_alternative = $4
        WHERE id = $5
        RETURNING {}
        "#,
        BID_COLUMNS
    );

    match sqlx::query_as::<_, BidTable>(&query)
        .bind(payload.event_id)
        .bind(payload.participant_id)
        .bind(payload.amount)
        .bind(payload.is_alternative.unwrap_or(false))
        .bind(path.into_inner())
        .fetch_optional(db_pool.get_ref())
        .await
    {
        Ok(Some(bid)) => HttpResponse::Ok().json(json!({
            "status": "success",
            "message": "Bid updated successfully",
            "bid": bid
        })),
        Ok(None) => not_found("Bid not found"),
        Err(_) => db_error("Failed to update bid"),
    }
}

#[patch("/bids/{bid_id}")]
pub async fn patch_bid(
    db_pool: web::Data<PgPool>,
    path: web::Path<i64>,
    payload: web::Json<PatchBidRequest>,
) -> impl Responder {
    if let Err(e) = payload.validate() {
        return bad_request(e.to_string());
    }

    let query = format!("SELECT {} FROM bids WHERE id = $1", BID_COLUMNS);
    let bid = match sqlx::query_as::<_, BidTable>(&query)
        .bind(path.into_inner())
        .fetch_optional(db_pool.get_ref())
        .await
    {
        Ok(Some(bid)) => bid,
        Ok(None) => return not_found("Bid not found"),
        Err(_) => return db_error("Failed to load bid"),
    };

    let event_id = payload.event_id.unwrap_or(bid.event_id);
    let participant_id = payload.participant_id.unwrap_or(bid.participant_id);
    if event_id != bid.event_id || participant_id != bid.participant_id {
        if let Err(resp) = check_references(db_pool.get_ref(), event_id, participant_id).await {
            return resp;
        }
    }

    let query = format!(
        r#"
        UPDATE bids
        SET event_id = $1,
            participant_id = $2,
            amount = $3,
            is_alternative = $4
        WHERE id = $5
        RETURNING {}
        "#,
        BID_COLUMNS
    );

    match sqlx::query_as::<_, BidTable>(&query)
        .bind(event_id)
        .bind(participant_id)
        .bind(payload.amount.unwrap_or(bid.amount))
        .bind(payload.is_alternative.unwrap_or(bid.is_alternative))
        .bind(bid.id)
        .fetch_one(db_pool.get_ref())
        .await
    {
        Ok(bid) => HttpResponse::Ok().json(json!({
            "status": "success",
            "message": "Bid updated successfully",
            "bid": bid
        })),
        Err(_) => db_error("Failed to update bid"),
    }
}

#[delete("/bids/{bid_id}")]
pub async fn delete_bid(db_pool: web::Data<PgPool>, path: web::Path<i64>) -> impl Responder {
    match sqlx::query("DELETE FROM bids WHERE id = $1")
        .bind(path.into_inner())
        .execute(db_pool.get_ref())
        .await
    {
        Ok(result) if result.rows_affected() > 0 => HttpResponse::Ok().json(json!({
            "status": "success",
            "message": "Bid deleted successfully"
        })),
        Ok(_) => not_found("Bid not found"),
        Err(_) => db_error("Failed to delete bid"),
    }
}
