use actix_web::{delete, get, patch, post, put, web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

use crate::models::auction_model::ItemTable;
use crate::types::auction_types::{CreateItemRequest, PatchItemRequest};
use crate::utils::responses::{bad_request, db_error, not_found};

const ITEM_COLUMNS: &str = "id, event_id, name, description, quantity, currency";

pub(crate) async fn event_exists(db_pool: &PgPool, event_id: i64) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM events WHERE id = $1)")
        .bind(event_id)
        .fetch_one(db_pool)
        .await
}

#[get("/items")]
pub async fn list_items(db_pool: web::Data<PgPool>) -> impl Responder {
    let query = format!("SELECT {} FROM items ORDER BY id DESC", ITEM_COLUMNS);
    match sqlx::query_as::<_, ItemTable>(&query)
        .fetch_all(db_pool.get_ref())
        .await
    {
        Ok(items) => HttpResponse::Ok().json(json!({
            "status": "success",
            "message": "Items fetched successfully",
            "items": items,
            "count": items.len()
        })),
        Err(_) => db_error("Failed to fetch items"),
    }
}

#[get("/items/{item_id}")]
pub async fn get_item(db_pool: web::Data<PgPool>, path: web::Path<i64>) -> impl Responder {
    let query = format!("SELECT {} FROM items WHERE id = $1", ITEM_COLUMNS);
    match sqlx::query_as::<_, ItemTable>(&query)
        .bind(path.into_inner())
        .fetch_optional(db_pool.get_ref())
        .await
    {
        Ok(Some(item)) => HttpResponse::Ok().json(json!({
            "status": "success",
            "message": "Item fetched successfully",
            "item": item
        })),
        Ok(None) => not_found("Item not found"),
        Err(_) => db_error("Failed to fetch item"),
    }
}

#[post("/items")]
pub async fn create_item(
    db_pool: web::Data<PgPool>,
    payload: web::Json<CreateItemRequest>,
) -> impl Responder {
    if let Err(e) = payload.validate() {
        return bad_request(e.to_string());
    }

    match event_exists(db_pool.get_ref(), payload.event_id).await {
        Ok(true) => {}
        Ok(false) => return bad_request("Unknown event"),
        Err(_) => return db_error("Failed to create item"),
    }

    let query = format!(
        r#"
        INSERT INTO items (event_id, name, description, quantity, currency)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING {}
        "#,
        ITEM_COLUMNS
    );

    match sqlx::query_as::<_, ItemTable>(&query)
        .bind(payload.event_id)
        .bind(&payload.name)
        .bind(payload.description.as_deref().unwrap_or(""))
        .bind(payload.quantity)
        .bind(payload.currency.as_deref().unwrap_or("USD"))
        .fetch_one(db_pool.get_ref())
        .await
    {
        Ok(item) => HttpResponse::Created().json(json!({
            "status": "success",
            "message": "Item created successfully",
            "item": item
        })),
        Err(_) => db_error("Failed to create item"),
    }
}

#[put("/items/{item_id}")]
pub async fn update_item(
    db_pool: web::Data<PgPool>,
    path: web::Path<i64>,
    payload: web::Json<CreateItemRequest>,
) -> impl Responder {
    if let Err(e) = payload.validate() {
        return bad_request(e.to_string());
    }

    match event_exists(db_pool.get_ref(), payload.event_id).await {
        Ok(true) => {}
        Ok(false) => return bad_request("Unknown event"),
        Err(_) => return db_error("Failed to update item"),
    }

    let query = format!(
        r#"
        UPDATE items
        SET event_id = $1,
            name = $2,
            description = $3,
            quantity = $4,
            currency = $5
        WHERE id = $6
        RETURNING {}
        "#,
        ITEM_COLUMNS
    );

    match sqlx::query_as::<_, ItemTable>(&query)
        .bind(payload.event_id)
        .bind(&payload.name)
        .bind(payload.description.as_deref().unwrap_or(""))
        .bind(payload.quantity)
        .bind(payload.currency.as_deref().unwrap_or("USD"))
        .bind(path.into_inner())
        .fetch_optional(db_pool.get_ref())
        .await
    {
        Ok(Some(item)) => HttpResponse::Ok().json(json!({
            "status": "success",
            "message": "Item updated successfully",
            "item": item
        })),
        Ok(None) => not_found("Item not found"),
        Err(_) => db_error("Failed to update item"),
    }
}

#[patch("/items/{item_id}")]
pub async fn patch_item(
    db_pool: web::Data<PgPool>,
    path: web::Path<i64>,
    payload: web::Json<PatchItemRequest>,
) -> impl Responder {
    if let Err(e) = payload.validate() {
        return bad_request(e.to_string());
    }

    let query = format!("SELECT {} FROM items WHERE id = $1", ITEM_COLUMNS);
    let item = match sqlx::query_as::<_, ItemTable>(&query)
        .bind(path.into_inner())
        .fetch_optional(db_pool.get_ref())
        .await
    {
        Ok(Some(item)) => item,
        Ok(None) => return not_found("Item not found"),
        Err(_) => return db_error("Failed to load item"),
    };

    let event_id = payload.event_id.unwrap_or(item.event_id);
    if event_id != item.event_id {
        match event_exists(db_pool.get_ref(), event_id).await {
            Ok(true) => {}
            Ok(false) => return bad_request("Unknown event"),
            Err(_) => return db_error("Failed to update item"),
        }
    }

    let query = format!(
        r#"
        UPDATE items
        SET event_id = $1,
            name = $2,
            description = $3,
            quantity = $4,
            currency = $5
        WHERE id = $6
        RETURNING {}
        "#,
        ITEM_COLUMNS
    );

    match sqlx::query_as::<_, ItemTable>(&query)
        .bind(event_id)
        .bind(payload.name.as_ref().unwrap_or(&item.name))
        .bind(payload.description.as_ref().unwrap_or(&item.description))
        .bind(payload.quantity.unwrap_or(item.quantity))
        .bind(payload.currency.as_ref().unwrap_or(&item.currency))
        .bind(item.id)
        .fetch_one(db_pool.get_ref())
        .await
    {
        Ok(item) => HttpResponse::Ok().json(json!({
            "status": "success",
            "message": "Item updated successfully",
            "item": item
        })),
        Err(_) => db_error("Failed to update item"),
    }
}

#[delete("/items/{item_id}")]
pub async fn delete_item(db_pool: web::Data<PgPool>, path: web::Path<i64>) -> impl Responder {
    let item_id = path.into_inner();

    let mut tx = match db_pool.begin().await {
        Ok(t) => t,
        Err(_) => return db_error("Failed to start the database transaction"),
    };

    // awards referencing this item go first
    if sqlx::query("DELETE FROM awards WHERE item_id = $1")
        .bind(item_id)
        .execute(&mut *tx)
        .await
        .is_err()
    {
        let _ = tx.rollback().await;
        return db_error("Failed to delete awards");
    }

    let deleted = match sqlx::query("DELETE FROM items WHERE id = $1")
        .bind(item_id)
        .execute(&mut *tx)
        .await
    {
        Ok(result) => result.rows_affected() > 0,
        Err(_) => {
            let _ = tx.rollback().await;
            return db_error("Failed to delete item");
        }
    };

    if !deleted {
        let _ = tx.rollback().await;
        return not_found("Item not found");
    }

    if tx.commit().await.is_err() {
        return db_error("Failed to delete item");
    }

    HttpResponse::Ok().json(json!({
        "status": "success",
        "message": "Item deleted successfully"
    }))
}
