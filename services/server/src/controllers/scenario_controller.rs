use actix_web::{delete, get, patch, post, put, web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

use crate::controllers::item_controller::event_exists;
use crate::models::award_model::ScenarioTable;
use crate::types::award_types::{CreateScenarioRequest, PatchScenarioRequest};
use crate::utils::responses::{bad_request, db_error, not_found};

const SCENARIO_COLUMNS: &str = "id, event_id, name, description";

#[get("/scenarios")]
pub async fn list_scenarios(db_pool: web::Data<PgPool>) -> impl Responder {
    let query = format!("SELECT {} FROM scenarios ORDER BY id DESC", SCENARIO_COLUMNS);
    match sqlx::query_as::<_, ScenarioTable>(&query)
        .fetch_all(db_pool.get_ref())
        .await
    {
        Ok(scenarios) => HttpResponse::Ok().json(json!({
            "status": "success",
            "message": "Scenarios fetched successfully",
            "scenarios": scenarios,
            "count": scenarios.len()
        })),
        Err(_) => db_error("Failed to fetch scenarios"),
    }
}

#[get("/scenarios/{scenario_id}")]
pub async fn get_scenario(db_pool: web::Data<PgPool>, path: web::Path<i64>) -> impl Responder {
    let query = format!("SELECT {} FROM scenarios WHERE id = $1", SCENARIO_COLUMNS);
    match sqlx::query_as::<_, ScenarioTable>(&query)
        .bind(path.into_inner())
        .fetch_optional(db_pool.get_ref())
        .await
    {
        Ok(Some(scenario)) => HttpResponse::Ok().json(json!({
            "status": "success",
            "message": "Scenario fetched successfully",
            "scenario": scenario
        })),
        Ok(None) => not_found("Scenario not found"),
        Err(_) => db_error("Failed to fetch scenario"),
    }
}

#[post("/scenarios")]
pub async fn create_scenario(
    db_pool: web::Data<PgPool>,
    payload: web::Json<CreateScenarioRequest>,
) -> impl Responder {
    if let Err(e) = payload.validate() {
        return bad_request(e.to_string());
    }

    match event_exists(db_pool.get_ref(), payload.event_id).await {
        Ok(true) => {}
        Ok(false) => return bad_request("Unknown event"),
        Err(_) => return db_error("Failed to create scenario"),
    }

    let query = format!(
        r#"
        INSERT INTO scenarios (event_id, name, description)
        VALUES ($1, $2, $3)
        RETURNING {}
        "#,
        SCENARIO_COLUMNS
    );

    match sqlx::query_as::<_, ScenarioTable>(&query)
        .bind(payload.event_id)
        .bind(&payload.name)
        .bind(payload.description.as_deref().unwrap_or(""))
        .fetch_one(db_pool.get_ref())
        .await
    {
        Ok(scenario) => HttpResponse::Created().json(json!({
            "status": "success",
            "message": "Scenario created successfully",
            "scenario": scenario
        })),
        Err(_) => db_error("Failed to create scenario"),
    }
}

#[put("/scenarios/{scenario_id}")]
pub async fn update_scenario(
    db_pool: web::Data<PgPool>,
    path: web::Path<i64>,
    payload: web::Json<CreateScenarioRequest>,
) -> impl Responder {
    if let Err(e) = payload.validate() {
        return bad_request(e.to_string());
    }

    match event_exists(db_pool.get_ref(), payload.event_id).await {
        Ok(true) => {}
        Ok(false) => return bad_request("Unknown event"),
        Err(_) => return db_error("Failed to update scenario"),
    }

    let query = format!(
        r#"
        UPDATE scenarios
        SET event_id = $1,
            name = $2,
            description = $3
        WHERE id = $4
        RETURNING {}
        "#,
        SCENARIO_COLUMNS
    );

    match sqlx::query_as::<_, ScenarioTable>(&query)
        .bind(payload.event_id)
        .bind(&payload.name)
        .bind(payload.description.as_deref().unwrap_or(""))
        .bind(path.into_inner())
        .fetch_optional(db_pool.get_ref())
        .await
    {
        Ok(Some(scenario)) => HttpResponse::Ok().json(json!({
            "status": "success",
            "message": "Scenario updated successfully",
            "scenario": scenario
        })),
        Ok(None) => not_found("Scenario not found"),
        Err(_) => db_error("Failed to update scenario"),
    }
}

#[patch("/scenarios/{scenario_id}")]
pub async fn patch_scenario(
    db_pool: web::Data<PgPool>,
    path: web::Path<i64>,
    payload: web::Json<PatchScenarioRequest>,
) -> impl Responder {
    if let Err(e) = payload.validate() {
        return bad_request(e.to_string());
    }

    let query = format!("SELECT {} FROM scenarios WHERE id = $1", SCENARIO_COLUMNS);
    let scenario = match sqlx::query_as::<_, ScenarioTable>(&query)
        .bind(path.into_inner())
        .fetch_optional(db_pool.get_ref())
        .await
    {
        Ok(Some(scenario)) => scenario,
        Ok(None) => return not_found("Scenario not found"),
        Err(_) => return db_error("Failed to load scenario"),
    };

    let event_id = payload.event_id.unwrap_or(scenario.event_id);
    if event_id != scenario.event_id {
        match event_exists(db_pool.get_ref(), event_id).await {
            Ok(true) => {}
            Ok(false) => return bad_request("Unknown event"),
            Err(_) => return db_error("Failed to update scenario"),
        }
    }

    let query = format!(
        r#"
        UPDATE scenarios
        SET event_id = $1,
            name = $2,
            description = $3
        WHERE id = $4
        RETURNING {}
        "#,
        SCENARIO_COLUMNS
    );

    match sqlx::query_as::<_, ScenarioTable>(&query)
        .bind(event_id)
        .bind(payload.name.as_ref().unwrap_or(&scenario.name))
        .bind(payload.description.as_ref().unwrap_or(&scenario.description))
        .bind(scenario.id)
        .fetch_one(db_pool.get_ref())
        .await
    {
        Ok(scenario) => HttpResponse::Ok().json(json!({
            "status": "success",
            "message": "Scenario updated successfully",
            "scenario": scenario
        })),
        Err(_) => db_error("Failed to update scenario"),
    }
}

#[delete("/scenarios/{scenario_id}")]
pub async fn delete_scenario(db_pool: web::Data<PgPool>, path: web::Path<i64>) -> impl Responder {
    let scenario_id = path.into_inner();

    let mut tx = match db_pool.begin().await {
        Ok(t) => t,
        Err(_) => return db_error("Failed to start the database transaction"),
    };

    if sqlx::query("DELETE FROM awards WHERE scenario_id = $1")
        .bind(scenario_id)
        .execute(&mut *tx)
        .await
        .is_err()
    {
        let _ = tx.rollback().await;
        return db_error("Failed to delete awards");
    }

    let deleted = match sqlx::query("DELETE FROM scenarios WHERE id = $1")
        .bind(scenario_id)
        .execute(&mut *tx)
        .await
    {
        Ok(result) => result.rows_affected() > 0,
        Err(_) => {
            let _ = tx.rollback().await;
            return db_error("Failed to delete scenario");
        }
    };

    if !deleted {
        let _ = tx.rollback().await;
        return not_found("Scenario not found");
    }

    if tx.commit().await.is_err() {
        return db_error("Failed to delete scenario");
    }

    HttpResponse::Ok().json(json!({
        "status": "success",
        "message": "Scenario deleted successfully"
    }))
}
