use actix_web::{delete, get, patch, post, put, web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

use crate::models::template_model::TemplateTable;
use crate::types::template_types::{CreateTemplateRequest, PatchTemplateRequest};
use crate::utils::responses::{bad_request, db_error, not_found};

const TEMPLATE_COLUMNS: &str = "id, name, rules";

#[get("/templates")]
pub async fn list_templates(db_pool: web::Data<PgPool>) -> impl Responder {
    let query = format!("SELECT {} FROM templates ORDER BY id DESC", TEMPLATE_COLUMNS);
    match sqlx::query_as::<_, TemplateTable>(&query)
        .fetch_all(db_pool.get_ref())
        .await
    {
        Ok(templates) => HttpResponse::Ok().json(json!({
            "status": "success",
            "message": "Templates fetched successfully",
            "templates": templates,
            "count": templates.len()
        })),
        Err(_) => db_error("Failed to fetch templates"),
    }
}

#[get("/templates/{template_id}")]
pub async fn get_template(db_pool: web::Data<PgPool>, path: web::Path<i64>) -> impl Responder {
    let query = format!("SELECT {} FROM templates WHERE id = $1", TEMPLATE_COLUMNS);
    match sqlx::query_as::<_, TemplateTable>(&query)
        .bind(path.into_inner())
        .fetch_optional(db_pool.get_ref())
        .await
    {
        Ok(Some(template)) => HttpResponse::Ok().json(json!({
            "status": "success",
            "message": "Template fetched successfully",
            "template": template
        })),
        Ok(None) => not_found("Template not found"),
        Err(_) => db_error("Failed to fetch template"),
    }
}

#[post("/templates")]
pub async fn create_template(
    db_pool: web::Data<PgPool>,
    payload: web::Json<CreateTemplateRequest>,
) -> impl Responder {
    if let Err(e) = payload.validate() {
        return bad_request(e.to_string());
    }

    let query = format!(
        r#"
        INSERT INTO templates (name, rules)
        VALUES ($1, $2)
        RETURNING {}
        "#,
        TEMPLATE_COLUMNS
    );

    match sqlx::query_as::<_, TemplateTable>(&query)
        .bind(&payload.name)
        .bind(payload.rules.clone().unwrap_or_else(|| json!({})))
        .fetch_one(db_pool.get_ref())
        .await
    {
        Ok(template) => HttpResponse::Created().json(json!({
            "status": "success",
            "message": "Template created successfully",
            "template": template
        })),
        Err(_) => db_error("Failed to create template"),
    }
}

#[put("/templates/{template_id}")]
pub async fn update_template(
    db_pool: web::Data<PgPool>,
    path: web::Path<i64>,
    payload: web::Json<CreateTemplateRequest>,
) -> impl Responder {
    if let Err(e) = payload.validate() {
        return bad_request(e.to_string());
    }

    let query = format!(
        r#"
        UPDATE templates
        SET name = $1,
            rules = $2
        WHERE id = $3
        RETURNING {}
        "#,
        TEMPLATE_COLUMNS
    );

    match sqlx::query_as::<_, TemplateTable>(&query)
        .bind(&payload.name)
        .bind(payload.rules.clone().unwrap_or_else(|| json!({})))
        .bind(path.into_inner())
        .fetch_optional(db_pool.get_ref())
        .await
    {
        Ok(Some(template)) => HttpResponse::Ok().json(json!({
            "status": "success",
            "message": "Template updated successfully",
            "template": template
        })),
        Ok(None) => not_found("Template not found"),
        Err(_) => db_error("Failed to update template"),
    }
}

#[patch("/templates/{template_id}")]
pub async fn patch_template(
    db_pool: web::Data<PgPool>,
    path: web::Path<i64>,
    payload: web::Json<PatchTemplateRequest>,
) -> impl Responder {
    if let Err(e) = payload.validate() {
        return bad_request(e.to_string());
    }

    let query = format!("SELECT {} FROM templates WHERE id = $1", TEMPLATE_COLUMNS);
    let template = match sqlx::query_as::<_, TemplateTable>(&query)
        .bind(path.into_inner())
        .fetch_optional(db_pool.get_ref())
        .await
    {
        Ok(Some(template)) => template,
        Ok(None) => return not_found("Template not found"),
        Err(_) => return db_error("Failed to load template"),
    };

    let query = format!(
        r#"
        UPDATE templates
        SET name = $1,
            rules = $2
        WHERE id = $3
        RETURNING {}
        "#,
        TEMPLATE_COLUMNS
    );

    match sqlx::query_as::<_, TemplateTable>(&query)
        .bind(payload.name.as_ref().unwrap_or(&template.name))
        .bind(payload.rules.clone().unwrap_or_else(|| template.rules.clone()))
        .bind(template.id)
        .fetch_one(db_pool.get_ref())
        .await
    {
        Ok(template) => HttpResponse::Ok().json(json!({
            "status": "success",
            "message": "Template updated successfully",
            "template": template
        })),
        Err(_) => db_error("Failed to update template"),
    }
}

#[delete("/templates/{template_id}")]
pub async fn delete_template(db_pool: web::Data<PgPool>, path: web::Path<i64>) -> impl Responder {
    match sqlx::query("DELETE FROM templates WHERE id = $1")
        .bind(path.into_inner())
        .execute(db_pool.get_ref())
        .await
    {
        Ok(result) if result.rows_affected() > 0 => HttpResponse::Ok().json(json!({
            "status": "success",
            "message": "Template deleted successfully"
        })),
        Ok(_) => not_found("Template not found"),
        Err(_) => db_error("Failed to delete template"),
    }
}
