use actix_multipart::form::{tempfile::TempFile, text::Text, MultipartForm};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use log::warn;
use serde_json::json;
use sqlx::PgPool;
use std::env;
use std::fs;
use std::path::Path;
use uuid::Uuid;

use crate::controllers::item_controller::event_exists;
use crate::models::event_model::AttachmentTable;
use crate::utils::responses::{bad_request, db_error, not_found};

const ATTACHMENT_COLUMNS: &str = "id, event_id, file_name, file_path, uploaded_at";

#[derive(Debug, MultipartForm)]
pub struct AttachmentUpload {
    #[multipart(limit = "10MiB")]
    pub file: TempFile,
    pub event_id: Text<i64>,
}

#[derive(Debug, MultipartForm)]
pub struct AttachmentReplace {
    #[multipart(limit = "10MiB")]
    pub file: TempFile,
}

fn attachments_dir() -> String {
    env::var("ATTACHMENTS_DIR").unwrap_or_else(|_| "attachments".to_string())
}

/// Copy the uploaded temp file into the attachments directory under a unique
/// name. Returns (original name, stored path).
fn store_file(file: &TempFile) -> Result<(String, String), std::io::Error> {
    let dir = attachments_dir();
    fs::create_dir_all(&dir)?;

    let original = file
        .file_name
        .clone()
        .unwrap_or_else(|| "upload".to_string());
    let stored = Path::new(&dir).join(format!("{}_{}", Uuid::new_v4(), original));
    fs::copy(file.file.path(), &stored)?;

    Ok((original, stored.to_string_lossy().into_owned()))
}

fn remove_stored_file(path: &str) {
    if let Err(e) = fs::remove_file(path) {
        warn!("Failed to remove attachment file {}: {}", path, e);
    }
}

#[get("/attachments")]
pub async fn list_attachments(db_pool: web::Data<PgPool>) -> impl Responder {
    let query = format!("SELECT {} FROM attachments ORDER BY id DESC", ATTACHMENT_COLUMNS);
    match sqlx::query_as::<_, AttachmentTable>(&query)
        .fetch_all(db_pool.get_ref())
        .await
    {
        Ok(attachments) => HttpResponse::Ok().json(json!({
            "status": "success",
            "message": "Attachments fetched successfully",
            "attachments": attachments,
            "count": attachments.len()
        })),
        Err(_) => db_error("Failed to fetch attachments"),
    }
}

#[get("/attachments/{attachment_id}")]
pub async fn get_attachment(db_pool: web::Data<PgPool>, path: web::Path<i64>) -> impl Responder {
    let query = format!("SELECT {} FROM attachments WHERE id = $1", ATTACHMENT_COLUMNS);
    match sqlx::query_as::<_, AttachmentTable>(&query)
        .bind(path.into_inner())
        .fetch_optional(db_pool.get_ref())
        .await
    {
        Ok(Some(attachment)) => HttpResponse::Ok().json(json!({
            "status": "success",
            "message": "Attachment fetched successfully",
            "attachment": attachment
        })),
        Ok(None) => not_found("Attachment not found"),
        Err(_) => db_error("Failed to fetch attachment"),
    }
}

#[post("/attachments")]
pub async fn create_attachment(
    db_pool: web::Data<PgPool>,
    payload: MultipartForm<AttachmentUpload>,
) -> impl Responder {
    let event_id = payload.event_id.0;

    match event_exists(db_pool.get_ref(), event_id).await {
        Ok(true) => {}
        Ok(false) => return bad_request("Unknown event"),
        Err(_) => return db_error("Failed to create attachment"),
    }

    let (file_name, file_path) = match store_file(&payload.file) {
        Ok(stored) => stored,
        Err(e) => {
            warn!("Failed to store attachment: {}", e);
            return db_error("Failed to store attachment");
        }
    };

    let query = format!(
        r#"
        INSERT INTO attachments (event_id, file_name, file_path)
        VALUES ($1, $2, $3)
        RETURNING {}
        "#,
        ATTACHMENT_COLUMNS
    );

    match sqlx::query_as::<_, AttachmentTable>(&query)
        .bind(event_id)
        .bind(&file_name)
        .bind(&file_path)
        .fetch_one(db_pool.get_ref())
        .await
    {
        Ok(attachment) => HttpResponse::Created().json(json!({
            "status": "success",
            "message": "Attachment uploaded successfully",
            "attachment": attachment
        })),
        Err(_) => {
            remove_stored_file(&file_path);
            db_error("Failed to create attachment")
        }
    }
}

// Replaces the stored file; uploaded_at keeps the original upload time.
#[put("/attachments/{attachment_id}")]
pub async fn replace_attachment(
    db_pool: web::Data<PgPool>,
    path: web::Path<i64>,
    payload: MultipartForm<AttachmentReplace>,
) -> impl Responder {
    let query = format!("SELECT {} FROM attachments WHERE id = $1", ATTACHMENT_COLUMNS);
    let attachment = match sqlx::query_as::<_, AttachmentTable>(&query)
        .bind(path.into_inner())
        .fetch_optional(db_pool.get_ref())
        .await
    {
        Ok(Some(attachment)) => attachment,
        Ok(None) => return not_found("Attachment not found"),
        Err(_) => return db_error("Failed to load attachment"),
    };

    let (file_name, file_path) = match store_file(&payload.file) {
        Ok(stored) => stored,
        Err(e) => {
            warn!("Failed to store attachment: {}", e);
            return db_error("Failed to store attachment");
        }
    };

    let query = format!(
        r#"
        UPDATE attachments
        SET file_name = $1,
            file_path = $2
        WHERE id = $3
        RETURNING {}
        "#,
        ATTACHMENT_COLUMNS
    );

    match sqlx::query_as::<_, AttachmentTable>(&query)
        .bind(&file_name)
        .bind(&file_path)
        .bind(attachment.id)
        .fetch_one(db_pool.get_ref())
        .await
    {
        Ok(updated) => {
            remove_stored_file(&attachment.file_path);
            HttpResponse::Ok().json(json!({
                "status": "success",
                "message": "Attachment replaced successfully",
                "attachment": updated
            }))
        }
        Err(_) => {
            remove_stored_file(&file_path);
            db_error("Failed to update attachment")
        }
    }
}

#[delete("/attachments/{attachment_id}")]
pub async fn delete_attachment(db_pool: web::Data<PgPool>, path: web::Path<i64>) -> impl Responder {
    let file_path = match sqlx::query_scalar::<_, String>(
        "DELETE FROM attachments WHERE id = $1 RETURNING file_path",
    )
    .bind(path.into_inner())
    .fetch_optional(db_pool.get_ref())
    .await
    {
        Ok(Some(file_path)) => file_path,
        Ok(None) => return not_found("Attachment not found"),
        Err(_) => return db_error("Failed to delete attachment"),
    };

    remove_stored_file(&file_path);

    HttpResponse::Ok().json(json!({
        "status": "success",
        "message": "Attachment deleted successfully"
    }))
}
