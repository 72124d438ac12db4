use actix_web::HttpResponse;
use serde_json::json;

pub fn bad_request(message: impl AsRef<str>) -> HttpResponse {
    HttpResponse::BadRequest().json(json!({
        "status": "error",
        "message": message.as_ref()
    }))
}

pub fn not_found(message: &str) -> HttpResponse {
    HttpResponse::NotFound().json(json!({
        "status": "error",
        "message": message
    }))
}

pub fn forbidden(message: &str) -> HttpResponse {
    HttpResponse::Forbidden().json(json!({
        "status": "error",
        "message": message
    }))
}

pub fn conflict(message: impl AsRef<str>) -> HttpResponse {
    HttpResponse::Conflict().json(json!({
        "status": "error",
        "message": message.as_ref()
    }))
}

pub fn db_error(message: &str) -> HttpResponse {
    HttpResponse::InternalServerError().json(json!({
        "status": "error",
        "message": message
    }))
}
