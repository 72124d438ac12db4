use actix_web::{post, web, HttpRequest, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;

use crate::lifecycle::{EventStatus, LifecycleAction};
use crate::models::event_model::EventTable;
use crate::utils::jwt::extract_user_id;
use crate::utils::responses::{conflict, db_error, forbidden, not_found};

/// Shared body of the nine lifecycle endpoints: lock the row, evaluate the
/// transition table, then write the new status and the audit log entry in the
/// same transaction. A rejected transition writes nothing.
async fn run_action(
    req: &HttpRequest,
    db_pool: &PgPool,
    event_id: i64,
    action: LifecycleAction,
) -> HttpResponse {
    let user_id = match extract_user_id(req) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    let mut tx = match db_pool.begin().await {
        Ok(t) => t,
        Err(_) => return db_error("Failed to start the database transaction"),
    };

    let event = match sqlx::query_as::<_, EventTable>(
        r#"
        SELECT id, name, description, start_time, end_time, status, approval_for_publish, owner_id
        FROM events
        WHERE id = $1
        FOR UPDATE
        "#,
    )
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
        return forbidden("Only the event owner can perform this action");
    }

    let current = match EventStatus::parse(&event.status) {
        Some(status) => status,
        None => {
            let _ = tx.rollback().await;
            return db_error("Event has an unknown status");
        }
    };

    let transition = match action.apply(current, event.approval_for_publish) {
        Ok(t) => t,
        Err(e) => {
            let _ = tx.rollback().await;
            return conflict(e.to_string());
        }
    };

    let approval = transition.approval.unwrap_or(event.approval_for_publish);

    if sqlx::query(
        r#"
        UPDATE events
        SET status = $1,
            approval_for_publish = $2
        WHERE id = $3
        "#,
    )
    .bind(transition.status.as_str())
    .bind(approval)
    .bind(event.id)
    .execute(&mut *tx)
    .await
    .is_err()
    {
        let _ = tx.rollback().await;
        return db_error("Failed to update event");
    }

    if sqlx::query(
        r#"
        INSERT INTO event_logs (event_id, message)
        VALUES ($1, $2)
        "#,
    )
    .bind(event.id)
    .bind(transition.message)
    .execute(&mut *tx)
    .await
    .is_err()
    {
        let _ = tx.rollback().await;
        return db_error("Failed to append event log");
    }

    if tx.commit().await.is_err() {
        return db_error("Failed to apply action");
    }

    HttpResponse::Ok().json(json!({ "status": transition.message }))
}

#[post("/events/{event_id}/publish")]
pub async fn publish_event(
    req: HttpRequest,
    db_pool: web::Data<PgPool>,
    path: web::Path<i64>,
) -> impl Responder {
    run_action(&req, db_pool.get_ref(), path.into_inner(), LifecycleAction::Publish).await
}

#[post("/events/{event_id}/republish")]
pub async fn republish_event(
    req: HttpRequest,
    db_pool: web::Data<PgPool>,
    path: web::Path<i64>,
) -> impl Responder {
    run_action(&req, db_pool.get_ref(), path.into_inner(), LifecycleAction::Republish).await
}

#[post("/events/{event_id}/lock")]
pub async fn lock_event(
    req: HttpRequest,
    db_pool: web::Data<PgPool>,
    path: web::Path<i64>,
) -> impl Responder {
    run_action(&req, db_pool.get_ref(), path.into_inner(), LifecycleAction::Lock).await
}

#[post("/events/{event_id}/unlock")]
pub async fn unlock_event(
    req: HttpRequest,
    db_pool: web::Data<PgPool>,
    path: web::Path<i64>,
) -> impl Responder {
    run_action(&req, db_pool.get_ref(), path.into_inner(), LifecycleAction::Unlock).await
}

#[post("/events/{event_id}/cancel")]
pub async fn cancel_event(
    req: HttpRequest,
    db_pool: web::Data<PgPool>,
    path: web::Path<i64>,
) -> impl Responder {
    run_action(&req, db_pool.get_ref(), path.into_inner(), LifecycleAction::Cancel).await
}

#[post("/events/{event_id}/pause")]
pub async fn pause_event(
    req: HttpRequest,
    db_pool: web::Data<PgPool>,
    path: web::Path<i64>,
) -> impl Responder {
    run_action(&req, db_pool.get_ref(), path.into_inner(), LifecycleAction::Pause).await
}

#[post("/events/{event_id}/resume")]
pub async fn resume_event(
    req: HttpRequest,
    db_pool: web::Data<PgPool>,
    path: web::Path<i64>,
) -> impl Responder {
    run_action(&req, db_pool.get_ref(), path.into_inner(), LifecycleAction::Resume).await
}

#[post("/events/{event_id}/stop")]
pub async fn stop_event(
    req: HttpRequest,
    db_pool: web::Data<PgPool>,
    path: web::Path<i64>,
) -> impl Responder {
    run_action(&req, db_pool.get_ref(), path.into_inner(), LifecycleAction::Stop).await
}

#[post("/events/{event_id}/reopen")]
pub async fn reopen_event(
    req: HttpRequest,
    db_pool: web::Data<PgPool>,
    path: web::Path<i64>,
) -> impl Responder {
    run_action(&req, db_pool.get_ref(), path.into_inner(), LifecycleAction::Reopen).await
}
