mod controllers;
mod lifecycle;
mod middleware;
mod models;
mod types;
mod utils;

#[cfg(test)]
mod tests;

use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use dotenvy::dotenv;
use log::info;
use sqlx::postgres::PgPoolOptions;
use std::env;

use crate::controllers::attachment_controller::{
    create_attachment, delete_attachment, get_attachment, list_attachments, replace_attachment,
};
use crate::controllers::auth_controller::{login, refresh, register, token_for_user};
use crate::controllers::award_controller::{
    create_award, delete_award, get_award, list_awards, patch_award, update_award,
};
use crate::controllers::bid_controller::{
    create_bid, delete_bid, get_bid, list_bids, patch_bid, update_bid,
};
use crate::controllers::event_action_controller::{
    cancel_event, lock_event, pause_event, publish_event, reopen_event, republish_event,
    resume_event, stop_event, unlock_event,
};
use crate::controllers::event_controller::{
    create_event, delete_event, get_event, list_events, patch_event, update_event,
};
use crate::controllers::event_log_controller::{create_log, delete_log, get_log, list_logs};
use crate::controllers::event_rule_controller::{
    create_rule, delete_rule, get_rule, list_rules, patch_rule, update_rule,
};
use crate::controllers::item_controller::{
    create_item, delete_item, get_item, list_items, patch_item, update_item,
};
use crate::controllers::participant_controller::{
    create_participant, delete_participant, get_participant, list_participants,
    patch_participant, update_participant,
};
use crate::controllers::scenario_controller::{
    create_scenario, delete_scenario, get_scenario, list_scenarios, patch_scenario,
    update_scenario,
};
use crate::controllers::template_controller::{
    create_template, delete_template, get_template, list_templates, patch_template,
    update_template,
};
use crate::middleware::auth::AuthMiddleware;

async fn health() -> impl Responder {
    HttpResponse::Ok()
        .content_type("application/json")
        .body(r#"{"status": "Ok"}"#)
}

/// Route registration shared by the server and the test harness. Auth and
/// health are plain top-level resources; everything else lives in a single
/// token-guarded scope that picks up the paths the public resources leave.
pub(crate) fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(register)
        .service(login)
        .service(refresh)
        .service(token_for_user)
        .route("/health", web::get().to(health));

    let protected_scope = web::scope("")
        .wrap(AuthMiddleware)
        .service(list_events)
        .service(get_event)
        .service(create_event)
        .service(update_event)
        .service(patch_event)
        .service(delete_event)
        .service(publish_event)
        .service(republish_event)
        .service(lock_event)
        .service(unlock_event)
        .service(cancel_event)
        .service(pause_event)
        .service(resume_event)
        .service(stop_event)
        .service(reopen_event)
        .service(list_items)
        .service(get_item)
        .service(create_item)
        .service(update_item)
        .service(patch_item)
        .service(delete_item)
        .service(list_participants)
        .service(get_participant)
        .service(create_participant)
        .service(update_participant)
        .service(patch_participant)
        .service(delete_participant)
        .service(list_bids)
        .service(get_bid)
        .service(create_bid)
        .service(update_bid)
        .service(patch_bid)
        .service(delete_bid)
        .service(list_scenarios)
        .service(get_scenario)
        .service(create_scenario)
        .service(update_scenario)
        .service(patch_scenario)
        .service(delete_scenario)
        .service(list_awards)
        .service(get_award)
        .service(create_award)
        .service(update_award)
        .service(patch_award)
        .service(delete_award)
        .service(list_attachments)
        .service(get_attachment)
        .service(create_attachment)
        .service(replace_attachment)
        .service(delete_attachment)
        .service(list_templates)
        .service(get_template)
        .service(create_template)
        .service(update_template)
        .service(patch_template)
        .service(delete_template)
        .service(list_rules)
        .service(get_rule)
        .service(create_rule)
        .service(update_rule)
        .service(patch_rule)
        .service(delete_rule)
        .service(list_logs)
        .service(get_log)
        .service(create_log)
        .service(delete_log);

    cfg.service(protected_scope);
}

async fn run() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to Postgres");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8000".to_string());
    info!("Listening on {}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .configure(configure)
    })
    .bind(bind_addr)?
    .run()
    .await
}

fn main() -> std::io::Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Failed to build Tokio runtime");
    runtime.block_on(run())
}
