// src/web/mod.rs
//! Server-rendered front end that forwards browser uploads to the backend

pub mod handlers;
pub mod types;

pub use types::*;

use anyhow::Result;
use rocket::data::{Limits, ToByteUnit};
use rocket::form::Form;
use rocket::http::Status;
use rocket::response::content::RawHtml;
use rocket::{catchers, get, post, routes, Build, Request, Rocket, State};
use std::sync::Arc;
use tracing::info;

use crate::core::{ConfigManager, EvaluationClient};
use handlers::HtmlResponse;

#[get("/")]
pub fn index(state: &State<WebState>) -> HtmlResponse {
    handlers::batch_form_handler(state)
}

#[get("/multiple-resumes")]
pub fn batch_form(state: &State<WebState>) -> HtmlResponse {
    handlers::batch_form_handler(state)
}

#[post("/multiple-resumes", data = "<upload>")]
pub async fn process_batch(
    upload: Form<BatchUploadForm<'_>>,
    state: &State<WebState>,
) -> HtmlResponse {
    handlers::process_batch_handler(upload, state).await
}

#[get("/single-resume")]
pub fn single_form() -> HtmlResponse {
    handlers::single_form_handler()
}

#[post("/single-resume", data = "<upload>")]
pub async fn process_single(
    upload: Form<SingleUploadForm<'_>>,
    state: &State<WebState>,
) -> HtmlResponse {
    handlers::process_single_handler(upload, state).await
}

#[get("/health")]
pub async fn health() -> &'static str {
    handlers::health_handler().await
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request(req: &Request) -> RawHtml<String> {
    handlers::error_page_handler(Status::BadRequest, req)
}

#[rocket::catch(404)]
pub fn not_found(req: &Request) -> RawHtml<String> {
    handlers::error_page_handler(Status::NotFound, req)
}

#[rocket::catch(413)]
pub fn payload_too_large(req: &Request) -> RawHtml<String> {
    handlers::error_page_handler(Status::PayloadTooLarge, req)
}

#[rocket::catch(422)]
pub fn unprocessable(req: &Request) -> RawHtml<String> {
    handlers::error_page_handler(Status::UnprocessableEntity, req)
}

#[rocket::catch(500)]
pub fn internal_error(req: &Request) -> RawHtml<String> {
    handlers::error_page_handler(Status::InternalServerError, req)
}

pub fn build_rocket(state: WebState) -> Rocket<Build> {
    rocket::build()
        .manage(state)
        .register(
            "/",
            catchers![
                bad_request,
                not_found,
                payload_too_large,
                unprocessable,
                internal_error
            ],
        )
        .mount(
            "/",
            routes![
                index,
                batch_form,
                process_batch,
                single_form,
                process_single,
                health
            ],
        )
}

// Main server start function
pub async fn start_web_server(config: &ConfigManager) -> Result<()> {
    let client = EvaluationClient::from_config(&config.service)?;
    let state = WebState {
        evaluator: Arc::new(client),
        default_threshold: config.default_threshold,
    };

    let limits = Limits::default()
        .limit("data-form", 512.mebibytes())
        .limit("file", 64.mebibytes());
    let figment = rocket::Config::figment()
        .merge(("port", config.server.port))
        .merge(("limits", limits));

    info!("Starting ResuMatch web front end");
    info!("Server: http://127.0.0.1:{}", config.server.port);
    info!("Evaluation service: {}", config.service.base_url);

    build_rocket(state)
        .configure(figment)
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("Web server failed: {}", e))?;

    Ok(())
}
