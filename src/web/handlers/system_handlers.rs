// src/web/handlers/system_handlers.rs
use crate::core::TemplateSummary;
use crate::web::types::*;

use rocket::serde::json::Json;
use rocket::State;
use tracing::info;

pub async fn get_templates_handler(
    config: &State<ServerConfig>,
) -> Json<DataResponse<Vec<TemplateSummary>>> {
    let templates = config.engine.summaries();
    info!("Listing {} templates", templates.len());

    Json(DataResponse::success(
        format!("{} templates available", templates.len()),
        templates,
        None,
    ))
}

pub async fn health_handler() -> Json<TextResponse> {
    info!("Health check");
    Json(TextResponse::success("OK".to_string(), None))
}
