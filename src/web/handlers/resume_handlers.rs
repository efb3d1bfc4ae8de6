// src/web/handlers/resume_handlers.rs
use rocket::serde::json::Json;
use tracing::info;

use crate::types::resume::Resume;
use crate::web::types::{DataResponse, DuplicateResumeRequest, StandardRequest, WithConversationId};

pub async fn duplicate_resume_handler(
    request: Json<StandardRequest<DuplicateResumeRequest>>,
) -> Json<DataResponse<Resume>> {
    let conversation_id = request.conversation_id();
    let data = &request.data;

    let copy = data.resume.duplicate(data.name.as_deref());
    info!("Duplicated resume {} into {} ({})", data.resume.id, copy.id, copy.name);

    Json(DataResponse::success(
        format!("Resume duplicated as '{}'", copy.name),
        copy,
        conversation_id,
    ))
}
