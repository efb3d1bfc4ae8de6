// src/web/mod.rs

pub mod handlers;
pub mod types;

pub use types::*;

use crate::core::{ConfigManager, TemplateEngine, TemplateSummary};
use crate::render::Renderer;
use crate::types::resume::Resume;
use anyhow::{Context, Result};
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, Status};
use rocket::serde::json::Json;
use rocket::{catchers, get, options, post, routes, Build, Request, Response, Rocket, State};
use tracing::info;

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
        response.set_header(Header::new(
            "Access-Control-Expose-Headers",
            "Content-Disposition",
        ));
    }
}

#[post("/render", data = "<request>")]
pub async fn render(
    request: Json<StandardRequest<RenderRequest>>,
    config: &State<ServerConfig>,
) -> Result<HtmlResponse, Json<StandardErrorResponse>> {
    handlers::render_handler(request, config).await
}

#[post("/render/outline", data = "<request>")]
pub async fn render_outline(
    request: Json<StandardRequest<RenderRequest>>,
    config: &State<ServerConfig>,
) -> Result<Json<DataResponse<OutlineData>>, Json<StandardErrorResponse>> {
    handlers::outline_handler(request, config).await
}

#[post("/config/validate", data = "<request>")]
pub async fn validate_config(
    request: Json<StandardRequest<ValidateConfigRequest>>,
    config: &State<ServerConfig>,
) -> Result<Json<DataResponse<ConfigValidationData>>, Json<StandardErrorResponse>> {
    handlers::validate_config_handler(request, config).await
}

#[post("/resumes/duplicate", data = "<request>")]
pub async fn duplicate_resume(
    request: Json<StandardRequest<DuplicateResumeRequest>>,
) -> Json<DataResponse<Resume>> {
    handlers::duplicate_resume_handler(request).await
}

#[get("/templates")]
pub async fn get_templates(
    config: &State<ServerConfig>,
) -> Json<DataResponse<Vec<TemplateSummary>>> {
    handlers::get_templates_handler(config).await
}

#[get("/health")]
pub async fn health() -> Json<TextResponse> {
    handlers::health_handler().await
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Invalid request format".to_string(),
        "BAD_REQUEST".to_string(),
        vec![
            "Check your request JSON format".to_string(),
            "Verify all required fields are present".to_string(),
        ],
        None,
    ))
}

#[rocket::catch(404)]
pub fn not_found() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Endpoint not found".to_string(),
        "NOT_FOUND".to_string(),
        vec!["GET /api/templates lists what this server renders".to_string()],
        None,
    ))
}

#[rocket::catch(422)]
pub fn unprocessable() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Request body could not be parsed".to_string(),
        "UNPROCESSABLE_ENTITY".to_string(),
        vec![
            "A profile object is required".to_string(),
            "Dates must be strings or plain years".to_string(),
        ],
        None,
    ))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Internal server error".to_string(),
        "INTERNAL_ERROR".to_string(),
        vec![
            "Try again in a few moments".to_string(),
            "Contact support if the problem persists".to_string(),
        ],
        None,
    ))
}

/// Rocket instance with all routes mounted under `/api`.
pub fn build_rocket(server_config: ServerConfig) -> Rocket<Build> {
    rocket::build()
        .attach(Cors)
        .manage(server_config)
        .register(
            "/api",
            catchers![bad_request, not_found, unprocessable, internal_error],
        )
        .mount(
            "/api",
            routes![
                render,
                render_outline,
                validate_config,
                duplicate_resume,
                get_templates,
                health,
                options,
            ],
        )
}

// Main server start function
pub async fn start_web_server(config: ConfigManager, port: Option<u16>) -> Result<()> {
    config.ensure_directories().await?;

    let fonts = config.font_validator().await?;
    let engine = TemplateEngine::new(config.environment.templates_path.clone())?
        .with_renderer(Renderer::new(fonts));

    let port = port.unwrap_or(config.environment.port);
    info!("Starting resume rendering API server on port {}", port);
    info!("Templates: {}", engine.list_templates().join(", "));

    let figment = rocket::Config::figment().merge(("port", port));

    build_rocket(ServerConfig { engine })
        .configure(figment)
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))
        .context("Rocket server failed")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rocket::http::ContentType;
    use rocket::local::asynchronous::Client;
    use serde_json::{json, Value};

    async fn client() -> Client {
        let config = ServerConfig {
            engine: TemplateEngine::builtin(),
        };
        Client::tracked(build_rocket(config)).await.unwrap()
    }

    fn profile() -> Value {
        json!({
            "personalInfo": {"firstName": "Ada", "lastName": "Lovelace", "email": "ada@example.com"},
            "summary": "Analyst of engines.",
            "experience": [{
                "position": "Analyst",
                "company": "Engines Ltd",
                "startDate": "1842-01",
                "endDate": 1843
            }],
            "skills": ["Mathematics", "Notes"]
        })
    }

    async fn post_json(client: &Client, path: &str, body: Value) -> (Status, Option<String>, String) {
        let response = client
            .post(path)
            .header(ContentType::JSON)
            .body(body.to_string())
            .dispatch()
            .await;
        let status = response.status();
        let disposition = response
            .headers()
            .get_one("Content-Disposition")
            .map(str::to_string);
        let body = response.into_string().await.unwrap_or_default();
        (status, disposition, body)
    }

    #[rocket::async_test]
    async fn test_health_and_templates() {
        let client = client().await;

        let response = client.get("/api/health").dispatch().await;
        assert_eq!(response.status(), Status::Ok);
        assert_eq!(
            response.headers().get_one("Access-Control-Allow-Origin"),
            Some("*")
        );
        let body: Value = serde_json::from_str(&response.into_string().await.unwrap()).unwrap();
        assert_eq!(body["message"], "OK");

        let response = client.get("/api/templates").dispatch().await;
        let body: Value = serde_json::from_str(&response.into_string().await.unwrap()).unwrap();
        let ids: Vec<&str> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|t| t["id"].as_str())
            .collect();
        assert_eq!(ids.len(), 10);
        assert!(ids.contains(&"executive"));
    }

    #[rocket::async_test]
    async fn test_render_template_to_html() {
        let client = client().await;
        let (status, disposition, body) = post_json(
            &client,
            "/api/render",
            json!({"profile": profile(), "template": "modern"}),
        )
        .await;

        assert_eq!(status, Status::Ok);
        assert!(disposition.is_none());
        assert!(body.starts_with("<!DOCTYPE html>"));
        assert!(body.contains("Ada Lovelace"));
        assert!(body.contains("data-layout=\"sidebar-left\""));
    }

    #[rocket::async_test]
    async fn test_render_download_sets_filename() {
        let client = client().await;
        let (status, disposition, _) = post_json(
            &client,
            "/api/render",
            json!({"profile": profile(), "template": "compact", "download": true}),
        )
        .await;

        assert_eq!(status, Status::Ok);
        let disposition = disposition.unwrap();
        assert!(disposition.starts_with("attachment; filename=\"Ada_Lovelace_compact_"));
    }

    #[rocket::async_test]
    async fn test_outline_follows_explicit_configuration() {
        let client = client().await;
        let config = json!({
            "layout": {"type": "two-column"},
            "sections": [
                {"id": "skills", "type": "skills", "order": 0},
                {"id": "summary", "type": "summary", "order": 1},
                {"id": "work", "type": "experience", "order": 2},
                {"id": "edu", "type": "education", "order": 3}
            ]
        });
        let (status, _, body) = post_json(
            &client,
            "/api/render/outline",
            json!({"profile": profile(), "config": config, "conversation_id": "c-1"}),
        )
        .await;

        assert_eq!(status, Status::Ok);
        let body: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(body["conversation_id"], "c-1");
        assert_eq!(body["data"]["layout"], "two-column");
        assert!(body["data"]["template"].is_null());
        assert_eq!(
            body["data"]["sections"],
            json!(["skills", "summary", "experience"])
        );
        assert_eq!(body["data"]["columns"], json!([["skills", "summary"], ["work"]]));
    }

    #[rocket::async_test]
    async fn test_render_rejects_duplicate_section_ids() {
        let client = client().await;
        let config = json!({
            "sections": [
                {"id": "a", "type": "summary", "order": 0},
                {"id": "a", "type": "skills", "order": 1}
            ]
        });
        let (_, _, body) = post_json(
            &client,
            "/api/render",
            json!({"profile": profile(), "config": config}),
        )
        .await;

        let body: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["error_code"], "INVALID_CONFIGURATION");
        assert!(body["error"].as_str().unwrap().contains("Duplicate section ids"));
    }

    #[rocket::async_test]
    async fn test_validate_config_reports_warnings() {
        let client = client().await;
        let config = json!({
            "fonts": {"family": "Comic Neue"},
            "sections": [
                {"id": "summary", "type": "summary", "order": 0},
                {"id": "mystery", "type": "hobbies", "order": 1}
            ]
        });
        let (status, _, body) =
            post_json(&client, "/api/config/validate", json!({"config": config})).await;

        assert_eq!(status, Status::Ok);
        let body: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(body["data"]["section_count"], 2);
        assert_eq!(body["data"]["layout"], "single-column");
        let warnings = body["data"]["warnings"].as_array().unwrap();
        assert_eq!(warnings.len(), 2);
    }

    #[rocket::async_test]
    async fn test_duplicate_resume() {
        let client = client().await;
        let resume = Resume::new("Backend roles", Some("p-1".to_string()), "technical");
        let (status, _, body) = post_json(
            &client,
            "/api/resumes/duplicate",
            json!({"resume": serde_json::to_value(&resume).unwrap()}),
        )
        .await;

        assert_eq!(status, Status::Ok);
        let body: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(body["data"]["name"], "Backend roles (Copy)");
        assert_eq!(body["data"]["templateId"], "technical");
        assert_ne!(body["data"]["id"], json!(resume.id.to_string()));
    }

    #[rocket::async_test]
    async fn test_malformed_body_uses_catcher() {
        let client = client().await;
        let response = client
            .post("/api/render")
            .header(ContentType::JSON)
            .body("{\"template\": \"modern\"}")
            .dispatch()
            .await;

        assert_eq!(response.status(), Status::UnprocessableEntity);
        let body: Value = serde_json::from_str(&response.into_string().await.unwrap()).unwrap();
        assert_eq!(body["error_code"], "UNPROCESSABLE_ENTITY");
    }

    #[rocket::async_test]
    async fn test_render_drops_injected_colors() {
        let client = client().await;
        let config = json!({
            "colors": {"primary": "red; background-image: url(https://evil.example/x)"},
            "sections": [{"id": "summary", "type": "summary"}]
        });
        let (status, _, body) = post_json(
            &client,
            "/api/render",
            json!({"profile": profile(), "config": config}),
        )
        .await;

        assert_eq!(status, Status::Ok);
        assert!(body.contains("Analyst of engines."));
        assert!(!body.contains("evil.example"));
        assert!(!body.contains("background-image"));
    }

    #[rocket::async_test]
    async fn test_render_accepts_nulls_and_numbers_in_profile() {
        let client = client().await;
        let profile = json!({
            "personalInfo": {"firstName": "Ada", "lastName": "Lovelace", "title": null},
            "experience": null,
            "education": [{"degree": "B.Sc.", "institution": "MIT", "gpa": 3.8, "current": null}],
            "skills": null
        });
        let (status, _, body) = post_json(
            &client,
            "/api/render",
            json!({"profile": profile, "template": "default"}),
        )
        .await;

        assert_eq!(status, Status::Ok);
        assert!(body.contains("Ada Lovelace"));
        assert!(body.contains("3.8"));
    }
}
