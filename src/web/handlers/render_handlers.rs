// src/web/handlers/render_handlers.rs
//! Rendering, outline and configuration validation handlers
use rocket::serde::json::Json;
use rocket::State;
use tracing::{info, info_span, warn};

use crate::core::TemplateEngine;
use crate::generator::output_filename;
use crate::render::Document;
use crate::types::template_config::{SectionType, TemplateConfiguration};
use crate::web::types::{
    ConfigValidationData, DataResponse, HtmlResponse, OutlineData, RenderRequest, ServerConfig,
    StandardErrorResponse, StandardRequest, ValidateConfigRequest, WithConversationId,
};

pub async fn render_handler(
    request: Json<StandardRequest<RenderRequest>>,
    config: &State<ServerConfig>,
) -> Result<HtmlResponse, Json<StandardErrorResponse>> {
    let conversation_id = request.conversation_id();
    let data = &request.data;

    let span = info_span!(
        "render",
        template = %data.template.as_deref().unwrap_or("default"),
        explicit_config = data.config.is_some()
    );
    let _enter = span.enter();

    let (document, template) = render_request(&config.engine, data)
        .map_err(|e| Json(configuration_error(e, conversation_id.clone())))?;

    let html = document.to_html();
    info!("Rendered {} bytes of HTML", html.len());

    if data.download {
        let filename = output_filename(None, &data.profile, template.as_deref().unwrap_or("custom"));
        Ok(HtmlResponse::with_filename(html, filename))
    } else {
        Ok(HtmlResponse::new(html))
    }
}

pub async fn outline_handler(
    request: Json<StandardRequest<RenderRequest>>,
    config: &State<ServerConfig>,
) -> Result<Json<DataResponse<OutlineData>>, Json<StandardErrorResponse>> {
    let conversation_id = request.conversation_id();

    let (document, template) = render_request(&config.engine, &request.data)
        .map_err(|e| Json(configuration_error(e, conversation_id.clone())))?;

    let layout = document
        .body
        .attr("data-layout")
        .unwrap_or("single-column")
        .to_string();

    Ok(Json(DataResponse::success(
        "Outline computed".to_string(),
        OutlineData {
            template,
            layout,
            sections: document.section_order(),
            columns: document.columns(),
        },
        conversation_id,
    )))
}

pub async fn validate_config_handler(
    request: Json<StandardRequest<ValidateConfigRequest>>,
    config: &State<ServerConfig>,
) -> Result<Json<DataResponse<ConfigValidationData>>, Json<StandardErrorResponse>> {
    let conversation_id = request.conversation_id();

    let configuration = parse_configuration(&request.data.config)
        .map_err(|e| Json(configuration_error(e, conversation_id.clone())))?;

    let mut warnings: Vec<String> = configuration
        .sections
        .iter()
        .filter(|s| s.section_type == SectionType::Unknown)
        .map(|s| format!("Section '{}' has an unknown type and will not render", s.id))
        .collect();

    let mut families = vec![configuration.fonts.family.as_str()];
    if let Some(heading) = configuration.fonts.heading_family.as_deref() {
        families.push(heading);
    }
    let fonts = config.engine.renderer().fonts().validate(&families);
    warnings.extend(fonts.warnings);

    info!(
        "Validated configuration with {} sections, {} warnings",
        configuration.sections.len(),
        warnings.len()
    );

    Ok(Json(DataResponse::success(
        "Configuration is valid".to_string(),
        ConfigValidationData {
            valid: fonts.valid,
            layout: configuration.layout.layout_type.as_str().to_string(),
            section_count: configuration.sections.len(),
            warnings,
        },
        conversation_id,
    )))
}

/// Render through the explicit configuration when present, the template otherwise.
/// Returns the template id used, `None` for an explicit configuration.
fn render_request(
    engine: &TemplateEngine,
    request: &RenderRequest,
) -> anyhow::Result<(Document, Option<String>)> {
    match &request.config {
        Some(value) => {
            let configuration = parse_configuration(value)?;
            let document = engine.renderer().render_dynamic(
                &request.profile,
                &request.customizations,
                &configuration,
            );
            Ok((document, None))
        }
        None => {
            let requested = request.template.as_deref().unwrap_or("default");
            let template = engine.normalize_template_id(requested);
            let document = engine.render(&template, &request.profile, &request.customizations);
            Ok((document, Some(template)))
        }
    }
}

fn parse_configuration(value: &serde_json::Value) -> anyhow::Result<TemplateConfiguration> {
    let configuration: TemplateConfiguration = serde_json::from_value(value.clone())
        .map_err(|e| anyhow::anyhow!("Malformed configuration: {}", e))?;
    configuration.validate()?;
    Ok(configuration)
}

fn configuration_error(
    error: anyhow::Error,
    conversation_id: Option<String>,
) -> StandardErrorResponse {
    warn!("Rejected template configuration: {}", error);
    StandardErrorResponse::new(
        error.to_string(),
        "INVALID_CONFIGURATION".to_string(),
        vec![
            "Check the layout type and section list".to_string(),
            "Section ids must be unique and non-empty".to_string(),
        ],
        conversation_id,
    )
}
