// src/web/types.rs

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use rocket::http::ContentType;
use rocket::response::{self, Responder};
use rocket::serde::{Deserialize, Serialize};
use rocket::{Request, Response};

use crate::core::TemplateEngine;
use crate::types::profile::Profile;
use crate::types::resume::{Customizations, Resume};

const FILENAME_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC.remove(b'_').remove(b'-').remove(b'.');

/// `attachment` disposition with an ASCII fallback name plus the UTF-8 name
/// in RFC 5987 `filename*` form.
pub fn content_disposition(filename: &str) -> String {
    let fallback: String = filename
        .chars()
        .map(|c| {
            if c.is_ascii_graphic() && c != '"' && c != '\\' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        fallback,
        utf8_percent_encode(filename, FILENAME_ENCODE_SET)
    )
}

pub struct HtmlResponse {
    pub html: String,
    pub filename: Option<String>,
}

impl HtmlResponse {
    pub fn new(html: String) -> Self {
        Self {
            html,
            filename: None,
        }
    }

    pub fn with_filename(html: String, filename: String) -> Self {
        Self {
            html,
            filename: Some(filename),
        }
    }
}

impl<'r> Responder<'r, 'static> for HtmlResponse {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        let mut binding = Response::build();
        let mut response = binding
            .header(ContentType::HTML)
            .sized_body(self.html.len(), std::io::Cursor::new(self.html));

        if let Some(filename) = self.filename {
            response = response.raw_header("Content-Disposition", content_disposition(&filename));
        }

        response.ok()
    }
}

pub struct ServerConfig {
    pub engine: TemplateEngine,
}

// Request payloads

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct RenderRequest {
    pub profile: Profile,
    pub template: Option<String>,
    #[serde(default)]
    pub customizations: Customizations,
    /// Explicit configuration; takes precedence over `template`.
    pub config: Option<rocket::serde::json::Value>,
    #[serde(default)]
    pub download: bool,
}

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct ValidateConfigRequest {
    pub config: rocket::serde::json::Value,
}

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct DuplicateResumeRequest {
    pub resume: Resume,
    pub name: Option<String>,
}

// Response payloads

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct OutlineData {
    pub template: Option<String>,
    pub layout: String,
    pub sections: Vec<String>,
    pub columns: Vec<Vec<String>>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ConfigValidationData {
    pub valid: bool,
    pub layout: String,
    pub section_count: usize,
    pub warnings: Vec<String>,
}

// Standard response types

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct TextResponse {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct DataResponse<T> {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub message: String,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct StandardErrorResponse {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub error: String,
    pub error_code: String,
    pub suggestions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde", rename_all = "lowercase")]
pub enum ResponseType {
    Text,
    Data,
    Error,
}

// Request types with conversation_id support
#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct StandardRequest<T> {
    #[serde(flatten)]
    pub data: T,
    pub conversation_id: Option<String>,
}

pub trait WithConversationId {
    fn conversation_id(&self) -> Option<String>;
}

impl<T> WithConversationId for StandardRequest<T> {
    fn conversation_id(&self) -> Option<String> {
        self.conversation_id.clone()
    }
}

impl TextResponse {
    pub fn success(message: String, conversation_id: Option<String>) -> Self {
        Self {
            response_type: ResponseType::Text,
            success: true,
            message,
            conversation_id,
        }
    }
}

impl<T> DataResponse<T> {
    pub fn success(message: String, data: T, conversation_id: Option<String>) -> Self {
        Self {
            response_type: ResponseType::Data,
            success: true,
            message,
            data,
            conversation_id,
        }
    }
}

impl StandardErrorResponse {
    pub fn new(
        error: String,
        error_code: String,
        suggestions: Vec<String>,
        conversation_id: Option<String>,
    ) -> Self {
        Self {
            response_type: ResponseType::Error,
            success: false,
            error,
            error_code,
            suggestions,
            conversation_id,
        }
    }
}
