// src/lib.rs
//! Configuration-driven résumé rendering.
//!
//! A [`Profile`](types::Profile) is rendered to a [`Document`](render::Document)
//! either through a fixed template (a style descriptor keyed by template id) or
//! through an explicit [`TemplateConfiguration`](types::TemplateConfiguration).

pub mod cli;
pub mod config;
pub mod core;
pub mod environment;
pub mod font_validator;
pub mod generator;
pub mod image_validator;
pub mod render;
pub mod types;
pub mod utils;
pub mod web;

pub use config::RenderConfig;
pub use generator::ResumeGenerator;
pub use render::{Document, Renderer};
pub use web::start_web_server;
