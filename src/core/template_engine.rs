// src/core/template_engine.rs
//! Template discovery and rendering by template id.
//!
//! Built-in fixed templates are always available. Each subdirectory of the
//! templates directory holding a `manifest.toml` adds (or replaces) one template:
//! either a fixed style layered over a built-in via `extends` and `[style]`, or a
//! dynamic template whose `configuration` file holds a `TemplateConfiguration`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, trace, warn};

use crate::core::FsOps;
use crate::render::{builtin_style, builtin_styles, Document, Renderer, StyleOverrides, TemplateStyle};
use crate::types::profile::Profile;
use crate::types::resume::Customizations;
use crate::types::template_config::TemplateConfiguration;
use crate::utils::normalize_template_id;

pub const DEFAULT_TEMPLATE: &str = "default";

// ===== Template Models =====

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemplateManifest {
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
    pub author: Option<String>,
    pub version: Option<String>,
    /// Built-in template the `[style]` table is layered over.
    pub extends: Option<String>,
    /// Path (relative to the template directory) of a dynamic configuration.
    pub configuration: Option<String>,
    pub style: Option<StyleOverrides>,
}

#[derive(Debug, Clone)]
pub enum TemplateKind {
    Fixed(TemplateStyle),
    Dynamic(TemplateConfiguration),
}

#[derive(Debug, Clone)]
pub struct TemplateInfo {
    pub id: String,
    pub name: String,
    pub description: String,
    pub author: Option<String>,
    pub version: Option<String>,
    /// `None` for built-in templates.
    pub path: Option<PathBuf>,
    pub kind: TemplateKind,
}

impl TemplateInfo {
    fn builtin(style: TemplateStyle) -> Self {
        Self {
            id: style.id.clone(),
            name: style.name.clone(),
            description: style.description.clone(),
            author: None,
            version: None,
            path: None,
            kind: TemplateKind::Fixed(style),
        }
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self.kind, TemplateKind::Dynamic(_))
    }

    pub fn summary(&self) -> TemplateSummary {
        TemplateSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            kind: if self.is_dynamic() { "dynamic" } else { "fixed" }.to_string(),
            builtin: self.path.is_none(),
        }
    }
}

/// Serializable listing entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateSummary {
    pub id: String,
    pub name: String,
    pub description: String,
    pub kind: String,
    pub builtin: bool,
}

// ===== Main Template Engine =====

#[derive(Debug, Clone)]
pub struct TemplateEngine {
    templates_dir: Option<PathBuf>,
    templates: Vec<TemplateInfo>,
    renderer: Renderer,
}

impl TemplateEngine {
    /// Engine with built-in templates only.
    pub fn builtin() -> Self {
        Self {
            templates_dir: None,
            templates: builtin_styles().into_iter().map(TemplateInfo::builtin).collect(),
            renderer: Renderer::default(),
        }
    }

    /// Built-in templates plus everything discovered under `templates_dir`.
    pub fn new(templates_dir: PathBuf) -> Result<Self> {
        let mut engine = Self::builtin();
        engine.templates_dir = Some(templates_dir);
        engine.discover_templates()?;
        Ok(engine)
    }

    pub fn with_renderer(mut self, renderer: Renderer) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    fn discover_templates(&mut self) -> Result<()> {
        let Some(templates_dir) = self.templates_dir.clone() else {
            return Ok(());
        };

        if !templates_dir.exists() {
            warn!(
                "Templates directory does not exist: {}",
                templates_dir.display()
            );
            return Ok(());
        }

        let entries = std::fs::read_dir(&templates_dir).with_context(|| {
            format!(
                "Failed to read templates directory: {}",
                templates_dir.display()
            )
        })?;

        let mut discovered = 0;
        for entry in entries {
            let path = entry?.path();
            if !path.is_dir() {
                continue;
            }
            let Some(dir_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };

            match Self::load_template_info(dir_name, &path) {
                Ok(template) => {
                    trace!(
                        "Loaded template: {} from {}",
                        template.id,
                        path.display()
                    );
                    self.register(template);
                    discovered += 1;
                }
                Err(e) => warn!("Failed to load template {}: {:#}", dir_name, e),
            }
        }

        info!(
            "Discovered {} templates on disk, {} available",
            discovered,
            self.templates.len()
        );
        Ok(())
    }

    fn register(&mut self, template: TemplateInfo) {
        match self.templates.iter_mut().find(|t| t.id == template.id) {
            Some(existing) => {
                info!("Template '{}' on disk replaces the built-in", template.id);
                *existing = template;
            }
            None => self.templates.push(template),
        }
    }

    /// Load template information from a directory holding `manifest.toml`.
    fn load_template_info(dir_name: &str, template_path: &Path) -> Result<TemplateInfo> {
        let manifest_path = template_path.join("manifest.toml");
        if !manifest_path.exists() {
            anyhow::bail!("missing manifest.toml in {}", template_path.display());
        }

        let content = std::fs::read_to_string(&manifest_path)
            .with_context(|| format!("Failed to read manifest: {}", manifest_path.display()))?;
        let manifest: TemplateManifest = toml::from_str(&content)
            .with_context(|| format!("Failed to parse manifest: {}", manifest_path.display()))?;

        let id = normalize_template_id(dir_name);
        let name = if manifest.name.trim().is_empty() {
            dir_name.to_string()
        } else {
            manifest.name.clone()
        };
        let description = manifest.description.clone().unwrap_or_default();

        let kind = match &manifest.configuration {
            Some(file) => {
                let config_path = FsOps::normalize_path(template_path, Path::new(file));
                let config_content = std::fs::read_to_string(&config_path).with_context(|| {
                    format!("Failed to read configuration: {}", config_path.display())
                })?;
                let config: TemplateConfiguration =
                    FsOps::parse_structured(&config_path, &config_content)?;
                config
                    .validate()
                    .with_context(|| format!("Invalid configuration: {}", config_path.display()))?;
                TemplateKind::Dynamic(config)
            }
            None => {
                let base_id = manifest.extends.as_deref().unwrap_or(DEFAULT_TEMPLATE);
                let base = builtin_style(&normalize_template_id(base_id))
                    .ok_or_else(|| anyhow::anyhow!("Unknown base template '{}'", base_id))?;
                let mut style = manifest.style.clone().unwrap_or_default().apply(base);
                style.id = id.clone();
                style.name = name.clone();
                style.description = description.clone();
                TemplateKind::Fixed(style)
            }
        };

        Ok(TemplateInfo {
            id,
            name,
            description,
            author: manifest.author,
            version: manifest.version,
            path: Some(template_path.to_path_buf()),
            kind,
        })
    }

    /// List available template ids
    pub fn list_templates(&self) -> Vec<String> {
        self.templates.iter().map(|t| t.id.clone()).collect()
    }

    pub fn summaries(&self) -> Vec<TemplateSummary> {
        self.templates.iter().map(TemplateInfo::summary).collect()
    }

    pub fn get_template(&self, template_id: &str) -> Option<&TemplateInfo> {
        self.templates.iter().find(|t| t.id == template_id)
    }

    pub fn template_exists(&self, template_id: &str) -> bool {
        self.get_template(template_id).is_some()
    }

    pub fn templates_dir(&self) -> Option<&Path> {
        self.templates_dir.as_deref()
    }

    /// Case-insensitive lookup; unknown ids fall back to the default template.
    pub fn normalize_template_id(&self, template_id: &str) -> String {
        let requested = normalize_template_id(template_id);
        if self.template_exists(&requested) {
            requested
        } else {
            warn!(
                "Unknown template '{}', falling back to '{}'",
                template_id, DEFAULT_TEMPLATE
            );
            DEFAULT_TEMPLATE.to_string()
        }
    }

    /// Effective configuration of a template after customizations.
    pub fn configuration_for(
        &self,
        template_id: &str,
        customizations: &Customizations,
    ) -> TemplateConfiguration {
        let id = self.normalize_template_id(template_id);
        match self.get_template(&id).map(|t| &t.kind) {
            Some(TemplateKind::Fixed(style)) => style.to_configuration(customizations),
            Some(TemplateKind::Dynamic(config)) => config.clone().with_customizations(customizations),
            None => TemplateStyle::default().to_configuration(customizations),
        }
    }

    /// Render a profile through the template with the given id.
    pub fn render(
        &self,
        template_id: &str,
        profile: &Profile,
        customizations: &Customizations,
    ) -> Document {
        let id = self.normalize_template_id(template_id);
        match self.get_template(&id).map(|t| &t.kind) {
            Some(TemplateKind::Fixed(style)) => {
                self.renderer.render_fixed(style, profile, customizations)
            }
            Some(TemplateKind::Dynamic(config)) => {
                self.renderer.render_dynamic(profile, customizations, config)
            }
            None => self
                .renderer
                .render_fixed(&TemplateStyle::default(), profile, customizations),
        }
    }
}
