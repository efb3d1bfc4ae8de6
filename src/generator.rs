// src/generator.rs
use anyhow::{Context, Result};
use chrono::Utc;
use std::path::PathBuf;
use tracing::{info, info_span, Instrument};

use crate::config::RenderConfig;
use crate::core::{FsOps, TemplateEngine};
use crate::render::Document;
use crate::types::profile::Profile;
use crate::types::resume::{Customizations, Resume};
use crate::utils::sanitize_filename;

pub struct ResumeGenerator {
    pub config: RenderConfig,
    engine: TemplateEngine,
}

impl ResumeGenerator {
    pub fn new(config: RenderConfig) -> Result<Self> {
        let engine = TemplateEngine::new(config.templates_dir_absolute())
            .context("Failed to initialize template engine")?;
        Ok(Self::with_engine(config, engine))
    }

    pub fn with_engine(mut config: RenderConfig, engine: TemplateEngine) -> Self {
        // Validate and normalize template
        config.template = engine.normalize_template_id(&config.template);
        Self { config, engine }
    }

    pub fn engine(&self) -> &TemplateEngine {
        &self.engine
    }

    pub fn render(&self, profile: &Profile, customizations: &Customizations) -> Document {
        self.engine.render(&self.config.template, profile, customizations)
    }

    /// Render to a standalone HTML page and the file name to store it under.
    pub fn render_html(
        &self,
        profile: &Profile,
        customizations: &Customizations,
    ) -> (String, String) {
        let html = self.render(profile, customizations).to_html();
        (html, self.filename(profile))
    }

    /// Render a résumé record: its own template and customizations win.
    pub fn render_resume(&self, resume: &Resume, profile: &Profile) -> Document {
        self.engine
            .render(&resume.template_id, profile, &resume.customizations)
    }

    /// Render with the configured template and write the page into the output directory.
    pub async fn generate(
        &self,
        profile: &Profile,
        customizations: &Customizations,
    ) -> Result<PathBuf> {
        let document = self.render(profile, customizations);
        self.write(&document, profile, &self.config.template).await
    }

    /// Write an already rendered document; `template` only names the file.
    pub async fn write(
        &self,
        document: &Document,
        profile: &Profile,
        template: &str,
    ) -> Result<PathBuf> {
        let span = info_span!("generate", template = %template);
        async {
            let filename =
                output_filename(self.config.person_name.as_deref(), profile, template);
            let output_path = self.config.output_dir_absolute().join(&filename);

            FsOps::write_file_safe(&output_path, &document.to_html()).await?;

            info!(
                "Rendered resume with {} template to {}",
                template,
                output_path.display()
            );
            Ok(output_path)
        }
        .instrument(span)
        .await
    }

    fn filename(&self, profile: &Profile) -> String {
        output_filename(
            self.config.person_name.as_deref(),
            profile,
            &self.config.template,
        )
    }
}

/// `<person>_<template>_<YYYYMMDD>.html`, the person falling back to the profile name.
pub fn output_filename(person_name: Option<&str>, profile: &Profile, template: &str) -> String {
    let person = person_name
        .map(str::to_string)
        .or_else(|| profile.full_name())
        .map(|name| sanitize_filename(&name))
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "resume".to_string());

    format!("{}_{}_{}.html", person, template, Utc::now().format("%Y%m%d"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> Profile {
        serde_json::from_str(
            r#"{"personalInfo": {"firstName": "Ada", "lastName": "Lovelace"}, "skills": ["Rust"]}"#,
        )
        .unwrap()
    }

    fn generator(template: &str, output_dir: PathBuf) -> ResumeGenerator {
        let config = RenderConfig::new()
            .with_template(template.to_string())
            .with_output_dir(output_dir);
        ResumeGenerator::with_engine(config, TemplateEngine::builtin())
    }

    #[test]
    fn test_template_is_normalized() {
        let gen = generator("TIMELINE", PathBuf::from("out"));
        assert_eq!(gen.config.template, "timeline");

        let gen = generator("unknown", PathBuf::from("out"));
        assert_eq!(gen.config.template, "default");
    }

    #[test]
    fn test_filename_uses_person_template_and_date() {
        let gen = generator("modern", PathBuf::from("out"));
        let (html, filename) = gen.render_html(&profile(), &Customizations::default());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(filename.starts_with("Ada_Lovelace_modern_"));
        assert!(filename.ends_with(".html"));
        assert_eq!(filename.len(), "Ada_Lovelace_modern_".len() + 8 + ".html".len());

        let anonymous = gen.render_html(&Profile::default(), &Customizations::default()).1;
        assert!(anonymous.starts_with("resume_modern_"));
    }

    #[test]
    fn test_render_resume_uses_its_template() {
        let gen = generator("default", PathBuf::from("out"));
        let resume = Resume::new("Mine", None, "executive").with_customizations(Customizations {
            primary_color: Some("#abcdef".to_string()),
            ..Default::default()
        });
        let doc = gen.render_resume(&resume, &profile());
        let html = doc.to_html();
        assert!(html.contains("data-heading-style=\"border\""));
        assert!(html.contains("#abcdef"));
    }

    #[tokio::test]
    async fn test_generate_writes_file() {
        let dir = std::env::temp_dir().join(format!("cvrender-gen-{}", std::process::id()));
        let gen = generator("compact", dir.clone());
        let path = gen
            .generate(&profile(), &Customizations::default())
            .await
            .unwrap();
        assert!(path.starts_with(&dir));
        let content = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(content.contains("Ada Lovelace"));
        tokio::fs::remove_dir_all(&dir).await.ok();
    }
}
