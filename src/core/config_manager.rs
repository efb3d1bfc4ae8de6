// src/core/config_manager.rs
//! Environment settings plus the per-run configuration derived from them.

use anyhow::Result;
use std::path::PathBuf;
use tracing::info;

use crate::config::RenderConfig;
use crate::core::FsOps;
use crate::environment::EnvironmentConfig;
use crate::font_validator::FontValidator;

#[derive(Debug, Clone)]
pub struct ConfigManager {
    pub environment: EnvironmentConfig,
}

impl ConfigManager {
    /// Load `config.yaml` for the active environment.
    pub fn load() -> Result<Self> {
        let environment = EnvironmentConfig::load()?;
        info!(
            "Templates: {}, output: {}",
            environment.templates_path.display(),
            environment.output_path.display()
        );
        Ok(Self { environment })
    }

    pub fn from_environment(environment: EnvironmentConfig) -> Self {
        Self { environment }
    }

    /// Render configuration with environment defaults for anything not given.
    pub fn create_render_config(
        &self,
        template: Option<String>,
        person_name: Option<String>,
        output_dir: Option<PathBuf>,
    ) -> RenderConfig {
        let mut config = RenderConfig::new()
            .with_template(template.unwrap_or_else(|| "default".to_string()))
            .with_templates_dir(self.environment.templates_path.clone())
            .with_output_dir(output_dir.unwrap_or_else(|| self.environment.output_path.clone()));

        if let Some(name) = person_name {
            config = config.with_person_name(name);
        }
        config
    }

    /// Font validator from the configured YAML, or the built-in font list.
    pub async fn font_validator(&self) -> Result<FontValidator> {
        FontValidator::load(self.environment.font_config.as_deref()).await
    }

    pub async fn ensure_directories(&self) -> Result<()> {
        FsOps::ensure_dir_exists(&self.environment.output_path).await?;
        self.environment.ensure_directories().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_config_defaults_from_environment() {
        let manager = ConfigManager::from_environment(EnvironmentConfig {
            templates_path: PathBuf::from("/srv/templates"),
            output_path: PathBuf::from("/srv/out"),
            ..Default::default()
        });

        let config = manager.create_render_config(None, None, None);
        assert_eq!(config.template, "default");
        assert_eq!(config.templates_dir, PathBuf::from("/srv/templates"));
        assert_eq!(config.output_dir, PathBuf::from("/srv/out"));
        assert!(config.person_name.is_none());

        let config = manager.create_render_config(
            Some("modern".to_string()),
            Some("ada".to_string()),
            Some(PathBuf::from("/tmp/x")),
        );
        assert_eq!(config.template, "modern");
        assert_eq!(config.person_name.as_deref(), Some("ada"));
        assert_eq!(config.output_dir, PathBuf::from("/tmp/x"));
    }

    #[tokio::test]
    async fn test_font_validator_without_config() {
        let manager = ConfigManager::from_environment(EnvironmentConfig::default());
        let fonts = manager.font_validator().await.unwrap();
        assert!(fonts.resolve("Lato").known);
    }
}
