// src/environment.rs
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    #[serde(default = "default_templates_path")]
    pub templates_path: PathBuf,
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub log_file: Option<PathBuf>,
    #[serde(default)]
    pub font_config: Option<PathBuf>,
}

fn default_templates_path() -> PathBuf {
    PathBuf::from("templates")
}

fn default_output_path() -> PathBuf {
    PathBuf::from("output")
}

fn default_port() -> u16 {
    8000
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            templates_path: default_templates_path(),
            output_path: default_output_path(),
            port: default_port(),
            log_file: None,
            font_config: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    local: EnvironmentConfig,
    #[serde(default)]
    production: EnvironmentConfig,
}

impl EnvironmentConfig {
    /// Load configuration based on environment
    pub fn load() -> Result<Self> {
        let environment = Self::get_environment();
        info!("Loading configuration for environment: {}", environment);

        Self::load_from_file(Path::new("config.yaml"), &environment)
    }

    pub fn get_environment() -> String {
        std::env::var("CVRENDER_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .or_else(|_| std::env::var("ENV"))
            .unwrap_or_else(|_| "local".to_string())
    }

    pub fn load_from_file(config_path: &Path, environment: &str) -> Result<Self> {
        let env_config = if config_path.exists() {
            let config_content = std::fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read {}", config_path.display()))?;

            let config_file: ConfigFile = serde_yaml::from_str(&config_content)
                .with_context(|| format!("Failed to parse {}", config_path.display()))?;

            match environment {
                "production" => config_file.production,
                _ => config_file.local,
            }
        } else {
            warn!(
                "{} not found, using built-in defaults",
                config_path.display()
            );
            Self::default()
        };

        // Make paths absolute
        Ok(Self {
            templates_path: Self::resolve_path(&env_config.templates_path)?,
            output_path: Self::resolve_path(&env_config.output_path)?,
            port: env_config.port,
            log_file: env_config
                .log_file
                .as_ref()
                .map(|p| Self::resolve_path(p))
                .transpose()?,
            font_config: env_config
                .font_config
                .as_ref()
                .map(|p| Self::resolve_path(p))
                .transpose()?,
        })
    }

    fn resolve_path(path: &Path) -> Result<PathBuf> {
        if path.is_absolute() {
            Ok(path.to_path_buf())
        } else {
            // For relative paths, resolve from current working directory
            let current_dir = std::env::current_dir().context("Failed to get current directory")?;
            Ok(current_dir.join(path))
        }
    }

    /// Ensure the output directory exists. Templates are optional.
    pub async fn ensure_directories(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.output_path)
            .await
            .with_context(|| format!("Failed to create directory: {}", self.output_path.display()))?;

        if !self.templates_path.exists() {
            info!(
                "Templates directory {} does not exist, only built-in templates are available",
                self.templates_path.display()
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("cvrender-env-{}-{}.yaml", name, std::process::id()));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_selects_environment_section() {
        let path = write_config(
            "sections",
            r#"
local:
  templates_path: templates
  output_path: out
  port: 8100
production:
  templates_path: /app/templates
  output_path: /app/out
  port: 80
  log_file: /var/log/cvrender.log
"#,
        );

        let local = EnvironmentConfig::load_from_file(&path, "local").unwrap();
        assert_eq!(local.port, 8100);
        assert!(local.output_path.is_absolute());
        assert!(local.output_path.ends_with("out"));
        assert_eq!(local.log_file, None);

        let production = EnvironmentConfig::load_from_file(&path, "production").unwrap();
        assert_eq!(production.port, 80);
        assert_eq!(production.templates_path, PathBuf::from("/app/templates"));
        assert_eq!(production.log_file, Some(PathBuf::from("/var/log/cvrender.log")));

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("cvrender-env-does-not-exist.yaml");
        let config = EnvironmentConfig::load_from_file(&path, "local").unwrap();
        assert_eq!(config.port, 8000);
        assert!(config.templates_path.ends_with("templates"));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let path = write_config("broken", "local: [not, a, map");
        let err = EnvironmentConfig::load_from_file(&path, "local").unwrap_err();
        assert!(err.to_string().contains("Failed to parse"));
        std::fs::remove_file(path).ok();
    }
}
