// src/core/fs_ops.rs
//! File system operations and structured input loading

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

use crate::types::profile::Profile;
use crate::types::resume::{Customizations, Resume};
use crate::types::template_config::TemplateConfiguration;
use crate::utils::validate_file_extension;

const STRUCTURED_EXTENSIONS: &[&str] = &["json", "yaml", "yml"];

pub struct FsOps;

impl FsOps {
    pub async fn ensure_dir_exists(path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path)
                .await
                .with_context(|| format!("Failed to create directory: {}", path.display()))?;
            info!("Created directory: {}", path.display());
        }
        Ok(())
    }

    pub async fn read_file_safe(path: &Path) -> Result<String> {
        fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read file: {}", path.display()))
    }

    pub async fn write_file_safe(path: &Path, content: &str) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            Self::ensure_dir_exists(parent).await?;
        }

        fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write file: {}", path.display()))?;

        info!("Written file: {}", path.display());
        Ok(())
    }

    pub fn normalize_path(base: &Path, relative: &Path) -> PathBuf {
        if relative.is_absolute() {
            relative.to_path_buf()
        } else {
            base.join(relative)
        }
    }

    pub fn get_extension(path: &Path) -> Option<String> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
    }

    /// Parse JSON or YAML content, chosen by the file extension.
    pub fn parse_structured<T: DeserializeOwned>(path: &Path, content: &str) -> Result<T> {
        validate_file_extension(&path.to_string_lossy(), STRUCTURED_EXTENSIONS)
            .with_context(|| format!("Cannot load {}", path.display()))?;

        if Self::get_extension(path).as_deref() == Some("json") {
            serde_json::from_str(content)
                .with_context(|| format!("Failed to parse JSON: {}", path.display()))
        } else {
            serde_yaml::from_str(content)
                .with_context(|| format!("Failed to parse YAML: {}", path.display()))
        }
    }

    pub async fn load_structured<T: DeserializeOwned>(path: &Path) -> Result<T> {
        let content = Self::read_file_safe(path).await?;
        debug!("Loaded {} bytes from {}", content.len(), path.display());
        Self::parse_structured(path, &content)
    }

    pub async fn load_profile(path: &Path) -> Result<Profile> {
        Self::load_structured(path)
            .await
            .with_context(|| format!("Invalid profile: {}", path.display()))
    }

    pub async fn load_customizations(path: &Path) -> Result<Customizations> {
        Self::load_structured(path)
            .await
            .with_context(|| format!("Invalid customizations: {}", path.display()))
    }

    pub async fn load_resume(path: &Path) -> Result<Resume> {
        Self::load_structured(path)
            .await
            .with_context(|| format!("Invalid resume: {}", path.display()))
    }

    /// Load and validate a template configuration.
    pub async fn load_configuration(path: &Path) -> Result<TemplateConfiguration> {
        let config: TemplateConfiguration = Self::load_structured(path)
            .await
            .with_context(|| format!("Invalid template configuration: {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid template configuration: {}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::template_config::LayoutType;

    fn temp_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("cvrender-fs-{}-{}", name, std::process::id()))
    }

    #[tokio::test]
    async fn test_write_creates_parents_and_reads_back() {
        let dir = temp_dir("write");
        let path = dir.join("nested").join("out.html");
        FsOps::write_file_safe(&path, "<p>hi</p>").await.unwrap();
        assert_eq!(FsOps::read_file_safe(&path).await.unwrap(), "<p>hi</p>");
        fs::remove_dir_all(&dir).await.ok();
    }

    #[tokio::test]
    async fn test_load_profile_json_and_yaml() {
        let dir = temp_dir("profile");
        FsOps::ensure_dir_exists(&dir).await.unwrap();

        let json = dir.join("p.json");
        fs::write(&json, r#"{"personalInfo": {"firstName": "Ada"}}"#).await.unwrap();
        let profile = FsOps::load_profile(&json).await.unwrap();
        assert_eq!(profile.full_name().as_deref(), Some("Ada"));

        let yaml = dir.join("p.yml");
        fs::write(&yaml, "personalInfo:\n  lastName: Lovelace\nskills:\n  - Rust\n")
            .await
            .unwrap();
        let profile = FsOps::load_profile(&yaml).await.unwrap();
        assert_eq!(profile.full_name().as_deref(), Some("Lovelace"));
        assert_eq!(profile.skills.len(), 1);

        let txt = dir.join("p.txt");
        fs::write(&txt, "{}").await.unwrap();
        let err = FsOps::load_profile(&txt).await.unwrap_err();
        assert!(format!("{:#}", err).contains("Unsupported file extension"));

        fs::remove_dir_all(&dir).await.ok();
    }

    #[tokio::test]
    async fn test_load_configuration_validates() {
        let dir = temp_dir("config");
        FsOps::ensure_dir_exists(&dir).await.unwrap();

        let good = dir.join("good.yaml");
        fs::write(
            &good,
            "layout:\n  type: timeline\nsections:\n  - id: a\n    type: summary\n",
        )
        .await
        .unwrap();
        let config = FsOps::load_configuration(&good).await.unwrap();
        assert_eq!(config.layout.layout_type, LayoutType::Timeline);

        let dup = dir.join("dup.yaml");
        fs::write(
            &dup,
            "sections:\n  - id: a\n    type: summary\n  - id: a\n    type: skills\n",
        )
        .await
        .unwrap();
        let err = FsOps::load_configuration(&dup).await.unwrap_err();
        assert!(format!("{:#}", err).contains("Duplicate section ids"));

        fs::remove_dir_all(&dir).await.ok();
    }

    #[tokio::test]
    async fn test_bundled_samples_load() {
        let samples = Path::new(env!("CARGO_MANIFEST_DIR")).join("samples");

        let profile = FsOps::load_profile(&samples.join("profile.yaml")).await.unwrap();
        assert_eq!(profile.full_name().as_deref(), Some("Ada Lovelace"));
        assert_eq!(profile.skills.len(), 3);
        assert!(profile.signature().is_some());

        let config = FsOps::load_configuration(&samples.join("two-column.yaml"))
            .await
            .unwrap();
        assert_eq!(config.layout.layout_type, LayoutType::TwoColumnWide);

        let resume = FsOps::load_resume(&samples.join("resume.json")).await.unwrap();
        assert_eq!(resume.template_id, "academic");

        let customizations = FsOps::load_customizations(&samples.join("customizations.yaml"))
            .await
            .unwrap();
        assert_eq!(customizations.font_family.as_deref(), Some("Lato"));
    }

    #[test]
    fn test_normalize_path() {
        let base = Path::new("/srv/templates/modern");
        assert_eq!(
            FsOps::normalize_path(base, Path::new("config.yaml")),
            PathBuf::from("/srv/templates/modern/config.yaml")
        );
        assert_eq!(
            FsOps::normalize_path(base, Path::new("/etc/x.yaml")),
            PathBuf::from("/etc/x.yaml")
        );
    }
}
