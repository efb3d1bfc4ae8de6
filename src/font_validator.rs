// src/font_validator.rs
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FontRequirement {
    pub name: String,
    pub display_name: String,
    /// CSS generic family appended at the end of the stack
    pub generic: String,
    pub alternatives: Vec<String>,
}

impl FontRequirement {
    fn new(name: &str, generic: &str, alternatives: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            display_name: name.to_string(),
            generic: generic.to_string(),
            alternatives: alternatives.iter().map(|a| a.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FontValidationConfig {
    pub fonts: Vec<FontRequirement>,
    pub validation_enabled: bool,
    pub strict_mode: bool, // If true, unknown families are replaced by the default stack
}

impl Default for FontValidationConfig {
    fn default() -> Self {
        Self {
            fonts: vec![
                FontRequirement::new("Inter", "sans-serif", &["Helvetica", "Arial"]),
                FontRequirement::new("Roboto", "sans-serif", &["Helvetica", "Arial"]),
                FontRequirement::new("Open Sans", "sans-serif", &["Helvetica Neue", "Arial"]),
                FontRequirement::new("Lato", "sans-serif", &["Helvetica", "Arial"]),
                FontRequirement::new("Carlito", "sans-serif", &["Calibri", "Arial"]),
                FontRequirement::new("Georgia", "serif", &["Times New Roman"]),
                FontRequirement::new("Merriweather", "serif", &["Georgia"]),
                FontRequirement::new("Playfair Display", "serif", &["Georgia"]),
                FontRequirement::new("EB Garamond", "serif", &["Garamond", "Georgia"]),
                FontRequirement::new("Source Code Pro", "monospace", &["Menlo", "Consolas"]),
            ],
            validation_enabled: true,
            strict_mode: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FontResolution {
    pub stack: String,
    pub known: bool,
}

#[derive(Debug)]
pub struct FontValidationResult {
    pub valid: bool,
    pub unknown_fonts: Vec<String>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct FontValidator {
    config: FontValidationConfig,
}

impl Default for FontValidator {
    fn default() -> Self {
        Self::with_config(FontValidationConfig::default())
    }
}

impl FontValidator {
    pub fn with_config(config: FontValidationConfig) -> Self {
        Self { config }
    }

    pub async fn load(config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => Self::load_config(path).await?,
            None => FontValidationConfig::default(),
        };
        Ok(Self::with_config(config))
    }

    async fn load_config(path: &Path) -> Result<FontValidationConfig> {
        if !path.exists() {
            info!(
                "Font validation config not found at {}, using defaults",
                path.display()
            );
            return Ok(FontValidationConfig::default());
        }

        let content = tokio::fs::read_to_string(path)
            .await
            .context("Failed to read font validation config")?;

        let config: FontValidationConfig =
            serde_yaml::from_str(&content).context("Failed to parse font validation config")?;

        info!("Loaded font validation config from {}", path.display());
        Ok(config)
    }

    fn default_stack(&self) -> String {
        match self.config.fonts.first() {
            Some(font) => Self::stack_for(font),
            None => "sans-serif".to_string(),
        }
    }

    fn stack_for(font: &FontRequirement) -> String {
        std::iter::once(font.name.as_str())
            .chain(font.alternatives.iter().map(String::as_str))
            .map(quote_family)
            .chain(std::iter::once(font.generic.clone()))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn find(&self, family: &str) -> Option<&FontRequirement> {
        let wanted = family.trim().to_lowercase();
        self.config
            .fonts
            .iter()
            .find(|f| f.name.to_lowercase() == wanted || f.display_name.to_lowercase() == wanted)
    }

    /// Map a requested family onto a safe CSS font stack.
    pub fn resolve(&self, family: &str) -> FontResolution {
        if let Some(font) = self.find(family) {
            return FontResolution {
                stack: Self::stack_for(font),
                known: true,
            };
        }

        let cleaned = sanitize_family(family);
        if !self.config.validation_enabled && !cleaned.is_empty() {
            return FontResolution {
                stack: format!("{}, sans-serif", quote_family(&cleaned)),
                known: false,
            };
        }

        if cleaned.is_empty() || self.config.strict_mode {
            if !cleaned.is_empty() {
                warn!("Unknown font family '{}', using default stack", cleaned);
            }
            return FontResolution {
                stack: self.default_stack(),
                known: false,
            };
        }

        FontResolution {
            stack: format!("{}, {}", quote_family(&cleaned), self.default_stack()),
            known: false,
        }
    }

    pub fn validate(&self, families: &[&str]) -> FontValidationResult {
        let mut unknown_fonts = Vec::new();
        let mut warnings = Vec::new();

        for family in families {
            if self.find(family).is_some() {
                continue;
            }
            unknown_fonts.push(family.to_string());
            if self.config.strict_mode {
                warnings.push(format!(
                    "Font '{}' is not available and will be replaced by the default stack",
                    family
                ));
            } else {
                warnings.push(format!(
                    "Font '{}' is not in the known font list; viewers may fall back",
                    family
                ));
            }
        }

        FontValidationResult {
            valid: unknown_fonts.is_empty() || !self.config.strict_mode,
            unknown_fonts,
            warnings,
        }
    }

    pub fn known_fonts(&self) -> Vec<&str> {
        self.config.fonts.iter().map(|f| f.name.as_str()).collect()
    }
}

fn sanitize_family(family: &str) -> String {
    family
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == ' ' || *c == '-')
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn quote_family(name: &str) -> String {
    if name.contains(' ') {
        format!("'{}'", name)
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_font_resolves_to_stack() {
        let validator = FontValidator::default();
        let resolution = validator.resolve("open sans");
        assert!(resolution.known);
        assert_eq!(resolution.stack, "'Open Sans', 'Helvetica Neue', Arial, sans-serif");
    }

    #[test]
    fn test_unknown_font_is_sanitized() {
        let validator = FontValidator::default();
        let resolution = validator.resolve("Comic\"; color: red");
        assert!(!resolution.known);
        assert!(resolution.stack.starts_with("'Comic color red', Inter"));
        assert!(!resolution.stack.contains(';'));
    }

    #[test]
    fn test_strict_mode_uses_default_stack() {
        let validator = FontValidator::with_config(FontValidationConfig {
            strict_mode: true,
            ..Default::default()
        });
        let resolution = validator.resolve("Papyrus");
        assert_eq!(resolution.stack, "Inter, Helvetica, Arial, sans-serif");

        let result = validator.validate(&["Papyrus", "Georgia"]);
        assert!(!result.valid);
        assert_eq!(result.unknown_fonts, vec!["Papyrus".to_string()]);
    }

    #[tokio::test]
    async fn test_missing_config_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join("cvrender-missing-fonts.yaml");
        let validator = FontValidator::load(Some(&path)).await.unwrap();
        assert!(validator.known_fonts().contains(&"Georgia"));
    }
}
