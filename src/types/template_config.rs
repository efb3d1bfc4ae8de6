// src/types/template_config.rs
//! Configuration schema for the configuration-driven renderer.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::warn;

use super::resume::{Customizations, FontSize, Spacing};
use crate::utils::sanitize_color;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TemplateConfiguration {
    pub layout: LayoutConfig,
    pub colors: ColorScheme,
    pub fonts: FontConfig,
    pub spacing: SpacingConfig,
    pub header: HeaderConfig,
    pub sections: Vec<SectionConfig>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutType {
    #[default]
    SingleColumn,
    TwoColumn,
    TwoColumnWide,
    SidebarLeft,
    SidebarRight,
    ThreeColumn,
    ModernCard,
    Timeline,
    CompactDense,
}

impl LayoutType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SingleColumn => "single-column",
            Self::TwoColumn => "two-column",
            Self::TwoColumnWide => "two-column-wide",
            Self::SidebarLeft => "sidebar-left",
            Self::SidebarRight => "sidebar-right",
            Self::ThreeColumn => "three-column",
            Self::ModernCard => "modern-card",
            Self::Timeline => "timeline",
            Self::CompactDense => "compact-dense",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    #[serde(rename = "type")]
    pub layout_type: LayoutType,
    /// Number of sections moved into the sidebar for sidebar layouts.
    pub sidebar_sections: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            layout_type: LayoutType::SingleColumn,
            sidebar_sections: 4,
        }
    }
}

/// Colors land in inline `style` attributes, so every value read from input
/// goes through `sanitize_color`; rejected values fall back to the default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawColorScheme")]
pub struct ColorScheme {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub background: String,
    pub section_bg: String,
    pub text: String,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            primary: "#1f3a5f".to_string(),
            secondary: "#5b6b7f".to_string(),
            accent: "#2f80ed".to_string(),
            background: "#ffffff".to_string(),
            section_bg: "#f3f6fa".to_string(),
            text: "#222222".to_string(),
        }
    }
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawColorScheme {
    primary: Option<String>,
    secondary: Option<String>,
    accent: Option<String>,
    background: Option<String>,
    section_bg: Option<String>,
    text: Option<String>,
}

impl From<RawColorScheme> for ColorScheme {
    fn from(raw: RawColorScheme) -> Self {
        let defaults = ColorScheme::default();
        Self {
            primary: checked_color("primary", raw.primary, defaults.primary),
            secondary: checked_color("secondary", raw.secondary, defaults.secondary),
            accent: checked_color("accent", raw.accent, defaults.accent),
            background: checked_color("background", raw.background, defaults.background),
            section_bg: checked_color("sectionBg", raw.section_bg, defaults.section_bg),
            text: checked_color("text", raw.text, defaults.text),
        }
    }
}

fn checked_color(field: &str, value: Option<String>, fallback: String) -> String {
    match value {
        None => fallback,
        Some(value) => sanitize_color(&value).unwrap_or_else(|| {
            warn!("Ignoring invalid colors.{} value '{}'", field, value);
            fallback
        }),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Light,
    #[default]
    Normal,
    Bold,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FontConfig {
    pub family: String,
    pub heading_family: Option<String>,
    pub size: FontSize,
    pub weight: FontWeight,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            family: "Inter".to_string(),
            heading_family: None,
            size: FontSize::Medium,
            weight: FontWeight::Normal,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpacingConfig {
    pub scale: Spacing,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhotoShape {
    #[default]
    Circle,
    Rounded,
    Square,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactFormat {
    #[default]
    Inline,
    Stacked,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderAlignment {
    #[default]
    Left,
    Center,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeaderConfig {
    pub include_name: bool,
    pub include_title: bool,
    pub include_contact: bool,
    pub include_links: bool,
    pub include_photo: bool,
    pub photo_shape: PhotoShape,
    /// Photo edge length in pixels.
    pub photo_size: u32,
    pub contact_format: ContactFormat,
    pub separator: String,
    pub alignment: HeaderAlignment,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            include_name: true,
            include_title: true,
            include_contact: true,
            include_links: true,
            include_photo: false,
            photo_shape: PhotoShape::Circle,
            photo_size: 96,
            contact_format: ContactFormat::Inline,
            separator: " | ".to_string(),
            alignment: HeaderAlignment::Left,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionType {
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
    Certifications,
    Achievements,
    Languages,
    Courses,
    Publications,
    Patents,
    Interests,
    #[serde(other)]
    Unknown,
}

impl SectionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Summary => "summary",
            Self::Experience => "experience",
            Self::Education => "education",
            Self::Skills => "skills",
            Self::Projects => "projects",
            Self::Certifications => "certifications",
            Self::Achievements => "achievements",
            Self::Languages => "languages",
            Self::Courses => "courses",
            Self::Publications => "publications",
            Self::Patents => "patents",
            Self::Interests => "interests",
            Self::Unknown => "unknown",
        }
    }

    pub fn default_label(&self) -> &'static str {
        match self {
            Self::Summary => "Professional Summary",
            Self::Experience => "Experience",
            Self::Education => "Education",
            Self::Skills => "Skills",
            Self::Projects => "Projects",
            Self::Certifications => "Certifications",
            Self::Achievements => "Achievements",
            Self::Languages => "Languages",
            Self::Courses => "Courses",
            Self::Publications => "Publications",
            Self::Patents => "Patents",
            Self::Interests => "Interests",
            Self::Unknown => "",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingStyle {
    #[default]
    Underline,
    Border,
    Background,
    Minimal,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionVariant {
    Bullet,
    Pipe,
    Compact,
    Detailed,
    #[default]
    #[serde(other)]
    Default,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionConfig {
    pub id: String,
    #[serde(rename = "type")]
    pub section_type: SectionType,
    #[serde(default)]
    pub label: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub style: HeadingStyle,
    #[serde(default)]
    pub variant: SectionVariant,
    #[serde(default)]
    pub order: i32,
}

fn default_enabled() -> bool {
    true
}

impl SectionConfig {
    pub fn new(id: &str, section_type: SectionType, order: i32) -> Self {
        Self {
            id: id.to_string(),
            section_type,
            label: String::new(),
            enabled: true,
            style: HeadingStyle::default(),
            variant: SectionVariant::default(),
            order,
        }
    }

    pub fn with_style(mut self, style: HeadingStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_variant(mut self, variant: SectionVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = label.to_string();
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Configured label, falling back to the type's default heading.
    pub fn display_label(&self) -> &str {
        let label = self.label.trim();
        if label.is_empty() {
            self.section_type.default_label()
        } else {
            label
        }
    }
}

pub const DEFAULT_SECTION_SEQUENCE: [SectionType; 8] = [
    SectionType::Summary,
    SectionType::Experience,
    SectionType::Education,
    SectionType::Skills,
    SectionType::Projects,
    SectionType::Certifications,
    SectionType::Achievements,
    SectionType::Languages,
];

impl TemplateConfiguration {
    /// Standard single-column configuration with the core sections enabled.
    pub fn standard() -> Self {
        Self {
            sections: sections_from_sequence(&DEFAULT_SECTION_SEQUENCE, HeadingStyle::Underline),
            ..Default::default()
        }
    }

    /// Sections in ascending `order`; equal orders keep their list position.
    pub fn sorted_sections(&self) -> Vec<&SectionConfig> {
        let mut sections: Vec<&SectionConfig> = self.sections.iter().collect();
        sections.sort_by_key(|s| s.order);
        sections
    }

    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for section in &self.sections {
            if section.id.trim().is_empty() {
                anyhow::bail!("Section of type '{}' has an empty id", section.section_type.as_str());
            }
            if !seen.insert(section.id.as_str()) {
                duplicates.push(section.id.clone());
            }
        }
        if !duplicates.is_empty() {
            anyhow::bail!("Duplicate section ids: {}", duplicates.join(", "));
        }

        if self.header.include_photo && self.header.photo_size == 0 {
            anyhow::bail!("header.photoSize must be greater than zero when photos are enabled");
        }

        Ok(())
    }

    /// Overlay résumé customizations. Invalid colors keep the configured value.
    pub fn with_customizations(mut self, customizations: &Customizations) -> Self {
        overlay_color(&mut self.colors.primary, &customizations.primary_color);
        overlay_color(&mut self.colors.secondary, &customizations.secondary_color);
        overlay_color(&mut self.colors.accent, &customizations.accent_color);
        overlay_color(&mut self.colors.background, &customizations.background_color);

        if let Some(family) = customizations
            .font_family
            .as_deref()
            .map(str::trim)
            .filter(|f| !f.is_empty())
        {
            self.fonts.family = family.to_string();
        }
        if let Some(size) = customizations.font_size {
            self.fonts.size = size;
        }
        if let Some(spacing) = customizations.spacing {
            self.spacing.scale = spacing;
        }
        self
    }
}

fn overlay_color(target: &mut String, value: &Option<String>) {
    if let Some(color) = value.as_deref().and_then(sanitize_color) {
        *target = color;
    }
}

/// Enabled sections in a fixed sequence, ids derived from the type.
pub fn sections_from_sequence(sequence: &[SectionType], style: HeadingStyle) -> Vec<SectionConfig> {
    sequence
        .iter()
        .enumerate()
        .map(|(i, t)| SectionConfig::new(t.as_str(), *t, i as i32).with_style(style))
        .collect()
}
