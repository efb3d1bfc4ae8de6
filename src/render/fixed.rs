// src/render/fixed.rs
//! Fixed templates as style descriptors.
//!
//! A fixed template hardcodes its palette, typography, heading treatment,
//! layout and section sequence. Rather than one renderer per template, each is a
//! `TemplateStyle` that expands into a `TemplateConfiguration` for the shared
//! renderer. Sections of a fixed template always render in descriptor order and
//! cannot be disabled individually.

use serde::{Deserialize, Serialize};

use crate::types::resume::{Customizations, Spacing};
use crate::types::template_config::{
    sections_from_sequence, ColorScheme, FontConfig, HeaderAlignment, HeaderConfig, HeadingStyle,
    LayoutConfig, LayoutType, PhotoShape, SectionType, SectionVariant, SpacingConfig,
    TemplateConfiguration, DEFAULT_SECTION_SEQUENCE,
};
use crate::utils::sanitize_color;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateStyle {
    pub id: String,
    pub name: String,
    pub description: String,
    pub colors: ColorScheme,
    pub font_family: String,
    pub heading_font_family: Option<String>,
    pub heading_style: HeadingStyle,
    pub layout: LayoutType,
    pub spacing: Spacing,
    pub alignment: HeaderAlignment,
    pub separator: String,
    pub include_photo: bool,
    pub photo_shape: PhotoShape,
    pub list_variant: SectionVariant,
    pub sections: Vec<SectionType>,
}

impl Default for TemplateStyle {
    fn default() -> Self {
        Self {
            id: "default".to_string(),
            name: "Default".to_string(),
            description: "Clean single-column layout".to_string(),
            colors: ColorScheme::default(),
            font_family: "Inter".to_string(),
            heading_font_family: None,
            heading_style: HeadingStyle::Underline,
            layout: LayoutType::SingleColumn,
            spacing: Spacing::Normal,
            alignment: HeaderAlignment::Left,
            separator: " | ".to_string(),
            include_photo: false,
            photo_shape: PhotoShape::Circle,
            list_variant: SectionVariant::Default,
            sections: DEFAULT_SECTION_SEQUENCE.to_vec(),
        }
    }
}

impl TemplateStyle {
    /// Configuration this template renders with, before customizations.
    pub fn base_configuration(&self) -> TemplateConfiguration {
        let sections = sections_from_sequence(&self.sections, self.heading_style)
            .into_iter()
            .map(|section| match section.section_type {
                SectionType::Skills | SectionType::Languages | SectionType::Interests => {
                    section.with_variant(self.list_variant)
                }
                SectionType::Experience if self.layout == LayoutType::CompactDense => {
                    section.with_variant(SectionVariant::Compact)
                }
                _ => section,
            })
            .collect();

        TemplateConfiguration {
            layout: LayoutConfig {
                layout_type: self.layout,
                ..Default::default()
            },
            colors: self.colors.clone(),
            fonts: FontConfig {
                family: self.font_family.clone(),
                heading_family: self.heading_font_family.clone(),
                ..Default::default()
            },
            spacing: SpacingConfig {
                scale: self.spacing,
            },
            header: HeaderConfig {
                include_photo: self.include_photo,
                photo_shape: self.photo_shape,
                separator: self.separator.clone(),
                alignment: self.alignment,
                ..Default::default()
            },
            sections,
        }
    }

    /// Customizations override palette and typography; anything invalid or
    /// absent keeps the template default.
    pub fn to_configuration(&self, customizations: &Customizations) -> TemplateConfiguration {
        self.base_configuration().with_customizations(customizations)
    }
}

/// Partial `[style]` table from a template manifest, layered over a base style.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StyleOverrides {
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub accent_color: Option<String>,
    pub background_color: Option<String>,
    pub section_bg_color: Option<String>,
    pub text_color: Option<String>,
    pub font_family: Option<String>,
    pub heading_font_family: Option<String>,
    pub heading_style: Option<HeadingStyle>,
    pub layout: Option<LayoutType>,
    pub spacing: Option<Spacing>,
    pub alignment: Option<HeaderAlignment>,
    pub separator: Option<String>,
    pub include_photo: Option<bool>,
    pub photo_shape: Option<PhotoShape>,
    pub list_variant: Option<SectionVariant>,
    pub sections: Option<Vec<SectionType>>,
}

impl StyleOverrides {
    pub fn apply(self, mut base: TemplateStyle) -> TemplateStyle {
        let colors = [
            (self.primary_color, &mut base.colors.primary),
            (self.secondary_color, &mut base.colors.secondary),
            (self.accent_color, &mut base.colors.accent),
            (self.background_color, &mut base.colors.background),
            (self.section_bg_color, &mut base.colors.section_bg),
            (self.text_color, &mut base.colors.text),
        ];
        for (value, target) in colors {
            if let Some(color) = value.as_deref().and_then(sanitize_color) {
                *target = color;
            }
        }

        if let Some(family) = self.font_family.filter(|f| !f.trim().is_empty()) {
            base.font_family = family;
        }
        if self.heading_font_family.is_some() {
            base.heading_font_family = self.heading_font_family;
        }
        if let Some(style) = self.heading_style {
            base.heading_style = style;
        }
        if let Some(layout) = self.layout {
            base.layout = layout;
        }
        if let Some(spacing) = self.spacing {
            base.spacing = spacing;
        }
        if let Some(alignment) = self.alignment {
            base.alignment = alignment;
        }
        if let Some(separator) = self.separator {
            base.separator = separator;
        }
        if let Some(include_photo) = self.include_photo {
            base.include_photo = include_photo;
        }
        if let Some(shape) = self.photo_shape {
            base.photo_shape = shape;
        }
        if let Some(variant) = self.list_variant {
            base.list_variant = variant;
        }
        if let Some(sections) = self.sections {
            base.sections = sections
                .into_iter()
                .filter(|s| *s != SectionType::Unknown)
                .collect();
        }
        base
    }
}

fn palette(primary: &str, secondary: &str, accent: &str, section_bg: &str) -> ColorScheme {
    ColorScheme {
        primary: primary.to_string(),
        secondary: secondary.to_string(),
        accent: accent.to_string(),
        section_bg: section_bg.to_string(),
        ..Default::default()
    }
}

fn style(id: &str, name: &str, description: &str) -> TemplateStyle {
    TemplateStyle {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        ..Default::default()
    }
}

/// Built-in templates, `default` first.
pub fn builtin_styles() -> Vec<TemplateStyle> {
    use SectionType::*;

    vec![
        TemplateStyle::default(),
        TemplateStyle {
            colors: palette("#0f766e", "#475569", "#14b8a6", "#e6f4f1"),
            font_family: "Roboto".to_string(),
            heading_style: HeadingStyle::Background,
            layout: LayoutType::SidebarLeft,
            include_photo: true,
            sections: vec![
                Skills,
                Languages,
                Certifications,
                Interests,
                Summary,
                Experience,
                Education,
                Projects,
                Achievements,
            ],
            ..style("modern", "Modern", "Tinted sidebar with photo and skill chips")
        },
        TemplateStyle {
            colors: palette("#111111", "#6b6b6b", "#111111", "#f5f5f5"),
            font_family: "Lato".to_string(),
            heading_style: HeadingStyle::Minimal,
            separator: " · ".to_string(),
            spacing: Spacing::Relaxed,
            ..style("minimal", "Minimal", "Monochrome, generous whitespace")
        },
        TemplateStyle {
            colors: palette("#1b2a4a", "#4a5568", "#b08d57", "#f4f1ea"),
            font_family: "Georgia".to_string(),
            heading_style: HeadingStyle::Border,
            alignment: HeaderAlignment::Center,
            sections: vec![
                Summary,
                Experience,
                Achievements,
                Education,
                Skills,
                Certifications,
                Languages,
            ],
            ..style("executive", "Executive", "Centered serif header for senior roles")
        },
        TemplateStyle {
            colors: palette("#6d28d9", "#6b7280", "#db2777", "#f5f0ff"),
            font_family: "Open Sans".to_string(),
            heading_font_family: Some("Playfair Display".to_string()),
            heading_style: HeadingStyle::Background,
            layout: LayoutType::ModernCard,
            include_photo: true,
            photo_shape: PhotoShape::Rounded,
            list_variant: SectionVariant::Bullet,
            sections: vec![
                Summary,
                Experience,
                Projects,
                Skills,
                Education,
                Achievements,
                Languages,
                Interests,
            ],
            ..style("creative", "Creative", "Card-based sections with a bold palette")
        },
        TemplateStyle {
            colors: palette("#14532d", "#4b5563", "#16a34a", "#ecfdf3"),
            font_family: "Roboto".to_string(),
            heading_font_family: Some("Source Code Pro".to_string()),
            layout: LayoutType::TwoColumn,
            list_variant: SectionVariant::Pipe,
            sections: vec![
                Summary,
                Skills,
                Experience,
                Projects,
                Education,
                Certifications,
                Languages,
            ],
            ..style("technical", "Technical", "Two columns with skills up front")
        },
        TemplateStyle {
            colors: palette("#7f1d1d", "#525252", "#991b1b", "#faf5f5"),
            font_family: "EB Garamond".to_string(),
            alignment: HeaderAlignment::Center,
            sections: vec![
                Summary,
                Education,
                Publications,
                Experience,
                Courses,
                Patents,
                Achievements,
                Languages,
            ],
            ..style("academic", "Academic", "Education and publications first")
        },
        TemplateStyle {
            colors: palette("#3f3f46", "#71717a", "#a16207", "#f7f5f0"),
            font_family: "Merriweather".to_string(),
            heading_style: HeadingStyle::Border,
            layout: LayoutType::SidebarRight,
            include_photo: true,
            ..style("elegant", "Elegant", "Serif typography with a right sidebar")
        },
        TemplateStyle {
            font_family: "Carlito".to_string(),
            heading_style: HeadingStyle::Minimal,
            layout: LayoutType::CompactDense,
            spacing: Spacing::Compact,
            list_variant: SectionVariant::Pipe,
            ..style("compact", "Compact", "Dense single page")
        },
        TemplateStyle {
            colors: palette("#1e3a8a", "#64748b", "#f59e0b", "#eff6ff"),
            font_family: "Open Sans".to_string(),
            layout: LayoutType::Timeline,
            sections: vec![
                Summary,
                Experience,
                Education,
                Projects,
                Certifications,
                Skills,
                Languages,
            ],
            ..style("timeline", "Timeline", "Sections along a vertical timeline")
        },
    ]
}

pub fn builtin_style(id: &str) -> Option<TemplateStyle> {
    builtin_styles().into_iter().find(|s| s.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_builtins_are_unique_and_valid() {
        let styles = builtin_styles();
        assert_eq!(styles.len(), 10);
        assert_eq!(styles[0].id, "default");

        let ids: HashSet<&str> = styles.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids.len(), styles.len());

        for style in &styles {
            let config = style.base_configuration();
            assert!(config.validate().is_ok(), "{} is invalid", style.id);
            assert!(!config.sections.is_empty());
        }
    }

    #[test]
    fn test_sections_fixed_and_enabled() {
        let academic = builtin_style("academic").unwrap();
        let config = academic.base_configuration();
        let types: Vec<SectionType> = config
            .sorted_sections()
            .iter()
            .map(|s| s.section_type)
            .collect();
        assert_eq!(types, academic.sections);
        assert!(config.sections.iter().all(|s| s.enabled));
    }

    #[test]
    fn test_customizations_override_with_fallback() {
        let modern = builtin_style("modern").unwrap();
        let config = modern.to_configuration(&Customizations {
            primary_color: Some("#FF0000".to_string()),
            accent_color: Some("not a color!".to_string()),
            ..Default::default()
        });
        assert_eq!(config.colors.primary, "#ff0000");
        assert_eq!(config.colors.accent, modern.colors.accent);
        assert_eq!(config.fonts.family, "Roboto");
        assert_eq!(config.layout.layout_type, LayoutType::SidebarLeft);
    }

    #[test]
    fn test_list_variant_applies_to_list_sections() {
        let config = builtin_style("technical").unwrap().base_configuration();
        let skills = config
            .sections
            .iter()
            .find(|s| s.section_type == SectionType::Skills)
            .unwrap();
        assert_eq!(skills.variant, SectionVariant::Pipe);

        let compact = builtin_style("compact").unwrap().base_configuration();
        let experience = compact
            .sections
            .iter()
            .find(|s| s.section_type == SectionType::Experience)
            .unwrap();
        assert_eq!(experience.variant, SectionVariant::Compact);
    }

    #[test]
    fn test_overrides_layer_on_base() {
        let overrides: StyleOverrides = toml::from_str(
            r##"
            primary_color = "#123456"
            text_color = "expression(alert(1))"
            layout = "two-column"
            heading_style = "minimal"
            sections = ["summary", "experience", "references"]
            "##,
        )
        .unwrap();

        let base = builtin_style("executive").unwrap();
        let style = overrides.apply(base.clone());
        assert_eq!(style.colors.primary, "#123456");
        assert_eq!(style.colors.text, base.colors.text);
        assert_eq!(style.layout, LayoutType::TwoColumn);
        assert_eq!(style.heading_style, HeadingStyle::Minimal);
        assert_eq!(style.sections, vec![SectionType::Summary, SectionType::Experience]);
        assert_eq!(style.font_family, "Georgia");
    }
}
