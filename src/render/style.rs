// src/render/style.rs
//! Global style tokens, resolved once per render from the configuration.

use crate::font_validator::FontValidator;
use crate::types::resume::{FontSize, Spacing};
use crate::types::template_config::{ColorScheme, FontWeight, LayoutType, TemplateConfiguration};

#[derive(Debug, Clone, PartialEq)]
pub struct StyleTokens {
    pub colors: ColorScheme,
    pub font_stack: String,
    pub heading_font_stack: String,
    pub name_size: f32,
    pub title_size: f32,
    pub heading_size: f32,
    pub body_size: f32,
    pub small_size: f32,
    pub body_weight: u16,
    pub heading_weight: u16,
    pub name_weight: u16,
    pub line_height: f32,
    pub page_padding: u32,
    pub section_gap: u32,
    pub item_gap: u32,
}

const DENSE_FONT_SCALE: f32 = 0.85;
const DENSE_LINE_HEIGHT: f32 = 1.25;

impl StyleTokens {
    pub fn resolve(config: &TemplateConfiguration, fonts: &FontValidator) -> Self {
        let font_stack = fonts.resolve(&config.fonts.family).stack;
        let heading_font_stack = match config.fonts.heading_family.as_deref() {
            Some(family) if !family.trim().is_empty() => fonts.resolve(family).stack,
            _ => font_stack.clone(),
        };

        let mut scale = match config.fonts.size {
            FontSize::Small => 0.9,
            FontSize::Medium => 1.0,
            FontSize::Large => 1.1,
        };

        let (body_weight, heading_weight, name_weight) = match config.fonts.weight {
            FontWeight::Light => (300, 500, 600),
            FontWeight::Normal => (400, 600, 700),
            FontWeight::Bold => (500, 700, 800),
        };

        let (mut line_height, page_padding, section_gap, item_gap) = match config.spacing.scale {
            Spacing::Compact => (1.35, 28, 14, 8),
            Spacing::Normal => (1.5, 40, 22, 12),
            Spacing::Relaxed => (1.7, 52, 30, 16),
        };

        if config.layout.layout_type == LayoutType::CompactDense {
            scale *= DENSE_FONT_SCALE;
            line_height = DENSE_LINE_HEIGHT;
        }

        Self {
            colors: config.colors.clone(),
            font_stack,
            heading_font_stack,
            name_size: 30.0 * scale,
            title_size: 16.0 * scale,
            heading_size: 15.0 * scale,
            body_size: 13.0 * scale,
            small_size: 11.5 * scale,
            body_weight,
            heading_weight,
            name_weight,
            line_height,
            page_padding,
            section_gap,
            item_gap,
        }
    }
}

/// CSS pixel value with at most one decimal.
pub fn px(value: f32) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{}px", rounded as i64)
    } else {
        format!("{:.1}px", rounded)
    }
}
