// src/render/mod.rs
//! Résumé rendering: profile + customizations (+ configuration) to a document.
//!
//! Rendering is a pure function. Missing or malformed optional data degrades to
//! omitted content, never to an error.

pub mod fixed;
pub mod header;
pub mod layout;
pub mod node;
pub mod sections;
pub mod style;

use tracing::debug;

use crate::font_validator::FontValidator;
use crate::types::profile::Profile;
use crate::types::resume::Customizations;
use crate::types::template_config::TemplateConfiguration;

pub use fixed::{builtin_style, builtin_styles, StyleOverrides, TemplateStyle};
pub use node::{Document, Element, Node};
pub use style::StyleTokens;

use self::header::render_header;
use self::layout::apply_layout;
use self::sections::{render_section, signature_block, RenderedSection};
use self::style::px;

#[derive(Debug, Clone, Default)]
pub struct Renderer {
    fonts: FontValidator,
}

impl Renderer {
    pub fn new(fonts: FontValidator) -> Self {
        Self { fonts }
    }

    pub fn fonts(&self) -> &FontValidator {
        &self.fonts
    }

    /// Render a profile through an explicit configuration.
    pub fn render_dynamic(
        &self,
        profile: &Profile,
        customizations: &Customizations,
        config: &TemplateConfiguration,
    ) -> Document {
        let config = config.clone().with_customizations(customizations);
        let tokens = StyleTokens::resolve(&config, &self.fonts);

        let header = render_header(profile, &config.header, &tokens);

        let rendered: Vec<RenderedSection> = config
            .sorted_sections()
            .into_iter()
            .filter_map(|section| render_section(section, profile, &tokens))
            .collect();

        debug!(
            "Rendered {} of {} configured sections with {} layout",
            rendered.len(),
            config.sections.len(),
            config.layout.layout_type.as_str()
        );

        let body = apply_layout(&config.layout, rendered, &tokens);

        let mut page = Element::new("div")
            .class("resume-page")
            .attr("data-layout", config.layout.layout_type.as_str())
            .style("font-family", tokens.font_stack.as_str())
            .style("font-size", px(tokens.body_size))
            .style("font-weight", tokens.body_weight.to_string())
            .style("line-height", tokens.line_height.to_string())
            .style("color", tokens.colors.text.as_str())
            .style("background", tokens.colors.background.as_str())
            .style("padding", format!("{}px", tokens.page_padding))
            .style("max-width", "900px")
            .style("margin", "0 auto")
            .style("box-sizing", "border-box")
            .child(header)
            .child(body);

        if let Some(signature) = signature_block(profile, &tokens) {
            page = page.child(signature);
        }

        Document {
            title: document_title(profile),
            body: page.into(),
        }
    }

    /// Render a profile through a fixed template.
    pub fn render_fixed(
        &self,
        style: &TemplateStyle,
        profile: &Profile,
        customizations: &Customizations,
    ) -> Document {
        self.render_dynamic(profile, customizations, &style.base_configuration())
    }
}

fn document_title(profile: &Profile) -> String {
    match profile.full_name() {
        Some(name) => format!("{} - Resume", name),
        None => "Resume".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::template_config::{
        ContactFormat, LayoutType, SectionConfig, SectionType, DEFAULT_SECTION_SEQUENCE,
    };

    fn full_profile() -> Profile {
        serde_json::from_str(
            r#"{
                "personalInfo": {"firstName": "Ada", "lastName": "Lovelace", "title": "Engineer"},
                "contact": {"email": "ada@example.com", "phone": "+44 20 1234",
                            "linkedin": "linkedin.com/in/ada"},
                "summary": "Analytical engine enthusiast.",
                "experience": [{"title": "Analyst", "company": "Babbage & Co", "startDate": "1842"}],
                "education": [{"degree": "Mathematics", "institution": "Home tutoring"}],
                "skills": ["Mathematics", "Programming"],
                "projects": [{"name": "Note G", "description": "First published algorithm"}],
                "certifications": [{"name": "Royal Society Fellow"}],
                "achievements": [{"title": "First program"}],
                "languages": [{"name": "English"}, {"name": "French"}]
            }"#,
        )
        .unwrap()
    }

    fn config(layout_type: LayoutType, sections: Vec<SectionConfig>) -> TemplateConfiguration {
        let mut config = TemplateConfiguration {
            sections,
            ..Default::default()
        };
        config.layout.layout_type = layout_type;
        config
    }

    fn render(profile: &Profile, config: &TemplateConfiguration) -> Document {
        Renderer::default().render_dynamic(profile, &Customizations::default(), config)
    }

    #[test]
    fn test_worked_example_order_and_suppression() {
        let profile: Profile = serde_json::from_str(
            r#"{
                "experience": [],
                "education": [{"degree": "B.Sc.", "institution": "MIT", "startDate": "2015-09"}],
                "skills": [{"name": "Go"}]
            }"#,
        )
        .unwrap();

        let config = config(
            LayoutType::SingleColumn,
            vec![
                SectionConfig::new("edu", SectionType::Education, 1),
                SectionConfig::new("skills", SectionType::Skills, 0),
                SectionConfig::new("exp", SectionType::Experience, 2),
            ],
        );

        let doc = render(&profile, &config);
        assert_eq!(doc.section_order(), vec!["skills", "education"]);
        let html = doc.to_html();
        assert!(!html.contains("data-section=\"experience\""));
        assert!(html.contains("Sep 2015 – Present"));
    }

    #[test]
    fn test_empty_collections_never_render() {
        let empty = Profile::default();
        let doc = render(&empty, &TemplateConfiguration::standard());
        assert!(doc.section_order().is_empty());
        assert!(!doc.to_html().contains("section-heading"));
    }

    #[test]
    fn test_order_independent_of_array_position() {
        let profile = full_profile();
        let mut sections: Vec<SectionConfig> = DEFAULT_SECTION_SEQUENCE
            .iter()
            .enumerate()
            .map(|(i, t)| SectionConfig::new(t.as_str(), *t, (7 - i) as i32))
            .collect();
        let reversed_doc = render(&profile, &config(LayoutType::SingleColumn, sections.clone()));

        sections.reverse();
        let sorted_doc = render(&profile, &config(LayoutType::SingleColumn, sections));

        let expected: Vec<String> = DEFAULT_SECTION_SEQUENCE
            .iter()
            .rev()
            .map(|t| t.as_str().to_string())
            .collect();
        assert_eq!(reversed_doc.section_order(), expected);
        assert_eq!(sorted_doc.section_order(), expected);
    }

    #[test]
    fn test_toggling_enabled_round_trips() {
        let profile = full_profile();
        let mut config = TemplateConfiguration::standard();
        let before = render(&profile, &config);
        assert!(before.section_order().contains(&"skills".to_string()));

        if let Some(skills) = config.sections.iter_mut().find(|s| s.id == "skills") {
            skills.enabled = false;
        }
        let disabled = render(&profile, &config);
        assert!(!disabled.section_order().contains(&"skills".to_string()));

        if let Some(skills) = config.sections.iter_mut().find(|s| s.id == "skills") {
            skills.enabled = true;
        }
        let after = render(&profile, &config);
        assert_eq!(before, after);
        assert_eq!(before.to_html(), after.to_html());
    }

    #[test]
    fn test_two_column_places_each_section_once() {
        let profile = full_profile();
        let mut config = TemplateConfiguration::standard();
        config.layout.layout_type = LayoutType::TwoColumn;
        let doc = render(&profile, &config);

        let columns = doc.columns();
        assert_eq!(columns.len(), 2);
        let flattened: Vec<String> = columns.concat();
        let ids: Vec<String> = DEFAULT_SECTION_SEQUENCE
            .iter()
            .map(|t| t.as_str().to_string())
            .collect();
        assert_eq!(flattened, ids);
        assert_eq!(columns[0].len(), 4);
    }

    #[test]
    fn test_distribution_skips_empty_sections() {
        let mut profile = full_profile();
        profile.projects.clear();
        profile.certifications.clear();
        let mut config = TemplateConfiguration::standard();
        config.layout.layout_type = LayoutType::ThreeColumn;

        let columns = render(&profile, &config).columns();
        assert_eq!(
            columns,
            vec![
                vec!["summary".to_string(), "skills".to_string()],
                vec!["experience".to_string(), "achievements".to_string()],
                vec!["education".to_string(), "languages".to_string()],
            ]
        );
    }

    #[test]
    fn test_inline_separator_and_signature() {
        let mut profile = full_profile();
        profile.signature = serde_json::from_str(r#"{"name": "A. Lovelace"}"#).unwrap();

        let mut config = TemplateConfiguration::standard();
        config.header.separator = " / ".to_string();
        config.header.contact_format = ContactFormat::Inline;
        config.sections.clear();

        let doc = render(&profile, &config);
        let html = doc.to_html();
        assert!(html.contains("ada@example.com</a></span><span class=\"contact-separator\"> / </span>"));
        assert!(doc.body.text_content().contains("ada@example.com / +44 20 1234 / linkedin.com/in/ada"));
        assert!(html.contains("A. Lovelace"));
        assert_eq!(doc.title, "Ada Lovelace - Resume");
    }

    #[test]
    fn test_fixed_template_uses_descriptor_sequence() {
        let profile = full_profile();
        let renderer = Renderer::default();
        let style = builtin_style("executive").unwrap();
        let doc = renderer.render_fixed(
            &style,
            &profile,
            &Customizations {
                primary_color: Some("#123abc".to_string()),
                ..Default::default()
            },
        );

        assert_eq!(
            doc.section_order(),
            vec![
                "summary",
                "experience",
                "achievements",
                "education",
                "skills",
                "certifications",
                "languages"
            ]
        );
        assert!(doc.to_html().contains("#123abc"));
    }

    #[test]
    fn test_every_builtin_renders() {
        let profile = full_profile();
        let renderer = Renderer::default();
        for style in builtin_styles() {
            let doc = renderer.render_fixed(&style, &profile, &Customizations::default());
            assert!(!doc.section_order().is_empty(), "{} rendered nothing", style.id);
            assert!(doc.to_html().contains("Ada Lovelace"));
        }
    }
}
