// src/render/sections.rs
//! Section renderers and heading treatments.
//!
//! Every renderer returns `None` when the backing profile data is empty, so an
//! enabled section with nothing to show never produces an orphan heading.

use tracing::warn;

use super::header::link_href;
use super::node::{Element, Node};
use super::style::{px, StyleTokens};
use crate::image_validator::ImageValidator;
use crate::types::dates::format_range;
use crate::types::profile::{non_blank, Profile};
use crate::types::template_config::{HeadingStyle, SectionConfig, SectionType, SectionVariant};

/// One rendered section, ready for layout distribution.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedSection {
    pub id: String,
    pub section_type: SectionType,
    pub node: Node,
}

/// Render a configured section, or `None` when disabled, unknown, or empty.
pub fn render_section(
    section: &SectionConfig,
    profile: &Profile,
    tokens: &StyleTokens,
) -> Option<RenderedSection> {
    if !section.enabled {
        return None;
    }

    let content = section_content(section, profile, tokens)?;

    let node = Element::new("section")
        .class("resume-section")
        .attr("data-section", section.section_type.as_str())
        .attr("data-section-id", section.id.as_str())
        .style("margin-bottom", format!("{}px", tokens.section_gap))
        .child(section_heading(section.display_label(), section.style, tokens))
        .child(content)
        .into();

    Some(RenderedSection {
        id: section.id.clone(),
        section_type: section.section_type,
        node,
    })
}

fn section_content(section: &SectionConfig, profile: &Profile, tokens: &StyleTokens) -> Option<Node> {
    match section.section_type {
        SectionType::Summary => summary(profile, tokens),
        SectionType::Experience => experience(profile, section.variant, tokens),
        SectionType::Education => education(profile, tokens),
        SectionType::Skills => skills(profile, section.variant, tokens),
        SectionType::Projects => projects(profile, section.variant, tokens),
        SectionType::Certifications => certifications(profile, tokens),
        SectionType::Achievements => achievements(profile, tokens),
        SectionType::Languages => languages(profile, section.variant, tokens),
        SectionType::Courses => courses(profile, tokens),
        SectionType::Publications => publications(profile, tokens),
        SectionType::Patents => patents(profile, tokens),
        SectionType::Interests => interests(profile, section.variant, tokens),
        SectionType::Unknown => {
            warn!("Section '{}' has an unknown type, skipping", section.id);
            None
        }
    }
}

pub fn section_heading(label: &str, style: HeadingStyle, tokens: &StyleTokens) -> Node {
    let heading = Element::new("h2")
        .class("section-heading")
        .attr("data-heading-style", heading_style_name(style))
        .style("font-family", tokens.heading_font_stack.as_str())
        .style("font-size", px(tokens.heading_size))
        .style("font-weight", tokens.heading_weight.to_string())
        .style("color", tokens.colors.primary.as_str())
        .style("margin", "0 0 10px 0");

    let heading = match style {
        HeadingStyle::Underline => heading
            .style("padding-bottom", "4px")
            .style("border-bottom", format!("2px solid {}", tokens.colors.primary)),
        HeadingStyle::Border => heading
            .style("padding", "4px 0")
            .style("border-top", format!("1px solid {}", tokens.colors.primary))
            .style("border-bottom", format!("1px solid {}", tokens.colors.primary)),
        HeadingStyle::Background => heading
            .style("display", "inline-block")
            .style("padding", "4px 10px")
            .style("border-radius", "4px")
            .style("background", tokens.colors.section_bg.as_str()),
        HeadingStyle::Minimal => heading
            .style("text-transform", "uppercase")
            .style("letter-spacing", "0.08em"),
    };

    heading.text(label).into()
}

fn heading_style_name(style: HeadingStyle) -> &'static str {
    match style {
        HeadingStyle::Underline => "underline",
        HeadingStyle::Border => "border",
        HeadingStyle::Background => "background",
        HeadingStyle::Minimal => "minimal",
    }
}

// ===== Shared building blocks =====

struct Entry {
    title: Option<String>,
    /// Target for the title; only http(s) and scheme-less urls are kept.
    link: Option<String>,
    subtitle: Option<String>,
    meta: Option<String>,
    description: Option<String>,
    bullets: Vec<String>,
}

impl Entry {
    fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.subtitle.is_none()
            && self.meta.is_none()
            && self.description.is_none()
            && self.bullets.is_empty()
    }
}

fn owned(value: &Option<String>) -> Option<String> {
    non_blank(value).map(str::to_string)
}

fn joined(parts: &[Option<&str>], separator: &str) -> Option<String> {
    let parts: Vec<&str> = parts.iter().flatten().copied().collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(separator))
    }
}

fn entry_node(entry: Entry, tokens: &StyleTokens) -> Node {
    let mut head_text = Element::new("div").class("entry-title");
    if let Some(title) = entry.title {
        let strong = Element::new("strong")
            .style("font-weight", tokens.heading_weight.to_string())
            .text(title);
        head_text = match entry.link.as_deref().and_then(link_href) {
            Some(href) => head_text.child(
                Element::new("a")
                    .attr("href", href)
                    .style("color", "inherit")
                    .style("text-decoration", "none")
                    .child(strong),
            ),
            None => head_text.child(strong),
        };
    }
    if let Some(subtitle) = entry.subtitle {
        head_text = head_text.child(
            Element::new("div")
                .class("entry-subtitle")
                .style("color", tokens.colors.secondary.as_str())
                .text(subtitle),
        );
    }

    let mut head = Element::new("div")
        .class("entry-head")
        .style("display", "flex")
        .style("justify-content", "space-between")
        .style("gap", "12px")
        .child(head_text);
    if let Some(meta) = entry.meta {
        head = head.child(
            Element::new("span")
                .class("entry-meta")
                .style("font-size", px(tokens.small_size))
                .style("color", tokens.colors.secondary.as_str())
                .style("white-space", "nowrap")
                .text(meta),
        );
    }

    let mut block = Element::new("div")
        .class("entry")
        .style("margin-bottom", format!("{}px", tokens.item_gap))
        .child(head);

    if let Some(description) = entry.description {
        block = block.child(
            Element::new("p")
                .class("entry-description")
                .style("margin", "4px 0 0 0")
                .text(description),
        );
    }
    if !entry.bullets.is_empty() {
        block = block.child(
            Element::new("ul")
                .style("margin", "4px 0 0 0")
                .style("padding-left", "18px")
                .children(entry.bullets.into_iter().map(|b| Element::new("li").text(b))),
        );
    }

    block.into()
}

fn entry_list(entries: Vec<Entry>, tokens: &StyleTokens) -> Option<Node> {
    let nodes: Vec<Node> = entries
        .into_iter()
        .filter(|e| !e.is_empty())
        .map(|e| entry_node(e, tokens))
        .collect();

    if nodes.is_empty() {
        None
    } else {
        Some(Element::new("div").class("entries").children(nodes).into())
    }
}

fn inline_list(items: Vec<String>, separator: &str, class: &str) -> Option<Node> {
    if items.is_empty() {
        return None;
    }
    Some(
        Element::new("p")
            .class(class)
            .style("margin", "0")
            .text(items.join(separator))
            .into(),
    )
}

fn list_separator(variant: SectionVariant) -> &'static str {
    match variant {
        SectionVariant::Pipe => " | ",
        _ => " • ",
    }
}

// ===== Section renderers =====

fn summary(profile: &Profile, tokens: &StyleTokens) -> Option<Node> {
    let text = non_blank(&profile.summary)?;
    Some(
        Element::new("p")
            .class("summary")
            .style("margin", "0")
            .style("color", tokens.colors.text.as_str())
            .text(text)
            .into(),
    )
}

fn experience(profile: &Profile, variant: SectionVariant, tokens: &StyleTokens) -> Option<Node> {
    let compact = variant == SectionVariant::Compact;
    let entries = profile
        .experience
        .iter()
        .map(|exp| Entry {
            title: owned(&exp.title),
            link: None,
            subtitle: joined(&[non_blank(&exp.company), non_blank(&exp.location)], " · "),
            meta: format_range(exp.start_date.as_ref(), exp.end_date.as_ref(), exp.current),
            description: if compact { None } else { owned(&exp.description) },
            bullets: if compact {
                Vec::new()
            } else {
                exp.highlights
                    .iter()
                    .map(|h| h.trim())
                    .filter(|h| !h.is_empty())
                    .map(str::to_string)
                    .collect()
            },
        })
        .collect();
    entry_list(entries, tokens)
}

fn education(profile: &Profile, tokens: &StyleTokens) -> Option<Node> {
    let entries = profile
        .education
        .iter()
        .map(|edu| {
            let gpa = non_blank(&edu.gpa).map(|g| format!("GPA: {}", g));
            Entry {
                title: joined(&[non_blank(&edu.degree), non_blank(&edu.field)], ", "),
                link: None,
                subtitle: joined(&[non_blank(&edu.institution), non_blank(&edu.location)], " · "),
                meta: format_range(edu.start_date.as_ref(), edu.end_date.as_ref(), edu.current),
                description: joined(&[gpa.as_deref(), non_blank(&edu.description)], " · "),
                bullets: Vec::new(),
            }
        })
        .collect();
    entry_list(entries, tokens)
}

fn skills(profile: &Profile, variant: SectionVariant, _tokens: &StyleTokens) -> Option<Node> {
    let items: Vec<String> = profile
        .skills
        .iter()
        .filter_map(|skill| {
            let name = non_blank(&skill.name)?;
            match (variant, non_blank(&skill.level)) {
                (SectionVariant::Detailed, Some(level)) => Some(format!("{} ({})", name, level)),
                _ => Some(name.to_string()),
            }
        })
        .collect();
    inline_list(items, list_separator(variant), "skills")
}

fn projects(profile: &Profile, variant: SectionVariant, tokens: &StyleTokens) -> Option<Node> {
    let compact = variant == SectionVariant::Compact;
    let entries = profile
        .projects
        .iter()
        .map(|p| {
            let technologies: Vec<&str> = p
                .technologies
                .iter()
                .map(|t| t.trim())
                .filter(|t| !t.is_empty())
                .collect();
            Entry {
                title: owned(&p.name),
                link: owned(&p.url),
                subtitle: if technologies.is_empty() {
                    None
                } else {
                    Some(technologies.join(", "))
                },
                meta: format_range(p.start_date.as_ref(), p.end_date.as_ref(), false),
                description: if compact { None } else { owned(&p.description) },
                bullets: Vec::new(),
            }
        })
        .collect();
    entry_list(entries, tokens)
}

fn certifications(profile: &Profile, tokens: &StyleTokens) -> Option<Node> {
    let entries = profile
        .certifications
        .iter()
        .map(|c| Entry {
            title: owned(&c.name),
            link: None,
            subtitle: joined(
                &[
                    non_blank(&c.issuer),
                    non_blank(&c.credential_id),
                ],
                " · ",
            ),
            meta: match (&c.date, &c.expiry_date) {
                (Some(d), Some(e)) => Some(format!("{} – {}", d, e)),
                (Some(d), None) => Some(d.to_string()),
                (None, Some(e)) => Some(format!("Expires {}", e)),
                (None, None) => None,
            },
            description: None,
            bullets: Vec::new(),
        })
        .collect();
    entry_list(entries, tokens)
}

fn achievements(profile: &Profile, tokens: &StyleTokens) -> Option<Node> {
    let entries = profile
        .achievements
        .iter()
        .map(|a| Entry {
            title: owned(&a.title),
            link: None,
            subtitle: None,
            meta: a.date.as_ref().map(|d| d.to_string()),
            description: owned(&a.description),
            bullets: Vec::new(),
        })
        .collect();
    entry_list(entries, tokens)
}

fn languages(profile: &Profile, variant: SectionVariant, _tokens: &StyleTokens) -> Option<Node> {
    let items: Vec<String> = profile
        .languages
        .iter()
        .filter_map(|l| {
            let name = non_blank(&l.name)?;
            Some(match non_blank(&l.proficiency) {
                Some(level) => format!("{} ({})", name, level),
                None => name.to_string(),
            })
        })
        .collect();
    inline_list(items, list_separator(variant), "languages")
}

fn courses(profile: &Profile, tokens: &StyleTokens) -> Option<Node> {
    let entries = profile
        .courses
        .iter()
        .map(|c| Entry {
            title: owned(&c.name),
            link: None,
            subtitle: owned(&c.institution),
            meta: c.date.as_ref().map(|d| d.to_string()),
            description: None,
            bullets: Vec::new(),
        })
        .collect();
    entry_list(entries, tokens)
}

fn publications(profile: &Profile, tokens: &StyleTokens) -> Option<Node> {
    let entries = profile
        .publications
        .iter()
        .map(|p| Entry {
            title: owned(&p.title),
            link: None,
            subtitle: joined(&[non_blank(&p.publisher), non_blank(&p.url)], " · "),
            meta: p.date.as_ref().map(|d| d.to_string()),
            description: None,
            bullets: Vec::new(),
        })
        .collect();
    entry_list(entries, tokens)
}

fn patents(profile: &Profile, tokens: &StyleTokens) -> Option<Node> {
    let entries = profile
        .patents
        .iter()
        .map(|p| Entry {
            title: owned(&p.title),
            link: None,
            subtitle: owned(&p.number),
            meta: p.date.as_ref().map(|d| d.to_string()),
            description: None,
            bullets: Vec::new(),
        })
        .collect();
    entry_list(entries, tokens)
}

fn interests(profile: &Profile, variant: SectionVariant, _tokens: &StyleTokens) -> Option<Node> {
    let items: Vec<String> = profile
        .interests
        .iter()
        .filter_map(|i| non_blank(&i.name).map(str::to_string))
        .collect();
    let separator = match variant {
        SectionVariant::Default => ", ",
        other => list_separator(other),
    };
    inline_list(items, separator, "interests")
}

/// Signature block rendered after all sections whenever the profile has one.
pub fn signature_block(profile: &Profile, tokens: &StyleTokens) -> Option<Node> {
    let signature = profile.signature()?;

    let mut block = Element::new("div")
        .class("signature")
        .style("margin-top", format!("{}px", tokens.section_gap))
        .style("display", "flex")
        .style("flex-direction", "column")
        .style("align-items", "flex-end");

    if let Some(url) = ImageValidator::accept(signature.image_url.as_deref()) {
        block = block.child(
            Element::new("img")
                .class("signature-image")
                .attr("src", url)
                .attr("alt", "Signature")
                .style("max-height", "60px"),
        );
    }
    if let Some(name) = non_blank(&signature.name) {
        block = block.child(
            Element::new("div")
                .class("signature-name")
                .style("font-weight", tokens.heading_weight.to_string())
                .text(name),
        );
    }

    let date = signature.date.as_ref().map(|d| d.long_form());
    if let Some(line) = joined(&[non_blank(&signature.place), date.as_deref()], ", ") {
        block = block.child(
            Element::new("div")
                .class("signature-place-date")
                .style("font-size", px(tokens.small_size))
                .style("color", tokens.colors.secondary.as_str())
                .text(line),
        );
    }

    Some(block.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font_validator::FontValidator;
    use crate::types::template_config::TemplateConfiguration;

    fn tokens() -> StyleTokens {
        StyleTokens::resolve(&TemplateConfiguration::standard(), &FontValidator::default())
    }

    fn profile() -> Profile {
        serde_json::from_str(
            r#"{
                "summary": "Builds reliable systems.",
                "experience": [
                    {"title": "Staff Engineer", "company": "Acme", "startDate": "2019-03",
                     "current": true, "description": "Led the platform team.",
                     "highlights": ["Cut p99 latency by 40%", "  "]}
                ],
                "education": [{"degree": "B.Sc.", "institution": "MIT", "startDate": "2015-09"}],
                "skills": [{"name": "Rust", "level": "Expert"}, {"name": "Go"}, {"name": " "}],
                "languages": [{"name": "English", "proficiency": "Native"}, {"language": "French"}],
                "interests": ["Chess", "Climbing"],
                "signature": {"name": "Ada Lovelace", "place": "London", "date": "2024-05-01"}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_skills_separator_by_variant() {
        let p = profile();
        let bullet = SectionConfig::new("s", SectionType::Skills, 0);
        let node = render_section(&bullet, &p, &tokens()).unwrap().node;
        assert!(node.text_content().ends_with("Rust • Go"));

        let pipe = bullet.clone().with_variant(SectionVariant::Pipe);
        let node = render_section(&pipe, &p, &tokens()).unwrap().node;
        assert!(node.text_content().ends_with("Rust | Go"));

        let detailed = bullet.with_variant(SectionVariant::Detailed);
        let node = render_section(&detailed, &p, &tokens()).unwrap().node;
        assert!(node.text_content().ends_with("Rust (Expert) • Go"));
    }

    #[test]
    fn test_experience_entry_content() {
        let p = profile();
        let section = SectionConfig::new("exp", SectionType::Experience, 0);
        let node = render_section(&section, &p, &tokens()).unwrap().node;
        let text = node.text_content();
        assert!(text.contains("Staff Engineer"));
        assert!(text.contains("Acme"));
        assert!(text.contains("Mar 2019 – Present"));
        assert!(text.contains("Led the platform team."));
        assert_eq!(node.find_all(|e| e.tag == "li").len(), 1);

        let compact = section.with_variant(SectionVariant::Compact);
        let node = render_section(&compact, &p, &tokens()).unwrap().node;
        assert!(!node.text_content().contains("Led the platform team."));
        assert!(node.find_all(|e| e.tag == "li").is_empty());
    }

    #[test]
    fn test_empty_data_suppresses_section() {
        let p = profile();
        for section_type in [
            SectionType::Projects,
            SectionType::Certifications,
            SectionType::Achievements,
            SectionType::Courses,
            SectionType::Publications,
            SectionType::Patents,
        ] {
            let section = SectionConfig::new("x", section_type, 0);
            assert!(render_section(&section, &p, &tokens()).is_none());
        }

        let mut blank = p.clone();
        blank.summary = Some("   ".to_string());
        let section = SectionConfig::new("sum", SectionType::Summary, 0);
        assert!(render_section(&section, &blank, &tokens()).is_none());
    }

    #[test]
    fn test_disabled_and_unknown_render_nothing() {
        let p = profile();
        let disabled = SectionConfig::new("sum", SectionType::Summary, 0).disabled();
        assert!(render_section(&disabled, &p, &tokens()).is_none());

        let unknown = SectionConfig::new("ref", SectionType::Unknown, 0);
        assert!(render_section(&unknown, &p, &tokens()).is_none());
    }

    #[test]
    fn test_section_markers_and_label() {
        let p = profile();
        let section = SectionConfig::new("langs", SectionType::Languages, 0).with_label("Idiomas");
        let rendered = render_section(&section, &p, &tokens()).unwrap();
        assert_eq!(rendered.node.attr("data-section"), Some("languages"));
        assert_eq!(rendered.node.attr("data-section-id"), Some("langs"));
        let text = rendered.node.text_content();
        assert!(text.starts_with("Idiomas"));
        assert!(text.ends_with("English (Native) • French"));
    }

    #[test]
    fn test_heading_styles() {
        let t = tokens();
        let underline = section_heading("X", HeadingStyle::Underline, &t);
        let e = underline.as_element().unwrap();
        assert!(e.get_style("border-bottom").is_some());
        assert!(e.get_style("border-top").is_none());

        let border = section_heading("X", HeadingStyle::Border, &t);
        let e = border.as_element().unwrap();
        assert!(e.get_style("border-top").is_some());
        assert!(e.get_style("border-bottom").is_some());

        let chip = section_heading("X", HeadingStyle::Background, &t);
        assert_eq!(
            chip.as_element().unwrap().get_style("background"),
            Some(t.colors.section_bg.as_str())
        );

        let minimal = section_heading("X", HeadingStyle::Minimal, &t);
        let e = minimal.as_element().unwrap();
        assert!(e.get_style("border-bottom").is_none());
        assert!(e.get_style("background").is_none());
    }

    #[test]
    fn test_interests_and_signature() {
        let p = profile();
        let section = SectionConfig::new("i", SectionType::Interests, 0);
        let node = render_section(&section, &p, &tokens()).unwrap().node;
        assert!(node.text_content().ends_with("Chess, Climbing"));

        let signature = signature_block(&p, &tokens()).unwrap();
        assert_eq!(signature.text_content(), "Ada LovelaceLondon, 1 May 2024");
    }

    #[test]
    fn test_project_name_links_to_url() {
        let p: Profile = serde_json::from_str(
            r#"{"projects": [
                {"name": "Engine", "url": "github.com/ada/engine"},
                {"name": "Notes", "url": "javascript:alert(1)"},
                {"name": "Loom"}
            ]}"#,
        )
        .unwrap();
        let section = SectionConfig::new("p", SectionType::Projects, 0);
        let node = render_section(&section, &p, &tokens()).unwrap().node;

        let anchors = node.find_all(|e| e.tag == "a");
        assert_eq!(anchors.len(), 1);
        assert_eq!(anchors[0].get_attr("href"), Some("https://github.com/ada/engine"));
        assert_eq!(Node::from(anchors[0].clone()).text_content(), "Engine");
        assert!(node.find_all(|e| e.tag == "li").is_empty());
        assert!(!node.text_content().contains("javascript"));
        assert!(node.text_content().contains("Notes"));
    }
}
