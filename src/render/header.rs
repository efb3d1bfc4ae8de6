// src/render/header.rs
//! Header block: photo, name, title and the contact line.

use super::node::{Element, Node};
use super::style::{px, StyleTokens};
use crate::image_validator::ImageValidator;
use crate::types::profile::{non_blank, Profile};
use crate::types::template_config::{ContactFormat, HeaderAlignment, HeaderConfig, PhotoShape};

#[derive(Debug, Clone, PartialEq)]
pub struct ContactItem {
    pub kind: &'static str,
    pub text: String,
    pub href: Option<String>,
}

/// Present contact items, in display order, honoring the include flags.
pub fn contact_items(profile: &Profile, header: &HeaderConfig) -> Vec<ContactItem> {
    let contact = &profile.contact;
    let mut items = Vec::new();

    if header.include_contact {
        if let Some(email) = non_blank(&contact.email) {
            items.push(ContactItem {
                kind: "email",
                text: email.to_string(),
                href: Some(format!("mailto:{}", email)),
            });
        }
        if let Some(phone) = non_blank(&contact.phone) {
            items.push(ContactItem {
                kind: "phone",
                text: phone.to_string(),
                href: Some(format!("tel:{}", phone.replace(' ', ""))),
            });
        }
        if let Some(phone) = non_blank(&contact.alternate_phone) {
            items.push(ContactItem {
                kind: "alternate-phone",
                text: phone.to_string(),
                href: Some(format!("tel:{}", phone.replace(' ', ""))),
            });
        }
        if let Some(address) = contact.address.as_ref().and_then(|a| a.display()) {
            items.push(ContactItem {
                kind: "address",
                text: address,
                href: None,
            });
        }
    }

    if header.include_links {
        let links = [
            ("website", &contact.website),
            ("linkedin", &contact.linkedin),
            ("github", &contact.github),
            ("portfolio", &contact.portfolio),
        ];
        for (kind, value) in links {
            if let Some(url) = non_blank(value) {
                items.push(ContactItem {
                    kind,
                    text: display_url(url),
                    href: link_href(url),
                });
            }
        }
    }

    items
}

fn display_url(url: &str) -> String {
    let trimmed = url
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_start_matches("www.");
    trimmed.trim_end_matches('/').to_string()
}

pub(crate) fn link_href(url: &str) -> Option<String> {
    let lower = url.to_lowercase();
    if lower.starts_with("https://") || lower.starts_with("http://") {
        Some(url.to_string())
    } else if lower.contains(':') {
        None
    } else {
        Some(format!("https://{}", url))
    }
}

fn contact_node(item: &ContactItem, tokens: &StyleTokens) -> Node {
    let span = Element::new("span")
        .class("contact-item")
        .attr("data-contact", item.kind);
    match &item.href {
        Some(href) => span
            .child(
                Element::new("a")
                    .attr("href", href.as_str())
                    .style("color", tokens.colors.text.as_str())
                    .style("text-decoration", "none")
                    .text(item.text.as_str()),
            )
            .into(),
        None => span.text(item.text.as_str()).into(),
    }
}

fn contact_block(items: &[ContactItem], header: &HeaderConfig, tokens: &StyleTokens) -> Option<Node> {
    if items.is_empty() {
        return None;
    }

    let block = match header.contact_format {
        ContactFormat::Inline => {
            let mut line = Element::new("div")
                .class("contact-line")
                .style("font-size", px(tokens.small_size))
                .style("color", tokens.colors.secondary.as_str())
                .style("margin-top", "6px");
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    line = line.child(
                        Element::new("span")
                            .class("contact-separator")
                            .text(header.separator.as_str()),
                    );
                }
                line = line.child(contact_node(item, tokens));
            }
            line
        }
        ContactFormat::Stacked => Element::new("div")
            .class("contact-stack")
            .style("font-size", px(tokens.small_size))
            .style("color", tokens.colors.secondary.as_str())
            .style("margin-top", "6px")
            .children(items.iter().map(|item| {
                Element::new("div")
                    .class("contact-row")
                    .child(contact_node(item, tokens))
            })),
    };

    Some(block.into())
}

fn photo_node(url: &str, header: &HeaderConfig) -> Node {
    let radius = match header.photo_shape {
        PhotoShape::Circle => "50%",
        PhotoShape::Rounded => "12%",
        PhotoShape::Square => "0",
    };
    let size = format!("{}px", header.photo_size);

    Element::new("img")
        .class("profile-photo")
        .attr("src", url)
        .attr("alt", "Profile photo")
        .style("width", size.clone())
        .style("height", size)
        .style("object-fit", "cover")
        .style("border-radius", radius)
        .style("flex-shrink", "0")
        .into()
}

pub fn render_header(profile: &Profile, header: &HeaderConfig, tokens: &StyleTokens) -> Node {
    let mut text = Element::new("div").class("header-text");

    if header.include_name {
        if let Some(name) = profile.full_name() {
            text = text.child(
                Element::new("h1")
                    .class("name")
                    .style("margin", "0")
                    .style("font-family", tokens.heading_font_stack.as_str())
                    .style("font-size", px(tokens.name_size))
                    .style("font-weight", tokens.name_weight.to_string())
                    .style("color", tokens.colors.primary.as_str())
                    .text(name),
            );
        }
    }

    if header.include_title {
        if let Some(title) = non_blank(&profile.personal_info.title) {
            text = text.child(
                Element::new("div")
                    .class("title")
                    .style("font-size", px(tokens.title_size))
                    .style("color", tokens.colors.accent.as_str())
                    .style("margin-top", "2px")
                    .text(title),
            );
        }
    }

    let items = contact_items(profile, header);
    if let Some(block) = contact_block(&items, header, tokens) {
        text = text.child(block);
    }

    let centered = header.alignment == HeaderAlignment::Center;
    let mut block = Element::new("header")
        .class("resume-header")
        .style("display", "flex")
        .style("align-items", "center")
        .style("gap", "20px")
        .style("margin-bottom", format!("{}px", tokens.section_gap));
    if centered {
        block = block
            .style("flex-direction", "column")
            .style("text-align", "center");
    }

    let photo = if header.include_photo {
        ImageValidator::accept(profile.personal_info.photo_url.as_deref())
    } else {
        None
    };
    if let Some(url) = photo {
        block = block.child(photo_node(url, header));
    }

    block.child(text).into()
}
