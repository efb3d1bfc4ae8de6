// src/render/layout.rs
//! Layout strategies: distribute rendered sections into columns.
//!
//! Distribution is positional over the sorted, rendered sections. It does not
//! weigh section length, so long and short sections may land unevenly.

use super::node::{Element, Node};
use super::sections::RenderedSection;
use super::style::StyleTokens;
use crate::types::template_config::{LayoutConfig, LayoutType};

/// Column index lists for `count` sections under the given layout.
///
/// Every index in `0..count` appears in exactly one column, and indices are
/// ascending within each column.
pub fn distribute(layout: &LayoutConfig, count: usize) -> Vec<Vec<usize>> {
    match layout.layout_type {
        LayoutType::SingleColumn
        | LayoutType::ModernCard
        | LayoutType::Timeline
        | LayoutType::CompactDense => vec![(0..count).collect()],
        LayoutType::TwoColumn => split_at(count, count.div_ceil(2)),
        LayoutType::TwoColumnWide => split_at(count, (count * 7).div_ceil(10)),
        LayoutType::SidebarLeft => {
            let sidebar = layout.sidebar_sections.min(count);
            split_at(count, sidebar)
        }
        LayoutType::SidebarRight => {
            let sidebar = layout.sidebar_sections.min(count);
            split_at(count, count - sidebar)
        }
        LayoutType::ThreeColumn => {
            let mut columns = vec![Vec::new(), Vec::new(), Vec::new()];
            for i in 0..count {
                columns[i % 3].push(i);
            }
            columns
        }
    }
}

fn split_at(count: usize, at: usize) -> Vec<Vec<usize>> {
    vec![(0..at).collect(), (at..count).collect()]
}

/// Width and tint for each column of a layout, left to right.
fn column_specs(layout_type: LayoutType, columns: usize) -> Vec<(&'static str, bool)> {
    match layout_type {
        LayoutType::TwoColumn => vec![("50%", false), ("50%", false)],
        LayoutType::TwoColumnWide => vec![("70%", false), ("30%", false)],
        LayoutType::SidebarLeft => vec![("32%", true), ("68%", false)],
        LayoutType::SidebarRight => vec![("68%", false), ("32%", true)],
        LayoutType::ThreeColumn => vec![("33.33%", false); 3],
        _ => vec![("100%", false); columns],
    }
}

fn wrap_card(node: Node, tokens: &StyleTokens) -> Node {
    Element::new("div")
        .class("section-card")
        .style("border", format!("1px solid {}", tokens.colors.section_bg))
        .style("border-radius", "8px")
        .style("padding", "16px 20px")
        .style("margin-bottom", format!("{}px", tokens.section_gap))
        .style("box-shadow", "0 1px 3px rgba(0, 0, 0, 0.08)")
        .child(node)
        .into()
}

fn wrap_timeline_item(node: Node, tokens: &StyleTokens) -> Node {
    Element::new("div")
        .class("timeline-item")
        .style("position", "relative")
        .child(
            Element::new("span")
                .class("timeline-dot")
                .style("position", "absolute")
                .style("left", "-27px")
                .style("top", "4px")
                .style("width", "12px")
                .style("height", "12px")
                .style("border-radius", "50%")
                .style("background", tokens.colors.accent.as_str()),
        )
        .child(node)
        .into()
}

/// Arrange rendered sections according to the layout type.
pub fn apply_layout(layout: &LayoutConfig, sections: Vec<RenderedSection>, tokens: &StyleTokens) -> Node {
    let layout_type = layout.layout_type;
    let distribution = distribute(layout, sections.len());
    let mut slots: Vec<Option<Node>> = sections.into_iter().map(|s| Some(s.node)).collect();
    let specs = column_specs(layout_type, distribution.len());
    let multi_column = distribution.len() > 1;

    let columns = distribution.into_iter().enumerate().map(|(index, members)| {
        let (width, tinted) = specs.get(index).copied().unwrap_or(("100%", false));
        let class = if tinted { "layout-column sidebar" } else { "layout-column" };
        let mut column = Element::new("div")
            .class(class)
            .attr("data-column", index.to_string());

        if multi_column {
            column = column.style("width", width).style("box-sizing", "border-box");
        }
        if tinted {
            column = column
                .style("background", tokens.colors.section_bg.as_str())
                .style("padding", "16px")
                .style("border-radius", "6px");
        }
        if layout_type == LayoutType::Timeline {
            column = column
                .style("border-left", format!("2px solid {}", tokens.colors.primary))
                .style("padding-left", "20px")
                .style("margin-left", "6px");
        }

        let nodes = members.into_iter().filter_map(|i| slots.get_mut(i).and_then(Option::take));
        match layout_type {
            LayoutType::ModernCard => column.children(nodes.map(|n| wrap_card(n, tokens))),
            LayoutType::Timeline => column.children(nodes.map(|n| wrap_timeline_item(n, tokens))),
            _ => column.children(nodes),
        }
    });
    let columns: Vec<Element> = columns.collect();

    let mut container = Element::new("div")
        .class("layout")
        .attr("data-layout", layout_type.as_str());
    if multi_column {
        container = container
            .style("display", "flex")
            .style("gap", "24px")
            .style("align-items", "flex-start");
    }

    container.children(columns).into()
}
