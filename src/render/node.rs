// src/render/node.rs
//! Render tree produced by every template.
//!
//! Templates build `Node` values instead of strings so that layouts can move
//! whole sections around and callers can inspect the result (section order,
//! column membership, text) before serializing to HTML.

use std::fmt::Write;

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
    Fragment(Vec<Node>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: &'static str,
    pub attrs: Vec<(String, String)>,
    pub styles: Vec<(&'static str, String)>,
    pub children: Vec<Node>,
}

const VOID_TAGS: [&str; 4] = ["img", "br", "hr", "meta"];

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            styles: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn class(self, class: &str) -> Self {
        self.attr("class", class)
    }

    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attrs.push((name.to_string(), value.into()));
        self
    }

    pub fn style(mut self, property: &'static str, value: impl Into<String>) -> Self {
        self.styles.push((property, value.into()));
        self
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    pub fn children<I, N>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.children.extend(nodes.into_iter().map(Into::into));
        self
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn get_style(&self, property: &str) -> Option<&str> {
        self.styles
            .iter()
            .find(|(k, _)| *k == property)
            .map(|(_, v)| v.as_str())
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(e) => Some(e),
            _ => None,
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.as_element().and_then(|e| e.get_attr(name))
    }

    /// Concatenated text of this node and its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(t) => out.push_str(t),
            Node::Element(e) => e.children.iter().for_each(|c| c.collect_text(out)),
            Node::Fragment(nodes) => nodes.iter().for_each(|c| c.collect_text(out)),
        }
    }

    /// Pre-order list of elements matching the predicate.
    pub fn find_all<'a, F>(&'a self, pred: F) -> Vec<&'a Element>
    where
        F: Fn(&Element) -> bool,
    {
        let mut found = Vec::new();
        self.walk(&pred, &mut found);
        found
    }

    fn walk<'a, F>(&'a self, pred: &F, found: &mut Vec<&'a Element>)
    where
        F: Fn(&Element) -> bool,
    {
        match self {
            Node::Text(_) => {}
            Node::Element(e) => {
                if pred(e) {
                    found.push(e);
                }
                for child in &e.children {
                    child.walk(pred, found);
                }
            }
            Node::Fragment(nodes) => {
                for child in nodes {
                    child.walk(pred, found);
                }
            }
        }
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Text(t) => out.push_str(&escape_html(t)),
            Node::Fragment(nodes) => nodes.iter().for_each(|n| n.write_html(out)),
            Node::Element(e) => {
                out.push('<');
                out.push_str(e.tag);
                for (name, value) in &e.attrs {
                    let _ = write!(out, " {}=\"{}\"", name, escape_html(value));
                }
                if !e.styles.is_empty() {
                    let css = e
                        .styles
                        .iter()
                        .map(|(k, v)| format!("{}: {}", k, v))
                        .collect::<Vec<_>>()
                        .join("; ");
                    let _ = write!(out, " style=\"{}\"", escape_html(&css));
                }
                out.push('>');
                if VOID_TAGS.contains(&e.tag) {
                    return;
                }
                for child in &e.children {
                    child.write_html(out);
                }
                let _ = write!(out, "</{}>", e.tag);
            }
        }
    }
}

fn escape_html(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '&' => "&amp;".to_string(),
            '<' => "&lt;".to_string(),
            '>' => "&gt;".to_string(),
            '"' => "&quot;".to_string(),
            '\'' => "&#39;".to_string(),
            _ => c.to_string(),
        })
        .collect()
}

/// A complete rendered résumé.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub title: String,
    pub body: Node,
}

impl Document {
    /// Section types in the order they appear in the output.
    pub fn section_order(&self) -> Vec<String> {
        self.body
            .find_all(|e| e.get_attr("data-section").is_some())
            .into_iter()
            .filter_map(|e| e.get_attr("data-section").map(str::to_string))
            .collect()
    }

    /// Section ids grouped by layout column, in column order.
    pub fn columns(&self) -> Vec<Vec<String>> {
        self.body
            .find_all(|e| e.get_attr("data-column").is_some())
            .into_iter()
            .map(|column| {
                Node::Element(column.clone())
                    .find_all(|e| e.get_attr("data-section-id").is_some())
                    .into_iter()
                    .filter_map(|e| e.get_attr("data-section-id").map(str::to_string))
                    .collect()
            })
            .collect()
    }

    /// Full standalone HTML page.
    pub fn to_html(&self) -> String {
        format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body style=\"margin: 0\">\n{}\n</body>\n</html>\n",
            escape_html(&self.title),
            self.body.to_html()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escaping() {
        let node: Node = Element::new("p")
            .attr("title", "a \"quoted\" <b>")
            .text("Tom & Jerry <script>")
            .into();
        assert_eq!(
            node.to_html(),
            "<p title=\"a &quot;quoted&quot; &lt;b&gt;\">Tom &amp; Jerry &lt;script&gt;</p>"
        );
    }

    #[test]
    fn test_styles_and_void_tags() {
        let node: Node = Element::new("img")
            .attr("src", "me.png")
            .style("width", "80px")
            .style("border-radius", "50%")
            .into();
        assert_eq!(
            node.to_html(),
            "<img src=\"me.png\" style=\"width: 80px; border-radius: 50%\">"
        );
    }

    #[test]
    fn test_text_content_and_find_all() {
        let node: Node = Element::new("div")
            .child(Element::new("span").class("a").text("one"))
            .child(Node::Fragment(vec![
                Node::text(" "),
                Element::new("span").class("a").text("two").into(),
            ]))
            .into();
        assert_eq!(node.text_content(), "one two");
        assert_eq!(node.find_all(|e| e.get_attr("class") == Some("a")).len(), 2);
    }

    #[test]
    fn test_document_page() {
        let doc = Document {
            title: "Ada <CV>".to_string(),
            body: Element::new("main").into(),
        };
        let html = doc.to_html();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Ada &lt;CV&gt;</title>"));
        assert!(html.contains("<main></main>"));
    }
}
