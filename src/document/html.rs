//! HTML document adapter
//!
//! Parsing goes through html5ever (via `scraper`), which never fails: it
//! recovers from unclosed tags and stray characters the way browsers do. The
//! parse tree is converted into owned [`Element`]s immediately and dropped.

use super::{Document, Element};
use scraper::{ElementRef, Html};

/// A parsed HTML document
#[derive(Debug, Clone, Default)]
pub struct HtmlDocument {
    roots: Vec<Element>,
}

impl HtmlDocument {
    /// Parses HTML leniently
    ///
    /// The parser always synthesizes an `html/head/body` skeleton. When that
    /// skeleton is all the input produced, the document is reported as empty.
    ///
    /// # Example
    ///
    /// ```
    /// use favicon_scan::document::{Document, HtmlDocument};
    ///
    /// let document = HtmlDocument::parse(r#"<link rel="icon" href="/a.png">"#);
    /// assert_eq!(document.query("/html/head/link").len(), 1);
    ///
    /// assert!(HtmlDocument::parse("").children().is_empty());
    /// ```
    pub fn parse(source: &str) -> Self {
        let html = Html::parse_document(source);
        let root = convert(html.root_element());

        if is_empty_skeleton(&root) {
            return Self::default();
        }

        Self { roots: vec![root] }
    }
}

impl Document for HtmlDocument {
    fn children(&self) -> &[Element] {
        &self.roots
    }
}

fn convert(element: ElementRef<'_>) -> Element {
    let value = element.value();

    Element {
        name: value.name().to_string(),
        attributes: value
            .attrs()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect(),
        children: element.children().filter_map(ElementRef::wrap).map(convert).collect(),
    }
}

/// True for a bare `<html><head></head><body></body></html>` with no attributes
fn is_empty_skeleton(root: &Element) -> bool {
    root.attributes.is_empty()
        && root.children.iter().all(|child| {
            (child.name == "head" || child.name == "body")
                && child.attributes.is_empty()
                && child.children.is_empty()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_head_links() {
        let html = r#"
            <html>
            <head>
                <title>Test</title>
                <link rel="shortcut icon" href="/favicon.ico">
                <link rel="icon" type="image/png" sizes="32x32" href="/32.png">
                <meta name="msapplication-TileImage" content="/tile.png">
            </head>
            <body><p>Hello</p></body>
            </html>
        "#;
        let document = HtmlDocument::parse(html);

        let links = document.query("/html/head/link");
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].attr("rel"), Some("shortcut icon"));
        assert_eq!(links[1].attr("sizes"), Some("32x32"));

        let metas = document.query("/html/head/meta");
        assert_eq!(metas.len(), 1);
        assert_eq!(metas[0].attr("content"), Some("/tile.png"));
    }

    #[test]
    fn test_element_names_and_children() {
        let document = HtmlDocument::parse("<html><head><title>t</title></head><body></body></html>");
        let roots = document.children();
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].name, "html");

        let head = &roots[0].children[0];
        assert_eq!(head.name, "head");
        // Text nodes are not children
        assert_eq!(head.children.len(), 1);
        assert!(head.children[0].children.is_empty());
    }

    #[test]
    fn test_attribute_names_are_lowercased() {
        let document = HtmlDocument::parse(r#"<LINK REL="icon" HREF="/a.png">"#);
        let links = document.query("/html/head/link");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].attr("href"), Some("/a.png"));
    }

    #[test]
    fn test_unclosed_tags_are_recovered() {
        let html = r#"<html><head><link rel="icon" href="/a.png"><meta name="x" content="y"<body><div>"#;
        let document = HtmlDocument::parse(html);
        assert_eq!(document.query("/html/head/link").len(), 1);
    }

    #[test]
    fn test_empty_and_malformed_input_yield_empty_tree() {
        for source in ["", "   ", "<", "<<>>", "<invalid", "just some text"] {
            let document = HtmlDocument::parse(source);
            assert!(document.children().is_empty(), "input {:?}", source);
            assert!(document.query("/html/head/link").is_empty());
        }
    }

    #[test]
    fn test_missing_attribute_is_none() {
        let document = HtmlDocument::parse(r#"<link rel="icon">"#);
        let links = document.query("/html/head/link");
        assert_eq!(links[0].attr("href"), None);
    }
}
