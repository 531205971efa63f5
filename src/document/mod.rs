//! Document adapters for HTML and XML
//!
//! Both adapters parse leniently into the same owned [`Element`] tree and
//! answer the restricted path queries the extractors need:
//!
//! - `/html/head/link` walks element names from the document root
//! - `/browserconfig/msapplication/tile/*` matches every child of `tile`
//! - `/html/head/link[@rel='manifest']` filters a step on one attribute value
//!
//! Malformed input never fails to parse; at worst it yields an empty tree.

mod html;
mod xml;

pub use html::HtmlDocument;
pub use xml::XmlDocument;

use std::collections::HashMap;

/// An element node with its attributes and element children
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: HashMap<String, String>,
    pub children: Vec<Element>,
}

impl Element {
    /// Returns an attribute value by name
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// A parsed document that can be queried by path
pub trait Document {
    /// Element children of the document root
    fn children(&self) -> &[Element];

    /// Returns every element matching `path`, in document order
    ///
    /// An unparsable path matches nothing.
    fn query(&self, path: &str) -> Vec<&Element> {
        query_elements(self.children(), path)
    }
}

/// One step of a path query
#[derive(Debug, PartialEq, Eq)]
struct Step<'a> {
    name: &'a str,
    predicate: Option<(&'a str, &'a str)>,
}

impl Step<'_> {
    fn matches(&self, element: &Element) -> bool {
        let name_matches = self.name == "*" || element.name.eq_ignore_ascii_case(self.name);
        name_matches
            && self
                .predicate
                .map_or(true, |(key, value)| element.attr(key) == Some(value))
    }
}

fn query_elements<'a>(roots: &'a [Element], path: &str) -> Vec<&'a Element> {
    let Some(steps) = parse_path(path) else {
        return Vec::new();
    };

    let mut candidates: Vec<&Element> = roots.iter().collect();
    let mut matched: Vec<&Element> = Vec::new();

    for (index, step) in steps.iter().enumerate() {
        matched = candidates
            .into_iter()
            .filter(|element| step.matches(element))
            .collect();

        if index + 1 < steps.len() {
            candidates = matched
                .iter()
                .flat_map(|element| element.children.iter())
                .collect();
        } else {
            break;
        }
    }

    matched
}

/// Parses an absolute path into steps
fn parse_path(path: &str) -> Option<Vec<Step<'_>>> {
    let rest = path.trim().strip_prefix('/')?;
    if rest.is_empty() {
        return None;
    }

    rest.split('/').map(parse_step).collect()
}

/// Parses `name` or `name[@attr='value']`
fn parse_step(segment: &str) -> Option<Step<'_>> {
    let Some((name, predicate)) = segment.split_once('[') else {
        return (!segment.is_empty()).then_some(Step {
            name: segment,
            predicate: None,
        });
    };

    if name.is_empty() {
        return None;
    }

    let (key, value) = predicate
        .strip_suffix(']')?
        .strip_prefix('@')?
        .split_once('=')?;
    let value = strip_quotes(value.trim())?;

    Some(Step {
        name,
        predicate: Some((key.trim(), value)),
    })
}

fn strip_quotes(value: &str) -> Option<&str> {
    value
        .strip_prefix('\'')
        .and_then(|v| v.strip_suffix('\''))
        .or_else(|| value.strip_prefix('"').and_then(|v| v.strip_suffix('"')))
}
