//! XML document adapter
//!
//! Built on the `quick-xml` event reader. Mismatched and stray end tags are
//! tolerated and elements still open at end of input are closed. Any other
//! syntax error discards the document, leaving an empty tree.

use super::{Document, Element};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;

/// A parsed XML document
#[derive(Debug, Clone, Default)]
pub struct XmlDocument {
    roots: Vec<Element>,
}

impl XmlDocument {
    /// Parses XML leniently
    ///
    /// Element names are lowercased. Duplicate attributes resolve to the last
    /// declaration; a value that fails to unescape becomes the empty string.
    pub fn parse(source: &str) -> Self {
        let source = source.trim_start_matches('\u{feff}');
        let mut reader = Reader::from_str(source);
        let config = reader.config_mut();
        config.check_end_names = false;
        config.allow_unmatched_ends = true;

        let mut stack: Vec<Element> = Vec::new();
        let mut roots: Vec<Element> = Vec::new();

        loop {
            match reader.read_event() {
                Ok(Event::Start(start)) => stack.push(element_from(&start)),
                Ok(Event::Empty(start)) => attach(&mut stack, &mut roots, element_from(&start)),
                Ok(Event::End(_)) => {
                    if let Some(element) = stack.pop() {
                        attach(&mut stack, &mut roots, element);
                    }
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => {
                    tracing::debug!(
                        "Discarding malformed XML at byte {}: {}",
                        reader.buffer_position(),
                        e
                    );
                    return Self::default();
                }
            }
        }

        while let Some(element) = stack.pop() {
            attach(&mut stack, &mut roots, element);
        }

        Self { roots }
    }
}

impl Document for XmlDocument {
    fn children(&self) -> &[Element] {
        &self.roots
    }
}

/// Appends a closed element to its parent, or to the roots at top level
fn attach(stack: &mut [Element], roots: &mut Vec<Element>, element: Element) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => roots.push(element),
    }
}

fn element_from(start: &BytesStart<'_>) -> Element {
    let name = String::from_utf8_lossy(start.local_name().as_ref()).to_lowercase();

    let mut attributes = HashMap::new();
    for attribute in start.attributes().with_checks(false) {
        let Ok(attribute) = attribute else {
            break;
        };
        let key = String::from_utf8_lossy(attribute.key.local_name().as_ref()).into_owned();
        let value = attribute
            .unescape_value()
            .map(|value| value.into_owned())
            .unwrap_or_default();
        attributes.insert(key, value);
    }

    Element {
        name,
        attributes,
        children: Vec::new(),
    }
}
