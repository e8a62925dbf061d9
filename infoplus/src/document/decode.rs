//! XML decoding into a generic element tree.

use std::io::Read;

use xml::reader::{EventReader, ParserConfig as XmlConfig, XmlEvent};

use crate::error::ParseError;

/// A decoded element with its attributes, children and text.
///
/// Names are local names; the namespace URI is kept separately so that the
/// document family can be checked without caring about prefixes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub namespace: Option<String>,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Element>,
    pub text: String,
}

impl Element {
    /// Returns the value of the attribute with the given local name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Decode one complete document from `source`.
///
/// Comments and processing instructions are dropped and text is trimmed.
/// Documents nested deeper than `max_depth` elements are rejected. The
/// whole buffer is read: anything after the root element fails.
pub fn decode<R: Read>(source: R, max_depth: usize) -> Result<Element, ParseError> {
    let config = XmlConfig::new()
        .trim_whitespace(true)
        .cdata_to_characters(true)
        .ignore_comments(true);
    let mut events = EventReader::new_with_config(source, config);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match events.next().map_err(ParseError::xml)? {
            XmlEvent::StartElement {
                name, attributes, ..
            } => {
                if root.is_some() {
                    return Err(ParseError::decode(format!(
                        "element {} after the root element",
                        name.local_name
                    )));
                }
                if stack.len() >= max_depth {
                    return Err(ParseError::decode(format!(
                        "element {} exceeds maximum depth of {max_depth}",
                        name.local_name
                    )));
                }
                stack.push(Element {
                    name: name.local_name,
                    namespace: name.namespace,
                    attributes: attributes
                        .into_iter()
                        .map(|attr| (attr.name.local_name, attr.value))
                        .collect(),
                    children: Vec::new(),
                    text: String::new(),
                });
            }
            XmlEvent::EndElement { .. } => {
                let done = stack
                    .pop()
                    .ok_or_else(|| ParseError::decode("end of element without start"))?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(done),
                    None => root = Some(done),
                }
            }
            XmlEvent::Characters(text) | XmlEvent::CData(text) => match stack.last_mut() {
                Some(current) => current.text.push_str(&text),
                None => return Err(ParseError::decode("text outside the root element")),
            },
            XmlEvent::EndDocument => {
                return root.ok_or_else(|| ParseError::decode("document has no root element"));
            }
            _ => {}
        }
    }
}
