//! Minimal element tree for Jenkins job-configuration fragments.
//!
//! Jenkins stores SCM sources as nested XML where traits of different kinds
//! sit side by side under one `<traits>` parent. The tree here keeps exactly
//! what that dialect needs:
//!   - children in insertion order, names not required to be unique
//!   - attributes in insertion order
//!   - an optional text value
//!
//! Lookups by name return the first match, mirroring how the plugins read
//! their own configuration. Parents own their children; there are no back
//! references.
//!
//! Text I/O goes through `quick-xml`: [`Element::parse`] reads the first root
//! element of a fragment and the `Display` impl writes it back out with
//! two-space indentation.

use std::fmt;

use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::DecodeError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<Element>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Text content, or the empty string when the element carries none.
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    pub fn has_text(&self) -> bool {
        self.text.is_some()
    }

    pub fn set_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.text = Some(text.into());
        self
    }

    /// Sets an attribute, replacing the value in place if the key exists.
    pub fn create_attr(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let key = key.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((key, value)),
        }
        self
    }

    pub fn select_attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Appends a new child and hands back a mutable reference to it.
    pub fn create_element(&mut self, name: impl Into<String>) -> &mut Element {
        self.add_child(Element::new(name))
    }

    pub fn add_child(&mut self, child: Element) -> &mut Element {
        self.children.push(child);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    /// First child with the given name.
    pub fn select_element(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Reads the first root element of an XML fragment.
    ///
    /// Declarations, comments and processing instructions are skipped, as is
    /// the indentation between sibling elements. Leaf text is kept verbatim.
    /// Anything after the first root element is ignored.
    pub fn parse(fragment: &str) -> Result<Element, DecodeError> {
        let mut reader = Reader::from_str(fragment);

        let mut stack: Vec<Element> = Vec::new();
        loop {
            let event = reader
                .read_event()
                .map_err(|e| DecodeError::Xml(e.to_string()))?;
            match event {
                Event::Start(start) => stack.push(element_from_start(&start)?),
                Event::Empty(start) => {
                    let element = element_from_start(&start)?;
                    match stack.last_mut() {
                        Some(parent) => {
                            parent.add_child(element);
                        }
                        None => return Ok(element),
                    }
                }
                Event::Text(text) => {
                    let text = text
                        .unescape()
                        .map_err(|e| DecodeError::Xml(e.to_string()))?;
                    append_text(&mut stack, &text);
                }
                Event::CData(data) => {
                    let raw = data.into_inner();
                    append_text(&mut stack, &String::from_utf8_lossy(&raw));
                }
                Event::End(_) => {
                    let Some(mut done) = stack.pop() else {
                        return Err(DecodeError::Xml("unbalanced closing tag".to_string()));
                    };
                    done.drop_layout_text();
                    match stack.last_mut() {
                        Some(parent) => {
                            parent.add_child(done);
                        }
                        None => return Ok(done),
                    }
                }
                Event::Eof => {
                    return match stack.first() {
                        Some(open) => Err(DecodeError::Xml(format!(
                            "unexpected end of input inside <{}>",
                            open.name
                        ))),
                        None => Err(DecodeError::MissingRoot),
                    };
                }
                _ => {}
            }
        }
    }

    /// Clears whitespace-only text on an element that has children.
    fn drop_layout_text(&mut self) {
        if self.children.is_empty() {
            return;
        }
        if self.text.as_deref().is_some_and(|t| t.trim().is_empty()) {
            self.text = None;
        }
    }

    fn write_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let indent = "  ".repeat(depth);
        write!(f, "{indent}<{}", self.name)?;
        for (key, value) in &self.attributes {
            write!(f, " {key}=\"{}\"", escape(value.as_str()))?;
        }
        if self.children.is_empty() {
            return match self.text.as_deref() {
                Some(text) if !text.is_empty() => {
                    writeln!(f, ">{}</{}>", escape(text), self.name)
                }
                _ => writeln!(f, "/>"),
            };
        }
        writeln!(f, ">")?;
        if let Some(text) = self.text.as_deref().filter(|t| !t.is_empty()) {
            writeln!(f, "{indent}  {}", escape(text))?;
        }
        for child in &self.children {
            child.write_indented(f, depth + 1)?;
        }
        writeln!(f, "{indent}</{}>", self.name)
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_indented(f, 0)
    }
}

fn element_from_start(start: &BytesStart<'_>) -> Result<Element, DecodeError> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut element = Element::new(name);
    for attr in start.attributes() {
        let attr = attr.map_err(|e| DecodeError::Xml(e.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| DecodeError::Xml(e.to_string()))?;
        element.create_attr(key, value.into_owned());
    }
    Ok(element)
}

fn append_text(stack: &mut [Element], text: &str) {
    if let Some(current) = stack.last_mut() {
        match current.text.as_mut() {
            Some(existing) => existing.push_str(text),
            None => current.text = Some(text.to_string()),
        }
    }
}
