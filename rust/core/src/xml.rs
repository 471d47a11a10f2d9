// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Survey XML reader on top of quick-xml
//!
//! Survey exports only carry data in attributes, so this reader builds an
//! element tree of names and attribute bags and drops text content.
//! Comments, CDATA, processing instructions and declarations are skipped.

use quick_xml::events::{BytesStart, Event};
use quick_xml::errors::SyntaxError;
use quick_xml::Reader;

use crate::attributes::AttributeBag;
use crate::error::{Error, Result};

/// An element of a parsed survey document.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub name: String,
    pub attributes: AttributeBag,
    pub children: Vec<Element>,
    /// Byte offset of the start tag in the source text.
    pub offset: usize,
}

impl Element {
    /// Returns the raw value of an attribute.
    #[inline]
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key)
    }

    /// Direct children with the given element name, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// All elements below this one in document (pre-)order, excluding itself.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.children.iter().rev().collect(),
        }
    }

    /// Equivalent of the `.//container/child` path: every `child` element
    /// directly under any `container` element at any depth.
    pub fn select<'a>(
        &'a self,
        container: &'a str,
        child: &'a str,
    ) -> impl Iterator<Item = &'a Element> + 'a {
        self.descendants()
            .filter(move |e| e.name == container)
            .flat_map(move |e| e.children_named(child))
    }
}

/// Pre-order iterator over the descendants of an [`Element`].
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        self.stack.extend(next.children.iter().rev());
        Some(next)
    }
}

fn syntax(offset: usize, message: impl Into<String>) -> Error {
    Error::Syntax {
        offset,
        message: message.into(),
    }
}

/// Maps a reader error to the markup construct it was reading.
fn markup_error(error: quick_xml::Error, offset: usize) -> Error {
    let construct = match &error {
        quick_xml::Error::Syntax(SyntaxError::UnclosedComment) => "comment",
        quick_xml::Error::Syntax(SyntaxError::UnclosedCData) => "CDATA section",
        quick_xml::Error::Syntax(SyntaxError::UnclosedPIOrXmlDecl) => "processing instruction",
        quick_xml::Error::Syntax(SyntaxError::UnclosedDoctype) => "declaration",
        _ => return syntax(offset, error.to_string()),
    };
    Error::Unterminated { construct, offset }
}

fn utf8(bytes: &[u8], offset: usize) -> Result<String> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|_| syntax(offset, "name is not valid UTF-8"))
}

/// Builds an element from a start or empty tag. Attribute values have their
/// entity and character references resolved; a value with an unknown
/// reference is kept as written.
fn element(start: &BytesStart<'_>, offset: usize) -> Result<Element> {
    let mut attributes = AttributeBag::new();
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|e| syntax(offset, e.to_string()))?;
        let key = utf8(attribute.key.as_ref(), offset)?;
        let value = match attribute.unescape_value() {
            Ok(value) => value.into_owned(),
            Err(_) => String::from_utf8_lossy(&attribute.value).into_owned(),
        };
        attributes.insert(key, value);
    }

    Ok(Element {
        name: utf8(start.name().as_ref(), offset)?,
        attributes,
        children: Vec::new(),
        offset,
    })
}

fn attach(
    element: Element,
    stack: &mut [Element],
    root: &mut Option<Element>,
    offset: usize,
) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
        return Ok(());
    }
    if root.is_some() {
        return Err(syntax(offset, "more than one root element"));
    }
    *root = Some(element);
    Ok(())
}

/// Parses survey XML into its root [`Element`].
///
/// # Example
///
/// ```
/// use roofline_core::parse_xml;
///
/// let root = parse_xml(r#"<SURVEY><POINTS><POINT ID="P1" DATA="0,0"/></POINTS></SURVEY>"#).unwrap();
/// let point = root.select("POINTS", "POINT").next().unwrap();
/// assert_eq!(point.attr("DATA"), Some("0,0"));
/// ```
pub fn parse_xml(input: &str) -> Result<Element> {
    let content = input.strip_prefix('\u{feff}').unwrap_or(input);
    let bom = input.len() - content.len();

    let mut reader = Reader::from_str(content);
    // Close tags are matched against the element stack below.
    reader.config_mut().check_end_names = false;
    reader.config_mut().allow_unmatched_ends = true;

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let at = bom + reader.buffer_position() as usize;
        let event = reader.read_event().map_err(|e| markup_error(e, at))?;

        match event {
            Event::Start(start) => stack.push(element(&start, at)?),
            Event::Empty(start) => {
                let element = element(&start, at)?;
                attach(element, &mut stack, &mut root, at)?;
            }
            Event::End(end) => {
                let name = utf8(end.name().as_ref(), at)?;
                let element = stack.pop().ok_or_else(|| Error::UnexpectedClose {
                    name: name.clone(),
                    offset: at,
                })?;
                if element.name != name {
                    return Err(Error::MismatchedTag {
                        expected: element.name,
                        found: name,
                        offset: at,
                    });
                }
                attach(element, &mut stack, &mut root, at)?;
            }
            Event::Text(text) => {
                if stack.is_empty() && !text.iter().all(u8::is_ascii_whitespace) {
                    return Err(syntax(at, "text outside the root element"));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.pop() {
        return Err(Error::UnclosedElement {
            name: open.name,
            offset: open.offset,
        });
    }

    root.ok_or(Error::NoRootElement)
}
