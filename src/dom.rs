//! Minimal namespace-aware XML element tree
//!
//! Geometry validation needs three things from a document: the namespace of
//! an element and of its parent, the attributes and text of GML elements, and
//! a way to re-stream a single geometry subtree. This module builds a small
//! owned tree with quick-xml that provides exactly that.

use std::collections::HashMap;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::{Error, Result};

/// Default buffer capacity for XML parsing (4KB)
const XML_BUFFER_CAPACITY: usize = 4096;

/// Extract local name from potentially namespaced XML name
///
/// # Examples
///
/// - `"gml:posList"` returns `"posList"`
/// - `"srsName"` returns `"srsName"`
pub(crate) fn get_local_name(name_str: &str) -> &str {
    if let Some(pos) = name_str.rfind(':') {
        &name_str[pos + 1..]
    } else {
        name_str
    }
}

fn get_prefix(name_str: &str) -> Option<&str> {
    name_str.rfind(':').map(|pos| &name_str[..pos])
}

/// A child node of an element
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Nested element
    Element(Element),
    /// Character data (already trimmed)
    Text(String),
}

/// An XML element with resolved namespace
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Qualified name as written (`gml:Polygon`)
    pub name: String,
    /// Namespace URI the element's prefix resolves to
    pub namespace: Option<String>,
    /// Attributes in document order, keyed by qualified name
    pub attributes: Vec<(String, String)>,
    /// Child nodes in document order
    pub children: Vec<Node>,
}

impl Element {
    /// Create an element without attributes or children
    pub fn new(name: impl Into<String>, namespace: Option<String>) -> Self {
        Self {
            name: name.into(),
            namespace,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Local name of the element (`Polygon` for `gml:Polygon`)
    pub fn local_name(&self) -> &str {
        get_local_name(&self.name)
    }

    /// Namespace URI of the element
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Get an attribute value by its local name, regardless of prefix
    ///
    /// Namespace declarations are never matched.
    pub fn attribute(&self, local_name: &str) -> Option<&str> {
        self.attributes.iter().find_map(|(key, value)| {
            if !is_namespace_declaration(key) && get_local_name(key) == local_name {
                Some(value.as_str())
            } else {
                None
            }
        })
    }

    /// Get an attribute value by local name, treating an empty value as absent
    pub fn non_empty_attribute(&self, local_name: &str) -> Option<&str> {
        self.attribute(local_name).filter(|v| !v.is_empty())
    }

    /// Set an attribute, replacing an existing one with the same qualified name
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(slot) = self.attributes.iter_mut().find(|(key, _)| *key == name) {
            slot.1 = value;
        } else {
            self.attributes.push((name, value));
        }
    }

    /// The `gml:id` of this element (any attribute with local name `id`)
    pub fn gml_id(&self) -> Option<&str> {
        self.attribute("id")
    }

    /// Iterate over child elements
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// Iterate mutably over child elements
    pub fn child_elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().filter_map(|node| match node {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// First child element with the given local name
    pub fn child(&self, local_name: &str) -> Option<&Element> {
        self.child_elements().find(|e| e.local_name() == local_name)
    }

    /// Concatenated direct text content
    pub fn text(&self) -> String {
        let mut text = String::new();
        for node in &self.children {
            if let Node::Text(t) = node {
                if !text.is_empty() {
                    text.push(' ');
                }
                text.push_str(t);
            }
        }
        text
    }

    /// Copy an attribute into every descendant with one of the given local
    /// names that does not carry it yet
    ///
    /// Returns the number of elements that received the attribute. The
    /// element itself is not modified.
    pub fn inherit_attribute(&mut self, target_names: &[&str], name: &str, value: &str) -> usize {
        let mut count = 0;
        for child in self.child_elements_mut() {
            if target_names.contains(&child.local_name())
                && child.attribute(get_local_name(name)).is_none()
            {
                child.set_attribute(name, value);
                count += 1;
            }
            count += child.inherit_attribute(target_names, name, value);
        }
        count
    }
}

/// Position of an element in a document: the element and its ancestors
#[derive(Debug, Clone, Copy)]
pub struct ElementPath<'a> {
    /// Ancestors from the document element down to the parent
    pub ancestors: &'a [&'a Element],
    /// The element itself
    pub current: &'a Element,
}

impl<'a> ElementPath<'a> {
    /// Path of a standalone element without ancestors
    pub fn root(current: &'a Element) -> Self {
        Self {
            ancestors: &[],
            current,
        }
    }

    /// The parent element, if any
    pub fn parent(&self) -> Option<&'a Element> {
        self.ancestors.last().copied()
    }

    /// The nearest `gml:id`, starting at the current element and walking up
    pub fn nearest_id(&self) -> Option<&'a str> {
        self.current
            .gml_id()
            .or_else(|| self.ancestors.iter().rev().find_map(|e| e.gml_id()))
    }
}

fn is_namespace_declaration(key: &str) -> bool {
    key == "xmlns" || key.starts_with("xmlns:")
}

/// A parsed XML document
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// The document element
    pub root: Element,
}

impl Document {
    /// Parse an XML document into an element tree
    ///
    /// DTD declarations are rejected. Namespace prefixes are resolved against
    /// the declarations in scope; an undeclared prefix is an error, except for
    /// the reserved `xml` prefix.
    pub fn parse(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::with_capacity(XML_BUFFER_CAPACITY);
        let mut stack: Vec<Element> = Vec::new();
        let mut scopes: Vec<HashMap<String, String>> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            let event_result = reader.read_event_into(&mut buf);
            let is_empty_element = matches!(&event_result, Ok(Event::Empty(_)));

            match event_result {
                Ok(Event::DocType(_)) => {
                    return Err(Error::InvalidXml(
                        "DTD declarations are not allowed".to_string(),
                    ));
                }
                Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                    if root.is_some() {
                        return Err(Error::InvalidXml(
                            "Content after the document element".to_string(),
                        ));
                    }
                    let (element, scope) = start_element(e, scopes.last())?;
                    if is_empty_element {
                        attach(&mut stack, &mut root, element);
                    } else {
                        stack.push(element);
                        scopes.push(scope);
                    }
                }
                Ok(Event::End(ref e)) => {
                    let name = std::str::from_utf8(e.name().as_ref())
                        .map_err(|e| Error::InvalidXml(e.to_string()))?
                        .to_string();
                    let element = stack.pop().ok_or_else(|| {
                        Error::invalid_xml_element(&name, "End tag without matching start tag")
                    })?;
                    scopes.pop();
                    if element.name != name {
                        return Err(Error::invalid_xml_element(
                            &element.name,
                            &format!("Mismatched end tag '</{}>'", name),
                        ));
                    }
                    attach(&mut stack, &mut root, element);
                }
                Ok(Event::Text(ref t)) => {
                    let text = std::str::from_utf8(t).map_err(|e| Error::InvalidXml(e.to_string()))?;
                    push_text(&mut stack, text);
                }
                Ok(Event::CData(ref t)) => {
                    let text = std::str::from_utf8(t).map_err(|e| Error::InvalidXml(e.to_string()))?;
                    push_text(&mut stack, text);
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        if let Some(open) = stack.last() {
            return Err(Error::invalid_xml_element(
                &open.name,
                "Unexpected end of document inside element",
            ));
        }

        root.map(|root| Document { root })
            .ok_or_else(|| Error::InvalidXml("Document has no root element".to_string()))
    }
}

fn push_text(stack: &mut [Element], text: &str) {
    let text = text.trim();
    if let Some(parent) = stack.last_mut() {
        if !text.is_empty() {
            parent.children.push(Node::Text(text.to_string()));
        }
    }
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(Node::Element(element)),
        None => *root = Some(element),
    }
}

fn start_element(
    e: &BytesStart,
    parent_scope: Option<&HashMap<String, String>>,
) -> Result<(Element, HashMap<String, String>)> {
    let name = std::str::from_utf8(e.name().as_ref())
        .map_err(|e| Error::InvalidXml(e.to_string()))?
        .to_string();

    let mut scope = parent_scope.cloned().unwrap_or_default();
    let mut attributes = Vec::with_capacity(8);

    for attr in e.attributes() {
        let attr = attr?;
        let key =
            std::str::from_utf8(attr.key.as_ref()).map_err(|e| Error::InvalidXml(e.to_string()))?;
        let value =
            std::str::from_utf8(&attr.value).map_err(|e| Error::InvalidXml(e.to_string()))?;
        let value = unescape_attribute(value);

        if key == "xmlns" {
            scope.insert(String::new(), value.clone());
        } else if let Some(prefix) = key.strip_prefix("xmlns:") {
            scope.insert(prefix.to_string(), value.clone());
        }
        attributes.push((key.to_string(), value));
    }

    let namespace = match get_prefix(&name) {
        Some("xml") => Some("http://www.w3.org/XML/1998/namespace".to_string()),
        Some(prefix) => Some(scope.get(prefix).cloned().ok_or_else(|| {
            Error::invalid_xml_element(&name, &format!("Undeclared namespace prefix '{}'", prefix))
        })?),
        None => scope.get("").filter(|uri| !uri.is_empty()).cloned(),
    };

    let mut element = Element::new(name, namespace);
    element.attributes = attributes;
    Ok((element, scope))
}

/// Replace the predefined XML entities in an attribute value
fn unescape_attribute(value: &str) -> String {
    if !value.contains('&') {
        return value.to_string();
    }
    value
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
