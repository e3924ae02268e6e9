// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Ordered, namespace-preserving XML tree
//!
//! A deliberately small DOM: enough structure to clone a CityGML document,
//! prune feature containers, graft a reference-point subtree into a building
//! and write the result back out with stable indentation. Namespace
//! declarations are kept verbatim as attributes so a deep copy serializes
//! byte-identically to its source (modulo whitespace).

use std::io::{BufRead, Write};
use std::path::Path;

use quick_xml::events::{BytesDecl, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::error::{Error, Result};
use crate::namespace::{classify_local, local_name, ElementRole};

/// A single `name="value"` attribute, order-preserving.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    /// Qualified attribute name as written (e.g. `gml:id`, `xmlns:bldg`)
    pub name: String,
    /// Unescaped attribute value
    pub value: String,
}

/// A child of an element: nested element or character data.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// One element subtree. `Clone` is a deep copy; there is no sharing.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Qualified tag name as written (e.g. `bldg:Building`)
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Node>,
}

impl Element {
    /// Create an element with no attributes or children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Local part of the tag name, namespace prefix ignored.
    #[inline]
    pub fn local_name(&self) -> &str {
        local_name(&self.name)
    }

    /// Semantic role of this element, derived from the local tag name.
    #[inline]
    pub fn role(&self) -> ElementRole {
        classify_local(self.local_name())
    }

    /// Value of the attribute with the given qualified name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Set an attribute, replacing an existing one with the same name.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|a| a.name == name) {
            Some(existing) => existing.value = value,
            None => self.attributes.push(Attribute { name, value }),
        }
    }

    /// Append a child element.
    pub fn push_element(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    /// Append character data.
    pub fn push_text(&mut self, text: impl Into<String>) {
        self.children.push(Node::Text(text.into()));
    }

    /// Direct child elements in document order.
    pub fn children_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// Concatenated direct text content.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for node in &self.children {
            if let Node::Text(t) = node {
                out.push_str(t);
            }
        }
        out
    }

    /// All descendant elements with the given role, in document order.
    /// The element itself is not considered.
    pub fn find_descendants(&self, role: ElementRole) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect_descendants(role, &mut found);
        found
    }

    fn collect_descendants<'a>(&'a self, role: ElementRole, out: &mut Vec<&'a Element>) {
        for child in self.children_elements() {
            if child.role() == role {
                out.push(child);
            }
            child.collect_descendants(role, out);
        }
    }

    /// Drop child elements for which `keep` returns false. Text nodes are
    /// retained.
    pub fn retain_child_elements(&mut self, mut keep: impl FnMut(&Element) -> bool) {
        self.children.retain(|n| match n {
            Node::Element(e) => keep(e),
            Node::Text(_) => true,
        });
    }
}

/// A parsed document: the root element plus the encoding label from the
/// source declaration (informational; output is always UTF-8).
#[derive(Debug, Clone)]
pub struct Document {
    pub root: Element,
    pub source_encoding: Option<String>,
}

impl Document {
    /// Parse a document from a buffered reader.
    pub fn parse<R: BufRead>(reader: R) -> Result<Self> {
        let mut xml = Reader::from_reader(reader);
        xml.config_mut().trim_text(true);

        let mut buf = Vec::new();
        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;
        let mut source_encoding: Option<String> = None;

        loop {
            match xml.read_event_into(&mut buf)? {
                Event::Decl(decl) => {
                    if let Some(enc) = decl.encoding() {
                        let enc = enc?;
                        source_encoding = Some(xml.decoder().decode(&enc)?.into_owned());
                    }
                }
                Event::Start(start) => {
                    let element = read_element(&xml, &start)?;
                    stack.push(element);
                }
                Event::Empty(start) => {
                    let element = read_element(&xml, &start)?;
                    attach(&mut stack, &mut root, element);
                }
                Event::End(_) => {
                    let element = stack.pop().ok_or(Error::NoRoot)?;
                    attach(&mut stack, &mut root, element);
                }
                Event::Text(text) => {
                    if let Some(parent) = stack.last_mut() {
                        let raw = xml.decoder().decode(text.as_ref())?.into_owned();
                        let unescaped =
                            quick_xml::escape::unescape(&raw).map_err(quick_xml::Error::from)?;
                        parent.push_text(unescaped.into_owned());
                    }
                }
                Event::CData(data) => {
                    if let Some(parent) = stack.last_mut() {
                        parent.push_text(xml.decoder().decode(data.as_ref())?.into_owned());
                    }
                }
                Event::Eof => break,
                // Comments, PIs and doctype carry nothing the pipeline needs.
                _ => {}
            }
            buf.clear();
        }

        Ok(Self {
            root: root.ok_or(Error::NoRoot)?,
            source_encoding,
        })
    }

    /// Parse a document from a string slice.
    pub fn parse_str(xml: &str) -> Result<Self> {
        Self::parse(xml.as_bytes())
    }

    /// Parse a document from a file.
    pub fn parse_file(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::parse(std::io::BufReader::new(file))
    }

    /// Serialize with an XML declaration and 2-space indentation.
    /// Elements whose only content is text are written inline.
    pub fn write_to<W: Write>(&self, sink: W) -> Result<()> {
        let mut writer = Writer::new_with_indent(sink, b' ', 2);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        write_element(&mut writer, &self.root)?;
        Ok(())
    }

    /// Serialize to a file at `path`.
    pub fn write_file(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let mut sink = std::io::BufWriter::new(file);
        self.write_to(&mut sink)?;
        sink.flush()?;
        Ok(())
    }

    /// Serialize to an in-memory string.
    pub fn to_xml_string(&self) -> Result<String> {
        let mut out = Vec::new();
        self.write_to(&mut out)?;
        // The writer only ever emits UTF-8.
        Ok(String::from_utf8(out).expect("writer produced invalid UTF-8"))
    }
}

fn read_element<R>(xml: &Reader<R>, start: &BytesStart<'_>) -> Result<Element> {
    let name = xml.decoder().decode(start.name().as_ref())?.into_owned();
    let mut element = Element::new(name);
    for attr in start.attributes() {
        let attr = attr?;
        let key = xml.decoder().decode(attr.key.as_ref())?.into_owned();
        let raw = xml.decoder().decode(&attr.value)?.into_owned();
        let value = quick_xml::escape::unescape(&raw).map_err(quick_xml::Error::from)?;
        element.attributes.push(Attribute {
            name: key,
            value: value.into_owned(),
        });
    }
    Ok(element)
}

fn attach(stack: &mut Vec<Element>, root: &mut Option<Element>, element: Element) {
    match stack.last_mut() {
        Some(parent) => parent.push_element(element),
        None => {
            if root.is_none() {
                *root = Some(element);
            }
        }
    }
}

fn write_element<W: Write>(writer: &mut Writer<W>, element: &Element) -> Result<()> {
    let mut start = BytesStart::new(element.name.as_str());
    for attr in &element.attributes {
        start.push_attribute((attr.name.as_str(), attr.value.as_str()));
    }

    if element.children.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    for child in &element.children {
        match child {
            Node::Element(e) => write_element(writer, e)?,
            Node::Text(t) => writer.write_event(Event::Text(BytesText::new(t)))?,
        }
    }
    writer.write_event(Event::End(quick_xml::events::BytesEnd::new(
        element.name.as_str(),
    )))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<core:CityModel xmlns:core="http://www.opengis.net/citygml/2.0" xmlns:gml="http://www.opengis.net/gml" xmlns:bldg="http://www.opengis.net/citygml/building/2.0">
  <gml:name>Test model</gml:name>
  <core:cityObjectMember>
    <bldg:Building gml:id="b1">
      <gml:pos srsDimension="3">01100.0 200.0 5.0</gml:pos>
    </bldg:Building>
  </core:cityObjectMember>
</core:CityModel>"#;

    #[test]
    fn test_parse_roundtrip_structure() {
        let doc = Document::parse_str(SAMPLE).unwrap();
        assert_eq!(doc.root.name, "core:CityModel");
        assert_eq!(doc.root.local_name(), "CityModel");
        assert_eq!(doc.source_encoding.as_deref(), Some("UTF-8"));
        assert_eq!(doc.root.children_elements().count(), 2);

        let serialized = doc.to_xml_string().unwrap();
        let reparsed = Document::parse_str(&serialized).unwrap();
        assert_eq!(reparsed.root, doc.root);
    }

    #[test]
    fn test_text_content_inline() {
        let doc = Document::parse_str(SAMPLE).unwrap();
        let out = doc.to_xml_string().unwrap();
        // Text-only elements stay on one line.
        assert!(out.contains("<gml:name>Test model</gml:name>"));
        assert!(out.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    }

    #[test]
    fn test_deep_copy_is_independent() {
        let doc = Document::parse_str(SAMPLE).unwrap();
        let mut copy = doc.clone();
        copy.root.children.clear();
        assert_eq!(doc.root.children_elements().count(), 2);
        assert!(copy.root.children.is_empty());
    }

    #[test]
    fn test_find_descendants_in_document_order() {
        let xml = r#"<r xmlns:gml="http://www.opengis.net/gml">
            <a><gml:pos>1</gml:pos></a>
            <gml:pos>2</gml:pos>
            <b><c><gml:pos>3</gml:pos></c></b>
        </r>"#;
        let doc = Document::parse_str(xml).unwrap();
        let positions = doc.root.find_descendants(ElementRole::Position);
        let texts: Vec<String> = positions.iter().map(|p| p.text()).collect();
        assert_eq!(texts, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_attr_set_and_get() {
        let mut e = Element::new("gml:pos");
        assert_eq!(e.attr("srsDimension"), None);
        e.set_attr("srsDimension", "3");
        assert_eq!(e.attr("srsDimension"), Some("3"));
        e.set_attr("srsDimension", "2");
        assert_eq!(e.attr("srsDimension"), Some("2"));
        assert_eq!(e.attributes.len(), 1);
    }

    #[test]
    fn test_empty_element_self_closes() {
        let mut root = Element::new("r");
        root.push_element(Element::new("core:cityObjectMember"));
        let doc = Document {
            root,
            source_encoding: None,
        };
        let out = doc.to_xml_string().unwrap();
        assert!(out.contains("<core:cityObjectMember/>"));
    }

    #[test]
    fn test_attribute_escaping_roundtrip() {
        let xml = r#"<r note="a &lt; b &amp; c"><t>x &gt; y</t></r>"#;
        let doc = Document::parse_str(xml).unwrap();
        assert_eq!(doc.root.attr("note"), Some("a < b & c"));
        let out = doc.to_xml_string().unwrap();
        let again = Document::parse_str(&out).unwrap();
        assert_eq!(again.root.attr("note"), Some("a < b & c"));
    }

    #[test]
    fn test_unparseable_input_is_error() {
        assert!(Document::parse_str("<unclosed>").is_err());
        assert!(Document::parse_str("no markup at all").is_err());
    }
}
