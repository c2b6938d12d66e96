use anyhow::Context as _;
use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::dom::tree::{Element, XmlNode};
use crate::foundation::error::{PhantomError, PhantomResult};

/// Parse an XML document into its root element.
///
/// The XML declaration, doctype, processing instructions, and comments
/// outside the root are dropped. Whitespace-only text is dropped everywhere;
/// other text and comments inside the root are kept as child nodes. CDATA
/// sections become plain text.
pub fn parse_root(text: &str) -> PhantomResult<Element> {
    let mut reader = Reader::from_str(text);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let event = reader.read_event().map_err(|e| {
            PhantomError::malformed(format!(
                "xml parse error at byte {}: {e}",
                reader.buffer_position()
            ))
        })?;
        match event {
            Event::Eof => break,
            Event::Start(start) => {
                stack.push(element_from_start(&start)?);
            }
            Event::Empty(start) => {
                let el = element_from_start(&start)?;
                attach(&mut stack, &mut root, XmlNode::Element(el))?;
            }
            Event::End(_) => {
                let el = stack
                    .pop()
                    .ok_or_else(|| PhantomError::malformed("unmatched closing tag"))?;
                attach(&mut stack, &mut root, XmlNode::Element(el))?;
            }
            Event::Text(t) => {
                let value = t
                    .unescape()
                    .map_err(|e| PhantomError::malformed(format!("bad character data: {e}")))?;
                if !value.trim().is_empty() {
                    attach(&mut stack, &mut root, XmlNode::Text(value.into_owned()))?;
                }
            }
            Event::CData(c) => {
                let value = String::from_utf8_lossy(&c.into_inner()).into_owned();
                if !value.trim().is_empty() {
                    attach(&mut stack, &mut root, XmlNode::Text(value))?;
                }
            }
            Event::Comment(c) => {
                let value = String::from_utf8_lossy(c.as_ref()).into_owned();
                attach(&mut stack, &mut root, XmlNode::Comment(value))?;
            }
            Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
        }
    }

    if !stack.is_empty() {
        return Err(PhantomError::malformed("unclosed element at end of input"));
    }
    root.ok_or_else(|| PhantomError::malformed("document has no root element"))
}

/// Serialize a root element to an XML document string: declaration first,
/// then any leading comments, then the tree indented by two spaces.
pub fn to_xml_string(root: &Element, leading_comments: &[&str]) -> PhantomResult<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .context("failed to write xml declaration")?;
    for comment in leading_comments {
        writer
            .write_event(Event::Comment(BytesText::from_escaped(*comment)))
            .context("failed to write leading comment")?;
    }
    write_element(&mut writer, root)?;
    let text = String::from_utf8(writer.into_inner()).context("serialized xml is not utf-8")?;
    Ok(text)
}

fn element_from_start(start: &BytesStart<'_>) -> PhantomResult<Element> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut el = Element::new(name);
    for attr in start.attributes() {
        let attr = attr.map_err(|e| PhantomError::malformed(format!("bad attribute: {e}")))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| PhantomError::malformed(format!("bad attribute value: {e}")))?
            .into_owned();
        el.set_attr(key, value);
    }
    Ok(el)
}

fn attach(
    stack: &mut Vec<Element>,
    root: &mut Option<Element>,
    node: XmlNode,
) -> PhantomResult<()> {
    if let Some(parent) = stack.last_mut() {
        parent.push_node(node);
        return Ok(());
    }
    match node {
        XmlNode::Element(el) => {
            if root.is_some() {
                return Err(PhantomError::malformed("multiple root elements"));
            }
            *root = Some(el);
            Ok(())
        }
        // Text or comments before/after the root carry nothing we keep.
        _ => Ok(()),
    }
}

fn write_element<W: std::io::Write>(writer: &mut Writer<W>, el: &Element) -> PhantomResult<()> {
    let mut start = BytesStart::new(el.name());
    for (key, value) in el.attributes() {
        start.push_attribute((key, value));
    }
    if el.children().is_empty() {
        writer
            .write_event(Event::Empty(start))
            .context("failed to write element")?;
        return Ok(());
    }
    writer
        .write_event(Event::Start(start))
        .context("failed to write element")?;
    for child in el.children() {
        match child {
            XmlNode::Element(nested) => write_element(writer, nested)?,
            XmlNode::Text(text) => writer
                .write_event(Event::Text(BytesText::new(text)))
                .context("failed to write character data")?,
            XmlNode::Comment(comment) => writer
                .write_event(Event::Comment(BytesText::from_escaped(comment.as_str())))
                .context("failed to write comment")?,
        }
    }
    writer
        .write_event(Event::End(BytesEnd::new(el.name())))
        .context("failed to write closing tag")?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/dom/xml.rs"]
mod tests;
