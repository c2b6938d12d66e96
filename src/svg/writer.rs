//! Serialization of the frame model into animated or plain SVG markup.

use std::path::Path;

use anyhow::Context as _;
use ordermap::OrderMap;

use crate::dom::tree::{Element, XmlNode};
use crate::dom::xml;
use crate::foundation::core::{Length, PHANTOM_ID, SVG_NS, SVG_VERSION, XLINK_NS, fmt_float};
use crate::foundation::error::{PhantomError, PhantomResult};
use crate::model::document::Document;
use crate::model::frame::Frame;
use crate::svg::uniquify;

const GENERATOR_COMMENT: &str = " Generated by phantom_svg. ";

/// Closed set of values the SVG writer accepts.
#[derive(Clone, Copy, Debug)]
pub enum SvgSource<'a> {
    /// A whole document; two or more frames produce the animation dialect.
    Document(&'a Document),
    /// A bare frame, always written as a plain image.
    Frame(&'a Frame),
}

impl<'a> From<&'a Document> for SvgSource<'a> {
    fn from(doc: &'a Document) -> Self {
        SvgSource::Document(doc)
    }
}

impl<'a> From<&'a Frame> for SvgSource<'a> {
    fn from(frame: &'a Frame) -> Self {
        SvgSource::Frame(frame)
    }
}

/// Serialize `source` to `path` and return the bytes written.
///
/// An empty path or a document with no frames writes nothing and returns 0,
/// so batch callers can keep going; every other failure is a structured
/// error.
pub fn write_svg<'a>(
    path: impl AsRef<Path>,
    source: impl Into<SvgSource<'a>>,
) -> PhantomResult<u64> {
    let path = path.as_ref();
    let source = source.into();
    if path.as_os_str().is_empty() {
        return Ok(0);
    }
    if let SvgSource::Document(doc) = source {
        if doc.frames.is_empty() {
            return Ok(0);
        }
    }
    let text = svg_string(source)?;
    std::fs::write(path, &text)
        .with_context(|| format!("failed to write '{}'", path.display()))?;
    tracing::debug!(path = %path.display(), bytes = text.len(), "wrote svg");
    Ok(text.len() as u64)
}

/// In-memory serializer behind [`write_svg`].
///
/// A document with no frames is [`PhantomError::EmptyInput`] here; the path
/// API maps that case to a 0-byte result instead.
#[tracing::instrument(skip_all)]
pub fn svg_string<'a>(source: impl Into<SvgSource<'a>>) -> PhantomResult<String> {
    let root = match source.into() {
        SvgSource::Frame(frame) => plain_root(frame),
        SvgSource::Document(doc) => match doc.frames.len() {
            0 => return Err(PhantomError::empty("document has no frames to write")),
            1 => plain_root(&doc.frames[0]),
            _ => animation_root(doc),
        },
    };
    xml::to_xml_string(&root, &[GENERATOR_COMMENT])
}

/// Plain single-image document: no dialect marker, no scaffolding.
fn plain_root(frame: &Frame) -> Element {
    let mut svg = Element::new("svg");
    set_size(&mut svg, frame.width.as_ref(), frame.height.as_ref());
    if let Some(viewbox) = frame.viewbox {
        svg.set_attr("viewBox", viewbox.to_string());
    }
    svg.set_attr("preserveAspectRatio", "none");
    set_namespaces(&mut svg, &frame.namespaces);
    svg.set_attr("version", SVG_VERSION);
    for surface in &frame.surfaces {
        svg.push_element(surface.clone());
    }
    svg
}

fn animation_root(doc: &Document) -> Element {
    let mut svg = Element::new("svg").with_attr("id", PHANTOM_ID);
    set_size(
        &mut svg,
        doc.width.as_ref().or(doc.frames[0].width.as_ref()),
        doc.height.as_ref().or(doc.frames[0].height.as_ref()),
    );
    if let Some(viewbox) = doc.viewbox {
        svg.set_attr("viewBox", viewbox.to_string());
    }
    svg.set_attr("xmlns", SVG_NS);
    svg.set_attr("xmlns:xlink", XLINK_NS);
    svg.set_attr("version", SVG_VERSION);

    let mut defs = Element::new("defs");
    defs.push_node(XmlNode::Comment(" Images. ".to_string()));
    for (i, frame) in doc.frames.iter().enumerate() {
        defs.push_element(frame_block(frame, i));
    }
    debug_assert!(
        defs_ids_are_unique(&defs),
        "id collision survived uniquification"
    );

    let degenerate = doc.skip_first && doc.frames.len() == 2;
    if !degenerate {
        defs.push_node(XmlNode::Comment(" Animation. ".to_string()));
        defs.push_element(animation_symbol(doc));
    }
    svg.push_element(defs);

    svg.push_node(XmlNode::Comment(" Main control. ".to_string()));
    if degenerate {
        svg.push_element(degenerate_switch());
    } else {
        svg.push_element(controller(doc));
        svg.push_element(controller_switch(doc));
    }
    svg
}

/// One image block under `<defs>`, id `frame{index}`, built like the plain
/// case and then uniquified with the `frame{index}_` prefix. Size attributes
/// are written only when the frame has them, so absence survives a round
/// trip.
fn frame_block(frame: &Frame, index: usize) -> Element {
    let mut svg = Element::new("svg").with_attr("id", format!("frame{index}"));
    if let Some(width) = &frame.width {
        svg.set_attr("width", width.to_string());
    }
    if let Some(height) = &frame.height {
        svg.set_attr("height", height.to_string());
    }
    if let Some(viewbox) = frame.viewbox {
        svg.set_attr("viewBox", viewbox.to_string());
    }
    svg.set_attr("preserveAspectRatio", "none");
    set_namespaces(&mut svg, &frame.namespaces);
    for surface in &frame.surfaces {
        svg.push_element(surface.clone());
    }
    uniquify::uniquify_ids(&mut svg, &format!("frame{index}_"));
    svg
}

/// The hidden `<use>` chain that toggles frame visibility. The first emitted
/// trigger both bootstraps the cycle at `0s` and closes the loop from the
/// last frame's end; each later trigger begins where the previous one ends.
fn animation_symbol(doc: &Document) -> Element {
    let mut symbol = Element::new("symbol").with_attr("id", "animation");
    let mut begin = format!("0s;frame{}_anim.end", doc.frames.len() - 1);
    for (i, frame) in doc.frames.iter().enumerate() {
        if i == 0 && doc.skip_first {
            continue;
        }
        let trigger = Element::new("set")
            .with_attr("id", format!("frame{i}_anim"))
            .with_attr("attributeName", "visibility")
            .with_attr("to", "visible")
            .with_attr("begin", begin.clone())
            .with_attr("dur", format!("{}s", fmt_float(frame.duration)));
        symbol.push_element(
            Element::new("use")
                .with_attr("xlink:href", format!("#frame{i}"))
                .with_attr("visibility", "hidden")
                .with_child(trigger),
        );
        begin = format!("frame{i}_anim.end");
    }
    symbol
}

fn controller(doc: &Document) -> Element {
    let total: f64 = doc
        .frames
        .iter()
        .skip(usize::from(doc.skip_first))
        .map(|f| f.duration)
        .sum();
    let repeat = if doc.loops == 0 {
        "indefinite".to_string()
    } else {
        doc.loops.to_string()
    };
    Element::new("animate")
        .with_attr("id", "controller")
        .with_attr("begin", "0s")
        .with_attr("dur", format!("{}s", fmt_float(total)))
        .with_attr("repeatCount", repeat)
}

/// The visible `<use>` that shows frame 0, switches to the animation symbol
/// while the controller runs, and parks on the last frame when it ends.
fn controller_switch(doc: &Document) -> Element {
    Element::new("use")
        .with_attr("xlink:href", "#frame0")
        .with_child(
            Element::new("set")
                .with_attr("attributeName", "xlink:href")
                .with_attr("to", "#animation")
                .with_attr("begin", "controller.begin"),
        )
        .with_child(
            Element::new("set")
                .with_attr("attributeName", "xlink:href")
                .with_attr("to", format!("#frame{}", doc.frames.len() - 1))
                .with_attr("begin", "controller.end"),
        )
}

/// Two frames with skip-first need no symbol or controller: one
/// non-repeating trigger hands off from frame 0 to frame 1.
fn degenerate_switch() -> Element {
    Element::new("use")
        .with_attr("xlink:href", "#frame0")
        .with_child(
            Element::new("set")
                .with_attr("attributeName", "xlink:href")
                .with_attr("to", "#frame1")
                .with_attr("begin", "0s"),
        )
}

fn set_size(el: &mut Element, width: Option<&Length>, height: Option<&Length>) {
    el.set_attr(
        "width",
        width.map_or_else(|| "0px".to_string(), Length::to_string),
    );
    el.set_attr(
        "height",
        height.map_or_else(|| "0px".to_string(), Length::to_string),
    );
}

fn set_namespaces(el: &mut Element, namespaces: &OrderMap<String, String>) {
    for (key, uri) in namespaces.iter() {
        if key == "xmlns" {
            el.set_attr("xmlns", uri.clone());
        } else {
            el.set_attr(format!("xmlns:{key}"), uri.clone());
        }
    }
}

/// Uniquification is expected to be exhaustive; this only backs the debug
/// assertion in [`animation_root`].
fn defs_ids_are_unique(defs: &Element) -> bool {
    fn collect<'a>(el: &'a Element, ids: &mut Vec<&'a str>) {
        if let Some(id) = el.attr("id") {
            ids.push(id);
        }
        for child in el.child_elements() {
            collect(child, ids);
        }
    }
    let mut ids = Vec::new();
    for child in defs.child_elements() {
        collect(child, &mut ids);
    }
    let unique: std::collections::HashSet<&str> = ids.iter().copied().collect();
    unique.len() == ids.len()
}
