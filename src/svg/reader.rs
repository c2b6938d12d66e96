//! Animated and plain SVG parsing into the frame model.

use std::path::Path;

use anyhow::Context as _;
use ordermap::OrderMap;

use crate::dom::tree::Element;
use crate::dom::xml;
use crate::foundation::core::{self, Length, PHANTOM_ID, SVG_NS, ViewBox};
use crate::foundation::error::{PhantomError, PhantomResult};
use crate::model::document::Document;
use crate::model::frame::Frame;

/// Global per-call overrides for the readers.
///
/// Each supplied field unconditionally replaces the parsed value on every
/// frame the call touches; this is a per-call setting, not a per-frame one.
/// `namespaces` merges instead of replacing, with the override winning per
/// key. No override state persists between calls.
#[derive(Clone, Debug, Default)]
pub struct ReadOptions {
    /// Replace every frame's width.
    pub width: Option<Length>,
    /// Replace every frame's height.
    pub height: Option<Length>,
    /// Replace every frame's `viewBox`.
    pub viewbox: Option<ViewBox>,
    /// Replace every frame's content nodes.
    pub surfaces: Option<Vec<Element>>,
    /// Replace every frame's duration, including durations parsed from SMIL
    /// timing attributes.
    pub duration: Option<f64>,
    /// Namespace bindings merged over every frame's parsed bindings.
    pub namespaces: Option<OrderMap<String, String>>,
}

impl ReadOptions {
    /// Apply every supplied override to `frame`.
    pub(crate) fn apply(&self, frame: &mut Frame) {
        if let Some(width) = &self.width {
            frame.width = Some(width.clone());
        }
        if let Some(height) = &self.height {
            frame.height = Some(height.clone());
        }
        if let Some(viewbox) = self.viewbox {
            frame.viewbox = Some(viewbox);
        }
        if let Some(surfaces) = &self.surfaces {
            frame.surfaces = surfaces.clone();
        }
        if let Some(duration) = self.duration {
            frame.duration = duration;
        }
        if let Some(namespaces) = &self.namespaces {
            for (key, uri) in namespaces.iter() {
                frame.namespaces.insert(key.clone(), uri.clone());
            }
        }
    }
}

/// Read an SVG file into a [`Document`].
///
/// An empty path yields an empty document, not an error. Unparseable markup
/// or a missing dialect anchor is [`PhantomError::MalformedDocument`].
pub fn read_svg(path: impl AsRef<Path>, options: &ReadOptions) -> PhantomResult<Document> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Ok(Document::new());
    }
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read '{}'", path.display()))?;
    read_svg_str(&text, options)
}

/// In-memory equivalent of [`read_svg`].
///
/// A document is the animation dialect iff its root `<svg>` carries
/// `id="phantom_svg"`, matched whole-value. Anything else parses as a plain
/// image with exactly one frame, however many `<svg>` elements nest inside.
#[tracing::instrument(skip_all)]
pub fn read_svg_str(text: &str, options: &ReadOptions) -> PhantomResult<Document> {
    let root = xml::parse_root(text)?;
    if root.name() != "svg" {
        return Err(PhantomError::malformed(format!(
            "root element is <{}>, expected <svg>",
            root.name()
        )));
    }

    let mut doc = Document::new();
    if root.attr("id") == Some(PHANTOM_ID) {
        read_animation(&root, options, &mut doc)?;
        doc.has_animation = true;
    } else {
        doc.frames.push(frame_from_svg(&root, options));
    }
    tracing::debug!(
        frames = doc.frames.len(),
        animated = doc.has_animation,
        "parsed svg document"
    );
    Ok(doc)
}

/// One frame from one `<svg>` element: the root in plain mode, a child of
/// `<defs>` in animation mode.
fn frame_from_svg(el: &Element, options: &ReadOptions) -> Frame {
    let mut frame = Frame::new();
    let mut namespaces = el.namespaces();
    if !namespaces.contains_key("xmlns") {
        namespaces.insert("xmlns".to_string(), SVG_NS.to_string());
    }
    frame.namespaces = namespaces;
    frame.width = el.attr("width").map(|v| Length::Text(v.to_string()));
    frame.height = el.attr("height").map(|v| Length::Text(v.to_string()));
    frame.viewbox = el.attr("viewBox").map(ViewBox::from_text);
    frame.surfaces = el.child_elements().cloned().collect();
    options.apply(&mut frame);
    frame
}

fn read_animation(
    root: &Element,
    options: &ReadOptions,
    doc: &mut Document,
) -> PhantomResult<()> {
    doc.width = options
        .width
        .clone()
        .or_else(|| root.attr("width").map(|v| Length::Text(v.to_string())));
    doc.height = options
        .height
        .clone()
        .or_else(|| root.attr("height").map(|v| Length::Text(v.to_string())));
    doc.viewbox = options
        .viewbox
        .or_else(|| root.attr("viewBox").map(ViewBox::from_text));

    let defs = root
        .find_child("defs")
        .ok_or_else(|| PhantomError::malformed("animation document has no <defs>"))?;
    for svg in defs.find_children("svg") {
        doc.frames.push(frame_from_svg(svg, options));
    }

    let Some(symbol) = defs.find_child("symbol") else {
        // The two-frame skip-first form has no symbol or controller: frame 0
        // is shown once, a single trigger switches permanently to frame 1.
        if doc.frames.len() == 2 {
            doc.skip_first = true;
            doc.loops = 0;
            return Ok(());
        }
        return Err(PhantomError::malformed("animation document has no <symbol>"));
    };

    let first_use = symbol
        .find_child("use")
        .ok_or_else(|| PhantomError::malformed("animation <symbol> has no <use> entries"))?;
    doc.skip_first = first_use.attr("xlink:href") != Some("#frame0");

    let mut index = usize::from(doc.skip_first);
    for entry in symbol.find_children("use") {
        let set = entry
            .find_child("set")
            .ok_or_else(|| PhantomError::malformed("animation <use> entry has no <set> timer"))?;
        let parsed = core::coerce_f64(set.attr("dur").unwrap_or(""));
        let frame = doc.frames.get_mut(index).ok_or_else(|| {
            PhantomError::malformed("more <use> entries than frames in <defs>")
        })?;
        frame.duration = options.duration.unwrap_or(parsed);
        index += 1;
    }

    let animate = root.find_child("animate").ok_or_else(|| {
        PhantomError::malformed("animation document has no <animate> controller")
    })?;
    // A non-numeric repeatCount ("indefinite" included) coerces to 0, which
    // the model reads as infinite.
    doc.loops = core::coerce_u32(animate.attr("repeatCount").unwrap_or(""));
    Ok(())
}
