use anyhow::Context as _;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use ordermap::OrderMap;

use crate::dom::tree::Element;
use crate::foundation::core::{DEFAULT_DURATION, Length, SVG_NS, ViewBox, XLINK_NS};
use crate::foundation::error::{PhantomError, PhantomResult};

/// One still image of an animation: sizing, namespace bindings, content
/// nodes, and how long it stays visible.
///
/// A frame is self-contained: its `surfaces` must not reference ids defined
/// in another frame's subtree. The writer relies on this when it prefixes
/// ids per frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// Horizontal size; `None` when the source carried no width attribute.
    pub width: Option<Length>,
    /// Vertical size; `None` when the source carried no height attribute.
    pub height: Option<Length>,
    /// `viewBox`, present only if the source declared one.
    pub viewbox: Option<ViewBox>,
    /// Namespace bindings; key `"xmlns"` is the default binding, every other
    /// key is a prefix. Holds at least the SVG namespace.
    pub namespaces: OrderMap<String, String>,
    /// Ordered element children rendering the frame.
    pub surfaces: Vec<Element>,
    /// Seconds the frame stays visible. Defaults to 0.1.
    pub duration: f64,
}

impl Frame {
    /// Empty frame bound to the SVG namespace, with the default duration.
    pub fn new() -> Self {
        let mut namespaces = OrderMap::new();
        namespaces.insert("xmlns".to_string(), SVG_NS.to_string());
        Self {
            width: None,
            height: None,
            viewbox: None,
            namespaces,
            surfaces: Vec::new(),
            duration: DEFAULT_DURATION,
        }
    }

    /// Build a raster frame from straight RGBA8 pixels: the buffer is
    /// PNG-encoded and embedded as a base64 data URI on a single `<image>`
    /// surface, the same shape the bitmap reader produces.
    pub fn from_rgba8(width: u32, height: u32, rgba: &[u8], duration: f64) -> PhantomResult<Self> {
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(PhantomError::unsupported(format!(
                "rgba buffer is {} bytes, expected {expected} for {width}x{height}",
                rgba.len()
            )));
        }

        let mut png_bytes = Vec::new();
        let mut encoder = png::Encoder::new(&mut png_bytes, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder
            .write_header()
            .context("failed to start png encode")?;
        writer
            .write_image_data(rgba)
            .context("failed to encode png pixels")?;
        writer.finish().context("failed to finish png encode")?;

        let href = format!("data:image/png;base64,{}", BASE64_STANDARD.encode(&png_bytes));
        let image = Element::new("image")
            .with_attr("x", "0")
            .with_attr("y", "0")
            .with_attr("width", format!("{width}px"))
            .with_attr("height", format!("{height}px"))
            .with_attr("xlink:href", href);

        let mut frame = Frame::new();
        frame
            .namespaces
            .insert("xlink".to_string(), XLINK_NS.to_string());
        frame.width = Some(Length::Px(f64::from(width)));
        frame.height = Some(Length::Px(f64::from(height)));
        frame.surfaces = vec![image];
        frame.duration = duration;
        Ok(frame)
    }

    /// Base64 payload of the first embedded PNG data URI in the frame's
    /// surfaces, if any. This is what the bitmap writer re-packs.
    pub fn embedded_raster(&self) -> Option<&str> {
        fn find(el: &Element) -> Option<&str> {
            if el.name() == "image" {
                for key in ["xlink:href", "href"] {
                    if let Some(value) = el.attr(key) {
                        if let Some(payload) = value.strip_prefix("data:image/png;base64,") {
                            return Some(payload);
                        }
                    }
                }
            }
            el.child_elements().find_map(find)
        }
        self.surfaces.iter().find_map(find)
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}
