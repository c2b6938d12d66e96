//! Read and write keyframe animated SVG.
//!
//! `phantom-svg` converts between an ordered sequence of still frames and an
//! animated SVG document in the `phantom_svg` dialect: one sibling `<svg>`
//! fragment per frame under `defs`, made visible in turn by a SMIL timer
//! chain. Around that codec sit an APNG adapter and JSON/XML animation
//! manifests, all sharing one in-memory model.
//!
//! # Pipeline overview
//!
//! 1. **Read**: SVG markup, APNG bytes, or a manifest -> [`Document`]
//!    (ordered [`Frame`]s plus loop count and skip-first flag)
//! 2. **Mutate**: append frames, adjust durations, loops, skip-first
//! 3. **Write**: [`Document`] -> animated SVG via [`write_svg`] (or APNG via
//!    [`write_apng`])
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **No rasterization**: vector content passes through untouched; the
//!   bitmap adapter only re-packs rasters that are already embedded.
//! - **Owned trees**: each read/write call owns its markup tree; the only
//!   multi-pass traversal is the id rename-then-rewrite in the writer, and
//!   the passes never interleave.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod apng;
mod dom;
mod foundation;
mod manifest;
mod model;
mod svg;

pub use apng::codec::{apng_bytes, read_apng, read_apng_bytes, write_apng};
pub use dom::tree::{Element, XmlNode};
pub use dom::xml::{parse_root, to_xml_string};
pub use foundation::core::{
    DEFAULT_DURATION, Length, PHANTOM_ID, SVG_NS, SVG_VERSION, ViewBox, XLINK_NS, coerce_f64,
    coerce_u32,
};
pub use foundation::error::{PhantomError, PhantomResult};
pub use manifest::loader::{
    read_json_manifest, read_json_manifest_str, read_xml_manifest, read_xml_manifest_str,
};
pub use model::document::Document;
pub use model::frame::Frame;
pub use svg::reader::{ReadOptions, read_svg, read_svg_str};
pub use svg::writer::{SvgSource, svg_string, write_svg};
