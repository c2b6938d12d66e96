use std::path::Path;

use crate::foundation::core::{Length, ViewBox};
use crate::foundation::error::{PhantomError, PhantomResult};
use crate::model::frame::Frame;
use crate::svg::reader::ReadOptions;

/// An ordered frame sequence plus the animation metadata that frames do not
/// carry themselves.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    /// Frames in playback order.
    pub frames: Vec<Frame>,
    /// Document-level width; writers fall back to the first frame's.
    pub width: Option<Length>,
    /// Document-level height; writers fall back to the first frame's.
    pub height: Option<Length>,
    /// Document-level `viewBox`.
    pub viewbox: Option<ViewBox>,
    /// Loop count; 0 plays forever.
    pub loops: u32,
    /// When set, frame 0 is shown standalone and excluded from the loop.
    pub skip_first: bool,
    /// True iff the source was an animation container, regardless of how
    /// many frames it held.
    pub has_animation: bool,
}

impl Document {
    /// Empty document: no frames, infinite loops, no animation flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear back to the empty state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Sum of all frame durations in seconds, the skipped first frame
    /// included.
    pub fn total_duration(&self) -> f64 {
        self.frames.iter().map(|f| f.duration).sum()
    }

    /// Read `path` into a fresh document. See
    /// [`Document::add_frames_from_file`] for the dispatch rules.
    pub fn from_file(path: impl AsRef<Path>, options: &ReadOptions) -> PhantomResult<Self> {
        let mut doc = Self::new();
        doc.add_frames_from_file(path, options)?;
        Ok(doc)
    }

    /// Read `path` with the reader matching its extension (`.svg`, `.png`,
    /// `.json`, `.xml`, case-insensitive) and merge the result into `self`.
    /// Returns the number of frames appended.
    pub fn add_frames_from_file(
        &mut self,
        path: impl AsRef<Path>,
        options: &ReadOptions,
    ) -> PhantomResult<usize> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let incoming = match ext.as_str() {
            "svg" => crate::svg::reader::read_svg(path, options)?,
            "png" => crate::apng::codec::read_apng(path, options)?,
            "json" => crate::manifest::loader::read_json_manifest(path, options)?,
            "xml" => crate::manifest::loader::read_xml_manifest(path, options)?,
            other => {
                return Err(PhantomError::unsupported(format!(
                    "no reader for '.{other}' input: {}",
                    path.display()
                )));
            }
        };
        Ok(self.merge(incoming))
    }

    /// Append another document's frames. Animation metadata (loops,
    /// skip-first) is adopted iff the incoming document was an animation;
    /// size and `viewBox` are adopted only where `self` has none. Returns
    /// the number of frames appended.
    pub fn merge(&mut self, incoming: Document) -> usize {
        let added = incoming.frames.len();
        if incoming.has_animation {
            self.loops = incoming.loops;
            self.skip_first = incoming.skip_first;
            self.has_animation = true;
        }
        if self.width.is_none() {
            self.width = incoming.width;
        }
        if self.height.is_none() {
            self.height = incoming.height;
        }
        if self.viewbox.is_none() {
            self.viewbox = incoming.viewbox;
        }
        self.frames.extend(incoming.frames);
        added
    }

    /// Write as SVG, animated when the document has two or more frames.
    /// Returns the bytes written; an empty path or frame list writes nothing
    /// and returns 0.
    pub fn save_svg(&self, path: impl AsRef<Path>) -> PhantomResult<u64> {
        crate::svg::writer::write_svg(path, self)
    }

    /// Write as PNG, animated when the document has two or more frames.
    /// Every frame must carry an embedded raster surface. Returns the bytes
    /// written; an empty path or frame list writes nothing and returns 0.
    pub fn save_apng(&self, path: impl AsRef<Path>) -> PhantomResult<u64> {
        crate::apng::codec::write_apng(path, self)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/document.rs"]
mod tests;
