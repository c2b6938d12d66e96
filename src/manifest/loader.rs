//! JSON and XML animation manifests: a declarative ordered frame list
//! loaded into the frame model.
//!
//! A manifest names image files and durations; it never nests further
//! manifests. Frame references resolve relative to the manifest file.

use std::path::Path;

use anyhow::Context as _;
use serde::Deserialize;

use crate::foundation::core::DEFAULT_DURATION;
use crate::foundation::error::{PhantomError, PhantomResult};
use crate::model::document::Document;
use crate::svg::reader::ReadOptions;

/// ```json
/// { "frames": [ { "path": "0.svg", "duration": 0.05 } ],
///   "loops": 3, "skip_first": false, "duration": 0.1 }
/// ```
#[derive(Debug, Deserialize)]
struct JsonManifest {
    frames: Vec<JsonManifestFrame>,
    loops: Option<u32>,
    skip_first: Option<bool>,
    duration: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct JsonManifestFrame {
    path: String,
    duration: Option<f64>,
}

/// ```xml
/// <animation loops="3" skip_first="false" duration="0.1">
///   <frame path="0.svg" duration="0.05"/>
/// </animation>
/// ```
#[derive(Debug, Deserialize)]
struct XmlManifest {
    #[serde(rename = "@loops")]
    loops: Option<u32>,
    #[serde(rename = "@skip_first")]
    skip_first: Option<bool>,
    #[serde(rename = "@duration")]
    duration: Option<f64>,
    #[serde(rename = "frame", default)]
    frames: Vec<XmlManifestFrame>,
}

#[derive(Debug, Deserialize)]
struct XmlManifestFrame {
    #[serde(rename = "@path")]
    path: String,
    #[serde(rename = "@duration")]
    duration: Option<f64>,
}

struct Manifest {
    entries: Vec<(String, Option<f64>)>,
    loops: u32,
    skip_first: bool,
    duration: Option<f64>,
}

impl From<JsonManifest> for Manifest {
    fn from(m: JsonManifest) -> Self {
        Manifest {
            entries: m.frames.into_iter().map(|f| (f.path, f.duration)).collect(),
            loops: m.loops.unwrap_or(0),
            skip_first: m.skip_first.unwrap_or(false),
            duration: m.duration,
        }
    }
}

impl From<XmlManifest> for Manifest {
    fn from(m: XmlManifest) -> Self {
        Manifest {
            entries: m.frames.into_iter().map(|f| (f.path, f.duration)).collect(),
            loops: m.loops.unwrap_or(0),
            skip_first: m.skip_first.unwrap_or(false),
            duration: m.duration,
        }
    }
}

/// Read a JSON manifest file into a [`Document`]. An empty path yields an
/// empty document.
pub fn read_json_manifest(
    path: impl AsRef<Path>,
    options: &ReadOptions,
) -> PhantomResult<Document> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Ok(Document::new());
    }
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read '{}'", path.display()))?;
    read_json_manifest_str(&text, path.parent().unwrap_or(Path::new(".")), options)
}

/// In-memory equivalent of [`read_json_manifest`]; frame references resolve
/// against `base_dir`.
#[tracing::instrument(skip_all)]
pub fn read_json_manifest_str(
    text: &str,
    base_dir: &Path,
    options: &ReadOptions,
) -> PhantomResult<Document> {
    let manifest: JsonManifest = serde_json::from_str(text)
        .map_err(|e| PhantomError::serde(format!("bad json manifest: {e}")))?;
    load(manifest.into(), base_dir, options)
}

/// Read an XML manifest file into a [`Document`]. An empty path yields an
/// empty document.
pub fn read_xml_manifest(
    path: impl AsRef<Path>,
    options: &ReadOptions,
) -> PhantomResult<Document> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Ok(Document::new());
    }
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read '{}'", path.display()))?;
    read_xml_manifest_str(&text, path.parent().unwrap_or(Path::new(".")), options)
}

/// In-memory equivalent of [`read_xml_manifest`]; frame references resolve
/// against `base_dir`.
#[tracing::instrument(skip_all)]
pub fn read_xml_manifest_str(
    text: &str,
    base_dir: &Path,
    options: &ReadOptions,
) -> PhantomResult<Document> {
    let manifest: XmlManifest = quick_xml::de::from_str(text)
        .map_err(|e| PhantomError::serde(format!("bad xml manifest: {e}")))?;
    load(manifest.into(), base_dir, options)
}

fn load(manifest: Manifest, base_dir: &Path, options: &ReadOptions) -> PhantomResult<Document> {
    if manifest.entries.is_empty() {
        return Err(PhantomError::empty("manifest lists no frames"));
    }

    let mut doc = Document::new();
    doc.loops = manifest.loops;
    doc.skip_first = manifest.skip_first;
    doc.has_animation = true;

    for (reference, entry_duration) in &manifest.entries {
        let path = base_dir.join(reference);
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let loaded = match ext.as_str() {
            "svg" => crate::svg::reader::read_svg(&path, options)?,
            "png" => crate::apng::codec::read_apng(&path, options)?,
            other => {
                return Err(PhantomError::unsupported(format!(
                    "manifest frame '{reference}' has unsupported extension '.{other}'"
                )));
            }
        };
        let duration = options
            .duration
            .or(*entry_duration)
            .or(manifest.duration)
            .unwrap_or(DEFAULT_DURATION);
        for mut frame in loaded.frames {
            frame.duration = duration;
            if doc.width.is_none() {
                doc.width = frame.width.clone();
            }
            if doc.height.is_none() {
                doc.height = frame.height.clone();
            }
            if doc.viewbox.is_none() {
                doc.viewbox = frame.viewbox;
            }
            doc.frames.push(frame);
        }
    }
    tracing::debug!(frames = doc.frames.len(), "loaded manifest");
    Ok(doc)
}
