//! Animated PNG adapter: the frame model in and out of the APNG container.
//!
//! Reading embeds each decoded frame as a raster `<image>` surface on a
//! base64 data URI; writing re-packs those embedded rasters. Nothing here
//! rasterizes vector content.

use std::io::Cursor;
use std::path::Path;

use anyhow::Context as _;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use image::AnimationDecoder as _;

use crate::foundation::core::{DEFAULT_DURATION, Length};
use crate::foundation::error::{PhantomError, PhantomResult};
use crate::model::document::Document;
use crate::model::frame::Frame;
use crate::svg::reader::ReadOptions;

/// Read a PNG or APNG file into a [`Document`]. An empty path yields an
/// empty document.
pub fn read_apng(path: impl AsRef<Path>, options: &ReadOptions) -> PhantomResult<Document> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Ok(Document::new());
    }
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read '{}'", path.display()))?;
    read_apng_bytes(&bytes, options)
}

/// In-memory equivalent of [`read_apng`].
///
/// A plain PNG becomes a single raster frame with `has_animation` unset. An
/// APNG maps `num_plays` to `loops`, and a default image kept out of the
/// animation (no `fcTL` before `IDAT`) becomes a skip-first frame 0.
#[tracing::instrument(skip_all)]
pub fn read_apng_bytes(bytes: &[u8], options: &ReadOptions) -> PhantomResult<Document> {
    let probe = probe_png(bytes)?;
    let mut doc = Document::new();

    let Some(animation) = probe.animation else {
        let image = decode_whole_png(bytes)?;
        let mut frame = Frame::from_rgba8(
            image.width(),
            image.height(),
            image.as_raw(),
            DEFAULT_DURATION,
        )?;
        options.apply(&mut frame);
        doc.width = frame.width.clone();
        doc.height = frame.height.clone();
        doc.frames.push(frame);
        return Ok(doc);
    };

    doc.has_animation = true;
    doc.loops = animation.plays;
    doc.skip_first = animation.separate_default;
    doc.width = Some(Length::Px(f64::from(probe.width)));
    doc.height = Some(Length::Px(f64::from(probe.height)));

    if doc.skip_first {
        // The default image is not part of the cycle; it becomes frame 0
        // with no timing of its own.
        let image = decode_whole_png(bytes)?;
        let mut frame = Frame::from_rgba8(
            image.width(),
            image.height(),
            image.as_raw(),
            DEFAULT_DURATION,
        )?;
        options.apply(&mut frame);
        doc.frames.push(frame);
    }

    let decoder = image::codecs::png::PngDecoder::new(Cursor::new(bytes))
        .map_err(|e| PhantomError::malformed(format!("png decode failed: {e}")))?;
    let apng = decoder
        .apng()
        .map_err(|e| PhantomError::malformed(format!("apng decode failed: {e}")))?;
    for frame in apng.into_frames() {
        let frame =
            frame.map_err(|e| PhantomError::malformed(format!("apng frame decode failed: {e}")))?;
        let (numer, denom) = frame.delay().numer_denom_ms();
        let duration = if denom == 0 {
            0.0
        } else {
            f64::from(numer) / f64::from(denom) / 1000.0
        };
        let buffer = frame.into_buffer();
        let mut out =
            Frame::from_rgba8(buffer.width(), buffer.height(), buffer.as_raw(), duration)?;
        options.apply(&mut out);
        doc.frames.push(out);
    }

    tracing::debug!(
        frames = doc.frames.len(),
        loops = doc.loops,
        skip_first = doc.skip_first,
        "parsed apng"
    );
    Ok(doc)
}

/// Write a document as PNG (APNG when it has two or more frames) and return
/// the bytes written. An empty path or frame list writes nothing and
/// returns 0.
pub fn write_apng(path: impl AsRef<Path>, doc: &Document) -> PhantomResult<u64> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() || doc.frames.is_empty() {
        return Ok(0);
    }
    let bytes = apng_bytes(doc)?;
    std::fs::write(path, &bytes)
        .with_context(|| format!("failed to write '{}'", path.display()))?;
    Ok(bytes.len() as u64)
}

/// Encode a document's embedded raster frames as PNG/APNG bytes.
///
/// Every frame must carry an embedded raster surface matching the canvas
/// size; anything else is [`PhantomError::UnsupportedInput`], because
/// rendering vector content is out of scope.
#[tracing::instrument(skip_all)]
pub fn apng_bytes(doc: &Document) -> PhantomResult<Vec<u8>> {
    if doc.frames.is_empty() {
        return Err(PhantomError::empty("document has no frames to encode"));
    }

    let rasters = doc
        .frames
        .iter()
        .enumerate()
        .map(decode_embedded)
        .collect::<PhantomResult<Vec<_>>>()?;

    let (canvas_width, canvas_height) = match (&doc.width, &doc.height) {
        (Some(w), Some(h)) => (w.to_px() as u32, h.to_px() as u32),
        _ => (rasters[0].width, rasters[0].height),
    };
    for (index, raster) in rasters.iter().enumerate() {
        if raster.width != canvas_width || raster.height != canvas_height {
            return Err(PhantomError::unsupported(format!(
                "frame {index} raster is {}x{}, canvas is {canvas_width}x{canvas_height}; \
                 scaling would require rendering",
                raster.width, raster.height
            )));
        }
    }

    let mut out = Vec::new();
    let mut encoder = png::Encoder::new(&mut out, canvas_width, canvas_height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    if doc.frames.len() > 1 {
        let participating = doc.frames.len() as u32 - u32::from(doc.skip_first);
        encoder
            .set_animated(participating, doc.loops)
            .context("failed to declare apng animation")?;
        if doc.skip_first {
            encoder
                .set_sep_def_img(true)
                .context("failed to separate the default image")?;
        }
    }
    let mut writer = encoder.write_header().context("failed to write png header")?;
    for (i, (frame, raster)) in doc.frames.iter().zip(&rasters).enumerate() {
        let participates = doc.frames.len() > 1 && !(i == 0 && doc.skip_first);
        if participates {
            let millis = (frame.duration * 1000.0).round() as u16;
            writer
                .set_frame_delay(millis, 1000)
                .context("failed to set frame delay")?;
        }
        writer
            .write_image_data(&raster.rgba)
            .context("failed to encode frame pixels")?;
    }
    writer.finish().context("failed to finish png encode")?;
    Ok(out)
}

struct Raster {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

fn decode_embedded((index, frame): (usize, &Frame)) -> PhantomResult<Raster> {
    let payload = frame.embedded_raster().ok_or_else(|| {
        PhantomError::unsupported(format!(
            "frame {index} has no embedded raster surface; \
             rendering vector content is out of scope"
        ))
    })?;
    let png_bytes = BASE64_STANDARD.decode(payload).map_err(|e| {
        PhantomError::malformed(format!("frame {index} raster is not valid base64: {e}"))
    })?;
    let image = image::load_from_memory(&png_bytes)
        .map_err(|e| {
            PhantomError::malformed(format!("frame {index} raster is not a decodable png: {e}"))
        })?
        .to_rgba8();
    Ok(Raster {
        width: image.width(),
        height: image.height(),
        rgba: image.into_raw(),
    })
}

fn decode_whole_png(bytes: &[u8]) -> PhantomResult<image::RgbaImage> {
    Ok(image::load_from_memory(bytes)
        .map_err(|e| PhantomError::malformed(format!("png decode failed: {e}")))?
        .to_rgba8())
}

struct PngProbe {
    width: u32,
    height: u32,
    animation: Option<ApngProbe>,
}

struct ApngProbe {
    plays: u32,
    separate_default: bool,
}

/// Chunk-level probe with the `png` crate for the APNG facts the `image`
/// decoder does not expose: the play count and whether the default image
/// sits outside the animation.
fn probe_png(bytes: &[u8]) -> PhantomResult<PngProbe> {
    let decoder = png::Decoder::new(Cursor::new(bytes));
    let reader = decoder
        .read_info()
        .map_err(|e| PhantomError::malformed(format!("not a png: {e}")))?;
    let info = reader.info();
    Ok(PngProbe {
        width: info.width,
        height: info.height,
        animation: info.animation_control().map(|actl| ApngProbe {
            plays: actl.num_plays,
            // An fcTL before IDAT means the default image is frame 0 of the
            // animation; its absence here means it stands apart.
            separate_default: info.frame_control().is_none(),
        }),
    })
}
