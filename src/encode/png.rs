use std::path::{Path, PathBuf};

use crate::{
    encode::ensure_parent_dir,
    encode::sink::{FrameSink, SinkConfig},
    foundation::core::FrameIndex,
    foundation::error::{HeartError, HeartResult},
    foundation::math::unpremul_u8,
    render::backend::FrameRGBA,
};

/// Write `frame` as a straight-alpha RGBA PNG, creating parent directories as needed.
pub fn write_png(frame: &FrameRGBA, path: &Path) -> HeartResult<()> {
    let expected = frame.width as usize * frame.height as usize * 4;
    if frame.data.len() != expected {
        return Err(HeartError::render(format!(
            "frame data is {} bytes, expected {expected} for {}x{}",
            frame.data.len(),
            frame.width,
            frame.height
        )));
    }
    ensure_parent_dir(path)?;

    let straight;
    let bytes: &[u8] = if frame.premultiplied {
        straight = unpremultiply(&frame.data);
        &straight
    } else {
        &frame.data
    };

    image::save_buffer_with_format(
        path,
        bytes,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| match e {
        image::ImageError::IoError(io) => HeartError::io(path, io),
        other => HeartError::render(format!("encode png '{}': {other}", path.display())),
    })?;

    tracing::debug!(path = %path.display(), "wrote png");
    Ok(())
}

fn unpremultiply(src: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(src.len());
    for px in src.chunks_exact(4) {
        let a = px[3];
        if a == 255 {
            out.extend_from_slice(px);
        } else {
            out.extend_from_slice(&[
                unpremul_u8(px[0], a),
                unpremul_u8(px[1], a),
                unpremul_u8(px[2], a),
                a,
            ]);
        }
    }
    out
}

/// Writes each frame to `<dir>/frame_NNNNNN.png`.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    written: usize,
    last_idx: Option<FrameIndex>,
}

impl PngSequenceSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: 0,
            last_idx: None,
        }
    }

    pub fn frame_path(&self, idx: FrameIndex) -> PathBuf {
        self.dir.join(format!("frame_{:06}.png", idx.0))
    }

    pub fn written(&self) -> usize {
        self.written
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, cfg: SinkConfig) -> HeartResult<()> {
        std::fs::create_dir_all(&self.dir).map_err(|e| HeartError::io(&self.dir, e))?;
        tracing::info!(
            dir = %self.dir.display(),
            width = cfg.width,
            height = cfg.height,
            "writing png frame sequence"
        );
        self.written = 0;
        self.last_idx = None;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> HeartResult<()> {
        if let Some(last) = self.last_idx
            && idx.0 <= last.0
        {
            return Err(HeartError::render(
                "png sink received out-of-order frame index",
            ));
        }
        self.last_idx = Some(idx);
        write_png(frame, &self.frame_path(idx))?;
        self.written += 1;
        Ok(())
    }

    fn end(&mut self) -> HeartResult<()> {
        tracing::info!(dir = %self.dir.display(), frames = self.written, "png frame sequence done");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
