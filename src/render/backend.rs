use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::{
    foundation::core::{Canvas, Rgba8},
    foundation::error::{HeartError, HeartResult},
    render::scene::Scene,
};

/// A rendered frame as RGBA8 pixels.
///
/// Frames are **premultiplied alpha**; the `premultiplied` flag makes this explicit at API
/// boundaries.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// RGBA bytes of the pixel at `(x, y)`, `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        self.data.get(i..i + 4).map(|s| [s[0], s[1], s[2], s[3]])
    }
}

/// Anything that can turn a [`Scene`] into pixels.
///
/// The animation loop only depends on this trait, so tests can substitute a recording backend.
pub trait RenderBackend {
    /// Rasterize one scene into a fresh frame.
    fn render_scene(&mut self, scene: &Scene) -> HeartResult<FrameRGBA>;

    /// Output canvas size.
    fn canvas(&self) -> Canvas;
}

/// Look of a rendered heart.
///
/// Every field has a default, so a settings file only needs the keys it overrides.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderSettings {
    pub width: u32,
    pub height: u32,
    /// Padding around the data bounds, in data units.
    pub margin: f64,
    pub background_rgba: Rgba8,
    pub curve_rgba: Rgba8,
    pub line_width_px: f64,
    pub point_radius_px: f64,
    pub marker_rgba: Rgba8,
    pub marker_outline_rgba: Rgba8,
    pub marker_outline_px: f64,
    /// Marker radius as a fraction of the larger padded data extent.
    pub marker_radius_frac: f64,
    pub caption_rgba: Rgba8,
    pub caption_size_px: f32,
    /// Caption font file; system sans-serif fonts are searched when unset.
    pub font_path: Option<PathBuf>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 640,
            height: 640,
            margin: 3.0,
            background_rgba: Rgba8::opaque(255, 255, 255),
            curve_rgba: Rgba8::opaque(220, 20, 60),
            line_width_px: 4.0,
            point_radius_px: 2.0,
            marker_rgba: Rgba8::opaque(218, 165, 32),
            marker_outline_rgba: Rgba8::opaque(0, 0, 0),
            marker_outline_px: 1.2,
            marker_radius_frac: 0.03,
            caption_rgba: Rgba8::opaque(139, 0, 0),
            caption_size_px: 28.0,
            font_path: None,
        }
    }
}

impl RenderSettings {
    /// Load settings from a JSON file; missing keys keep their defaults.
    pub fn from_json_file(path: &Path) -> HeartResult<Self> {
        let f = std::fs::File::open(path).map_err(|e| HeartError::io(path, e))?;
        let r = std::io::BufReader::new(f);
        let settings: Self = serde_json::from_reader(r)
            .with_context(|| format!("parse render settings JSON '{}'", path.display()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    pub fn validate(&self) -> HeartResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(HeartError::invalid_argument(
                "canvas width/height must be non-zero",
            ));
        }
        if self.width > u32::from(u16::MAX) || self.height > u32::from(u16::MAX) {
            return Err(HeartError::invalid_argument(format!(
                "canvas {}x{} exceeds {}x{}",
                self.width,
                self.height,
                u16::MAX,
                u16::MAX
            )));
        }
        if !self.margin.is_finite() || self.margin < 0.0 {
            return Err(HeartError::invalid_argument(
                "margin must be finite and >= 0",
            ));
        }
        for (name, v) in [
            ("line_width_px", self.line_width_px),
            ("point_radius_px", self.point_radius_px),
            ("marker_radius_frac", self.marker_radius_frac),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(HeartError::invalid_argument(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        if !self.marker_outline_px.is_finite() || self.marker_outline_px < 0.0 {
            return Err(HeartError::invalid_argument(
                "marker_outline_px must be finite and >= 0",
            ));
        }
        if !self.caption_size_px.is_finite() || self.caption_size_px <= 0.0 {
            return Err(HeartError::invalid_argument(
                "caption_size_px must be finite and > 0",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/backend.rs"]
mod tests;
