use std::{fmt, str::FromStr};

use crate::{
    curve::model::bounds_of,
    foundation::core::{Affine, Canvas, Point, Point2D, Rect},
    foundation::error::{HeartError, HeartResult},
};

/// How the point sequence is drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Straight segments in order, closing the loop.
    #[default]
    Line,
    /// Unconnected dots.
    Points,
    /// Line with dots on top.
    Both,
}

impl DisplayMode {
    pub const ALL: [DisplayMode; 3] = [DisplayMode::Line, DisplayMode::Points, DisplayMode::Both];

    pub fn as_str(self) -> &'static str {
        match self {
            DisplayMode::Line => "line",
            DisplayMode::Points => "points",
            DisplayMode::Both => "both",
        }
    }

    pub fn draws_line(self) -> bool {
        matches!(self, DisplayMode::Line | DisplayMode::Both)
    }

    pub fn draws_points(self) -> bool {
        matches!(self, DisplayMode::Points | DisplayMode::Both)
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DisplayMode {
    type Err = HeartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DisplayMode::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                HeartError::invalid_argument(format!(
                    "unknown display style '{s}' (expected one of: line, points, both)"
                ))
            })
    }
}

/// Everything one frame shows.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    pub points: Vec<Point2D>,
    pub mode: DisplayMode,
    /// Index into `points` where the marker ball sits; wraps around the loop.
    pub marker: Option<usize>,
    pub caption: Option<String>,
}

impl Scene {
    pub fn new(points: Vec<Point2D>, mode: DisplayMode) -> Self {
        Self {
            points,
            mode,
            marker: None,
            caption: None,
        }
    }

    pub fn with_marker(mut self, idx: usize) -> Self {
        self.marker = Some(idx);
        self
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// Marker position, if a marker is set and there is anything to put it on.
    pub fn marker_point(&self) -> Option<Point2D> {
        let idx = self.marker?;
        if self.points.is_empty() {
            return None;
        }
        Some(self.points[idx % self.points.len()])
    }
}

/// Maps padded data bounds onto the pixel canvas.
///
/// Equal aspect ratio, centered, y axis pointing up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Data-space rectangle (bounds plus margin) that fills the canvas.
    pub data: Rect,
    /// Pixels per data unit.
    pub scale: f64,
    pub transform: Affine,
}

impl Viewport {
    pub fn fit(points: &[Point2D], margin: f64, canvas: Canvas) -> HeartResult<Self> {
        if canvas.width == 0 || canvas.height == 0 {
            return Err(HeartError::invalid_argument("canvas must be non-empty"));
        }
        let bounds = bounds_of(points).unwrap_or(Rect::new(0.0, 0.0, 0.0, 0.0));
        let mut data = bounds.inflate(margin, margin);
        if data.width() <= 0.0 {
            data = data.inflate(0.5, 0.0);
        }
        if data.height() <= 0.0 {
            data = data.inflate(0.0, 0.5);
        }

        let w = f64::from(canvas.width);
        let h = f64::from(canvas.height);
        let scale = (w / data.width()).min(h / data.height());
        let ox = (w - data.width() * scale) / 2.0;
        let oy = (h - data.height() * scale) / 2.0;

        // px = (x - x0) * s + ox ; py = h - ((y - y0) * s + oy)
        let transform = Affine::new([
            scale,
            0.0,
            0.0,
            -scale,
            ox - data.x0 * scale,
            h - oy + data.y0 * scale,
        ]);

        Ok(Self {
            data,
            scale,
            transform,
        })
    }

    pub fn to_pixel(&self, p: Point2D) -> Point {
        self.transform * Point::from(p)
    }

    /// Where captions are anchored: horizontally centered, 18% up from the bottom edge.
    pub fn caption_anchor(&self) -> Point2D {
        Point2D::new(
            (self.data.x0 + self.data.x1) / 2.0,
            self.data.y0 + 0.18 * self.data.height(),
        )
    }

    /// Larger data extent, used to size the marker.
    pub fn max_range(&self) -> f64 {
        self.data.width().max(self.data.height())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/scene.rs"]
mod tests;
