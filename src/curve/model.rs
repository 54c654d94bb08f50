use crate::foundation::core::{BezPath, Point2D, Rect};

/// An ordered, closed sequence of samples.
///
/// The loop is implicit: the last point's successor is the first point. A `Curve` is immutable
/// once built; renderers and the coordinate store only borrow its points.
#[derive(Clone, Debug, PartialEq)]
pub struct Curve {
    points: Vec<Point2D>,
}

impl Curve {
    pub fn new(points: Vec<Point2D>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point2D] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Point2D> {
        self.points
    }

    /// Point at `idx`, wrapping around the loop.
    pub fn point_wrapped(&self, idx: usize) -> Option<Point2D> {
        if self.points.is_empty() {
            return None;
        }
        Some(self.points[idx % self.points.len()])
    }

    pub fn bounds(&self) -> Option<Rect> {
        bounds_of(&self.points)
    }

    /// Distance from the last sample back to the first.
    pub fn cyclic_gap(&self) -> f64 {
        match (self.points.first(), self.points.last()) {
            (Some(&first), Some(&last)) => last.distance(first),
            _ => 0.0,
        }
    }

    /// Largest distance between cyclically adjacent samples.
    pub fn max_step(&self) -> f64 {
        let n = self.points.len();
        (0..n)
            .map(|i| self.points[i].distance(self.points[(i + 1) % n]))
            .fold(0.0, f64::max)
    }

    /// Closest sample to `target` and its distance.
    pub fn nearest(&self, target: Point2D) -> Option<(usize, f64)> {
        self.points
            .iter()
            .enumerate()
            .map(|(i, p)| (i, p.distance(target)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }

    pub fn to_path(&self, closed: bool) -> BezPath {
        polyline_path(&self.points, closed)
    }
}

impl From<Vec<Point2D>> for Curve {
    fn from(points: Vec<Point2D>) -> Self {
        Self::new(points)
    }
}

/// Axis-aligned bounds of `points`, `None` when empty.
pub fn bounds_of(points: &[Point2D]) -> Option<Rect> {
    let first = points.first()?;
    let mut r = Rect::new(first.x, first.y, first.x, first.y);
    for p in &points[1..] {
        r.x0 = r.x0.min(p.x);
        r.y0 = r.y0.min(p.y);
        r.x1 = r.x1.max(p.x);
        r.y1 = r.y1.max(p.y);
    }
    Some(r)
}

/// Straight segments through `points` in order, optionally closing the loop.
pub fn polyline_path(points: &[Point2D], closed: bool) -> BezPath {
    let mut path = BezPath::new();
    let Some((&first, rest)) = points.split_first() else {
        return path;
    };
    path.move_to(first);
    for &p in rest {
        path.line_to(p);
    }
    if closed {
        path.close_path();
    }
    path
}

#[cfg(test)]
#[path = "../../tests/unit/curve/model.rs"]
mod tests;
