use std::f64::consts::TAU;

use crate::{
    curve::model::Curve,
    foundation::core::Point2D,
    foundation::error::{HeartError, HeartResult},
};

/// Parameter period of [`heart_point`].
pub const HEART_PERIOD: f64 = TAU;

/// Largest sample count [`generate`] accepts.
pub const MAX_SAMPLES: i64 = 10_000_000;

/// Evaluate the classic "sin³" heart at parameter `t`.
///
/// ```text
/// x(t) = 16 sin³ t
/// y(t) = 13 cos t - 5 cos 2t - 2 cos 3t - cos 4t
/// ```
///
/// The curve is mirror-symmetric about the vertical axis (`t` and `2π - t` map to `(x, y)` and
/// `(-x, y)`). The notch between the lobes sits at `t = 0`, point `(0, 5)`; the bottom tip is at
/// `t = π`, point `(0, -17)`.
pub fn heart_point(t: f64) -> Point2D {
    let s = t.sin();
    let x = 16.0 * s * s * s;
    let y = 13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos();
    Point2D::new(x, y)
}

/// Sample the heart at `sample_count` evenly spaced parameters over one period.
///
/// The closing point is not repeated: parameters run from `0` up to, but excluding, `2π`, so the
/// successor of the last sample is the first one.
#[tracing::instrument(level = "debug")]
pub fn generate(sample_count: i64) -> HeartResult<Curve> {
    if sample_count < 1 {
        return Err(HeartError::invalid_argument(format!(
            "sample count must be >= 1, got {sample_count}"
        )));
    }
    if sample_count > MAX_SAMPLES {
        return Err(HeartError::invalid_argument(format!(
            "sample count must be <= {MAX_SAMPLES}, got {sample_count}"
        )));
    }
    let n = usize::try_from(sample_count).map_err(|_| {
        HeartError::invalid_argument(format!("sample count {sample_count} does not fit in memory"))
    })?;

    let step = HEART_PERIOD / n as f64;
    let points: Vec<Point2D> = (0..n).map(|k| heart_point(k as f64 * step)).collect();

    tracing::debug!(samples = n, step, "generated heart curve");
    Ok(Curve::new(points))
}

#[cfg(test)]
#[path = "../../tests/unit/curve/generator.rs"]
mod tests;
