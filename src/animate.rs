//! Marker animation: an explicit loop over frame ticks.
//!
//! Frame `f` places the marker at sample `(f * stride) mod N`. Each frame is rendered through a
//! [`RenderBackend`] and handed to a [`FrameSink`]; generation of the curve itself happens before
//! and independently of this loop.

use crate::{
    encode::sink::{FrameSink, SinkConfig},
    foundation::core::{Fps, FrameIndex},
    foundation::error::{HeartError, HeartResult},
    render::backend::RenderBackend,
    render::scene::Scene,
};

/// Timing of the marker animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AnimationSettings {
    pub fps: Fps,
    /// Full trips around the curve.
    pub loops: u32,
    /// Samples the marker advances per frame.
    pub stride: usize,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        // 20 ms per frame.
        Self {
            fps: Fps { num: 50, den: 1 },
            loops: 1,
            stride: 1,
        }
    }
}

impl AnimationSettings {
    pub fn validate(&self) -> HeartResult<()> {
        Fps::new(self.fps.num, self.fps.den)?;
        if self.loops == 0 {
            return Err(HeartError::invalid_argument("loops must be >= 1"));
        }
        if self.stride == 0 {
            return Err(HeartError::invalid_argument("stride must be >= 1"));
        }
        Ok(())
    }

    /// Frames needed to take the marker around `sample_count` samples `loops` times.
    pub fn frame_count(&self, sample_count: usize) -> u64 {
        let per_loop = sample_count.div_ceil(self.stride) as u64;
        per_loop * u64::from(self.loops)
    }

    /// Marker index shown on frame `frame`.
    pub fn marker_index(&self, frame: u64, sample_count: usize) -> usize {
        if sample_count == 0 {
            return 0;
        }
        let n = sample_count as u64;
        ((frame % n) * (self.stride as u64 % n) % n) as usize
    }
}

/// Summary of a finished animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnimationStats {
    pub frames: u64,
    /// Playback length at the configured frame rate.
    pub duration: std::time::Duration,
}

/// Render the marker travelling along `base.points` into `sink`.
///
/// `base` supplies the points, display mode, and caption; its `marker` is overwritten per frame.
/// `sink.end()` is attempted even when a frame fails, and the first error is returned.
#[tracing::instrument(skip_all, fields(samples = base.points.len()))]
pub fn animate<B, S>(
    backend: &mut B,
    base: &Scene,
    settings: &AnimationSettings,
    sink: &mut S,
) -> HeartResult<AnimationStats>
where
    B: RenderBackend + ?Sized,
    S: FrameSink + ?Sized,
{
    settings.validate()?;
    let n = base.points.len();
    if n == 0 {
        return Err(HeartError::invalid_argument(
            "cannot animate an empty point sequence",
        ));
    }

    let canvas = backend.canvas();
    sink.begin(SinkConfig {
        width: canvas.width,
        height: canvas.height,
        fps: settings.fps,
    })?;

    let total = settings.frame_count(n);
    let mut scene = base.clone();
    let run = (|| -> HeartResult<()> {
        for f in 0..total {
            scene.marker = Some(settings.marker_index(f, n));
            let frame = backend.render_scene(&scene)?;
            sink.push_frame(FrameIndex(f), &frame)?;
            if f > 0 && f % 250 == 0 {
                tracing::debug!(frame = f, total, "animation progress");
            }
        }
        Ok(())
    })();

    let ended = sink.end();
    run?;
    ended?;

    let nanos = u128::from(total) * u128::from(settings.fps.den) * 1_000_000_000
        / u128::from(settings.fps.num);
    let duration = std::time::Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX));
    tracing::info!(frames = total, seconds = duration.as_secs_f64(), "animation rendered");
    Ok(AnimationStats {
        frames: total,
        duration,
    })
}

#[cfg(test)]
#[path = "../tests/unit/animate.rs"]
mod tests;
