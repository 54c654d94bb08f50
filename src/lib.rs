//! heartline draws hearts.
//!
//! The crate has two halves that only meet through a text file:
//!
//! 1. **Generate**: [`generate`] samples the parametric "sin³" heart into a closed [`Curve`].
//! 2. **Store**: [`store::coords`] writes and reads the samples as `x,y` rows.
//! 3. **Render**: a [`RenderContext`] rasterizes a [`Scene`] (line, points, or both, plus an
//!    optional marker and caption) into premultiplied RGBA8 pixels on the CPU.
//! 4. **Animate / encode** (optional): [`animate`] walks the marker around the curve one frame at a
//!    time and pushes frames into a [`FrameSink`] (for example a PNG sequence).
//!
//! The `heart-animate` binary runs generate → store → animate; `heart-view` runs store → render.
#![forbid(unsafe_code)]

mod foundation;

pub mod animate;
pub mod curve;
pub mod encode;
pub mod render;
pub mod store;

pub use animate::{AnimationSettings, AnimationStats, animate};
pub use curve::generator::{HEART_PERIOD, MAX_SAMPLES, generate, heart_point};
pub use curve::model::Curve;
pub use encode::png::{PngSequenceSink, write_png};
pub use encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use foundation::core::{Canvas, Fps, FrameIndex, Point2D, Rgba8};
pub use foundation::error::{HeartError, HeartResult};
pub use render::backend::{FrameRGBA, RenderBackend, RenderSettings};
pub use render::cpu::RenderContext;
pub use render::scene::{DisplayMode, Scene, Viewport};
pub use store::coords::{Precision, WriteOptions};
