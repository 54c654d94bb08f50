use kurbo::Shape as _;

use crate::{
    curve::model::polyline_path,
    foundation::core::{BezPath, Canvas, Point, Rgba8},
    foundation::error::{HeartError, HeartResult},
    render::backend::{FrameRGBA, RenderBackend, RenderSettings},
    render::scene::{Scene, Viewport},
    render::text::{FontBytes, TextBrushRgba8, TextLayoutEngine, resolve_caption_font},
};

const PATH_TOLERANCE: f64 = 0.1;

/// CPU raster target for heart scenes.
///
/// Created explicitly with [`RenderContext::new`], which allocates the pixmap and resolves the
/// caption font up front; dropping it releases both. No IO happens while rendering frames.
pub struct RenderContext {
    settings: RenderSettings,
    width: u16,
    height: u16,
    pixmap: vello_cpu::Pixmap,
    caption: Option<CaptionFont>,
    caption_layout: Option<(String, parley::Layout<TextBrushRgba8>)>,
}

struct CaptionFont {
    engine: TextLayoutEngine,
    font: vello_cpu::peniko::FontData,
}

impl RenderContext {
    pub fn new(settings: RenderSettings) -> HeartResult<Self> {
        settings.validate()?;
        let width: u16 = settings
            .width
            .try_into()
            .map_err(|_| HeartError::invalid_argument("canvas width exceeds u16"))?;
        let height: u16 = settings
            .height
            .try_into()
            .map_err(|_| HeartError::invalid_argument("canvas height exceeds u16"))?;

        let caption = match resolve_caption_font(settings.font_path.as_deref())? {
            Some(font) => load_caption_font(&font),
            None => {
                tracing::warn!("no fonts found on this system; captions will not be drawn");
                None
            }
        };

        tracing::debug!(width, height, captions = caption.is_some(), "render context created");
        Ok(Self {
            settings,
            width,
            height,
            pixmap: vello_cpu::Pixmap::new(width, height),
            caption,
            caption_layout: None,
        })
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Whether a caption font was found.
    pub fn can_draw_captions(&self) -> bool {
        self.caption.is_some()
    }

    pub fn render(&mut self, scene: &Scene) -> HeartResult<FrameRGBA> {
        let viewport = Viewport::fit(&scene.points, self.settings.margin, self.canvas())?;

        let mut ctx = vello_cpu::RenderContext::new(self.width, self.height);
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

        let bg = self.settings.background_rgba;
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(bg.r, bg.g, bg.b, bg.a));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(self.width),
            f64::from(self.height),
        ));

        if scene.mode.draws_line() && scene.points.len() > 1 {
            let mut path = polyline_path(&scene.points, true);
            path.apply_affine(viewport.transform);
            let stroke = kurbo::Stroke::new(self.settings.line_width_px)
                .with_join(kurbo::Join::Round)
                .with_caps(kurbo::Cap::Round);
            let outline = kurbo::stroke(
                path.iter(),
                &stroke,
                &kurbo::StrokeOpts::default(),
                PATH_TOLERANCE,
            );
            fill(&mut ctx, &outline, self.settings.curve_rgba);
        }

        if scene.mode.draws_points() && !scene.points.is_empty() {
            let mut dots = BezPath::new();
            for &p in &scene.points {
                let c = kurbo::Circle::new(viewport.to_pixel(p), self.settings.point_radius_px);
                dots.extend(c.path_elements(PATH_TOLERANCE));
            }
            fill(&mut ctx, &dots, self.settings.curve_rgba);
        }

        if let Some(p) = scene.marker_point() {
            let radius = self.settings.marker_radius_frac * viewport.max_range() * viewport.scale;
            let center = viewport.to_pixel(p);
            let outline = self.settings.marker_outline_px;
            if outline > 0.0 {
                let ring = kurbo::Circle::new(center, radius + outline).to_path(PATH_TOLERANCE);
                fill(&mut ctx, &ring, self.settings.marker_outline_rgba);
            }
            let ball = kurbo::Circle::new(center, radius).to_path(PATH_TOLERANCE);
            fill(&mut ctx, &ball, self.settings.marker_rgba);
        }

        if let Some(text) = scene.caption.as_deref().filter(|t| !t.trim().is_empty()) {
            let anchor = viewport.to_pixel(viewport.caption_anchor());
            self.draw_caption(&mut ctx, text, anchor)?;
        }

        ctx.flush();
        ctx.render_to_pixmap(&mut self.pixmap);

        Ok(FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: self.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }

    fn draw_caption(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        text: &str,
        anchor: Point,
    ) -> HeartResult<()> {
        let Some(caption) = self.caption.as_mut() else {
            return Ok(());
        };

        let cached = matches!(&self.caption_layout, Some((t, _)) if t == text);
        if !cached {
            let c = self.settings.caption_rgba;
            let brush = TextBrushRgba8 {
                r: c.r,
                g: c.g,
                b: c.b,
                a: c.a,
            };
            let layout = caption
                .engine
                .layout_line(text, self.settings.caption_size_px, brush)?;
            self.caption_layout = Some((text.to_string(), layout));
        }
        let Some((_, layout)) = self.caption_layout.as_ref() else {
            return Ok(());
        };

        let dx = anchor.x - f64::from(layout.width()) / 2.0;
        let dy = anchor.y - f64::from(layout.height()) / 2.0;
        ctx.set_transform(vello_cpu::kurbo::Affine::translate((dx, dy)));

        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };

                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));

                let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&caption.font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }

        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        Ok(())
    }
}

impl RenderBackend for RenderContext {
    fn render_scene(&mut self, scene: &Scene) -> HeartResult<FrameRGBA> {
        self.render(scene)
    }

    fn canvas(&self) -> Canvas {
        self.settings.canvas()
    }
}

impl Drop for RenderContext {
    fn drop(&mut self) {
        tracing::debug!(
            width = self.width,
            height = self.height,
            "render context released"
        );
    }
}

fn load_caption_font(font: &FontBytes) -> Option<CaptionFont> {
    let mut engine = TextLayoutEngine::new();
    match engine.register(font) {
        Ok(family) => {
            tracing::debug!(family = %family, "caption font registered");
            let data = vello_cpu::peniko::Blob::from(font.data.as_ref().clone());
            Some(CaptionFont {
                engine,
                font: vello_cpu::peniko::FontData::new(data, font.index),
            })
        }
        Err(e) => {
            tracing::warn!(error = %e, "caption font unusable; captions will not be drawn");
            None
        }
    }
}

fn fill(ctx: &mut vello_cpu::RenderContext, path: &BezPath, color: Rgba8) {
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
        color.r, color.g, color.b, color.a,
    ));
    ctx.fill_path(&bezpath_to_cpu(path));
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
