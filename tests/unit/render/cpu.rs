use super::*;
use crate::{curve::generator::generate, foundation::core::Point2D, render::scene::DisplayMode};

const WHITE: [u8; 4] = [255, 255, 255, 255];

fn small_settings() -> RenderSettings {
    RenderSettings {
        width: 128,
        height: 128,
        ..RenderSettings::default()
    }
}

fn heart_scene(mode: DisplayMode) -> Scene {
    Scene::new(generate(400).unwrap().into_points(), mode)
}

fn pixel_at(frame: &FrameRGBA, p: Point) -> [u8; 4] {
    frame
        .pixel(p.x.floor() as u32, p.y.floor() as u32)
        .unwrap()
}

#[test]
fn rejects_invalid_settings() {
    let err = RenderContext::new(RenderSettings {
        width: 0,
        ..RenderSettings::default()
    })
    .err()
    .unwrap();
    assert!(matches!(err, HeartError::InvalidArgument(_)));
}

#[test]
fn render_is_deterministic_and_sized() {
    let mut ctx = RenderContext::new(small_settings()).unwrap();
    let scene = heart_scene(DisplayMode::Line);
    let a = ctx.render(&scene).unwrap();
    let b = ctx.render(&scene).unwrap();

    assert_eq!(a.width, 128);
    assert_eq!(a.height, 128);
    assert_eq!(a.data.len(), 128 * 128 * 4);
    assert!(a.premultiplied);
    assert_eq!(a.data, b.data);
}

#[test]
fn empty_scene_is_background_only() {
    let mut ctx = RenderContext::new(small_settings()).unwrap();
    let frame = ctx.render(&Scene::default()).unwrap();
    assert!(frame.data.chunks_exact(4).all(|px| px == WHITE));
}

#[test]
fn line_mode_paints_the_curve_but_not_the_interior() {
    let mut ctx = RenderContext::new(small_settings()).unwrap();
    let scene = heart_scene(DisplayMode::Line);
    let frame = ctx.render(&scene).unwrap();
    let vp = Viewport::fit(&scene.points, 3.0, ctx.canvas()).unwrap();

    // Sample 100 of 400 is t = pi/2, the rightmost lobe point (16, 4).
    let on_curve = pixel_at(&frame, vp.to_pixel(scene.points[100]));
    assert_ne!(on_curve, WHITE);

    let inside = pixel_at(&frame, vp.to_pixel(Point2D::new(0.0, -4.0)));
    assert_eq!(inside, WHITE);
}

#[test]
fn display_modes_produce_different_frames() {
    let mut ctx = RenderContext::new(small_settings()).unwrap();
    let line = ctx.render(&heart_scene(DisplayMode::Line)).unwrap();
    let points = ctx.render(&heart_scene(DisplayMode::Points)).unwrap();
    let both = ctx.render(&heart_scene(DisplayMode::Both)).unwrap();

    assert_ne!(line.data, points.data);
    assert_ne!(line.data, both.data);
    let painted = |f: &FrameRGBA| f.data.chunks_exact(4).filter(|px| *px != WHITE).count();
    assert!(painted(&both) >= painted(&line));
}

#[test]
fn marker_moves_with_its_index() {
    let mut ctx = RenderContext::new(small_settings()).unwrap();
    let base = heart_scene(DisplayMode::Line);
    let vp = Viewport::fit(&base.points, 3.0, ctx.canvas()).unwrap();

    let at_top = ctx.render(&base.clone().with_marker(0)).unwrap();
    let at_tip = ctx.render(&base.clone().with_marker(200)).unwrap();
    assert_ne!(at_top.data, at_tip.data);

    let tip = vp.to_pixel(base.points[200]);
    let gold = pixel_at(&at_tip, tip);
    assert_eq!(gold, [218, 165, 32, 255]);
}

#[test]
fn caption_never_fails_rendering() {
    let mut ctx = RenderContext::new(small_settings()).unwrap();
    let scene = heart_scene(DisplayMode::Line).with_caption("I love my husband");
    let with = ctx.render(&scene).unwrap();
    let without = ctx.render(&heart_scene(DisplayMode::Line)).unwrap();
    if ctx.can_draw_captions() {
        assert_ne!(with.data, without.data);
    } else {
        assert_eq!(with.data, without.data);
    }
}
