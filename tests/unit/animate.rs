use super::*;
use crate::{
    encode::sink::InMemorySink,
    foundation::core::{Canvas, Point2D},
    render::backend::FrameRGBA,
    render::scene::DisplayMode,
};

#[derive(Default)]
struct RecordingBackend {
    markers: Vec<Option<usize>>,
    fail_at: Option<usize>,
}

impl RenderBackend for RecordingBackend {
    fn render_scene(&mut self, scene: &Scene) -> HeartResult<FrameRGBA> {
        if self.fail_at == Some(self.markers.len()) {
            return Err(HeartError::render("boom"));
        }
        self.markers.push(scene.marker);
        Ok(FrameRGBA {
            width: 2,
            height: 2,
            data: vec![scene.marker.unwrap_or(0) as u8; 16],
            premultiplied: true,
        })
    }

    fn canvas(&self) -> Canvas {
        Canvas {
            width: 2,
            height: 2,
        }
    }
}

fn scene(n: usize) -> Scene {
    let pts = (0..n).map(|i| Point2D::new(i as f64, 0.0)).collect();
    Scene::new(pts, DisplayMode::Line).with_caption("hi")
}

#[test]
fn marker_visits_every_sample_in_order() {
    let mut backend = RecordingBackend::default();
    let mut sink = InMemorySink::new();
    let stats = animate(
        &mut backend,
        &scene(5),
        &AnimationSettings::default(),
        &mut sink,
    )
    .unwrap();

    assert_eq!(stats.frames, 5);
    assert_eq!(stats.duration, std::time::Duration::from_millis(100));
    assert_eq!(
        backend.markers,
        vec![Some(0), Some(1), Some(2), Some(3), Some(4)]
    );

    let idx: Vec<u64> = sink.frames().iter().map(|(i, _)| i.0).collect();
    assert_eq!(idx, vec![0, 1, 2, 3, 4]);
    assert!(sink.is_ended());
    assert_eq!(sink.config().unwrap().fps, Fps { num: 50, den: 1 });
}

#[test]
fn stride_and_loops_wrap_around() {
    let settings = AnimationSettings {
        loops: 2,
        stride: 2,
        ..AnimationSettings::default()
    };
    assert_eq!(settings.frame_count(5), 6);

    let mut backend = RecordingBackend::default();
    let mut sink = InMemorySink::new();
    animate(&mut backend, &scene(5), &settings, &mut sink).unwrap();

    let markers: Vec<usize> = backend.markers.iter().map(|m| m.unwrap()).collect();
    assert_eq!(markers, vec![0, 2, 4, 1, 3, 0]);
}

#[test]
fn rejects_bad_settings_and_empty_scene() {
    let mut backend = RecordingBackend::default();
    let mut sink = InMemorySink::new();

    let zero_loops = AnimationSettings {
        loops: 0,
        ..AnimationSettings::default()
    };
    assert!(matches!(
        animate(&mut backend, &scene(3), &zero_loops, &mut sink),
        Err(HeartError::InvalidArgument(_))
    ));

    let zero_stride = AnimationSettings {
        stride: 0,
        ..AnimationSettings::default()
    };
    assert!(zero_stride.validate().is_err());

    assert!(matches!(
        animate(
            &mut backend,
            &scene(0),
            &AnimationSettings::default(),
            &mut sink
        ),
        Err(HeartError::InvalidArgument(_))
    ));
    assert!(backend.markers.is_empty());
    assert!(sink.config().is_none());
}

#[test]
fn sink_is_ended_even_when_a_frame_fails() {
    let mut backend = RecordingBackend {
        fail_at: Some(2),
        ..RecordingBackend::default()
    };
    let mut sink = InMemorySink::new();
    let err = animate(
        &mut backend,
        &scene(4),
        &AnimationSettings::default(),
        &mut sink,
    )
    .unwrap_err();

    assert!(matches!(err, HeartError::Render(_)));
    assert_eq!(sink.frames().len(), 2);
    assert!(sink.is_ended());
}

#[test]
fn caption_and_mode_carry_through_every_frame() {
    struct CaptionCheck;
    impl RenderBackend for CaptionCheck {
        fn render_scene(&mut self, scene: &Scene) -> HeartResult<FrameRGBA> {
            assert_eq!(scene.caption.as_deref(), Some("hi"));
            assert_eq!(scene.mode, DisplayMode::Line);
            Ok(FrameRGBA {
                width: 1,
                height: 1,
                data: vec![0; 4],
                premultiplied: true,
            })
        }

        fn canvas(&self) -> Canvas {
            Canvas {
                width: 1,
                height: 1,
            }
        }
    }

    let mut sink = InMemorySink::new();
    animate(
        &mut CaptionCheck,
        &scene(3),
        &AnimationSettings::default(),
        &mut sink,
    )
    .unwrap();
    assert_eq!(sink.frames().len(), 3);
}
