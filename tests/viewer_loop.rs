//! End-to-end loop test over the public API: synthetic stream, stub
//! detector, headless display.

use std::sync::atomic::AtomicBool;

use camwatch::{
    Annotator, Display, DisplaySettings, OverlaySettings, Prediction, RtspConfig, RtspSource,
    StubDetector, Viewer, ViewerOptions,
};
use camwatch::source::FrameSource;

fn overlay_settings() -> OverlaySettings {
    OverlaySettings {
        font_path: None,
        font_size: 16.0,
        border_width: 2,
        box_color: [255, 0, 0],
        text_color: [255, 255, 255],
    }
}

#[test]
fn synthetic_stream_runs_to_the_frame_limit() {
    let mut source = RtspSource::new(RtspConfig {
        url: "stub://integration".to_string(),
        target_fps: 10,
        width: 64,
        height: 48,
    })
    .expect("stub source");
    source.connect().expect("connect");

    let mut detector = StubDetector::new(vec![Prediction {
        label: "person".to_string(),
        confidence: Some(0.85),
        x_min: 8.0,
        y_min: 8.0,
        x_max: 40.0,
        y_max: 40.0,
    }]);
    let annotator = Annotator::new(overlay_settings());
    let mut display = Display::new(DisplaySettings {
        title: "integration".to_string(),
        headless: true,
    })
    .expect("headless display");

    let mut viewer = Viewer::new(
        &mut source,
        &mut detector,
        &annotator,
        &mut display,
        ViewerOptions {
            max_frames: Some(5),
        },
    );
    let stats = viewer.run(&AtomicBool::new(true)).expect("run viewer");

    assert_eq!(stats.frames_shown, 5);
    assert_eq!(stats.boxes_drawn, 5);
    assert_eq!(stats.frames_skipped, 0);
    assert_eq!(stats.detection_failures, 0);
    assert_eq!(display.frames_shown(), 5);
    assert!(source.is_healthy());
    assert_eq!(source.stats().frames_captured, 5);
}
