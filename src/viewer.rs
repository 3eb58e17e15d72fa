//! The sequential per-frame loop.
//!
//! Capture, detect, annotate, show — once per frame, one frame alive at a
//! time. There is no buffering and no pipeline parallelism; the loop is the
//! whole program.
//!
//! Error policy is deliberately minimal:
//! - an empty frame is skipped silently and the loop continues
//! - a failed detection request is logged and the frame is shown undecorated
//! - a display failure is fatal

use anyhow::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crate::annotate::Annotator;
use crate::detect::Detector;
use crate::display::{Display, DisplayControl};
use crate::frame::Frame;
use crate::source::FrameSource;

const HEALTH_LOG_INTERVAL: Duration = Duration::from_secs(5);

/// Loop limits. `max_frames` bounds *displayed* frames; `None` runs until
/// the quit key or Ctrl-C.
#[derive(Clone, Copy, Debug, Default)]
pub struct ViewerOptions {
    pub max_frames: Option<u64>,
}

/// Counters reported when the loop ends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ViewerStats {
    pub frames_shown: u64,
    pub frames_skipped: u64,
    pub detection_failures: u64,
    pub boxes_drawn: u64,
}

pub struct Viewer<'a> {
    source: &'a mut dyn FrameSource,
    detector: &'a mut dyn Detector,
    annotator: &'a Annotator,
    display: &'a mut Display,
    options: ViewerOptions,
}

impl<'a> Viewer<'a> {
    pub fn new(
        source: &'a mut dyn FrameSource,
        detector: &'a mut dyn Detector,
        annotator: &'a Annotator,
        display: &'a mut Display,
        options: ViewerOptions,
    ) -> Self {
        Self {
            source,
            detector,
            annotator,
            display,
            options,
        }
    }

    /// Run until the quit key, Ctrl-C (`running` flips false), or the
    /// `max_frames` limit.
    pub fn run(&mut self, running: &AtomicBool) -> Result<ViewerStats> {
        let mut stats = ViewerStats::default();
        let mut last_health_log = Instant::now();

        while running.load(Ordering::SeqCst) {
            if let Some(max) = self.options.max_frames {
                if stats.frames_shown >= max {
                    log::info!("frame limit of {} reached", max);
                    break;
                }
            }

            if last_health_log.elapsed() >= HEALTH_LOG_INTERVAL {
                let source_stats = self.source.stats();
                log::info!(
                    "stream health={} frames={} url={}",
                    self.source.is_healthy(),
                    source_stats.frames_captured,
                    source_stats.url
                );
                last_health_log = Instant::now();
            }

            let frame = match self.source.next_frame()? {
                Some(frame) if !frame.is_empty() => frame,
                _ => {
                    stats.frames_skipped += 1;
                    continue;
                }
            };

            let predictions = match self.detector.detect(&frame) {
                Ok(predictions) => predictions,
                Err(e) => {
                    log::warn!("{} detector failed: {:#}", self.detector.name(), e);
                    stats.detection_failures += 1;
                    Vec::new()
                }
            };

            let mut image = frame.into_rgb_image()?;
            stats.boxes_drawn += self.annotator.annotate(&mut image, &predictions) as u64;
            let annotated = Frame::from_rgb_image(image);

            if self.display.show(&annotated)? == DisplayControl::Quit {
                log::info!("quit key pressed");
                stats.frames_shown += 1;
                break;
            }
            stats.frames_shown += 1;
        }

        Ok(stats)
    }
}
