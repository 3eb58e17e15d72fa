//! Frame sources.
//!
//! The viewer pulls decoded RGB frames from a `FrameSource`. Two backends
//! exist behind the `RtspSource` type:
//! - `stub://` URLs get a synthetic generator (tests, offline demos)
//! - real RTSP URLs go through GStreamer (feature: rtsp-gstreamer)
//!
//! Sources block until a frame is available or a short timeout elapses.
//! `next_frame` returning `Ok(None)` means "nothing usable this tick"; the
//! viewer skips the iteration and keeps going.

pub mod rtsp;

pub use rtsp::{RtspConfig, RtspSource};

use anyhow::Result;

use crate::frame::Frame;

/// A blocking producer of decoded frames.
pub trait FrameSource {
    /// Start the stream. Must be called before `next_frame`.
    fn connect(&mut self) -> Result<()>;

    /// Pull the next frame. `Ok(None)` means the source had no usable frame
    /// this tick (stall, decode hiccup, empty sample); callers skip it.
    fn next_frame(&mut self) -> Result<Option<Frame>>;

    /// True while the source is delivering frames at a plausible rate.
    fn is_healthy(&self) -> bool;

    fn stats(&self) -> SourceStats;
}

/// Counters for the periodic health log.
#[derive(Clone, Debug)]
pub struct SourceStats {
    pub frames_captured: u64,
    pub url: String,
}
