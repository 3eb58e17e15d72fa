//! Object detection clients.
//!
//! Detection is delegated to an external HTTP inference service; this module
//! is only the wire client plus the prediction records it returns. The
//! `Detector` trait is the seam the viewer loop runs against, so tests and
//! offline demos can swap in `StubDetector`.

mod http;
mod multipart;
mod result;
mod stub;

pub use http::{HttpDetector, HttpDetectorConfig};
pub use result::{PixelBox, Prediction};
pub use stub::StubDetector;

use anyhow::Result;

use crate::frame::Frame;

/// A per-frame object detector.
pub trait Detector {
    /// Detector identifier for logs.
    fn name(&self) -> &'static str;

    /// Run detection on one frame. Blocks until the service answers or the
    /// request times out. A frame with nothing in it yields an empty list.
    fn detect(&mut self, frame: &Frame) -> Result<Vec<Prediction>>;
}
