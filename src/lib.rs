//! camwatch
//!
//! An RTSP camera viewer with object-detection overlays. Frames are pulled
//! from the camera stream, posted to a local detection HTTP service, drawn
//! over with the returned bounding boxes, and shown in a window until the
//! quit key is pressed.
//!
//! The heavy lifting (video decode, inference) is delegated: GStreamer
//! decodes the stream and an external service runs the model. What lives
//! here is the sequential per-frame loop and its wiring.
//!
//! # Module Structure
//!
//! - `frame`: the in-memory RGB frame
//! - `source`: frame sources (RTSP via GStreamer, synthetic stub)
//! - `detect`: detection clients (HTTP multipart, stub) and prediction records
//! - `annotate`: bounding box and label drawing
//! - `display`: window / headless output and the quit key
//! - `viewer`: the capture → detect → annotate → show loop
//! - `config`: file + env configuration

pub mod annotate;
pub mod config;
pub mod detect;
pub mod display;
pub mod frame;
pub mod source;
pub mod viewer;

pub use annotate::Annotator;
pub use config::{CamwatchConfig, DetectorSettings, DisplaySettings, OverlaySettings, StreamSettings};
pub use detect::{Detector, HttpDetector, HttpDetectorConfig, PixelBox, Prediction, StubDetector};
pub use display::{Display, DisplayControl};
pub use frame::Frame;
pub use source::{FrameSource, RtspConfig, RtspSource, SourceStats};
pub use viewer::{Viewer, ViewerOptions, ViewerStats};
